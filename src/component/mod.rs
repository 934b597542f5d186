//! Component registry and binder: named render functions, props, and
//! dependency-tracked bindings.

pub mod binding;
pub mod registry;

pub use binding::Binding;
pub use registry::{Registry, RenderFn};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::store::Value;
use crate::vnode::VNode;

/// Errors surfaced by component operations.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// A component name was referenced before being defined.
    #[error("component {0:?} is not defined")]
    NotDefined(String),
}

/// Props passed to a component render function: named typed values plus an
/// ordered child list (empty by default — no normalization step needed).
#[derive(Clone, Default)]
pub struct Props {
    values: BTreeMap<String, Value>,
    children: Vec<VNode>,
}

impl Props {
    /// Create empty props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain value prop (builder).
    pub fn with<T: 'static>(mut self, name: impl Into<String>, value: T) -> Self {
        self.values.insert(name.into(), Rc::new(value));
        self
    }

    /// Set an already-wrapped value prop (builder).
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Append a child VNode (builder).
    pub fn with_child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a sequence of children (builder).
    pub fn with_children(mut self, children: impl IntoIterator<Item = VNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up a prop value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Typed prop lookup.
    pub fn get_cloned<T: Clone + 'static>(&self, name: &str) -> Option<T> {
        self.values.get(name)?.downcast_ref::<T>().cloned()
    }

    /// The child VNodes (empty when none were supplied).
    pub fn children(&self) -> &[VNode] {
        &self.children
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Props")
            .field("values", &self.values.keys().collect::<Vec<_>>())
            .field("children", &self.children.len())
            .finish()
    }
}
