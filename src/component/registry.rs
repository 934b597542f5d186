//! Component registry: named render functions.

use std::collections::HashMap;
use std::rc::Rc;

use super::{ComponentError, Props};
use crate::store::Scope;
use crate::vnode::VNode;

/// A component's render function: props in, VNode out. Store reads go through
/// the [`Scope`] so they can be dependency-tracked.
pub type RenderFn = Rc<dyn Fn(&mut Scope, &Props) -> VNode>;

/// Registry of named components.
pub struct Registry {
    components: HashMap<String, RenderFn>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    /// Register a render function under `name`. Re-defining a name replaces
    /// the previous render function.
    ///
    /// The `children` prop needs no normalization step: [`Props`] always
    /// carries an ordered child list, defaulting to empty.
    pub fn define(&mut self, name: impl Into<String>, render: impl Fn(&mut Scope, &Props) -> VNode + 'static) {
        self.components.insert(name.into(), Rc::new(render));
    }

    /// Whether `name` has been defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Look up the render function for `name`.
    pub fn render_fn(&self, name: &str) -> Result<RenderFn, ComponentError> {
        self.components
            .get(name)
            .cloned()
            .ok_or_else(|| ComponentError::NotDefined(name.to_owned()))
    }

    /// Registered component names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no components are registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vnode::Element;

    #[test]
    fn define_and_lookup() {
        let mut registry = Registry::new();
        registry.define("Card", |_scope, _props| Element::new("div").into());
        assert!(registry.is_defined("Card"));
        assert!(registry.render_fn("Card").is_ok());
    }

    #[test]
    fn unknown_name_errors() {
        let registry = Registry::new();
        let err = registry.render_fn("Ghost").err().unwrap();
        assert!(matches!(err, ComponentError::NotDefined(ref name) if name == "Ghost"));
        assert_eq!(err.to_string(), "component \"Ghost\" is not defined");
    }

    #[test]
    fn redefine_replaces() {
        let mut registry = Registry::new();
        registry.define("X", |_s, _p| Element::new("div").into());
        registry.define("X", |_s, _p| Element::new("span").into());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn names_sorted() {
        let mut registry = Registry::new();
        registry.define("B", |_s, _p| Element::new("div").into());
        registry.define("A", |_s, _p| Element::new("div").into());
        assert_eq!(registry.names(), vec!["A", "B"]);
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
