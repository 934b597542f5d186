//! Scope: the tracked view of the store handed to render functions.
//!
//! A `Scope` borrows the store for exactly one synchronous render pass.
//! When a [`DepSet`] is attached, every `get` records the key it read — this
//! is how a bound component ends up subscribed to precisely the state its
//! last render touched. Scopes cannot nest or outlive the render call by
//! construction.

use crate::component::{ComponentError, Props, Registry};
use crate::store::{DepSet, Store, Value};
use crate::vnode::VNode;

/// Borrow-scoped render context: tracked store reads plus access to the
/// component registry for nested component VNodes.
pub struct Scope<'a> {
    store: &'a mut Store,
    components: &'a Registry,
    deps: Option<&'a mut DepSet>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        store: &'a mut Store,
        components: &'a Registry,
        deps: Option<&'a mut DepSet>,
    ) -> Self {
        Self {
            store,
            components,
            deps,
        }
    }

    /// Read a state key, recording it as a dependency of this render.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(deps) = self.deps.as_deref_mut() {
            deps.record(key);
        }
        self.store.get(key)
    }

    /// Tracked typed read.
    pub fn get_cloned<T: Clone + 'static>(&mut self, key: &str) -> Option<T> {
        self.get(key)?.downcast_ref::<T>().cloned()
    }

    /// Read without recording a dependency — changes to `key` will not
    /// re-render this component.
    pub fn get_untracked(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    /// Read component-scoped state. Scoped reads are never dependency-tracked
    /// (scoped writes notify synchronously under their compound key).
    pub fn component_state(&self, component: &str, key: &str) -> Option<Value> {
        self.store.component_state(component, key)
    }

    /// Typed component-scoped read.
    pub fn component_state_cloned<T: Clone + 'static>(&self, component: &str, key: &str) -> Option<T> {
        self.store.component_state_cloned(component, key)
    }

    /// Build the VNode for a named component — pure construction, nothing is
    /// mounted. Dependencies the nested render reads are recorded into this
    /// scope's collector.
    pub fn component(&mut self, name: &str, props: &Props) -> Result<VNode, ComponentError> {
        let render = self.components.render_fn(name)?;
        Ok(render(self, props))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::value;
    use crate::vnode::Element;

    #[test]
    fn get_records_dependency() {
        let mut store = Store::new();
        store.set_value("count", 1i64);
        let registry = Registry::new();
        let mut deps = DepSet::new();

        let mut scope = Scope::new(&mut store, &registry, Some(&mut deps));
        assert_eq!(scope.get_cloned::<i64>("count"), Some(1));
        let _ = scope.get("missing");

        assert!(deps.contains("count"));
        assert!(deps.contains("missing"));
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn get_untracked_records_nothing() {
        let mut store = Store::new();
        store.set_value("count", 1i64);
        let registry = Registry::new();
        let mut deps = DepSet::new();

        let scope = Scope::new(&mut store, &registry, Some(&mut deps));
        assert!(scope.get_untracked("count").is_some());
        assert!(deps.is_empty());
    }

    #[test]
    fn without_collector_get_is_plain_read() {
        let mut store = Store::new();
        store.set("k", value("v".to_owned()));
        let registry = Registry::new();

        let mut scope = Scope::new(&mut store, &registry, None);
        assert_eq!(scope.get_cloned::<String>("k").as_deref(), Some("v"));
    }

    #[test]
    fn component_state_is_untracked() {
        let mut store = Store::new();
        store.set_component_state("card", "open", value(true));
        let registry = Registry::new();
        let mut deps = DepSet::new();

        let scope = Scope::new(&mut store, &registry, Some(&mut deps));
        assert_eq!(scope.component_state_cloned::<bool>("card", "open"), Some(true));
        assert!(deps.is_empty());
    }

    #[test]
    fn nested_component_vnode_shares_collector() {
        let mut store = Store::new();
        store.set_value("label", String::from("hi"));
        let mut registry = Registry::new();
        registry.define("Label", |scope, _props| {
            let text = scope.get_cloned::<String>("label").unwrap_or_default();
            Element::new("span").child(VNode::text(text)).into()
        });
        let mut deps = DepSet::new();

        let mut scope = Scope::new(&mut store, &registry, Some(&mut deps));
        let vnode = scope.component("Label", &Props::new()).unwrap();
        assert_eq!(vnode.tag(), Some("span"));
        assert!(deps.contains("label"));
    }

    #[test]
    fn unknown_component_errors() {
        let mut store = Store::new();
        let registry = Registry::new();
        let mut scope = Scope::new(&mut store, &registry, None);
        let err = scope.component("Ghost", &Props::new()).unwrap_err();
        assert!(matches!(err, ComponentError::NotDefined(ref name) if name == "Ghost"));
    }
}
