//! Binding: a component wired to the store with automatic dependency tracking.
//!
//! Every refresh drops the previous subscription set, renders with a fresh
//! [`DepSet`], and subscribes to exactly the keys that render read. A binding
//! therefore never holds a stale subscription to a key its last render did
//! not touch: a component that branches from reading `x` to reading `y` stops
//! re-rendering on `x` entirely.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::error;

use super::Props;
use crate::dom::NodeId;
use crate::runtime::Runtime;
use crate::store::{DepSet, Subscriber};

struct BindingInner {
    name: String,
    props: Props,
    parent: NodeId,
    /// Keys the callback is currently subscribed under.
    subscriptions: RefCell<BTreeSet<String>>,
    /// The store callback itself. Stored so refresh can unsubscribe and
    /// resubscribe its own identity (the store compares callbacks by `Rc`
    /// pointer). The closure holds this struct, so `unmount` must clear the
    /// slot to break the self-reference.
    callback: RefCell<Option<Subscriber>>,
}

/// A named component bound to a parent node and to the store.
///
/// Created by [`Runtime::bind_component`](crate::runtime::Runtime::bind_component);
/// binding performs the initial render immediately. Cloning shares the
/// binding.
#[derive(Clone)]
pub struct Binding {
    inner: Rc<BindingInner>,
}

impl Binding {
    pub(crate) fn bind(rt: &mut Runtime, name: impl Into<String>, props: Props, parent: NodeId) -> Self {
        let inner = Rc::new(BindingInner {
            name: name.into(),
            props,
            parent,
            subscriptions: RefCell::new(BTreeSet::new()),
            callback: RefCell::new(None),
        });
        let callback: Subscriber = {
            let inner = Rc::clone(&inner);
            Rc::new(move |rt, _change| refresh(rt, &inner))
        };
        *inner.callback.borrow_mut() = Some(callback);

        let binding = Self { inner };
        binding.mount(rt);
        binding
    }

    /// Render the component now, re-deriving its subscription set.
    pub fn mount(&self, rt: &mut Runtime) {
        refresh(rt, &self.inner);
    }

    /// Run the root VNode's unmount hook on the root live node, then tear
    /// down every remaining subscription.
    ///
    /// Also drops the stored callback. The callback closure holds the
    /// binding's inner state, so clearing the slot here is what lets an
    /// unmounted binding be freed once the last user handle goes away.
    pub fn unmount(&self, rt: &mut Runtime) {
        let root_vnode = rt.recorded_root(self.inner.parent).cloned();
        if let Some(root_vnode) = root_vnode {
            if let Some(hook) = root_vnode.as_element().and_then(|el| el.lifecycle.unmount.clone()) {
                if let Some(node) = rt.dom.child_at(self.inner.parent, 0) {
                    if let Err(err) = hook(rt, node) {
                        error!(component = %self.inner.name, %err, "unmount hook failed");
                    }
                }
            }
        }

        let Some(callback) = self.inner.callback.borrow_mut().take() else {
            return;
        };
        let subscriptions = std::mem::take(&mut *self.inner.subscriptions.borrow_mut());
        for key in subscriptions {
            rt.store.unsubscribe(&key, &callback);
        }
    }

    /// The component name this binding renders.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The parent node this binding renders into.
    pub fn parent(&self) -> NodeId {
        self.inner.parent
    }

    /// Keys the binding is currently subscribed to, sorted.
    pub fn subscriptions(&self) -> Vec<String> {
        self.inner.subscriptions.borrow().iter().cloned().collect()
    }
}

/// One refresh pass: unsubscribe the previous dep set, render with a fresh
/// collector, subscribe to exactly the keys that render read.
fn refresh(rt: &mut Runtime, inner: &Rc<BindingInner>) {
    let Some(callback) = inner.callback.borrow().clone() else {
        return;
    };

    let previous = std::mem::take(&mut *inner.subscriptions.borrow_mut());
    for key in &previous {
        rt.store.unsubscribe(key, &callback);
    }

    let mut deps = DepSet::new();
    if let Err(err) = rt.render_component_tracked(&inner.name, &inner.props, inner.parent, Some(&mut deps)) {
        // A broken component must not poison the notification pass.
        error!(component = %inner.name, %err, "render failed");
    }

    let mut subscriptions = inner.subscriptions.borrow_mut();
    for key in deps {
        rt.store.subscribe(key.clone(), callback.clone());
        subscriptions.insert(key);
    }
}
