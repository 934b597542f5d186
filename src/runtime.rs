//! The runtime: single owner of the live tree, the store, the component
//! registry, and both flush queues.
//!
//! Everything callback-shaped in this crate (subscribers, lifecycle hooks,
//! event listeners, frame tasks) takes `&mut Runtime`, so re-entry is plain
//! borrow discipline instead of interior mutability: lists are cloned out of
//! their owner before invocation, and a callback that writes state or
//! re-renders just does so through the same exclusive borrow.

use slotmap::SecondaryMap;
use tracing::{debug, error};

use crate::component::{Binding, ComponentError, Props, Registry};
use crate::dom::{Dom, NodeId};
use crate::render::{materialize, patch, run_mount};
use crate::scheduler::Coalescer;
use crate::store::{DepSet, Scope, StateChange, Store, Value, WILDCARD};
use crate::vnode::{HookResult, VNode};

/// A deferred per-node update, run at the next frame flush.
type FrameTask = Box<dyn FnOnce(&mut Runtime) -> HookResult>;

/// Owner of all mutable runtime state.
///
/// `dom` and `store` are public: direct reads and writes are the normal way
/// to inspect and drive the system, in tests and in applications alike.
pub struct Runtime {
    /// The live node tree.
    pub dom: Dom,
    /// The reactive state store.
    pub store: Store,
    components: Registry,
    /// Per-node deferred updates, coalesced so repeated updates to one node
    /// within a frame collapse to the latest.
    frames: Coalescer<NodeId, FrameTask>,
    /// Last rendered root VNode per mount parent, diffed against on the next
    /// render into the same parent.
    roots: SecondaryMap<NodeId, VNode>,
    shutdown: bool,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            dom: Dom::new(),
            store: Store::new(),
            components: Registry::new(),
            frames: Coalescer::new(),
            roots: SecondaryMap::new(),
            shutdown: false,
        }
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    /// Register a named component render function.
    pub fn define_component(
        &mut self,
        name: impl Into<String>,
        render: impl Fn(&mut Scope, &Props) -> VNode + 'static,
    ) {
        self.components.define(name, render);
    }

    /// Whether a component name has been defined.
    pub fn is_component_defined(&self, name: &str) -> bool {
        self.components.is_defined(name)
    }

    /// Build a component's VNode without mounting anything.
    pub fn create_component_vnode(&mut self, name: &str, props: &Props) -> Result<VNode, ComponentError> {
        let render = self.components.render_fn(name)?;
        let mut scope = Scope::new(&mut self.store, &self.components, None);
        Ok(render(&mut scope, props))
    }

    /// Render a component into `parent`.
    ///
    /// With a recorded root of the same tag, the new output is diffed against
    /// it. Otherwise this is a remount: every existing child of `parent` is
    /// cleared (no unmount hooks run on the discarded tree) and the new root
    /// mounts fresh.
    pub fn render_component(&mut self, name: &str, props: &Props, parent: NodeId) -> Result<(), ComponentError> {
        self.render_component_tracked(name, props, parent, None)
    }

    /// Render with an optional dependency collector attached to the scope.
    /// Used by [`Binding`] to re-derive its subscription set on every pass.
    pub(crate) fn render_component_tracked(
        &mut self,
        name: &str,
        props: &Props,
        parent: NodeId,
        deps: Option<&mut DepSet>,
    ) -> Result<(), ComponentError> {
        let render = self.components.render_fn(name)?;
        debug!(component = name, ?parent, "rendering component");
        let new_root = {
            let mut scope = Scope::new(&mut self.store, &self.components, deps);
            render(&mut scope, props)
        };

        let old_root = self.roots.get(parent).cloned();
        match &old_root {
            Some(old) if old.tag() == new_root.tag() => {
                patch(self, parent, old_root.as_ref(), Some(&new_root), 0);
            }
            _ => {
                // No recorded root, or the root tag changed: remount. Unmount
                // hooks do not run on the discarded tree.
                self.dom.clear_children(parent);
                let node = materialize(&mut self.dom, &new_root);
                self.dom.append_child(parent, node);
                run_mount(self, &new_root, node);
            }
        }
        self.roots.insert(parent, new_root);
        Ok(())
    }

    /// Bind a component to `parent`: render it now, and re-render it whenever
    /// any state key its latest render read changes.
    pub fn bind_component(&mut self, name: impl Into<String>, props: Props, parent: NodeId) -> Binding {
        Binding::bind(self, name, props, parent)
    }

    /// The VNode last rendered into `parent`, if any.
    pub(crate) fn recorded_root(&self, parent: NodeId) -> Option<&VNode> {
        self.roots.get(parent)
    }

    // ---------------------------------------------------------------------
    // Component-scoped state
    // ---------------------------------------------------------------------

    /// Write a component-scoped state value. Unlike global keys, scoped
    /// writes notify synchronously under the compound `"component:key"` name
    /// rather than going through the tick queue.
    pub fn set_component_state(&mut self, component: &str, key: &str, value: Value) {
        if !self.store.set_component_state(component, key, value.clone()) {
            return;
        }
        let compound = format!("{component}:{key}");
        let change = StateChange {
            key: compound.clone(),
            value: Some(value),
        };
        for callback in self.store.subscribers_for(&compound) {
            callback(self, &change);
        }
    }

    // ---------------------------------------------------------------------
    // Flushing
    // ---------------------------------------------------------------------

    /// Deliver pending state notifications, then run deferred frame tasks.
    pub fn flush(&mut self) {
        self.flush_tick();
        self.flush_frame();
    }

    /// Notify subscribers of every key written since the last tick flush.
    ///
    /// Each key notifies once with its current value, regardless of how many
    /// writes it saw. Writes made *by* subscriber callbacks land on the next
    /// flush: the pending set is snapshotted up front.
    pub fn flush_tick(&mut self) {
        let keys = self.store.take_pending();
        for key in keys {
            let change = StateChange {
                value: self.store.get(&key),
                key,
            };
            let mut subscribers = self.store.subscribers_for(&change.key);
            subscribers.extend(self.store.subscribers_for(WILDCARD));
            for callback in subscribers {
                callback(self, &change);
            }
        }
    }

    /// Run every deferred per-node update scheduled since the last frame
    /// flush, in scheduling order. Tasks whose node has since been removed
    /// are dropped.
    pub fn flush_frame(&mut self) {
        for (node, task) in self.frames.drain() {
            if !self.dom.contains(node) {
                debug!(?node, "dropping frame task for removed node");
                continue;
            }
            if let Err(err) = task(self) {
                error!(?node, %err, "frame task failed");
            }
        }
    }

    /// Queue a deferred update for `node`. A second task for the same node
    /// before the flush replaces the first. Returns true when the frame
    /// queue was previously empty and a flush is newly needed.
    pub fn schedule_frame(
        &mut self,
        node: NodeId,
        task: impl FnOnce(&mut Runtime) -> HookResult + 'static,
    ) -> bool {
        self.frames.enqueue(node, Box::new(task))
    }

    /// Whether either queue has pending work.
    pub fn has_pending_work(&self) -> bool {
        self.store.has_pending() || !self.frames.is_empty()
    }

    // ---------------------------------------------------------------------
    // Shutdown
    // ---------------------------------------------------------------------

    /// Ask the driving loop to stop after the current iteration.
    pub fn request_shutdown(&mut self) {
        self.shutdown = true;
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
