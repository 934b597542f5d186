//! Event dispatch over the live tree.
//!
//! Listeners are attached to nodes at materialization (from an element's
//! `.on(..)` handlers). Emitting an event on a node runs that node's listener
//! for the event name, then bubbles up through its ancestors until the root
//! or until a listener stops propagation.

use std::rc::Rc;

use tracing::trace;

use crate::dom::NodeId;
use crate::runtime::Runtime;

/// A live event listener. The `NodeId` is the node the event was emitted on
/// (the target), not the node the listener is attached to.
pub type EventHandler = Rc<dyn Fn(&mut Runtime, NodeId)>;

impl Runtime {
    /// Emit a named event on `target` and bubble it toward the root.
    ///
    /// Each node on the path from `target` upward runs its listener for
    /// `event`, if it has one; every listener receives the original target.
    /// Returns the number of listeners that ran.
    pub fn emit(&mut self, target: NodeId, event: &str) -> usize {
        let mut path = vec![target];
        path.extend(self.dom.ancestors(target));

        let mut handled = 0;
        for node in path {
            let listener = self
                .dom
                .get(node)
                .and_then(|content| content.as_element())
                .and_then(|el| el.listeners.get(event))
                .cloned();
            let Some(listener) = listener else {
                continue;
            };
            trace!(?node, event, "running listener");
            listener(self, target);
            handled += 1;
        }
        handled
    }
}
