//! Lifecycle hooks: mount, update, unmount.
//!
//! Hooks are an explicit optional-capability set — three independent optional
//! callbacks rather than a duck-typed bag. Each hook returns a `Result`; a
//! failing hook is logged and swallowed at the call site so one broken
//! widget cannot abort an in-flight patch pass.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::dom::NodeId;
use crate::runtime::Runtime;
use crate::vnode::VNode;

/// Error raised from a lifecycle hook or a deferred frame task.
///
/// Hooks signal failure by returning `Err`; the runtime never propagates
/// these past the call site.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    /// Create a hook error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Result type returned by every lifecycle hook.
pub type HookResult = Result<(), HookError>;

/// Hook invoked with the live node after insertion (mount) or just before
/// detachment (unmount).
pub type NodeHook = Rc<dyn Fn(&mut Runtime, NodeId) -> HookResult>;

/// Hook invoked when a same-type node is patched. Receives the live node and
/// the old/new VNode pair (deferred dynamic updates see the same arguments).
pub type UpdateHook = Rc<dyn Fn(&mut Runtime, NodeId, &VNode, &VNode) -> HookResult>;

/// Optional lifecycle callbacks carried by an element VNode.
///
/// All three are independent and may be absent.
#[derive(Clone, Default)]
pub struct Lifecycle {
    /// Called with the live node after it is inserted into the tree.
    pub mount: Option<NodeHook>,
    /// Called when the node is patched in place (synchronously, or deferred
    /// on the frame queue when the VNode is `dynamic`).
    pub update: Option<UpdateHook>,
    /// Called with the live node before it is detached.
    pub unmount: Option<NodeHook>,
}

impl Lifecycle {
    /// Whether no hooks are set.
    pub fn is_empty(&self) -> bool {
        self.mount.is_none() && self.update.is_none() && self.unmount.is_none()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("mount", &self.mount.is_some())
            .field("update", &self.update.is_some())
            .field("unmount", &self.unmount.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let lc = Lifecycle::default();
        assert!(lc.is_empty());
        assert!(lc.mount.is_none());
        assert!(lc.update.is_none());
        assert!(lc.unmount.is_none());
    }

    #[test]
    fn not_empty_with_one_hook() {
        let lc = Lifecycle {
            mount: Some(Rc::new(|_, _| Ok(()))),
            ..Lifecycle::default()
        };
        assert!(!lc.is_empty());
    }

    #[test]
    fn debug_shows_presence() {
        let lc = Lifecycle {
            unmount: Some(Rc::new(|_, _| Ok(()))),
            ..Lifecycle::default()
        };
        let dbg = format!("{lc:?}");
        assert!(dbg.contains("unmount: true"));
        assert!(dbg.contains("mount: false"));
    }

    #[test]
    fn hook_error_from_str() {
        let err = HookError::from("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
