//! Reconciler: diff an old and new VNode tree against the live tree.
//!
//! `patch` is a state machine over the four combinations of (old present?,
//! new present?): remove, mount, replace, or update in place. Child lists
//! reconcile positionally unless any new child carries a [`Key`], in which
//! case the whole list goes through the keyed algorithm.
//!
//! The keyed algorithm matches children across renders by identity token:
//! matched keys are patched in place at their new index (no remount, so live
//! node identity survives reordering), brand-new keys insert at their index,
//! and keys absent from the new list are located by their recorded key
//! attribute, unmounted, and detached. There is no explicit move step — this
//! is the pragmatic React-like algorithm, not a minimal-edit diff.
//!
//! Lifecycle hook failures are logged and swallowed; a broken hook never
//! aborts the rest of the pass.

use std::collections::HashMap;

use tracing::error;

use super::materialize::materialize;
use crate::dom::NodeId;
use crate::runtime::Runtime;
use crate::vnode::{Key, VNode};

/// Whether two VNodes differ in kind, text value, or element tag.
///
/// Two native nodes never count as changed (there is no cross-native diff),
/// and same-tag elements update in place regardless of props.
fn changed(old: &VNode, new: &VNode) -> bool {
    match (old, new) {
        (VNode::Text(a), VNode::Text(b)) => a != b,
        (VNode::Native(_), VNode::Native(_)) => false,
        (VNode::Element(a), VNode::Element(b)) => a.tag != b.tag,
        _ => true,
    }
}

/// Invoke a VNode's mount hook, logging and swallowing any error.
pub(crate) fn run_mount(rt: &mut Runtime, vnode: &VNode, node: NodeId) {
    if let Some(hook) = vnode.as_element().and_then(|el| el.lifecycle.mount.clone()) {
        if let Err(err) = hook(rt, node) {
            error!(%err, "mount hook failed");
        }
    }
}

/// Invoke a VNode's unmount hook, logging and swallowing any error.
pub(crate) fn run_unmount(rt: &mut Runtime, vnode: &VNode, node: NodeId) {
    if let Some(hook) = vnode.as_element().and_then(|el| el.lifecycle.unmount.clone()) {
        if let Err(err) = hook(rt, node) {
            error!(%err, "unmount hook failed");
        }
    }
}

/// Reconcile the child of `parent` at `index` from `old` to `new`.
pub fn patch(rt: &mut Runtime, parent: NodeId, old: Option<&VNode>, new: Option<&VNode>, index: usize) {
    let live = rt.dom.child_at(parent, index);

    // Removal: no new VNode at this position.
    let Some(new) = new else {
        if let Some(node) = live {
            if let Some(old) = old {
                run_unmount(rt, old, node);
            }
            rt.dom.remove(node);
        }
        return;
    };

    // Fresh mount: nothing to diff against, or the live tree has no node at
    // this position (a previous sibling pass may have shortened the list).
    if old.is_none() || live.is_none() {
        let node = materialize(&mut rt.dom, new);
        rt.dom.append_child(parent, node);
        run_mount(rt, new, node);
        return;
    }
    let (old, live) = (old.unwrap_or(new), live.unwrap_or(parent));

    // Replace: kind/tag/text changed. The old subtree is discarded wholesale —
    // there is no cross-type diffing.
    if changed(old, new) {
        run_unmount(rt, old, live);
        let node = materialize(&mut rt.dom, new);
        rt.dom.replace_child(parent, index, node);
        run_mount(rt, new, node);
        return;
    }

    // Same-type update: the live node keeps its identity.
    let Some(new_el) = new.as_element() else {
        // Equal text or native passthrough; nothing to do.
        return;
    };

    if new_el.dynamic {
        // Defer the update to the frame queue, keyed by the live node so
        // repeated updates within one frame collapse into a single write.
        // The deferred hook owns this subtree; no child recursion here.
        if let Some(update) = new_el.lifecycle.update.clone() {
            let old_snapshot = old.clone();
            let new_snapshot = new.clone();
            rt.schedule_frame(live, move |rt| update(rt, live, &old_snapshot, &new_snapshot));
        }
        return;
    }

    if let Some(update) = new_el.lifecycle.update.clone() {
        if let Err(err) = update(rt, live, old, new) {
            error!(%err, "update hook failed");
        }
    }

    let old_children: &[VNode] = old.as_element().map(|el| el.children.as_slice()).unwrap_or(&[]);
    let new_children: &[VNode] = &new_el.children;

    if new_children.iter().any(|child| child.key().is_some()) {
        patch_keyed(rt, live, old_children, new_children);
    } else {
        let max = old_children.len().max(new_children.len());
        for i in 0..max {
            patch(rt, live, old_children.get(i), new_children.get(i), i);
        }
    }
}

/// Keyed child reconciliation over `container`'s live children.
fn patch_keyed(rt: &mut Runtime, container: NodeId, old_children: &[VNode], new_children: &[VNode]) {
    let mut old_by_key: HashMap<&Key, &VNode> = HashMap::new();
    for child in old_children {
        if let Some(key) = child.key() {
            old_by_key.insert(key, child);
        }
    }

    for (index, new_child) in new_children.iter().enumerate() {
        match new_child.key() {
            Some(key) => match old_by_key.get(key) {
                // Matched key: patch in place at the new index. The live node
                // is never remounted, so its identity survives the reorder.
                Some(old_child) => patch(rt, container, Some(old_child), Some(new_child), index),
                // Brand-new key: materialize and insert at its index.
                None => {
                    let node = materialize(&mut rt.dom, new_child);
                    rt.dom.insert_child_at(container, node, index);
                }
            },
            // Unkeyed child inside a keyed list falls back to positional.
            None => patch(rt, container, old_children.get(index), Some(new_child), index),
        }
    }

    // Old keys absent from the new list: locate the live node by its recorded
    // key attribute, unmount, detach.
    for old_child in old_children {
        let Some(key) = old_child.key() else {
            continue;
        };
        if new_children.iter().any(|c| c.key() == Some(key)) {
            continue;
        }
        if let Some(node) = rt.dom.child_with_key(container, key) {
            run_unmount(rt, old_child, node);
            rt.dom.remove(node);
        }
    }
}
