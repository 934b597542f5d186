//! Tree operations: insert, attach, replace, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeContent, NodeId};
use crate::vnode::Key;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The live node tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Child lists are ordered: the reconciler addresses children by position, so
/// insertion and replacement are index-based.
pub struct Dom {
    nodes: SlotMap<NodeId, NodeContent>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
}

impl Dom {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
        }
    }

    /// Create a detached node and return its id.
    pub fn create(&mut self, content: NodeContent) -> NodeId {
        let id = self.nodes.insert(content);
        self.children.insert(id, Vec::new());
        id
    }

    /// Create a detached element node with the given tag.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.create(NodeContent::element(tag))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, value: impl Into<String>) -> NodeId {
        self.create(NodeContent::text(value))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// If `child` is currently attached elsewhere it is detached first, so a
    /// node can only ever have one parent.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either node does not exist.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes.contains_key(parent), "parent does not exist");
        debug_assert!(self.nodes.contains_key(child), "child does not exist");
        self.detach(child);
        self.parent.insert(child, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(child);
    }

    /// Insert `child` under `parent` at `index`.
    ///
    /// Appends when `index` is at or past the end of the current child list.
    pub fn insert_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        debug_assert!(self.nodes.contains_key(parent), "parent does not exist");
        debug_assert!(self.nodes.contains_key(child), "child does not exist");
        self.detach(child);
        self.parent.insert(child, parent);
        let siblings = self
            .children
            .get_mut(parent)
            .expect("parent must have children vec");
        if index >= siblings.len() {
            siblings.push(child);
        } else {
            siblings.insert(index, child);
        }
    }

    /// Replace the child of `parent` at `index` with `new_child`, freeing the
    /// replaced subtree. Returns the replaced node's id, or `None` if no child
    /// existed at that position (in which case `new_child` is appended).
    pub fn replace_child(&mut self, parent: NodeId, index: usize, new_child: NodeId) -> Option<NodeId> {
        let old = self.child_at(parent, index);
        match old {
            Some(old_id) => {
                self.insert_child_at(parent, new_child, index);
                // The old node shifted one position right; drop its subtree.
                self.remove(old_id);
                Some(old_id)
            }
            None => {
                self.append_child(parent, new_child);
                None
            }
        }
    }

    /// Detach `child` from its parent without freeing it. No-op for detached
    /// or unknown nodes.
    pub fn detach(&mut self, child: NodeId) {
        if let Some(parent_id) = self.parent.remove(child) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&c| c != child);
            }
        }
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the `NodeContent` for the removed node, or `None` if it didn't
    /// exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeContent> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        self.detach(id);

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    to_remove.push_back(child);
                }
            }
            self.parent.remove(current);
            let content = self.nodes.remove(current);
            if current == id {
                removed_root = content;
            }
        }

        removed_root
    }

    /// Remove every child of `parent`, freeing their subtrees.
    pub fn clear_children(&mut self, parent: NodeId) {
        let kids: Vec<NodeId> = self.children(parent).to_vec();
        for child in kids {
            self.remove(child);
        }
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Number of children under `parent`.
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).len()
    }

    /// The child of `parent` at `index`, if any.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    /// Find a direct child of `parent` carrying the given identity key.
    ///
    /// Used by keyed reconciliation to locate live nodes for removal.
    pub fn child_with_key(&self, parent: NodeId, key: &Key) -> Option<NodeId> {
        self.children(parent).iter().copied().find(|&child| {
            self.nodes
                .get(child)
                .and_then(NodeContent::as_element)
                .is_some_and(|el| el.key.as_ref() == Some(key))
        })
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's content.
    pub fn get(&self, id: NodeId) -> Option<&NodeContent> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's content.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeContent> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Concatenated text content of `id` and its descendants, in tree order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.nodes.get(current) {
                Some(NodeContent::Text(s)) => out.push_str(s),
                Some(NodeContent::Element(_)) => {
                    for &child in self.children(current).iter().rev() {
                        stack.push(child);
                    }
                }
                None => {}
            }
        }
        out
    }

    /// Overwrite the string of a text node. No-op for elements and unknown ids.
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(NodeContent::Text(s)) = self.nodes.get_mut(id) {
            *s = value.into();
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let a = dom.create_element("section");
        let b = dom.create_element("section");
        let c = dom.create_element("span");
        let d = dom.create_text("hello");
        dom.append_child(root, a);
        dom.append_child(root, b);
        dom.append_child(a, c);
        dom.append_child(a, d);
        (dom, root, a, b, c, d)
    }

    #[test]
    fn append_builds_parent_links() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.parent(a), Some(root));
        assert_eq!(dom.parent(c), Some(a));
        assert_eq!(dom.parent(root), None);
    }

    #[test]
    fn children_are_ordered() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.children(root), &[a, b]);
        assert_eq!(dom.children(a), &[c, d]);
        assert_eq!(dom.child_at(root, 1), Some(b));
        assert_eq!(dom.child_at(root, 2), None);
    }

    #[test]
    fn insert_child_at_middle() {
        let (mut dom, root, a, b, ..) = build_tree();
        let x = dom.create_element("aside");
        dom.insert_child_at(root, x, 1);
        assert_eq!(dom.children(root), &[a, x, b]);
    }

    #[test]
    fn insert_child_at_past_end_appends() {
        let (mut dom, root, a, b, ..) = build_tree();
        let x = dom.create_element("aside");
        dom.insert_child_at(root, x, 99);
        assert_eq!(dom.children(root), &[a, b, x]);
    }

    #[test]
    fn append_moves_attached_node() {
        let (mut dom, root, a, b, c, _d) = build_tree();
        dom.append_child(b, c);
        assert_eq!(dom.parent(c), Some(b));
        assert!(!dom.children(a).contains(&c));
        assert_eq!(dom.ancestors(c), vec![b, root]);
    }

    #[test]
    fn replace_child_frees_old_subtree() {
        let (mut dom, root, a, b, c, d) = build_tree();
        let x = dom.create_element("main");
        let replaced = dom.replace_child(root, 0, x);
        assert_eq!(replaced, Some(a));
        assert_eq!(dom.children(root), &[x, b]);
        assert!(!dom.contains(a));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
    }

    #[test]
    fn replace_child_out_of_range_appends() {
        let (mut dom, root, a, b, ..) = build_tree();
        let x = dom.create_element("main");
        let replaced = dom.replace_child(root, 5, x);
        assert_eq!(replaced, None);
        assert_eq!(dom.children(root), &[a, b, x]);
    }

    #[test]
    fn remove_leaf() {
        let (mut dom, _root, a, _b, c, d) = build_tree();
        let removed = dom.remove(c);
        assert!(removed.is_some());
        assert!(!dom.contains(c));
        assert_eq!(dom.children(a), &[d]);
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, root, a, b, c, d) = build_tree();
        dom.remove(a);
        assert!(!dom.contains(a));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
        assert_eq!(dom.children(root), &[b]);
        assert_eq!(dom.len(), 2);
    }

    #[test]
    fn remove_stale_id_is_none() {
        let mut dom = Dom::new();
        let id = dom.create_element("div");
        dom.remove(id);
        assert!(dom.remove(id).is_none());
    }

    #[test]
    fn clear_children() {
        let (mut dom, root, a, b, ..) = build_tree();
        dom.clear_children(root);
        assert!(dom.children(root).is_empty());
        assert!(!dom.contains(a));
        assert!(!dom.contains(b));
        assert!(dom.contains(root));
    }

    #[test]
    fn detach_keeps_node_alive() {
        let (mut dom, root, a, b, ..) = build_tree();
        dom.detach(a);
        assert!(dom.contains(a));
        assert_eq!(dom.parent(a), None);
        assert_eq!(dom.children(root), &[b]);
    }

    #[test]
    fn child_with_key() {
        let mut dom = Dom::new();
        let root = dom.create_element("ul");
        let plain = dom.create_element("li");
        let keyed = dom.create(NodeContent::Element(
            crate::dom::ElementData::new("li").with_key("b"),
        ));
        dom.append_child(root, plain);
        dom.append_child(root, keyed);

        assert_eq!(dom.child_with_key(root, &Key::from("b")), Some(keyed));
        assert_eq!(dom.child_with_key(root, &Key::from("z")), None);
    }

    #[test]
    fn text_content_aggregates_in_order() {
        let mut dom = Dom::new();
        let root = dom.create_element("p");
        let hello = dom.create_text("hello ");
        let strong = dom.create_element("strong");
        let world = dom.create_text("world");
        dom.append_child(root, hello);
        dom.append_child(root, strong);
        dom.append_child(strong, world);

        assert_eq!(dom.text_content(root), "hello world");
    }

    #[test]
    fn set_text_only_affects_text_nodes() {
        let mut dom = Dom::new();
        let t = dom.create_text("old");
        let e = dom.create_element("div");
        dom.set_text(t, "new");
        dom.set_text(e, "ignored");
        assert_eq!(dom.text_content(t), "new");
        assert_eq!(dom.text_content(e), "");
    }

    #[test]
    fn default_impl() {
        let dom = Dom::default();
        assert!(dom.is_empty());
        assert_eq!(dom.len(), 0);
    }
}
