//! VNode: the declarative description of a node tree before materialization.
//!
//! A [`VNode`] is an explicit tagged union with three shapes: raw text, a
//! passthrough to an already-live node, and an element with tag, props,
//! events, children, an optional identity [`Key`], lifecycle hooks, and a
//! `dynamic` flag selecting deferred (frame-batched) update dispatch.

pub mod lifecycle;

pub use lifecycle::{HookError, HookResult, Lifecycle, NodeHook, UpdateHook};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::NodeId;
use crate::event::EventHandler;
use crate::runtime::Runtime;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Stable identity token for keyed reconciliation (string or integer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// String identity.
    Str(String),
    /// Integer identity.
    Int(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

// ---------------------------------------------------------------------------
// VNode
// ---------------------------------------------------------------------------

/// Declarative description of one node and its subtree.
#[derive(Clone)]
pub enum VNode {
    /// A raw text node.
    Text(String),
    /// An already-materialized live node, used verbatim. The caller supplied
    /// it and keeps responsibility for its lifecycle.
    Native(NodeId),
    /// An element node.
    Element(Element),
}

impl VNode {
    /// Create a text VNode.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a passthrough VNode for an existing live node.
    pub fn native(id: NodeId) -> Self {
        Self::Native(id)
    }

    /// The element tag, or `None` for text and native nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element(el) => Some(&el.tag),
            _ => None,
        }
    }

    /// The identity key, or `None` for unkeyed and non-element nodes.
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::Element(el) => el.key.as_ref(),
            _ => None,
        }
    }

    /// The element payload, if this is an element VNode.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Native(id) => f.debug_tuple("Native").field(id).finish(),
            Self::Element(el) => el.fmt(f),
        }
    }
}

impl From<Element> for VNode {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for VNode {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for VNode {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// An element VNode: tag, props, events, ordered children, optional key,
/// lifecycle hooks, and the dynamic-update flag.
///
/// Constructed with a builder API:
///
/// ```
/// use vireo::vnode::{Element, VNode};
///
/// let list: VNode = Element::new("ul")
///     .prop("class", "todo done")
///     .child(Element::new("li").key("a").child("first"))
///     .child(Element::new("li").key("b").child("second"))
///     .into();
/// assert_eq!(list.tag(), Some("ul"));
/// ```
#[derive(Clone, Default)]
pub struct Element {
    /// Element tag.
    pub tag: String,
    /// String-keyed attribute map. The `class` prop is special-cased at
    /// materialization into a whitespace-split class list.
    pub props: BTreeMap<String, String>,
    /// Event handlers attached as live listeners at materialization.
    pub events: BTreeMap<String, EventHandler>,
    /// Ordered child VNodes. A single bare child is just a one-element list.
    pub children: Vec<VNode>,
    /// Optional stable identity for keyed reconciliation.
    pub key: Option<Key>,
    /// Optional lifecycle hooks.
    pub lifecycle: Lifecycle,
    /// When true, the `update` hook is deferred to the frame queue instead of
    /// running synchronously, so repeated updates within one frame collapse.
    pub dynamic: bool,
}

impl Element {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set a prop (builder).
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Attach an event handler (builder).
    pub fn on(mut self, event: impl Into<String>, handler: impl Fn(&mut Runtime, NodeId) + 'static) -> Self {
        self.events.insert(event.into(), Rc::new(handler));
        self
    }

    /// Append a single child (builder). Accepts anything convertible to a
    /// VNode, including bare strings.
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a sequence of children (builder).
    pub fn children(mut self, children: impl IntoIterator<Item = VNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the identity key (builder).
    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Mark updates as deferred/batched (builder).
    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Set the mount hook (builder).
    pub fn on_mount(mut self, hook: impl Fn(&mut Runtime, NodeId) -> HookResult + 'static) -> Self {
        self.lifecycle.mount = Some(Rc::new(hook));
        self
    }

    /// Set the update hook (builder).
    pub fn on_update(
        mut self,
        hook: impl Fn(&mut Runtime, NodeId, &VNode, &VNode) -> HookResult + 'static,
    ) -> Self {
        self.lifecycle.update = Some(Rc::new(hook));
        self
    }

    /// Set the unmount hook (builder).
    pub fn on_unmount(mut self, hook: impl Fn(&mut Runtime, NodeId) -> HookResult + 'static) -> Self {
        self.lifecycle.unmount = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("props", &self.props)
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("children", &self.children)
            .field("key", &self.key)
            .field("lifecycle", &self.lifecycle)
            .field("dynamic", &self.dynamic)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_vnode() {
        let v = VNode::text("hello");
        assert!(matches!(v, VNode::Text(ref s) if s == "hello"));
        assert_eq!(v.tag(), None);
        assert_eq!(v.key(), None);
    }

    #[test]
    fn builder_composes() {
        let v: VNode = Element::new("ul")
            .prop("id", "list")
            .child(Element::new("li").key("a").child("first"))
            .child("loose text")
            .dynamic(true)
            .into();

        let el = v.as_element().unwrap();
        assert_eq!(el.tag, "ul");
        assert_eq!(el.props.get("id").map(String::as_str), Some("list"));
        assert_eq!(el.children.len(), 2);
        assert!(el.dynamic);
        assert_eq!(el.children[0].key(), Some(&Key::from("a")));
        assert!(matches!(el.children[1], VNode::Text(_)));
    }

    #[test]
    fn children_extend() {
        let v = Element::new("div").children([VNode::text("a"), VNode::text("b")]);
        assert_eq!(v.children.len(), 2);
    }

    #[test]
    fn key_conversions() {
        assert_eq!(Key::from("a"), Key::Str("a".into()));
        assert_eq!(Key::from(7i64), Key::Int(7));
        assert_eq!(Key::from(7i32), Key::Int(7));
        assert_eq!(Key::from("a").to_string(), "a");
        assert_eq!(Key::from(7i32).to_string(), "7");
    }

    #[test]
    fn hooks_set_via_builder() {
        let el = Element::new("div")
            .on_mount(|_, _| Ok(()))
            .on_unmount(|_, _| Ok(()));
        assert!(el.lifecycle.mount.is_some());
        assert!(el.lifecycle.update.is_none());
        assert!(el.lifecycle.unmount.is_some());
    }

    #[test]
    fn from_string_types() {
        let a: VNode = "text".into();
        let b: VNode = String::from("text").into();
        assert!(matches!(a, VNode::Text(_)));
        assert!(matches!(b, VNode::Text(_)));
    }
}
