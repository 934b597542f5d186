//! Node types: NodeId, NodeContent, ElementData.

use std::collections::BTreeMap;
use std::fmt;

use slotmap::new_key_type;

use crate::event::EventHandler;
use crate::vnode::Key;

new_key_type! {
    /// Unique identifier for a live node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Content of a single live node: raw text, or an element with a tag.
#[derive(Clone)]
pub enum NodeContent {
    /// A text node holding a raw string.
    Text(String),
    /// An element node.
    Element(ElementData),
}

impl NodeContent {
    /// Create a text node's content.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create an element node's content with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element(ElementData::new(tag))
    }

    /// The element tag, or `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Element(el) => Some(&el.tag),
        }
    }

    /// The text payload, or `None` for element nodes.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Element(_) => None,
        }
    }

    /// The element data, or `None` for text nodes.
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Text(_) => None,
            Self::Element(el) => Some(el),
        }
    }

    /// Mutable element data, or `None` for text nodes.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            Self::Text(_) => None,
            Self::Element(el) => Some(el),
        }
    }
}

impl fmt::Debug for NodeContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Element(el) => el.fmt(f),
        }
    }
}

/// Data held by an element node.
///
/// The `class` prop on a VNode is whitespace-split into `classes` rather than
/// stored as a generic attribute, matching the two-tier styling model. The
/// `key`, when present, is the retrievable identity attribute used by keyed
/// removal scans.
#[derive(Clone, Default)]
pub struct ElementData {
    /// Element tag (e.g. "div", "span").
    pub tag: String,
    /// Generic string attributes.
    pub attributes: BTreeMap<String, String>,
    /// Class list (from the whitespace-joined `class` prop).
    pub classes: Vec<String>,
    /// Stable identity token recorded at materialization time.
    pub key: Option<Key>,
    /// Live event listeners, by event name.
    pub listeners: BTreeMap<String, EventHandler>,
}

impl ElementData {
    /// Create element data with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the identity key (builder).
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Check whether this element has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replace the class list from a whitespace-joined string.
    pub fn set_class_list(&mut self, joined: &str) {
        self.classes = joined.split_whitespace().map(str::to_owned).collect();
    }
}

impl fmt::Debug for ElementData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementData")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("classes", &self.classes)
            .field("key", &self.key)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}
