//! Node materializer: VNode description to live node instance.

use crate::dom::{Dom, ElementData, NodeContent, NodeId};
use crate::vnode::VNode;

/// Materialize a VNode into the live tree, returning the node's id.
///
/// - Text → a new text node holding the string.
/// - Native → identity passthrough; the caller constructed the node and keeps
///   responsibility for its lifecycle.
/// - Element → a new element node: the key is recorded as a retrievable
///   identity attribute (keyed removal scans need it later), the `class` prop
///   becomes the whitespace-split class list, every other prop becomes a
///   generic attribute, events become live listeners, and children
///   materialize recursively in order.
///
/// The node is created detached; callers insert it and invoke the mount hook
/// themselves. Materialization is total over well-formed VNodes.
pub fn materialize(dom: &mut Dom, vnode: &VNode) -> NodeId {
    match vnode {
        VNode::Text(text) => dom.create_text(text.clone()),
        VNode::Native(id) => *id,
        VNode::Element(el) => {
            let mut data = ElementData::new(&el.tag);
            data.key = el.key.clone();
            for (name, value) in &el.props {
                if name == "class" {
                    data.set_class_list(value);
                } else {
                    data.attributes.insert(name.clone(), value.clone());
                }
            }
            data.listeners = el.events.clone();

            let id = dom.create(NodeContent::Element(data));
            for child in &el.children {
                let child_id = materialize(dom, child);
                dom.append_child(id, child_id);
            }
            id
        }
    }
}
