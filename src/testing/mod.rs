//! Test support: textual outlines of the live tree for snapshot assertions.

use std::fmt::Write as _;

use crate::dom::{Dom, NodeContent, NodeId};

/// Render the subtree rooted at `id` as an indented outline, one node per
/// line. Elements show their tag, key, class list, and sorted attributes;
/// text nodes are quoted. Intended for use with `insta::assert_snapshot!`.
pub fn dom_outline(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_outline(dom, id, 0, &mut out);
    out
}

fn write_outline(dom: &Dom, id: NodeId, depth: usize, out: &mut String) {
    let Some(content) = dom.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match content {
        NodeContent::Text(text) => {
            let _ = writeln!(out, "{indent}{text:?}");
        }
        NodeContent::Element(el) => {
            let _ = write!(out, "{indent}<{}", el.tag);
            if let Some(key) = &el.key {
                let _ = write!(out, " key={key}");
            }
            if !el.classes.is_empty() {
                let _ = write!(out, " class=\"{}\"", el.classes.join(" "));
            }
            for (name, value) in &el.attributes {
                let _ = write!(out, " {name}={value:?}");
            }
            let _ = writeln!(out, ">");
            for child in dom.children(id) {
                write_outline(dom, *child, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_shows_structure() {
        let mut dom = Dom::new();
        let list = dom.create_element("ul");
        let item = dom.create(NodeContent::Element(
            crate::dom::ElementData::new("li")
                .with_key("a")
                .with_attribute("data-idx", "0"),
        ));
        dom.append_child(list, item);
        let text = dom.create_text("first");
        dom.append_child(item, text);

        insta::assert_snapshot!(dom_outline(&dom, list), @r###"
        <ul>
          <li key=a data-idx="0">
            "first"
        "###);
    }
}
