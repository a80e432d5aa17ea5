//! Tree dumps in the html5lib tree-construction test format.
//!
//! ```text
//! | <!DOCTYPE html>
//! | <html>
//! |   <head>
//! |   <body>
//! |     <p>
//! |       class="x"
//! |       "text"
//! ```
//!
//! Each line starts with `| ` followed by two spaces per level of depth.
//! Foreign elements carry a `svg ` or `math ` prefix, attributes are sorted by
//! name, and a template's contents are listed under a `content` line.

use std::fmt::Write;

use tern_dom::Namespace;

use crate::tree_adapter::{NodeKind, TreeAdapter};

/// Dump the descendants of `root` (a Document, DocumentFragment or element).
pub fn dump_tree<A: TreeAdapter>(adapter: &A, root: &A::Handle) -> String {
    let mut output = String::new();
    let contents = adapter.template_contents(root);
    let parent = contents.unwrap_or_else(|| root.clone());

    // (node, depth), popped in tree order.
    let mut stack: Vec<(A::Handle, usize)> = Vec::new();
    push_children(adapter, &parent, 0, &mut stack);
    while let Some((node, depth)) = stack.pop() {
        dump_node(adapter, &node, depth, &mut output, &mut stack);
    }
    output
}

fn push_children<A: TreeAdapter>(
    adapter: &A,
    parent: &A::Handle,
    depth: usize,
    stack: &mut Vec<(A::Handle, usize)>,
) {
    for child in adapter.children(parent).into_iter().rev() {
        stack.push((child, depth));
    }
}

fn dump_node<A: TreeAdapter>(
    adapter: &A,
    node: &A::Handle,
    depth: usize,
    output: &mut String,
    stack: &mut Vec<(A::Handle, usize)>,
) {
    let indent = "  ".repeat(depth);
    match adapter.node_kind(node) {
        NodeKind::DocumentType => {
            let Some(doctype) = adapter.doctype(node) else {
                return;
            };
            let _ = write!(output, "| {indent}<!DOCTYPE {}", doctype.name);
            if !doctype.public_id.is_empty() || !doctype.system_id.is_empty() {
                let (public_id, system_id) = (doctype.public_id, doctype.system_id);
                let _ = write!(output, " \"{public_id}\" \"{system_id}\"");
            }
            output.push_str(">\n");
        }

        NodeKind::Text => {
            let text = adapter.text(node).unwrap_or_default();
            let _ = writeln!(output, "| {indent}\"{text}\"");
        }

        NodeKind::Comment => {
            let data = adapter.comment(node).unwrap_or_default();
            let _ = writeln!(output, "| {indent}<!-- {data} -->");
        }

        NodeKind::Element => {
            let tag_name = adapter.tag_name(node).unwrap_or_default();
            match adapter.namespace(node).and_then(Namespace::dump_prefix) {
                Some(prefix) => {
                    let _ = writeln!(output, "| {indent}<{prefix} {tag_name}>");
                }
                None => {
                    let _ = writeln!(output, "| {indent}<{tag_name}>");
                }
            }

            let mut attrs: Vec<(String, &str)> = adapter
                .attributes(node)
                .iter()
                .map(|attr| {
                    let name = match attr.namespace.and_then(Namespace::dump_prefix) {
                        Some(prefix) => format!("{prefix} {}", attr.name),
                        None => attr.name.clone(),
                    };
                    (name, attr.value.as_str())
                })
                .collect();
            attrs.sort_by(|a, b| a.0.cmp(&b.0));
            for (name, value) in attrs {
                let _ = writeln!(output, "|   {indent}{name}=\"{value}\"");
            }

            if let Some(contents) = adapter.template_contents(node) {
                let _ = writeln!(output, "|   {indent}content");
                push_children(adapter, &contents, depth + 2, stack);
            } else {
                push_children(adapter, node, depth + 1, stack);
            }
        }

        NodeKind::Document | NodeKind::DocumentFragment => {
            push_children(adapter, node, depth, stack);
        }
    }
}

#[cfg(test)]
mod tests {
    use tern_dom::{Attribute, DomTree};

    use super::*;

    #[test]
    fn test_dump_nested_elements_and_text() {
        let mut tree = DomTree::new();
        let doc = TreeAdapter::document(&tree);
        let html = TreeAdapter::create_element(&mut tree, "html", Namespace::Html, Vec::new());
        TreeAdapter::append_child(&mut tree, &doc, &html);
        let attrs = vec![
            Attribute::new("id".to_string(), "b".to_string()),
            Attribute::new("class".to_string(), "a".to_string()),
        ];
        let p = TreeAdapter::create_element(&mut tree, "p", Namespace::Html, attrs);
        TreeAdapter::append_child(&mut tree, &html, &p);
        TreeAdapter::insert_text(&mut tree, &p, "hi");

        assert_eq!(
            dump_tree(&tree, &doc),
            "| <html>\n|   <p>\n|     class=\"a\"\n|     id=\"b\"\n|     \"hi\"\n"
        );
    }

    #[test]
    fn test_dump_foreign_element_and_template() {
        let mut tree = DomTree::new();
        let doc = TreeAdapter::document(&tree);
        let svg = TreeAdapter::create_element(&mut tree, "svg", Namespace::Svg, Vec::new());
        TreeAdapter::append_child(&mut tree, &doc, &svg);
        let template =
            TreeAdapter::create_element(&mut tree, "template", Namespace::Html, Vec::new());
        TreeAdapter::append_child(&mut tree, &doc, &template);
        if let Some(contents) = TreeAdapter::template_contents(&tree, &template) {
            TreeAdapter::insert_text(&mut tree, &contents, "x");
        }

        assert_eq!(
            dump_tree(&tree, &doc),
            "| <svg svg>\n| <template>\n|   content\n|     \"x\"\n"
        );
    }
}
