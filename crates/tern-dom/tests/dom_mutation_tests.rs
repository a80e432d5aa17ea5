//! Tests for DOM tree mutation methods used by the tree builder:
//! remove_child, insert_before, move_children, text coalescing, attribute
//! adoption and the document-level setters.

use tern_dom::{Attribute, DomTree, ElementData, Namespace, NodeId, NodeType, QuirksMode};

/// Helper to create an HTML element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc_element(ElementData::new(tag.to_string(), Namespace::Html, Vec::new()))
}

fn attr(name: &str, value: &str) -> Attribute {
    Attribute::new(name.to_string(), value.to_string())
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_not_a_child_is_noop() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let stranger = alloc_element(&mut tree, "span");
    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    tree.remove_child(stranger, child);

    assert_eq!(tree.parent(child), Some(parent));
}

// ========== append_child ==========

#[test]
fn test_append_child_reparents_attached_node() {
    let mut tree = DomTree::new();
    let first = alloc_element(&mut tree, "div");
    let second = alloc_element(&mut tree, "section");
    let child = alloc_element(&mut tree, "p");
    tree.append_child(first, child);

    tree.append_child(second, child);

    assert!(tree.children(first).is_empty());
    assert_eq!(tree.children(second), &[child]);
    assert_eq!(tree.parent(child), Some(second));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    let a = alloc_element(&mut tree, "a");
    tree.insert_before(parent, a, b);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.parent(a), Some(parent));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    let a = alloc_element(&mut tree, "a");
    tree.append_child(parent, a);
    let elsewhere = alloc_element(&mut tree, "x");

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, elsewhere);

    assert_eq!(tree.children(parent), &[a, b]);
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_in_order() {
    let mut tree = DomTree::new();
    let source = alloc_element(&mut tree, "div");
    let target = alloc_element(&mut tree, "section");
    let existing = alloc_element(&mut tree, "h1");
    tree.append_child(target, existing);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(source, a);
    tree.append_child(source, b);

    tree.move_children(source, target);

    assert!(tree.children(source).is_empty());
    assert_eq!(tree.children(target), &[existing, a, b]);
    assert_eq!(tree.parent(a), Some(target));
    assert_eq!(tree.prev_sibling(a), Some(existing));
    assert_eq!(tree.next_sibling(a), Some(b));
}

// ========== text ==========

#[test]
fn test_insert_text_coalesces_with_last_child() {
    let mut tree = DomTree::new();
    let p = alloc_element(&mut tree, "p");

    tree.insert_text(p, "Hello");
    tree.insert_text(p, ", world");

    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.text_content(p), "Hello, world");
}

#[test]
fn test_insert_text_before_coalesces_with_previous_sibling() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    tree.insert_text(body, "a");
    let table = alloc_element(&mut tree, "table");
    tree.append_child(body, table);

    tree.insert_text_before(body, "b", table);
    tree.insert_text_before(body, "c", table);

    assert_eq!(tree.children(body).len(), 2);
    assert_eq!(tree.as_text(tree.children(body)[0]), Some("abc"));
}

#[test]
fn test_insert_text_after_element_creates_new_node() {
    let mut tree = DomTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.insert_text(p, "x");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(p, b);
    tree.insert_text(p, "y");

    assert_eq!(tree.children(p).len(), 3);
}

// ========== attributes ==========

#[test]
fn test_adopt_attributes_only_adds_missing() {
    let mut tree = DomTree::new();
    let html = tree.alloc_element(ElementData::new(
        "html".to_string(),
        Namespace::Html,
        vec![attr("lang", "en")],
    ));

    tree.adopt_attributes(html, &[attr("lang", "fr"), attr("dir", "ltr")]);

    let element = tree.as_element(html).unwrap();
    assert_eq!(element.get_attribute("lang"), Some("en"));
    assert_eq!(element.get_attribute("dir"), Some("ltr"));
    assert_eq!(element.attrs.len(), 2);
}

// ========== document ==========

#[test]
fn test_template_gets_contents_fragment() {
    let mut tree = DomTree::new();
    let template = alloc_element(&mut tree, "template");
    let contents = tree.template_contents(template).unwrap();

    assert!(matches!(
        tree.get(contents).unwrap().node_type,
        NodeType::DocumentFragment
    ));
    assert_eq!(tree.parent(contents), None);
}

#[test]
fn test_svg_template_has_no_contents() {
    let mut tree = DomTree::new();
    let template = tree.alloc_element(ElementData::new(
        "template".to_string(),
        Namespace::Svg,
        Vec::new(),
    ));
    assert_eq!(tree.template_contents(template), None);
}

#[test]
fn test_set_document_type_replaces_existing() {
    let mut tree = DomTree::new();
    tree.set_document_type("html", "", "");
    tree.set_document_type("svg", "-//W3C//DTD SVG 1.1//EN", "");

    assert_eq!(tree.children(NodeId::ROOT).len(), 1);
    let doctype = tree.as_doctype(tree.children(NodeId::ROOT)[0]).unwrap();
    assert_eq!(doctype.name, "svg");
    assert_eq!(doctype.public_id, "-//W3C//DTD SVG 1.1//EN");
}

#[test]
fn test_quirks_mode_round_trip() {
    let mut tree = DomTree::new();
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
    tree.set_quirks_mode(QuirksMode::LimitedQuirks);
    assert_eq!(tree.quirks_mode(), QuirksMode::LimitedQuirks);
    assert_eq!(QuirksMode::LimitedQuirks.to_string(), "limited-quirks");
}

#[test]
fn test_fragment_tree_root() {
    let mut tree = DomTree::new_fragment();
    assert!(tree.is_fragment());
    tree.set_quirks_mode(QuirksMode::Quirks);
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
}

#[test]
fn test_document_element_and_body() {
    let mut tree = DomTree::new();
    tree.set_document_type("html", "", "");
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let head = alloc_element(&mut tree, "head");
    let body = alloc_element(&mut tree, "body");
    tree.append_child(html, head);
    tree.append_child(html, body);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
    assert!(tree.is_descendant_of(body, NodeId::ROOT));
    assert_eq!(
        tree.ancestors(body).collect::<Vec<_>>(),
        vec![html, NodeId::ROOT]
    );
}

#[test]
fn test_namespace_urls() {
    assert_eq!(Namespace::Html.as_ref(), "http://www.w3.org/1999/xhtml");
    assert_eq!(Namespace::Svg.as_ref(), "http://www.w3.org/2000/svg");
    assert_eq!(Namespace::MathMl.dump_prefix(), Some("math"));
}

#[test]
fn test_qualified_attribute_name() {
    let mut attribute = attr("href", "#a");
    attribute.prefix = Some("xlink".to_string());
    attribute.namespace = Some(Namespace::XLink);
    assert_eq!(attribute.qualified_name(), "xlink:href");
}
