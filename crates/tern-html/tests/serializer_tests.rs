//! Integration tests for HTML serialization.

use tern_html::{
    NodeId, ParserOptions, dump_tree, parse, parse_fragment, parse_with_options, serialize,
    serialize_outer, serialize_with_scripting,
};

/// Helper to parse a document and serialize it back
fn round_trip(html: &str) -> String {
    let tree = parse(html);
    serialize(&tree, &tree.root())
}

/// Helper to find the first element with the given tag name
fn find_element(tree: &tern_html::DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if tree.as_element(from).is_some_and(|d| d.tag_name == tag) {
        return Some(from);
    }
    tree.children(from)
        .iter()
        .find_map(|&child| find_element(tree, child, tag))
}

#[test]
fn test_serialize_document() {
    assert_eq!(
        round_trip("<!DOCTYPE html><title>T</title><p>x"),
        "<!DOCTYPE html><html><head><title>T</title></head><body><p>x</p></body></html>"
    );
}

#[test]
fn test_escaping() {
    assert_eq!(
        round_trip("<p title='a\"b&amp;c'>1 &lt; 2 &amp;&nbsp;&gt;</p>"),
        "<html><head></head><body><p title=\"a&quot;b&amp;c\">1 &lt; 2 &amp;&nbsp;&gt;</p></body></html>"
    );
}

#[test]
fn test_raw_text_is_not_escaped() {
    assert_eq!(
        round_trip("<script>if (a < b && c) {}</script><style>p > a {}</style>"),
        "<html><head><script>if (a < b && c) {}</script><style>p > a {}</style></head><body></body></html>"
    );
}

#[test]
fn test_void_elements_have_no_end_tag() {
    assert_eq!(
        round_trip("<br><img src=x><input disabled>"),
        "<html><head></head><body><br><img src=\"x\"><input disabled=\"\"></body></html>"
    );
}

#[test]
fn test_foreign_attributes_keep_prefixes() {
    assert_eq!(
        round_trip("<svg><use xlink:href='#a'/></svg>"),
        "<html><head></head><body><svg><use xlink:href=\"#a\"></use></svg></body></html>"
    );
}

#[test]
fn test_template_contents_are_serialized() {
    assert_eq!(
        round_trip("<template><p>x</p></template>"),
        "<html><head><template><p>x</p></template></head><body></body></html>"
    );
}

#[test]
fn test_pre_keeps_leading_newline() {
    let tree = parse("<pre>\n\nx</pre>");
    let pre = find_element(&tree, tree.root(), "pre").expect("pre element");
    assert_eq!(serialize(&tree, &pre), "\nx");
    assert_eq!(serialize_outer(&tree, &pre), "<pre>\n\nx</pre>");
}

#[test]
fn test_noscript_depends_on_scripting() {
    let tree = parse("<body><noscript>a&amp;b</noscript>");
    let noscript = find_element(&tree, tree.root(), "noscript").expect("noscript element");
    assert_eq!(serialize(&tree, &noscript), "a&amp;b");

    let options = ParserOptions::default().with_scripting(false);
    let tree = parse_with_options("<body><noscript>a&amp;b</noscript>", options);
    let noscript = find_element(&tree, tree.root(), "noscript").expect("noscript element");
    assert_eq!(serialize_with_scripting(&tree, &noscript, false), "a&amp;b");
    assert_eq!(serialize(&tree, &noscript), "a&b");
}

#[test]
fn test_serialize_fragment() {
    let tree = parse_fragment("<td>x</td><!--c-->", Some("tr"));
    assert_eq!(serialize(&tree, &tree.root()), "<td>x</td><!--c-->");
}

#[test]
fn test_parse_serialize_is_idempotent() {
    let inputs = [
        "<!DOCTYPE html><p>1<b>2<i>3</b>4</i>5</p>",
        "<table><tr>text<td>cell</td></tr></table>",
        "<svg><foreignObject><div>hi</div></foreignObject></svg>",
        "<ul><li>a<li>b</ul><pre>\n\nx</pre><textarea>\nt</textarea>",
        "<select><option>a<option>b</select><template><td>c</template>",
        "<p>a&nbsp;b &lt;c&gt; <a href='x?y=1&amp;z=2'>link</a>",
        "<math><mi>x</mi><annotation-xml encoding='text/html'><p>y</p></annotation-xml></math>",
    ];
    for input in inputs {
        let first = round_trip(input);
        let second = round_trip(&first);
        assert_eq!(first, second, "input {input:?}");
    }
}

#[test]
fn test_deeply_nested_document_serializes() {
    let depth = 20_000;
    let tree = parse(&"<div>".repeat(depth));
    let html = serialize(&tree, &tree.root());
    assert!(html.starts_with("<html><head></head><body><div><div>"));
    assert!(html.ends_with("</div></div></body></html>"));
    assert_eq!(html.matches("<div>").count(), depth);
    assert_eq!(html.matches("</div>").count(), depth);
}

#[test]
fn test_deeply_nested_document_dumps() {
    // Each dump line is indented by its depth, so the output grows with the
    // square of the nesting.
    let depth = 8_000;
    let tree = parse(&"<div>".repeat(depth));
    let dump = dump_tree(&tree, &tree.root());
    assert_eq!(dump.lines().count(), depth + 3);
    let deepest = dump.lines().last().unwrap_or_default();
    assert_eq!(deepest.trim_start_matches(['|', ' ']), "<div>");
    assert_eq!(deepest.len(), "| ".len() + 2 * (depth + 1) + "<div>".len());
}
