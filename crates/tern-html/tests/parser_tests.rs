//! Integration tests for the HTML parser.

use tern_html::{
    DomTree, HTMLParser, Namespace, NodeId, ParseErrorCode, ParserOptions, QuirksMode, dump_tree,
    parse, parse_fragment, parse_fragment_with_options, parse_with_options,
};
use tern_dom::NodeType;

/// Helper to parse HTML and dump the tree in html5lib format
fn dump(html: &str) -> String {
    let tree = parse(html);
    dump_tree(&tree, &tree.root())
}

/// Helper to parse a fragment and dump it
fn dump_fragment(html: &str, context: Option<&str>) -> String {
    let tree = parse_fragment(html, context);
    dump_tree(&tree, &tree.root())
}

/// Helper to build an expected dump from its lines
fn lines(expected: &[&str]) -> String {
    expected.iter().map(|line| format!("{line}\n")).collect()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

/// Helper to get the namespace of an element
fn namespace_of(tree: &DomTree, id: NodeId) -> Option<Namespace> {
    tree.as_element(id).map(|data| data.namespace)
}

#[test]
fn test_document_structure() {
    assert_eq!(
        dump("<!DOCTYPE html><p>x"),
        lines(&[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"x\"",
        ])
    );
}

#[test]
fn test_empty_input_gets_implied_elements() {
    assert_eq!(dump(""), lines(&["| <html>", "|   <head>", "|   <body>"]));
}

#[test]
fn test_title_is_rcdata() {
    assert_eq!(
        dump("<title>a<b></title>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|     <title>",
            "|       \"a<b>\"",
            "|   <body>",
        ])
    );
}

#[test]
fn test_table_text_is_foster_parented() {
    assert_eq!(
        dump("<table><tr>text<td>cell</td></tr></table>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     \"text\"",
            "|     <table>",
            "|       <tbody>",
            "|         <tr>",
            "|           <td>",
            "|             \"cell\"",
        ])
    );
}

#[test]
fn test_table_cell_implies_body_and_row() {
    assert_eq!(
        dump("<table><td>x"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <table>",
            "|       <tbody>",
            "|         <tr>",
            "|           <td>",
            "|             \"x\"",
        ])
    );
}

#[test]
fn test_foreign_object_switches_back_to_html() {
    let tree = parse("<svg><foreignObject><div>hi</div></foreignObject></svg>");
    assert_eq!(
        dump_tree(&tree, &tree.root()),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       <svg foreignObject>",
            "|         <div>",
            "|           \"hi\"",
        ])
    );

    let svg = find_element(&tree, NodeId::ROOT, "svg").expect("svg element");
    let foreign_object = find_element(&tree, NodeId::ROOT, "foreignObject").expect("foreignObject");
    let div = find_element(&tree, NodeId::ROOT, "div").expect("div element");
    assert_eq!(namespace_of(&tree, svg), Some(Namespace::Svg));
    assert_eq!(namespace_of(&tree, foreign_object), Some(Namespace::Svg));
    assert_eq!(namespace_of(&tree, div), Some(Namespace::Html));
}

#[test]
fn test_html_breakout_from_foreign_content() {
    assert_eq!(
        dump("<svg><g><p>x"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       <svg g>",
            "|     <p>",
            "|       \"x\"",
        ])
    );
}

#[test]
fn test_foreign_attributes_are_adjusted() {
    assert_eq!(
        dump("<svg viewbox='0 0 1 1'><use xlink:href='#a'/></svg>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       viewBox=\"0 0 1 1\"",
            "|       <svg use>",
            "|         xlink href=\"#a\"",
        ])
    );
}

#[test]
fn test_mathml_text_integration_point() {
    assert_eq!(
        dump("<math><mi><b>x</b></mi></math>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <math math>",
            "|       <math mi>",
            "|         <b>",
            "|           \"x\"",
        ])
    );
}

#[test]
fn test_cdata_allowed_at_integration_points() {
    assert_eq!(
        dump("<svg><desc><![CDATA[x]]>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       <svg desc>",
            "|         \"x\"",
        ])
    );
    assert_eq!(
        dump("<math><mi><![CDATA[x]]>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <math math>",
            "|       <math mi>",
            "|         \"x\"",
        ])
    );
}

#[test]
fn test_quirks_mode_classification() {
    assert_eq!(parse("<!DOCTYPE html>").quirks_mode(), QuirksMode::NoQuirks);
    assert_eq!(parse("<p>no doctype").quirks_mode(), QuirksMode::Quirks);
    assert_eq!(
        parse(
            "<!DOCTYPE HTML SYSTEM \"http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd\">"
        )
        .quirks_mode(),
        QuirksMode::Quirks
    );
    assert_eq!(
        parse("<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\">").quirks_mode(),
        QuirksMode::Quirks
    );
    assert_eq!(
        parse(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \"http://www.w3.org/TR/html4/loose.dtd\">"
        )
        .quirks_mode(),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_adoption_agency_misnested_formatting() {
    assert_eq!(
        dump("<p>1<b>2<i>3</b>4</i>5</p>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"1\"",
            "|       <b>",
            "|         \"2\"",
            "|         <i>",
            "|           \"3\"",
            "|       <i>",
            "|         \"4\"",
            "|       \"5\"",
        ])
    );
}

#[test]
fn test_adoption_agency_moves_block_out_of_formatting() {
    assert_eq!(
        dump("<b>1<p>2</b>3</p>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <b>",
            "|       \"1\"",
            "|     <p>",
            "|       <b>",
            "|         \"2\"",
            "|       \"3\"",
        ])
    );
}

#[test]
fn test_noahs_ark_limits_reconstruction() {
    assert_eq!(
        dump("<p><b><b><b><b><p>x"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       <b>",
            "|         <b>",
            "|           <b>",
            "|             <b>",
            "|     <p>",
            "|       <b>",
            "|         <b>",
            "|           <b>",
            "|             \"x\"",
        ])
    );
}

#[test]
fn test_noahs_ark_caps_active_formatting_list() {
    let mut parser = HTMLParser::new(DomTree::new(), "<p><b><b><b><b>X", ParserOptions::default());
    let _ = parser.run().expect("parse runs to completion");
    let entries = parser.active_formatting_elements().entries();
    assert_eq!(entries.iter().filter(|entry| !entry.is_marker()).count(), 3);
}

#[test]
fn test_pathological_formatting_storm_terminates() {
    let mut html = "<b>".repeat(200);
    html.push_str(&"<div></b>".repeat(100));
    html.push_str("end");
    let tree = parse(&html);
    let body = tree.body().expect("body element");
    assert!(tree.text_content(body).contains("end"));
}

#[test]
fn test_template_contents() {
    assert_eq!(
        dump("<template><tr><td>x</td></tr></template>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|     <template>",
            "|       content",
            "|         <tr>",
            "|           <td>",
            "|             \"x\"",
            "|   <body>",
        ])
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        dump("<select><option>a<option>b</select>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <select>",
            "|       <option>",
            "|         \"a\"",
            "|       <option>",
            "|         \"b\"",
        ])
    );
}

#[test]
fn test_frameset() {
    assert_eq!(
        dump("<frameset><frame></frameset>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <frameset>",
            "|     <frame>",
        ])
    );
}

#[test]
fn test_comment_after_html_goes_to_document() {
    assert_eq!(
        dump("<p>x</p></body></html><!--c-->"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"x\"",
            "| <!-- c -->",
        ])
    );
}

#[test]
fn test_leading_newline_in_pre_is_dropped() {
    let tree = parse("<pre>\n\nx</pre>");
    let pre = find_element(&tree, NodeId::ROOT, "pre").expect("pre element");
    assert_eq!(tree.text_content(pre), "\nx");
}

#[test]
fn test_null_characters_in_body_are_dropped() {
    let tree = parse("<p>a\0b</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").expect("p element");
    assert_eq!(tree.text_content(p), "ab");
}

#[test]
fn test_noscript_follows_scripting_flag() {
    let input = "<noscript><p>x</p></noscript>";
    assert_eq!(
        dump(input),
        lines(&[
            "| <html>",
            "|   <head>",
            "|     <noscript>",
            "|       \"<p>x</p>\"",
            "|   <body>",
        ])
    );

    let tree = parse_with_options(input, ParserOptions::default().with_scripting(false));
    assert_eq!(
        dump_tree(&tree, &tree.root()),
        lines(&[
            "| <html>",
            "|   <head>",
            "|     <noscript>",
            "|   <body>",
            "|     <p>",
            "|       \"x\"",
        ])
    );
}

#[test]
fn test_every_input_yields_one_html_element() {
    let inputs = [
        "",
        "</html></body>",
        "<frameset><p>x",
        "\0\0<<<>>",
        "<table><table><tr><caption>",
        "<svg><math><p><table>",
        "<!DOCTYPE a><!DOCTYPE b><html><html x=1>",
        "<select><select><option></select></select>",
        "<template></template></template><body></body><head>",
        "</p></br><a><a><nobr><nobr>",
        "<![CDATA[x]]><svg><![CDATA[y]]></svg>",
    ];
    for input in inputs {
        let tree = parse(input);
        let children = tree.children(tree.root());
        let elements: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|&child| tree.as_element(child).is_some())
            .collect();
        let doctypes = children
            .iter()
            .filter(|&&child| tree.as_doctype(child).is_some())
            .count();
        assert_eq!(elements.len(), 1, "input {input:?}");
        let root_name = tree.as_element(elements[0]).map(|e| e.tag_name.as_str());
        assert_eq!(root_name, Some("html"));
        assert!(doctypes <= 1, "input {input:?}");
        assert!(matches!(
            tree.get(tree.root()).map(|node| &node.node_type),
            Some(NodeType::Document { .. })
        ));
    }
}

#[test]
fn test_fragment_defaults_to_template_context() {
    assert_eq!(
        dump_fragment("<td>x</td>", None),
        lines(&["| <td>", "|   \"x\""])
    );
    let tree = parse_fragment("<td>x</td>", None);
    assert!(tree.is_fragment());
}

#[test]
fn test_fragment_with_context() {
    assert_eq!(
        dump_fragment("<li>a<li>b", Some("ul")),
        lines(&["| <li>", "|   \"a\"", "| <li>", "|   \"b\""])
    );
    assert_eq!(
        dump_fragment("<b>x</b>", Some("textarea")),
        lines(&["| \"<b>x</b>\""])
    );
    assert_eq!(
        dump_fragment("<circle/>", Some("svg")),
        lines(&["| <svg circle>"])
    );
}

#[test]
fn test_fragment_with_invalid_context() {
    assert_eq!(
        parse_fragment_with_options("x", "1bad", ParserOptions::default()).err(),
        Some(tern_html::ParserError::InvalidContextElement)
    );
    assert_eq!(dump_fragment("x", Some("not a tag")), lines(&["| \"x\""]));
}

#[test]
fn test_error_collection() {
    let options = ParserOptions::default().with_collect_errors(true);
    let mut parser = HTMLParser::new(DomTree::new(), "<p>\0</b>", options);
    let _ = parser.run().expect("parse runs to completion");
    let issues = parser.issues();
    let codes: Vec<ParseErrorCode> = issues.iter().map(|issue| issue.code).collect();
    assert_eq!(codes.first(), Some(&ParseErrorCode::MissingDoctype));
    assert!(codes.contains(&ParseErrorCode::UnexpectedNullCharacter));
    assert!(codes.contains(&ParseErrorCode::UnexpectedEndTag));
    assert!(issues.is_sorted_by_key(|issue| issue.offset));
    assert_eq!(
        ParseErrorCode::MissingDoctype.to_string(),
        "missing-doctype"
    );

    let mut quiet = HTMLParser::new(DomTree::new(), "<p>\0</b>", ParserOptions::default());
    let _ = quiet.run().expect("parse runs to completion");
    assert!(quiet.issues().is_empty());
}

#[test]
fn test_node_locations() {
    let options = ParserOptions::default().with_location_info(true);
    let mut parser = HTMLParser::new(DomTree::new(), "<p>hi</p><!--c-->", options);
    let _ = parser.run().expect("parse runs to completion");
    let (tree, locations, _) = parser.into_parts();
    let locations = locations.expect("locations are recorded");

    let p = find_element(&tree, NodeId::ROOT, "p").expect("p element");
    let p_location = locations.get(&p).expect("p has a location");
    assert_eq!((p_location.span.start, p_location.span.end), (0, 3));
    let end_tag = p_location.end_tag.map(|span| (span.start, span.end));
    assert_eq!(end_tag, Some((5, 9)));

    let text = tree.first_child(p).expect("text child");
    let text_location = locations.get(&text).expect("text has a location");
    assert_eq!((text_location.span.start, text_location.span.end), (3, 5));

    let body = tree.body().expect("body element");
    let comment = tree.last_child(body).expect("comment child");
    let comment_location = locations.get(&comment).expect("comment has a location");
    let span = comment_location.span;
    assert_eq!((span.start, span.end), (9, 17));
}

#[test]
fn test_locations_off_by_default() {
    let mut parser = HTMLParser::new(DomTree::new(), "<p>hi", ParserOptions::default());
    let _ = parser.run().expect("parse runs to completion");
    assert!(parser.locations().is_none());
}
