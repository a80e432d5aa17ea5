//! Foreign content parsing support for SVG and MathML.
//!
//! [§ 13.2.6.3 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
//!
//! Everything here is table lookup over names and attributes; the tree
//! builder decides when to apply it.

pub mod mathml;
pub mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjust_svg_tag_name};

use tern_dom::Namespace;

use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.6.3 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// "When the steps below require the user agent to adjust foreign attributes
/// for a token, then, if any of the attributes on the token match the strings
/// in the first column of the following table, let the attribute be a namespaced
/// attribute, with the prefix being the string in the second column, the local
/// name being the string in the third column, and the namespace being the
/// namespace in the fourth column."
///
/// Format: (`attribute_name`, prefix, `local_name`, namespace)
const FOREIGN_ATTRIBUTE_ADJUSTMENTS: &[(&str, Option<&str>, &str, Namespace)] = &[
    ("xlink:actuate", Some("xlink"), "actuate", Namespace::XLink),
    ("xlink:arcrole", Some("xlink"), "arcrole", Namespace::XLink),
    ("xlink:href", Some("xlink"), "href", Namespace::XLink),
    ("xlink:role", Some("xlink"), "role", Namespace::XLink),
    ("xlink:show", Some("xlink"), "show", Namespace::XLink),
    ("xlink:title", Some("xlink"), "title", Namespace::XLink),
    ("xlink:type", Some("xlink"), "type", Namespace::XLink),
    ("xml:lang", Some("xml"), "lang", Namespace::Xml),
    ("xml:space", Some("xml"), "space", Namespace::Xml),
    ("xmlns", None, "xmlns", Namespace::Xmlns),
    ("xmlns:xlink", Some("xmlns"), "xlink", Namespace::Xmlns),
];

/// [§ 13.2.6.3 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// Split `xlink:href`, `xml:lang`, `xmlns` and friends into prefix, local name
/// and namespace.
pub fn adjust_foreign_attributes(attributes: &mut [Attribute]) {
    for attr in attributes.iter_mut() {
        if let Some(&(_, prefix, local_name, namespace)) = FOREIGN_ATTRIBUTE_ADJUSTMENTS
            .iter()
            .find(|(from, ..)| attr.name == *from)
        {
            attr.name = local_name.to_string();
            attr.prefix = prefix.map(str::to_string);
            attr.namespace = Some(namespace);
        }
    }
}

/// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
///
/// "A start tag whose tag name is one of: "b", "big", "blockquote", "body",
/// "br", "center", "code", "dd", "div", "dl", "dt", "em", "embed", "h1", "h2",
/// "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing", "menu",
/// "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strong",
/// "strike", "sub", "sup", "table", "tt", "u", "ul", "var""
/// "A start tag whose tag name is "font", if the token has any attributes
/// named "color", "face", or "size""
///
/// True when `token` breaks out of SVG or MathML back into HTML.
#[must_use]
pub fn causes_exit(token: &Token) -> bool {
    let Token::StartTag { name, .. } = token else {
        return false;
    };
    match name.as_str() {
        "b" | "big" | "blockquote" | "body" | "br" | "center" | "code" | "dd" | "div" | "dl"
        | "dt" | "em" | "embed" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "head" | "hr"
        | "i" | "img" | "li" | "listing" | "menu" | "meta" | "nobr" | "ol" | "p" | "pre"
        | "ruby" | "s" | "small" | "span" | "strong" | "strike" | "sub" | "sup" | "table"
        | "tt" | "u" | "ul" | "var" => true,
        "font" => token
            .attributes()
            .iter()
            .any(|a| matches!(a.name.as_str(), "color" | "face" | "size")),
        _ => false,
    }
}

/// [§ 13.2.6 MathML text integration point](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
#[must_use]
pub fn is_mathml_text_integration_point(tag_name: &str, namespace: Namespace) -> bool {
    namespace == Namespace::MathMl && mathml::is_text_integration_point_name(tag_name)
}

/// [§ 13.2.6 HTML integration point](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
///
/// "A node is an HTML integration point if it is one of the following elements:
///  - A MathML annotation-xml element whose start tag token had an attribute
///    with the name "encoding" whose value was an ASCII case-insensitive match
///    for the string "text/html"
///  - A MathML annotation-xml element whose start tag token had an attribute
///    with the name "encoding" whose value was an ASCII case-insensitive match
///    for the string "application/xhtml+xml"
///  - An SVG foreignObject element
///  - An SVG desc element
///  - An SVG title element"
#[must_use]
pub fn is_html_integration_point(
    tag_name: &str,
    namespace: Namespace,
    attrs: &[Attribute],
) -> bool {
    match namespace {
        Namespace::MathMl if tag_name == "annotation-xml" => attrs.iter().any(|attr| {
            attr.name == "encoding"
                && (attr.value.eq_ignore_ascii_case("text/html")
                    || attr.value.eq_ignore_ascii_case("application/xhtml+xml"))
        }),
        Namespace::Svg => matches!(tag_name, "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute::new(name.to_string(), value.to_string())
    }

    #[test]
    fn test_causes_exit() {
        assert!(causes_exit(&Token::fake_start_tag("div")));
        assert!(!causes_exit(&Token::fake_start_tag("rect")));
        assert!(!causes_exit(&Token::fake_start_tag("font")));
        let font = Token::StartTag {
            name: "font".to_string(),
            self_closing: false,
            attributes: vec![attr("color", "red")],
        };
        assert!(causes_exit(&font));
        assert!(!causes_exit(&Token::fake_end_tag("div")));
    }

    #[test]
    fn test_foreign_attributes_get_namespaces() {
        let mut attrs = vec![
            attr("xlink:href", "#a"),
            attr("xmlns", "x"),
            attr("href", "y"),
        ];
        adjust_foreign_attributes(&mut attrs);
        assert_eq!(attrs[0].name, "href");
        assert_eq!(attrs[0].prefix.as_deref(), Some("xlink"));
        assert_eq!(attrs[0].namespace, Some(Namespace::XLink));
        assert_eq!(attrs[1].prefix, None);
        assert_eq!(attrs[1].namespace, Some(Namespace::Xmlns));
        assert_eq!(attrs[2].namespace, None);
    }

    #[test]
    fn test_integration_points() {
        let without_attrs = |name, namespace| is_html_integration_point(name, namespace, &[]);
        assert!(without_attrs("foreignObject", Namespace::Svg));
        assert!(!without_attrs("foreignObject", Namespace::Html));
        assert!(is_html_integration_point(
            "annotation-xml",
            Namespace::MathMl,
            &[attr("encoding", "Text/HTML")]
        ));
        assert!(!without_attrs("annotation-xml", Namespace::MathMl));
        assert!(is_mathml_text_integration_point("mi", Namespace::MathMl));
        assert!(!is_mathml_text_integration_point("mi", Namespace::Svg));
    }

    #[test]
    fn test_mathml_definition_url() {
        let mut attrs = vec![attr("definitionurl", "u")];
        adjust_mathml_attributes(&mut attrs);
        assert_eq!(attrs[0].name, "definitionURL");
    }
}
