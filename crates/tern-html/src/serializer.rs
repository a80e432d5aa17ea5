//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! "The following steps form the HTML fragment serialization algorithm. The
//! algorithm takes as input a DOM Element, Document, or DocumentFragment
//! referred to as the node, and returns a string."
//!
//! The serializer works on any [`TreeAdapter`], so trees produced through a
//! custom adapter serialize exactly like the arena [`DomTree`](tern_dom::DomTree).

use tern_dom::{Attribute, Namespace};

use crate::tree_adapter::{NodeKind, TreeAdapter};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements." `basefont`, `bgsound`, `frame`, `keygen` and `param` are
/// listed by the serialization algorithm as well.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Parents whose Text children are written out without escaping.
const RAW_TEXT_PARENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize the children of `node` (the `innerHTML` of an element, or a whole
/// Document), with the scripting flag enabled.
pub fn serialize<A: TreeAdapter>(adapter: &A, node: &A::Handle) -> String {
    serialize_with_scripting(adapter, node, true)
}

/// Like [`serialize`], with an explicit scripting flag. When scripting is
/// disabled the text inside `<noscript>` is escaped like any other text.
pub fn serialize_with_scripting<A: TreeAdapter>(
    adapter: &A,
    node: &A::Handle,
    scripting_enabled: bool,
) -> String {
    let serializer = Serializer::new(adapter, scripting_enabled);
    let mut steps = Vec::new();
    serializer.push_children(node, &mut steps);
    serializer.run(steps)
}

/// Serialize `node` itself followed by its descendants (the `outerHTML` of
/// an element). A Document or DocumentFragment serializes its children.
pub fn serialize_outer<A: TreeAdapter>(adapter: &A, node: &A::Handle) -> String {
    let serializer = Serializer::new(adapter, true);
    serializer.run(vec![Step::Node {
        node: node.clone(),
        literal_text: false,
    }])
}

/// Pending serializer work, popped from an explicit stack. Children are pushed
/// in reverse so the first child is written first.
enum Step<H> {
    /// Write a node. Element children are pushed as further steps.
    Node {
        node: H,
        /// The node's parent writes Text children without escaping.
        literal_text: bool,
    },
    /// Write the end tag of an element whose children have been written.
    EndTag(String),
}

struct Serializer<'a, A: TreeAdapter> {
    adapter: &'a A,
    scripting_enabled: bool,
    output: String,
}

impl<'a, A: TreeAdapter> Serializer<'a, A> {
    const fn new(adapter: &'a A, scripting_enabled: bool) -> Self {
        Self {
            adapter,
            scripting_enabled,
            output: String::new(),
        }
    }

    fn run(mut self, mut steps: Vec<Step<A::Handle>>) -> String {
        while let Some(step) = steps.pop() {
            match step {
                Step::Node { node, literal_text } => {
                    self.serialize_node(&node, literal_text, &mut steps);
                }
                Step::EndTag(tag_name) => {
                    self.output.push_str("</");
                    self.output.push_str(&tag_name);
                    self.output.push('>');
                }
            }
        }
        self.output
    }

    /// Queue the children of `node` so that the first child is written next.
    fn push_children(&self, node: &A::Handle, steps: &mut Vec<Step<A::Handle>>) {
        // STEP 1: "If the node serializes as void, then return the empty string."
        if self.is_void(node) {
            return;
        }

        // STEP 3: "If the node is a template element, then let the node instead
        //          be the template element's template contents (a
        //          DocumentFragment node)."
        let contents = self.adapter.template_contents(node);
        let parent = contents.unwrap_or_else(|| node.clone());

        // "If the parent of current node is a style, script, xmp, iframe,
        // noembed, noframes, or plaintext element, or if the parent of
        // current node is a noscript element and scripting is enabled for the
        // node, then append the value of current node's data IDL attribute
        // literally."
        let literal_text = self.html_tag_name(node).is_some_and(|name| {
            RAW_TEXT_PARENTS.contains(&name.as_str())
                || (name == "noscript" && self.scripting_enabled)
        });

        // STEP 4: "For each child node of the node, in tree order, run the
        //          following steps"
        for child in self.adapter.children(&parent).into_iter().rev() {
            steps.push(Step::Node {
                node: child,
                literal_text,
            });
        }
    }

    fn serialize_node(
        &mut self,
        node: &A::Handle,
        literal_text: bool,
        steps: &mut Vec<Step<A::Handle>>,
    ) {
        let adapter = self.adapter;
        match adapter.node_kind(node) {
            // "If current node is an Element"
            NodeKind::Element => self.serialize_element(node, steps),

            // "If current node is a Text node"
            NodeKind::Text => {
                let text = adapter.text(node).unwrap_or_default();
                if literal_text {
                    self.output.push_str(text);
                } else {
                    // "Otherwise, append the value of current node's data IDL
                    // attribute, escaped as described below."
                    escape_into(&mut self.output, text, false);
                }
            }

            // "If current node is a Comment"
            // "Append "<!--", the value of current node's data IDL attribute,
            // followed by the literal string "-->"."
            NodeKind::Comment => {
                let data = adapter.comment(node).unwrap_or_default();
                self.output.push_str("<!--");
                self.output.push_str(data);
                self.output.push_str("-->");
            }

            // "If current node is a DocumentType"
            // "Append "<!DOCTYPE", U+0020 SPACE, the value of current node's name
            // IDL attribute, followed by ">"."
            NodeKind::DocumentType => {
                let name = adapter.doctype(node).map_or("", |doctype| doctype.name);
                self.output.push_str("<!DOCTYPE ");
                self.output.push_str(name);
                self.output.push('>');
            }

            NodeKind::Document | NodeKind::DocumentFragment => self.push_children(node, steps),
        }
    }

    fn serialize_element(&mut self, node: &A::Handle, steps: &mut Vec<Step<A::Handle>>) {
        let adapter = self.adapter;
        let Some(tag_name) = adapter.tag_name(node) else {
            return;
        };

        // "If current node is an element in the HTML namespace, the MathML
        // namespace, or the SVG namespace, then let tagname be current node's
        // local name. Otherwise, let tagname be current node's qualified name."
        // "Append a U+003C LESS-THAN SIGN character (<), followed by tagname."
        self.output.push('<');
        self.output.push_str(tag_name);

        // "For each attribute that the element has, append a U+0020 SPACE
        // character, the attribute's serialized name as described below, a
        // U+003D EQUALS SIGN character (=), a U+0022 QUOTATION MARK character
        // ("), the attribute's value, escaped as described below in attribute
        // mode, and a second U+0022 QUOTATION MARK character (")."
        for attr in adapter.attributes(node) {
            self.output.push(' ');
            push_attribute_name(&mut self.output, attr);
            self.output.push_str("=\"");
            escape_into(&mut self.output, &attr.value, true);
            self.output.push('"');
        }

        // "Append a U+003E GREATER-THAN SIGN character (>)."
        self.output.push('>');

        // "If current node serializes as void, then continue on to the next
        // child node at this point."
        if self.is_void(node) {
            return;
        }

        // Parsing drops one newline directly after these start tags, so a text
        // child that starts with one needs another in front of it.
        let starts_with_newline = adapter
            .first_child(node)
            .and_then(|child| adapter.text(&child).map(|t| t.starts_with('\n')));
        if adapter.namespace(node) == Some(Namespace::Html)
            && matches!(tag_name, "pre" | "textarea" | "listing")
            && starts_with_newline == Some(true)
        {
            self.output.push('\n');
        }

        // "Append the value of running the HTML fragment serialization algorithm
        // on the current node element (thus recursing into this algorithm for
        // that element), followed by a U+003C LESS-THAN SIGN character (<), a
        // U+002F SOLIDUS character (/), tagname again, and finally a U+003E
        // GREATER-THAN SIGN character (>)."
        steps.push(Step::EndTag(tag_name.to_string()));
        self.push_children(node, steps);
    }

    /// "An element serializes as void if its element type is one of the void
    /// elements, or is basefont, bgsound, frame, keygen, or param."
    fn is_void(&self, node: &A::Handle) -> bool {
        self.html_tag_name(node)
            .is_some_and(|name| VOID_ELEMENTS.contains(&name.as_str()))
    }

    fn html_tag_name(&self, node: &A::Handle) -> Option<String> {
        if self.adapter.namespace(node) != Some(Namespace::Html) {
            return None;
        }
        self.adapter.tag_name(node).map(str::to_string)
    }
}

/// "Attribute's serialized name"
fn push_attribute_name(output: &mut String, attr: &Attribute) {
    match attr.namespace {
        // "If the attribute has no namespace: The attribute's serialized name is
        // the attribute's local name."
        None | Some(Namespace::Html | Namespace::MathMl | Namespace::Svg) => {
            output.push_str(&attr.name);
        }
        // "If the attribute is in the XML namespace: The attribute's serialized
        // name is the string "xml:" followed by the attribute's local name."
        Some(Namespace::Xml) => {
            output.push_str("xml:");
            output.push_str(&attr.name);
        }
        // "If the attribute is in the XMLNS namespace and the attribute's local
        // name is xmlns: The attribute's serialized name is the string "xmlns"."
        // "If the attribute is in the XMLNS namespace and the attribute's local
        // name is not xmlns: The attribute's serialized name is the string
        // "xmlns:" followed by the attribute's local name."
        Some(Namespace::Xmlns) => {
            output.push_str("xmlns");
            if attr.name != "xmlns" {
                output.push(':');
                output.push_str(&attr.name);
            }
        }
        // "If the attribute is in the XLink namespace: The attribute's
        // serialized name is the string "xlink:" followed by the attribute's
        // local name."
        Some(Namespace::XLink) => {
            output.push_str("xlink:");
            output.push_str(&attr.name);
        }
    }
}

/// "Escaping a string (for the purposes of the algorithm above) consists of
/// running the following steps:"
fn escape_into(output: &mut String, text: &str, attribute_mode: bool) {
    for c in text.chars() {
        match c {
            // "Replace any occurrence of the "&" character by the string "&amp;"."
            '&' => output.push_str("&amp;"),
            // "Replace any occurrences of the U+00A0 NO-BREAK SPACE character by
            // the string "&nbsp;"."
            '\u{00A0}' => output.push_str("&nbsp;"),
            // "If the algorithm was invoked in the attribute mode, then replace
            // any occurrences of the """ character by the string "&quot;"."
            '"' if attribute_mode => output.push_str("&quot;"),
            // "If the algorithm was not invoked in the attribute mode, then
            // replace any occurrences of the "<" character by the string "&lt;",
            // and any occurrences of the ">" character by the string "&gt;"."
            '<' if !attribute_mode => output.push_str("&lt;"),
            '>' if !attribute_mode => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_mode() {
        let mut out = String::new();
        escape_into(&mut out, "a < b & \"c\" \u{00A0}>", false);
        assert_eq!(out, "a &lt; b &amp; \"c\" &nbsp;&gt;");
    }

    #[test]
    fn test_escape_attribute_mode() {
        let mut out = String::new();
        escape_into(&mut out, "<\"&\">", true);
        assert_eq!(out, "<&quot;&amp;&quot;>");
    }

    #[test]
    fn test_namespaced_attribute_names() {
        let mut xlink = Attribute::new("href".to_string(), String::new());
        xlink.namespace = Some(Namespace::XLink);
        let mut xmlns = Attribute::new("xmlns".to_string(), String::new());
        xmlns.namespace = Some(Namespace::Xmlns);
        let mut xmlns_xlink = Attribute::new("xlink".to_string(), String::new());
        xmlns_xlink.namespace = Some(Namespace::Xmlns);

        let names: Vec<String> = [xlink, xmlns, xmlns_xlink]
            .iter()
            .map(|attr| {
                let mut out = String::new();
                push_attribute_name(&mut out, attr);
                out
            })
            .collect();
        assert_eq!(names, ["xlink:href", "xmlns", "xmlns:xlink"]);
    }
}
