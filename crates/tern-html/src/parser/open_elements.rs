//! [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! "Initially, the stack of open elements is empty. The stack grows downwards;
//! the topmost node on the stack is the first one added to the stack, and the
//! bottommost node of the stack is the most recently added node in the stack."
//!
//! Entries carry a copy of the element's tag name and namespace so scope
//! queries never have to go back to the tree.

use tern_dom::Namespace;

use super::foreign_content::{is_html_integration_point, is_mathml_text_integration_point};
use crate::tokenizer::Attribute;

/// One entry on the stack of open elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenElement<H> {
    /// The element in the tree.
    pub node: H,
    /// Its local name.
    pub tag_name: String,
    /// Its namespace.
    pub namespace: Namespace,
    /// Whether it is an HTML integration point. Depends on the start tag's
    /// attributes, so it is fixed when the element is created.
    pub html_integration_point: bool,
}

impl<H> OpenElement<H> {
    /// Build an entry, classifying the element as an integration point from
    /// its name, namespace and attributes.
    pub fn new(node: H, tag_name: &str, namespace: Namespace, attrs: &[Attribute]) -> Self {
        Self {
            node,
            tag_name: tag_name.to_string(),
            namespace,
            html_integration_point: is_html_integration_point(tag_name, namespace, attrs),
        }
    }

    /// True for an HTML element with the given local name.
    #[must_use]
    pub fn is_html(&self, tag_name: &str) -> bool {
        self.namespace == Namespace::Html && self.tag_name == tag_name
    }

    /// True for an HTML element whose local name is one of `names`.
    #[must_use]
    pub fn is_html_one_of(&self, names: &[&str]) -> bool {
        self.namespace == Namespace::Html && names.contains(&self.tag_name.as_str())
    }

    /// [§ 13.2.6 MathML text integration point](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    #[must_use]
    pub fn is_mathml_text_integration_point(&self) -> bool {
        is_mathml_text_integration_point(&self.tag_name, self.namespace)
    }

    /// [§ 13.1.1 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
    #[must_use]
    pub fn is_special(&self) -> bool {
        is_special(&self.tag_name, self.namespace)
    }
}

/// [§ 13.1.1 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules:
/// HTML's address, applet, area, article, aside, base, basefont, bgsound,
/// blockquote, body, br, button, caption, center, col, colgroup, dd, details,
/// dir, div, dl, dt, embed, fieldset, figcaption, figure, footer, form, frame,
/// frameset, h1, h2, h3, h4, h5, h6, head, header, hgroup, hr, html, iframe,
/// img, input, keygen, li, link, listing, main, marquee, menu, meta, nav,
/// noembed, noframes, noscript, object, ol, p, param, plaintext, pre, script,
/// search, section, select, source, style, summary, table, tbody, td,
/// template, textarea, tfoot, th, thead, title, tr, track, ul, wbr, xmp;
/// MathML mi, MathML mo, MathML mn, MathML ms, MathML mtext, and MathML
/// annotation-xml; and SVG foreignObject, SVG desc, and SVG title."
#[must_use]
pub fn is_special(tag_name: &str, namespace: Namespace) -> bool {
    match namespace {
        Namespace::Html => matches!(
            tag_name,
            "address"
                | "applet"
                | "area"
                | "article"
                | "aside"
                | "base"
                | "basefont"
                | "bgsound"
                | "blockquote"
                | "body"
                | "br"
                | "button"
                | "caption"
                | "center"
                | "col"
                | "colgroup"
                | "dd"
                | "details"
                | "dir"
                | "div"
                | "dl"
                | "dt"
                | "embed"
                | "fieldset"
                | "figcaption"
                | "figure"
                | "footer"
                | "form"
                | "frame"
                | "frameset"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "head"
                | "header"
                | "hgroup"
                | "hr"
                | "html"
                | "iframe"
                | "img"
                | "input"
                | "keygen"
                | "li"
                | "link"
                | "listing"
                | "main"
                | "marquee"
                | "menu"
                | "meta"
                | "nav"
                | "noembed"
                | "noframes"
                | "noscript"
                | "object"
                | "ol"
                | "p"
                | "param"
                | "plaintext"
                | "pre"
                | "script"
                | "search"
                | "section"
                | "select"
                | "source"
                | "style"
                | "summary"
                | "table"
                | "tbody"
                | "td"
                | "template"
                | "textarea"
                | "tfoot"
                | "th"
                | "thead"
                | "title"
                | "tr"
                | "track"
                | "ul"
                | "wbr"
                | "xmp"
        ),
        Namespace::MathMl => matches!(
            tag_name,
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Namespace::Svg => matches!(tag_name, "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// "...generate all implied end tags thoroughly..."
const THOROUGH_IMPLIED_END_TAGS: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
    "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// The element types that bound a scope query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope"
    ListItem,
    /// "has an element in button scope"
    Button,
    /// "has an element in table scope"
    Table,
    /// "has an element in select scope"
    Select,
}

impl Scope {
    /// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    fn is_boundary<H>(self, element: &OpenElement<H>) -> bool {
        let default_boundary = || match element.namespace {
            Namespace::Html => matches!(
                element.tag_name.as_str(),
                "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object"
                    | "template"
            ),
            Namespace::MathMl => matches!(
                element.tag_name.as_str(),
                "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
            ),
            Namespace::Svg => matches!(
                element.tag_name.as_str(),
                "foreignObject" | "desc" | "title"
            ),
            _ => false,
        };
        match self {
            Self::Default => default_boundary(),
            Self::ListItem => default_boundary() || element.is_html_one_of(&["ol", "ul"]),
            Self::Button => default_boundary() || element.is_html("button"),
            Self::Table => element.is_html_one_of(&["html", "table", "template"]),
            // "all element types except the following: optgroup in the HTML
            // namespace, option in the HTML namespace"
            Self::Select => !element.is_html_one_of(&["optgroup", "option"]),
        }
    }
}

/// The stack of open elements, bottom (`<html>`) first.
#[derive(Debug, Clone)]
pub struct OpenElementStack<H> {
    items: Vec<OpenElement<H>>,
    template_count: usize,
}

impl<H> Default for OpenElementStack<H> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            template_count: 0,
        }
    }
}

impl<H: Clone + PartialEq> OpenElementStack<H> {
    /// An empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no element is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of HTML `template` elements on the stack.
    #[must_use]
    pub const fn template_count(&self) -> usize {
        self.template_count
    }

    /// Iterate from the first pushed (`<html>`) to the current node.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &OpenElement<H>> {
        self.items.iter()
    }

    /// Entry at `index`, counted from the bottom.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OpenElement<H>> {
        self.items.get(index)
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    #[must_use]
    pub fn current(&self) -> Option<&OpenElement<H>> {
        self.items.last()
    }

    /// The current node's handle.
    #[must_use]
    pub fn current_node(&self) -> Option<&H> {
        self.items.last().map(|e| &e.node)
    }

    /// True when the current node is an HTML element named `tag_name`.
    #[must_use]
    pub fn current_is(&self, tag_name: &str) -> bool {
        self.current().is_some_and(|e| e.is_html(tag_name))
    }

    /// True when the current node is an HTML element named one of `names`.
    #[must_use]
    pub fn current_is_one_of(&self, names: &[&str]) -> bool {
        self.current().is_some_and(|e| e.is_html_one_of(names))
    }

    /// Index of `node` on the stack.
    #[must_use]
    pub fn position(&self, node: &H) -> Option<usize> {
        self.items.iter().position(|e| &e.node == node)
    }

    /// True when `node` is open.
    #[must_use]
    pub fn contains(&self, node: &H) -> bool {
        self.position(node).is_some()
    }

    /// Index of the last HTML element named `tag_name`.
    #[must_use]
    pub fn last_position_of(&self, tag_name: &str) -> Option<usize> {
        self.items.iter().rposition(|e| e.is_html(tag_name))
    }

    /// "Push onto the stack of open elements"
    pub fn push(&mut self, element: OpenElement<H>) {
        if element.is_html("template") {
            self.template_count += 1;
        }
        self.items.push(element);
    }

    /// Pop the current node.
    pub fn pop(&mut self) -> Option<OpenElement<H>> {
        let popped = self.items.pop()?;
        if popped.is_html("template") {
            self.template_count -= 1;
        }
        Some(popped)
    }

    /// Remove `node` wherever it sits on the stack.
    pub fn remove(&mut self, node: &H) -> Option<OpenElement<H>> {
        let index = self.position(node)?;
        let removed = self.items.remove(index);
        if removed.is_html("template") {
            self.template_count -= 1;
        }
        Some(removed)
    }

    /// Insert an entry at `index` (used by the adoption agency algorithm).
    pub fn insert(&mut self, index: usize, element: OpenElement<H>) {
        if element.is_html("template") {
            self.template_count += 1;
        }
        self.items.insert(index.min(self.items.len()), element);
    }

    /// Replace the entry for `node` with `element`.
    pub fn replace(&mut self, node: &H, element: OpenElement<H>) {
        if let Some(index) = self.position(node) {
            if self.items[index].is_html("template") {
                self.template_count -= 1;
            }
            if element.is_html("template") {
                self.template_count += 1;
            }
            self.items[index] = element;
        }
    }

    /// "Pop elements from the stack of open elements until an HTML element
    /// with the tag name `tag_name` has been popped from the stack."
    ///
    /// Returns the matching element, or `None` if the stack ran out first.
    pub fn pop_until_tag_name_popped(&mut self, tag_name: &str) -> Option<OpenElement<H>> {
        while let Some(popped) = self.pop() {
            if popped.is_html(tag_name) {
                return Some(popped);
            }
        }
        None
    }

    /// Pop until an HTML element named one of `names` has been popped.
    pub fn pop_until_one_of_popped(&mut self, names: &[&str]) -> Option<OpenElement<H>> {
        while let Some(popped) = self.pop() {
            if popped.is_html_one_of(names) {
                return Some(popped);
            }
        }
        None
    }

    /// Pop until `node` itself has been popped.
    pub fn pop_until_element_popped(&mut self, node: &H) -> Option<OpenElement<H>> {
        if !self.contains(node) {
            return None;
        }
        while let Some(popped) = self.pop() {
            if &popped.node == node {
                return Some(popped);
            }
        }
        None
    }

    /// Pop everything above the first entry (the `<html>` element).
    pub fn pop_all_up_to_html_element(&mut self) {
        while self.items.len() > 1 {
            let _ = self.pop();
        }
    }

    /// Pop while the current node is not an HTML element named one of `names`.
    fn pop_while_current_is_not(&mut self, names: &[&str]) {
        while self.current().is_some_and(|e| !e.is_html_one_of(names)) {
            let _ = self.pop();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "While the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub fn clear_back_to_table_context(&mut self) {
        self.pop_while_current_is_not(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    ///
    /// "While the current node is not a tbody, tfoot, thead, template, or html
    /// element, pop elements from the stack of open elements."
    pub fn clear_back_to_table_body_context(&mut self) {
        self.pop_while_current_is_not(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    ///
    /// "While the current node is not a tr, template, or html element, pop
    /// elements from the stack of open elements."
    pub fn clear_back_to_table_row_context(&mut self) {
        self.pop_while_current_is_not(&["tr", "template", "html"]);
    }

    /// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// 1. "Initialize node to be the current node (the bottommost node of the stack)."
    /// 2. "If node is the target node, terminate in a match state."
    /// 3. "Otherwise, if node is one of the element types in list, terminate in a failure state."
    /// 4. "Otherwise, set node to the previous entry in the stack of open elements
    ///    and return to step 2."
    fn has_in_specific_scope(
        &self,
        matches: impl Fn(&OpenElement<H>) -> bool,
        scope: Scope,
    ) -> bool {
        for element in self.items.iter().rev() {
            if matches(element) {
                return true;
            }
            if scope.is_boundary(element) {
                return false;
            }
        }
        false
    }

    /// "has an element in scope" for an HTML element named `tag_name`.
    #[must_use]
    pub fn has_in_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|e| e.is_html(tag_name), Scope::Default)
    }

    /// "has an element in scope" for a specific node.
    #[must_use]
    pub fn has_element_in_scope(&self, node: &H) -> bool {
        self.has_in_specific_scope(|e| &e.node == node, Scope::Default)
    }

    /// "has an element in button scope"
    #[must_use]
    pub fn has_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|e| e.is_html(tag_name), Scope::Button)
    }

    /// "has an element in list item scope"
    #[must_use]
    pub fn has_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|e| e.is_html(tag_name), Scope::ListItem)
    }

    /// "has an element in table scope"
    #[must_use]
    pub fn has_in_table_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|e| e.is_html(tag_name), Scope::Table)
    }

    /// "has an element in select scope"
    #[must_use]
    pub fn has_in_select_scope(&self, tag_name: &str) -> bool {
        self.has_in_specific_scope(|e| e.is_html(tag_name), Scope::Select)
    }

    /// "If the stack of open elements does not have an element in scope that
    /// is an HTML element and whose tag name is one of "h1", "h2", "h3", "h4",
    /// "h5", or "h6"..."
    #[must_use]
    pub fn has_numbered_header_in_scope(&self) -> bool {
        self.has_in_specific_scope(
            |e| e.is_html_one_of(&["h1", "h2", "h3", "h4", "h5", "h6"]),
            Scope::Default,
        )
    }

    /// "If the stack of open elements does not have a tbody, thead, or tfoot
    /// element in table scope..."
    #[must_use]
    pub fn has_table_body_context_in_table_scope(&self) -> bool {
        self.has_in_specific_scope(
            |e| e.is_html_one_of(&["tbody", "thead", "tfoot"]),
            Scope::Table,
        )
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the UA must pop the
    /// current node off the stack of open elements."
    pub fn generate_implied_end_tags(&mut self) {
        while self.current_is_one_of(IMPLIED_END_TAGS) {
            let _ = self.pop();
        }
    }

    /// "If a step requires the UA to generate implied end tags but lists an
    /// element to exclude from the process, then the UA must perform the above
    /// steps as if that element was not in the above list."
    pub fn generate_implied_end_tags_except(&mut self, exclude: &str) {
        while let Some(current) = self.current()
            && !current.is_html(exclude)
            && current.is_html_one_of(IMPLIED_END_TAGS)
        {
            let _ = self.pop();
        }
    }

    /// "When the steps below require the UA to generate all implied end tags
    /// thoroughly, then, while the current node is a caption element, a
    /// colgroup element, a dd element, ... the UA must pop the current node
    /// off the stack of open elements."
    pub fn generate_implied_end_tags_thoroughly(&mut self) {
        while self.current_is_one_of(THOROUGH_IMPLIED_END_TAGS) {
            let _ = self.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(id: usize, name: &str) -> OpenElement<usize> {
        OpenElement::new(id, name, Namespace::Html, &[])
    }

    fn stack(names: &[&str]) -> OpenElementStack<usize> {
        let mut stack = OpenElementStack::new();
        for (i, name) in names.iter().enumerate() {
            stack.push(html(i, name));
        }
        stack
    }

    #[test]
    fn test_scope_boundaries() {
        let s = stack(&["html", "body", "p", "table", "tr", "td", "span"]);
        assert!(s.has_in_scope("span"));
        assert!(s.has_in_scope("td"));
        assert!(!s.has_in_scope("p"));
        assert!(s.has_in_table_scope("tr"));
        assert!(!s.has_in_table_scope("p"));

        let s = stack(&["html", "body", "p", "button", "span"]);
        assert!(s.has_in_scope("p"));
        assert!(!s.has_in_button_scope("p"));

        let s = stack(&["html", "body", "li", "ul", "span"]);
        assert!(s.has_in_scope("li"));
        assert!(!s.has_in_list_item_scope("li"));
    }

    #[test]
    fn test_foreign_elements_bound_scope() {
        let mut s = stack(&["html", "body", "p"]);
        s.push(OpenElement::new(3, "svg", Namespace::Svg, &[]));
        s.push(OpenElement::new(4, "foreignObject", Namespace::Svg, &[]));
        assert!(!s.has_in_scope("p"));
        assert!(s.current().is_some_and(|e| e.html_integration_point));
    }

    #[test]
    fn test_select_scope() {
        let s = stack(&["html", "body", "select", "optgroup", "option"]);
        assert!(s.has_in_select_scope("select"));
        let s = stack(&["html", "body", "select", "div"]);
        assert!(!s.has_in_select_scope("select"));
    }

    #[test]
    fn test_implied_end_tags() {
        let mut s = stack(&["html", "body", "ul", "li", "p"]);
        s.generate_implied_end_tags_except("li");
        assert!(s.current_is("li"));
        s.generate_implied_end_tags();
        assert!(s.current_is("ul"));
    }

    #[test]
    fn test_pops_and_template_count() {
        let mut s = stack(&["html", "body", "template", "div", "template", "b"]);
        assert_eq!(s.template_count(), 2);
        let popped = s.pop_until_tag_name_popped("template");
        assert_eq!(popped.map(|e| e.node), Some(4));
        assert_eq!(s.template_count(), 1);
        s.clear_back_to_table_context();
        assert!(s.current_is("template"));
        s.pop_all_up_to_html_element();
        assert_eq!(s.len(), 1);
        assert_eq!(s.template_count(), 0);
    }

    #[test]
    fn test_pop_until_element_popped_ignores_missing_node() {
        let mut s = stack(&["html", "body"]);
        assert!(s.pop_until_element_popped(&42).is_none());
        assert_eq!(s.len(), 2);
    }
}
