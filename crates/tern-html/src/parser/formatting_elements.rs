//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//!
//! "Initially, the list of active formatting elements is empty. It is used to
//! handle mis-nested formatting element tags."

use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
///
/// "The elements in the formatting category are: a, b, big, code, em, font,
/// i, nobr, s, small, strike, strong, tt, u."
pub const FORMATTING_ELEMENTS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
    "u",
];

/// Maximum number of identical entries after the last marker
/// ("Noah's Ark" clause).
const NOAHS_ARK_CAPACITY: usize = 3;

/// An entry in the list of active formatting elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingEntry<H> {
    /// A formatting element and the start tag token that created it. The
    /// token is kept so the element can be recreated.
    Element {
        /// The element in the tree.
        node: H,
        /// The originating start tag.
        token: Token,
    },
    /// "A marker is an entry in the list of active formatting elements that
    /// is distinct from any element." Pushed for applet, object, marquee,
    /// template, td, th and caption.
    Marker,
}

impl<H> FormattingEntry<H> {
    /// The element handle, or `None` for a marker.
    pub const fn node(&self) -> Option<&H> {
        match self {
            Self::Element { node, .. } => Some(node),
            Self::Marker => None,
        }
    }

    /// True for a marker.
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }
}

/// "same tag name, namespace, and attributes". Attribute comparison ignores
/// order; formatting elements are always in the HTML namespace.
fn same_element(a: &Token, b: &Token) -> bool {
    let (a_attrs, b_attrs) = (a.attributes(), b.attributes());
    a.tag_name() == b.tag_name()
        && a_attrs.len() == b_attrs.len()
        && a_attrs.iter().all(|attr| has_attribute(b_attrs, attr))
}

fn has_attribute(attrs: &[Attribute], attr: &Attribute) -> bool {
    attrs.iter().any(|other| {
        other.name == attr.name && other.value == attr.value && other.namespace == attr.namespace
    })
}

/// The list of active formatting elements.
#[derive(Debug, Clone)]
pub struct FormattingElementList<H> {
    entries: Vec<FormattingEntry<H>>,
}

impl<H> Default for FormattingElementList<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: Clone + PartialEq> FormattingElementList<H> {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FormattingEntry<H>> {
        self.entries.get(index)
    }

    /// The last (most recently added) entry.
    #[must_use]
    pub fn last(&self) -> Option<&FormattingEntry<H>> {
        self.entries.last()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[FormattingEntry<H>] {
        &self.entries
    }

    /// Index of the entry for `node`.
    #[must_use]
    pub fn position(&self, node: &H) -> Option<usize> {
        self.entries.iter().position(|e| e.node() == Some(node))
    }

    /// True when `node` has an entry.
    #[must_use]
    pub fn contains(&self, node: &H) -> bool {
        self.position(node).is_some()
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// 1. "If there are already three elements in the list of active formatting
    ///    elements after the last marker, if any, or anywhere in the list if
    ///    there are no markers, that have the same tag name, namespace, and
    ///    attributes as element, then remove the earliest such element from
    ///    the list of active formatting elements."
    /// 2. "Add element to the list of active formatting elements."
    pub fn push(&mut self, node: H, token: Token) {
        let mut matches = 0;
        let mut earliest = None;
        for (i, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                FormattingEntry::Marker => break,
                FormattingEntry::Element { token: existing, .. } => {
                    if same_element(existing, &token) {
                        matches += 1;
                        earliest = Some(i);
                    }
                }
            }
        }
        if matches >= NOAHS_ARK_CAPACITY
            && let Some(index) = earliest
        {
            let _ = self.entries.remove(index);
        }
        self.entries.push(FormattingEntry::Element { node, token });
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub fn insert_marker(&mut self) {
        self.entries.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// 1. "Let entry be the last (most recently added) entry in the list of
    ///    active formatting elements."
    /// 2. "Remove entry from the list of active formatting elements."
    /// 3. "If entry was a marker, then stop the algorithm at this point."
    /// 4. "Go to step 1."
    pub fn clear_to_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry.is_marker() {
                break;
            }
        }
    }

    /// The last element entry named `tag_name` between the end of the list
    /// and the last marker. Returns its index.
    #[must_use]
    pub fn element_in_scope_with_tag_name(&self, tag_name: &str) -> Option<usize> {
        for (i, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                FormattingEntry::Marker => return None,
                FormattingEntry::Element { token, .. } if token.tag_name() == Some(tag_name) => {
                    return Some(i);
                }
                FormattingEntry::Element { .. } => {}
            }
        }
        None
    }

    /// Remove the entry for `node`.
    pub fn remove(&mut self, node: &H) -> Option<FormattingEntry<H>> {
        let index = self.position(node)?;
        Some(self.entries.remove(index))
    }

    /// Point the entry for `old` at `new`, keeping its token.
    pub fn replace_node(&mut self, old: &H, new: H) {
        if let Some(FormattingEntry::Element { node, .. }) =
            self.entries.iter_mut().find(|e| e.node() == Some(old))
        {
            *node = new;
        }
    }

    /// Replace the entry at `index`.
    pub fn set(&mut self, index: usize, entry: FormattingEntry<H>) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = entry;
        }
    }

    /// Insert an entry at `index` (the adoption agency algorithm's bookmark).
    pub fn insert(&mut self, index: usize, entry: FormattingEntry<H>) {
        self.entries.insert(index.min(self.entries.len()), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, attrs: &[(&str, &str)]) -> Token {
        Token::StartTag {
            name: name.to_string(),
            self_closing: false,
            attributes: attrs
                .iter()
                .map(|(n, v)| Attribute::new((*n).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    fn count_b(list: &FormattingElementList<usize>) -> usize {
        list.entries()
            .iter()
            .filter_map(|entry| match entry {
                FormattingEntry::Element { token, .. } => token.tag_name(),
                FormattingEntry::Marker => None,
            })
            .filter(|&name| name == "b")
            .count()
    }

    #[test]
    fn test_noahs_ark_caps_identical_entries() {
        let mut list = FormattingElementList::new();
        for i in 0..5 {
            list.push(i, tag("b", &[]));
        }
        assert_eq!(count_b(&list), 3);
        // The earliest entries were dropped.
        assert_eq!(list.get(0).and_then(FormattingEntry::node), Some(&2));
    }

    #[test]
    fn test_noahs_ark_compares_attributes_unordered() {
        let mut list = FormattingElementList::new();
        list.push(0, tag("b", &[("x", "1"), ("y", "2")]));
        list.push(1, tag("b", &[("y", "2"), ("x", "1")]));
        list.push(2, tag("b", &[("x", "1"), ("y", "2")]));
        list.push(3, tag("b", &[("x", "1")]));
        list.push(4, tag("b", &[("x", "1"), ("y", "2")]));
        assert_eq!(list.len(), 4);
        assert!(!list.contains(&0));
    }

    #[test]
    fn test_marker_bounds_noahs_ark_and_lookup() {
        let mut list = FormattingElementList::new();
        for i in 0..3 {
            list.push(i, tag("b", &[]));
        }
        list.insert_marker();
        list.push(3, tag("b", &[]));
        assert_eq!(count_b(&list), 4);
        assert_eq!(list.element_in_scope_with_tag_name("b"), Some(4));
        assert_eq!(list.element_in_scope_with_tag_name("i"), None);

        list.clear_to_last_marker();
        assert_eq!(list.len(), 3);
        assert_eq!(list.element_in_scope_with_tag_name("b"), Some(2));
    }

    #[test]
    fn test_replace_and_insert() {
        let mut list = FormattingElementList::new();
        list.push(0, tag("a", &[]));
        list.push(1, tag("i", &[]));
        list.replace_node(&0, 10);
        assert_eq!(list.position(&10), Some(0));
        list.insert(1, FormattingEntry::Marker);
        assert!(list.get(1).is_some_and(FormattingEntry::is_marker));
        assert!(list.remove(&1).is_some());
        assert_eq!(list.len(), 2);
    }
}
