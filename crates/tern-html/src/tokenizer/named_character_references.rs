//! Named character reference lookup trie.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! "Consume the maximum number of characters possible, where the consumed
//! characters are one of the identifiers in the first column of the named
//! character references table."
//!
//! The table is compiled once into an immutable trie keyed by byte. Matching
//! walks the trie one input character at a time and remembers the last node
//! that carried a replacement, which gives the longest-match behaviour the
//! tokenizer needs without any backtracking inside the table.

use std::sync::LazyLock;

use super::entities::ENTITIES;

/// A node in the entity trie.
#[derive(Debug, Default)]
struct TrieNode {
    /// Sorted by byte so lookups can binary search.
    children: Vec<(u8, usize)>,
    /// Replacement text if the path to this node spells a complete name.
    value: Option<&'static str>,
}

/// Immutable trie over every named character reference.
#[derive(Debug)]
pub struct EntityTrie {
    nodes: Vec<TrieNode>,
}

/// A position inside the trie, returned while walking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieCursor(usize);

static NAMED_REFERENCE_TRIE: LazyLock<EntityTrie> = LazyLock::new(|| {
    let mut trie = EntityTrie {
        nodes: vec![TrieNode::default()],
    };
    for &(name, value) in ENTITIES {
        trie.insert(name, value);
    }
    log::debug!(
        target: "tern_html::tokenizer",
        "built named character reference trie: {} entries, {} nodes",
        ENTITIES.len(),
        trie.nodes.len()
    );
    trie
});

impl EntityTrie {
    /// The shared trie, built on first use.
    #[must_use]
    pub fn get() -> &'static Self {
        &NAMED_REFERENCE_TRIE
    }

    fn insert(&mut self, name: &str, value: &'static str) {
        let mut node = 0;
        for byte in name.bytes() {
            node = match self.nodes[node]
                .children
                .binary_search_by_key(&byte, |&(b, _)| b)
            {
                Ok(i) => self.nodes[node].children[i].1,
                Err(i) => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(i, (byte, child));
                    child
                }
            };
        }
        self.nodes[node].value = Some(value);
    }

    /// The cursor for the empty prefix.
    #[must_use]
    pub const fn root() -> TrieCursor {
        TrieCursor(0)
    }

    /// Advance `cursor` by one character. Returns `None` when no name
    /// continues with `c`.
    #[must_use]
    pub fn step(&self, cursor: TrieCursor, c: char) -> Option<TrieCursor> {
        if !c.is_ascii() {
            return None;
        }
        let byte = c as u8;
        let node = &self.nodes[cursor.0];
        node.children
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|i| TrieCursor(node.children[i].1))
    }

    /// The replacement text if the prefix at `cursor` is a complete name.
    #[must_use]
    pub fn value(&self, cursor: TrieCursor) -> Option<&'static str> {
        self.nodes[cursor.0].value
    }
}

/// Look up a complete named character reference (without the leading `&`).
///
/// ```
/// use tern_html::tokenizer::named_character_references::lookup_entity;
///
/// assert_eq!(lookup_entity("amp;"), Some("&"));
/// assert_eq!(lookup_entity("amp"), Some("&"));
/// assert_eq!(lookup_entity("xyz;"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    let trie = EntityTrie::get();
    let mut cursor = EntityTrie::root();
    for c in name.chars() {
        cursor = trie.step(cursor, c)?;
    }
    trie.value(cursor)
}

/// Check if any entity name starts with the given prefix.
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    let trie = EntityTrie::get();
    let mut cursor = EntityTrie::root();
    for c in prefix.chars() {
        match trie.step(cursor, c) {
            Some(next) => cursor = next,
            None => return false,
        }
    }
    true
}

/// Longest complete name that prefixes `input`, as `(name length, replacement)`.
///
/// ```
/// use tern_html::tokenizer::named_character_references::longest_match;
///
/// assert_eq!(longest_match("notit;"), Some((3, "\u{AC}")));
/// assert_eq!(longest_match("notin;"), Some((6, "\u{2209}")));
/// ```
#[must_use]
pub fn longest_match(input: &str) -> Option<(usize, &'static str)> {
    let trie = EntityTrie::get();
    let mut cursor = EntityTrie::root();
    let mut best = None;
    for (i, c) in input.char_indices() {
        match trie.step(cursor, c) {
            Some(next) => cursor = next,
            None => break,
        }
        if let Some(value) = trie.value(cursor) {
            best = Some((i + c.len_utf8(), value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_is_reachable() {
        for &(name, value) in ENTITIES {
            assert_eq!(lookup_entity(name), Some(value), "entity {name}");
        }
    }

    #[test]
    fn test_prefix_without_value() {
        assert!(any_entity_has_prefix("no"));
        assert_eq!(lookup_entity("no"), None);
        assert!(!any_entity_has_prefix("zzz"));
    }

    #[test]
    fn test_multi_codepoint_replacement() {
        assert_eq!(lookup_entity("fjlig;"), Some("fj"));
        assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{338}"));
    }

    #[test]
    fn test_longest_match_prefers_semicolon_form() {
        assert_eq!(longest_match("amp;x"), Some((4, "&")));
        assert_eq!(longest_match("ampx"), Some((3, "&")));
        assert_eq!(longest_match("xyz"), None);
    }
}
