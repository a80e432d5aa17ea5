//! Integration tests for named character reference lookup.

use tern_html::tokenizer::named_character_references::{
    any_entity_has_prefix, longest_match, lookup_entity,
};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy names are registered without the semicolon too
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("copy"), Some("\u{A9}"));
    assert_eq!(lookup_entity("not"), Some("\u{AC}"));
    // Modern names are not
    assert_eq!(lookup_entity("notin"), None);
}

#[test]
fn test_lookup_multi_code_point_entity() {
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{0338}"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("a"));
    assert!(any_entity_has_prefix("Aacute"));
    assert!(!any_entity_has_prefix("zzz"));
}

#[test]
fn test_longest_match_backtracks_to_last_complete_name() {
    assert_eq!(longest_match("notit;"), Some((3, "\u{AC}")));
    assert_eq!(longest_match("ampx"), Some((3, "&")));
    assert_eq!(longest_match("amp;x"), Some((4, "&")));
    assert_eq!(longest_match("xyz"), None);
}
