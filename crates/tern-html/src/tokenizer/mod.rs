//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.
//!
//! The tokenizer is pull-based: each call to [`Tokenizer::next_token`] runs
//! the state machine just far enough to produce one token, so the tree
//! builder can switch states between tokens.
//!
//! ```
//! use tern_html::tokenizer::{Token, Tokenizer};
//!
//! let tokens: Vec<Token> = Tokenizer::new("<p class=a>hi").collect();
//! assert_eq!(tokens[0].tag_name(), Some("p"));
//! assert_eq!(tokens[0].get_attribute("class"), Some("a"));
//! assert_eq!(tokens[1].character_data(), Some("hi"));
//! assert!(tokens[2].is_eof());
//! ```

/// Character reference states per § 13.2.5.72 to § 13.2.5.80.
mod character_reference;
/// Comment, markup declaration and CDATA states.
mod comment;
/// HTML tokenizer state machine implementation.
mod core;
/// DOCTYPE states.
mod doctype;
/// The generated named character reference table.
mod entities;
/// Helper methods for tokenizer state transitions and emission.
mod helpers;
/// Named character reference lookup per § 13.5.
pub mod named_character_references;
/// Input stream preprocessing per § 13.2.3.5.
pub mod preprocessor;
/// Script data states.
mod script;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::{Tokenizer, TokenizerState};
pub use preprocessor::Preprocessor;
pub use token::{Attribute, Token};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorCode;
    use crate::options::TokenizerOptions;

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input).collect()
    }

    fn errors(input: &str) -> Vec<ParseErrorCode> {
        let options = TokenizerOptions::default().with_collect_errors(true);
        let mut tokenizer = Tokenizer::with_options(Preprocessor::new(input), options);
        while !tokenizer.next_token().is_eof() {}
        tokenizer.issues().iter().map(|issue| issue.code).collect()
    }

    fn text(data: &str) -> Token {
        Token::Character {
            data: data.to_string(),
        }
    }

    #[test]
    fn test_character_runs_are_split_by_class() {
        let tokens = tokenize("a b\0c");
        assert_eq!(
            tokens,
            vec![
                text("a"),
                Token::Whitespace {
                    data: " ".to_string()
                },
                text("b"),
                Token::NullCharacter {
                    data: "\0".to_string()
                },
                text("c"),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_duplicate_attribute_keeps_first_value() {
        let tokens = tokenize("<a x=1 x=2 y=3>");
        let attrs: Vec<(&str, &str)> = tokens[0]
            .attributes()
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect();
        assert_eq!(attrs, vec![("x", "1"), ("y", "3")]);
        assert_eq!(
            errors("<a x=1 x=2>"),
            vec![ParseErrorCode::DuplicateAttribute]
        );
    }

    #[test]
    fn test_named_reference_longest_match() {
        assert_eq!(tokenize("&notit;")[0], text("\u{AC}it;"));
        assert_eq!(tokenize("&notin;")[0], text("\u{2209}"));
        assert_eq!(tokenize("&amp")[0], text("&"));
    }

    #[test]
    fn test_unknown_named_reference() {
        assert_eq!(tokenize("&xyz;")[0], text("&xyz;"));
        assert_eq!(
            errors("&xyz;"),
            vec![ParseErrorCode::UnknownNamedCharacterReference]
        );
    }

    #[test]
    fn test_legacy_reference_in_attribute() {
        let tokens = tokenize("<a href='?a=1&copy=2' title='&copy2'>");
        assert_eq!(tokens[0].get_attribute("href"), Some("?a=1&copy=2"));
        assert_eq!(tokens[0].get_attribute("title"), Some("&copy2"));
        let tokens = tokenize("<a title='&copy;2'>");
        assert_eq!(tokens[0].get_attribute("title"), Some("\u{A9}2"));
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(tokenize("&#65;&#x42;")[0], text("AB"));
        assert_eq!(tokenize("&#x80;")[0], text("\u{20AC}"));
        assert_eq!(tokenize("&#0;")[0], text("\u{FFFD}"));
        assert_eq!(tokenize("&#xD800;")[0], text("\u{FFFD}"));
        assert_eq!(tokenize("&#99999999999;")[0], text("\u{FFFD}"));
        assert_eq!(tokenize("&#;")[0], text("&#;"));
        assert_eq!(
            errors("&#65"),
            vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
        );
    }

    #[test]
    fn test_markup_declarations() {
        assert_eq!(
            tokenize("<!-- x -->")[0],
            Token::Comment {
                data: " x ".to_string()
            }
        );
        assert_eq!(
            tokenize("<!x>")[0],
            Token::Comment {
                data: "x".to_string()
            }
        );
        assert_eq!(
            tokenize("<![CDATA[y]]>")[0],
            Token::Comment {
                data: "[CDATA[y]]".to_string()
            }
        );

        let mut tokenizer = Tokenizer::new("<![CDATA[a]]b]]>");
        tokenizer.allow_cdata = true;
        assert_eq!(tokenizer.next_token(), text("a]]b"));
        assert!(tokenizer.next_token().is_eof());
    }

    #[test]
    fn test_doctype() {
        let tokens = tokenize(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" 'about:legacy-compat'>",
        );
        assert_eq!(
            tokens[0],
            Token::Doctype {
                name: Some("html".to_string()),
                public_identifier: Some("-//W3C//DTD XHTML 1.0 Strict//EN".to_string()),
                system_identifier: Some("about:legacy-compat".to_string()),
                force_quirks: false,
            }
        );

        let Token::Doctype { force_quirks, .. } = &tokenize("<!DOCTYPE html bogus>")[0] else {
            panic!("expected a doctype");
        };
        assert!(force_quirks);
    }

    #[test]
    fn test_rcdata_end_tag_must_be_appropriate() {
        let mut tokenizer = Tokenizer::new("a</b></title>");
        tokenizer.set_state(TokenizerState::Rcdata);
        tokenizer.set_last_start_tag_name(Some("title"));
        assert_eq!(tokenizer.next_token(), text("a</b>"));
        assert_eq!(tokenizer.next_token().tag_name(), Some("title"));
    }

    #[test]
    fn test_script_double_escape() {
        let mut tokenizer = Tokenizer::new("<!--<script></script>--></script>");
        tokenizer.set_state(TokenizerState::ScriptData);
        tokenizer.set_last_start_tag_name(Some("script"));
        let first = tokenizer.next_token();
        assert_eq!(first, text("<!--<script></script>-->"));
        let end = tokenizer.next_token();
        assert!(matches!(end, Token::EndTag { .. }));
        assert_eq!(end.tag_name(), Some("script"));
    }

    #[test]
    fn test_end_tag_errors() {
        assert_eq!(errors("</a x>"), vec![ParseErrorCode::EndTagWithAttributes]);
        assert_eq!(
            errors("</a/>"),
            vec![ParseErrorCode::EndTagWithTrailingSolidus]
        );
    }

    #[test]
    fn test_eof_in_tag_drops_tag() {
        assert_eq!(tokenize("<div class"), vec![Token::EndOfFile]);
        assert_eq!(errors("<div"), vec![ParseErrorCode::EofInTag]);
    }

    #[test]
    fn test_locations() {
        let options = TokenizerOptions::default().with_location_info(true);
        let mut tokenizer = Tokenizer::with_options(Preprocessor::new("ab<p>c</p>"), options);
        let spans: Vec<(usize, usize)> = std::iter::from_fn(|| {
            let token = tokenizer.next_located_token();
            (!token.value.is_eof()).then_some((token.span.start, token.span.end))
        })
        .collect();
        assert_eq!(spans, vec![(0, 2), (2, 5), (5, 6), (6, 10)]);
    }

    #[test]
    fn test_eof_repeats() {
        let mut tokenizer = Tokenizer::new("");
        assert!(tokenizer.next_token().is_eof());
        assert!(tokenizer.next_token().is_eof());
    }
}
