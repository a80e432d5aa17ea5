//! Integration tests for the HTML tokenizer.

use tern_html::{ParseErrorCode, Preprocessor, Token, Tokenizer, TokenizerOptions, TokenizerState};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}

/// Helper to tokenize with error collection and return the error codes
fn error_codes(input: &str) -> Vec<ParseErrorCode> {
    let options = TokenizerOptions::default().with_collect_errors(true);
    let mut tokenizer = Tokenizer::with_options(Preprocessor::new(input), options);
    while !tokenizer.next_token().is_eof() {}
    tokenizer.issues().iter().map(|issue| issue.code).collect()
}

/// Helper to concatenate the text of every character-like token
fn text_of(tokens: &[Token]) -> String {
    tokens.iter().filter_map(Token::character_data).collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello world");
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].character_data(), Some("Hello"));
    assert!(matches!(&tokens[1], Token::Whitespace { data } if data == " "));
    assert_eq!(tokens[2].character_data(), Some("world"));
    assert!(tokens[3].is_eof());
}

#[test]
fn test_iterator_stops_after_eof() {
    let mut tokenizer = Tokenizer::new("x");
    assert!(tokenizer.next().is_some());
    assert!(tokenizer.next().is_some_and(|token| token.is_eof()));
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_start_tag_with_attributes() {
    let tokens = tokenize("<DIV Class=\"a b\" id='x' hidden data-n=1>");
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            let pairs: Vec<(&str, &str)> = attributes
                .iter()
                .map(|attr| (attr.name.as_str(), attr.value.as_str()))
                .collect();
            assert_eq!(
                pairs,
                vec![
                    ("class", "a b"),
                    ("id", "x"),
                    ("hidden", ""),
                    ("data-n", "1"),
                ]
            );
        }
        other => panic!("Expected start tag, got {other:?}"),
    }
}

#[test]
fn test_self_closing_and_end_tags() {
    let tokens = tokenize("<br/><span></SPAN>");
    assert!(tokens[0].is_self_closing());
    assert_eq!(tokens[0].tag_name(), Some("br"));
    assert_eq!(tokens[1].tag_name(), Some("span"));
    assert!(matches!(&tokens[2], Token::EndTag { name, .. } if name == "span"));
}

#[test]
fn test_comments() {
    let tokens = tokenize("<!--a-b--><!---->");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "a-b".to_string()
        }
    );
    assert_eq!(
        tokens[1],
        Token::Comment {
            data: String::new()
        }
    );
    assert_eq!(
        error_codes("<!-->"),
        vec![ParseErrorCode::AbruptClosingOfEmptyComment]
    );
    assert_eq!(error_codes("<!-- x"), vec![ParseErrorCode::EofInComment]);
}

#[test]
fn test_doctype_missing_name() {
    let tokens = tokenize("<!DOCTYPE>");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks: true,
        }
    );
}

#[test]
fn test_character_references_in_text() {
    assert_eq!(text_of(&tokenize("&amp;")), "&");
    assert_eq!(text_of(&tokenize("&amp")), "&");
    assert_eq!(text_of(&tokenize("&notit;")), "\u{AC}it;");
    assert_eq!(text_of(&tokenize("&#169;")), "\u{A9}");
    assert_eq!(text_of(&tokenize("&#x3B;")), ";");
    assert_eq!(text_of(&tokenize("a &lt;b&gt;")), "a <b>");
}

#[test]
fn test_lookahead_hands_back_input_at_eof() {
    assert_eq!(text_of(&tokenize("x\r\n&no")), "x\n&no");
    assert_eq!(text_of(&tokenize("\r\n&amp")), "\n&");
    assert_eq!(
        tokenize("<!DOCTYP")[0],
        Token::Comment {
            data: "DOCTYP".to_string()
        }
    );
}

#[test]
fn test_windows_1252_remap() {
    assert_eq!(
        text_of(&tokenize("&#x80;&#x99;&#x9F;")),
        "\u{20AC}\u{2122}\u{0178}"
    );
    // Code points without a replacement pass through unchanged
    assert_eq!(text_of(&tokenize("&#x81;")), "\u{81}");
    assert_eq!(
        error_codes("&#x80;"),
        vec![ParseErrorCode::ControlCharacterReference]
    );
}

#[test]
fn test_null_character_in_data() {
    let tokens = tokenize("a\0");
    assert!(matches!(&tokens[1], Token::NullCharacter { data } if data == "\0"));
    assert_eq!(
        error_codes("a\0"),
        vec![ParseErrorCode::UnexpectedNullCharacter]
    );
}

#[test]
fn test_newlines_are_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    let all: String = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character { data } | Token::Whitespace { data } => Some(data.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(all, "a\nb\nc");
}

#[test]
fn test_rawtext_state() {
    let mut tokenizer = Tokenizer::new("<b>x</style>");
    tokenizer.set_state(TokenizerState::Rawtext);
    tokenizer.set_last_start_tag_name(Some("style"));
    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(text_of(&tokens), "<b>x");
    assert!(
        tokens
            .iter()
            .any(|token| matches!(token, Token::EndTag { name, .. } if name == "style"))
    );
}

#[test]
fn test_plaintext_state_never_ends() {
    let mut tokenizer = Tokenizer::new("</plaintext><p>");
    tokenizer.set_state(TokenizerState::Plaintext);
    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(text_of(&tokens), "</plaintext><p>");
    assert!(tokens.iter().all(|token| token.tag_name().is_none()));
}

#[test]
fn test_start_tag_sets_appropriate_end_tag() {
    let mut tokenizer = Tokenizer::new("<title>a</b></title>");
    assert_eq!(tokenizer.next_token().tag_name(), Some("title"));
    tokenizer.set_state(TokenizerState::Rcdata);
    let rest: Vec<Token> = tokenizer.collect();
    assert_eq!(text_of(&rest), "a</b>");
    assert!(matches!(&rest[rest.len() - 2], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_eof_errors() {
    assert_eq!(error_codes("<"), vec![ParseErrorCode::EofBeforeTagName]);
    assert_eq!(error_codes("<!DOCTYPE"), vec![ParseErrorCode::EofInDoctype]);
}
