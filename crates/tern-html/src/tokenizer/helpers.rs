//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Lookahead ("If the next few characters are")
//! - Token emission ("Emit the current token"), including coalescing of
//!   character runs and source span bookkeeping
//! - Attribute helpers for duplicate detection
//! - Parse error reporting

use super::core::{CharacterClass, PendingCharacters, Tokenizer, TokenizerState};
use super::token::Token;
use crate::error::{ParseErrorCode, ParseIssue};
use crate::location::{Located, SourceSpan};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// The tokenizer's whitespace set excludes CR, which the preprocessor has
    /// already normalized away.
    pub(super) const fn is_whitespace_char(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\x0C')
    }

    /// "If the next few characters are..."
    ///
    /// Compares `target` against the current input character followed by the
    /// characters after it. On a match the whole sequence is consumed and the
    /// last matched character becomes the current input character; otherwise
    /// nothing beyond the current input character is consumed.
    pub(super) fn consume_if_matches(
        &mut self,
        target: &str,
        ascii_case_insensitive: bool,
    ) -> bool {
        let eq = |a: char, b: char| {
            if ascii_case_insensitive {
                a.eq_ignore_ascii_case(&b)
            } else {
                a == b
            }
        };

        let mut expected = target.chars();
        let Some(first) = expected.next() else {
            return true;
        };
        match self.current_input_character {
            Some(c) if eq(c, first) => {}
            _ => return false,
        }

        let mut consumed = 0;
        let mut last = first;
        for want in expected {
            let got = self.preprocessor.advance();
            consumed += 1;
            match got {
                Some(c) if eq(c, want) => last = c,
                _ => {
                    self.preprocessor.retreat_by(consumed);
                    return false;
                }
            }
        }
        self.current_input_character = Some(last);
        self.current_char_start = self.preprocessor.last_char_start();
        true
    }

    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
    ///
    /// "Any occurrences of noncharacters in the input stream are
    /// noncharacter-in-input-stream parse errors and any occurrences of
    /// controls other than ASCII whitespace and U+0000 NULL characters are
    /// control-character-in-input-stream parse errors."
    pub(super) fn check_input_stream_character(&mut self, c: char) {
        let code_point = u32::from(c);
        if is_noncharacter(code_point) {
            self.parse_error(ParseErrorCode::NoncharacterInInputStream);
        } else if is_control(code_point)
            && c != '\0'
            && !matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
        {
            self.parse_error(ParseErrorCode::ControlCharacterInInputStream);
        }
    }
}

/// [Infra: noncharacter](https://infra.spec.whatwg.org/#noncharacter)
///
/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ..., U+10FFFE, or U+10FFFF."
pub(super) const fn is_noncharacter(code_point: u32) -> bool {
    matches!(code_point, 0xFDD0..=0xFDEF) || (code_point & 0xFFFE) == 0xFFFE
}

/// [Infra: control](https://infra.spec.whatwg.org/#control)
///
/// "A C0 control or a code point in the range U+007F DELETE to U+009F
/// APPLICATION PROGRAM COMMAND, inclusive."
pub(super) const fn is_control(code_point: u32) -> bool {
    code_point <= 0x1F || matches!(code_point, 0x7F..=0x9F)
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Tokenizer {
    /// Make `token` the current token. Its span starts at the most recent `<`.
    pub(super) fn create_token(&mut self, token: Token) {
        self.token_start = self.markup_start;
        self.current_token = Some(token);
    }

    /// "Emit the current token"
    pub(super) fn emit_current_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };

        match &token {
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
            }
            // [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            Token::EndTag { attributes, .. } if !attributes.is_empty() => {
                self.parse_error(ParseErrorCode::EndTagWithAttributes);
            }
            _ => {}
        }

        let start = self.token_start;
        self.flush_pending_characters(start);
        let end = self.preprocessor.position();
        self.queue(token, SourceSpan::new(start, end));
    }

    /// "Emit the current input character as a character token."
    ///
    /// Consecutive characters of the same class are merged into one token.
    pub(super) fn emit_character_token(&mut self, c: char) {
        let class = CharacterClass::of(c);
        let end = self.preprocessor.position();

        if let Some(pending) = self.pending_characters.as_mut()
            && pending.class == class
        {
            pending.data.push(c);
            pending.span.end = end;
            return;
        }

        let boundary = self.current_char_start;
        self.flush_pending_characters(boundary);
        self.pending_characters = Some(PendingCharacters {
            class,
            data: String::from(c),
            span: SourceSpan::new(self.last_emit_end, end.max(self.last_emit_end)),
        });
    }

    /// Emit each character of `s` as character tokens.
    pub(super) fn emit_character_tokens(&mut self, s: &str) {
        for c in s.chars() {
            self.emit_character_token(c);
        }
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        if self.eof_emitted {
            return;
        }
        let end = self.preprocessor.position();
        self.flush_pending_characters(end);
        self.current_token = None;
        self.queue(Token::EndOfFile, SourceSpan::new(end, end));
        self.eof_emitted = true;
    }

    /// Push the buffered character run onto the queue, ending it no later
    /// than `boundary`.
    fn flush_pending_characters(&mut self, boundary: usize) {
        let Some(pending) = self.pending_characters.take() else {
            return;
        };
        let start = pending.span.start;
        let end = boundary.clamp(start, pending.span.end.max(start));
        let token = pending.class.into_token(pending.data);
        self.queue(token, SourceSpan::new(start, end));
    }

    fn queue(&mut self, token: Token, span: SourceSpan) {
        self.last_emit_end = span.end;
        let span = if self.options.location_info {
            span
        } else {
            SourceSpan::default()
        };
        self.token_queue.push_back(Located::new(token, span));
    }

    /// End offset used for the synthetic tokens returned after end of input.
    pub(super) const fn span_end(&self) -> usize {
        if self.options.location_info {
            self.preprocessor.position()
        } else {
            0
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "Append the current input character to the current tag token's tag name."
    pub(super) fn append_to_current_tag_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_tag_name(c);
        }
    }
}

// =============================================================================
// RCDATA/RAWTEXT Helpers
// =============================================================================

impl Tokenizer {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this
    /// tokenizer, then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// The "anything else" branch shared by the RCDATA, RAWTEXT, script data
    /// and script data escaped end tag name states:
    ///
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// [...] state."
    pub(super) fn emit_end_tag_name_anything_else(&mut self, content_state: TokenizerState) {
        // STEP 1: Discard the end tag token under construction
        self.current_token = None;
        // STEP 2: "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character token"
        self.emit_character_token('<');
        self.emit_character_token('/');
        // STEP 3: "a character token for each of the characters in the temporary buffer"
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_character_tokens(&buffer);
        self.temporary_buffer = buffer;
        // STEP 4: "Reconsume in the [...] state"
        self.reconsume_in(content_state);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl Tokenizer {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.dropping_attribute = false;
        if let Some(token) = self.current_token.as_mut() {
            token.start_new_attribute();
        }
    }

    /// "Append the current input character to the current attribute's name."
    pub(super) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_name(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub(super) fn append_to_current_attribute_value(&mut self, c: char) {
        if self.dropping_attribute {
            return;
        }
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_current_attribute_value(c);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state... if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// The attribute is removed here, before its value is read, and the value
    /// states discard what they would have appended to it.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.parse_error(ParseErrorCode::DuplicateAttribute);
            if let Some(token) = self.current_token.as_mut() {
                token.remove_current_attribute();
            }
            self.dropping_attribute = true;
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors never stop tokenization. They are traced and, when the
    /// options ask for it, collected.
    pub(super) fn parse_error(&mut self, code: ParseErrorCode) {
        let offset = self.current_char_start;
        log::trace!(
            target: "tern_html::tokenizer",
            "parse error {code} at {offset} in {}",
            self.state
        );
        if self.options.collect_errors {
            self.issues.push(ParseIssue { code, offset });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noncharacters() {
        assert!(is_noncharacter(0xFDD0));
        assert!(is_noncharacter(0xFFFE));
        assert!(is_noncharacter(0x10FFFF));
        assert!(is_noncharacter(0x2FFFF));
        assert!(!is_noncharacter(0xFFFD));
        assert!(!is_noncharacter(0x41));
    }

    #[test]
    fn test_controls() {
        assert!(is_control(0x01));
        assert!(is_control(0x7F));
        assert!(is_control(0x9F));
        assert!(!is_control(0xA0));
        assert!(!is_control(0x20));
    }
}
