//! Character reference states for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through
//! [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).

use super::core::{Tokenizer, TokenizerState};
use super::helpers::{is_control, is_noncharacter};
use super::named_character_references::EntityTrie;
use super::preprocessor::REPLACEMENT_CHARACTER;
use crate::error::ParseErrorCode;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
///
/// Sorted by the first column.
const NUMERIC_REFERENCE_REPLACEMENTS: &[(u32, u32)] = &[
    (0x00, 0xFFFD),
    (0x0D, 0x000D),
    (0x80, 0x20AC),
    (0x81, 0x0081),
    (0x82, 0x201A),
    (0x83, 0x0192),
    (0x84, 0x201E),
    (0x85, 0x2026),
    (0x86, 0x2020),
    (0x87, 0x2021),
    (0x88, 0x02C6),
    (0x89, 0x2030),
    (0x8A, 0x0160),
    (0x8B, 0x2039),
    (0x8C, 0x0152),
    (0x8D, 0x008D),
    (0x8E, 0x017D),
    (0x8F, 0x008F),
    (0x90, 0x0090),
    (0x91, 0x2018),
    (0x92, 0x2019),
    (0x93, 0x201C),
    (0x94, 0x201D),
    (0x95, 0x2022),
    (0x96, 0x2013),
    (0x97, 0x2014),
    (0x98, 0x02DC),
    (0x99, 0x2122),
    (0x9A, 0x0161),
    (0x9B, 0x203A),
    (0x9C, 0x0153),
    (0x9D, 0x009D),
    (0x9E, 0x017E),
    (0x9F, 0x0178),
];

fn numeric_reference_replacement(code: u32) -> Option<u32> {
    NUMERIC_REFERENCE_REPLACEMENTS
        .binary_search_by_key(&code, |&(from, _)| from)
        .ok()
        .map(|i| NUMERIC_REFERENCE_REPLACEMENTS[i].1)
}

impl Tokenizer {
    /// "consumed as part of an attribute": the return state is one of the
    /// attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            for c in buffer.chars() {
                self.append_to_current_attribute_value(c);
            }
        } else {
            self.emit_character_tokens(&buffer);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026 AMPERSAND
        // (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric - Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character to the
            // temporary buffer. Switch to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else - Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table. Append each character to the temporary
    /// buffer when it's consumed."
    ///
    /// The walk starts at the reconsumed current input character and reads
    /// ahead through the trie. Characters read past the longest match are
    /// handed back to the input stream.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let trie = EntityTrie::get();
        let mut cursor = EntityTrie::root();
        let mut walked = String::new();
        // Reads taken from the input, counting the current input character and a
        // read that hit end of input.
        let mut consumed = 1;
        let mut best: Option<(usize, &'static str)> = None;
        let mut next = self.current_input_character;

        while let Some(c) = next {
            let Some(step) = trie.step(cursor, c) else {
                break;
            };
            cursor = step;
            walked.push(c);
            if let Some(value) = trie.value(cursor) {
                best = Some((walked.len(), value));
            }
            next = self.preprocessor.advance();
            consumed += 1;
        }
        // `walked` is ASCII, so its byte length is its character count.
        let in_stream_after_walk = consumed - walked.len();

        let Some((matched_len, value)) = best else {
            // "Otherwise - Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            self.preprocessor.retreat_by(consumed);
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(TokenizerState::AmbiguousAmpersand);
            return;
        };

        // Give back everything read after the match.
        self.preprocessor
            .retreat_by(walked.len() - matched_len + in_stream_after_walk);
        let name = &walked[..matched_len];
        self.temporary_buffer.push_str(name);
        let ends_with_semicolon = name.ends_with(';');

        // "If the character reference was consumed as part of an attribute, and the
        // last character matched is not a U+003B SEMICOLON character (;), and the next
        // input character is either a U+003D EQUALS SIGN character (=) or an ASCII
        // alphanumeric, then, for historical reasons, flush code points consumed as a
        // character reference and switch to the return state."
        if self.is_consumed_as_part_of_attribute() && !ends_with_semicolon {
            let next_input = self.preprocessor.peek();
            if next_input.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric()) {
                self.flush_code_points_consumed_as_character_reference();
                self.switch_to(self.return_state);
                return;
            }
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;), then
        // this is a missing-semicolon-after-character-reference parse error."
        if !ends_with_semicolon {
            self.parse_error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two characters
        // corresponding to the character reference name (as given by the second column
        // of the named character references table) to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(value);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric - If the character reference was consumed as part of an
            // attribute, then append the current input character to the current
            // attribute's value. Otherwise, emit the current input character as a
            // character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_current_attribute_value(c);
                } else {
                    self.emit_character_token(c);
                }
            }
            // "U+003B SEMICOLON (;) - This is an unknown-named-character-reference parse
            // error. Reconsume in the return state."
            Some(';') => {
                self.parse_error(ParseErrorCode::UnknownNamedCharacterReference);
                self.reconsume_in(self.return_state);
            }
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;

        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X - Append the
            // current input character to the temporary buffer. Switch to the hexadecimal
            // character reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// "This is an absence-of-digits-in-numeric-character-reference parse error.
    /// Flush code points consumed as a character reference. Reconsume in the
    /// return state."
    fn absence_of_digits(&mut self) {
        self.parse_error(ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference);
        self.flush_code_points_consumed_as_character_reference();
        self.reconsume_in(self.return_state);
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.handle_digits_of_character_reference(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.handle_digits_of_character_reference(10);
    }

    fn handle_digits_of_character_reference(&mut self, radix: u32) {
        match self.current_input_character {
            // "Multiply the character reference code by 16 (or 10). Add a numeric version
            // of the current input character to the character reference code."
            //
            // The code saturates; anything past U+10FFFF is reported the same way.
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit);
            }
            // "U+003B SEMICOLON - Switch to the numeric character reference end state."
            Some(';') => {
                self.finish_numeric_character_reference();
                self.switch_to(self.return_state);
            }
            // "Anything else - This is a missing-semicolon-after-character-reference parse
            // error. Reconsume in the numeric character reference end state."
            _ => {
                self.parse_error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Only reached by reconsuming, so the current input character belongs to
    /// the return state.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        self.finish_numeric_character_reference();
        self.reconsume_in(self.return_state);
    }

    /// The body of the numeric character reference end state: validate the
    /// code, then flush the resulting character.
    fn finish_numeric_character_reference(&mut self) {
        let code = self.character_reference_code;

        let resolved = if code == 0 {
            // "If the number is 0x00, then this is a null-character-reference parse
            // error. Set the character reference code to 0xFFFD."
            self.parse_error(ParseErrorCode::NullCharacterReference);
            u32::from(REPLACEMENT_CHARACTER)
        } else if code > 0x10_FFFF {
            // "If the number is greater than 0x10FFFF, then this is a
            // character-reference-outside-unicode-range parse error. Set the character
            // reference code to 0xFFFD."
            self.parse_error(ParseErrorCode::CharacterReferenceOutsideUnicodeRange);
            u32::from(REPLACEMENT_CHARACTER)
        } else if (0xD800..=0xDFFF).contains(&code) {
            // "If the number is a surrogate, then this is a surrogate-character-reference
            // parse error. Set the character reference code to 0xFFFD."
            self.parse_error(ParseErrorCode::SurrogateCharacterReference);
            u32::from(REPLACEMENT_CHARACTER)
        } else if is_noncharacter(code) {
            // "If the number is a noncharacter, then this is a
            // noncharacter-character-reference parse error."
            self.parse_error(ParseErrorCode::NoncharacterCharacterReference);
            code
        } else if code == 0x0D
            || (is_control(code) && !matches!(code, 0x09 | 0x0A | 0x0C | 0x20))
        {
            // "If the number is 0x0D, or a control that's not ASCII whitespace, then
            // this is a control-character-reference parse error."
            self.parse_error(ParseErrorCode::ControlCharacterReference);
            numeric_reference_replacement(code).unwrap_or(code)
        } else {
            code
        };

        // "Set the temporary buffer to the empty string. Append a code point equal to
        // the character reference code to the temporary buffer. Flush code points
        // consumed as a character reference."
        self.temporary_buffer.clear();
        self.temporary_buffer
            .push(char::from_u32(resolved).unwrap_or(REPLACEMENT_CHARACTER));
        self.flush_code_points_consumed_as_character_reference();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacement_table_is_sorted() {
        assert!(
            NUMERIC_REFERENCE_REPLACEMENTS
                .windows(2)
                .all(|pair| pair[0].0 < pair[1].0)
        );
    }

    #[test]
    fn test_replacement_lookup() {
        assert_eq!(numeric_reference_replacement(0x80), Some(0x20AC));
        assert_eq!(numeric_reference_replacement(0x9F), Some(0x0178));
        assert_eq!(numeric_reference_replacement(0x81), Some(0x0081));
        assert_eq!(numeric_reference_replacement(0x41), None);
    }
}
