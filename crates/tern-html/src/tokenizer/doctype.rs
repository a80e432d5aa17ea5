//! DOCTYPE states.
//!
//! [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//! through
//! [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).

use super::core::{Tokenizer, TokenizerState};
use super::preprocessor::REPLACEMENT_CHARACTER;
use super::token::Token;
use crate::error::ParseErrorCode;

impl Tokenizer {
    fn with_doctype(&mut self, f: impl FnOnce(&mut Token)) {
        if let Some(token) = self.current_token.as_mut() {
            f(token);
        }
    }

    fn set_force_quirks(&mut self) {
        self.with_doctype(Token::set_force_quirks);
    }

    /// The recurring "This is an eof-in-doctype parse error. Set the current
    /// DOCTYPE token's force-quirks flag to on. Emit the current DOCTYPE token.
    /// Emit an end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(ParseErrorCode::EofInDoctype);
        self.set_force_quirks();
        self.emit_current_token();
        self.emit_eof_token();
    }

    /// "This is a [...] parse error. Set the current DOCTYPE token's force-quirks
    /// flag to on. Switch to the data state. Emit the current DOCTYPE token."
    fn abrupt_doctype_end(&mut self, code: ParseErrorCode) {
        self.parse_error(code);
        self.set_force_quirks();
        self.switch_to(TokenizerState::Data);
        self.emit_current_token();
    }

    /// "This is a [...] parse error. Set the current DOCTYPE token's force-quirks
    /// flag to on. Reconsume in the bogus DOCTYPE state."
    fn bogus_doctype(&mut self, code: ParseErrorCode) {
        self.parse_error(code);
        self.set_force_quirks();
        self.reconsume_in(TokenizerState::BogusDoctype);
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
            Some('>') => self.reconsume_in(TokenizerState::BeforeDoctypeName),
            // "EOF - This is an eof-in-doctype parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Emit the current token. Emit an
            // end-of-file token."
            None => {
                self.create_token(Token::new_doctype());
                self.eof_in_doctype();
            }
            // "Anything else - This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.parse_error(ParseErrorCode::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "ASCII upper alpha - Create a new DOCTYPE token. Set the token's name to the
            // lowercase version of the current input character. Switch to the DOCTYPE name
            // state."
            Some(c) if c.is_ascii_uppercase() => {
                self.create_token(Token::new_doctype());
                self.with_doctype(|t| t.append_to_doctype_name(c.to_ascii_lowercase()));
                self.switch_to(TokenizerState::DoctypeName);
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.create_token(Token::new_doctype());
                self.with_doctype(|t| t.append_to_doctype_name(REPLACEMENT_CHARACTER));
                self.switch_to(TokenizerState::DoctypeName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-name parse error.
            // Create a new DOCTYPE token. Set its force-quirks flag to on. Switch to the
            // data state. Emit the current token."
            Some('>') => {
                self.create_token(Token::new_doctype());
                self.abrupt_doctype_end(ParseErrorCode::MissingDoctypeName);
            }
            None => {
                self.create_token(Token::new_doctype());
                self.eof_in_doctype();
            }
            Some(c) => {
                self.create_token(Token::new_doctype());
                self.with_doctype(|t| t.append_to_doctype_name(c));
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDoctypeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.with_doctype(|t| t.append_to_doctype_name(c.to_ascii_lowercase()));
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_doctype(|t| t.append_to_doctype_name(REPLACEMENT_CHARACTER));
            }
            None => self.eof_in_doctype(),
            Some(c) => self.with_doctype(|t| t.append_to_doctype_name(c)),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                // "If the six characters starting from the current input character are an
                // ASCII case-insensitive match for the word "PUBLIC", then consume those
                // characters and switch to the after DOCTYPE public keyword state."
                if self.consume_if_matches("PUBLIC", true) {
                    self.switch_to(TokenizerState::AfterDoctypePublicKeyword);
                } else if self.consume_if_matches("SYSTEM", true) {
                    self.switch_to(TokenizerState::AfterDoctypeSystemKeyword);
                } else {
                    // "Otherwise, this is an invalid-character-sequence-after-doctype-name
                    // parse error. Set the current DOCTYPE token's force-quirks flag to on.
                    // Reconsume in the bogus DOCTYPE state."
                    self.bogus_doctype(ParseErrorCode::InvalidCharacterSequenceAfterDoctypeName);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_public_keyword_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypePublicIdentifier);
            }
            // "This is a missing-whitespace-after-doctype-public-keyword parse error. Set
            // the current DOCTYPE token's public identifier to the empty string (not
            // missing), then switch to the DOCTYPE public identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(ParseErrorCode::MissingWhitespaceAfterDoctypePublicKeyword);
                self.begin_public_identifier(quote);
            }
            Some('>') => self.abrupt_doctype_end(ParseErrorCode::MissingDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypePublicIdentifier)
            }
        }
    }

    fn begin_public_identifier(&mut self, quote: char) {
        self.with_doctype(Token::set_public_identifier_empty);
        if quote == '"' {
            self.switch_to(TokenizerState::DoctypePublicIdentifierDoubleQuoted);
        } else {
            self.switch_to(TokenizerState::DoctypePublicIdentifierSingleQuoted);
        }
    }

    fn begin_system_identifier(&mut self, quote: char) {
        self.with_doctype(Token::set_system_identifier_empty);
        if quote == '"' {
            self.switch_to(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
        } else {
            self.switch_to(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_public_identifier(quote),
            Some('>') => self.abrupt_doctype_end(ParseErrorCode::MissingDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypePublicIdentifier)
            }
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_public_identifier_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterDoctypePublicIdentifier),
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_doctype(|t| t.append_to_public_identifier(REPLACEMENT_CHARACTER));
            }
            Some('>') => self.abrupt_doctype_end(ParseErrorCode::AbruptDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(c) => self.with_doctype(|t| t.append_to_public_identifier(c)),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(
                    ParseErrorCode::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.begin_system_identifier(quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)
            }
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some(quote @ ('"' | '\'')) => self.begin_system_identifier(quote),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)
            }
        }
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_system_keyword_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeSystemIdentifier);
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(ParseErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword);
                self.begin_system_identifier(quote);
            }
            Some('>') => self.abrupt_doctype_end(ParseErrorCode::MissingDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)
            }
        }
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_system_identifier(quote),
            Some('>') => self.abrupt_doctype_end(ParseErrorCode::MissingDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)
            }
        }
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_system_identifier_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterDoctypeSystemIdentifier),
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_doctype(|t| t.append_to_system_identifier(REPLACEMENT_CHARACTER));
            }
            Some('>') => self.abrupt_doctype_end(ParseErrorCode::AbruptDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(c) => self.with_doctype(|t| t.append_to_system_identifier(c)),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier parse error.
            // Reconsume in the bogus DOCTYPE state. (This does not set the current DOCTYPE
            // token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(ParseErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('\0') => self.parse_error(ParseErrorCode::UnexpectedNullCharacter),
            // "EOF - Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_current_token();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }
}
