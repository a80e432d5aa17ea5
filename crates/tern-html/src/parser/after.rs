//! The insertion modes after `</body>` and the frameset modes.

use super::core::{HTMLParser, InsertionMode};
use crate::error::ParseErrorCode;
use crate::tokenizer::Token;
use crate::tree_adapter::TreeAdapter;

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Whitespace { .. } => self.process_using_mode(InsertionMode::InBody, token),

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data } => {
                let html = self
                    .open_elements
                    .get(0)
                    .map_or_else(|| self.document.clone(), |e| e.node.clone());
                self.insert_comment_into(data, html);
            }

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_mode(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "html""
            Token::EndTag { name, .. } if name == "html" => {
                // "If the parser was created as part of the HTML fragment parsing
                // algorithm, this is a parse error; ignore the token. (fragment case)"
                if self.is_fragment_case() {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                // "Otherwise, switch the insertion mode to "after after body"."
                self.note_end_tag_at(0);
                self.insertion_mode = InsertionMode::AfterAfterBody;
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => {}

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                self.parse_error(unexpected(token));
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            Token::Whitespace { data } => self.insert_characters(data),

            // "A comment token"
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                "html" => self.process_using_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token."
                "frameset" => {
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "frame""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                "frame" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }

                // "A start tag whose tag name is "noframes""
                "noframes" => self.process_using_mode(InsertionMode::InHead, token),

                _ => self.parse_error(ParseErrorCode::UnexpectedStartTag),
            },

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name, .. } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token. (fragment case)"
                if self.open_elements.len() == 1 {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open elements."
                let _ = self.pop_current();
                // "If the parser was not created as part of the HTML fragment
                // parsing algorithm (fragment case), and the current node is no
                // longer a frameset element, then switch the insertion mode to
                // "after frameset"."
                if !self.is_fragment_case() && !self.open_elements.current_is("frameset") {
                    self.insertion_mode = InsertionMode::AfterFrameset;
                }
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is a
            // parse error."
            // "Stop parsing."
            Token::EndOfFile => {
                if self.open_elements.len() > 1 {
                    self.parse_error(ParseErrorCode::OpenElementsLeftAfterEof);
                }
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.parse_error(unexpected(token)),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Whitespace { data } => self.insert_characters(data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_mode(InsertionMode::InBody, token);
            }
            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            Token::EndTag { name, .. } if name == "html" => {
                self.note_end_tag_at(0);
                self.insertion_mode = InsertionMode::AfterAfterFrameset;
            }
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_mode(InsertionMode::InHead, token);
            }
            Token::EndOfFile => {}
            _ => self.parse_error(unexpected(token)),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                let document = self.document.clone();
                self.insert_comment_into(data, document);
            }

            // "A DOCTYPE token"
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Doctype { .. } | Token::Whitespace { .. } => {
                self.process_using_mode(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_mode(InsertionMode::InBody, token);
            }

            // "An end-of-file token"
            Token::EndOfFile => {}

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                self.parse_error(unexpected(token));
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data } => {
                let document = self.document.clone();
                self.insert_comment_into(data, document);
            }
            Token::Doctype { .. } | Token::Whitespace { .. } => {
                self.process_using_mode(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_mode(InsertionMode::InBody, token);
            }
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_mode(InsertionMode::InHead, token);
            }
            Token::EndOfFile => {}
            _ => self.parse_error(unexpected(token)),
        }
    }
}

/// The error code for a token that is not allowed where it appeared.
pub(super) fn unexpected(token: &Token) -> ParseErrorCode {
    match token {
        Token::StartTag { .. } => ParseErrorCode::UnexpectedStartTag,
        Token::EndTag { .. } => ParseErrorCode::UnexpectedEndTag,
        _ => ParseErrorCode::UnexpectedCharacter,
    }
}
