//! The "in select" and "in select in table" insertion modes.

use super::core::{HTMLParser, InsertionMode};
use crate::error::ParseErrorCode;
use crate::tokenizer::Token;
use crate::tree_adapter::TreeAdapter;

/// Table-structure tags that close a select opened inside a table.
const TABLE_STRUCTURE: &[&str] = &[
    "caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th",
];

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(super) fn handle_in_select_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::NullCharacter { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
            }

            // "Any other character token"
            // "Insert the token's character."
            Token::Character { data } | Token::Whitespace { data } => self.insert_characters(data),

            // "A comment token"
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                "html" => self.process_using_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is "option""
                // "If the current node is an option element, pop that node from
                // the stack of open elements."
                // "Insert an HTML element for the token."
                "option" => {
                    self.pop_if_current_is("option");
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "optgroup""
                "optgroup" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_html_element(token);
                }

                // "A start tag whose tag name is "hr""
                "hr" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }

                // "A start tag whose tag name is "select""
                // "Parse error."
                // "If the stack of open elements does not have a select element in
                // select scope, ignore the token. (fragment case)"
                // "Otherwise: Pop elements from the stack of open elements until a
                // select element has been popped from the stack. Reset the
                // insertion mode appropriately."
                "select" => {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    if self.open_elements.has_in_select_scope("select") {
                        self.close_select();
                    }
                }

                // "A start tag whose tag name is one of: "input", "keygen", "textarea""
                "input" | "keygen" | "textarea" => {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    if self.open_elements.has_in_select_scope("select") {
                        self.close_select();
                        self.reprocess_token(token);
                    }
                }

                // "A start tag whose tag name is one of: "script", "template""
                "script" | "template" => self.process_using_mode(InsertionMode::InHead, token),

                // "Anything else"
                _ => self.parse_error(ParseErrorCode::UnexpectedStartTag),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "optgroup""
                "optgroup" => {
                    // "First, if the current node is an option element, and the node
                    // immediately before it in the stack of open elements is an
                    // optgroup element, then pop the current node from the stack of
                    // open elements."
                    let len = self.open_elements.len();
                    if self.open_elements.current_is("option")
                        && len >= 2
                        && self
                            .open_elements
                            .get(len - 2)
                            .is_some_and(|e| e.is_html("optgroup"))
                    {
                        let _ = self.open_elements.pop();
                    }
                    // "If the current node is an optgroup element, then pop that
                    // node from the stack of open elements. Otherwise, this is a
                    // parse error; ignore the token."
                    if self.open_elements.current_is("optgroup") {
                        let _ = self.pop_current();
                    } else {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    }
                }

                // "An end tag whose tag name is "option""
                "option" => {
                    if self.open_elements.current_is("option") {
                        let _ = self.pop_current();
                    } else {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    }
                }

                // "An end tag whose tag name is "select""
                "select" => {
                    // "If the stack of open elements does not have a select element
                    // in select scope, this is a parse error; ignore the token.
                    // (fragment case)"
                    if !self.open_elements.has_in_select_scope("select") {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                        return;
                    }
                    self.close_select();
                }

                // "An end tag whose tag name is "template""
                "template" => self.process_using_mode(InsertionMode::InHead, token),

                // "Anything else"
                _ => self.parse_error(ParseErrorCode::UnexpectedEndTag),
            },

            // "An end-of-file token"
            Token::EndOfFile => self.process_using_mode(InsertionMode::InBody, token),
        }
    }

    fn pop_if_current_is(&mut self, tag_name: &str) {
        if self.open_elements.current_is(tag_name) {
            let _ = self.open_elements.pop();
        }
    }

    /// "Pop elements from the stack of open elements until a select element
    /// has been popped from the stack. Reset the insertion mode appropriately."
    fn close_select(&mut self) {
        self.pop_until_tag_name_popped("select");
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn handle_in_select_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "caption", "table", "tbody",
            // "tfoot", "thead", "tr", "td", "th""
            // "Parse error."
            // "Pop elements from the stack of open elements until a select element
            // has been popped from the stack."
            // "Reset the insertion mode appropriately."
            // "Reprocess the token."
            Token::StartTag { name, .. } if TABLE_STRUCTURE.contains(&name.as_str()) => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag);
                self.close_select();
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is one of: "caption", "table", "tbody",
            // "tfoot", "thead", "tr", "td", "th""
            Token::EndTag { name, .. } if TABLE_STRUCTURE.contains(&name.as_str()) => {
                // "Parse error."
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
                // "If the stack of open elements does not have an element in table
                // scope that is an HTML element with the same tag name as that of
                // the token, then ignore the token."
                if !self.open_elements.has_in_table_scope(name) {
                    return;
                }
                // "Otherwise: Pop elements from the stack of open elements until a
                // select element has been popped from the stack. Reset the
                // insertion mode appropriately. Reprocess the token."
                self.close_select();
                self.reprocess_token(token);
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion mode."
            _ => self.process_using_mode(InsertionMode::InSelect, token),
        }
    }
}
