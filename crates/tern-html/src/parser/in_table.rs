//! The table insertion modes: "in table", "in table text", "in caption",
//! "in column group", "in table body", "in row" and "in cell".

use super::core::{HTMLParser, InsertionMode};
use crate::error::ParseErrorCode;
use crate::tokenizer::Token;
use crate::tree_adapter::TreeAdapter;

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody, template,
            // tfoot, thead, or tr element"
            Token::Character { .. } | Token::Whitespace { .. } | Token::NullCharacter { .. }
                if self.open_elements.current_is_one_of(&[
                    "table", "tbody", "template", "tfoot", "thead", "tr",
                ]) =>
            {
                // "Let the pending table character tokens be an empty list of tokens."
                self.pending_table_characters.clear();
                // "Let the original insertion mode be the current insertion mode."
                self.original_insertion_mode = Some(self.insertion_mode);
                // "Switch the insertion mode to "in table text" and reprocess the
                // token."
                self.insertion_mode = InsertionMode::InTableText;
                self.reprocess_token(token);
            }

            // "A comment token"
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "caption""
                "caption" => {
                    // "Clear the stack back to a table context."
                    self.open_elements.clear_back_to_table_context();
                    // "Insert a marker at the end of the list of active formatting
                    // elements."
                    self.active_formatting.insert_marker();
                    // "Insert an HTML element for the token, then switch the
                    // insertion mode to "in caption"."
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InCaption;
                }

                // "A start tag whose tag name is "colgroup""
                "colgroup" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InColumnGroup;
                }

                // "A start tag whose tag name is "col""
                // "Clear the stack back to a table context."
                // "Insert an HTML element for a "colgroup" start tag token with no
                // attributes, then switch the insertion mode to "in column group"."
                // "Reprocess the current token."
                "col" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_implied_html_element("colgroup");
                    self.insertion_mode = InsertionMode::InColumnGroup;
                    self.reprocess_token(token);
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InTableBody;
                }

                // "A start tag whose tag name is one of: "td", "th", "tr""
                "td" | "th" | "tr" => {
                    self.open_elements.clear_back_to_table_context();
                    let _ = self.insert_implied_html_element("tbody");
                    self.insertion_mode = InsertionMode::InTableBody;
                    self.reprocess_token(token);
                }

                // "A start tag whose tag name is "table""
                "table" => {
                    // "Parse error."
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    // "If the stack of open elements does not have a table element
                    // in table scope, ignore the token."
                    if !self.open_elements.has_in_table_scope("table") {
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack."
                    // "Reset the insertion mode appropriately."
                    // "Reprocess the token."
                    self.pop_until_tag_name_popped("table");
                    self.reset_insertion_mode_appropriately();
                    self.reprocess_token(token);
                }

                // "A start tag whose tag name is one of: "style", "script", "template""
                "style" | "script" | "template" => {
                    self.process_using_mode(InsertionMode::InHead, token);
                }

                // "A start tag whose tag name is "input""
                "input"
                    if token
                        .get_attribute("type")
                        .is_some_and(|value| value.eq_ignore_ascii_case("hidden")) =>
                {
                    // "Parse error."
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    // "Insert an HTML element for the token."
                    // "Pop that input element off the stack of open elements."
                    // "Acknowledge the token's self-closing flag, if it is set."
                    let _ = self.insert_html_element(token);
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }

                // "A start tag whose tag name is "form""
                "form" => {
                    // "Parse error."
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    // "If there is a template element on the stack of open
                    // elements, or if the form element pointer is not null, ignore
                    // the token."
                    if self.open_elements.template_count() > 0 || self.form_element.is_some() {
                        return;
                    }
                    // "Otherwise: Insert an HTML element for the token, and set the
                    // form element pointer to point to the element created."
                    // "Pop that form element off the stack of open elements."
                    let form = self.insert_html_element(token);
                    self.form_element = Some(form);
                    let _ = self.open_elements.pop();
                }

                _ => self.process_in_table_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    // "If the stack of open elements does not have a table element
                    // in table scope, this is a parse error; ignore the token."
                    if !self.open_elements.has_in_table_scope("table") {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack."
                    // "Reset the insertion mode appropriately."
                    self.pop_until_tag_name_popped("table");
                    self.reset_insertion_mode_appropriately();
                }

                // "An end tag whose tag name is one of: "body", "caption", "col",
                // "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => self.parse_error(ParseErrorCode::UnexpectedEndTag),

                // "An end tag whose tag name is "template""
                "template" => self.process_using_mode(InsertionMode::InHead, token),

                _ => self.process_in_table_anything_else(token),
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.process_using_mode(InsertionMode::InBody, token),

            _ => self.process_in_table_anything_else(token),
        }
    }

    /// "in table", "Anything else": "Parse error. Enable foster parenting,
    /// process the token using the rules for the "in body" insertion mode, and
    /// then disable foster parenting."
    fn process_in_table_anything_else(&mut self, token: &Token) {
        self.parse_error(ParseErrorCode::FosterParentedContent);
        self.foster_parenting = true;
        self.process_using_mode(InsertionMode::InBody, token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::NullCharacter { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
            }

            // "Any other character token"
            // "Append the character token to the pending table character tokens list."
            Token::Character { .. } | Token::Whitespace { .. } => {
                self.pending_table_characters.push(token.clone());
            }

            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_characters);
                // "If any of the tokens in the pending table character tokens list
                // are character tokens that are not ASCII whitespace, then this is
                // a parse error: reprocess the character tokens in the pending
                // table character tokens list using the rules given in the
                // "anything else" entry in the "in table" insertion mode."
                if pending.iter().any(|t| matches!(t, Token::Character { .. })) {
                    self.parse_error(ParseErrorCode::FosterParentedContent);
                    self.foster_parenting = true;
                    for pending_token in &pending {
                        self.process_using_mode(InsertionMode::InBody, pending_token);
                    }
                    self.foster_parenting = false;
                } else {
                    // "Otherwise, insert the characters given by the pending table
                    // character tokens list."
                    for pending_token in &pending {
                        if let Some(data) = pending_token.character_data() {
                            self.insert_characters(data);
                        }
                    }
                }

                // "Switch the insertion mode to the original insertion mode and
                // reprocess the token."
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InTable);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag { name, .. } if name == "caption" => {
                let _ = self.close_caption();
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead"
                        | "tr"
                ) =>
            {
                if self.close_caption() {
                    self.reprocess_token(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_caption() {
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
                        | "thead" | "tr"
                ) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.process_using_mode(InsertionMode::InBody, token),
        }
    }

    /// Close the caption element. Returns false when there was no caption in
    /// table scope and the token was ignored.
    fn close_caption(&mut self) -> bool {
        // "If the stack of open elements does not have a caption element in
        // table scope, this is a parse error; ignore the token. (fragment case)"
        if !self.open_elements.has_in_table_scope("caption") {
            self.parse_error(ParseErrorCode::UnexpectedEndTag);
            return false;
        }
        // "Generate implied end tags."
        self.open_elements.generate_implied_end_tags();
        // "Now, if the current node is not a caption element, then this is a
        // parse error."
        if !self.open_elements.current_is("caption") {
            self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        // "Pop elements from this stack until a caption element has been popped
        // from the stack."
        self.pop_until_tag_name_popped("caption");
        // "Clear the list of active formatting elements up to the last marker."
        self.active_formatting.clear_to_last_marker();
        // "Switch the insertion mode to "in table"."
        self.insertion_mode = InsertionMode::InTable;
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(super) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            Token::Whitespace { data } => self.insert_characters(data),

            // "A comment token"
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_mode(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            Token::StartTag { name, .. } if name == "col" => {
                let _ = self.insert_html_element(token);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing_flag();
            }

            // "An end tag whose tag name is "colgroup""
            Token::EndTag { name, .. } if name == "colgroup" => {
                // "If the current node is not a colgroup element, then this is a
                // parse error; ignore the token."
                if !self.open_elements.current_is("colgroup") {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. Switch the insertion mode to "in table"."
                let _ = self.pop_current();
                self.insertion_mode = InsertionMode::InTable;
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. } if name == "col" => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
            }

            // "A start tag whose tag name is "template""
            // "An end tag whose tag name is "template""
            Token::StartTag { name, .. } | Token::EndTag { name, .. } if name == "template" => {
                self.process_using_mode(InsertionMode::InHead, token);
            }

            // "An end-of-file token"
            Token::EndOfFile => self.process_using_mode(InsertionMode::InBody, token),

            // "Anything else"
            _ => {
                // "If the current node is not a colgroup element, then this is a
                // parse error; ignore the token."
                if !self.open_elements.current_is("colgroup") {
                    self.parse_error(ParseErrorCode::UnexpectedCharacter);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements."
                // "Switch the insertion mode to "in table"."
                // "Reprocess the token."
                let _ = self.open_elements.pop();
                self.insertion_mode = InsertionMode::InTable;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(super) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "tr""
                // "Clear the stack back to a table body context."
                // "Insert an HTML element for the token, then switch the insertion
                // mode to "in row"."
                "tr" => {
                    self.open_elements.clear_back_to_table_body_context();
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InRow;
                }

                // "A start tag whose tag name is one of: "th", "td""
                "th" | "td" => {
                    // "Parse error."
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    // "Clear the stack back to a table body context."
                    // "Insert an HTML element for a "tr" start tag token with no
                    // attributes, then switch the insertion mode to "in row"."
                    // "Reprocess the current token."
                    self.open_elements.clear_back_to_table_body_context();
                    let _ = self.insert_implied_html_element("tr");
                    self.insertion_mode = InsertionMode::InRow;
                    self.reprocess_token(token);
                }

                // "A start tag whose tag name is one of: "caption", "col",
                // "colgroup", "tbody", "tfoot", "thead""
                "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" => {
                    self.leave_table_body_and_reprocess(token);
                }

                _ => self.process_using_mode(InsertionMode::InTable, token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    // "If the stack of open elements does not have an element in
                    // table scope that is an HTML element with the same tag name
                    // as the token, this is a parse error; ignore the token."
                    if !self.open_elements.has_in_table_scope(name) {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                        return;
                    }
                    // "Otherwise: Clear the stack back to a table body context."
                    // "Pop the current node from the stack of open elements. Switch
                    // the insertion mode to "in table"."
                    self.open_elements.clear_back_to_table_body_context();
                    let _ = self.pop_current();
                    self.insertion_mode = InsertionMode::InTable;
                }

                // "An end tag whose tag name is "table""
                "table" => self.leave_table_body_and_reprocess(token),

                // "An end tag whose tag name is one of: "body", "caption", "col",
                // "colgroup", "html", "td", "th", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr" => {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                }

                _ => self.process_using_mode(InsertionMode::InTable, token),
            },

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.process_using_mode(InsertionMode::InTable, token),
        }
    }

    fn leave_table_body_and_reprocess(&mut self, token: &Token) {
        // "If the stack of open elements does not have a tbody, thead, or tfoot
        // element in table scope, this is a parse error; ignore the token."
        if !self.open_elements.has_table_body_context_in_table_scope() {
            self.parse_error(ParseErrorCode::UnexpectedStartTag);
            return;
        }
        // "Otherwise: Clear the stack back to a table body context."
        // "Pop the current node from the stack of open elements. Switch the
        // insertion mode to "in table"."
        // "Reprocess the token."
        self.open_elements.clear_back_to_table_body_context();
        let _ = self.open_elements.pop();
        self.insertion_mode = InsertionMode::InTable;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    pub(super) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is one of: "th", "td""
                // "Clear the stack back to a table row context."
                // "Insert an HTML element for the token, then switch the insertion
                // mode to "in cell"."
                // "Insert a marker at the end of the list of active formatting
                // elements."
                "th" | "td" => {
                    self.open_elements.clear_back_to_table_row_context();
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InCell;
                    self.active_formatting.insert_marker();
                }

                // "A start tag whose tag name is one of: "caption", "col",
                // "colgroup", "tbody", "tfoot", "thead", "tr""
                "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr" => {
                    if self.close_row() {
                        self.reprocess_token(token);
                    }
                }

                _ => self.process_using_mode(InsertionMode::InTable, token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "tr""
                "tr" => {
                    let _ = self.close_row();
                }

                // "An end tag whose tag name is "table""
                "table" => {
                    if self.close_row() {
                        self.reprocess_token(token);
                    }
                }

                // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    // "If the stack of open elements does not have an element in
                    // table scope that is an HTML element with the same tag name
                    // as the token, this is a parse error; ignore the token."
                    if !self.open_elements.has_in_table_scope(name) {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                        return;
                    }
                    // "If the stack of open elements does not have a tr element in
                    // table scope, ignore the token."
                    // "Otherwise: ... Reprocess the token."
                    if self.close_row() {
                        self.reprocess_token(token);
                    }
                }

                // "An end tag whose tag name is one of: "body", "caption", "col",
                // "colgroup", "html", "td", "th""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" => {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                }

                _ => self.process_using_mode(InsertionMode::InTable, token),
            },

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.process_using_mode(InsertionMode::InTable, token),
        }
    }

    /// "in row", "An end tag whose tag name is "tr"". Returns false when there
    /// was no tr element in table scope and the token was ignored.
    fn close_row(&mut self) -> bool {
        // "If the stack of open elements does not have a tr element in table
        // scope, this is a parse error; ignore the token."
        if !self.open_elements.has_in_table_scope("tr") {
            self.parse_error(ParseErrorCode::UnexpectedEndTag);
            return false;
        }
        // "Otherwise: Clear the stack back to a table row context."
        // "Pop the current node (which will be a tr element) from the stack of
        // open elements. Switch the insertion mode to "in table body"."
        self.open_elements.clear_back_to_table_row_context();
        let _ = self.pop_current();
        self.insertion_mode = InsertionMode::InTableBody;
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    pub(super) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is one of: "td", "th""
                "td" | "th" => {
                    // "If the stack of open elements does not have an element in
                    // table scope that is an HTML element with the same tag name
                    // as that of the token, then this is a parse error; ignore the
                    // token."
                    if !self.open_elements.has_in_table_scope(name) {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                        return;
                    }
                    // "Generate implied end tags."
                    self.open_elements.generate_implied_end_tags();
                    // "Now, if the current node is not an HTML element with the
                    // same tag name as the token, then this is a parse error."
                    if !self.open_elements.current_is(name) {
                        self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                    }
                    // "Pop elements from the stack of open elements stack until an
                    // HTML element with the same tag name as the token has been
                    // popped from the stack."
                    self.pop_until_tag_name_popped(name);
                    // "Clear the list of active formatting elements up to the last
                    // marker."
                    self.active_formatting.clear_to_last_marker();
                    // "Switch the insertion mode to "in row"."
                    self.insertion_mode = InsertionMode::InRow;
                }

                // "An end tag whose tag name is one of: "body", "caption", "col",
                // "colgroup", "html""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" => {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                }

                // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
                // "thead", "tr""
                "table" | "tbody" | "tfoot" | "thead" | "tr" => {
                    // "If the stack of open elements does not have an element in
                    // table scope that is an HTML element with the same tag name
                    // as that of the token, then this is a parse error; ignore the
                    // token."
                    if !self.open_elements.has_in_table_scope(name) {
                        self.parse_error(ParseErrorCode::UnexpectedEndTag);
                        return;
                    }
                    // "Otherwise, close the cell and reprocess the token."
                    self.close_the_cell();
                    self.reprocess_token(token);
                }

                _ => self.process_using_mode(InsertionMode::InBody, token),
            },

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "tbody", "td", "tfoot", "th", "thead", "tr""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead"
                        | "tr"
                ) =>
            {
                // "Assert: The stack of open elements has a td or th element in
                // table scope."
                if !self.open_elements.has_in_table_scope("td")
                    && !self.open_elements.has_in_table_scope("th")
                {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    return;
                }
                // "Close the cell and reprocess the token."
                self.close_the_cell();
                self.reprocess_token(token);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.process_using_mode(InsertionMode::InBody, token),
        }
    }
}
