//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use tern_dom::{Namespace, QuirksMode};

use super::core::{HTMLParser, InsertionMode};
use super::foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
};
use crate::error::ParseErrorCode;
use crate::tokenizer::{Token, TokenizerState};
use crate::tree_adapter::TreeAdapter;

/// "A start tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main",
/// "menu", "nav", "ol", "p", "search", "section", "summary", "ul""
const BLOCK_START_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main", "menu",
    "nav", "ol", "p", "search", "section", "summary", "ul",
];

/// "An end tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "button", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "listing",
/// "main", "menu", "nav", "ol", "pre", "search", "section", "summary", "ul""
const BLOCK_END_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "center", "details", "dialog", "dir",
    "div", "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "listing",
    "main", "menu", "nav", "ol", "pre", "search", "section", "summary", "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// "A start tag whose tag name is one of: "b", "big", "code", "em", "font",
/// "i", "s", "small", "strike", "strong", "tt", "u""
const FORMATTING_START_TAGS: &[&str] = &[
    "b", "big", "code", "em", "font", "i", "s", "small", "strike", "strong", "tt", "u",
];

/// "An end tag whose tag name is one of: "a", "b", "big", "code", "em",
/// "font", "i", "nobr", "s", "small", "strike", "strong", "tt", "u""
const FORMATTING_END_TAGS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
    "u",
];

/// Elements that may stay open at the end of the body without a parse
/// error: "a dd element, a dt element, an li element, an optgroup element,
/// an option element, a p element, an rb element, an rp element, an rt
/// element, an rtc element, a tbody element, a td element, a tfoot element,
/// a th element, a thead element, a tr element, the body element, or the
/// html element"
const IMPLICITLY_CLOSABLE: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td",
    "tfoot", "th", "thead", "tr", "body", "html",
];

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(super) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::NullCharacter { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            Token::Whitespace { data } => {
                self.reconstruct_active_formatting_elements();
                self.insert_characters(data);
            }

            // "Any other character token"
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            // "Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.reconstruct_active_formatting_elements();
                self.insert_characters(data);
                self.frameset_ok = false;
            }

            // "A comment token"
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            Token::StartTag { name, .. } => self.handle_in_body_start_tag(name, token),

            Token::EndTag { name, .. } => self.handle_in_body_end_tag(name, token),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    self.process_using_mode(InsertionMode::InTemplate, token);
                    return;
                }
                // "Otherwise, follow these steps: If there is a node in the stack
                // of open elements that is not either a dd element, ... then this
                // is a parse error."
                if self.has_open_element_needing_end_tag() {
                    self.parse_error(ParseErrorCode::OpenElementsLeftAfterEof);
                }
                // "Stop parsing."
            }
        }
    }

    fn has_open_element_needing_end_tag(&self) -> bool {
        self.open_elements
            .iter()
            .any(|e| !e.is_html_one_of(IMPLICITLY_CLOSABLE))
    }

    fn handle_in_body_start_tag(&mut self, name: &str, token: &Token) {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error."
                self.parse_error(ParseErrorCode::UnexpectedStartTag);
                // "If there is a template element on the stack of open elements,
                // then ignore the token."
                if self.open_elements.template_count() > 0 {
                    return;
                }
                // "Otherwise, for each attribute on the token, check to see if
                // the attribute is already present on the top element of the
                // stack of open elements. If it is not, add the attribute and its
                // corresponding value to that element."
                if let Some(html) = self.open_elements.get(0) {
                    self.adapter
                        .adopt_attributes(&html.node, token.attributes());
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "Process the token using the rules for the "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => self.process_using_mode(InsertionMode::InHead, token),

            // "A start tag whose tag name is "body""
            "body" => {
                // "Parse error."
                self.parse_error(ParseErrorCode::UnexpectedStartTag);
                // "If the stack of open elements has only one node on it, or if the
                // second element on the stack of open elements is not a body
                // element, or if there is a template element on the stack of open
                // elements, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if self.open_elements.template_count() > 0 {
                    return;
                }
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for each
                // attribute on the token, check to see if the attribute is already
                // present on the body element (the second element) on the stack
                // of open elements, and if it is not, add the attribute and its
                // corresponding value to that element."
                self.frameset_ok = false;
                self.adapter.adopt_attributes(&body, token.attributes());
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.parse_error(ParseErrorCode::UnexpectedStartTag);
                // "If the stack of open elements has only one node on it, or if the
                // second element on the stack of open elements is not a body
                // element, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if !self.frameset_ok {
                    return;
                }
                // STEP 1: "Remove the second element on the stack of open elements
                //          from its parent node, if it has one."
                self.adapter.detach(&body);
                // STEP 2: "Pop all the nodes from the bottom of the stack of open
                //          elements, from the current node up to, but not including,
                //          the root html element."
                self.open_elements.pop_all_up_to_html_element();
                // STEP 3: "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // STEP 4: "Switch the insertion mode to "in frameset"."
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "address", "article", ..."
            // "If the stack of open elements has a p element in button scope,
            // then close a p element."
            // "Insert an HTML element for the token."
            _ if BLOCK_START_TAGS.contains(&name) => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                self.close_p_element_in_button_scope();
                // "If the current node is an HTML element whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; pop the current node off the stack of open elements."
                if self.open_elements.current_is_one_of(HEADINGS) {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    let _ = self.open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                // "If the next token is a U+000A LINE FEED (LF) character token,
                // then ignore that token and move on to the next one."
                self.skip_next_newline = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is a
                // parse error; ignore the token."
                let in_template = self.open_elements.template_count() > 0;
                if self.form_element.is_some() && !in_template {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    return;
                }
                // "Otherwise: If the stack of open elements has a p element in
                // button scope, then close a p element. Insert an HTML element for
                // the token, and, if there is no template element on the stack of
                // open elements, set the form element pointer to point to the
                // element created."
                self.close_p_element_in_button_scope();
                let form = self.insert_html_element(token);
                if !in_template {
                    self.form_element = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => self.handle_list_item_start_tag(token, &["li"]),

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.handle_list_item_start_tag(token, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext""
            "plaintext" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                // "Switch the tokenizer to the PLAINTEXT state."
                self.tokenizer.set_state(TokenizerState::Plaintext);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "If the stack of open elements has a button element in scope,
                // then run these substeps:"
                if self.open_elements.has_in_scope("button") {
                    // "Parse error."
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    // "Generate implied end tags."
                    self.open_elements.generate_implied_end_tags();
                    // "Pop elements from the stack of open elements until a button
                    // element has been popped from the stack."
                    self.pop_until_tag_name_popped("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a element
                // between the end of the list and the last marker on the list (or
                // the start of the list if there is no marker on the list), then
                // this is a parse error; run the adoption agency algorithm for the
                // token, then remove that element from the list of active
                // formatting elements and the stack of open elements if the
                // adoption agency algorithm didn't already remove it (it might not
                // have if the element is not in table scope)."
                if let Some(index) = self.active_formatting.element_in_scope_with_tag_name("a") {
                    self.parse_error(ParseErrorCode::MisnestedFormattingElement);
                    let element = self
                        .active_formatting
                        .get(index)
                        .and_then(|e| e.node().cloned());
                    self.adoption_agency_or_any_other_end_tag("a");
                    if let Some(element) = element {
                        let _ = self.active_formatting.remove(&element);
                        let _ = self.open_elements.remove(&element);
                    }
                }
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            _ if FORMATTING_START_TAGS.contains(&name) => self.insert_formatting_element(token),

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope, then
                // this is a parse error; run the adoption agency algorithm for the
                // token, then once again reconstruct the active formatting
                // elements, if any."
                if self.open_elements.has_in_scope("nobr") {
                    self.parse_error(ParseErrorCode::MisnestedFormattingElement);
                    self.adoption_agency_or_any_other_end_tag("nobr");
                }
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                // "Insert a marker at the end of the list of active formatting
                // elements."
                self.active_formatting.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of open
                // elements has a p element in button scope, then close a p element."
                if self.adapter.quirks_mode() != QuirksMode::Quirks {
                    self.close_p_element_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "area", "br", "embed", "img",
            // "keygen", "wbr""
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            "input" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                // "If the token does not have an attribute with the name "type", or
                // if it does, but that attribute's value is not an ASCII
                // case-insensitive match for the string "hidden", then: set the
                // frameset-ok flag to "not ok"."
                if !token
                    .get_attribute("type")
                    .is_some_and(|value| value.eq_ignore_ascii_case("hidden"))
                {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            "param" | "source" | "track" => self.insert_void_element(token),

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_element_in_button_scope();
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            "image" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag);
                let mut renamed = token.clone();
                if let Token::StartTag { name, .. } = &mut renamed {
                    "img".clone_into(name);
                }
                self.reprocess_token(&renamed);
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // STEP 1: "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // STEP 2: "If the next token is a U+000A LINE FEED (LF) character
                //          token, then ignore that token and move on to the next
                //          one."
                self.skip_next_newline = true;
                // STEP 3: "Switch the tokenizer to the RCDATA state."
                self.tokenizer.set_state(TokenizerState::Rcdata);
                // STEP 4: "Set the original insertion mode to the current
                //          insertion mode."
                self.original_insertion_mode = Some(self.insertion_mode);
                // STEP 5: "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // STEP 6: "Switch the insertion mode to "text"."
                self.insertion_mode = InsertionMode::Text;
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_element_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_only_element(token, TokenizerState::Rawtext);
            }

            // "A start tag whose tag name is "iframe""
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_only_element(token, TokenizerState::Rawtext);
            }

            // "A start tag whose tag name is "noembed""
            // "A start tag whose tag name is "noscript", if the scripting flag is
            // enabled"
            "noembed" => self.parse_text_only_element(token, TokenizerState::Rawtext),
            "noscript" if self.options.scripting_enabled => {
                self.parse_text_only_element(token, TokenizerState::Rawtext);
            }

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption", "in
                // table body", "in row", or "in cell", then switch the insertion
                // mode to "in select in table". Otherwise, switch the insertion
                // mode to "in select"."
                self.insertion_mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            "optgroup" | "option" => {
                // "If the current node is an option element, then pop the current
                // node off the stack of open elements."
                if self.open_elements.current_is("option") {
                    let _ = self.open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            "rb" | "rtc" => {
                // "If the stack of open elements has a ruby element in scope, then
                // generate implied end tags. If the current node is not now a ruby
                // element, this is a parse error."
                if self.open_elements.has_in_scope("ruby") {
                    self.open_elements.generate_implied_end_tags();
                    if !self.open_elements.current_is("ruby") {
                        self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            "rp" | "rt" => {
                // "If the stack of open elements has a ruby element in scope, then
                // generate implied end tags, except for rtc elements. If the
                // current node is not now a rtc element or a ruby element, this is
                // a parse error."
                if self.open_elements.has_in_scope("ruby") {
                    self.open_elements.generate_implied_end_tags_except("rtc");
                    if !self.open_elements.current_is_one_of(&["rtc", "ruby"]) {
                        self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "math""
            "math" => self.insert_foreign_root(token, Namespace::MathMl),

            // "A start tag whose tag name is "svg""
            "svg" => self.insert_foreign_root(token, Namespace::Svg),

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "frame", "head", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.parse_error(ParseErrorCode::UnexpectedStartTag),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
        }
    }

    /// The body element, when it is the second element on the stack.
    fn second_element_if_body(&self) -> Option<A::Handle> {
        self.open_elements
            .get(1)
            .filter(|e| e.is_html("body"))
            .map(|e| e.node.clone())
    }

    /// "A start tag whose tag name is "li"" / "A start tag whose tag name is
    /// one of: "dd", "dt""
    fn handle_list_item_start_tag(&mut self, token: &Token, closes: &[&str]) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // STEP 2: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let Some(node) = self.open_elements.get(index).cloned() else {
                break;
            };

            // STEP 3: "Loop: If node is an li element, then run these substeps:"
            if node.is_html_one_of(closes) {
                // "Generate implied end tags, except for li elements."
                self.open_elements
                    .generate_implied_end_tags_except(&node.tag_name);
                // "If the current node is not an li element, then this is a parse
                // error."
                if !self.open_elements.current_is(&node.tag_name) {
                    self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                // "Pop elements from the stack of open elements until an li
                // element has been popped from the stack."
                self.pop_until_tag_name_popped(&node.tag_name);
                // "Jump to the step labeled done below."
                break;
            }

            // STEP 4: "If node is in the special category, but is not an address,
            //          div, or p element, then jump to the step labeled done below."
            if node.is_special() && !node.is_html_one_of(&["address", "div", "p"]) {
                break;
            }
            // STEP 5: "Otherwise, set node to the previous entry in the stack of
            //          open elements and return to the step labeled loop."
        }

        // STEP 6: "Done: If the stack of open elements has a p element in button
        //          scope, then close a p element."
        self.close_p_element_in_button_scope();

        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(token);
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Push onto the list of active formatting elements
    /// that element."
    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(token);
        self.active_formatting.push(element, token.clone());
    }

    /// "Insert an HTML element for the token. Immediately pop the current node
    /// off the stack of open elements. Acknowledge the token's self-closing
    /// flag, if it is set."
    fn insert_void_element(&mut self, token: &Token) {
        let _ = self.insert_html_element(token);
        let _ = self.open_elements.pop();
        self.acknowledge_self_closing_flag();
    }

    /// "A start tag whose tag name is "math"" / "A start tag whose tag name
    /// is "svg""
    fn insert_foreign_root(&mut self, token: &Token, namespace: Namespace) {
        // "Reconstruct the active formatting elements, if any."
        self.reconstruct_active_formatting_elements();

        // "Adjust MathML attributes for the token. (This fixes the case of
        // MathML attributes that are not all lowercase.)"
        // "Adjust foreign attributes for the token. (This fixes the use of
        // namespaced attributes, in particular XLink.)"
        let mut adjusted = token.clone();
        if let Some(attributes) = adjusted.attributes_mut() {
            match namespace {
                Namespace::Svg => adjust_svg_attributes(attributes),
                _ => adjust_mathml_attributes(attributes),
            }
            adjust_foreign_attributes(attributes);
        }

        // "Insert a foreign element for the token, with MathML namespace and false."
        let _ = self.insert_foreign_element(&adjusted, namespace);

        // "If the token has its self-closing flag set, pop the current node off
        // the stack of open elements and acknowledge the token's self-closing
        // flag."
        if token.is_self_closing() {
            let _ = self.open_elements.pop();
            self.acknowledge_self_closing_flag();
        }
    }

    fn handle_in_body_end_tag(&mut self, name: &str, token: &Token) {
        match name {
            // "An end tag whose tag name is "template""
            "template" => self.process_using_mode(InsertionMode::InHead, token),

            // "An end tag whose tag name is "body""
            "body" => {
                // "If the stack of open elements does not have a body element in
                // scope, this is a parse error; ignore the token."
                if !self.open_elements.has_in_scope("body") {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                // "Otherwise, if there is a node in the stack of open elements that
                // is not either a dd element, ... then this is a parse error."
                if self.has_open_element_needing_end_tag() {
                    self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                if let Some(index) = self.open_elements.last_position_of("body") {
                    self.note_end_tag_at(index);
                }
                // "Switch the insertion mode to "after body"."
                self.insertion_mode = InsertionMode::AfterBody;
            }

            // "An end tag whose tag name is "html""
            "html" => {
                if !self.open_elements.has_in_scope("body") {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                if self.has_open_element_needing_end_tag() {
                    self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                // "Switch the insertion mode to "after body"."
                // "Reprocess the token."
                self.insertion_mode = InsertionMode::AfterBody;
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is one of: "address", "article", ..."
            _ if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in scope
                // that is an HTML element with the same tag name as that of the
                // token, then this is a parse error; ignore the token."
                if !self.open_elements.has_in_scope(name) {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                self.close_element_in_scope(name);
            }

            // "An end tag whose tag name is "form""
            "form" => self.handle_form_end_tag(),

            // "An end tag whose tag name is "p""
            "p" => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML element
                // for a "p" start tag token with no attributes."
                if !self.open_elements.has_in_button_scope("p") {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    let _ = self.insert_implied_html_element("p");
                }
                // "Close a p element."
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => {
                // "If the stack of open elements does not have an li element in
                // list item scope, then this is a parse error; ignore the token."
                if !self.open_elements.has_in_list_item_scope("li") {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                self.open_elements.generate_implied_end_tags_except("li");
                if !self.open_elements.current_is("li") {
                    self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.pop_until_tag_name_popped("li");
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if !self.open_elements.has_in_scope(name) {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                self.open_elements.generate_implied_end_tags_except(name);
                if !self.open_elements.current_is(name) {
                    self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.pop_until_tag_name_popped(name);
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                // "If the stack of open elements does not have an element in scope
                // that is an HTML element and whose tag name is one of "h1", "h2",
                // "h3", "h4", "h5", or "h6", then this is a parse error; ignore
                // the token."
                if !self.open_elements.has_numbered_header_in_scope() {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                self.open_elements.generate_implied_end_tags();
                if !self.open_elements.current_is(name) {
                    self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.pop_until_one_of_popped(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code", ..."
            // "Run the adoption agency algorithm for the token."
            _ if FORMATTING_END_TAGS.contains(&name) => {
                self.adoption_agency_or_any_other_end_tag(name);
            }

            // "An end tag token whose tag name is one of: "applet", "marquee",
            // "object""
            "applet" | "marquee" | "object" => {
                if !self.open_elements.has_in_scope(name) {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag);
                    return;
                }
                self.close_element_in_scope(name);
                // "Clear the list of active formatting elements up to the last
                // marker."
                self.active_formatting.clear_to_last_marker();
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br" start
            // tag token with no attributes, rather than the end tag token that
            // it actually was."
            "br" => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(&Token::fake_start_tag("br"));
                self.frameset_ok = false;
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name),
        }
    }

    /// "Generate implied end tags. If the current node is not an HTML element
    /// with the same tag name as that of the token, then this is a parse
    /// error. Pop elements from the stack of open elements until an HTML
    /// element with the same tag name as the token has been popped from the
    /// stack."
    fn close_element_in_scope(&mut self, name: &str) {
        self.open_elements.generate_implied_end_tags();
        if !self.open_elements.current_is(name) {
            self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.pop_until_tag_name_popped(name);
    }

    /// "An end tag whose tag name is "form""
    fn handle_form_end_tag(&mut self) {
        // "If there is no template element on the stack of open elements, then
        // run these substeps:"
        if self.open_elements.template_count() == 0 {
            // STEP 1: "Let node be the element that the form element pointer is
            //          set to, or null if it is not set to an element."
            // STEP 2: "Set the form element pointer to null."
            let node = self.form_element.take();
            // STEP 3: "If node is null or if the stack of open elements does not
            //          have node in scope, then this is a parse error; return and
            //          ignore the token."
            let Some(node) = node.filter(|n| self.open_elements.has_element_in_scope(n)) else {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
                return;
            };
            // STEP 4: "Generate implied end tags."
            self.open_elements.generate_implied_end_tags();
            // STEP 5: "If the current node is not node, then this is a parse error."
            if self.open_elements.current_node() != Some(&node) {
                self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
            }
            // STEP 6: "Remove node from the stack of open elements."
            if let Some(element) = self.open_elements.remove(&node) {
                self.note_closed(&element);
            }
            return;
        }

        // "If there is a template element on the stack of open elements, then
        // run these substeps instead:"
        // STEP 1: "If the stack of open elements does not have a form element in
        //          scope, then this is a parse error; return and ignore the token."
        if !self.open_elements.has_in_scope("form") {
            self.parse_error(ParseErrorCode::UnexpectedEndTag);
            return;
        }
        // STEP 2-4
        self.close_element_in_scope("form");
    }
}
