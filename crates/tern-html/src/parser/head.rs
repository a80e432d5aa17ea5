//! The insertion modes before `<body>`, plus "text".

use tern_dom::Namespace;

use super::after::unexpected;
use super::core::{HTMLParser, InsertionMode};
use super::doctype;
use super::open_elements::OpenElement;
use crate::error::ParseErrorCode;
use crate::tokenizer::{Token, TokenizerState};
use crate::tree_adapter::TreeAdapter;

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::Whitespace { .. } => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                let document = self.document.clone();
                self.insert_comment_into(data, document);
            }

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                let name = name.as_deref();
                let public_id = public_identifier.as_deref();
                let system_id = system_identifier.as_deref();

                // "If the DOCTYPE token's name is not "html", or the token's
                // public identifier is not missing, or the token's system
                // identifier is neither missing nor "about:legacy-compat", then
                // there is a parse error."
                if !doctype::is_conforming(name, public_id, system_id) {
                    self.parse_error(ParseErrorCode::NonConformingDoctype);
                }

                // "Append a DocumentType node to the Document node, with its name
                // set to the name given in the DOCTYPE token, or the empty string
                // if the name was missing..."
                self.adapter.set_document_type(
                    name.unwrap_or_default(),
                    public_id.unwrap_or_default(),
                    system_id.unwrap_or_default(),
                );
                if let Some(locations) = self.locations.as_mut()
                    && let Some(node) = self
                        .adapter
                        .children(&self.document)
                        .into_iter()
                        .find(|child| self.adapter.is_document_type(child))
                {
                    locations.record(node, self.token_span);
                }

                let mode = doctype::quirks_mode_for(name, public_id, system_id, *force_quirks);
                self.adapter.set_quirks_mode(mode);

                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is a
            // parse error; if the parser cannot change the mode flag is false,
            // set the Document to quirks mode."
            // "In any case, switch the insertion mode to "before html", then
            // reprocess the token."
            _ => {
                self.parse_error(ParseErrorCode::MissingDoctype);
                self.adapter.set_quirks_mode(tern_dom::QuirksMode::Quirks);
                self.insertion_mode = InsertionMode::BeforeHtml;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                let document = self.document.clone();
                self.insert_comment_into(data, document);
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            Token::Whitespace { .. } => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document object.
            // Put this element in the stack of open elements."
            Token::StartTag { name, .. } if name == "html" => {
                let element = self.create_element_for_token(token, Namespace::Html);
                self.push_root_element(element, token);
                // "Switch the insertion mode to "before head"."
                self.insertion_mode = InsertionMode::BeforeHead;
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                // "Any other end tag"
                // "Parse error. Ignore the token."
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
            }

            // "Anything else"
            // "Create an html element whose node document is the Document
            // object. Append it to the Document object. Put this element in the
            // stack of open elements."
            // "Switch the insertion mode to "before head", then reprocess the
            // token."
            _ => {
                self.synthetic_depth += 1;
                let html = Token::fake_start_tag("html");
                let element = self.create_element_for_token(&html, Namespace::Html);
                self.push_root_element(element, &html);
                self.synthetic_depth -= 1;
                self.insertion_mode = InsertionMode::BeforeHead;
                self.reprocess_token(token);
            }
        }
    }

    fn push_root_element(&mut self, element: A::Handle, token: &Token) {
        let document = self.document.clone();
        self.adapter.append_child(&document, &element);
        self.open_elements.push(OpenElement::new(
            element,
            "html",
            Namespace::Html,
            token.attributes(),
        ));
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            Token::Whitespace { .. } => {}

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_mode(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element = Some(head);
                self.insertion_mode = InsertionMode::InHead;
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
            }

            // "Anything else"
            // "Insert an HTML element for a "head" start tag token with no
            // attributes."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            // "Reprocess the current token."
            _ => {
                let head = self.insert_implied_html_element("head");
                self.head_element = Some(head);
                self.insertion_mode = InsertionMode::InHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn handle_in_head_mode(&mut self, token: &Token) {
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

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link""
                // "A start tag whose tag name is "meta""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.pop_current();
                    self.acknowledge_self_closing_flag();
                }

                // "A start tag whose tag name is "title""
                // "Follow the generic RCDATA element parsing algorithm."
                "title" => self.parse_text_only_element(token, TokenizerState::Rcdata),

                // "A start tag whose tag name is "noscript", if the scripting
                // flag is enabled"
                // "A start tag whose tag name is one of: "noframes", "style""
                // "Follow the generic raw text element parsing algorithm."
                "noscript" if self.options.scripting_enabled => {
                    self.parse_text_only_element(token, TokenizerState::Rawtext);
                }
                "noframes" | "style" => {
                    self.parse_text_only_element(token, TokenizerState::Rawtext);
                }

                // "A start tag whose tag name is "noscript", if the scripting
                // flag is disabled"
                // "Insert an HTML element for the token."
                // "Switch the insertion mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InHeadNoscript;
                }

                // "A start tag whose tag name is "script""
                "script" => {
                    // STEP 1-7: "Let the adjusted insertion location be the
                    //            appropriate place for inserting a node..."
                    //            "Insert the newly created element at the
                    //            adjusted insertion location."
                    //            "Push the element onto the stack of open elements"
                    let _ = self.insert_html_element(token);
                    // STEP 8: "Switch the tokenizer to the script data state."
                    self.tokenizer.set_state(TokenizerState::ScriptData);
                    // STEP 9: "Set the original insertion mode to the current
                    //          insertion mode."
                    self.original_insertion_mode = Some(self.insertion_mode);
                    // STEP 10: "Switch the insertion mode to "text"."
                    self.insertion_mode = InsertionMode::Text;
                }

                // "A start tag whose tag name is "template""
                "template" => {
                    // "Insert an HTML element for the token."
                    let _ = self.insert_html_element(token);
                    // "Insert a marker at the end of the list of active
                    // formatting elements."
                    self.active_formatting.insert_marker();
                    // "Set the frameset-ok flag to "not ok"."
                    self.frameset_ok = false;
                    // "Switch the insertion mode to "in template"."
                    self.insertion_mode = InsertionMode::InTemplate;
                    // "Push "in template" onto the stack of template insertion
                    // modes so that it is the new current template insertion mode."
                    self.template_insertion_modes
                        .push(InsertionMode::InTemplate);
                }

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => self.parse_error(ParseErrorCode::UnexpectedStartTag),

                _ => self.leave_head(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "head""
                // "Pop the current node (which will be the head element) off the
                // stack of open elements."
                // "Switch the insertion mode to "after head"."
                "head" => {
                    let _ = self.pop_current();
                    self.insertion_mode = InsertionMode::AfterHead;
                }

                // "An end tag whose tag name is one of: "body", "html", "br""
                "body" | "html" | "br" => self.leave_head(token),

                // "An end tag whose tag name is "template""
                "template" => self.close_template_element(),

                // "Any other end tag"
                _ => self.parse_error(ParseErrorCode::UnexpectedEndTag),
            },

            _ => self.leave_head(token),
        }
    }

    /// "in head", "Anything else": "Pop the current node (which will be the
    /// head element) off the stack of open elements. Switch the insertion mode
    /// to "after head". Reprocess the token."
    fn leave_head(&mut self, token: &Token) {
        let _ = self.open_elements.pop();
        self.insertion_mode = InsertionMode::AfterHead;
        self.reprocess_token(token);
    }

    /// "in head", "An end tag whose tag name is "template""
    pub(super) fn close_template_element(&mut self) {
        // "If there is no template element on the stack of open elements, then
        // this is a parse error; ignore the token."
        if self.open_elements.template_count() == 0 {
            self.parse_error(ParseErrorCode::UnexpectedEndTag);
            return;
        }
        // STEP 1: "Generate all implied end tags thoroughly."
        self.open_elements.generate_implied_end_tags_thoroughly();
        // STEP 2: "If the current node is not a template element, then this is
        //          a parse error."
        if !self.open_elements.current_is("template") {
            self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        // STEP 3: "Pop elements from the stack of open elements until a template
        //          element has been popped from the stack."
        self.pop_until_tag_name_popped("template");
        // STEP 4: "Clear the list of active formatting elements up to the last marker."
        self.active_formatting.clear_to_last_marker();
        // STEP 5: "Pop the current template insertion mode off the stack of
        //          template insertion modes."
        let _ = self.template_insertion_modes.pop();
        // STEP 6: "Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is "html""
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_mode(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head element."
            // "Switch the insertion mode to "in head"."
            Token::EndTag { name, .. } if name == "noscript" => {
                let _ = self.pop_current();
                self.insertion_mode = InsertionMode::InHead;
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "A comment token"
            // "A start tag whose tag name is one of: "basefont", "bgsound",
            // "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::Whitespace { .. } | Token::Comment { .. } => {
                self.process_using_mode(InsertionMode::InHead, token);
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_using_mode(InsertionMode::InHead, token);
            }

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" || name == "noscript" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. } if name != "br" => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
            }

            // "Anything else"
            // "Parse error."
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head element."
            // "Switch the insertion mode to "in head"."
            // "Reprocess the token."
            _ => {
                self.parse_error(unexpected(token));
                let _ = self.open_elements.pop();
                self.insertion_mode = InsertionMode::InHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn handle_after_head_mode(&mut self, token: &Token) {
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

                // "A start tag whose tag name is "body""
                // "Insert an HTML element for the token."
                // "Set the frameset-ok flag to "not ok"."
                // "Switch the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(token);
                    self.frameset_ok = false;
                    self.insertion_mode = InsertionMode::InBody;
                }

                // "A start tag whose tag name is "frameset""
                "frameset" => {
                    let _ = self.insert_html_element(token);
                    self.insertion_mode = InsertionMode::InFrameset;
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    // "Parse error."
                    self.parse_error(ParseErrorCode::UnexpectedStartTag);
                    // "Push the node pointed to by the head element pointer onto
                    // the stack of open elements."
                    let Some(head) = self.head_element.clone() else {
                        return;
                    };
                    self.open_elements
                        .push(OpenElement::new(head.clone(), "head", Namespace::Html, &[]));
                    // "Process the token using the rules for the "in head"
                    // insertion mode."
                    self.process_using_mode(InsertionMode::InHead, token);
                    // "Remove the node pointed to by the head element pointer from
                    // the stack of open elements. (It might not be the current
                    // node at this point.)"
                    let _ = self.open_elements.remove(&head);
                }

                // "A start tag whose tag name is "head""
                "head" => self.parse_error(ParseErrorCode::UnexpectedStartTag),

                _ => self.insert_implied_body(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "template""
                "template" => self.process_using_mode(InsertionMode::InHead, token),
                // "An end tag whose tag name is one of: "body", "html", "br""
                "body" | "html" | "br" => self.insert_implied_body(token),
                // "Any other end tag"
                _ => self.parse_error(ParseErrorCode::UnexpectedEndTag),
            },

            _ => self.insert_implied_body(token),
        }
    }

    /// "after head", "Anything else": "Insert an HTML element for a "body"
    /// start tag token with no attributes. Switch the insertion mode to "in
    /// body". Reprocess the current token."
    fn insert_implied_body(&mut self, token: &Token) {
        let _ = self.insert_implied_html_element("body");
        self.insertion_mode = InsertionMode::InBody;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn handle_text_mode(&mut self, token: &Token) {
        let original = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character { data }
            | Token::Whitespace { data }
            | Token::NullCharacter { data } => {
                self.insert_characters(data);
                self.original_insertion_mode = Some(original);
            }

            // "An end-of-file token"
            // "Parse error."
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode and
            // reprocess the token."
            Token::EndOfFile => {
                self.parse_error(ParseErrorCode::OpenElementsLeftAfterEof);
                let _ = self.open_elements.pop();
                self.insertion_mode = original;
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is "script""
            Token::EndTag { name, .. } if name == "script" => {
                // "Let script be the current node (which will be a script element)."
                // "Pop the current node off the stack of open elements."
                let script = self.pop_current();
                // "Switch the insertion mode to the original insertion mode."
                self.insertion_mode = original;
                if let Some(script) = script
                    && script.is_html("script")
                {
                    self.run_script(script.node);
                }
            }

            // "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.pop_current();
                self.insertion_mode = original;
            }

            _ => self.original_insertion_mode = Some(original),
        }
    }
}
