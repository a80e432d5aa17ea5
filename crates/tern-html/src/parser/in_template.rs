//! [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)

use super::core::{HTMLParser, InsertionMode};
use crate::error::ParseErrorCode;
use crate::tokenizer::Token;
use crate::tree_adapter::TreeAdapter;

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(super) fn handle_in_template_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "A comment token"
            // "A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Character { .. }
            | Token::Whitespace { .. }
            | Token::NullCharacter { .. }
            | Token::Comment { .. }
            | Token::Doctype { .. } => self.process_using_mode(InsertionMode::InBody, token),

            Token::StartTag { name, .. } => {
                let mode = match name.as_str() {
                    // "A start tag whose tag name is one of: "base", "basefont",
                    // "bgsound", "link", "meta", "noframes", "script", "style",
                    // "template", "title""
                    "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                    | "style" | "template" | "title" => {
                        self.process_using_mode(InsertionMode::InHead, token);
                        return;
                    }
                    // "A start tag whose tag name is one of: "caption", "colgroup",
                    // "tbody", "tfoot", "thead""
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => InsertionMode::InTable,
                    // "A start tag whose tag name is "col""
                    "col" => InsertionMode::InColumnGroup,
                    // "A start tag whose tag name is "tr""
                    "tr" => InsertionMode::InTableBody,
                    // "A start tag whose tag name is one of: "td", "th""
                    "td" | "th" => InsertionMode::InRow,
                    // "Any other start tag"
                    _ => InsertionMode::InBody,
                };
                // "Pop the current template insertion mode off the stack of
                // template insertion modes."
                // "Push X onto the stack of template insertion modes so that it is
                // the new current template insertion mode."
                // "Switch the insertion mode to X, and reprocess the token."
                let _ = self.template_insertion_modes.pop();
                self.template_insertion_modes.push(mode);
                self.insertion_mode = mode;
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is "template""
            Token::EndTag { name, .. } if name == "template" => {
                self.process_using_mode(InsertionMode::InHead, token);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => self.parse_error(ParseErrorCode::UnexpectedEndTag),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open elements,
                // then stop parsing. (fragment case)"
                if self.open_elements.template_count() == 0 {
                    return;
                }
                // "Otherwise, this is a parse error."
                self.parse_error(ParseErrorCode::OpenElementsLeftAfterEof);
                // "Pop elements from the stack of open elements until a template
                // element has been popped from the stack."
                self.pop_until_tag_name_popped("template");
                // "Clear the list of active formatting elements up to the last marker."
                self.active_formatting.clear_to_last_marker();
                // "Pop the current template insertion mode off the stack of template
                // insertion modes."
                let _ = self.template_insertion_modes.pop();
                // "Reset the insertion mode appropriately."
                self.reset_insertion_mode_appropriately();
                // "Reprocess the token."
                self.reprocess_token(token);
            }
        }
    }
}
