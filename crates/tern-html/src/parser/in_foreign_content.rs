//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

use tern_dom::Namespace;

use super::core::HTMLParser;
use super::foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
    adjust_svg_tag_name, causes_exit,
};
use crate::error::ParseErrorCode;
use crate::tokenizer::Token;
use crate::tree_adapter::TreeAdapter;

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(super) fn handle_foreign_content(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            Token::NullCharacter { data } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                let replacement = "\u{FFFD}".repeat(data.chars().count());
                self.insert_characters(&replacement);
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the token's character."
            Token::Whitespace { data } => self.insert_characters(data),

            // "Any other character token"
            // "Insert the token's character."
            // "Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.insert_characters(data);
                self.frameset_ok = false;
            }

            // "A comment token"
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            Token::Doctype { .. } => self.parse_error(ParseErrorCode::MisplacedDoctype),

            // "A start tag whose tag name is one of: "b", "big", ..."
            // "An end tag whose tag name is "br", "p""
            _ if causes_exit(token)
                || matches!(token, Token::EndTag { name, .. } if name == "br" || name == "p") =>
            {
                // "Parse error."
                self.parse_error(ParseErrorCode::UnexpectedTokenInForeignContent);
                // "While the current node is not a MathML text integration point,
                // an HTML integration point, or an element in the HTML namespace,
                // pop elements from the stack of open elements."
                while let Some(current) = self.open_elements.current() {
                    if current.namespace == Namespace::Html
                        || current.html_integration_point
                        || current.is_mathml_text_integration_point()
                    {
                        break;
                    }
                    let _ = self.open_elements.pop();
                }
                // "Reprocess the token according to the rules given in the section
                // corresponding to the current insertion mode in HTML content."
                self.process_using_mode(self.insertion_mode, token);
            }

            // "Any other start tag"
            Token::StartTag { .. } => self.insert_foreign_start_tag(token),

            // "An end tag whose tag name is "script", if the current node is an
            // SVG script element"
            // "Pop the current node off the stack of open elements."
            Token::EndTag { name, .. }
                if name == "script"
                    && self
                        .open_elements
                        .current()
                        .is_some_and(|e| e.namespace == Namespace::Svg && e.tag_name == "script") =>
            {
                let _ = self.pop_current();
            }

            // "Any other end tag"
            Token::EndTag { name, .. } => self.foreign_end_tag(name, token),

            // The dispatcher sends end-of-file to the insertion mode.
            Token::EndOfFile => self.process_using_mode(self.insertion_mode, token),
        }
    }

    /// "Any other start tag" in foreign content.
    fn insert_foreign_start_tag(&mut self, token: &Token) {
        let Some(namespace) = self.adjusted_current_node().map(|node| node.namespace) else {
            return;
        };

        let mut adjusted = token.clone();
        if let Token::StartTag {
            name, attributes, ..
        } = &mut adjusted
        {
            match namespace {
                // "If the adjusted current node is an element in the MathML
                // namespace, adjust MathML attributes for the token."
                Namespace::MathMl => adjust_mathml_attributes(attributes),
                // "If the adjusted current node is an element in the SVG
                // namespace, and the token's tag name is one of the ones in the
                // first column of the following table, change the tag name to
                // the name given in the corresponding cell in the second column."
                // "If the adjusted current node is an element in the SVG
                // namespace, adjust SVG attributes for the token."
                Namespace::Svg => {
                    *name = adjust_svg_tag_name(name).to_string();
                    adjust_svg_attributes(attributes);
                }
                _ => {}
            }
            // "Adjust foreign attributes for the token."
            adjust_foreign_attributes(attributes);
        }

        // "Insert a foreign element for the token, with the adjusted current
        // node's namespace and false."
        let _ = self.insert_foreign_element(&adjusted, namespace);

        // "If the token has its self-closing flag set, then run the appropriate
        // steps from the following list:"
        // "If the token's tag name is "script", and the new current node is in
        // the SVG namespace": "Acknowledge the token's self-closing flag, and then
        // act as described in the steps for a "script" end tag below."
        // "Otherwise": "Pop the current node off the stack of open elements and
        // acknowledge the token's self-closing flag."
        if token.is_self_closing() {
            let _ = self.open_elements.pop();
            self.acknowledge_self_closing_flag();
        }
    }

    /// "Any other end tag" in foreign content.
    fn foreign_end_tag(&mut self, name: &str, token: &Token) {
        let Some(mut index) = self.open_elements.len().checked_sub(1) else {
            return;
        };

        // STEP 1: "Initialize node to be the current node (the bottommost node of
        //          the stack)."
        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not the
        //          same as the tag name of the token, then this is a parse error."
        if self
            .open_elements
            .get(index)
            .is_some_and(|node| !node.tag_name.eq_ignore_ascii_case(name))
        {
            self.parse_error(ParseErrorCode::UnexpectedEndTag);
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of open
            //          elements, then return. (fragment case)"
            if index == 0 {
                return;
            }
            let Some(node) = self.open_elements.get(index).cloned() else {
                return;
            };

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the same
            //          as the tag name of the token, pop elements from the stack of
            //          open elements until node has been popped from the stack, and
            //          then return."
            if node.tag_name.eq_ignore_ascii_case(name) {
                self.pop_until_element_popped(&node.node);
                return;
            }

            // STEP 5: "Set node to the previous entry in the stack of open elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return to
            //          the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules given in
            //          the section corresponding to the current insertion mode in
            //          HTML content."
            if self
                .open_elements
                .get(index)
                .is_some_and(|node| node.namespace == Namespace::Html)
            {
                self.process_using_mode(self.insertion_mode, token);
                return;
            }
        }
    }
}
