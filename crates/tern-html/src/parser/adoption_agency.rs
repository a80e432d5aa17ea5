//! [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
//!
//! Repairs misnested formatting elements such as `<b><i></b></i>` by cloning
//! formatting elements around the block that broke them up.

use tern_dom::Namespace;

use super::core::HTMLParser;
use super::formatting_elements::FormattingEntry;
use super::open_elements::OpenElement;
use crate::error::ParseErrorCode;
use crate::tree_adapter::TreeAdapter;

/// "Let outer loop counter be 0. ... If outer loop counter is greater than
/// or equal to 8, then return."
const OUTER_LOOP_LIMIT: usize = 8;

/// "If inner loop counter is greater than 3 and node is in the list of
/// active formatting elements, then remove node from the list of active
/// formatting elements."
const INNER_LOOP_LIMIT: usize = 3;

/// Where the new formatting element goes in the list of active formatting
/// elements.
enum Bookmark<H> {
    /// In place of the formatting element.
    InPlace,
    /// Right after this entry.
    After(H),
}

/// Outcome of running the algorithm for an end tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AdoptionOutcome {
    /// The token was handled.
    Done,
    /// "...act as described in the "any other end tag" entry below."
    AnyOtherEndTag,
}

impl<A: TreeAdapter> HTMLParser<A> {
    /// Run the adoption agency algorithm for `subject` and fall back to the
    /// "any other end tag" steps when it asks for it.
    pub(super) fn adoption_agency_or_any_other_end_tag(&mut self, subject: &str) {
        if self.run_adoption_agency(subject) == AdoptionOutcome::AnyOtherEndTag {
            self.any_other_end_tag(subject);
        }
    }

    /// [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    pub(super) fn run_adoption_agency(&mut self, subject: &str) -> AdoptionOutcome {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.open_elements.current()
            && current.is_html(subject)
            && !self.active_formatting.contains(&current.node)
        {
            let _ = self.pop_current();
            return AdoptionOutcome::Done;
        }

        // STEP 3-4: "Let outer loop counter be 0. While true: If outer loop
        //            counter is greater than or equal to 8, then return.
        //            Increment outer loop counter by 1."
        for _ in 0..OUTER_LOOP_LIMIT {
            // STEP 4.3: "Let formatting element be the last element in the list
            //            of active formatting elements that: is between the end
            //            of the list and the last marker in the list, if any, or
            //            the start of the list otherwise, and has the tag name
            //            subject. If there is no such element, then return and
            //            instead act as described in the "any other end tag" entry."
            let Some(afe_index) = self
                .active_formatting
                .element_in_scope_with_tag_name(subject)
            else {
                return AdoptionOutcome::AnyOtherEndTag;
            };
            let Some(FormattingEntry::Element {
                node: formatting_element,
                token: formatting_token,
            }) = self.active_formatting.get(afe_index).cloned()
            else {
                return AdoptionOutcome::AnyOtherEndTag;
            };

            // STEP 4.4: "If formatting element is not in the stack of open
            //            elements, then this is a parse error; remove the element
            //            from the list, and return."
            let Some(fe_index) = self.open_elements.position(&formatting_element) else {
                self.parse_error(ParseErrorCode::MisnestedFormattingElement);
                let _ = self.active_formatting.remove(&formatting_element);
                return AdoptionOutcome::Done;
            };

            // STEP 4.5: "If formatting element is in the stack of open elements,
            //            but the element is not in scope, then this is a parse
            //            error; return."
            if !self.open_elements.has_element_in_scope(&formatting_element) {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
                return AdoptionOutcome::Done;
            }

            // STEP 4.6: "If formatting element is not the current node, this is
            //            a parse error. (But do not return.)"
            if self.open_elements.current_node() != Some(&formatting_element) {
                self.parse_error(ParseErrorCode::MisnestedFormattingElement);
            }

            // STEP 4.7: "Let furthest block be the topmost node in the stack of
            //            open elements that is lower in the stack than formatting
            //            element, and is an element in the special category."
            let furthest_block_index = (fe_index + 1..self.open_elements.len()).find(|&i| {
                self.open_elements
                    .get(i)
                    .is_some_and(OpenElement::is_special)
            });

            // STEP 4.8: "If there is no furthest block, then the UA must first
            //            pop all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formatting element, then remove formatting element from
            //            the list of active formatting elements, and finally return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.pop_until_element_popped(&formatting_element);
                let _ = self.active_formatting.remove(&formatting_element);
                return AdoptionOutcome::Done;
            };
            let Some(furthest_block) = self
                .open_elements
                .get(furthest_block_index)
                .map(|e| e.node.clone())
            else {
                return AdoptionOutcome::Done;
            };

            // STEP 4.9: "Let common ancestor be the element immediately above
            //            formatting element in the stack of open elements."
            let Some(common_ancestor) = fe_index
                .checked_sub(1)
                .and_then(|i| self.open_elements.get(i))
                .map(|e| e.node.clone())
            else {
                return AdoptionOutcome::Done;
            };

            // STEP 4.10: "Let a bookmark note the position of formatting element
            //             in the list of active formatting elements relative to
            //             the elements on either side of it in the list."
            let mut bookmark = Bookmark::InPlace;

            // STEP 4.11: "Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block.clone();

            // STEP 4.12: "Let inner loop counter be 0."
            let mut inner_loop_counter = 0;

            // STEP 4.13: "While true:"
            loop {
                // STEP 4.13.1: "Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node in
                //               the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g. because
                //               it got removed by this algorithm), the element that
                //               was immediately above node in the stack of open
                //               elements before node was removed."
                let Some(above) = node_index.checked_sub(1) else {
                    break;
                };
                node_index = above;
                let Some(node) = self.open_elements.get(node_index).cloned() else {
                    break;
                };

                // STEP 4.13.3: "If node is formatting element, then break."
                if node.node == formatting_element {
                    break;
                }

                // STEP 4.13.4: "If inner loop counter is greater than 3 and node
                //               is in the list of active formatting elements, then
                //               remove node from the list of active formatting elements."
                if inner_loop_counter > INNER_LOOP_LIMIT {
                    let _ = self.active_formatting.remove(&node.node);
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of open
                //               elements and continue."
                let Some(node_afe_index) = self.active_formatting.position(&node.node) else {
                    let _ = self.open_elements.remove(&node.node);
                    continue;
                };
                let Some(FormattingEntry::Element { token, .. }) =
                    self.active_formatting.get(node_afe_index).cloned()
                else {
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created, in the HTML namespace,
                //               with common ancestor as the intended parent;
                //               replace the entry for node in the list of active
                //               formatting elements with an entry for the new
                //               element, replace the entry for node in the stack
                //               of open elements with an entry for the new element,
                //               and let node be the new element."
                self.synthetic_depth += 1;
                let new_element = self.create_element_for_token(&token, Namespace::Html);
                self.synthetic_depth -= 1;
                self.active_formatting.set(
                    node_afe_index,
                    FormattingEntry::Element {
                        node: new_element.clone(),
                        token: token.clone(),
                    },
                );
                self.open_elements.replace(
                    &node.node,
                    OpenElement::new(
                        new_element.clone(),
                        &node.tag_name,
                        Namespace::Html,
                        token.attributes(),
                    ),
                );

                // STEP 4.13.7: "If last node is furthest block, then move the
                //               aforementioned bookmark to be immediately after
                //               the new node in the list of active formatting
                //               elements."
                if last_node == furthest_block {
                    bookmark = Bookmark::After(new_element.clone());
                }

                // STEP 4.13.8: "Append last node to node."
                self.adapter.append_child(&new_element, &last_node);

                // STEP 4.13.9: "Set last node to node."
                last_node = new_element;
            }

            // STEP 4.14: "Insert whatever last node ended up being in the
            //             appropriate place for inserting a node, but using common
            //             ancestor as the override target."
            let location = self.appropriate_insertion_location(Some(&common_ancestor));
            self.insert_node_at(&location, &last_node);

            // STEP 4.15: "Create an element for the token for which formatting
            //             element was created, in the HTML namespace, with furthest
            //             block as the intended parent."
            self.synthetic_depth += 1;
            let new_element = self.create_element_for_token(&formatting_token, Namespace::Html);
            self.synthetic_depth -= 1;

            // STEP 4.16: "Take all of the child nodes of furthest block and append
            //             them to the element created in the last step."
            self.adapter.move_children(&furthest_block, &new_element);

            // STEP 4.17: "Append that new element to furthest block."
            self.adapter.append_child(&furthest_block, &new_element);

            // STEP 4.18: "Remove formatting element from the list of active
            //             formatting elements, and insert the new element into the
            //             list of active formatting elements at the position of the
            //             aforementioned bookmark."
            let new_entry = FormattingEntry::Element {
                node: new_element.clone(),
                token: formatting_token.clone(),
            };
            match bookmark {
                Bookmark::InPlace => {
                    if let Some(index) = self.active_formatting.position(&formatting_element) {
                        self.active_formatting.set(index, new_entry);
                    }
                }
                Bookmark::After(anchor) => {
                    let _ = self.active_formatting.remove(&formatting_element);
                    let index = self
                        .active_formatting
                        .position(&anchor)
                        .map_or(self.active_formatting.len(), |i| i + 1);
                    self.active_formatting.insert(index, new_entry);
                }
            }

            // STEP 4.19: "Remove formatting element from the stack of open
            //             elements, and insert the new element into the stack of
            //             open elements immediately below the position of furthest
            //             block in that stack."
            let _ = self.open_elements.remove(&formatting_element);
            let below_furthest_block = self
                .open_elements
                .position(&furthest_block)
                .map_or(self.open_elements.len(), |i| i + 1);
            self.open_elements.insert(
                below_furthest_block,
                OpenElement::new(
                    new_element,
                    subject,
                    Namespace::Html,
                    formatting_token.attributes(),
                ),
            );
        }
        AdoptionOutcome::Done
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "Any other end tag"
    pub(super) fn any_other_end_tag(&mut self, name: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let Some(node) = self.open_elements.get(index).cloned() else {
                return;
            };

            // STEP 2: "Loop: If node is an HTML element with the same tag name as
            //          the token, then:"
            if node.is_html(name) {
                // STEP 2.1: "Generate implied end tags, except for HTML elements
                //            with the same tag name as the token."
                self.open_elements.generate_implied_end_tags_except(name);
                // STEP 2.2: "If node is not the current node, then this is a parse
                //            error."
                if self.open_elements.current_node() != Some(&node.node) {
                    self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                // STEP 2.3: "Pop all the nodes from the current node up to node,
                //            including node, then stop these steps."
                self.pop_until_element_popped(&node.node);
                return;
            }

            // STEP 3: "Otherwise, if node is in the special category, then this is
            //          a parse error; ignore the token, and return."
            if node.is_special() {
                self.parse_error(ParseErrorCode::UnexpectedEndTag);
                return;
            }
            // STEP 4-5: "Set node to the previous entry in the stack of open
            //            elements. Return to the step labeled loop."
        }
    }
}
