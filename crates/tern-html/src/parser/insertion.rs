//! Creating and inserting nodes, and the shared algorithms the insertion
//! modes call into.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)

use tern_dom::Namespace;

use super::core::{HTMLParser, InsertionMode};
use super::formatting_elements::FormattingEntry;
use super::open_elements::OpenElement;
use crate::error::ParseErrorCode;
use crate::tokenizer::{Token, TokenizerState};
use crate::tree_adapter::{NodeKind, TreeAdapter};

/// "If foster parenting is enabled and target is a table, tbody, tfoot,
/// thead, or tr element"
const FOSTER_PARENTING_TARGETS: &[&str] = &["table", "tbody", "tfoot", "thead", "tr"];

/// "The adjusted insertion location": a parent and an optional node to
/// insert before. `None` means "after its last child".
#[derive(Debug, Clone)]
pub(super) struct InsertionLocation<H> {
    pub(super) parent: H,
    pub(super) before: Option<H>,
}

impl<A: TreeAdapter> HTMLParser<A> {
    /// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    pub(super) fn appropriate_insertion_location(
        &self,
        override_target: Option<&A::Handle>,
    ) -> InsertionLocation<A::Handle> {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the current node."
        let target_entry = match override_target {
            Some(node) => self
                .open_elements
                .position(node)
                .and_then(|i| self.open_elements.get(i)),
            None => self.open_elements.current(),
        };
        let target = override_target
            .cloned()
            .or_else(|| target_entry.map(|e| e.node.clone()))
            .unwrap_or_else(|| self.document.clone());

        // STEP 2: "Determine the adjusted insertion location using the first
        //          matching steps from the following list:"
        let location = if self.foster_parenting
            && target_entry.is_some_and(|e| e.is_html_one_of(FOSTER_PARENTING_TARGETS))
        {
            self.foster_parenting_location()
        } else {
            // "Otherwise: Let adjusted insertion location be inside target,
            // after its last child (if any)."
            InsertionLocation {
                parent: target,
                before: None,
            }
        };

        // STEP 3: "If the adjusted insertion location is inside a template
        //          element, let it instead be inside the template element's
        //          template contents, after its last child (if any)."
        match self.adapter.template_contents(&location.parent) {
            Some(contents) => InsertionLocation {
                parent: contents,
                before: None,
            },
            None => location,
        }
    }

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    ///
    /// "If foster parenting is enabled and target is a table, tbody, tfoot,
    /// thead, or tr element"
    fn foster_parenting_location(&self) -> InsertionLocation<A::Handle> {
        // STEP 1: "Let last template be the last template element in the stack
        //          of open elements, if any."
        let last_template = self.open_elements.last_position_of("template");
        // STEP 2: "Let last table be the last table element in the stack of
        //          open elements, if any."
        let last_table = self.open_elements.last_position_of("table");

        // STEP 3: "If there is a last template and either there is no last
        //          table, or there is one, but last template is lower (more
        //          recently added) than last table in the stack of open
        //          elements, then: let adjusted insertion location be inside
        //          last template's template contents, after its last child
        //          (if any), and abort these steps."
        if let Some(template) = last_template
            && last_table.is_none_or(|table| template > table)
            && let Some(entry) = self.open_elements.get(template)
        {
            return InsertionLocation {
                parent: entry.node.clone(),
                before: None,
            };
        }

        // STEP 4: "If there is no last table, then let adjusted insertion
        //          location be inside the first element in the stack of open
        //          elements (the html element), after its last child (if any),
        //          and abort these steps. (fragment case)"
        let Some(table_index) = last_table else {
            let parent = self
                .open_elements
                .get(0)
                .map_or_else(|| self.document.clone(), |e| e.node.clone());
            return InsertionLocation {
                parent,
                before: None,
            };
        };
        let Some(table) = self.open_elements.get(table_index) else {
            return InsertionLocation {
                parent: self.document.clone(),
                before: None,
            };
        };
        let table = table.node.clone();

        // STEP 5: "If last table has a parent node, then let adjusted insertion
        //          location be inside last table's parent node, immediately
        //          before last table, and abort these steps."
        if let Some(parent) = self.adapter.parent(&table) {
            return InsertionLocation {
                parent,
                before: Some(table),
            };
        }

        // STEP 6: "Let previous element be the element immediately above last
        //          table in the stack of open elements."
        // STEP 7: "Let adjusted insertion location be inside previous element,
        //          after its last child (if any)."
        let parent = table_index
            .checked_sub(1)
            .and_then(|i| self.open_elements.get(i))
            .map_or_else(|| self.document.clone(), |e| e.node.clone());
        InsertionLocation {
            parent,
            before: None,
        }
    }

    pub(super) fn insert_node_at(
        &mut self,
        location: &InsertionLocation<A::Handle>,
        node: &A::Handle,
    ) {
        match &location.before {
            Some(before) => self.adapter.insert_before(&location.parent, node, before),
            None => self.adapter.append_child(&location.parent, node),
        }
    }

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Creates the element without inserting it. Elements created for tokens
    /// read from the input record the token's span.
    pub(super) fn create_element_for_token(
        &mut self,
        token: &Token,
        namespace: Namespace,
    ) -> A::Handle {
        let name = token.tag_name().unwrap_or_default();
        let element = self
            .adapter
            .create_element(name, namespace, token.attributes().to_vec());
        if self.synthetic_depth == 0
            && let Some(locations) = self.locations.as_mut()
        {
            locations.record(element.clone(), self.token_span);
        }
        element
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// 1. "Let the adjusted insertion location be the appropriate place for
    ///    inserting a node."
    /// 2. "Let element be the result of creating an element for the token in
    ///    the given namespace, with the intended parent being the element in
    ///    which the adjusted insertion location finds itself."
    /// 3. "If onlyAddToElementStack is false, then run insert an element at
    ///    the adjusted insertion location with element."
    /// 4. "Push element onto the stack of open elements so that it is the new
    ///    current node."
    /// 5. "Return element."
    pub(super) fn insert_foreign_element(
        &mut self,
        token: &Token,
        namespace: Namespace,
    ) -> A::Handle {
        let location = self.appropriate_insertion_location(None);
        let element = self.create_element_for_token(token, namespace);
        self.insert_node_at(&location, &element);
        self.open_elements.push(OpenElement::new(
            element.clone(),
            token.tag_name().unwrap_or_default(),
            namespace,
            token.attributes(),
        ));
        element
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the
    /// token, with the HTML namespace and false."
    pub(super) fn insert_html_element(&mut self, token: &Token) -> A::Handle {
        self.insert_foreign_element(token, Namespace::Html)
    }

    /// Insert an HTML element for a start tag token with the tag name `name`
    /// and no attributes, one that does not appear in the input.
    pub(super) fn insert_implied_html_element(&mut self, name: &str) -> A::Handle {
        self.synthetic_depth += 1;
        let element = self.insert_html_element(&Token::fake_start_tag(name));
        self.synthetic_depth -= 1;
        element
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// Inserts a whole run of characters at once.
    pub(super) fn insert_characters(&mut self, data: &str) {
        // STEP 2: "Let the adjusted insertion location be the appropriate place
        //          for inserting a node."
        let location = self.appropriate_insertion_location(None);

        // STEP 3: "If the adjusted insertion location is inside a Document
        //          node, then ignore the token."
        if self.adapter.node_kind(&location.parent) == NodeKind::Document {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //          insertion location, then append data to that Text node's
        //          data. Otherwise, create a new Text node whose data is data..."
        let text_node = match &location.before {
            Some(before) => {
                self.adapter
                    .insert_text_before(&location.parent, data, before);
                self.adapter.previous_sibling(before)
            }
            None => {
                self.adapter.insert_text(&location.parent, data);
                self.adapter.last_child(&location.parent)
            }
        };

        if self.synthetic_depth == 0
            && let Some(locations) = self.locations.as_mut()
            && let Some(node) = text_node
        {
            locations.extend(node, self.token_span);
        }
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// "If position was specified, then let the adjusted insertion location be
    /// position. Otherwise, let adjusted insertion location be the appropriate
    /// place for inserting a node."
    pub(super) fn insert_comment(&mut self, data: &str) {
        let location = self.appropriate_insertion_location(None);
        self.insert_comment_at(data, &location);
    }

    /// Insert a comment as the last child of `parent`.
    pub(super) fn insert_comment_into(&mut self, data: &str, parent: A::Handle) {
        let location = InsertionLocation {
            parent,
            before: None,
        };
        self.insert_comment_at(data, &location);
    }

    fn insert_comment_at(&mut self, data: &str, location: &InsertionLocation<A::Handle>) {
        let comment = self.adapter.create_comment(data);
        self.insert_node_at(location, &comment);
        if let Some(locations) = self.locations.as_mut() {
            locations.record(comment, self.token_span);
        }
    }

    /// Pop the current node.
    pub(super) fn pop_current(&mut self) -> Option<OpenElement<A::Handle>> {
        let popped = self.open_elements.pop();
        if let Some(element) = &popped {
            self.note_closed(element);
        }
        popped
    }

    /// Pop until an HTML element named `tag_name` has been popped.
    pub(super) fn pop_until_tag_name_popped(&mut self, tag_name: &str) {
        if let Some(element) = self.open_elements.pop_until_tag_name_popped(tag_name) {
            self.note_closed(&element);
        }
    }

    /// Pop until an HTML element named one of `names` has been popped.
    pub(super) fn pop_until_one_of_popped(&mut self, names: &[&str]) {
        if let Some(element) = self.open_elements.pop_until_one_of_popped(names) {
            self.note_closed(&element);
        }
    }

    /// Pop until `node` has been popped.
    pub(super) fn pop_until_element_popped(&mut self, node: &A::Handle) {
        if let Some(element) = self.open_elements.pop_until_element_popped(node) {
            self.note_closed(&element);
        }
    }

    /// Record the span of the end tag that closed `element`, when the token
    /// being processed is that end tag.
    pub(super) fn note_closed(&mut self, element: &OpenElement<A::Handle>) {
        if self.synthetic_depth == 0
            && self
                .current_end_tag
                .as_deref()
                .is_some_and(|name| element.tag_name.eq_ignore_ascii_case(name))
            && let Some(locations) = self.locations.as_mut()
        {
            locations.set_end_tag(&element.node, self.token_span);
        }
    }

    /// Record the current end tag span for an element that stays open
    /// (`</body>` and `</html>`).
    pub(super) fn note_end_tag_at(&mut self, index: usize) {
        if let Some(element) = self.open_elements.get(index).cloned() {
            self.note_closed(&element);
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// This algorithm has two phases:
    /// - Rewind phase (steps 4-6): walk backwards to find where to start
    /// - Create phase (steps 7-10): walk forwards, creating elements
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of active
        //          formatting elements is a marker, or if it is an element that
        //          is in the stack of open elements, then there is nothing to
        //          reconstruct; stop this algorithm."
        match self.active_formatting.last() {
            None | Some(FormattingEntry::Marker) => return,
            Some(FormattingEntry::Element { node, .. }) if self.open_elements.contains(node) => {
                return;
            }
            Some(FormattingEntry::Element { .. }) => {}
        }

        // STEP 3: "Let entry be the last (most recently added) element in the
        //          list of active formatting elements."
        let mut index = self.active_formatting.len() - 1;

        // STEP 4-6: Rewind
        while index > 0 {
            // STEP 5: "Let entry be the entry one earlier than entry in the list
            //          of active formatting elements."
            let earlier = &self.active_formatting.entries()[index - 1];
            // STEP 6: "If entry is neither a marker nor an element that is also
            //          in the stack of open elements, go to the step labeled rewind."
            let stop = match earlier {
                FormattingEntry::Marker => true,
                FormattingEntry::Element { node, .. } => self.open_elements.contains(node),
            };
            if stop {
                break;
            }
            index -= 1;
        }

        // STEP 7-10: Advance / Create
        self.synthetic_depth += 1;
        while index < self.active_formatting.len() {
            // STEP 8: "Create: Insert an HTML element for the token for which
            //          the element entry was created, to obtain new element."
            if let Some(FormattingEntry::Element { token, .. }) =
                self.active_formatting.get(index).cloned()
            {
                let element = self.insert_html_element(&token);
                // STEP 9: "Replace the entry for entry in the list with an entry
                //          for new element."
                self.active_formatting.set(
                    index,
                    FormattingEntry::Element {
                        node: element,
                        token,
                    },
                );
            }
            // STEP 10: "If the entry for new element in the list of active
            //           formatting elements is not the last entry in the list,
            //           return to the step labeled advance."
            index += 1;
        }
        self.synthetic_depth -= 1;
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.open_elements.len()).rev() {
            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            let last = index == 0;
            let node = match (&self.fragment_context, last) {
                (Some(context), true) => context,
                _ => match self.open_elements.get(index) {
                    Some(node) => node,
                    None => break,
                },
            };

            if node.namespace != Namespace::Html {
                if last {
                    break;
                }
                continue;
            }

            let mode = match node.tag_name.as_str() {
                // STEP 4: "If node is a select element, run these substeps:"
                "select" => {
                    if !last {
                        for ancestor_index in (0..index).rev() {
                            let Some(ancestor) = self.open_elements.get(ancestor_index) else {
                                break;
                            };
                            if ancestor.is_html("template") {
                                break;
                            }
                            if ancestor.is_html("table") {
                                self.insertion_mode = InsertionMode::InSelectInTable;
                                return;
                            }
                        }
                    }
                    Some(InsertionMode::InSelect)
                }
                // STEP 5: "If node is a td or th element and last is false, then
                //          switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => Some(InsertionMode::InCell),
                "tr" => Some(InsertionMode::InRow),
                "tbody" | "thead" | "tfoot" => Some(InsertionMode::InTableBody),
                "caption" => Some(InsertionMode::InCaption),
                "colgroup" => Some(InsertionMode::InColumnGroup),
                "table" => Some(InsertionMode::InTable),
                // STEP 12: "If node is a template element, then switch the
                //           insertion mode to the current template insertion
                //           mode and return."
                "template" => Some(
                    self.template_insertion_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InTemplate),
                ),
                // STEP 13: "If node is a head element and last is false, then
                //           switch the insertion mode to "in head" and return."
                "head" if !last => Some(InsertionMode::InHead),
                "body" => Some(InsertionMode::InBody),
                "frameset" => Some(InsertionMode::InFrameset),
                // STEP 16: "If node is an html element, run these substeps:"
                "html" => Some(if self.head_element.is_none() {
                    InsertionMode::BeforeHead
                } else {
                    InsertionMode::AfterHead
                }),
                _ => None,
            };

            if let Some(mode) = mode {
                self.insertion_mode = mode;
                return;
            }
            // STEP 17: "If last is true, then switch the insertion mode to "in
            //           body" and return. (fragment case)"
            if last {
                break;
            }
        }
        self.insertion_mode = InsertionMode::InBody;
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// 1. "Insert an HTML element for the token."
    /// 2. "If the algorithm that was invoked is the generic raw text element
    ///    parsing algorithm, switch the tokenizer to the RAWTEXT state;
    ///    otherwise the algorithm invoked was the generic RCDATA element
    ///    parsing algorithm, switch the tokenizer to the RCDATA state."
    /// 3. "Set the original insertion mode to the current insertion mode."
    /// 4. "Then, switch the insertion mode to "text"."
    pub(super) fn parse_text_only_element(&mut self, token: &Token, state: TokenizerState) {
        let _ = self.insert_html_element(token);
        self.tokenizer.set_state(state);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.insertion_mode = InsertionMode::Text;
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "When the steps above say the user agent is to close a p element, it
    /// means that the user agent must run the following steps:
    /// 1. Generate implied end tags, except for p elements.
    /// 2. If the current node is not a p element, then this is a parse error.
    /// 3. Pop elements from the stack of open elements until a p element has
    ///    been popped from the stack."
    pub(super) fn close_p_element(&mut self) {
        self.open_elements.generate_implied_end_tags_except("p");
        if !self.open_elements.current_is("p") {
            self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.pop_until_tag_name_popped("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_in_button_scope(&mut self) {
        if self.open_elements.has_in_button_scope("p") {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// 1. "Generate implied end tags."
    /// 2. "If the current node is not now a td element or a th element, then
    ///    this is a parse error."
    /// 3. "Pop elements from the stack of open elements stack until a td
    ///    element or a th element has been popped from the stack."
    /// 4. "Clear the list of active formatting elements up to the last marker."
    /// 5. "Switch the insertion mode to "in row"."
    pub(super) fn close_the_cell(&mut self) {
        self.open_elements.generate_implied_end_tags();
        if !self.open_elements.current_is_one_of(&["td", "th"]) {
            self.parse_error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.pop_until_one_of_popped(&["td", "th"]);
        self.active_formatting.clear_to_last_marker();
        self.insertion_mode = InsertionMode::InRow;
    }

    /// True when the parser is running the fragment parsing algorithm.
    pub(super) const fn is_fragment_case(&self) -> bool {
        self.fragment_context.is_some()
    }
}
