use strum_macros::Display;

use tern_common::warning::warn_once;
use tern_dom::Namespace;

use super::formatting_elements::FormattingElementList;
use super::open_elements::{OpenElement, OpenElementStack};
use crate::error::{ParseErrorCode, ParseIssue, ParserError};
use crate::location::{Located, NodeLocations, SourceSpan};
use crate::options::ParserOptions;
use crate::tokenizer::{Preprocessor, Token, Tokenizer, TokenizerState};
use crate::tree_adapter::TreeAdapter;

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// Where a call to [`HTMLParser::run`] or [`HTMLParser::resume`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParseStatus {
    /// A [`ScriptHandler`] asked the parser to pause after a `</script>`.
    Suspended,
    /// The end-of-file token was processed. The tree is complete.
    Finished,
}

/// What a [`ScriptHandler`] wants the parser to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptAction {
    /// Keep parsing.
    #[default]
    Continue,
    /// Return [`ParseStatus::Suspended`] from the running call.
    Suspend,
}

/// What a [`ScriptHandler`] sees of the parser.
pub struct ScriptContext<'p, A: TreeAdapter> {
    adapter: &'p A,
    script: A::Handle,
    written: String,
}

impl<A: TreeAdapter> ScriptContext<'_, A> {
    /// The tree as built so far.
    pub const fn adapter(&self) -> &A {
        self.adapter
    }

    /// The `<script>` element that just closed.
    pub const fn script(&self) -> &A::Handle {
        &self.script
    }

    /// Concatenated text of the script element.
    #[must_use]
    pub fn script_text(&self) -> String {
        self.adapter
            .children(&self.script)
            .iter()
            .filter_map(|child| self.adapter.text(child))
            .collect()
    }

    /// `document.write()`: the markup is parsed right after the `</script>`
    /// end tag. Calls are concatenated in order.
    pub fn document_write(&mut self, html: &str) {
        self.written.push_str(html);
    }
}

/// Hook run whenever a `<script>` end tag closes an HTML script element.
pub trait ScriptHandler<A: TreeAdapter> {
    /// Called after the script element has been popped off the stack of open
    /// elements.
    fn on_script(&mut self, context: &mut ScriptContext<'_, A>) -> ScriptAction;
}

impl<A, F> ScriptHandler<A> for F
where
    A: TreeAdapter,
    F: FnMut(&mut ScriptContext<'_, A>) -> ScriptAction,
{
    fn on_script(&mut self, context: &mut ScriptContext<'_, A>) -> ScriptAction {
        self(context)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Ready,
    Running,
    Suspended,
    Finished,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser pulls tokens from its [`Tokenizer`] and builds a tree
/// through a [`TreeAdapter`].
pub struct HTMLParser<A: TreeAdapter> {
    pub(super) tokenizer: Tokenizer,

    pub(super) adapter: A,

    /// The Document (or DocumentFragment) everything is inserted under.
    pub(super) document: A::Handle,

    pub(super) options: ParserOptions,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// "When the insertion mode is switched to "text" or "in table text", the
    /// original insertion mode is also set. This is the insertion mode to
    /// which the tree construction stage will return."
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    ///
    /// "The current template insertion mode is the insertion mode most
    /// recently pushed onto the stack of template insertion modes."
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) open_elements: OpenElementStack<A::Handle>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting: FormattingElementList<A::Handle>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#head-element-pointer)
    pub(super) head_element: Option<A::Handle>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    ///
    /// "The form element pointer points to the last form element that was opened
    /// and whose end tag has not yet been seen."
    pub(super) form_element: Option<A::Handle>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    ///
    /// "The frameset-ok flag is set to "ok" when the parser is created. It is
    /// set to "not ok" after certain tokens are seen."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    ///
    /// "The pending table character tokens list"
    pub(super) pending_table_characters: Vec<Token>,

    /// Drop a U+000A at the start of the next token (after `<pre>`,
    /// `<listing>` and `<textarea>`).
    pub(super) skip_next_newline: bool,

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    ///
    /// The context element when parsing a fragment.
    pub(super) fragment_context: Option<OpenElement<A::Handle>>,

    /// Whether the self-closing flag of the current start tag was
    /// acknowledged.
    pub(super) self_closing_acknowledged: bool,

    /// Depth of synthesized ("act as if") token processing. Nodes created
    /// while this is non-zero get no source location.
    pub(super) synthetic_depth: usize,

    /// Name of the end tag token read from the input, while it is processed.
    pub(super) current_end_tag: Option<String>,

    /// Span of the token currently being processed.
    pub(super) token_span: SourceSpan,

    pub(super) locations: Option<NodeLocations<A::Handle>>,

    pub(super) issues: Vec<ParseIssue>,

    /// "stop parsing" was reached.
    pub(super) stopped: bool,

    script_handler: Option<Box<dyn ScriptHandler<A>>>,

    run_state: RunState,
}

impl<A: TreeAdapter> HTMLParser<A> {
    /// Create a parser for a whole document.
    ///
    /// `adapter` should hold an empty Document.
    pub fn new(adapter: A, html: &str, options: ParserOptions) -> Self {
        let tokenizer =
            Tokenizer::with_options(Preprocessor::new(html), options.tokenizer_options());
        let document = adapter.document();
        Self {
            tokenizer,
            adapter,
            document,
            options,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            open_elements: OpenElementStack::new(),
            active_formatting: FormattingElementList::new(),
            head_element: None,
            form_element: None,
            frameset_ok: true,
            foster_parenting: false,
            pending_table_characters: Vec::new(),
            skip_next_newline: false,
            fragment_context: None,
            self_closing_acknowledged: false,
            synthetic_depth: 0,
            current_end_tag: None,
            token_span: SourceSpan::default(),
            locations: options.location_info.then(NodeLocations::new),
            issues: Vec::new(),
            stopped: false,
            script_handler: None,
            run_state: RunState::Ready,
        }
    }

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Create a parser for a fragment whose context element has the local
    /// name `context`. `svg` and `math` contexts are foreign elements; every
    /// other name is an HTML element. `adapter` should hold an empty
    /// DocumentFragment.
    ///
    /// # Errors
    ///
    /// [`ParserError::InvalidContextElement`] when `context` is not a valid
    /// tag name.
    pub fn new_fragment(
        adapter: A,
        html: &str,
        context: &str,
        options: ParserOptions,
    ) -> Result<Self, ParserError> {
        let context = context.to_ascii_lowercase();
        if !is_valid_tag_name(&context) {
            let _ = warn_once("HTML Parser", "fragment context is not a valid tag name");
            return Err(ParserError::InvalidContextElement);
        }

        let mut parser = Self::new(adapter, html, options);
        let namespace = match context.as_str() {
            "svg" => Namespace::Svg,
            "math" => Namespace::MathMl,
            _ => Namespace::Html,
        };

        // STEP 1-3: "Create a new Document node, and mark it as being an HTML
        //            document." (the adapter's fragment root stands in for it)
        let context_node = parser
            .adapter
            .create_element(&context, namespace, Vec::new());

        // STEP 4: "Set the state of the HTML parser's tokenization stage as follows,
        //          switching on the context element"
        if namespace == Namespace::Html {
            let state = match context.as_str() {
                "title" | "textarea" => TokenizerState::Rcdata,
                "style" | "xmp" | "iframe" | "noembed" | "noframes" => TokenizerState::Rawtext,
                "script" => TokenizerState::ScriptData,
                "noscript" if options.scripting_enabled => TokenizerState::Rawtext,
                "plaintext" => TokenizerState::Plaintext,
                _ => TokenizerState::Data,
            };
            parser.tokenizer.set_state(state);
        }
        parser.fragment_context = Some(OpenElement::new(context_node, &context, namespace, &[]));

        // STEP 5: "Let root be the result of creating an html element..."
        // STEP 6: "Append the element root to the Document node created above."
        // STEP 7: "Set up the parser's stack of open elements so that it
        //          contains just the single element root."
        let document = parser.document.clone();
        let root = parser
            .adapter
            .create_element("html", Namespace::Html, Vec::new());
        parser.adapter.append_child(&document, &root);
        parser
            .open_elements
            .push(OpenElement::new(root, "html", Namespace::Html, &[]));

        // STEP 8: "If the context element is a template element, then push "in
        //          template" onto the stack of template insertion modes so that
        //          it is the new current template insertion mode."
        if namespace == Namespace::Html && context == "template" {
            parser
                .template_insertion_modes
                .push(InsertionMode::InTemplate);
        }

        // STEP 10: "Reset the parser's insertion mode appropriately."
        parser.reset_insertion_mode_appropriately();
        Ok(parser)
    }

    /// Install a hook that runs after each HTML `</script>`.
    #[must_use]
    pub fn with_script_handler(mut self, handler: impl ScriptHandler<A> + 'static) -> Self {
        self.script_handler = Some(Box::new(handler));
        self
    }

    /// Parse until the input is exhausted or a script handler suspends.
    ///
    /// On a suspended parser this continues like [`resume`](Self::resume).
    ///
    /// # Errors
    ///
    /// [`ParserError::AlreadyFinished`] when called after parsing finished.
    pub fn run(&mut self) -> Result<ParseStatus, ParserError> {
        if self.run_state == RunState::Finished {
            let _ = warn_once("HTML Parser", "run() called on a finished parser");
            return Err(ParserError::AlreadyFinished);
        }
        Ok(self.run_parsing_loop())
    }

    /// Continue after [`ParseStatus::Suspended`].
    ///
    /// # Errors
    ///
    /// [`ParserError::NotSuspended`] when the parser is not suspended.
    pub fn resume(&mut self) -> Result<ParseStatus, ParserError> {
        if self.run_state != RunState::Suspended {
            let _ = warn_once("HTML Parser", "resume() called while not suspended");
            return Err(ParserError::NotSuspended);
        }
        Ok(self.run_parsing_loop())
    }

    /// Splice markup into the input right after the last consumed character.
    ///
    /// # Errors
    ///
    /// [`ParserError::WriteAfterEnd`] once parsing finished.
    pub fn document_write(&mut self, html: &str) -> Result<(), ParserError> {
        if self.run_state == RunState::Finished {
            let _ = warn_once(
                "HTML Parser",
                "document_write() called after parsing finished",
            );
            return Err(ParserError::WriteAfterEnd);
        }
        self.tokenizer.insert_html_at_current_position(html);
        Ok(())
    }

    /// True once the end-of-file token was processed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.run_state == RunState::Finished
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The tree built so far.
    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The stack of open elements.
    pub const fn open_elements(&self) -> &OpenElementStack<A::Handle> {
        &self.open_elements
    }

    /// The list of active formatting elements.
    pub const fn active_formatting_elements(&self) -> &FormattingElementList<A::Handle> {
        &self.active_formatting
    }

    /// Recorded node locations, when location info is enabled.
    pub const fn locations(&self) -> Option<&NodeLocations<A::Handle>> {
        self.locations.as_ref()
    }

    /// Tokenizer and tree construction errors, in input order. Empty unless
    /// error collection is enabled.
    #[must_use]
    pub fn issues(&self) -> Vec<ParseIssue> {
        let mut issues: Vec<ParseIssue> = self
            .tokenizer
            .issues()
            .iter()
            .chain(self.issues.iter())
            .copied()
            .collect();
        issues.sort_by_key(|issue| issue.offset);
        issues
    }

    /// Finish and hand back the tree.
    ///
    /// For fragment parsers the children of the temporary `<html>` root are
    /// moved into the adapter's root node, and the `<html>` element is
    /// detached.
    pub fn into_tree(self) -> A {
        self.into_parts().0
    }

    /// Finish and hand back the tree, the recorded locations and the issues.
    pub fn into_parts(mut self) -> (A, Option<NodeLocations<A::Handle>>, Vec<ParseIssue>) {
        let issues = self.issues();
        if self.fragment_context.is_some() {
            let document = self.document.clone();
            if let Some(root) = self
                .adapter
                .children(&document)
                .into_iter()
                .find(|child| self.adapter.is_element(child))
            {
                self.adapter.move_children(&root, &document);
                self.adapter.detach(&root);
            }
        }
        (self.adapter, self.locations, issues)
    }

    /// [§ 13.2.1 Overview of the parsing model](https://html.spec.whatwg.org/multipage/parsing.html#overview-of-the-parsing-model)
    ///
    /// Pull tokens and feed them to tree construction until the end of the
    /// input or a suspension.
    fn run_parsing_loop(&mut self) -> ParseStatus {
        self.run_state = RunState::Running;
        while self.run_state == RunState::Running {
            if self.stopped {
                self.run_state = RunState::Finished;
                break;
            }

            // [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
            // "If there is an adjusted current node and it is not an element in
            // the HTML namespace, then switch to the CDATA section start state."
            self.tokenizer.allow_cdata = self
                .adjusted_current_node()
                .is_some_and(|node| node.namespace != Namespace::Html);

            let Located { value: token, span } = self.tokenizer.next_located_token();
            self.token_span = span;

            let Some(token) = self.apply_skip_newline(token) else {
                continue;
            };

            self.current_end_tag = match &token {
                Token::EndTag { name, .. } => Some(name.clone()),
                _ => None,
            };
            self.self_closing_acknowledged = false;

            self.process_token(&token);

            // "When a start tag token is emitted with its self-closing flag set,
            // if the flag is not acknowledged when it is processed by the tree
            // construction stage, that is a parse error."
            if token.is_self_closing() && !self.self_closing_acknowledged {
                self.parse_error(ParseErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus);
            }

            if token.is_eof() {
                self.stop_parsing();
            }
        }

        match self.run_state {
            RunState::Suspended => ParseStatus::Suspended,
            _ => ParseStatus::Finished,
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token and move on to the next one. (Newlines at the start
    /// of pre blocks are ignored as an authoring convenience.)"
    fn apply_skip_newline(&mut self, token: Token) -> Option<Token> {
        if !std::mem::take(&mut self.skip_next_newline) {
            return Some(token);
        }
        match token {
            Token::Whitespace { data } => {
                let rest = data.strip_prefix('\n').unwrap_or(&data);
                if rest.is_empty() {
                    None
                } else {
                    Some(Token::Whitespace {
                        data: rest.to_string(),
                    })
                }
            }
            other => Some(other),
        }
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
    ///
    /// "As each token is emitted from the tokenizer, the user agent must follow
    /// the appropriate steps from the following list, known as the tree
    /// construction dispatcher"
    pub(super) fn process_token(&mut self, token: &Token) {
        if self.uses_html_content_rules(token) {
            self.process_using_mode(self.insertion_mode, token);
        } else {
            self.handle_foreign_content(token);
        }
    }

    /// "Reprocess the token": run the dispatcher again in the (new) current
    /// insertion mode.
    pub(super) fn reprocess_token(&mut self, token: &Token) {
        self.process_token(token);
    }

    /// The dispatcher conditions under which a token is processed according
    /// to the current insertion mode rather than as foreign content.
    fn uses_html_content_rules(&self, token: &Token) -> bool {
        let Some(node) = self.adjusted_current_node() else {
            // "If the stack of open elements is empty"
            return true;
        };
        let is_character = token.character_data().is_some();
        let start_tag_name = match token {
            Token::StartTag { name, .. } => Some(name.as_str()),
            _ => None,
        };

        // "If the adjusted current node is an element in the HTML namespace"
        if node.namespace == Namespace::Html {
            return true;
        }

        // "If the adjusted current node is a MathML text integration point and
        // the token is a start tag whose tag name is neither "mglyph" nor
        // "malignmark"" / "...and the token is a character token"
        if node.is_mathml_text_integration_point()
            && (is_character
                || start_tag_name.is_some_and(|name| name != "mglyph" && name != "malignmark"))
        {
            return true;
        }

        // "If the adjusted current node is a MathML annotation-xml element and
        // the token is a start tag whose tag name is "svg""
        if node.namespace == Namespace::MathMl
            && node.tag_name == "annotation-xml"
            && start_tag_name == Some("svg")
        {
            return true;
        }

        // "If the adjusted current node is an HTML integration point and the
        // token is a start tag" / "...and the token is a character token"
        if node.html_integration_point && (is_character || start_tag_name.is_some()) {
            return true;
        }

        // "If the token is an end-of-file token"
        token.is_eof()
    }

    /// "Process the token using the rules for the X insertion mode"
    pub(super) fn process_using_mode(&mut self, mode: InsertionMode, token: &Token) {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node."
    pub(super) fn adjusted_current_node(&self) -> Option<&OpenElement<A::Handle>> {
        match &self.fragment_context {
            Some(context) if self.open_elements.len() == 1 => Some(context),
            _ => self.open_elements.current(),
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    ///
    /// "...acknowledge the token's self-closing flag"
    pub(super) const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_acknowledged = true;
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(super) fn stop_parsing(&mut self) {
        while self.open_elements.pop().is_some() {}
        self.stopped = true;
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    pub(super) fn parse_error(&mut self, code: ParseErrorCode) {
        let offset = self.token_span.start;
        log::trace!(
            target: "tern_html::parser",
            "{code} at offset {offset} (insertion mode {})",
            self.insertion_mode
        );
        if self.options.collect_errors {
            self.issues.push(ParseIssue { code, offset });
        }
    }

    /// Run the script hook for a script element that was just popped.
    pub(super) fn run_script(&mut self, script: A::Handle) {
        let Some(mut handler) = self.script_handler.take() else {
            return;
        };
        let mut context = ScriptContext {
            adapter: &self.adapter,
            script,
            written: String::new(),
        };
        let action = handler.on_script(&mut context);
        let written = context.written;
        self.script_handler = Some(handler);

        if !written.is_empty() {
            self.tokenizer.insert_html_at_current_position(&written);
        }
        if action == ScriptAction::Suspend {
            log::debug!(target: "tern_html::parser", "parser suspended by script handler");
            self.run_state = RunState::Suspended;
        }
    }
}

/// A context name usable as an element local name.
fn is_valid_tag_name(name: &str) -> bool {
    let forbidden = |c: char| c.is_ascii_whitespace() || matches!(c, '/' | '>' | '<' | '\0');
    name.starts_with(|c: char| c.is_ascii_alphabetic()) && !name.chars().any(forbidden)
}
