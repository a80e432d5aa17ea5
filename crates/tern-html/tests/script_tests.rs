//! Integration tests for script handling, suspension and `document.write`.

use std::cell::RefCell;
use std::rc::Rc;

use tern_html::{
    DomTree, HTMLParser, NodeId, ParseStatus, ParserError, ParserOptions, ScriptAction,
    ScriptContext, ScriptHandler, serialize,
};

/// Suspends after every script whose text is "pause".
struct PauseOnScript;

impl ScriptHandler<DomTree> for PauseOnScript {
    fn on_script(&mut self, context: &mut ScriptContext<'_, DomTree>) -> ScriptAction {
        if context.script_text() == "pause" {
            ScriptAction::Suspend
        } else {
            ScriptAction::Continue
        }
    }
}

/// Writes the script text back into the document as markup.
struct EchoScript {
    seen: Rc<RefCell<Vec<String>>>,
}

impl ScriptHandler<DomTree> for EchoScript {
    fn on_script(&mut self, context: &mut ScriptContext<'_, DomTree>) -> ScriptAction {
        let text = context.script_text();
        self.seen.borrow_mut().push(text.clone());
        context.document_write(&text);
        ScriptAction::Continue
    }
}

/// Helper to serialize the body of a tree
fn body_html(tree: &DomTree) -> String {
    tree.body()
        .map(|body| serialize(tree, &body))
        .unwrap_or_default()
}

/// Helper to check for an element by tag name
fn has_element(tree: &DomTree, from: NodeId, tag: &str) -> bool {
    tree.as_element(from).is_some_and(|d| d.tag_name == tag)
        || tree
            .children(from)
            .iter()
            .any(|&child| has_element(tree, child, tag))
}

#[test]
fn test_suspend_and_resume() {
    let mut parser = HTMLParser::new(
        DomTree::new(),
        "<script>pause</script><p>after</p>",
        ParserOptions::default(),
    )
    .with_script_handler(PauseOnScript);

    assert_eq!(parser.run(), Ok(ParseStatus::Suspended));
    assert!(!parser.is_finished());
    assert!(!has_element(parser.adapter(), NodeId::ROOT, "p"));

    assert_eq!(parser.resume(), Ok(ParseStatus::Finished));
    assert!(parser.is_finished());
    assert!(has_element(parser.adapter(), NodeId::ROOT, "p"));
}

#[test]
fn test_document_write_while_suspended() {
    let mut parser = HTMLParser::new(
        DomTree::new(),
        "<body><script>pause</script><p>after</p>",
        ParserOptions::default(),
    )
    .with_script_handler(PauseOnScript);

    assert_eq!(parser.run(), Ok(ParseStatus::Suspended));
    assert_eq!(parser.document_write("<b>written</b>"), Ok(()));
    assert_eq!(parser.resume(), Ok(ParseStatus::Finished));

    let tree = parser.into_tree();
    assert_eq!(
        body_html(&tree),
        "<script>pause</script><b>written</b><p>after</p>"
    );
}

#[test]
fn test_document_write_from_handler() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut parser = HTMLParser::new(
        DomTree::new(),
        "<body><script><i>1</i></script>!",
        ParserOptions::default(),
    )
    .with_script_handler(EchoScript {
        seen: Rc::clone(&seen),
    });

    assert_eq!(parser.run(), Ok(ParseStatus::Finished));
    assert_eq!(seen.borrow().as_slice(), ["<i>1</i>"]);
    let tree = parser.into_tree();
    assert_eq!(body_html(&tree), "<script><i>1</i></script><i>1</i>!");
}

#[test]
fn test_misuse_is_reported() {
    let mut parser = HTMLParser::new(DomTree::new(), "<p>x", ParserOptions::default());
    assert_eq!(parser.resume(), Err(ParserError::NotSuspended));
    assert_eq!(parser.run(), Ok(ParseStatus::Finished));
    assert_eq!(parser.run(), Err(ParserError::AlreadyFinished));
    assert_eq!(parser.resume(), Err(ParserError::NotSuspended));
    assert_eq!(
        parser.document_write("<p>"),
        Err(ParserError::WriteAfterEnd)
    );
}

#[test]
fn test_svg_script_does_not_run_handler() {
    let mut parser = HTMLParser::new(
        DomTree::new(),
        "<svg><script>pause</script></svg><p>x",
        ParserOptions::default(),
    )
    .with_script_handler(PauseOnScript);
    assert_eq!(parser.run(), Ok(ParseStatus::Finished));
}
