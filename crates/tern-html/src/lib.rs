//! HTML tokenizer and tree builder for Tern.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Input stream preprocessing (newline normalization, `document.write` splicing)
//!   - All tokenizer states, including script data and CDATA sections
//!   - Named and numeric character references
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes and the rules for foreign content
//!   - Foster parenting, the adoption agency algorithm, template contents
//!   - Fragment parsing ([WHATWG § 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments))
//!   - Suspend/resume around `</script>` via [`ScriptHandler`]
//!
//! - **Serialization** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!   and html5lib-style tree dumps.
//!
//! The tree builder talks to its output through [`TreeAdapter`]. The arena
//! [`DomTree`] from `tern-dom` is the stock implementation.
//!
//! # Example
//!
//! ```
//! let tree = tern_html::parse("<p>Hello<b>world");
//! assert_eq!(
//!     tern_html::serialize(&tree, &tree.root()),
//!     "<html><head></head><body><p>Hello<b>world</b></p></body></html>"
//! );
//! ```

/// Tree dumps in the html5lib test format.
pub mod dump;
/// Parse error codes and API errors.
pub mod error;
/// Source spans for tokens and nodes.
pub mod location;
/// Parser and tokenizer options.
pub mod options;
/// HTML parser and tree construction.
pub mod parser;
/// HTML fragment serialization.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;
/// The interface between tree construction and the tree.
pub mod tree_adapter;

use log::warn;

pub use dump::dump_tree;
pub use error::{ParseErrorCode, ParseIssue, ParserError};
pub use location::{Located, NodeLocation, NodeLocations, SourceSpan};
pub use options::{ParserOptions, TokenizerOptions};
pub use parser::{
    HTMLParser, InsertionMode, ParseStatus, ScriptAction, ScriptContext, ScriptHandler,
};
pub use serializer::{serialize, serialize_outer, serialize_with_scripting};
pub use tern_dom::{DomTree, Namespace, NodeId, QuirksMode};
pub use tokenizer::{Attribute, Preprocessor, Token, Tokenizer, TokenizerState};
pub use tree_adapter::{DoctypeView, NodeKind, TreeAdapter};

/// Parse a complete document with default options.
#[must_use]
pub fn parse(html: &str) -> DomTree {
    parse_with_options(html, ParserOptions::default())
}

/// Parse a complete document.
///
/// Script handlers are not involved, so the parser never suspends and the
/// returned tree is always complete.
#[must_use]
pub fn parse_with_options(html: &str, options: ParserOptions) -> DomTree {
    let mut parser = HTMLParser::new(DomTree::new(), html, options);
    if let Err(err) = parser.run() {
        warn!("HTML parse stopped early: {err}");
    }
    parser.into_tree()
}

/// Parse a fragment in the context of an element named `context`.
///
/// Without a context, or with one that is not a valid tag name, the fragment
/// is parsed as the contents of a `<template>`, which accepts any markup.
/// The returned tree's root is a DocumentFragment.
#[must_use]
pub fn parse_fragment(html: &str, context: Option<&str>) -> DomTree {
    let context = context.unwrap_or("template");
    match parse_fragment_with_options(html, context, ParserOptions::default()) {
        Ok(tree) => tree,
        Err(err) => {
            warn!("falling back to a template context: {err}");
            parse_fragment_with_options(html, "template", ParserOptions::default())
                .unwrap_or_else(|_| DomTree::new_fragment())
        }
    }
}

/// Parse a fragment in the context of an element named `context`.
///
/// # Errors
///
/// [`ParserError::InvalidContextElement`] when `context` is not a valid tag
/// name.
pub fn parse_fragment_with_options(
    html: &str,
    context: &str,
    options: ParserOptions,
) -> Result<DomTree, ParserError> {
    let mut parser = HTMLParser::new_fragment(DomTree::new_fragment(), html, context, options)?;
    let _ = parser.run()?;
    Ok(parser.into_tree())
}
