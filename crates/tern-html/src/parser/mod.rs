//! HTML tree construction.
//!
//! Implements [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//! of the WHATWG HTML Living Standard: all 23 insertion modes, the rules for
//! foreign content, foster parenting, the adoption agency algorithm and the
//! fragment parsing algorithm. The parser builds its tree through a
//! [`TreeAdapter`](crate::tree_adapter::TreeAdapter).

/// The adoption agency algorithm and "any other end tag".
mod adoption_agency;
/// "after body", "in frameset" and the other trailing modes.
mod after;
/// The parser state, driver loop and tree construction dispatcher.
mod core;
/// DOCTYPE classification.
pub mod doctype;
/// Foreign content name and attribute tables.
pub mod foreign_content;
/// The list of active formatting elements.
pub mod formatting_elements;
/// The modes before `<body>`, plus "text".
mod head;
/// "in body".
mod in_body;
/// Rules for parsing tokens in foreign content.
mod in_foreign_content;
/// "in select" and "in select in table".
mod in_select;
/// The table modes.
mod in_table;
/// "in template".
mod in_template;
/// Node creation and insertion helpers.
mod insertion;
/// The stack of open elements.
pub mod open_elements;

pub use self::core::{
    HTMLParser, InsertionMode, ParseStatus, ScriptAction, ScriptContext, ScriptHandler,
};
pub use formatting_elements::{FormattingElementList, FormattingEntry};
pub use open_elements::{OpenElement, OpenElementStack};
