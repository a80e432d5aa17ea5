//! Parse error codes and parser API errors.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not. Certain points in the parsing
//! algorithm are said to be parse errors. The error handling for parse errors
//! is well-defined."
//!
//! Parse errors never stop parsing. They are logged at `trace` level and, when
//! requested through the options, collected as [`ParseIssue`]s. The only hard
//! failures are [`ParserError`]s, raised when the embedding code misuses the
//! suspend/resume API.

use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Error codes for recoverable parse errors.
///
/// Tokenizer codes are the ones WHATWG names in § 13.2.2; tree construction
/// codes follow the same naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorCode {
    // Tokenization
    /// `<!-->` or `<!--->`
    AbruptClosingOfEmptyComment,
    /// `>` inside a DOCTYPE public identifier
    AbruptDoctypePublicIdentifier,
    /// `>` inside a DOCTYPE system identifier
    AbruptDoctypeSystemIdentifier,
    /// `&#` or `&#x` without digits
    AbsenceOfDigitsInNumericCharacterReference,
    /// `<![CDATA[` outside foreign content
    CdataInHtmlContent,
    /// Numeric reference above U+10FFFF
    CharacterReferenceOutsideUnicodeRange,
    /// A control character other than whitespace or NULL in the input
    ControlCharacterInInputStream,
    /// Numeric reference to a control character
    ControlCharacterReference,
    /// The same attribute name twice on one tag
    DuplicateAttribute,
    /// Attributes on an end tag
    EndTagWithAttributes,
    /// `</br/>`
    EndTagWithTrailingSolidus,
    /// `<` at end of input
    EofBeforeTagName,
    /// End of input inside a CDATA section
    EofInCdata,
    /// End of input inside a comment
    EofInComment,
    /// End of input inside a DOCTYPE
    EofInDoctype,
    /// End of input inside an escaped script comment
    EofInScriptHtmlCommentLikeText,
    /// End of input inside a tag
    EofInTag,
    /// `--!>`
    IncorrectlyClosedComment,
    /// `<!` not followed by `--`, DOCTYPE or CDATA
    IncorrectlyOpenedComment,
    /// Junk after a DOCTYPE name
    InvalidCharacterSequenceAfterDoctypeName,
    /// `</` or `<` followed by a non-letter
    InvalidFirstCharacterOfTagName,
    /// `<a b=>`
    MissingAttributeValue,
    /// `<!DOCTYPE>`
    MissingDoctypeName,
    /// `PUBLIC` keyword without an identifier
    MissingDoctypePublicIdentifier,
    /// `SYSTEM` keyword without an identifier
    MissingDoctypeSystemIdentifier,
    /// `</>`
    MissingEndTagName,
    /// Public identifier without quotes
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// System identifier without quotes
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// `&amp` without `;`
    MissingSemicolonAfterCharacterReference,
    /// `PUBLIC"`
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `SYSTEM"`
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `<!DOCTYPEhtml>`
    MissingWhitespaceBeforeDoctypeName,
    /// `<a b="c"d>`
    MissingWhitespaceBetweenAttributes,
    /// Public and system identifiers not separated by whitespace
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `<!--` inside a comment
    NestedComment,
    /// A noncharacter code point in the input
    NoncharacterInInputStream,
    /// Numeric reference to a noncharacter
    NoncharacterCharacterReference,
    /// `<div/>`
    NonVoidHtmlElementStartTagWithTrailingSolidus,
    /// `&#0;`
    NullCharacterReference,
    /// Numeric reference to a surrogate
    SurrogateCharacterReference,
    /// Junk after a DOCTYPE system identifier
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// `"`, `'` or `<` in an attribute name
    UnexpectedCharacterInAttributeName,
    /// `"`, `'`, `<`, `=` or `` ` `` in an unquoted attribute value
    UnexpectedCharacterInUnquotedAttributeValue,
    /// `<a =b>`
    UnexpectedEqualsSignBeforeAttributeName,
    /// U+0000 in the input
    UnexpectedNullCharacter,
    /// `<?`
    UnexpectedQuestionMarkInsteadOfTagName,
    /// `<a / b>`
    UnexpectedSolidusInTag,
    /// `&unknown;`
    UnknownNamedCharacterReference,

    // Tree construction
    /// The first token was not a DOCTYPE
    MissingDoctype,
    /// A DOCTYPE that is not `<!DOCTYPE html>` or a permitted legacy form
    NonConformingDoctype,
    /// A DOCTYPE after the initial insertion mode
    MisplacedDoctype,
    /// A start tag that is not allowed where it appeared
    UnexpectedStartTag,
    /// An end tag with no matching open element, or not allowed where it appeared
    UnexpectedEndTag,
    /// Non-whitespace text that is not allowed where it appeared
    UnexpectedCharacter,
    /// Text or elements moved in front of a table
    FosterParentedContent,
    /// A formatting end tag that required the adoption agency algorithm
    MisnestedFormattingElement,
    /// An element closed while it still had open descendants
    ClosingOfElementWithOpenChildElements,
    /// End of input with elements still open that required an end tag
    OpenElementsLeftAfterEof,
    /// Anything else in foreign content that breaks out to HTML
    UnexpectedTokenInForeignContent,
}

/// A recorded parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// Which error occurred.
    pub code: ParseErrorCode,
    /// Input offset (UTF-16 code units) where the error was detected.
    pub offset: usize,
}

/// Misuse of the parser API by the embedding code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// `resume()` was called on a parser that is not suspended.
    #[error("parser is not suspended")]
    NotSuspended,
    /// The parser already reached end of input.
    #[error("parser has already finished")]
    AlreadyFinished,
    /// `document_write()` was called after the parser finished.
    #[error("cannot write to a parser that has finished")]
    WriteAfterEnd,
    /// The context element for fragment parsing is not an element.
    #[error("fragment context must be an element")]
    InvalidContextElement,
}
