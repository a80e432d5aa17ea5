//! Source location tracking.
//!
//! Location info is opt-in. When enabled, the tokenizer pairs every token with
//! the span of input it was produced from, and the parser records the spans
//! of the tokens that created each node.
//!
//! Offsets count UTF-16 code units of the raw input, before
//! newline normalization.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// A half-open range `start..end` of input offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceSpan {
    /// Offset of the first code unit.
    pub start: usize,
    /// Offset one past the last code unit.
    pub end: usize,
}

impl SourceSpan {
    /// Create a span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of code units covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True for an empty span (such as the one for the end-of-file token).
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

/// A value paired with the span of input it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Located<T> {
    /// The wrapped value.
    pub value: T,
    /// Where it came from.
    pub span: SourceSpan,
}

impl<T> Located<T> {
    /// Wrap a value.
    pub const fn new(value: T, span: SourceSpan) -> Self {
        Self { value, span }
    }

    /// Discard the location.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Where a node came from in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeLocation {
    /// Span of the start tag (for elements) or of the originating token.
    /// For text nodes built from several tokens this covers all of them.
    pub span: SourceSpan,
    /// Span of the end tag that closed the element, when one was seen.
    pub end_tag: Option<SourceSpan>,
}

/// Locations recorded by the parser, keyed by tree handle.
///
/// Implicitly created nodes (an `<html>` with no start tag, say) have no entry.
#[derive(Debug, Clone)]
pub struct NodeLocations<H> {
    locations: HashMap<H, NodeLocation>,
}

impl<H: Eq + Hash> NodeLocations<H> {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locations: HashMap::new(),
        }
    }

    /// Location of a node, if it originated from input.
    #[must_use]
    pub fn get(&self, node: &H) -> Option<&NodeLocation> {
        self.locations.get(node)
    }

    /// Number of located nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub(crate) fn record(&mut self, node: H, span: SourceSpan) {
        let _ = self.locations.insert(
            node,
            NodeLocation {
                span,
                end_tag: None,
            },
        );
    }

    /// Grow an existing entry to also cover `span` (used when text coalesces),
    /// or insert a new one.
    pub(crate) fn extend(&mut self, node: H, span: SourceSpan) {
        let _ = self
            .locations
            .entry(node)
            .and_modify(|location| {
                location.span.start = location.span.start.min(span.start);
                location.span.end = location.span.end.max(span.end);
            })
            .or_insert(NodeLocation {
                span,
                end_tag: None,
            });
    }

    pub(crate) fn set_end_tag(&mut self, node: &H, span: SourceSpan) {
        if let Some(location) = self.locations.get_mut(node) {
            location.end_tag = Some(span);
        }
    }
}

impl<H: Eq + Hash> Default for NodeLocations<H> {
    fn default() -> Self {
        Self::new()
    }
}
