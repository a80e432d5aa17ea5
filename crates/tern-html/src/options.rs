//! Parser and tokenizer configuration.

/// Options for [`Tokenizer`](crate::tokenizer::Tokenizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizerOptions {
    /// Retain every parse error as a [`ParseIssue`](crate::ParseIssue).
    pub collect_errors: bool,
    /// Compute source spans for emitted tokens. When off, every span is empty.
    pub location_info: bool,
}

impl TokenizerOptions {
    /// Enable or disable error collection.
    #[must_use]
    pub const fn with_collect_errors(mut self, enabled: bool) -> Self {
        self.collect_errors = enabled;
        self
    }

    /// Enable or disable location tracking.
    #[must_use]
    pub const fn with_location_info(mut self, enabled: bool) -> Self {
        self.location_info = enabled;
        self
    }
}

/// Options for [`HTMLParser`](crate::HTMLParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    ///
    /// Controls how `<noscript>` is parsed. Defaults to enabled.
    pub scripting_enabled: bool,
    /// Record source spans for nodes. See [`NodeLocations`](crate::location::NodeLocations).
    pub location_info: bool,
    /// Retain every parse error as a [`ParseIssue`](crate::ParseIssue).
    pub collect_errors: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            scripting_enabled: true,
            location_info: false,
            collect_errors: false,
        }
    }
}

impl ParserOptions {
    /// Enable or disable the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting_enabled = enabled;
        self
    }

    /// Enable or disable location tracking.
    #[must_use]
    pub const fn with_location_info(mut self, enabled: bool) -> Self {
        self.location_info = enabled;
        self
    }

    /// Enable or disable error collection.
    #[must_use]
    pub const fn with_collect_errors(mut self, enabled: bool) -> Self {
        self.collect_errors = enabled;
        self
    }

    /// The subset of options the tokenizer needs.
    #[must_use]
    pub const fn tokenizer_options(&self) -> TokenizerOptions {
        TokenizerOptions {
            collect_errors: self.collect_errors,
            location_info: self.location_info,
        }
    }
}
