//! Input stream preprocessing.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "The input stream consists of the characters pushed into it as the input
//! byte stream is decoded or from the various APIs that directly manipulate
//! the input stream."
//!
//! The stream is held as UTF-16 code units so that offsets match the ones a
//! DOM exposes and so that lone surrogates written through
//! [`Preprocessor::from_utf16`] or [`Preprocessor::insert_at_current_position`]
//! can be detected and replaced.

/// U+FFFD REPLACEMENT CHARACTER
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

const CARRIAGE_RETURN: u16 = 0x0D;
const LINE_FEED: u16 = 0x0A;

/// Normalizes the raw input into the code point stream the tokenizer reads.
///
/// - "Before the tokenization stage, the input stream must be preprocessed by
///   normalizing newlines": CR LF pairs and lone CRs become a single LF.
/// - Surrogate pairs are decoded into one code point; lone surrogates become
///   U+FFFD.
/// - [`retreat`](Self::retreat) steps back exactly one logical code point,
///   skipping over the second half of a decoded pair and over a dropped LF.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    html: Vec<u16>,
    /// Index of the next code unit to read.
    pos: usize,
    /// Start offset of the code point most recently returned by `advance`.
    last_char_start: usize,
    /// Code units that were stepped over without producing a code point of
    /// their own (low surrogates of decoded pairs, LFs of CR LF pairs).
    gaps: Vec<usize>,
    /// Set after a CR so that an immediately following LF is dropped.
    skip_next_newline: bool,
    /// Set when the most recent `advance` returned `None`.
    read_past_end: bool,
}

impl Preprocessor {
    /// Create a preprocessor over a Rust string.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::from_utf16(input.encode_utf16().collect())
    }

    /// Create a preprocessor over raw UTF-16 code units, which may contain
    /// unpaired surrogates.
    #[must_use]
    pub const fn from_utf16(html: Vec<u16>) -> Self {
        Self {
            html,
            pos: 0,
            last_char_start: 0,
            gaps: Vec::new(),
            skip_next_newline: false,
            read_past_end: false,
        }
    }

    /// Offset (in code units) of the next code unit to be read.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Offset (in code units) where the most recently returned code point starts.
    #[must_use]
    pub const fn last_char_start(&self) -> usize {
        self.last_char_start
    }

    /// True once every code unit has been read.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.html.len()
    }

    /// Read the next normalized code point, or `None` at end of input.
    pub fn advance(&mut self) -> Option<char> {
        loop {
            let Some(&unit) = self.html.get(self.pos) else {
                self.read_past_end = true;
                return None;
            };
            self.read_past_end = false;
            self.last_char_start = self.pos;
            self.pos += 1;

            // "U+000D CARRIAGE RETURN (CR) code points that are immediately
            // followed by a U+000A LINE FEED (LF) code point" are removed.
            if self.skip_next_newline && unit == LINE_FEED {
                self.skip_next_newline = false;
                self.gaps.push(self.pos - 1);
                continue;
            }

            // "replacing every remaining U+000D CR code point with a U+000A LF
            // code point."
            if unit == CARRIAGE_RETURN {
                self.skip_next_newline = true;
                return Some('\n');
            }
            self.skip_next_newline = false;

            return Some(self.decode(unit));
        }
    }

    fn decode(&mut self, unit: u16) -> char {
        if (0xD800..=0xDBFF).contains(&unit)
            && let Some(&low) = self.html.get(self.pos)
            && (0xDC00..=0xDFFF).contains(&low)
        {
            self.gaps.push(self.pos);
            self.pos += 1;
            let code_point =
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(code_point).unwrap_or(REPLACEMENT_CHARACTER);
        }
        char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHARACTER)
    }

    /// Step back one logical code point, so the next [`advance`](Self::advance)
    /// returns it again.
    ///
    /// After an `advance` that returned `None`, this undoes only that read.
    pub fn retreat(&mut self) {
        if self.read_past_end {
            self.read_past_end = false;
            return;
        }
        if self.pos == 0 {
            return;
        }
        self.pos -= 1;
        while self.pos > 0 && self.gaps.last() == Some(&self.pos) {
            let _ = self.gaps.pop();
            self.pos -= 1;
        }
        self.skip_next_newline = false;
    }

    /// Step back `count` logical code points.
    pub fn retreat_by(&mut self, count: usize) {
        for _ in 0..count {
            self.retreat();
        }
    }

    /// Look at the next code point without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        let saved_skip = self.skip_next_newline;
        let saved_start = self.last_char_start;
        let saved_pos = self.pos;
        let saved_gaps = self.gaps.len();
        let saved_past_end = self.read_past_end;
        let c = self.advance();
        self.read_past_end = saved_past_end;
        self.pos = saved_pos;
        self.gaps.truncate(saved_gaps);
        self.skip_next_newline = saved_skip;
        self.last_char_start = saved_start;
        c
    }

    /// [§ 8.4.3 document.write()](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#document.write())
    ///
    /// "Insert input into the input stream just before the insertion point."
    ///
    /// The text is spliced in immediately after the current read position.
    pub fn insert_at_current_position(&mut self, html: &str) {
        let chunk: Vec<u16> = html.encode_utf16().collect();
        self.read_past_end = false;
        let _ = self.html.splice(self.pos..self.pos, chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(pre: &mut Preprocessor) -> String {
        std::iter::from_fn(|| pre.advance()).collect()
    }

    #[test]
    fn test_newline_normalization() {
        let mut pre = Preprocessor::new("a\r\nb\rc\n\rd");
        assert_eq!(drain(&mut pre), "a\nb\nc\n\nd");
    }

    #[test]
    fn test_surrogate_pair_is_one_code_point() {
        let mut pre = Preprocessor::new("x\u{1F600}y");
        assert_eq!(pre.advance(), Some('x'));
        assert_eq!(pre.advance(), Some('\u{1F600}'));
        assert_eq!(pre.position(), 3);
        pre.retreat();
        assert_eq!(pre.position(), 1);
        assert_eq!(pre.advance(), Some('\u{1F600}'));
        assert_eq!(pre.advance(), Some('y'));
    }

    #[test]
    fn test_lone_surrogate_is_replaced() {
        let mut pre = Preprocessor::from_utf16(vec![0x61, 0xD800, 0x62, 0xDC00]);
        assert_eq!(drain(&mut pre), "a\u{FFFD}b\u{FFFD}");
    }

    #[test]
    fn test_retreat_over_crlf() {
        let mut pre = Preprocessor::new("\r\nx");
        assert_eq!(pre.advance(), Some('\n'));
        assert_eq!(pre.advance(), Some('x'));
        pre.retreat();
        assert_eq!(pre.advance(), Some('x'));
        pre.retreat_by(2);
        assert_eq!(drain(&mut pre), "\nx");
    }

    #[test]
    fn test_retreat_after_end_of_input_after_crlf() {
        let mut pre = Preprocessor::new("a\r\n");
        assert_eq!(pre.advance(), Some('a'));
        assert_eq!(pre.advance(), Some('\n'));
        assert_eq!(pre.advance(), None);
        pre.retreat();
        assert_eq!(pre.advance(), None);
        pre.retreat_by(2);
        assert_eq!(drain(&mut pre), "\n");
    }

    #[test]
    fn test_retreat_after_end_of_input() {
        let mut pre = Preprocessor::new("ab");
        assert_eq!(drain(&mut pre), "ab");
        pre.retreat();
        assert_eq!(pre.peek(), None);
        pre.retreat();
        assert_eq!(drain(&mut pre), "b");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut pre = Preprocessor::new("ab");
        assert_eq!(pre.peek(), Some('a'));
        assert_eq!(pre.advance(), Some('a'));
        assert_eq!(pre.peek(), Some('b'));
        assert_eq!(pre.advance(), Some('b'));
        assert_eq!(pre.peek(), None);
    }

    #[test]
    fn test_insert_at_current_position() {
        let mut pre = Preprocessor::new("<b>c");
        assert_eq!(pre.advance(), Some('<'));
        assert_eq!(pre.advance(), Some('b'));
        assert_eq!(pre.advance(), Some('>'));
        pre.insert_at_current_position("XY");
        assert_eq!(drain(&mut pre), "XYc");
    }
}
