//! # Finch search-box grammar
//!
//! `finch-syntax` turns the raw contents of a search box into a flat sequence
//! of clause nodes so the rest of the search pipeline can attach semantics
//! (operator roles, filter resolution) without re-deriving the tokenization
//! rules. The grammar is deliberately flat: there is no parenthesized
//! grouping, only whitespace-separated clauses.
//!
//! ## Example
//! ```
//! use finch_syntax::{parse_query, ClauseBody};
//!
//! let parsed = parse_query("+from:@alice -is:reblog \"good morning\"").unwrap();
//! assert_eq!(parsed.clauses.len(), 3);
//! assert_eq!(parsed.clauses[0].operator, Some('+'));
//! assert_eq!(parsed.clauses[0].prefix.as_deref(), Some("from"));
//! assert_eq!(parsed.clauses[0].body, ClauseBody::Term("@alice".into()));
//! assert_eq!(
//!     parsed.clauses[2].body,
//!     ClauseBody::Phrase(vec!["good".into(), "morning".into()])
//! );
//! ```

use std::fmt;

/// Hard cap on the accepted input length. Queries come straight from a
/// text box; nothing legitimate needs more than this.
pub const MAX_QUERY_BYTES: usize = 1024;

/// Reserved words that switch a clause from free-text matching to structured
/// filtering when immediately followed by `:`.
pub const PREFIX_KEYWORDS: [&str; 6] = ["is", "has", "since", "until", "from", "scope"];

/// Parses a search string into its clause sequence.
///
/// The whole input must be consumed; a non-match anywhere is a hard failure
/// with no partial result.
///
/// ```
/// use finch_syntax::parse_query;
/// assert!(parse_query("").unwrap().is_empty());
/// assert!(parse_query("\"unterminated").is_err());
/// ```
pub fn parse_query(input: &str) -> Result<ParsedQuery, ParseError> {
    if input.len() > MAX_QUERY_BYTES {
        return Err(ParseError {
            message: format!("query exceeds {MAX_QUERY_BYTES} bytes"),
            position: MAX_QUERY_BYTES,
        });
    }
    Parser::new(input).parse()
}

/// User input normalized into a flat clause sequence, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub clauses: Vec<ClauseNode>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// One whitespace-delimited clause: an optional `+`/`-` operator symbol, an
/// optional prefix keyword, and exactly one body.
///
/// The operator and prefix are carried through as raw text so the compiler
/// downstream can fail explicitly on symbols it does not recognize instead of
/// silently defaulting, should the grammar ever be relaxed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseNode {
    pub operator: Option<char>,
    pub prefix: Option<String>,
    pub body: ClauseBody,
}

/// The matchable payload of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseBody {
    /// A bare word: one or more characters excluding whitespace, `"`, `:`.
    ///
    /// ```
    /// use finch_syntax::{parse_query, ClauseBody};
    /// let parsed = parse_query("hello").unwrap();
    /// assert_eq!(parsed.clauses[0].body, ClauseBody::Term("hello".into()));
    /// ```
    Term(String),
    /// A colon-wrapped token such as `:smile:`, stored without the colons.
    /// The closing colon is optional at the end of a clause; `:smile` is
    /// accepted as the same shortcode.
    ///
    /// ```
    /// use finch_syntax::{parse_query, ClauseBody};
    /// let parsed = parse_query(":smile").unwrap();
    /// assert_eq!(parsed.clauses[0].body, ClauseBody::Shortcode("smile".into()));
    /// ```
    Shortcode(String),
    /// A double-quoted phrase, stored as its individual words. Runs of inner
    /// whitespace only separate words; they are not preserved.
    Phrase(Vec<String>),
}

/// Error with the byte position the parser gave up at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (byte {})", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

/// Hand-rolled recursive descent because the language is tiny and the
/// backtracking points are few and deliberate. Each `parse_*` routine either
/// consumes a full production or restores `pos` and reports no match; once a
/// clause's optional operator/prefix have matched they are committed, so a
/// body failure fails the clause as a whole.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<ParsedQuery, ParseError> {
        let mut clauses = Vec::new();
        while let Some(clause) = self.parse_clause() {
            clauses.push(clause);
            self.skip_ws();
        }
        if !self.eof() {
            return Err(self.error("unexpected character"));
        }
        Ok(ParsedQuery { clauses })
    }

    fn parse_clause(&mut self) -> Option<ClauseNode> {
        let start = self.pos;
        let operator = match self.peek_char() {
            Some(ch @ ('+' | '-')) => {
                self.advance_char();
                Some(ch)
            }
            _ => None,
        };
        let prefix = self.parse_prefix();
        match self.parse_body() {
            Some(body) => Some(ClauseNode {
                operator,
                prefix,
                body,
            }),
            None => {
                self.pos = start;
                None
            }
        }
    }

    // A prefix is a keyword with the colon immediately attached; `isx:` or a
    // bare `is` without the colon never match and fall through to the body
    // productions.
    fn parse_prefix(&mut self) -> Option<String> {
        let rest = self.remaining();
        for keyword in PREFIX_KEYWORDS {
            if let Some(after) = rest.strip_prefix(keyword)
                && after.starts_with(':')
            {
                self.pos += keyword.len() + 1;
                return Some(keyword.to_string());
            }
        }
        None
    }

    // Ordered choice: phrase before term keeps a quoted string from being
    // split, term before shortcode prefers the literal-word reading when the
    // colon is not in leading position.
    fn parse_body(&mut self) -> Option<ClauseBody> {
        if let Some(words) = self.parse_phrase() {
            return Some(ClauseBody::Phrase(words));
        }
        if let Some(term) = self.parse_term() {
            return Some(ClauseBody::Term(term));
        }
        self.parse_shortcode().map(ClauseBody::Shortcode)
    }

    fn parse_term(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if !is_term_char(ch) {
                break;
            }
            self.advance_char();
        }
        if self.pos == start {
            None
        } else {
            Some(self.input[start..self.pos].to_string())
        }
    }

    fn parse_phrase(&mut self) -> Option<Vec<String>> {
        if self.peek_char() != Some('"') {
            return None;
        }
        let start = self.pos;
        self.advance_char();
        let mut words = Vec::new();
        while let Some(word) = self.parse_term() {
            words.push(word);
            self.skip_ws();
        }
        // Anything other than the closing quote here (a colon, end of input)
        // invalidates the whole phrase; there is no lenient reading.
        if self.peek_char() == Some('"') {
            self.advance_char();
            Some(words)
        } else {
            self.pos = start;
            None
        }
    }

    fn parse_shortcode(&mut self) -> Option<String> {
        if self.peek_char() != Some(':') {
            return None;
        }
        let start = self.pos;
        self.advance_char();
        let Some(name) = self.parse_term() else {
            self.pos = start;
            return None;
        };
        // Closing colon is optional so a trailing `:foo` still reads as a
        // shortcode. Saved queries rely on this leniency.
        if self.peek_char() == Some(':') {
            self.advance_char();
        }
        Some(name)
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance_char();
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            position: self.pos,
        }
    }
}

fn is_term_char(ch: char) -> bool {
    !ch.is_whitespace() && ch != '"' && ch != ':'
}
