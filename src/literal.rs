// src/literal.rs
//! Literal, word-bounded matching.
//!
//! A key is escaped before it reaches the regex engine, so it only ever
//! matches itself. Word boundaries are then asserted explicitly around each
//! candidate instead of being baked into the pattern, which keeps the two
//! concerns visible in the API and lets the caller pick ASCII or Unicode word
//! characters.

use std::borrow::Cow;
use std::ops::Range;

use regex::Regex;

use crate::error::TableError;

/// Which characters count as word characters for boundary checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// `[A-Za-z0-9_]`. Any non-ASCII character is a non-word character.
    #[default]
    Ascii,
    /// Unicode `\w`.
    Unicode,
}

impl BoundaryMode {
    pub fn is_word_char(self, c: char) -> bool {
        match self {
            BoundaryMode::Ascii => c.is_ascii() && regex_syntax::is_word_byte(c as u8),
            BoundaryMode::Unicode => regex_syntax::is_word_character(c),
        }
    }

    /// True when a word boundary sits at byte offset `at` of `text`.
    /// `at` must lie on a char boundary.
    pub fn is_boundary(self, text: &str, at: usize) -> bool {
        let before = text[..at].chars().next_back().is_some_and(|c| self.is_word_char(c));
        let after = text[at..].chars().next().is_some_and(|c| self.is_word_char(c));
        before != after
    }
}

/// An escaped literal plus the boundary mode used to accept its occurrences.
#[derive(Debug, Clone)]
pub struct LiteralPattern {
    literal: String,
    matcher: Regex,
    boundary: BoundaryMode,
}

impl LiteralPattern {
    pub fn new(literal: &str, boundary: BoundaryMode) -> Result<Self, TableError> {
        if literal.is_empty() {
            return Err(TableError::EmptySource { index: 0 });
        }
        let escaped = regex::escape(literal);
        let matcher = Regex::new(&escaped).map_err(|e| TableError::Matcher(e.to_string()))?;
        Ok(LiteralPattern {
            literal: literal.to_string(),
            matcher,
            boundary,
        })
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The escaped form handed to the regex engine.
    pub fn escaped(&self) -> &str {
        self.matcher.as_str()
    }

    /// Byte ranges of every word-bounded occurrence, left to right,
    /// non-overlapping.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(mat) = self.matcher.find_at(text, pos) else {
                break;
            };
            if self.boundary.is_boundary(text, mat.start())
                && self.boundary.is_boundary(text, mat.end())
            {
                spans.push(mat.range());
                pos = mat.end();
            } else {
                // Retry one character further so an overlapping occurrence
                // that starts inside the rejected one is still seen.
                let step = text[mat.start()..].chars().next().map_or(1, char::len_utf8);
                pos = mat.start() + step;
            }
        }
        spans
    }

    pub fn is_match_in(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }

    /// Replaces every word-bounded occurrence with `replacement`, inserted
    /// verbatim. Borrows the input when nothing matched.
    pub fn replace_all<'t>(&self, text: &'t str, replacement: &str) -> Cow<'t, str> {
        let spans = self.find_all(text);
        if spans.is_empty() {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len() + spans.len() * replacement.len());
        let mut last = 0;
        for span in spans {
            out.push_str(&text[last..span.start]);
            out.push_str(replacement);
            last = span.end;
        }
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }
}
