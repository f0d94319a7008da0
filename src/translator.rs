// src/translator.rs
//! Whole-word translation of a document against a replacement table.

use std::borrow::Cow;
use std::cmp::Reverse;
use std::fmt;

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::TableError;
use crate::literal::{BoundaryMode, LiteralPattern};
use crate::table::ReplacementTable;

/// How the rules are applied to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One replace-all pass per entry, in table order.
    #[default]
    Sequential,
    /// One left-to-right scan over all keys at once.
    SinglePass,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TranslatorOptions {
    pub boundary: BoundaryMode,
    pub strategy: Strategy,
    /// Refuse tables whose keys interfere with each other.
    pub strict: bool,
}

impl TranslatorOptions {
    pub fn boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// The earlier key occurs as a word inside the later key's source.
    Shadowed,
    /// The later key occurs as a word inside the earlier key's target.
    Chained,
}

/// A pair of table entries, by index, that break the non-overlap invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub kind: CollisionKind,
    pub earlier: usize,
    pub later: usize,
    pub earlier_source: String,
    pub later_source: String,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CollisionKind::Shadowed => write!(
                f,
                "'{}' (entry {}) matches inside '{}' (entry {})",
                self.earlier_source, self.earlier, self.later_source, self.later
            ),
            CollisionKind::Chained => write!(
                f,
                "'{}' (entry {}) matches inside the target of '{}' (entry {})",
                self.later_source, self.later, self.earlier_source, self.earlier
            ),
        }
    }
}

struct Rule {
    pattern: LiteralPattern,
    target: String,
}

/// A replacement table compiled for one boundary mode and strategy.
///
/// Holds no mutable state, so one translator can serve any number of
/// documents, including from several threads at once.
pub struct Translator {
    rules: Vec<Rule>,
    options: TranslatorOptions,
    // Only built for `Strategy::SinglePass`.
    automaton: Option<AhoCorasick>,
    collisions: Vec<Collision>,
}

impl Translator {
    pub fn new(table: ReplacementTable, options: TranslatorOptions) -> Result<Self, TableError> {
        let rules = table
            .iter()
            .enumerate()
            .map(|(index, r)| {
                let pattern = LiteralPattern::new(&r.source, options.boundary).map_err(|e| match e {
                    TableError::EmptySource { .. } => TableError::EmptySource { index },
                    other => other,
                })?;
                Ok(Rule {
                    pattern,
                    target: r.target.clone(),
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        let automaton = match options.strategy {
            Strategy::Sequential => None,
            Strategy::SinglePass if rules.is_empty() => None,
            Strategy::SinglePass => Some(
                AhoCorasick::builder()
                    // Overlapping search needs the standard semantics; the
                    // boundary filter and span selection happen afterwards.
                    .match_kind(MatchKind::Standard)
                    .build(rules.iter().map(|r| r.pattern.literal()))
                    .map_err(|e| TableError::Matcher(e.to_string()))?,
            ),
        };

        let collisions = find_collisions(&rules);
        if !collisions.is_empty() {
            if options.strict {
                return Err(TableError::Conflict(collisions));
            }
            for c in &collisions {
                log::warn!("replacement table conflict, first rule applied wins: {}", c);
            }
        }

        log::debug!(
            "compiled {} rules ({:?}, {:?} boundaries)",
            rules.len(),
            options.strategy,
            options.boundary
        );

        Ok(Translator {
            rules,
            options,
            automaton,
            collisions,
        })
    }

    /// The built-in month table with the given options.
    pub fn months(options: TranslatorOptions) -> Result<Self, TableError> {
        Self::new(ReplacementTable::english_arabic_months().clone(), options)
    }

    /// Entries that break the non-overlap invariant. Empty for a clean table.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Replaces every word-bounded, case-sensitive occurrence of a table key
    /// with its target. All other text passes through unchanged.
    pub fn translate(&self, document: &str) -> String {
        match &self.automaton {
            Some(ac) => self.translate_single_pass(ac, document),
            None => self.translate_sequential(document),
        }
    }

    fn translate_sequential(&self, document: &str) -> String {
        let mut text: Cow<'_, str> = Cow::Borrowed(document);
        for rule in &self.rules {
            let replaced = match rule.pattern.replace_all(&text, &rule.target) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(s) => s,
            };
            log::debug!("replaced '{}' -> '{}'", rule.pattern.literal(), rule.target);
            text = Cow::Owned(replaced);
        }
        text.into_owned()
    }

    fn translate_single_pass(&self, ac: &AhoCorasick, document: &str) -> String {
        let boundary = self.options.boundary;

        // 1. Every candidate occurrence that sits on word boundaries.
        let mut spans: Vec<(usize, usize, usize)> = ac
            .find_overlapping_iter(document)
            .filter(|m| boundary.is_boundary(document, m.start()) && boundary.is_boundary(document, m.end()))
            .map(|m| (m.start(), m.end(), m.pattern().as_usize()))
            .collect();

        if spans.is_empty() {
            return document.to_string();
        }

        // 2. Leftmost first, longest first on ties, then drop overlaps.
        spans.sort_by_key(|&(start, end, _)| (start, Reverse(end - start)));

        let mut out = String::with_capacity(document.len());
        let mut last = 0;
        for (start, end, rule_idx) in spans {
            if start < last {
                continue;
            }
            out.push_str(&document[last..start]);
            out.push_str(&self.rules[rule_idx].target);
            last = end;
        }
        out.push_str(&document[last..]);
        out
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("entries", &self.rules.len())
            .field("options", &self.options)
            .field("collisions", &self.collisions.len())
            .finish()
    }
}

fn find_collisions(rules: &[Rule]) -> Vec<Collision> {
    let mut found = Vec::new();
    for (i, earlier) in rules.iter().enumerate() {
        for (j, later) in rules.iter().enumerate().skip(i + 1) {
            let mut push = |kind| {
                found.push(Collision {
                    kind,
                    earlier: i,
                    later: j,
                    earlier_source: earlier.pattern.literal().to_string(),
                    later_source: later.pattern.literal().to_string(),
                })
            };
            if earlier.pattern.is_match_in(later.pattern.literal()) {
                push(CollisionKind::Shadowed);
            }
            if later.pattern.is_match_in(&earlier.target) {
                push(CollisionKind::Chained);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(strategy: Strategy) -> Translator {
        Translator::months(TranslatorOptions::default().strategy(strategy)).unwrap()
    }

    fn both() -> [Translator; 2] {
        [months(Strategy::Sequential), months(Strategy::SinglePass)]
    }

    #[test]
    fn word_boundaries_protect_longer_words() {
        for t in both() {
            assert_eq!(t.translate("Mayfield reported in May."), "Mayfield reported in مايو.");
        }
    }

    #[test]
    fn abbreviations_and_full_names() {
        for t in both() {
            assert_eq!(t.translate("Jan 5, January 6"), "يناير 5, يناير 6");
            assert_eq!(t.translate("Sep, Sept, September"), "سبتمبر, سبتمبر, سبتمبر");
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        let table = ReplacementTable::from_pairs([("May", "مايو")]).unwrap();
        let t = Translator::new(table, TranslatorOptions::default()).unwrap();
        assert_eq!(t.translate("MAY and may and May"), "MAY and may and مايو");
    }

    #[test]
    fn markup_is_passed_through() {
        let doc = r#"<span class="date" data-month="Mar">Mar 3</span><!-- Marathon -->"#;
        let expected = r#"<span class="date" data-month="مارس">مارس 3</span><!-- Marathon -->"#;
        for t in both() {
            assert_eq!(t.translate(doc), expected);
        }
    }

    #[test]
    fn no_keys_is_byte_identical() {
        let doc = "Nothing to see: 2024-01-05, MARCH, junE.\n\ttabs\r\n";
        for t in both() {
            assert_eq!(t.translate(doc), doc);
            assert_eq!(t.translate(""), "");
        }
    }

    #[test]
    fn second_pass_is_idempotent() {
        let doc = "Oct 1 – Nov 30, Dec 25 and Feb_2 and Aug.";
        for t in both() {
            let once = t.translate(doc);
            assert_eq!(t.translate(&once), once);
        }
    }

    #[test]
    fn builtin_table_has_no_collisions() {
        assert!(months(Strategy::Sequential).collisions().is_empty());
        let strict = TranslatorOptions::default().strict(true);
        assert!(Translator::months(strict).is_ok());
    }

    #[test]
    fn shadowing_is_reported_and_first_rule_wins() {
        let table = ReplacementTable::from_pairs([("York", "Y"), ("New York", "NY")]).unwrap();
        let t = Translator::new(table.clone(), TranslatorOptions::default()).unwrap();
        assert_eq!(t.collisions().len(), 1);
        assert_eq!(t.collisions()[0].kind, CollisionKind::Shadowed);
        assert_eq!(t.translate("New York"), "New Y");

        // A single pass prefers the longest match at a position.
        let sp = Translator::new(table.clone(), TranslatorOptions::default().strategy(Strategy::SinglePass)).unwrap();
        assert_eq!(sp.translate("New York"), "NY");

        let strict = Translator::new(table, TranslatorOptions::default().strict(true));
        assert!(matches!(strict, Err(TableError::Conflict(c)) if c.len() == 1));
    }

    #[test]
    fn chaining_is_reported() {
        let table = ReplacementTable::from_pairs([("Jan", "Feb"), ("Feb", "Mar")]).unwrap();
        let t = Translator::new(table.clone(), TranslatorOptions::default()).unwrap();
        assert_eq!(t.collisions()[0].kind, CollisionKind::Chained);
        assert_eq!(t.translate("Jan"), "Mar");

        let sp = Translator::new(table, TranslatorOptions::default().strategy(Strategy::SinglePass)).unwrap();
        assert_eq!(sp.translate("Jan"), "Feb");
    }

    #[test]
    fn empty_table_is_identity() {
        for strategy in [Strategy::Sequential, Strategy::SinglePass] {
            let t = Translator::new(ReplacementTable::new(), TranslatorOptions::default().strategy(strategy)).unwrap();
            assert_eq!(t.translate("May"), "May");
        }
    }

    #[test]
    fn unicode_boundaries_reject_letters_outside_ascii() {
        let uni = Translator::months(TranslatorOptions::default().boundary(BoundaryMode::Unicode)).unwrap();
        let asc = months(Strategy::Sequential);
        assert_eq!(uni.translate("éMay May"), "éMay مايو");
        assert_eq!(asc.translate("éMay May"), "éمايو مايو");
    }

    #[test]
    fn translator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Translator>();
    }
}
