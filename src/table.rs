// src/table.rs
//! The replacement table: an ordered list of source → target tokens.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::error::TableError;

// ----- BUILT-IN DATA -----

/// English month names and abbreviations with their Arabic names.
/// Full name first, then abbreviations, month by month.
pub static ENGLISH_ARABIC_MONTHS: &[(&str, &str)] = &[
    ("January", "يناير"), ("Jan", "يناير"),
    ("February", "فبراير"), ("Feb", "فبراير"),
    ("March", "مارس"), ("Mar", "مارس"),
    ("April", "أبريل"), ("Apr", "أبريل"),
    ("May", "مايو"),
    ("June", "يونيو"), ("Jun", "يونيو"),
    ("July", "يوليو"), ("Jul", "يوليو"),
    ("August", "أغسطس"), ("Aug", "أغسطس"),
    ("September", "سبتمبر"), ("Sept", "سبتمبر"), ("Sep", "سبتمبر"),
    ("October", "أكتوبر"), ("Oct", "أكتوبر"),
    ("November", "نوفمبر"), ("Nov", "نوفمبر"),
    ("December", "ديسمبر"), ("Dec", "ديسمبر"),
];

static MONTHS_TABLE: Lazy<ReplacementTable> = Lazy::new(|| {
    ReplacementTable::from_pairs(ENGLISH_ARABIC_MONTHS.iter().copied())
        .unwrap_or_else(|e| panic!("built-in month table is invalid: {}", e))
});

// ----- TABLE -----

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub source: String,
    pub target: String,
}

/// Ordered, duplicate-free mapping from source token to target token.
///
/// Once handed to a [`Translator`](crate::Translator) the table is only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: Vec<Replacement>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English → Arabic month table.
    pub fn english_arabic_months() -> &'static ReplacementTable {
        &MONTHS_TABLE
    }

    pub fn from_pairs<I, S, T>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut table = Self::new();
        for (source, target) in pairs {
            table.push(source, target)?;
        }
        Ok(table)
    }

    /// Appends an entry, rejecting empty or repeated sources.
    pub fn push(&mut self, source: impl Into<String>, target: impl Into<String>) -> Result<(), TableError> {
        let source = source.into();
        if source.is_empty() {
            return Err(TableError::EmptySource { index: self.entries.len() });
        }
        if self.get(&source).is_some() {
            return Err(TableError::DuplicateSource(source));
        }
        self.entries.push(Replacement {
            source,
            target: target.into(),
        });
        Ok(())
    }

    /// Parses a JSON object of `"source": "target"` pairs. Object order is
    /// kept as table order.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let object: Map<String, Value> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (source, value) in object {
            match value {
                Value::String(target) => table.push(source, target)?,
                other => {
                    return Err(TableError::InvalidTarget {
                        source_token: source,
                        found: json_kind(&other).to_string(),
                    })
                }
            }
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path).map_err(|source| TableError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&contents)?;
        log::debug!("loaded {} replacement entries from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.target.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Replacement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReplacementTable {
    type Item = &'a Replacement;
    type IntoIter = std::slice::Iter<'a, Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
