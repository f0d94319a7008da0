// src/error.rs
//! Error types for table construction and file jobs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::translator::Collision;

/// Errors raised while building a replacement table or compiling it into a
/// translator.
#[derive(Debug, Error)]
pub enum TableError {
    /// A source token was empty. It would match at every word boundary.
    #[error("entry {index} has an empty source token")]
    EmptySource { index: usize },

    /// The same source token appeared twice.
    #[error("duplicate source token '{0}'")]
    DuplicateSource(String),

    /// A table file mapped a source to something other than a string.
    #[error("target for '{source_token}' must be a string, found {found}")]
    InvalidTarget { source_token: String, found: String },

    /// The table file could not be read.
    #[error("failed to read table file {}: {source}", path.display())]
    Load { path: PathBuf, source: io::Error },

    /// The table file is not a JSON object.
    #[error("failed to parse table: {0}")]
    Parse(#[from] serde_json::Error),

    /// A matcher could not be compiled (size limits only; keys are escaped).
    #[error("failed to compile matcher: {0}")]
    Matcher(String),

    /// Strict mode found keys that interfere with each other.
    #[error("table has {} conflicting entries: {}", .0.len(), describe(.0))]
    Conflict(Vec<Collision>),
}

fn describe(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from a single read → translate → write job.
///
/// Read and write failures are kept apart so callers can report them with
/// distinct exit codes.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Error reading input file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error writing output file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Output and input name the same file.
    #[error("refusing to overwrite input file {} in place", path.display())]
    InPlace { path: PathBuf },
}

impl JobError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            JobError::Read { .. } => 2,
            JobError::Write { .. } => 3,
            JobError::InPlace { .. } => 1,
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, JobError::Read { .. })
    }

    pub fn is_write(&self) -> bool {
        matches!(self, JobError::Write { .. })
    }
}
