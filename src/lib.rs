// src/lib.rs
//! Whole-word replacement of English month names with their Arabic names.
//!
//! ```
//! use month_translate::{Translator, TranslatorOptions};
//!
//! let t = Translator::months(TranslatorOptions::default()).unwrap();
//! assert_eq!(t.translate("Mayfield reported in May."), "Mayfield reported in مايو.");
//! ```

pub mod cli;
pub mod error;
pub mod job;
pub mod literal;
pub mod table;
pub mod translator;

pub use error::{JobError, TableError};
pub use job::{default_output_path, translate_batch, translate_file, Job};
pub use literal::{BoundaryMode, LiteralPattern};
pub use table::{Replacement, ReplacementTable, ENGLISH_ARABIC_MONTHS};
pub use translator::{Collision, CollisionKind, Strategy, Translator, TranslatorOptions};
