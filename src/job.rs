// src/job.rs
//! Reading, translating and writing whole files.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::JobError;
use crate::translator::Translator;

/// One input file and where its translation goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Job {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Output next to the input, named by [`default_output_path`].
    pub fn with_suffix(input: impl Into<PathBuf>, suffix: &str) -> Self {
        let input = input.into();
        let output = default_output_path(&input, suffix);
        Job { input, output }
    }
}

/// `dir/name.ext` becomes `dir/name_<suffix>.ext`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or(input.as_os_str()));
    name.push("_");
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Reads `input`, translates it and writes the result to `output`.
///
/// Nothing is written when reading fails. The output is written to a
/// temporary sibling first and renamed into place, so a failed write leaves
/// no partial file at `output`. An existing `output` must be writable, and a
/// symlinked `output` is written through to its target.
pub fn translate_file(translator: &Translator, input: &Path, output: &Path) -> Result<PathBuf, JobError> {
    let text = fs::read_to_string(input).map_err(|source| JobError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    if same_file(input, output) {
        return Err(JobError::InPlace {
            path: output.to_path_buf(),
        });
    }
    log::info!("translating {} ({} bytes)", input.display(), text.len());

    let translated = translator.translate(&text);

    write_atomically(output, translated.as_bytes()).map_err(|source| JobError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} ({} bytes)", output.display(), translated.len());

    Ok(output.to_path_buf())
}

/// Runs independent jobs in parallel. Results come back in job order.
pub fn translate_batch(translator: &Translator, jobs: &[Job]) -> Vec<Result<PathBuf, JobError>> {
    jobs.par_iter()
        .map(|job| translate_file(translator, &job.input, &job.output))
        .collect()
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

// Distinguishes temp files of jobs in this process that share an output.
static TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    // Write through symlinks, and fail on an existing file we may not write.
    let target = if fs::symlink_metadata(path).is_ok() {
        let resolved = fs::canonicalize(path)?;
        OpenOptions::new().write(true).open(&resolved)?;
        resolved
    } else {
        path.to_path_buf()
    };

    let mut tmp_name = OsString::from(".");
    tmp_name.push(target.file_name().unwrap_or_default());
    tmp_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let tmp = target.with_file_name(tmp_name);

    let result = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, &target));
    if result.is_err() {
        // The temp file may not exist if the first write failed.
        let _ = fs::remove_file(&tmp);
    }
    result
}
