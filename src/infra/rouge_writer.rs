// ============================================================
// Layer 6 — ROUGE File Writer
// ============================================================
// Writes one reference/decoded pair per evaluated example in
// the layout the ROUGE wrapper is configured to match:
//
//   actual_abstract/000003_reference.txt
//   gen_abstract/000003_decoded.txt
//
// Reference file: every sentence gets a period, lines joined
// with "\n", no trailing newline:
//   the cat sat.
//   it was happy.
//
// Decoded file: sentences as produced by the segmenter (they
// carry their own period tokens), joined with "\n", no
// trailing newline.
//
// Both directories must already exist. Files are overwritten;
// there is exactly one writer per run.

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::data::segmenter::make_html_safe;

pub const DEFAULT_REF_DIR: &str = "actual_abstract";
pub const DEFAULT_DEC_DIR: &str = "gen_abstract";

/// `{index:06}_reference.txt`
pub fn reference_file_name(index: usize) -> String {
    format!("{index:06}_reference.txt")
}

/// `{index:06}_decoded.txt`
pub fn decoded_file_name(index: usize) -> String {
    format!("{index:06}_decoded.txt")
}

/// Reference file body: "s1.\ns2.\n…\nsN." with no trailing newline.
pub fn reference_body(sentences: &[String]) -> String {
    sentences
        .iter()
        .map(|s| format!("{}.", make_html_safe(s)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decoded file body: "s1\ns2\n…\nsN" with no trailing newline.
pub fn decoded_body(sentences: &[String]) -> String {
    sentences
        .iter()
        .map(|s| make_html_safe(s))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct RougeWriter {
    ref_dir: PathBuf,
    dec_dir: PathBuf,
}

impl RougeWriter {
    pub fn new(ref_dir: impl Into<PathBuf>, dec_dir: impl Into<PathBuf>) -> Self {
        Self { ref_dir: ref_dir.into(), dec_dir: dec_dir.into() }
    }

    /// Write both files for example `index`. Returns their paths.
    pub fn write(
        &self,
        index:           usize,
        reference_sents: &[String],
        decoded_sents:   &[String],
    ) -> Result<(PathBuf, PathBuf)> {
        let ref_path = self.ref_dir.join(reference_file_name(index));
        let dec_path = self.dec_dir.join(decoded_file_name(index));

        write_file(&ref_path, &reference_body(reference_sents))?;
        write_file(&dec_path, &decoded_body(decoded_sents))?;

        tracing::debug!("Wrote example {} to '{}' and '{}'", index, ref_path.display(), dec_path.display());
        Ok((ref_path, dec_path))
    }
}

fn write_file(path: &Path, body: &str) -> Result<()> {
    // The result directories are part of the expected layout; a
    // missing one means the run was started from the wrong place.
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            anyhow::bail!("Output directory '{}' does not exist", dir.display());
        }
    }
    fs::write(path, body).with_context(|| format!("Cannot write '{}'", path.display()))
}
