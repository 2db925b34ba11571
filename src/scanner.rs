//! Dart file scanner.
//!
//! Recursively walks the project root to collect `.dart` files, skipping
//! entries whose names start with `.` or `_`. Also hosts the residual
//! scanner, the line-oriented audit that reports every call site still using
//! the legacy `print` primitive after migration.

use crate::rules;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A line that still contains an unmigrated legacy call.
#[derive(Debug, Clone, Serialize)]
pub struct ResidualEntry {
    /// Source file containing the call.
    pub file: PathBuf,
    /// Line number, 1-indexed.
    pub line: usize,
    /// The offending line, trimmed.
    pub text: String,
}

/// Collects all `.dart` files under `root`, excluding hidden and
/// underscore-prefixed directories. Files are returned in walk order.
pub fn collect_dart_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden_or_underscore(e))
    {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "dart")
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_hidden_or_underscore(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.') || s.starts_with('_'))
}

/// Reports every line in `file` that still contains a whole-identifier
/// legacy `print(` call, with 1-based line numbers in file order.
pub fn scan_file_for_residuals(file: &Path) -> Result<Vec<ResidualEntry>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let pattern = rules::legacy_call_pattern()?;

    Ok(scan_content(&content, &pattern)
        .into_iter()
        .map(|(line, text)| ResidualEntry {
            file: file.to_path_buf(),
            line,
            text,
        })
        .collect())
}

/// Line-by-line residual matching over already-loaded content.
///
/// Uses the same word-boundary pattern as the rewrite engine, so a file the
/// engine would leave untouched never produces entries here.
fn scan_content(content: &str, pattern: &regex::Regex) -> Vec<(usize, String)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}
