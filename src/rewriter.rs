//! The rewrite engine.
//!
//! Transforms one file's content at a time: phase 1 swaps whole-identifier
//! `print(` calls for `logPrint(` and injects the logging import, phase 3
//! rewrites already-migrated call sites to category-specific calls. Content
//! is transformed fully in memory and written back in a single call, so a
//! failure mid-file never leaves a partial write on disk.

use crate::rules::{self, RewriteRule};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// Phase 1: basic `print(` -> `logPrint(` replacement plus import injection.
pub struct BasicRewriter {
    legacy: Regex,
    import_block: Regex,
    import_line: String,
}

impl BasicRewriter {
    pub fn new(import_line: &str) -> Result<Self> {
        Ok(Self {
            legacy: rules::legacy_call_pattern()?,
            // Contiguous run of import declarations anchored at the start of
            // the file; matches empty when there are none.
            import_block: Regex::new(r"\A(?:import\s+[^;]+;\s*\n)*")
                .context("Invalid import block pattern")?,
            import_line: import_line.to_string(),
        })
    }

    /// Applies the basic replacement to `content`.
    ///
    /// Returns the new content and the number of call sites replaced. When
    /// the count is zero the content is returned untouched, so a second run
    /// over already-migrated content reports zero and changes nothing.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let count = self.legacy.find_iter(content).count();
        if count == 0 {
            return (content.to_string(), 0);
        }

        let replacement = format!("{}(", rules::GENERIC_CALL);
        let mut new_content = self.legacy.replace_all(content, replacement.as_str()).into_owned();

        // Inject the import once, unless the original content already
        // references the marker (import present, or file already migrated).
        if !content.contains(rules::IMPORT_MARKER) {
            new_content = self.inject_import(&new_content);
        }

        (new_content, count)
    }

    /// Inserts the import line after the leading import block, or at the
    /// very top of the file when no imports exist.
    fn inject_import(&self, content: &str) -> String {
        let insert_at = self
            .import_block
            .find(content)
            .map(|m| m.end())
            .unwrap_or(0);

        let mut result = String::with_capacity(content.len() + self.import_line.len() + 1);
        result.push_str(&content[..insert_at]);
        result.push_str(&self.import_line);
        result.push('\n');
        result.push_str(&content[insert_at..]);
        result
    }

    /// Rewrites `file` in place, returning the number of replacements made.
    /// The file is not touched when nothing matched.
    pub fn rewrite_file(&self, file: &Path) -> Result<usize> {
        rewrite_file_with(file, |content| self.apply(content))
    }
}

/// Phase 3: rewrites generic call sites to category-specific calls.
///
/// Rules are applied in table order; an earlier rule rewriting a call site
/// removes the `logPrint` prefix later rules look for, so each call site is
/// claimed by at most one category. Running this on un-migrated content is a
/// no-op because the patterns only match the generic call name.
pub struct SmartRewriter {
    rules: Vec<RewriteRule>,
}

impl SmartRewriter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: rules::smart_rules()?,
        })
    }

    /// Applies every rule in order, returning new content and the total
    /// number of call sites rewritten.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let mut current = content.to_string();
        let mut total = 0;

        for rule in &self.rules {
            let count = rule.pattern.find_iter(&current).count();
            if count > 0 {
                current = rule
                    .pattern
                    .replace_all(&current, rule.replacement.as_str())
                    .into_owned();
                total += count;
            }
        }

        (current, total)
    }

    /// Rewrites `file` in place, returning the number of replacements made.
    pub fn rewrite_file(&self, file: &Path) -> Result<usize> {
        rewrite_file_with(file, |content| self.apply(content))
    }
}

/// Reads a file, applies a content transformation, and writes the result
/// back only when it differs. The new content is fully buffered before the
/// write, so the on-disk file is either the old or the new version.
fn rewrite_file_with(
    file: &Path,
    transform: impl FnOnce(&str) -> (String, usize),
) -> Result<usize> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let (new_content, count) = transform(&content);
    if new_content != content {
        std::fs::write(file, new_content)
            .with_context(|| format!("Failed to write {}", file.display()))?;
    }

    Ok(count)
}
