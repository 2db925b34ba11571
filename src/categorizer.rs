//! Call-site categorization (phase 2).
//!
//! Scans already-migrated `logPrint(...)` call sites and classifies each by
//! keyword matching against a taxonomy supplied by the caller. Strictly
//! read-only: the output is a list of suggestions, written to a flat text
//! report for a human to review before phase 3.

use crate::rules::{self, CategoryDef};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A categorization suggestion for one generic call site.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    /// File containing the call site.
    pub file: PathBuf,
    /// The matched call-site text, e.g. `logPrint('user logged in')`.
    pub call_site: String,
    /// Name of the first taxonomy category with a matching keyword.
    pub category: &'static str,
    /// Suggested replacement call, e.g. `logAuth(...)`.
    pub suggested: String,
}

pub struct Categorizer {
    call_site: regex::Regex,
}

impl Categorizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            call_site: rules::generic_call_site_pattern()?,
        })
    }

    /// Categorizes every generic call site in `content`.
    ///
    /// Categories are evaluated in the taxonomy's declared order and the
    /// first category with any matching keyword wins; a call site is never
    /// assigned twice. Call sites matching no category yield no suggestion.
    pub fn categorize_content(
        &self,
        file: &Path,
        content: &str,
        taxonomy: &[CategoryDef],
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for site in self.call_site.find_iter(content) {
            let lowered = site.as_str().to_lowercase();

            if let Some(category) = taxonomy
                .iter()
                .find(|c| c.keywords.iter().any(|k| k.is_match(&lowered)))
            {
                suggestions.push(Suggestion {
                    file: file.to_path_buf(),
                    call_site: site.as_str().to_string(),
                    category: category.name,
                    suggested: category.suggested_call(),
                });
            }
        }

        suggestions
    }

    /// Reads `file` and categorizes its call sites. Never writes.
    pub fn categorize_file(
        &self,
        file: &Path,
        taxonomy: &[CategoryDef],
    ) -> Result<Vec<Suggestion>> {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        Ok(self.categorize_content(file, &content, taxonomy))
    }
}

/// Writes the suggestion listing to `path` as a flat human-readable report,
/// one block per suggestion.
pub fn write_report(path: &Path, suggestions: &[Suggestion]) -> Result<()> {
    let mut out = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writeln!(out, "PRINT MIGRATION SUGGESTIONS")?;
    writeln!(out, "{}\n", "=".repeat(50))?;

    for suggestion in suggestions {
        writeln!(out, "File: {}", suggestion.file.display())?;
        writeln!(out, "Current: {}", suggestion.call_site)?;
        writeln!(out, "Suggested: {}", suggestion.suggested)?;
        writeln!(out, "{}", "-".repeat(30))?;
    }

    Ok(())
}
