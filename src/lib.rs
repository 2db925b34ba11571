//! print-migrate library for staged print() -> structured-logging migration.
//!
//! This library provides programmatic access to the migration engine. The
//! core workflow runs in three escalating, independently re-runnable phases:
//!
//! 1. **Basic replacement**: rewrite whole-identifier `print(` call sites to
//!    `logPrint(` and inject the logging import once per file
//! 2. **Categorization**: scan migrated call sites and suggest
//!    category-specific calls (read-only)
//! 3. **Smart replacement**: rewrite migrated call sites to
//!    category-specific calls (`logError`, `logWarning`, `logAuth`, `logApi`)
//!
//! Phase 3 presumes phase 1 has already run: its rules only match the
//! generic call name, so running it on an unmigrated tree is a no-op.
//!
//! # Example
//!
//! ```no_run
//! use print_migrate::{rules, scanner, BasicRewriter};
//! use std::path::Path;
//!
//! // Collect files and run the basic replacement over each
//! let files = scanner::collect_dart_files(Path::new("lib")).unwrap();
//! let rewriter = BasicRewriter::new(rules::DEFAULT_IMPORT_LINE).unwrap();
//!
//! let mut total = 0;
//! for file in &files {
//!     total += rewriter.rewrite_file(file).unwrap();
//! }
//!
//! println!("Replaced {} print call sites", total);
//! ```

pub mod categorizer;
pub mod cli;
pub mod rewriter;
pub mod rules;
pub mod scanner;

// Re-export commonly used types at crate root
pub use categorizer::{Categorizer, Suggestion};
pub use rewriter::{BasicRewriter, SmartRewriter};
pub use scanner::ResidualEntry;
