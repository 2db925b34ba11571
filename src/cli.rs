//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! Each subcommand selects exactly one migration action: one of the three
//! rewrite phases, the residual analysis, or a standalone backup. Invoking
//! the tool with no subcommand prints usage guidance and mutates nothing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Staged migration of print() calls to a structured logging API.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Phase 1: replace print( with logPrint( and inject the logging import.
    Phase1 {
        /// Project directory to migrate.
        #[arg(short, long, default_value = "lib")]
        root: PathBuf,

        /// Copy the project directory aside before modifying any file.
        #[arg(short, long)]
        backup: bool,

        /// Import line injected into files that gain logPrint calls.
        #[arg(long, default_value = crate::rules::DEFAULT_IMPORT_LINE)]
        import_line: String,

        /// Maximum number of modified files to list in the summary.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Phase 2: suggest category-specific calls for migrated call sites (read-only).
    Phase2 {
        /// Project directory to scan.
        #[arg(short, long, default_value = "lib")]
        root: PathBuf,

        /// Where to write the suggestion listing.
        #[arg(short, long, default_value = "migration_suggestions.txt")]
        output: PathBuf,

        /// Emit the suggestion list as JSON instead of the summary line.
        #[arg(long)]
        json: bool,
    },

    /// Phase 3: rewrite migrated call sites to category-specific calls.
    ///
    /// Presumes phase 1 has already run; warns when the corpus still looks
    /// unmigrated, since the phase-3 rules only match logPrint call sites.
    Phase3 {
        /// Project directory to migrate.
        #[arg(short, long, default_value = "lib")]
        root: PathBuf,

        /// Copy the project directory aside before modifying any file.
        #[arg(short, long)]
        backup: bool,

        /// Maximum number of modified files to list in the summary.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Report remaining unmigrated print() call sites (read-only).
    Analyze {
        /// Project directory to scan.
        #[arg(short, long, default_value = "lib")]
        root: PathBuf,

        /// Maximum number of call sites to list in the preview.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Copy the project directory to the backup location without migrating.
    Backup {
        /// Project directory to back up.
        #[arg(short, long, default_value = "lib")]
        root: PathBuf,
    },
}
