//! print-migrate: staged migration of print() calls to structured logging.
//!
//! This tool rewrites a Flutter project's `print(...)` call sites in three
//! escalating phases: a basic rename to the generic `logPrint` call, a
//! read-only categorization pass that suggests category-specific calls, and
//! a smart pass that applies those category rewrites. A residual analysis
//! reports whatever legacy call sites remain.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use print_migrate::categorizer::{self, Categorizer};
use print_migrate::cli::{Args, Commands};
use print_migrate::rewriter::{BasicRewriter, SmartRewriter};
use print_migrate::rules;
use print_migrate::scanner;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Well-known backup location, destructively replaced on every backup.
const BACKUP_DIR: &str = "backup_before_migration";

/// Aggregate counters for one mutating phase.
#[derive(Debug, Default)]
struct MigrationReport {
    files_scanned: usize,
    total_replacements: usize,
    /// Per-file replacement counts, in file order.
    modified: Vec<(PathBuf, usize)>,
    /// Files skipped because they could not be read or written back.
    skipped: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(command) = args.command else {
        print_usage();
        return Ok(());
    };

    match command {
        Commands::Phase1 {
            root,
            backup,
            import_line,
            limit,
        } => cmd_phase1(&root, backup, &import_line, limit),
        Commands::Phase2 { root, output, json } => cmd_phase2(&root, &output, json),
        Commands::Phase3 {
            root,
            backup,
            limit,
        } => cmd_phase3(&root, backup, limit),
        Commands::Analyze { root, limit, json } => cmd_analyze(&root, limit, json),
        Commands::Backup { root } => take_backup(&root),
    }
}

fn print_usage() {
    println!("Usage examples:");
    println!("  print-migrate backup");
    println!("  print-migrate phase1 --backup");
    println!("  print-migrate phase2");
    println!("  print-migrate phase3");
    println!("  print-migrate analyze");
    println!("\nRun phase 1 before phase 3; see --help for details.");
}

fn cmd_phase1(root: &Path, backup: bool, import_line: &str, limit: usize) -> Result<()> {
    // Rules and backup both happen before any file is touched, so a bad
    // pattern or a failed backup aborts with zero files mutated.
    let rewriter = BasicRewriter::new(import_line)?;
    if backup {
        take_backup(root)?;
    }

    println!(
        "{} Basic print() -> logPrint() replacement",
        "phase 1:".blue().bold()
    );

    let files = scanner::collect_dart_files(root)?;
    let report = run_phase(&files, |file| rewriter.rewrite_file(file));

    print_report(&report, limit, "replacements", "print statements migrated");
    Ok(())
}

fn cmd_phase2(root: &Path, output: &Path, json: bool) -> Result<()> {
    let categorizer = Categorizer::new()?;
    let taxonomy = rules::default_taxonomy()?;

    if !json {
        println!("{} Categorizing log patterns", "phase 2:".blue().bold());
    }

    let files = scanner::collect_dart_files(root)?;
    let mut suggestions = Vec::new();
    let mut skipped = Vec::new();

    for file in &files {
        match categorizer.categorize_file(file, &taxonomy) {
            Ok(found) => suggestions.extend(found),
            Err(err) => {
                eprintln!("{} skipping {}: {:#}", "warn:".yellow().bold(), file.display(), err);
                skipped.push(file.clone());
            }
        }
    }

    categorizer::write_report(output, &suggestions)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        println!(
            "{} {} suggestions written to {}",
            "ok:".green().bold(),
            suggestions.len(),
            output.display()
        );
    }
    warn_skipped(&skipped);
    Ok(())
}

fn cmd_phase3(root: &Path, backup: bool, limit: usize) -> Result<()> {
    let rewriter = SmartRewriter::new()?;
    if backup {
        take_backup(root)?;
    }

    println!("{} Smart pattern replacements", "phase 3:".blue().bold());

    let files = scanner::collect_dart_files(root)?;
    warn_if_phase1_not_run(&files)?;

    let report = run_phase(&files, |file| rewriter.rewrite_file(file));

    print_report(&report, limit, "smart replacements", "smart replacements");
    Ok(())
}

/// Applies one rewriter to every file, accumulating counts. A file that
/// fails to read or write back is skipped with a warning and the run
/// continues; its identity is recorded in the report.
fn run_phase(
    files: &[PathBuf],
    rewrite: impl Fn(&Path) -> Result<usize>,
) -> MigrationReport {
    let mut report = MigrationReport::default();

    for file in files {
        report.files_scanned += 1;
        match rewrite(file) {
            Ok(0) => {}
            Ok(count) => {
                report.total_replacements += count;
                report.modified.push((file.clone(), count));
            }
            Err(err) => {
                eprintln!(
                    "{} skipping {}: {:#}",
                    "warn:".yellow().bold(),
                    file.display(),
                    err
                );
                report.skipped.push(file.clone());
            }
        }
    }

    report
}

/// Phase 3 only matches the generic call name, so a corpus that still
/// contains legacy calls but no generic ones means phase 1 has not run and
/// this phase would silently do nothing. Warn instead of leaving the
/// operator guessing. Files that cannot be read are ignored here; the main
/// loop reports them.
fn warn_if_phase1_not_run(files: &[PathBuf]) -> Result<()> {
    let legacy = rules::legacy_call_pattern()?;
    let mut legacy_seen = false;

    for file in files {
        let Ok(content) = std::fs::read_to_string(file) else {
            continue;
        };
        if content.contains(rules::GENERIC_CALL) {
            return Ok(());
        }
        legacy_seen = legacy_seen || legacy.is_match(&content);
    }

    if legacy_seen {
        eprintln!(
            "{} no {} call sites found but legacy print() calls remain; run phase 1 first",
            "warn:".yellow().bold(),
            rules::GENERIC_CALL
        );
    }

    Ok(())
}

fn cmd_analyze(root: &Path, limit: usize, json: bool) -> Result<()> {
    if !json {
        println!(
            "{} Analyzing remaining print statements",
            "analyze:".blue().bold()
        );
    }

    let files = scanner::collect_dart_files(root)?;
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for file in &files {
        match scanner::scan_file_for_residuals(file) {
            Ok(found) => entries.extend(found),
            Err(err) => {
                eprintln!("{} skipping {}: {:#}", "warn:".yellow().bold(), file.display(), err);
                skipped.push(file.clone());
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{} No remaining print statements found", "ok:".green().bold());
    } else {
        println!(
            "{} Found {} remaining print statement(s):",
            "warn:".yellow().bold(),
            entries.len()
        );
        for entry in entries.iter().take(limit) {
            println!("  {}:{} - {}", entry.file.display(), entry.line, entry.text);
        }
        if entries.len() > limit {
            println!("  ... and {} more", entries.len() - limit);
        }
    }

    warn_skipped(&skipped);
    Ok(())
}

/// Copies the project directory to the fixed backup location, replacing any
/// prior backup. Fails before any mutation when the project directory is
/// missing or the backup location cannot be written.
fn take_backup(root: &Path) -> Result<()> {
    if !root.is_dir() {
        bail!("Project directory {} does not exist", root.display());
    }

    let backup_dir = PathBuf::from(BACKUP_DIR);
    if backup_dir.exists() {
        std::fs::remove_dir_all(&backup_dir)
            .with_context(|| format!("Failed to clear old backup at {}", backup_dir.display()))?;
    }
    copy_tree(root, &backup_dir)
        .with_context(|| format!("Failed to back up {} to {}", root.display(), backup_dir.display()))?;

    println!(
        "{} Created backup at {}",
        "ok:".green().bold(),
        backup_dir.display()
    );
    Ok(())
}

/// Recursive tree copy. Entries named like the backup location are skipped:
/// with `--root .` the backup target sits inside the tree being walked and
/// must not be copied into itself.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_entry(|e| e.file_name().to_str() != Some(BACKUP_DIR))
    {
        let entry = entry?;
        let target = dst.join(entry.path().strip_prefix(src)?);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Formats the bounded per-file listing for a phase summary: the first
/// `limit` modified files, then a one-line count of the rest.
fn preview_lines(report: &MigrationReport, limit: usize, what: &str) -> Vec<String> {
    let mut lines: Vec<String> = report
        .modified
        .iter()
        .take(limit)
        .map(|(file, count)| format!("  {}: {} {}", file.display(), count, what))
        .collect();

    if report.modified.len() > limit {
        lines.push(format!(
            "  ... and {} more file(s)",
            report.modified.len() - limit
        ));
    }

    lines
}

fn print_report(report: &MigrationReport, limit: usize, per_file: &str, summary: &str) {
    for line in preview_lines(report, limit, per_file) {
        println!("{}", line);
    }
    println!(
        "{} {} files scanned, {} modified, {} {}",
        "ok:".green().bold(),
        report.files_scanned,
        report.modified.len(),
        report.total_replacements,
        summary
    );
    warn_skipped(&report.skipped);
}

fn warn_skipped(skipped: &[PathBuf]) {
    if !skipped.is_empty() {
        eprintln!(
            "{} {} file(s) skipped due to errors:",
            "warn:".yellow().bold(),
            skipped.len()
        );
        for file in skipped {
            eprintln!("  {}", file.display());
        }
    }
}
