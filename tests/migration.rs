//! Corpus-level migration tests.
//!
//! Exercises the phases the way the binary drives them: a tree of Dart
//! files, one rewriter applied file by file, then the residual scanner as
//! the closing acceptance check.

use print_migrate::categorizer::Categorizer;
use print_migrate::rewriter::{BasicRewriter, SmartRewriter};
use print_migrate::rules;
use print_migrate::scanner;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_corpus(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

fn run_basic(root: &Path) -> (usize, usize) {
    let rewriter = BasicRewriter::new(rules::DEFAULT_IMPORT_LINE).unwrap();
    let mut modified = 0;
    let mut replacements = 0;
    for file in scanner::collect_dart_files(root).unwrap() {
        let count = rewriter.rewrite_file(&file).unwrap();
        if count > 0 {
            modified += 1;
            replacements += count;
        }
    }
    (modified, replacements)
}

#[test]
fn basic_pass_leaves_no_residuals() {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            ("main.dart", "void main() {\n  print('boot');\n  print('ready');\n}\n"),
            ("ui/home.dart", "print('home opened');\n"),
            ("ui/about.dart", "final title = 'about';\n"),
        ],
    );

    let (modified, replacements) = run_basic(dir.path());
    assert_eq!(modified, 2);
    assert_eq!(replacements, 3);

    let mut residuals = Vec::new();
    for file in scanner::collect_dart_files(dir.path()).unwrap() {
        residuals.extend(scanner::scan_file_for_residuals(&file).unwrap());
    }
    assert!(residuals.is_empty());
}

#[test]
fn second_basic_pass_changes_nothing() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &[("a.dart", "print('once');\n")]);

    run_basic(dir.path());
    let after_first = fs::read_to_string(dir.path().join("a.dart")).unwrap();

    let (modified, replacements) = run_basic(dir.path());
    assert_eq!(modified, 0);
    assert_eq!(replacements, 0);
    assert_eq!(fs::read_to_string(dir.path().join("a.dart")).unwrap(), after_first);
}

#[test]
fn clean_files_are_untouched_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let source = "// prints nothing\nfinal sprinter = sprint('x');\n";
    write_corpus(dir.path(), &[("clean.dart", source)]);

    let (modified, _) = run_basic(dir.path());
    assert_eq!(modified, 0);
    assert_eq!(fs::read_to_string(dir.path().join("clean.dart")).unwrap(), source);
}

#[test]
fn full_pipeline_reaches_category_specific_calls() {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[(
            "auth/session.dart",
            "print('user login failed for token abc');\n",
        )],
    );

    run_basic(dir.path());
    let migrated = fs::read_to_string(dir.path().join("auth/session.dart")).unwrap();
    assert_eq!(
        migrated,
        "import '../../core/logging/print_migration.dart';\nlogPrint('user login failed for token abc');\n"
    );

    // Phase 2 is read-only and classifies this site as auth ("login" wins
    // in taxonomy order), while phase 3's rule order puts error first.
    let categorizer = Categorizer::new().unwrap();
    let taxonomy = rules::default_taxonomy().unwrap();
    let suggestions = categorizer
        .categorize_file(&dir.path().join("auth/session.dart"), &taxonomy)
        .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].category, "auth");
    assert_eq!(
        fs::read_to_string(dir.path().join("auth/session.dart")).unwrap(),
        migrated
    );

    let smart = SmartRewriter::new().unwrap();
    let count = smart
        .rewrite_file(&dir.path().join("auth/session.dart"))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("auth/session.dart")).unwrap(),
        "import '../../core/logging/print_migration.dart';\nlogError(\"user login failed for token abc\");\n"
    );
}

#[test]
fn non_utf8_file_reports_error_without_partial_write() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.dart");
    let bytes = [0x70, 0x72, 0xff, 0xfe];
    fs::write(&bad, bytes).unwrap();

    let rewriter = BasicRewriter::new(rules::DEFAULT_IMPORT_LINE).unwrap();
    assert!(rewriter.rewrite_file(&bad).is_err());
    // The file is left byte-for-byte as it was
    assert_eq!(fs::read(&bad).unwrap(), bytes);

    let smart = SmartRewriter::new().unwrap();
    assert!(smart.rewrite_file(&bad).is_err());
    assert_eq!(fs::read(&bad).unwrap(), bytes);
}

#[test]
fn smart_pass_on_unmigrated_tree_is_noop() {
    let dir = TempDir::new().unwrap();
    let source = "print('request failed');\n";
    write_corpus(dir.path(), &[("api.dart", source)]);

    let smart = SmartRewriter::new().unwrap();
    let count = smart.rewrite_file(&dir.path().join("api.dart")).unwrap();
    assert_eq!(count, 0);
    assert_eq!(fs::read_to_string(dir.path().join("api.dart")).unwrap(), source);
}
