//! Rewrite rule tables and the categorization taxonomy.
//!
//! Each migration phase is a fixed, ordered list of [`RewriteRule`]s. The
//! whole engine works on text patterns, not an AST; the rule tables here are
//! the single source of truth for what each phase matches and emits. Rule
//! patterns are compiled once per run; a pattern that fails to compile is a
//! configuration defect and aborts the run before any file is touched.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// The legacy logging call being phased out.
pub const LEGACY_CALL: &str = "print";

/// The generic structured logging call introduced by phase 1.
pub const GENERIC_CALL: &str = "logPrint";

/// Import line injected into files that gain `logPrint` calls.
pub const DEFAULT_IMPORT_LINE: &str = "import '../../core/logging/print_migration.dart';";

/// Substring whose presence anywhere in a file means the logging import
/// (or an already-migrated equivalent) exists and injection must be skipped.
pub const IMPORT_MARKER: &str = "print_migration.dart";

/// A single pattern -> replacement rule, applied in phase order.
pub struct RewriteRule {
    pub pattern: Regex,
    /// Replacement template; may reference captured groups as `${1}`.
    pub replacement: String,
    /// Category this rule rewrites into, when it is a category-specific rule.
    pub category: Option<&'static str>,
}

/// Matches a whole-identifier `print(` call site.
///
/// The leading `\b` plus the mandatory `(` after optional whitespace mean
/// identifiers that merely contain `print` (`pprint`, `printf`, `logPrint`)
/// never match. This is what makes repeated phase-1 runs idempotent.
pub fn legacy_call_pattern() -> Result<Regex> {
    Regex::new(&format!(r"\b{}\s*\(", LEGACY_CALL)).context("Invalid legacy call pattern")
}

/// Matches a complete `logPrint(...)` call site including its argument text.
pub fn generic_call_site_pattern() -> Result<Regex> {
    Regex::new(&format!(r"{}\([^)]+\)", GENERIC_CALL)).context("Invalid call site pattern")
}

/// The phase-3 rule table, in precedence order.
///
/// Order is a contract: a call site whose argument matches several keyword
/// families resolves to the first rule listed here. A message containing both
/// "failed" and "token" becomes `logError`, not `logAuth`, because the error
/// rule is tried first.
pub fn smart_rules() -> Result<Vec<RewriteRule>> {
    let table: [(&'static str, &'static str, &'static str); 4] = [
        ("error", r"(?:error|failed|exception)", "logError"),
        ("warning", r"(?:warning|warn)", "logWarning"),
        ("auth", r"(?:login|logout|auth|token)", "logAuth"),
        ("api", r"(?:api|http|request|response)", "logApi"),
    ];

    table
        .iter()
        .map(|&(category, keywords, call)| {
            let pattern = RegexBuilder::new(&format!(
                r#"{}\(["']([^"']*{}[^"']*)["']"#,
                GENERIC_CALL, keywords
            ))
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid phase-3 rule for category '{}'", category))?;
            Ok(RewriteRule {
                pattern,
                replacement: format!("{}(\"${{1}}\"", call),
                category: Some(category),
            })
        })
        .collect()
}

/// One category in the phase-2 taxonomy: a name and its keyword patterns.
pub struct CategoryDef {
    pub name: &'static str,
    pub keywords: Vec<Regex>,
}

impl CategoryDef {
    /// The call name suggested for this category, e.g. `logAuth(...)`.
    pub fn suggested_call(&self) -> String {
        let mut chars = self.name.chars();
        let capitalized = match chars.next() {
            Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        format!("log{}(...)", capitalized)
    }
}

/// The default categorization taxonomy, in declared precedence order.
///
/// The Categorizer evaluates categories in this order and assigns each call
/// site to the first category with any matching keyword. Keyword patterns are
/// matched against lowercased argument text, so they are written lowercase.
pub fn default_taxonomy() -> Result<Vec<CategoryDef>> {
    let table: [(&'static str, &[&str]); 6] = [
        ("auth", &["login", "logout", "auth", "token", "otp", "user.*logged"]),
        ("api", &["api", "http", "request", "response", "endpoint", "status.*code"]),
        ("chat", &["chat", "message", "conversation"]),
        ("expense", &["expense", "reimbursement", "receipt"]),
        ("error", &["error", "exception", "failed", "fail"]),
        ("warning", &["warning", "warn", "potential.*issue"]),
    ];

    table
        .iter()
        .map(|&(name, patterns)| {
            let keywords = patterns
                .iter()
                .map(|p| {
                    Regex::new(p)
                        .with_context(|| format!("Invalid keyword pattern '{}' in category '{}'", p, name))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CategoryDef { name, keywords })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_pattern_matches_whole_identifier_only() {
        let re = legacy_call_pattern().unwrap();
        assert!(re.is_match("print('hi');"));
        assert!(re.is_match("print ('spaced');"));
        assert!(!re.is_match("logPrint('hi');"));
        assert!(!re.is_match("pprint('hi');"));
        assert!(!re.is_match("printf('hi');"));
    }

    #[test]
    fn smart_rules_ordered_error_first() {
        let rules = smart_rules().unwrap();
        let order: Vec<_> = rules.iter().filter_map(|r| r.category).collect();
        assert_eq!(order, vec!["error", "warning", "auth", "api"]);
    }

    #[test]
    fn smart_rules_capture_argument_literal() {
        let rules = smart_rules().unwrap();
        let error_rule = &rules[0];
        let rewritten =
            error_rule.pattern.replace("logPrint('upload failed')", error_rule.replacement.as_str());
        assert_eq!(rewritten, "logError(\"upload failed\")");
    }

    #[test]
    fn taxonomy_declared_order() {
        let taxonomy = default_taxonomy().unwrap();
        let names: Vec<_> = taxonomy.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["auth", "api", "chat", "expense", "error", "warning"]);
    }

    #[test]
    fn suggested_call_capitalizes_category() {
        let taxonomy = default_taxonomy().unwrap();
        assert_eq!(taxonomy[0].suggested_call(), "logAuth(...)");
        assert_eq!(taxonomy[4].suggested_call(), "logError(...)");
    }
}
