//! Structural checks over entity element trees.

use crate::core::catalog::CatalogLookup;
use crate::core::model::{Element, Path};
use serde::Serialize;
use std::fmt;

pub mod rules;
pub use rules::built_in_rules;

/// Diagnostic severity levels emitted by lint rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Error,
    Warning,
    Info,
}

impl LintSeverity {
    fn rank(&self) -> u8 {
        match self {
            LintSeverity::Error => 3,
            LintSeverity::Warning => 2,
            LintSeverity::Info => 1,
        }
    }
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "Error"),
            LintSeverity::Warning => write!(f, "Warning"),
            LintSeverity::Info => write!(f, "Info"),
        }
    }
}

/// Individual lint result emitted by a rule. `location` is a node path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintResult {
    pub code: String,
    pub severity: LintSeverity,
    pub message: String,
    pub location: Option<String>,
    pub suggestion: Option<String>,
}

impl LintResult {
    pub fn new(
        code: impl Into<String>,
        severity: LintSeverity,
        message: impl Into<String>,
        location: Option<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            location,
            suggestion,
        }
    }
}

/// Trait implemented by entity lint rules.
pub trait EntityLintRule {
    fn validate(&self, root: &Element, root_path: &Path, catalog: &dyn CatalogLookup) -> Vec<LintResult>;
}

/// Registry that runs all built-in entity lint rules.
pub struct LintRegistry {
    rules: Vec<Box<dyn EntityLintRule>>,
}

impl LintRegistry {
    pub fn new() -> Self {
        Self {
            rules: built_in_rules(),
        }
    }

    /// Run every rule against one entity tree.
    /// The results are already sorted by `(severity desc, code asc, location asc)`.
    pub fn run(&self, root: &Element, root_path: &Path, catalog: &dyn CatalogLookup) -> Vec<LintResult> {
        let mut results = Vec::new();
        for rule in &self.rules {
            results.extend(rule.validate(root, root_path, catalog));
        }
        sort_results(&mut results);
        results
    }
}

impl Default for LintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn sort_results(results: &mut [LintResult]) {
    results.sort_by(|a, b| {
        let severity_cmp = b.severity.rank().cmp(&a.severity.rank());
        severity_cmp
            .then(a.code.cmp(&b.code))
            .then(a.location.cmp(&b.location))
    });
}
