use std::fmt;

use serde::{Deserialize, Serialize};

use crate::build::Category;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// What kind of finding an issue is. Only incompatibilities are errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Hard structural mismatch: socket, memory generation, oversize part,
    /// insufficient PSU, slots or ports.
    Incompatibility,
    /// Fits, but with less room than recommended.
    TightMargin,
    /// A field needed for the comparison is absent; the check was skipped.
    MissingData,
    /// A form factor outside the size table forced an exact-name comparison.
    AmbiguousFormFactor,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::Incompatibility => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub rule_id: String,
    pub kind: IssueKind,
    pub message: String,
    /// Categories the finding is about, in check order.
    pub categories: Vec<Category>,
}

impl Issue {
    pub fn new(
        rule_id: &str,
        kind: IssueKind,
        message: impl Into<String>,
        categories: &[Category],
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            kind,
            message: message.into(),
            categories: categories.to_vec(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule_id, self.message)
    }
}

/// Findings for one build, in the order the checks ran.
///
/// `compatible` is false exactly when `errors` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompatibilityReport {
    pub compatible: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl Default for CompatibilityReport {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityReport {
    pub fn new() -> Self {
        Self {
            compatible: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Route an issue to `errors` or `warnings` by its severity.
    pub fn push(&mut self, issue: Issue) {
        match issue.severity() {
            Severity::Error => {
                self.errors.push(issue);
                self.compatible = false;
            }
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.push(issue);
        }
    }

    /// Append another report's findings after this one's.
    pub fn merge(&mut self, other: CompatibilityReport) {
        self.extend(other.errors);
        self.extend(other.warnings);
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|i| i.message.as_str()).collect()
    }

    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|i| i.message.as_str()).collect()
    }

    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|i| i.rule_id == rule_id)
    }
}
