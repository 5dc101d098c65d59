//! Load-time consistency checks between a template and its fields
//!
//! Rendering never depends on these checks. They exist so a catalog author can
//! find tokens that will never be filled before a user does.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::types::{FieldKind, TemplateDescriptor};
use crate::template;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What is wrong with a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Template token with no field of that name
    UnknownPlaceholder { name: String },
    /// Field whose token never appears in the template
    UnusedField { name: String },
    /// Two fields share a name
    DuplicateField { name: String },
    /// Choice field without options
    MissingOptions { name: String },
    /// Field kind forms cannot collect yet
    UnsupportedKind { name: String, kind: FieldKind },
    /// Token appears more than once
    RepeatedPlaceholder { name: String, count: usize },
}

/// A single finding for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub category: String,
    pub kind: IssueKind,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self.kind {
            IssueKind::UnknownPlaceholder { .. } | IssueKind::DuplicateField { .. } | IssueKind::MissingOptions { .. } => {
                Severity::Error
            }
            IssueKind::UnusedField { .. } | IssueKind::UnsupportedKind { .. } | IssueKind::RepeatedPlaceholder { .. } => {
                Severity::Warning
            }
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.category)?;
        match &self.kind {
            IssueKind::UnknownPlaceholder { name } => write!(f, "template references unknown field [{}]", name),
            IssueKind::UnusedField { name } => write!(f, "field '{}' is never used by the template", name),
            IssueKind::DuplicateField { name } => write!(f, "field '{}' is declared more than once", name),
            IssueKind::MissingOptions { name } => write!(f, "choice field '{}' has no options", name),
            IssueKind::UnsupportedKind { name, kind } => {
                write!(f, "field '{}' uses unsupported kind '{}'", name, kind)
            }
            IssueKind::RepeatedPlaceholder { name, count } => write!(
                f,
                "[{}] appears {} times, only the first is filled by default",
                name, count
            ),
        }
    }
}

/// Check one descriptor
pub fn validate(category: &str, descriptor: &TemplateDescriptor) -> Vec<Issue> {
    debug!(%category, "validate: called");
    let issue = |kind| Issue {
        category: category.to_string(),
        kind,
    };
    let mut issues = Vec::new();

    let mut declared = HashSet::new();
    for field in &descriptor.fields {
        if !declared.insert(field.name.as_str()) {
            issues.push(issue(IssueKind::DuplicateField {
                name: field.name.clone(),
            }));
        }
        if field.kind == FieldKind::Choice && field.options().is_empty() {
            issues.push(issue(IssueKind::MissingOptions {
                name: field.name.clone(),
            }));
        }
        if !field.kind.is_supported() {
            issues.push(issue(IssueKind::UnsupportedKind {
                name: field.name.clone(),
                kind: field.kind,
            }));
        }
    }

    // Preserve first-seen order for stable output
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for placeholder in template::placeholders(&descriptor.template) {
        let count = counts.entry(placeholder.name.clone()).or_insert(0);
        if *count == 0 {
            order.push(placeholder.name);
        }
        *count += 1;
    }

    for name in &order {
        if !declared.contains(name.as_str()) {
            issues.push(issue(IssueKind::UnknownPlaceholder { name: name.clone() }));
        }
        let count = counts.get(name).copied().unwrap_or(0);
        if count > 1 {
            issues.push(issue(IssueKind::RepeatedPlaceholder {
                name: name.clone(),
                count,
            }));
        }
    }

    for field in &descriptor.fields {
        if field.kind.is_supported() && !counts.contains_key(&field.name) {
            issues.push(issue(IssueKind::UnusedField {
                name: field.name.clone(),
            }));
        }
    }

    debug!(%category, issue_count = issues.len(), "validate: complete");
    issues
}
