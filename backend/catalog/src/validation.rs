//! Catalog validation: every state must be fully described before the gateway starts.

use garden_core::EmotionalState;
use thiserror::Error;

use crate::catalog::Catalog;

/// A validation finding with a catalog path and message.
#[derive(Debug, Error)]
#[error("catalog issue at '{path}': {message}")]
pub struct CatalogIssue {
    pub path: String,
    pub message: String,
}

/// All findings from one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<CatalogIssue>,
    pub warnings: Vec<CatalogIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(CatalogIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(CatalogIssue {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate a catalog and return every error and warning found.
pub fn validate(catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_states(catalog, &mut report);
    validate_pools(catalog, &mut report);
    validate_transitions(catalog, &mut report);
    report
}

fn validate_states(catalog: &Catalog, report: &mut ValidationReport) {
    for state in EmotionalState::ALL {
        let path = format!("states.{state}");
        match catalog.state(state) {
            None => report.error(path, "State has no metadata"),
            Some(meta) => {
                if meta.name.trim().is_empty() {
                    report.warn(format!("{path}.name"), "Display name is empty");
                }
                if meta.description.trim().is_empty() {
                    report.warn(format!("{path}.description"), "Description is empty");
                }
            }
        }
    }
}

fn validate_pools(catalog: &Catalog, report: &mut ValidationReport) {
    for state in EmotionalState::ALL {
        let pool = catalog.responses(state);
        if pool.is_empty() {
            report.error(format!("responses.{state}"), "Response pool is empty");
        }
        if pool.iter().any(|r| r.trim().is_empty()) {
            report.warn(format!("responses.{state}"), "Pool contains a blank response");
        }
        if catalog.follow_up(state).is_none() {
            report.error(format!("followUps.{state}"), "State has no follow-up");
        }
    }
}

fn validate_transitions(catalog: &Catalog, report: &mut ValidationReport) {
    for (from, to) in catalog.transitions.keys() {
        if from == to {
            report.error(
                format!("transitions[{from}->{to}]"),
                "Self-transitions are never narrated",
            );
        }
    }
    for (from, to) in &catalog.duplicate_pairs {
        report.error(
            format!("transitions[{from}->{to}]"),
            "Pair listed more than once",
        );
    }

    let fallback = catalog.fallback();
    for (field, value) in [
        ("insight", &fallback.insight),
        ("prompt", &fallback.prompt),
        ("metaphor", &fallback.metaphor),
        ("affirmation", &fallback.affirmation),
    ] {
        if value.trim().is_empty() {
            report.error(format!("fallback.{field}"), "Fallback field is empty");
        }
    }
}
