//! Validation report types

use crate::finding::{Finding, FindingCode, Severity};
use crate::html;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// The outcome of validating one scene against one rule set
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    scene_file: String,
    validation_time: DateTime<Utc>,
    findings: Vec<Finding>,
}

impl ValidationReport {
    /// Create a report stamped with the current time
    pub fn new(scene_file: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self::at(scene_file, Utc::now(), findings)
    }

    /// Create a report with an explicit timestamp
    pub fn at(
        scene_file: impl Into<String>,
        validation_time: DateTime<Utc>,
        findings: Vec<Finding>,
    ) -> Self {
        Self {
            scene_file: scene_file.into(),
            validation_time,
            findings,
        }
    }

    pub fn scene_file(&self) -> &str {
        &self.scene_file
    }

    pub fn validation_time(&self) -> DateTime<Utc> {
        self.validation_time
    }

    /// All findings in evaluation order
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Check if the scene is valid (no errors)
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.by_severity(Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn status(&self) -> &'static str {
        if self.is_valid() {
            "PASSED"
        } else {
            "FAILED"
        }
    }

    /// Timestamp as RFC 3339 UTC, to the second
    pub fn timestamp(&self) -> String {
        self.validation_time
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Get a human-readable, multi-line summary
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Validation {} for {}", self.status(), self.scene_file);
        let _ = writeln!(out, "Validation Time: {}", self.timestamp());
        let _ = writeln!(out, "Errors: {}", self.error_count());
        let _ = writeln!(out, "Warnings: {}", self.warning_count());

        if self.error_count() > 0 {
            out.push_str("\nERRORS:\n");
            for error in self.errors() {
                let _ = writeln!(out, "  {}", error);
            }
        }

        if self.warning_count() > 0 {
            out.push_str("\nWARNINGS:\n");
            for warning in self.warnings() {
                let _ = writeln!(out, "  {}", warning);
            }
        }

        out
    }

    /// Serializable view of this report
    pub fn to_document(&self) -> ReportDocument {
        ReportDocument {
            scene_file: self.scene_file.clone(),
            validation_time: self.validation_time,
            is_valid: self.is_valid(),
            errors: self.errors().map(FindingEntry::from).collect(),
            warnings: self.warnings().map(FindingEntry::from).collect(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_document()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Self-contained HTML document
    pub fn to_html(&self) -> String {
        html::render_report(self)
    }
}

/// JSON shape of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub scene_file: String,
    pub validation_time: DateTime<Utc>,
    pub is_valid: bool,
    pub errors: Vec<FindingEntry>,
    pub warnings: Vec<FindingEntry>,
}

/// One finding inside a [`ReportDocument`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingEntry {
    pub code: FindingCode,
    pub message: String,
    pub location: String,
}

impl From<&Finding> for FindingEntry {
    fn from(finding: &Finding) -> Self {
        Self {
            code: finding.code,
            message: finding.message.clone(),
            location: finding.location.clone(),
        }
    }
}
