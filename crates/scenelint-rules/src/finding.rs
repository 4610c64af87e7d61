//! Finding types produced by rule checks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Stable finding codes
///
/// The string form of each code is part of the public contract and never
/// changes meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingCode {
    /// Unsupported scene format
    E001,
    /// Missing required element type
    E002,
    /// Naming convention violation
    E003,
    /// Forbidden element present
    E004,
    /// Unexpected validation failure
    E999,
    /// Hierarchy does not have exactly one root
    W001,
    /// Element path does not resolve in the hierarchy
    W002,
}

impl FindingCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCode::E001 => "E001",
            FindingCode::E002 => "E002",
            FindingCode::E003 => "E003",
            FindingCode::E004 => "E004",
            FindingCode::E999 => "E999",
            FindingCode::W001 => "W001",
            FindingCode::W002 => "W002",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FindingCode::W001 | FindingCode::W002 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single evaluation outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    pub message: String,
    /// File path or element path; empty for scene-level findings without a source
    pub location: String,
}

impl Finding {
    /// Create a finding whose severity follows from its code
    pub fn new(code: FindingCode, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            location: location.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {}", self.code, self.message, self.location)
    }
}
