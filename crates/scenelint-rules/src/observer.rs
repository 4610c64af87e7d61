//! Session progress observers

use crate::finding::{Finding, Severity};
use crate::report::ValidationReport;
use log::{error, info, warn};

/// Receives progress events from a [`crate::ValidationSession`]
///
/// All methods default to doing nothing.
pub trait ValidationObserver: Send + Sync {
    fn on_start(&self, _source: &str) {}

    fn on_finding(&self, _source: &str, _finding: &Finding) {}

    fn on_complete(&self, _report: &ValidationReport) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ValidationObserver for NullObserver {}

/// Observer that forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ValidationObserver for LogObserver {
    fn on_start(&self, source: &str) {
        info!("Starting validation of {}", source);
    }

    fn on_finding(&self, _source: &str, finding: &Finding) {
        match finding.severity {
            Severity::Error => error!(
                "Error {}: {} at {}",
                finding.code, finding.message, finding.location
            ),
            Severity::Warning => warn!(
                "Warning {}: {} at {}",
                finding.code, finding.message, finding.location
            ),
        }
    }

    fn on_complete(&self, report: &ValidationReport) {
        info!(
            "Completed validation of {}: {} ({} error(s), {} warning(s))",
            report.scene_file(),
            report.status(),
            report.error_count(),
            report.warning_count()
        );
    }
}
