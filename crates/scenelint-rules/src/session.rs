//! Validation session: parse, evaluate, report

use crate::evaluator::RuleEvaluator;
use crate::finding::{Finding, FindingCode};
use crate::observer::{NullObserver, ValidationObserver};
use crate::report::ValidationReport;
use crate::types::RuleSet;
use chrono::Utc;
use scenelint_core::SceneLintError;
use scenelint_scene::ParserRegistry;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

/// Validates scene files against a shared rule set
///
/// Every call returns a report. Parse and evaluation failures become a single
/// `E001` (unsupported format) or `E999` finding instead of an error, so one
/// bad scene never stops a batch.
pub struct ValidationSession {
    rules: Arc<RuleSet>,
    parsers: ParserRegistry,
    evaluator: RuleEvaluator,
    observer: Arc<dyn ValidationObserver>,
}

impl ValidationSession {
    /// Create a session with the standard evaluator and no observer
    pub fn new(rules: Arc<RuleSet>, parsers: ParserRegistry) -> Self {
        Self {
            rules,
            parsers,
            evaluator: RuleEvaluator::new(),
            observer: Arc::new(NullObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ValidationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// Validate a single scene file
    pub fn validate_one<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        let path = path.as_ref();
        self.validate_labeled(path, &path.display().to_string())
    }

    /// Validate `path`, reporting it under `label`
    ///
    /// Used when the file on disk is a stand-in (e.g. an upload stored in a
    /// temp file) for the name the user knows.
    pub fn validate_labeled<P: AsRef<Path>>(&self, path: P, label: &str) -> ValidationReport {
        let path = path.as_ref();
        let started = Utc::now();
        self.observer.on_start(label);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.parsers
                .parse(path)
                .map(|scene| self.evaluator.evaluate(&scene.with_source(label), &self.rules))
        }));

        let findings = match outcome {
            Ok(Ok(findings)) => findings,
            Ok(Err(SceneLintError::UnsupportedFormat { extension })) => vec![Finding::new(
                FindingCode::E001,
                format!("Unsupported file format: {}", extension),
                label,
            )],
            Ok(Err(err)) => vec![validation_failure(&err.to_string(), label)],
            Err(payload) => vec![validation_failure(&panic_message(&*payload), label)],
        };

        for finding in &findings {
            self.observer.on_finding(label, finding);
        }

        let report = ValidationReport::at(label, started, findings);
        self.observer.on_complete(&report);
        report
    }

    /// Validate many scenes in order; one report per path
    pub fn validate_many<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<ValidationReport> {
        paths.iter().map(|p| self.validate_one(p)).collect()
    }

    /// Validate many scenes on up to `workers` threads
    ///
    /// Reports come back in input order.
    pub fn validate_many_parallel<P>(&self, paths: &[P], workers: usize) -> Vec<ValidationReport>
    where
        P: AsRef<Path> + Sync,
    {
        let workers = workers.clamp(1, paths.len().max(1));
        if workers == 1 {
            return self.validate_many(paths);
        }

        let chunk_size = paths.len().div_ceil(workers);
        std::thread::scope(|scope| {
            let handles: Vec<_> = paths
                .chunks(chunk_size)
                .map(|chunk| (chunk, scope.spawn(move || self.validate_many(chunk))))
                .collect();

            handles
                .into_iter()
                .flat_map(|(chunk, handle)| match handle.join() {
                    Ok(reports) => reports,
                    Err(payload) => {
                        let message = panic_message(&*payload);
                        chunk
                            .iter()
                            .map(|p| {
                                let label = p.as_ref().display().to_string();
                                ValidationReport::new(
                                    label.clone(),
                                    vec![validation_failure(&message, &label)],
                                )
                            })
                            .collect()
                    }
                })
                .collect()
        })
    }
}

fn validation_failure(message: &str, location: &str) -> Finding {
    Finding::new(
        FindingCode::E999,
        format!("Validation error: {}", message),
        location,
    )
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during validation".to_string()
    }
}
