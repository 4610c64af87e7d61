//! scenelint Rules - Rule evaluation and validation reports
//!
//! This crate turns a parsed scene and a [`RuleSet`] into an ordered list of
//! [`Finding`]s, aggregates them into a [`ValidationReport`] and renders that
//! report as text, JSON or HTML. [`ValidationSession`] ties parsing,
//! evaluation and reporting together for single files and batches.

pub mod checks;
mod evaluator;
mod finding;
pub mod html;
mod loader;
mod observer;
mod output;
mod report;
mod session;
mod types;

pub use evaluator::{evaluate, RuleEvaluator};
pub use finding::{Finding, FindingCode, Severity};
pub use loader::ConfigSyntax;
pub use observer::{LogObserver, NullObserver, ValidationObserver};
pub use output::OutputFormat;
pub use report::{FindingEntry, ReportDocument, ValidationReport};
pub use session::ValidationSession;
pub use types::{NamingConvention, RuleSet, RulesFile, ValidationRules};
