//! Multi-scene validation command

use super::{build_session, Outcome};
use anyhow::Result;
use scenelint_rules::{OutputFormat, ReportDocument, ValidationReport};

pub struct BatchArgs {
    pub scenes: Vec<String>,
    pub config: String,
    pub format: OutputFormat,
    pub jobs: usize,
}

/// Succeeds only when every scene is valid
pub fn run(args: BatchArgs) -> Result<Outcome> {
    let session = build_session(&args.config)?;
    let reports = session.validate_many_parallel(&args.scenes, args.jobs);

    println!("{}", render_batch(&reports, args.format));

    let failed = reports.iter().filter(|r| !r.is_valid()).count();
    log::info!("{} of {} scene(s) failed validation", failed, reports.len());

    Ok(Outcome::from_valid(failed == 0))
}

fn render_batch(reports: &[ValidationReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let docs: Vec<ReportDocument> = reports.iter().map(|r| r.to_document()).collect();
            serde_json::to_string_pretty(&docs).unwrap_or_else(|_| "[]".to_string())
        }
        _ => reports
            .iter()
            .map(|r| r.summary())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
