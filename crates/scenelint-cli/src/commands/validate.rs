//! Single-scene validation command

use super::{build_session, Outcome};
use anyhow::{bail, Context, Result};
use scenelint_rules::{OutputFormat, ValidationReport};
use std::fs;
use std::path::Path;

pub struct ValidateArgs {
    pub input: String,
    pub config: String,
    pub output: Option<String>,
    pub format: OutputFormat,
}

pub fn run(args: ValidateArgs) -> Result<Outcome> {
    let report = execute(&args)?;
    Ok(Outcome::from_valid(report.is_valid()))
}

fn execute(args: &ValidateArgs) -> Result<ValidationReport> {
    let session = build_session(&args.config)?;

    if !Path::new(&args.input).exists() {
        bail!("Scene file not found: {}", args.input);
    }

    let report = session.validate_one(&args.input);
    write_report(&report, args.format, args.output.as_deref())?;
    Ok(report)
}

pub(crate) fn write_report(
    report: &ValidationReport,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let rendered = report.render(format);

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path))?;
            println!("Validation report saved to {}", path);
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}
