//! Report output formats

use crate::report::ValidationReport;
use std::fmt;
use std::str::FromStr;

/// Serialization format for a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }

    /// HTTP content type for this format
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain; charset=utf-8",
            OutputFormat::Json => "application/json",
            OutputFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!(
                "unknown format '{}'; valid values: text, json, html",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationReport {
    /// Serialize in the requested format
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.summary(),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Html => self.to_html(),
        }
    }
}
