//! HTML rendering for validation reports

use crate::finding::Finding;
use crate::report::ValidationReport;
use std::fmt::Write;
use std::path::Path;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
h1 { color: #333; }
.summary { margin: 20px 0; padding: 10px; background-color: #f5f5f5; border-radius: 5px; }
.pass { color: green; }
.fail { color: red; }
.errors, .warnings { margin: 10px 0; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid #ddd; }
th { background-color: #f2f2f2; }
";

/// Escape text for use in HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn render_report(report: &ValidationReport) -> String {
    let file_name = Path::new(report.scene_file())
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(report.scene_file());
    let status_class = if report.is_valid() { "pass" } else { "fail" };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>Validation Report - {}</title>", escape(file_name));
    let _ = writeln!(html, "<style>\n{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<h1>Validation Report</h1>\n");

    html.push_str("<div class=\"summary\">\n<h2>Summary</h2>\n");
    let _ = writeln!(html, "<p>File: <strong>{}</strong></p>", escape(report.scene_file()));
    let _ = writeln!(
        html,
        "<p>Status: <span class=\"{}\">{}</span></p>",
        status_class,
        report.status()
    );
    let _ = writeln!(html, "<p>Validation Time: {}</p>", report.timestamp());
    let _ = writeln!(html, "<p>Errors: {}</p>", report.error_count());
    let _ = writeln!(html, "<p>Warnings: {}</p>", report.warning_count());
    html.push_str("</div>\n");

    let errors: Vec<&Finding> = report.errors().collect();
    let warnings: Vec<&Finding> = report.warnings().collect();
    write_table(&mut html, "errors", "Errors", &errors);
    write_table(&mut html, "warnings", "Warnings", &warnings);

    html.push_str("</body>\n</html>\n");
    html
}

fn write_table(html: &mut String, class: &str, title: &str, findings: &[&Finding]) {
    if findings.is_empty() {
        return;
    }

    let _ = writeln!(html, "<div class=\"{}\">\n<h2>{}</h2>", class, title);
    html.push_str("<table>\n<tr><th>Code</th><th>Message</th><th>Location</th></tr>\n");
    for finding in findings {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            finding.code,
            escape(&finding.message),
            escape(&finding.location)
        );
    }
    html.push_str("</table>\n</div>\n");
}
