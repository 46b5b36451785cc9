use serde::Serialize;

use heft_core::types::FootprintReport;

/// Wrapper that adds the audited package's name to the JSON payload.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub package: &'a str,
    #[serde(flatten)]
    pub report: &'a FootprintReport,
}

/// Format a footprint report as JSON.
pub fn format_report(report: &FootprintReport, package: &str, compact: bool) -> String {
    let output = JsonOutput { package, report };
    if compact {
        serde_json::to_string(&output).expect("FootprintReport should be serializable")
    } else {
        serde_json::to_string_pretty(&output).expect("FootprintReport should be serializable")
    }
}
