use colored::Colorize;

use heft_core::config::ReportConfig;
use heft_core::types::FootprintReport;

/// Format a full footprint report for terminal output.
pub fn format_report(report: &FootprintReport, config: &ReportConfig) -> String {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{}\n", "Heft - Dependency Footprint".bold()));
    out.push_str(&format!("{}\n", "=".repeat(40)));

    // Stats
    let summary = &report.summary;
    out.push_str(&format!(
        "\n{}: {} packages, {} source files, {} native artifacts",
        "Summary".bold(),
        summary.package_count,
        summary.source_file_count,
        summary.binary_file_count,
    ));
    if summary.skipped_file_count > 0 {
        out.push_str(&format!(" ({} files skipped)", summary.skipped_file_count));
    }
    out.push('\n');

    // LOC ranking
    out.push_str(&format!(
        "\n{}\n{}\n",
        "LOCs per package".bold(),
        "-".repeat(40)
    ));
    let w = config.package_width;
    for entry in &report.loc {
        out.push_str(&format!(
            "{:.<w$.w$} {}\n",
            entry.package, entry.code_lines
        ));
    }
    if report.loc.is_empty() {
        out.push_str(&format!("{}\n", "No source files found.".dimmed()));
    }

    // Binary sizes
    out.push_str(&format!(
        "\n{}\n{}\n",
        "Binary size of shared libs per package".bold(),
        "-".repeat(40)
    ));
    let fw = config.file_width;
    let sw = config.size_width;
    for group in &report.binaries {
        for artifact in &group.artifacts {
            out.push_str(&format!(
                "{:<w$.w$} {:<fw$} {:>sw$}B\n",
                group.package,
                artifact.path.display().to_string(),
                artifact.size,
            ));
        }
    }
    if report.binaries.is_empty() {
        out.push_str(&format!("{}\n", "No native artifacts found.".green()));
    }

    out.push('\n');
    out
}
