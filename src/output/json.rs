//! JSON report output

use crate::output::report::CrawlReport;
use crate::output::OutputResult;
use std::path::Path;

/// Writes the report as pretty-printed JSON
///
/// # Arguments
///
/// * `report` - The aggregated crawl report
/// * `output_path` - Path where the JSON file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - The file could not be created or written
pub fn save_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let mut json = report_to_json(report)?;
    json.push('\n');
    std::fs::write(output_path, json)?;

    Ok(())
}

/// Renders the report as a pretty-printed JSON string
pub fn report_to_json(report: &CrawlReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
