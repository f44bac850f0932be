use crate::error::Result;
use crate::report::ScanReport;

/// Render the report as indented JSON.
pub fn render(report: &ScanReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
