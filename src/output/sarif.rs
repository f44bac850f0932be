use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::Result;
use crate::report::ScanReport;
use crate::rules::{Finding, Severity};

/// Rule id used for unreadable-file findings, which come from no rule.
const READ_ERROR_RULE: &str = "SG-READ";

/// Render the report as SARIF 2.1.0.
///
/// Produces a self-contained SARIF log compatible with GitHub Code Scanning
/// and other SARIF consumers.
pub fn render(report: &ScanReport) -> Result<String> {
    let mut rules: BTreeMap<&str, &Finding> = BTreeMap::new();
    for finding in &report.findings {
        rules.entry(rule_id(finding)).or_insert(finding);
    }

    let rules: Vec<Value> = rules
        .into_iter()
        .map(|(id, finding)| {
            let name = finding
                .description
                .as_deref()
                .unwrap_or("unreadable file");
            json!({
                "id": id,
                "name": name,
                "shortDescription": { "text": name },
                "defaultConfiguration": {
                    "level": severity_to_sarif_level(finding.severity),
                },
            })
        })
        .collect();

    let results: Vec<Value> = report
        .findings
        .iter()
        .map(|f| {
            let message = f
                .error
                .as_deref()
                .or(f.description.as_deref())
                .unwrap_or_default();
            let mut location = json!({
                "artifactLocation": { "uri": f.file.replace('\\', "/") },
            });
            // SARIF requires a region to carry a start line.
            if let Some(line) = f.line {
                let mut region = json!({ "startLine": line });
                if let Some(snippet) = &f.snippet {
                    region["snippet"] = json!({ "text": snippet });
                }
                location["region"] = region;
            }
            json!({
                "ruleId": rule_id(f),
                "level": severity_to_sarif_level(f.severity),
                "message": { "text": message },
                "locations": [{ "physicalLocation": location }],
            })
        })
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "skillgate",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "results": results,
            "automationDetails": {
                "id": format!("skillgate/{}", report.skill_path),
            },
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}

fn rule_id(finding: &Finding) -> &str {
    finding.rule_id.as_deref().unwrap_or(READ_ERROR_RULE)
}

fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}
