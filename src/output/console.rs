use crate::report::ScanReport;
use crate::rules::{Finding, Severity};

/// Render the report as plain console text, grouped by severity then file.
pub fn render(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n  {} ({} file(s) scanned)\n",
        report.skill_path, report.files_scanned
    ));
    if let Some(note) = &report.note {
        output.push_str(&format!("  note: {}\n", note));
    }

    if report.findings.is_empty() {
        output.push_str("\n  No security findings detected.\n\n");
    } else {
        // Stable sort keeps scan order within a severity and file
        let mut sorted: Vec<&Finding> = report.findings.iter().collect();
        sorted.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.file.cmp(&b.file)));

        output.push_str(&format!(
            "\n  {} finding(s) detected:\n\n",
            report.findings.len()
        ));

        for finding in &sorted {
            let severity_tag = match finding.severity {
                Severity::High => "[HIGH]  ",
                Severity::Medium => "[MEDIUM]",
                Severity::Low => "[LOW]   ",
            };

            match (&finding.error, finding.line) {
                (Some(error), _) => {
                    output.push_str(&format!("  {} unreadable file: {}\n", severity_tag, error));
                    output.push_str(&format!("           at {}\n", finding.file));
                }
                (None, line) => {
                    output.push_str(&format!(
                        "  {} {}\n",
                        severity_tag,
                        finding.description.as_deref().unwrap_or("-")
                    ));
                    output.push_str(&format!(
                        "           at {}:{}\n",
                        finding.file,
                        line.unwrap_or(0)
                    ));
                    if let Some(snippet) = &finding.snippet {
                        output.push_str(&format!("           | {}\n", snippet));
                    }
                }
            }
            output.push('\n');
        }
    }

    let status = if report.passed { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  Result: {} (high: {}, medium: {}, low: {})\n\n",
        status, report.summary.high, report.summary.medium, report.summary.low,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{aggregate, nothing_to_scan};
    use std::path::Path;

    #[test]
    fn high_findings_are_listed_first() {
        let report = aggregate(
            Path::new("skill"),
            1,
            vec![
                Finding::matched("scripts/a.sh", 1, "SH-102", "sudo usage", Severity::Medium, "sudo x"),
                Finding::matched("scripts/a.sh", 2, "SH-005", "bash eval command", Severity::High, "eval $x"),
            ],
        );
        let text = render(&report);
        let high = text.find("bash eval command").unwrap();
        let medium = text.find("sudo usage").unwrap();
        assert!(high < medium);
        assert!(text.contains("Result: FAIL (high: 1, medium: 1, low: 0)"));
    }

    #[test]
    fn unreadable_file_shows_error() {
        let report = aggregate(
            Path::new("skill"),
            0,
            vec![Finding::unreadable("scripts/x.py", "Permission denied")],
        );
        let text = render(&report);
        assert!(text.contains("unreadable file: Permission denied"));
        assert!(text.contains("Result: PASS"));
    }

    #[test]
    fn empty_skill_shows_note() {
        let text = render(&nothing_to_scan(Path::new("skill"), "No scripts/ directory found"));
        assert!(text.contains("note: No scripts/ directory found"));
        assert!(text.contains("No security findings detected."));
    }
}
