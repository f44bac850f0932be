use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rules::{Finding, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Static,
}

/// Finding counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl Summary {
    pub fn tally(findings: &[Finding]) -> Self {
        findings
            .iter()
            .fold(Self::default(), |mut summary, finding| {
                match finding.severity {
                    Severity::High => summary.high += 1,
                    Severity::Medium => summary.medium += 1,
                    Severity::Low => summary.low += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Result of one scan. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub skill_path: String,
    pub scan_type: ScanType,
    /// Classified files whose content was read successfully.
    pub files_scanned: usize,
    pub findings: Vec<Finding>,
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// True when no HIGH finding is present.
    pub passed: bool,
}

/// Build the final report from everything a scan collected.
///
/// Only HIGH findings fail a scan; MEDIUM and LOW are advisory.
pub fn aggregate(root: &Path, files_scanned: usize, findings: Vec<Finding>) -> ScanReport {
    let summary = Summary::tally(&findings);
    ScanReport {
        skill_path: display_root(root),
        scan_type: ScanType::Static,
        files_scanned,
        findings,
        passed: summary.high == 0,
        summary,
        note: None,
    }
}

/// The target path as given, minus trailing separators and `.` components.
fn display_root(root: &Path) -> String {
    let normalized: PathBuf = root.components().collect();
    if normalized.as_os_str().is_empty() {
        return ".".to_string();
    }
    normalized.display().to_string()
}

/// Report for a skill with no scannable subtree: nothing to find, so it
/// passes.
pub fn nothing_to_scan(root: &Path, note: impl Into<String>) -> ScanReport {
    ScanReport {
        note: Some(note.into()),
        ..aggregate(root, 0, Vec::new())
    }
}
