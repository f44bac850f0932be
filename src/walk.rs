//! Walks a skill's script directory and scans each supported file.

use std::path::Path;

use walkdir::WalkDir;

use crate::language::Language;
use crate::rules::{Finding, RuleEngine};
use crate::scanner;

/// Everything collected from one directory walk.
#[derive(Debug, Default)]
pub struct TreeScan {
    /// Files that were classified and read successfully.
    pub files_scanned: usize,
    pub findings: Vec<Finding>,
}

/// Scan every supported file under `dir`, reporting paths relative to
/// `root`.
///
/// Entries are visited depth-first in file-name order, so repeated scans of
/// an unchanged tree produce findings in the same order. A file or
/// directory that cannot be read becomes a single LOW finding and the walk
/// continues.
pub fn scan_tree(root: &Path, dir: &Path, engine: &RuleEngine) -> TreeScan {
    let mut scan = TreeScan::default();

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let file = relative(root, e.path().unwrap_or(dir));
                tracing::warn!(file = %file, error = %e, "cannot walk entry, skipping");
                scan.findings.push(Finding::unreadable(&file, &e.to_string()));
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file = relative(root, path);
        let Some(language) = Language::classify(path) else {
            tracing::debug!(file = %file, "unsupported file type, skipping");
            continue;
        };

        match scan_file(engine, path, &file, language) {
            Ok(findings) => {
                tracing::debug!(file = %file, %language, findings = findings.len(), "scanned");
                scan.files_scanned += 1;
                scan.findings.extend(findings);
            }
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "cannot read file");
                scan.findings.push(Finding::unreadable(&file, &e.to_string()));
            }
        }
    }

    scan
}

/// Read one file (invalid UTF-8 is replaced, not rejected) and scan it.
pub fn scan_file(
    engine: &RuleEngine,
    path: &Path,
    file: &str,
    language: Language,
) -> std::io::Result<Vec<Finding>> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(scanner::scan_content(engine, file, &content, language))
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
