//! skillgate: pre-execution static scanner for agent skill scripts.
//!
//! Walks a skill's `scripts/` directory, matches every line of every
//! Python, shell and JavaScript file against a catalog of dangerous-code
//! signatures, and returns a report that passes only when no HIGH finding
//! exists.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use skillgate::{scan, ScanOptions};
//!
//! let report = scan(Path::new("./my-skill"), &ScanOptions::default()).unwrap();
//! println!("Pass: {}, Findings: {}", report.passed, report.findings.len());
//! ```

pub mod config;
pub mod error;
pub mod language;
pub mod output;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod walk;

use std::path::{Path, PathBuf};

use config::Config;
use error::{Result, ScanError};
use output::OutputFormat;

pub use report::ScanReport;

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Explicit config file. Defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Json,
        }
    }
}

/// Run a complete scan of the skill at `path`.
pub fn scan(path: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let config = match &options.config_path {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    };
    scan_with_config(path, &config)
}

/// Run a complete scan with an already loaded config.
pub fn scan_with_config(path: &Path, config: &Config) -> Result<ScanReport> {
    if !path.exists() {
        return Err(ScanError::TargetNotFound(path.display().to_string()));
    }

    let engine = config.rule_engine()?;
    let scripts_dir = path.join(&config.scan.scripts_dir);

    if !scripts_dir.is_dir() {
        tracing::info!(skill = %path.display(), "no scripts directory, nothing to scan");
        return Ok(report::nothing_to_scan(
            path,
            format!("No {}/ directory found", config.scan.scripts_dir),
        ));
    }

    let tree = walk::scan_tree(path, &scripts_dir, &engine);
    let report = report::aggregate(path, tree.files_scanned, tree.findings);

    tracing::info!(
        skill = %path.display(),
        files = report.files_scanned,
        high = report.summary.high,
        medium = report.summary.medium,
        low = report.summary.low,
        passed = report.passed,
        "scan complete"
    );

    Ok(report)
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
