use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a matching line.
pub const SNIPPET_MAX_CHARS: usize = 100;

/// A single reported match, or an unreadable file.
///
/// Serialized field names are part of the report contract: a match renders
/// as `file`, `line`, `pattern`, `severity`, `content`, and a read failure as
/// `file`, `error`, `severity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Path relative to the scanned skill directory.
    pub file: String,
    /// 1-based line number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Rule description.
    #[serde(
        rename = "pattern",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub severity: Severity,
    /// Trimmed, truncated source line.
    #[serde(
        rename = "content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub snippet: Option<String>,
    /// Id of the rule that matched. Not part of the JSON report.
    #[serde(skip)]
    pub rule_id: Option<String>,
}

impl Finding {
    /// A rule match on one line.
    pub fn matched(
        file: &str,
        line: usize,
        rule_id: &str,
        description: &str,
        severity: Severity,
        source_line: &str,
    ) -> Self {
        Self {
            file: file.to_string(),
            line: Some(line),
            description: Some(description.to_string()),
            error: None,
            severity,
            snippet: Some(snippet(source_line)),
            rule_id: Some(rule_id.to_string()),
        }
    }

    /// A file that could not be read at all.
    pub fn unreadable(file: &str, error: &str) -> Self {
        Self {
            file: file.to_string(),
            line: None,
            description: None,
            error: Some(error.to_string()),
            severity: Severity::Low,
            snippet: None,
            rule_id: None,
        }
    }
}

/// Trim surrounding whitespace and keep at most [`SNIPPET_MAX_CHARS`] chars.
pub fn snippet(line: &str) -> String {
    line.trim().chars().take(SNIPPET_MAX_CHARS).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Scan infrastructure issue, such as an unreadable file.
    Low,
    /// Advisory.
    Medium,
    /// Blocks execution.
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Severity tier a catalog rule belongs to. Rules are never LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    High,
    Medium,
}

impl Tier {
    /// Order in which tiers are applied to a file.
    pub const SCAN_ORDER: [Tier; 2] = [Self::High, Self::Medium];

    pub fn severity(self) -> Severity {
        match self {
            Self::High => Severity::High,
            Self::Medium => Severity::Medium,
        }
    }
}
