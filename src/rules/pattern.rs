//! Case-insensitive line patterns.
//!
//! Most rules compile on the linear-time `regex` engine. The few that carry
//! a lookahead need `fancy_regex`, which the `regex` crate cannot express.

/// A compiled rule pattern. Matching is always case-insensitive and
/// unanchored: a line matches if the pattern is found anywhere inside it.
#[derive(Debug)]
pub enum CompiledPattern {
    /// Linear-time engine, no lookaround.
    Linear(regex::Regex),
    /// Backtracking engine for lookahead/lookbehind.
    Backtracking(fancy_regex::Regex),
}

impl CompiledPattern {
    /// Compile `pattern`, picking the engine from its syntax.
    pub fn new(pattern: &str) -> Result<Self, String> {
        let source = format!("(?i){pattern}");
        if needs_backtracking_engine(pattern) {
            fancy_regex::Regex::new(&source)
                .map(Self::Backtracking)
                .map_err(|e| format!("fancy_regex compile error: {e}"))
        } else {
            regex::Regex::new(&source)
                .map(Self::Linear)
                .map_err(|e| format!("regex compile error: {e}"))
        }
    }

    /// Whether the pattern occurs anywhere in `line`.
    ///
    /// A backtracking engine that gives up on a line (step limit, stack depth)
    /// counts as a match.
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Linear(re) => re.is_match(line),
            Self::Backtracking(re) => match_or_fail_closed(re.is_match(line), re.as_str()),
        }
    }

    /// Pattern source, including the case-insensitivity flag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Linear(re) => re.as_str(),
            Self::Backtracking(re) => re.as_str(),
        }
    }

    pub fn uses_backtracking(&self) -> bool {
        matches!(self, Self::Backtracking(_))
    }
}

fn match_or_fail_closed<E: std::fmt::Display>(outcome: Result<bool, E>, pattern: &str) -> bool {
    outcome.unwrap_or_else(|e| {
        tracing::warn!(pattern, error = %e, "pattern evaluation aborted, treating line as a match");
        true
    })
}

/// Lookaround syntax the `regex` crate rejects.
fn needs_backtracking_engine(pattern: &str) -> bool {
    ["(?=", "(?!", "(?<=", "(?<!"]
        .iter()
        .any(|syntax| pattern.contains(syntax))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pattern_uses_linear_engine() {
        let p = CompiledPattern::new(r"os\.system\s*\(").unwrap();
        assert!(!p.uses_backtracking());
        assert!(p.is_match(r#"    OS.SYSTEM("ls")"#));
    }

    #[test]
    fn lookahead_uses_backtracking_engine() {
        let p = CompiledPattern::new(r#"['"](https?://(?!localhost))"#).unwrap();
        assert!(p.uses_backtracking());
        assert!(p.is_match(r#"post("https://evil.example")"#));
        assert!(!p.is_match(r#"post("http://localhost:8080")"#));
    }

    #[test]
    fn matches_substring_not_full_line() {
        let p = CompiledPattern::new(r"sudo\s+").unwrap();
        assert!(p.is_match("if true; then sudo rm x; fi"));
    }

    #[test]
    fn aborted_evaluation_counts_as_a_match() {
        assert!(match_or_fail_closed(Err::<bool, _>("backtrack limit exceeded"), "x"));
        assert!(!match_or_fail_closed(Ok::<_, String>(false), "x"));
        assert!(match_or_fail_closed(Ok::<_, String>(true), "x"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(CompiledPattern::new(r"(unclosed").is_err());
    }
}
