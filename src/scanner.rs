//! Line scanner: applies a language's rules to every line of a file.

use crate::language::Language;
use crate::rules::{Finding, RuleEngine};

/// Scan `content` with every enabled rule for `language`.
///
/// Findings come out rule by rule (HIGH tier first), and line by line within
/// a rule. A line that matches several rules yields one finding per rule.
pub fn scan_content(
    engine: &RuleEngine,
    file: &str,
    content: &str,
    language: Language,
) -> Vec<Finding> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut findings = Vec::new();

    for rule in engine.rules_for(language) {
        for (idx, line) in lines.iter().enumerate() {
            if rule.is_match(line) {
                findings.push(Finding::matched(
                    file,
                    idx + 1,
                    rule.id,
                    rule.description,
                    rule.tier.severity(),
                    line,
                ));
            }
        }
    }

    findings
}
