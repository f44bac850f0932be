pub mod catalog;
pub mod finding;
pub mod pattern;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::language::Language;

pub use catalog::{Catalog, Rule};
pub use finding::{Finding, Severity, Tier};

/// Metadata about a catalog rule, used for `--list-rules` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub language: Language,
    pub severity: Severity,
    pub description: String,
    pub pattern: String,
}

/// The rule engine: the built-in catalog minus any rules disabled by
/// configuration.
pub struct RuleEngine {
    catalog: &'static Catalog,
    disabled: HashSet<String>,
}

impl RuleEngine {
    /// Create an engine with every built-in rule enabled.
    pub fn new() -> Self {
        Self {
            catalog: &*catalog::BUILTIN,
            disabled: HashSet::new(),
        }
    }

    /// Create an engine with the given rule ids switched off.
    ///
    /// Unknown ids are rejected so a typo cannot silently keep a rule on.
    pub fn with_disabled<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut engine = Self::new();
        for id in ids {
            let id = id.into();
            if !engine.catalog.contains(&id) {
                return Err(ScanError::Config(format!("unknown rule id '{id}'")));
            }
            engine.disabled.insert(id);
        }
        Ok(engine)
    }

    /// Enabled rules for `language`, HIGH tier first, catalog order within a
    /// tier.
    pub fn rules_for(&self, language: Language) -> impl Iterator<Item = &Rule> {
        self.catalog
            .rules_for(language)
            .iter()
            .filter(move |r| !self.disabled.contains(r.id))
    }

    /// List metadata for all enabled rules.
    pub fn list_rules(&self) -> Vec<RuleMetadata> {
        self.catalog
            .iter()
            .filter(|r| !self.disabled.contains(r.id))
            .map(|r| RuleMetadata {
                id: r.id.to_string(),
                language: r.language,
                severity: r.tier.severity(),
                description: r.description.to_string(),
                pattern: r.pattern().to_string(),
            })
            .collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
