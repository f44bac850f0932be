use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::rules::RuleEngine;

/// Top-level configuration, loaded from an explicit `--config` file.
///
/// Never read from the skill being scanned: that content is untrusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub rules: RuleSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSettings {
    /// Subdirectory of the skill that holds executable scripts.
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
}

fn default_scripts_dir() -> String {
    "scripts".into()
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSettings {
    /// Rule ids to skip entirely.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Config {
    /// Load config from a TOML file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let dir = Path::new(&self.scan.scripts_dir);
        if self.scan.scripts_dir.is_empty()
            || dir.is_absolute()
            || dir.components().any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ScanError::Config(format!(
                "scripts_dir must be a relative path inside the skill, got '{}'",
                self.scan.scripts_dir
            )));
        }
        Ok(())
    }

    /// Build the rule engine this config describes.
    pub fn rule_engine(&self) -> Result<RuleEngine> {
        RuleEngine::with_disabled(self.rules.disabled.iter().cloned())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# skillgate configuration

[scan]
# Subdirectory of the skill that is scanned.
scripts_dir = "scripts"

[rules]
# Rule ids to skip (see `skillgate --list-rules`).
# disabled = ["SH-102"]
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn starter_config_parses_to_defaults() {
        let file = write_config(Config::starter_toml());
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.scan.scripts_dir, "scripts");
        assert!(config.rules.disabled.is_empty());
    }

    #[test]
    fn empty_file_is_default() {
        let file = write_config("");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.scan.scripts_dir, "scripts");
    }

    #[test]
    fn disabled_rules_reach_the_engine() {
        let file = write_config("[rules]\ndisabled = [\"SH-102\"]\n");
        let config = Config::load(file.path()).unwrap();
        let engine = config.rule_engine().unwrap();
        assert!(engine.list_rules().iter().all(|r| r.id != "SH-102"));
    }

    #[test]
    fn unknown_rule_id_fails() {
        let file = write_config("[rules]\ndisabled = [\"NOPE-1\"]\n");
        let config = Config::load(file.path()).unwrap();
        assert!(config.rule_engine().is_err());
    }

    #[test]
    fn escaping_scripts_dir_is_rejected() {
        let file = write_config("[scan]\nscripts_dir = \"../elsewhere\"\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ScanError::Config(_))
        ));
    }

    #[test]
    fn unknown_key_is_a_toml_error() {
        let file = write_config("[scan]\nscript_dir = \"bin\"\n");
        assert!(matches!(Config::load(file.path()), Err(ScanError::Toml(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Config::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ScanError::Io(_))));
    }
}
