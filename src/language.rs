use std::path::Path;

use serde::{Deserialize, Serialize};

/// Script language a rule set applies to.
///
/// Chosen from the file extension only; content is never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Bash,
    JavaScript,
}

/// Extension (lowercase, no dot) to language.
const EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("sh", Language::Bash),
    ("bash", Language::Bash),
    ("js", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("ts", Language::JavaScript),
];

impl Language {
    pub const ALL: [Language; 3] = [Self::Python, Self::Bash, Self::JavaScript];

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|&(_, lang)| lang)
    }

    /// Classify a file by its extension. `None` means the file is not scanned.
    pub fn classify(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Bash => "bash",
            Self::JavaScript => "javascript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(Language::classify(Path::new("a/run.py")), Some(Language::Python));
        assert_eq!(Language::classify(Path::new("setup.sh")), Some(Language::Bash));
        assert_eq!(Language::classify(Path::new("x.bash")), Some(Language::Bash));
        assert_eq!(Language::classify(Path::new("i.mjs")), Some(Language::JavaScript));
        assert_eq!(Language::classify(Path::new("t.ts")), Some(Language::JavaScript));
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(Language::classify(Path::new("RUN.PY")), Some(Language::Python));
        assert_eq!(Language::classify(Path::new("Install.Sh")), Some(Language::Bash));
    }

    #[test]
    fn unknown_or_missing_extension_is_unsupported() {
        assert_eq!(Language::classify(Path::new("README.md")), None);
        assert_eq!(Language::classify(Path::new("Makefile")), None);
        assert_eq!(Language::classify(Path::new(".py")), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Language::JavaScript).unwrap();
        assert_eq!(json, "\"javascript\"");
    }
}
