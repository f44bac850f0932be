//! Built-in rule catalog.
//!
//! Rules are plain data keyed by language and tier. Adding a language or a
//! rule is a table edit; the scanner never branches on either.
//!
//! Every rule is matched case-insensitively against one physical line at a
//! time. A construct whose arguments span several lines can slip through.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::finding::Tier;
use super::pattern::CompiledPattern;
use crate::language::Language;

/// Declarative rule entry.
pub struct RuleDef {
    pub id: &'static str,
    pub pattern: &'static str,
    pub description: &'static str,
}

/// One block of the catalog: every rule for a language at a tier, in
/// declaration order.
pub struct RuleTable {
    pub language: Language,
    pub tier: Tier,
    pub rules: &'static [RuleDef],
}

macro_rules! rule {
    ($id:literal, $pattern:literal, $description:literal) => {
        RuleDef {
            id: $id,
            pattern: $pattern,
            description: $description,
        }
    };
}

pub static BUILTIN_TABLES: &[RuleTable] = &[
    RuleTable {
        language: Language::Python,
        tier: Tier::High,
        rules: &[
            rule!("PY-001", r"\beval\s*\(", "eval() - arbitrary code execution"),
            rule!("PY-002", r"\bexec\s*\(", "exec() - arbitrary code execution"),
            rule!("PY-003", r"__import__\s*\(", "dynamic import - potential code injection"),
            rule!("PY-004", r#"compile\s*\([^)]+['"]exec['"]\s*\)"#, "compile with exec mode"),
            rule!("PY-005", r"os\.system\s*\(", "os.system() - shell command execution"),
            rule!("PY-006", r"subprocess\.call\s*\([^)]*shell\s*=\s*True", "subprocess with shell=True"),
            rule!("PY-007", r"subprocess\.Popen\s*\([^)]*shell\s*=\s*True", "Popen with shell=True"),
            rule!("PY-008", r"subprocess\.run\s*\([^)]*shell\s*=\s*True", "subprocess.run with shell=True"),
            rule!("PY-009", r#"['"]/etc/"#, "access to /etc/ system directory"),
            rule!("PY-010", r#"['"]/root/"#, "access to /root/ directory"),
            rule!("PY-011", r#"['"]~/\.ssh/"#, "access to SSH keys"),
            rule!("PY-012", r#"['"]~/\.aws/"#, "access to AWS credentials"),
            rule!("PY-013", r#"['"]~/\.config/"#, "access to user config"),
            rule!("PY-014", r#"\.env['"\s]"#, "access to .env file"),
            rule!(
                "PY-015",
                r#"requests\.(post|put|patch)\s*\(\s*['"](https?://(?!localhost|127\.0\.0\.1))"#,
                "external data transmission"
            ),
            rule!("PY-016", r"urllib\.request\.urlopen", "URL open - potential SSRF"),
            rule!("PY-017", r"socket\.connect\s*\(", "raw socket connection"),
            rule!("PY-018", r"base64\.b64decode\s*\([^)]+\).*exec", "base64 decode with execution"),
            rule!("PY-019", r"pickle\.load", "pickle.load - arbitrary code execution"),
        ],
    },
    RuleTable {
        language: Language::Python,
        tier: Tier::Medium,
        rules: &[
            rule!("PY-101", r"ctypes\.", "ctypes usage - native code"),
            rule!("PY-102", r"importlib\.", "dynamic import"),
            rule!("PY-103", r#"getattr\s*\([^,]+,\s*[^'"]+\)"#, "getattr with dynamic attribute"),
            // The lookahead sits after a greedy `[^)]*`, so it never rejects a
            // line. `yaml.load(f, Loader=yaml.SafeLoader)` is still flagged.
            rule!(
                "PY-104",
                r"yaml\.load\s*\([^)]*(?!Loader\s*=\s*yaml\.SafeLoader)",
                "unsafe yaml.load"
            ),
        ],
    },
    RuleTable {
        language: Language::Bash,
        tier: Tier::High,
        rules: &[
            rule!("SH-001", r"rm\s+-rf\s+/", "rm -rf on root path"),
            rule!("SH-002", r"rm\s+-rf\s+\*", "rm -rf with wildcard"),
            rule!("SH-003", r"curl\s+[^|]+\|\s*(ba)?sh", "curl piped to shell"),
            rule!("SH-004", r"wget\s+[^|]+\|\s*(ba)?sh", "wget piped to shell"),
            rule!("SH-005", r"\beval\s+", "bash eval command"),
            rule!("SH-006", r"cat\s+/etc/passwd", "reading /etc/passwd"),
            rule!("SH-007", r"cat\s+/etc/shadow", "reading /etc/shadow"),
            rule!("SH-008", r"cat\s+~/\.ssh/id_", "reading SSH private key"),
            rule!("SH-009", r"\$\([^)]*curl", "command substitution with curl"),
            rule!("SH-010", r"`[^`]*curl", "backtick execution with curl"),
        ],
    },
    RuleTable {
        language: Language::Bash,
        tier: Tier::Medium,
        rules: &[
            rule!("SH-101", r"chmod\s+777", "chmod 777 - insecure permissions"),
            rule!("SH-102", r"\bsudo\s+", "sudo usage"),
        ],
    },
    RuleTable {
        language: Language::JavaScript,
        tier: Tier::High,
        rules: &[
            rule!("JS-001", r"\beval\s*\(", "eval() - arbitrary code execution"),
            rule!("JS-002", r"new\s+Function\s*\(", "Function constructor - code execution"),
            rule!("JS-003", r"child_process\.(exec|execSync)\s*\(", "shell command execution"),
            rule!("JS-004", r"child_process\.spawn\s*\([^)]*shell:\s*true", "spawn with shell option"),
            rule!("JS-005", r#"require\s*\(\s*['"]child_process"#, "importing child_process"),
            rule!(
                "JS-006",
                r"fs\.(readFileSync|readFile)\s*\([^)]*(?:/etc/|~/\.ssh|~/\.aws)",
                "reading sensitive files"
            ),
        ],
    },
    RuleTable {
        language: Language::JavaScript,
        tier: Tier::Medium,
        rules: &[rule!(
            "JS-101",
            r"require\s*\(\s*[a-zA-Z_][a-zA-Z0-9_]*\s*\)",
            "dynamic require"
        )],
    },
];

/// A compiled catalog rule.
#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub language: Language,
    pub tier: Tier,
    pub description: &'static str,
    pattern: CompiledPattern,
}

impl Rule {
    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Compiled rules per language, HIGH tier first, declaration order within a
/// tier.
#[derive(Debug, Default)]
pub struct Catalog {
    by_language: HashMap<Language, Vec<Rule>>,
}

impl Catalog {
    /// Compile a set of tables. Fails on the first invalid pattern or
    /// duplicated rule id.
    pub fn compile(tables: &[RuleTable]) -> Result<Self, String> {
        let mut by_language: HashMap<Language, Vec<Rule>> = HashMap::new();
        let mut seen = std::collections::HashSet::new();

        for tier in Tier::SCAN_ORDER {
            for table in tables.iter().filter(|t| t.tier == tier) {
                let rules = by_language.entry(table.language).or_default();
                for def in table.rules {
                    if !seen.insert(def.id) {
                        return Err(format!("duplicate rule id {}", def.id));
                    }
                    let pattern = CompiledPattern::new(def.pattern)
                        .map_err(|e| format!("rule {}: {}", def.id, e))?;
                    rules.push(Rule {
                        id: def.id,
                        language: table.language,
                        tier,
                        description: def.description,
                        pattern,
                    });
                }
            }
        }

        Ok(Self { by_language })
    }

    /// Rules applicable to `language`, in scan order. Empty if none.
    pub fn rules_for(&self, language: Language) -> &[Rule] {
        self.by_language
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every rule, grouped by language in [`Language::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        Language::ALL
            .into_iter()
            .flat_map(move |lang| self.rules_for(lang).iter())
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.iter().any(|r| r.id == rule_id)
    }
}

/// The built-in catalog, compiled on first use and shared read-only.
pub static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::compile(BUILTIN_TABLES)
        .unwrap_or_else(|e| panic!("invalid built-in rule catalog: {e}"))
});
