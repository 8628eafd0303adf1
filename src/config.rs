//! Configuration for docstyle.
//!
//! One immutable snapshot per analysis unit, loaded from YAML and shared
//! read-only across every declaration in that unit.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::types::Rule;

/// How file names must relate to the first declared top-level type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// File stem must equal the type name exactly.
    #[default]
    Stem,
    /// Dotted suffixes after the type name are accepted
    /// (`Widget.Designer.cs` for type `Widget`).
    AllowSuffix,
}

/// Immutable configuration snapshot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Expected company name in file headers. Empty means "not configured":
    /// the company match check passes vacuously.
    #[serde(default)]
    pub company_name: String,
    /// Expected copyright body text. `{company}` expands to `company_name`.
    /// Empty means "not configured"; the text match check passes vacuously.
    #[serde(default)]
    pub copyright_text: String,
    /// Culture identifier handed to the message lookup.
    #[serde(default = "default_culture")]
    pub culture: String,
    /// Whether file headers use the XML dialect (`<copyright>` element)
    /// rather than plain comment lines.
    #[serde(default = "default_true")]
    pub xml_header: bool,
    #[serde(default)]
    pub file_naming: FileNaming,
    /// Section tags excluded from end-of-sentence punctuation checking.
    #[serde(default = "default_punctuation_exempt")]
    pub punctuation_exempt_tags: Vec<String>,
    /// Placeholder text that exempts a section from copy-paste detection.
    #[serde(default = "default_placeholder")]
    pub placeholder_text: String,
    /// Glob patterns for paths to exclude from analysis.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Per-rule toggles by rule name. Absent rules are enabled.
    #[serde(default)]
    pub rules: BTreeMap<String, bool>,
}

fn default_true() -> bool {
    true
}

fn default_culture() -> String {
    "en-US".to_string()
}

fn default_punctuation_exempt() -> Vec<String> {
    vec!["seealso".to_string()]
}

fn default_placeholder() -> String {
    "The parameter is not used.".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            copyright_text: String::new(),
            culture: default_culture(),
            xml_header: true,
            file_naming: FileNaming::default(),
            punctuation_exempt_tags: default_punctuation_exempt(),
            placeholder_text: default_placeholder(),
            excluded_paths: Vec::new(),
            rules: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether a rule is enabled (defaults to true).
    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.rules.get(rule.as_str()).copied().unwrap_or(true)
    }

    /// Whether an expected company name has been configured.
    pub fn company_configured(&self) -> bool {
        !self.company_name.trim().is_empty()
    }

    /// Whether an expected copyright text has been configured.
    pub fn copyright_configured(&self) -> bool {
        !self.copyright_text.trim().is_empty()
    }

    /// The configured copyright text with `{company}` expanded.
    pub fn expected_copyright(&self) -> String {
        self.copyright_text.replace("{company}", &self.company_name)
    }

    /// Check if a path matches any excluded_paths pattern.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    for name in config.rules.keys() {
        if Rule::parse(name).is_none() {
            anyhow::bail!("unknown rule name {:?} in rules section", name);
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
company_name: "Example Corp"
copyright_text: "Copyright (c) {company}. All rights reserved."
xml_header: true
file_naming: allow_suffix
rules:
  value_missing: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.company_name, "Example Corp");
        assert_eq!(config.file_naming, FileNaming::AllowSuffix);
        assert!(!config.is_enabled(Rule::ValueMissing));
        assert!(config.is_enabled(Rule::SummaryMissing));
        assert_eq!(
            config.expected_copyright(),
            "Copyright (c) Example Corp. All rights reserved."
        );
    }

    #[test]
    fn test_defaults_mean_unconfigured() {
        let config = Config::default();
        assert!(!config.company_configured());
        assert!(!config.copyright_configured());
        assert!(config.xml_header);
        assert_eq!(config.punctuation_exempt_tags, vec!["seealso".to_string()]);
    }

    #[test]
    fn test_validate_rejects_unknown_rule() {
        let mut config = Config::default();
        config.rules.insert("not_a_rule".to_string(), false);
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.rules.insert("summary_missing".to_string(), false);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_excluded_paths() {
        let mut config = Config::default();
        config.excluded_paths = vec!["**/generated/**".to_string()];
        assert!(config.is_path_excluded(Path::new("src/generated/Model.cs")));
        assert!(!config.is_path_excluded(Path::new("src/Model.cs")));
    }
}
