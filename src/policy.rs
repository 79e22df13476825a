//! Policy schema for purecheck.
//!
//! A policy defines what the validators may skip and how loudly they
//! complain. Every field defaults, so a missing or empty policy file means
//! "nothing exempted, everything enabled, errors".

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::detect::Severity;

/// Enable and severity switches for one validator.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ValidatorToggle {
    /// Whether the validator runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// If true findings are errors, otherwise warnings.
    #[serde(default = "default_true")]
    pub error: bool,
}

impl Default for ValidatorToggle {
    fn default() -> Self {
        Self {
            enabled: true,
            error: true,
        }
    }
}

impl ValidatorToggle {
    /// Effective severity for findings of this validator.
    pub fn severity(&self) -> Severity {
        if self.error {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

fn default_true() -> bool {
    true
}

/// Top-level policy definition.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Policy {
    #[serde(default)]
    pub version: String,
    /// Node type names exempt from the pure-node analysis.
    #[serde(default)]
    pub whitelist: BTreeSet<String>,
    /// Owning types whose pure functions are declared safe to re-evaluate.
    #[serde(default)]
    pub harmless_owners: BTreeSet<String>,
    /// Glob patterns for asset paths to exclude from a scan.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Toggles for the pure-node multi-exec check. The array-into-macro
    /// check has no toggle; it is definitive and always an error.
    #[serde(default)]
    pub multi_exec: ValidatorToggle,
    #[serde(default)]
    pub empty_tick: ValidatorToggle,
    #[serde(default)]
    pub blocking_load: ValidatorToggle,
}

impl Policy {
    /// Parse a policy from a YAML file. An empty file yields the defaults.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a policy from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let policy: Policy = serde_yaml::from_str(content)?;
        Ok(policy)
    }

    pub fn is_whitelisted(&self, node_type: &str) -> bool {
        self.whitelist.contains(node_type)
    }

    pub fn is_harmless_owner(&self, owner_type: &str) -> bool {
        self.harmless_owners.contains(owner_type)
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    /// Uses globset for matching, which supports `**` for recursive
    /// directory matching.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Validate a policy beyond what the schema enforces.
pub fn validate(policy: &Policy) -> anyhow::Result<()> {
    for pattern in &policy.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }
    Ok(())
}
