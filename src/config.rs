//! Audit Configuration Types
//!
//! Rule selection applied to the catalog before evaluation: allow-list,
//! ignore list and severity filter.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::rules::{Rule, Severity};

/// Audit configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuditConfig {
    /// Explicitly enabled rules (if set, only these run)
    #[serde(default)]
    pub enabled: Option<Vec<RuleSelector>>,
    /// Rules never evaluated
    #[serde(default)]
    pub ignore: Vec<RuleSelector>,
    /// Keep only rules with these severities (all when unset)
    #[serde(default)]
    pub severities: Option<Vec<Severity>>,
}

impl AuditConfig {
    /// Parse a JSON audit configuration
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid audit configuration")
    }

    /// Add selectors to the ignore list
    pub fn ignoring(mut self, selectors: impl IntoIterator<Item = RuleSelector>) -> Self {
        self.ignore.extend(selectors);
        self
    }

    /// Replace the severity filter
    pub fn with_severities(mut self, severities: Vec<Severity>) -> Self {
        self.severities = Some(severities);
        self
    }

    /// Whether `rule` survives this configuration
    pub fn allows(&self, rule: &Rule) -> bool {
        let is_enabled = match &self.enabled {
            Some(selectors) => selectors.iter().any(|s| s.matches(&rule.id, &rule.tags)),
            None => true,
        };

        let is_ignored = self.ignore.iter().any(|s| s.matches(&rule.id, &rule.tags));

        let severity_kept = match &self.severities {
            Some(severities) => severities.contains(&rule.severity),
            None => true,
        };

        is_enabled && !is_ignored && severity_kept
    }

    /// Whether this configuration keeps every rule
    pub fn is_permissive(&self) -> bool {
        self.enabled.is_none() && self.ignore.is_empty() && self.severities.is_none()
    }
}

/// Rule selector for enabling/ignoring rules
///
/// Textual forms: `2.1.2` (exact id), `2.1.*` (id prefix), `@tls` (tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleSelector {
    /// Single rule by ID
    Id(String),
    /// Every rule whose ID starts with the prefix
    Prefix(String),
    /// Every rule carrying the tag
    Tag(String),
}

impl RuleSelector {
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim();

        if let Some(tag) = pattern.strip_prefix('@') {
            return RuleSelector::Tag(tag.to_string());
        }

        if let Some(prefix) = pattern.strip_suffix('*') {
            return RuleSelector::Prefix(prefix.to_string());
        }

        RuleSelector::Id(pattern.to_string())
    }

    /// Parse a comma-separated list, skipping empty entries
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Check if this selector matches a rule
    pub fn matches(&self, rule_id: &str, tags: &[String]) -> bool {
        match self {
            RuleSelector::Id(id) => id == rule_id,
            RuleSelector::Prefix(prefix) => rule_id.starts_with(prefix.as_str()),
            RuleSelector::Tag(tag) => tags.iter().any(|t| t == tag),
        }
    }
}

impl From<String> for RuleSelector {
    fn from(pattern: String) -> Self {
        RuleSelector::parse(&pattern)
    }
}

impl From<RuleSelector> for String {
    fn from(selector: RuleSelector) -> Self {
        match selector {
            RuleSelector::Id(id) => id,
            RuleSelector::Prefix(prefix) => format!("{}*", prefix),
            RuleSelector::Tag(tag) => format!("@{}", tag),
        }
    }
}

/// Parse a comma-separated severity list
pub fn parse_severities(list: &str) -> Result<Vec<Severity>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Severity>())
        .collect()
}
