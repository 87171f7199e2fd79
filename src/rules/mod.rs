//! Audit Rule Catalog
//!
//! Contains all audit rules organized by category. The catalog is built once,
//! then shared read-only by every audit run. Registration order is part of the
//! contract: reports list findings in that order.

pub mod rule;

pub mod predicates;

// Rule category modules
pub mod auth;
pub mod structure;
pub mod telemetry;
pub mod traffic;
pub mod transport;

pub use rule::{Category, Predicate, Rule, RuleBuilder, Severity};

use crate::config::AuditConfig;
use anyhow::{bail, Result};
use rustc_hash::FxHashSet;

/// Immutable, ordered set of audit rules
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Build a catalog, rejecting duplicate rule IDs
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = FxHashSet::default();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                bail!("duplicate rule id {}", rule.id);
            }
        }
        Ok(Self { rules })
    }

    /// The builtin catalog, in registration order
    pub fn builtin() -> Result<Self> {
        Self::new(load_rules()?)
    }

    /// Rules kept by `config`, preserving order
    pub fn select(&self, config: &AuditConfig) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|rule| config.allows(rule))
                .cloned()
                .collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get rule by ID
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Get rules by category
    pub fn by_category(&self, category: Category) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.category == category).collect()
    }

    /// Get rules by tag
    pub fn by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Rule> {
        self.rules.iter().filter(|r| r.has_tag(tag)).collect()
    }
}

impl<'a> IntoIterator for &'a RuleCatalog {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Load all builtin rules in registration order
pub fn load_rules() -> Result<Vec<Rule>> {
    let mut rules = Vec::new();

    rules.extend(auth::rules()?);
    rules.extend(transport::rules()?);
    rules.extend(traffic::rules()?);
    rules.extend(telemetry::rules()?);
    rules.extend(structure::rules()?);

    Ok(rules)
}
