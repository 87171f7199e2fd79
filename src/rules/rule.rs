//! Rule types and builder
//!
//! Defines the Rule struct with metadata and a builder pattern for easy rule creation.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::model::Service;

/// Audit area a rule belongs to (first component of the rule ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// 1.x: who may call the gateway
    Authentication,
    /// 2.x: transport security and exposed headers
    Security,
    /// 3.x: rate limiting, circuit breaking, timeouts
    TrafficManagement,
    /// 4.x: metrics, tracing, logging
    Telemetry,
    /// 5.x: router and endpoint layout
    Structure,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Authentication => write!(f, "Authentication"),
            Category::Security => write!(f, "Security"),
            Category::TrafficManagement => write!(f, "Traffic Management"),
            Category::Telemetry => write!(f, "Telemetry"),
            Category::Structure => write!(f, "Structure"),
        }
    }
}

/// Rule severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Every severity, most severe first
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    /// Ordinal rank, higher is more severe
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 3,
            Severity::Warning => 2,
            Severity::Info => 1,
        }
    }

    /// Whether this severity is at least as severe as `other`
    pub fn at_least(&self, other: Severity) -> bool {
        self.rank() >= other.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

impl FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => bail!("unknown severity '{}' (expected critical, warning or info)", other),
        }
    }
}

/// Predicate answering "is this finding present"
pub type Predicate = Arc<dyn Fn(&Service) -> bool + Send + Sync>;

/// Audit rule with metadata
#[derive(Clone)]
pub struct Rule {
    /// Stable dotted identifier (e.g., "2.1.2")
    pub id: String,
    /// Short human-readable name
    pub name: String,
    /// Audit area
    pub category: Category,
    /// Severity level
    pub severity: Severity,
    /// Remediation guidance shown with every finding
    pub recommendation: String,
    /// Searchable tags
    pub tags: Vec<String>,
    predicate: Predicate,
}

impl Rule {
    /// Whether the finding is present in `service`
    pub fn evaluate(&self, service: &Service) -> bool {
        (self.predicate)(service)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("recommendation", &self.recommendation)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Builder for creating rules with a fluent API
pub struct RuleBuilder {
    id: String,
    name: String,
    category: Category,
    severity: Severity,
    recommendation: String,
    tags: Vec<String>,
    predicate: Option<Predicate>,
}

impl RuleBuilder {
    /// Create a new rule builder with required fields
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Security,
            severity: Severity::Warning,
            recommendation: String::new(),
            tags: vec![],
            predicate: None,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn recommendation(mut self, text: &str) -> Self {
        self.recommendation = text.to_string();
        self
    }

    /// Set the predicate from any shareable closure or function
    pub fn predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Service) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(f));
        self
    }

    /// Set an already shared predicate
    pub fn shared_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags.extend(tags.iter().map(|s| s.to_string()));
        self
    }

    /// Build the rule
    pub fn build(self) -> Result<Rule> {
        if self.id.trim().is_empty() {
            bail!("rule '{}' has an empty id", self.name);
        }
        if self.recommendation.trim().is_empty() {
            bail!("rule {} has no recommendation", self.id);
        }
        let Some(predicate) = self.predicate else {
            bail!("rule {} has no predicate", self.id);
        };

        Ok(Rule {
            id: self.id,
            name: self.name,
            category: self.category,
            severity: self.severity,
            recommendation: self.recommendation,
            tags: self.tags,
            predicate,
        })
    }
}
