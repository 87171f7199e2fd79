//! Audit Report
//!
//! Ordered findings produced by one audit run. Findings keep catalog
//! registration order; severity ordering is left to presentation.

use serde::{Deserialize, Serialize};

use crate::rules::{Rule, Severity};

/// One triggered rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable rule identifier
    pub rule_id: String,
    /// Severity fixed by the rule
    pub severity: Severity,
    /// Remediation guidance
    pub recommendation: String,
}

impl Finding {
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            rule_id: rule.id.clone(),
            severity: rule.severity,
            recommendation: rule.recommendation.clone(),
        }
    }
}

/// Finding counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeveritySummary {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.warning + self.info
    }
}

/// Result of one audit run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether the rule `rule_id` triggered
    pub fn contains(&self, rule_id: &str) -> bool {
        self.findings.iter().any(|f| f.rule_id == rule_id)
    }

    /// Triggered rule IDs in report order
    pub fn rule_ids(&self) -> Vec<&str> {
        self.findings.iter().map(|f| f.rule_id.as_str()).collect()
    }

    pub fn summary(&self) -> SeveritySummary {
        let mut summary = SeveritySummary::default();
        for finding in &self.findings {
            summary.add(finding.severity);
        }
        summary
    }

    /// Most severe level present, `None` for a clean report
    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings
            .iter()
            .map(|f| f.severity)
            .max_by_key(|s| s.rank())
    }

    /// Whether any finding is at least as severe as `threshold`
    pub fn has_at_least(&self, threshold: Severity) -> bool {
        self.findings.iter().any(|f| f.severity.at_least(threshold))
    }

    /// Findings ordered most severe first, registration order within a level
    pub fn sorted_by_severity(&self) -> Vec<&Finding> {
        let mut findings: Vec<_> = self.findings.iter().collect();
        findings.sort_by_key(|f| std::cmp::Reverse(f.severity.rank()));
        findings
    }
}

/// Serialized form of a report: findings plus their summary
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub findings: &'a [Finding],
    pub summary: SeveritySummary,
}

impl<'a> From<&'a AuditReport> for ReportView<'a> {
    fn from(report: &'a AuditReport) -> Self {
        Self {
            findings: &report.findings,
            summary: report.summary(),
        }
    }
}
