//! Audit Engine
//!
//! Evaluates every selected rule against a configuration model and collects
//! the triggered ones into an [`AuditReport`]. Evaluation is synchronous,
//! read-only and deterministic: the same model always yields the same report.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::AuditConfig;
use crate::model::Service;
use crate::report::{AuditReport, Finding};
use crate::rules::{Rule, RuleCatalog};

/// Audit engine - runs a fixed rule selection against models
#[derive(Debug, Clone)]
pub struct AuditEngine {
    /// Active rules (filtered by config)
    catalog: RuleCatalog,
    /// Configuration the selection was built from
    pub config: AuditConfig,
}

impl AuditEngine {
    /// Create an engine over the builtin catalog
    pub fn new(config: AuditConfig) -> Result<Self> {
        let builtin = RuleCatalog::builtin()?;
        Ok(Self::with_catalog(&builtin, config))
    }

    /// Create an engine over an existing catalog
    pub fn with_catalog(catalog: &RuleCatalog, config: AuditConfig) -> Self {
        let selected = catalog.select(&config);

        if selected.is_empty() && !catalog.is_empty() {
            warn!(
                catalog_size = catalog.len(),
                "Audit configuration excludes every rule"
            );
        }

        info!(
            rules_count = selected.len(),
            catalog_size = catalog.len(),
            ignored = config.ignore.len(),
            severity_filter = config.severities.is_some(),
            "Audit engine initialized"
        );

        Self {
            catalog: selected,
            config,
        }
    }

    /// Get all active rules
    pub fn rules(&self) -> &[Rule] {
        self.catalog.rules()
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Audit `service` with the active rules
    pub fn evaluate(&self, service: &Service) -> AuditReport {
        evaluate(&self.catalog, service)
    }
}

/// Run every rule of `catalog` against `service`, in catalog order
pub fn evaluate(catalog: &RuleCatalog, service: &Service) -> AuditReport {
    let mut report = AuditReport::new();

    for rule in catalog {
        if rule.evaluate(service) {
            debug!(
                rule_id = %rule.id,
                severity = %rule.severity,
                category = %rule.category,
                "Rule triggered"
            );
            report.push(Finding::from_rule(rule));
        }
    }

    let summary = report.summary();
    debug!(
        rules_evaluated = catalog.len(),
        endpoints = service.endpoints.len(),
        findings = summary.total(),
        critical = summary.critical,
        warning = summary.warning,
        info = summary.info,
        "Audit complete"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSelector;
    use crate::flags::ServiceFlags;
    use crate::model::{Backend, Endpoint};
    use crate::rules::{Category, RuleBuilder, Severity};

    fn create_engine() -> AuditEngine {
        AuditEngine::new(AuditConfig::default()).expect("Failed to create engine")
    }

    #[test]
    fn test_engine_uses_full_catalog_by_default() {
        let engine = create_engine();
        assert_eq!(engine.rules().len(), RuleCatalog::builtin().unwrap().len());
    }

    #[test]
    fn test_findings_follow_catalog_order() {
        let engine = create_engine();
        let report = engine.evaluate(&Service::new().with_flags(ServiceFlags::DEBUG));

        let positions: Vec<usize> = report
            .iter()
            .map(|f| engine.rules().iter().position(|r| r.id == f.rule_id).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_finding_carries_rule_metadata() {
        let engine = create_engine();
        let report = engine.evaluate(&Service::new());

        let finding = report.iter().find(|f| f.rule_id == "2.1.2").unwrap();
        let rule = engine.catalog().get("2.1.2").unwrap();
        assert_eq!(finding.severity, rule.severity);
        assert_eq!(finding.recommendation, rule.recommendation);
    }

    #[test]
    fn test_ignored_rules_never_reported() {
        let config = AuditConfig::default().ignoring(RuleSelector::parse_list("2.1.2,@telemetry"));
        let engine = AuditEngine::new(config).unwrap();
        let report = engine.evaluate(&Service::new());

        assert!(!report.contains("2.1.2"));
        assert!(!report.iter().any(|f| f.rule_id.starts_with("4.")));
        assert!(report.contains("2.2.2"));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = RuleCatalog::new(vec![
            RuleBuilder::new("9.1.1", "Has endpoints")
                .category(Category::Structure)
                .severity(Severity::Info)
                .recommendation("Informational.")
                .predicate(|s: &Service| !s.endpoints.is_empty())
                .build()
                .unwrap(),
        ])
        .unwrap();

        let engine = AuditEngine::with_catalog(&catalog, AuditConfig::default());
        assert!(engine.evaluate(&Service::new()).is_empty());

        let service = Service::new().with_endpoint(Endpoint::new().with_backend(Backend::new()));
        assert_eq!(engine.evaluate(&service).rule_ids(), vec!["9.1.1"]);
    }

    #[test]
    fn test_empty_selection_yields_clean_report() {
        let config = AuditConfig::default().ignoring([RuleSelector::parse("*")]);
        let engine = AuditEngine::new(config).unwrap();
        assert!(engine.rules().is_empty());
        assert!(engine.evaluate(&Service::new()).is_empty());
    }
}
