//! Telemetry Rules (4.x)

use crate::model::namespace;
use crate::rules::predicates::{count_exceeds, missing_all};
use crate::rules::{Category, Rule, RuleBuilder, Severity};
use anyhow::Result;

pub fn rules() -> Result<Vec<Rule>> {
    Ok(vec![
        RuleBuilder::new("4.1.1", "No metrics")
            .category(Category::Telemetry)
            .severity(Severity::Warning)
            .recommendation("Implement a telemetry system for collecting metrics for monitoring and troubleshooting.")
            .shared_predicate(missing_all(namespace::TELEMETRY))
            .tags(&["telemetry", "metrics"])
            .build()?,

        // informational: duplicated exporters are not necessarily wrong
        RuleBuilder::new("4.1.3", "Several telemetry components")
            .category(Category::Telemetry)
            .severity(Severity::Info)
            .recommendation("Avoid duplicating telemetry options to prevent system overload.")
            .shared_predicate(count_exceeds(namespace::TELEMETRY, 1))
            .tags(&["telemetry", "metrics"])
            .build()?,

        RuleBuilder::new("4.2.1", "No tracing")
            .category(Category::Telemetry)
            .severity(Severity::Warning)
            .recommendation("Implement a telemetry system for tracing for monitoring and troubleshooting.")
            .shared_predicate(missing_all(namespace::TRACING))
            .tags(&["telemetry", "tracing"])
            .build()?,

        RuleBuilder::new("4.3.1", "No logging")
            .category(Category::Telemetry)
            .severity(Severity::Warning)
            .recommendation("Use the improved logging component for better log parsing.")
            .shared_predicate(missing_all(namespace::LOG_SINKS))
            .tags(&["telemetry", "logging"])
            .build()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Capability, Service};

    fn rule(id: &str) -> Rule {
        rules().unwrap().into_iter().find(|r| r.id == id).unwrap()
    }

    fn with(namespaces: &[&str]) -> Service {
        namespaces.iter().fold(Service::new(), |s, ns| {
            s.with_capability(ns, Capability::enabled())
        })
    }

    #[test]
    fn test_no_metrics() {
        assert!(rule("4.1.1").evaluate(&Service::new()));
        for ns in namespace::TELEMETRY {
            assert!(!rule("4.1.1").evaluate(&with(&[*ns])), "{} should count as metrics", ns);
        }
    }

    #[test]
    fn test_several_telemetry_components() {
        let rule = rule("4.1.3");
        assert!(!rule.evaluate(&Service::new()));
        assert!(!rule.evaluate(&with(&[namespace::METRICS])));
        assert!(rule.evaluate(&with(&[namespace::METRICS, namespace::OPENCENSUS])));
        assert!(rule.evaluate(&with(&[
            namespace::NEWRELIC,
            namespace::GANALYTICS,
            namespace::INSTANA,
        ])));
    }

    #[test]
    fn test_non_telemetry_namespaces_do_not_count() {
        let service = with(&[namespace::METRICS, namespace::LOGGING, namespace::CORS]);
        assert!(!rule("4.1.3").evaluate(&service));
    }

    #[test]
    fn test_no_tracing() {
        assert!(rule("4.2.1").evaluate(&with(&[namespace::METRICS, namespace::GANALYTICS])));
        assert!(!rule("4.2.1").evaluate(&with(&[namespace::INSTANA])));
    }

    #[test]
    fn test_no_logging() {
        assert!(rule("4.3.1").evaluate(&Service::new()));
        assert!(!rule("4.3.1").evaluate(&with(&[namespace::GELF])));
        assert!(!rule("4.3.1").evaluate(&with(&[namespace::LOGSTASH])));
        assert!(!rule("4.3.1").evaluate(&with(&[namespace::LOGGING])));
    }
}
