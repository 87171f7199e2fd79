//! Traffic Management Rules (3.x)
//!
//! Bot detection, rate limiting, circuit breaking and endpoint timeouts.

use std::time::Duration;

use crate::model::namespace;
use crate::rules::predicates::{
    missing_capability, nowhere_in_endpoints, nowhere_in_request_path, timeout_exceeds,
};
use crate::rules::{Category, Rule, RuleBuilder, Severity};
use anyhow::Result;

/// Namespaces that rate-limit at endpoint level
const ENDPOINT_RATELIMITS: &[&str] = &[namespace::RATELIMIT_ROUTER, namespace::RATELIMIT_PROXY];

pub fn rules() -> Result<Vec<Rule>> {
    Ok(vec![
        RuleBuilder::new("3.1.1", "Bot detector disabled")
            .category(Category::TrafficManagement)
            .severity(Severity::Info)
            .recommendation("Enable a bot detector.")
            .shared_predicate(missing_capability(namespace::BOT_DETECTOR))
            .tags(&["traffic", "botdetector"])
            .build()?,

        RuleBuilder::new("3.1.2", "No rate limiting")
            .category(Category::TrafficManagement)
            .severity(Severity::Critical)
            .recommendation("Implement a rate-limiting strategy and avoid having an All-You-Can-Eat API.")
            .shared_predicate(nowhere_in_request_path(
                namespace::RATELIMIT_ROUTER,
                ENDPOINT_RATELIMITS,
                namespace::RATELIMIT_PROXY,
            ))
            .tags(&["traffic", "ratelimit"])
            .build()?,

        RuleBuilder::new("3.1.3", "No circuit breaker")
            .category(Category::TrafficManagement)
            .severity(Severity::Critical)
            .recommendation("Protect your backends with a circuit breaker.")
            .shared_predicate(nowhere_in_endpoints(
                namespace::CIRCUIT_BREAKER,
                namespace::CIRCUIT_BREAKER,
            ))
            .tags(&["traffic", "circuit-breaker"])
            .build()?,

        timeout_rule("3.3.1", Duration::from_secs(3), Severity::Info, "3 seconds")?,
        timeout_rule("3.3.2", Duration::from_secs(5), Severity::Warning, "5 seconds")?,
        timeout_rule("3.3.3", Duration::from_secs(30), Severity::Critical, "30 seconds")?,
        timeout_rule("3.3.4", Duration::from_secs(60), Severity::Critical, "1 minute")?,
    ])
}

/// Rule triggering when any endpoint timeout is strictly above `limit`
pub fn timeout_rule(id: &str, limit: Duration, severity: Severity, label: &str) -> Result<Rule> {
    RuleBuilder::new(id, &format!("Endpoint timeout above {}", label))
        .category(Category::TrafficManagement)
        .severity(severity)
        .recommendation(&format!(
            "Set timeouts to below {} for improved performance.",
            label
        ))
        .shared_predicate(timeout_exceeds(limit))
        .tags(&["traffic", "timeout"])
        .build()
}
