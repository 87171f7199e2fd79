//! Structure Rules (5.x)
//!
//! Router behavior and the shape of the endpoint/backend tree.

use crate::flags::{EndpointFlags, ServiceFlags};
use crate::model::{Endpoint, Service};
use crate::rules::predicates::{any_endpoint, every_endpoint, flag_set};
use crate::rules::{Category, Rule, RuleBuilder, Severity};
use anyhow::Result;

/// Agent count at which sequential start becomes a problem
pub const SEQUENTIAL_START_AGENT_THRESHOLD: usize = 10;

pub fn rules() -> Result<Vec<Rule>> {
    Ok(vec![
        RuleBuilder::new("5.1.1", "Strict REST disabled")
            .category(Category::Structure)
            .severity(Severity::Info)
            .recommendation("Use the better-performing router system.")
            .shared_predicate(flag_set(ServiceFlags::DISABLE_STRICT_REST))
            .tags(&["structure", "router"])
            .build()?,

        RuleBuilder::new("5.1.2", "Debug endpoint enabled")
            .category(Category::Structure)
            .severity(Severity::Warning)
            .recommendation("Avoid exposing debug endpoints in production.")
            .shared_predicate(flag_set(ServiceFlags::DEBUG))
            .tags(&["structure", "debug"])
            .build()?,

        RuleBuilder::new("5.1.3", "Endpoint without backends")
            .category(Category::Structure)
            .severity(Severity::Warning)
            .recommendation("Declare at least one backend per endpoint or remove the unused endpoint.")
            .shared_predicate(any_endpoint(|e: &Endpoint| e.backends.is_empty()))
            .tags(&["structure", "backends"])
            .build()?,

        RuleBuilder::new("5.1.4", "Single backend per endpoint")
            .category(Category::Structure)
            .severity(Severity::Info)
            .recommendation("Take advantage of backend aggregation: merge related calls under one endpoint.")
            .shared_predicate(every_endpoint(|e: &Endpoint| e.backends.len() <= 1))
            .tags(&["structure", "backends"])
            .build()?,

        RuleBuilder::new("5.1.5", "All endpoints use no-op encoding")
            .category(Category::Structure)
            .severity(Severity::Info)
            .recommendation("Use the gateway's data manipulation capabilities instead of proxying responses untouched.")
            .shared_predicate(every_endpoint(|e: &Endpoint| e.is_set(EndpointFlags::ENCODING_NOOP)))
            .tags(&["structure", "encoding"])
            .build()?,

        RuleBuilder::new("5.1.6", "Sequential start with many agents")
            .category(Category::Structure)
            .severity(Severity::Warning)
            .recommendation("Avoid sequential start of async agents when many of them are declared; it slows down startup.")
            .predicate(sequential_start_with_many_agents)
            .tags(&["structure", "async-agents"])
            .build()?,
    ])
}

fn sequential_start_with_many_agents(service: &Service) -> bool {
    service.is_set(ServiceFlags::SEQUENTIAL_START)
        && service.agent_count() >= SEQUENTIAL_START_AGENT_THRESHOLD
}
