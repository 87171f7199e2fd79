//! Predicate Shapes
//!
//! Reusable building blocks for rule predicates. Each function returns a
//! [`Predicate`] closed over its parameters so rule modules can register
//! families of rules from one shape.
//!
//! Aggregation semantics across the tree:
//! - `*_anywhere` / `nowhere_*`: single existential over the listed nodes
//! - `any_endpoint`: true once one endpoint matches
//! - `every_endpoint`: vacuously true for a service without endpoints

use std::sync::Arc;
use std::time::Duration;

use super::rule::Predicate;
use crate::flags::{PackedFlags, ServiceFlags};
use crate::model::{ConfigNode, Endpoint, Service};

/// Service flag set
pub fn flag_set(flag: ServiceFlags) -> Predicate {
    Arc::new(move |s: &Service| s.is_set(flag))
}

/// Service flag `present` set while `absent` is not
pub fn flag_set_without(present: ServiceFlags, absent: ServiceFlags) -> Predicate {
    Arc::new(move |s: &Service| s.is_set(present) && !s.is_set(absent))
}

/// Service flag not set
pub fn flag_unset(flag: ServiceFlags) -> Predicate {
    Arc::new(move |s: &Service| !s.is_set(flag))
}

/// Capability configured at service level
pub fn has_capability(namespace: &'static str) -> Predicate {
    Arc::new(move |s: &Service| s.has_capability(namespace))
}

/// Capability missing at service level
pub fn missing_capability(namespace: &'static str) -> Predicate {
    Arc::new(move |s: &Service| !s.has_capability(namespace))
}

/// None of `namespaces` configured at service level
pub fn missing_all(namespaces: &'static [&'static str]) -> Predicate {
    Arc::new(move |s: &Service| !s.has_any_capability(namespaces))
}

/// Service capability present with `flag` set in its word 0
pub fn capability_flag_set<F: PackedFlags>(namespace: &'static str, flag: F) -> Predicate {
    Arc::new(move |s: &Service| capability_flag(s, namespace, flag))
}

/// Negation of [`capability_flag_set`]: an absent capability, or one without
/// payload, counts as the flag being unset
pub fn capability_flag_unset<F: PackedFlags>(namespace: &'static str, flag: F) -> Predicate {
    Arc::new(move |s: &Service| !capability_flag(s, namespace, flag))
}

fn capability_flag<F: PackedFlags>(service: &Service, namespace: &str, flag: F) -> bool {
    service
        .capability(namespace)
        .and_then(|c| c.flags())
        .is_some_and(|word| flag.is_set_in(word))
}

/// No endpoint carries `namespace`
pub fn no_endpoint_has(namespace: &'static str) -> Predicate {
    Arc::new(move |s: &Service| !s.endpoints().any(|e| e.has_capability(namespace)))
}

/// Capability missing on every endpoint and every backend
///
/// `endpoint_ns` is checked on endpoints, `backend_ns` on backends.
pub fn nowhere_in_endpoints(endpoint_ns: &'static str, backend_ns: &'static str) -> Predicate {
    Arc::new(move |s: &Service| {
        !s.endpoints()
            .any(|e| e.has_capability_in_path(endpoint_ns, backend_ns))
    })
}

/// Capability missing on the whole request path
///
/// Missing at service level under `service_ns`, on every endpoint under any of
/// `endpoint_ns`, and on every backend under `backend_ns`.
pub fn nowhere_in_request_path(
    service_ns: &'static str,
    endpoint_ns: &'static [&'static str],
    backend_ns: &'static str,
) -> Predicate {
    Arc::new(move |s: &Service| {
        if s.has_capability(service_ns) {
            return false;
        }
        !s.endpoints().any(|e| {
            e.has_any_capability(endpoint_ns) || e.backends().any(|b| b.has_capability(backend_ns))
        })
    })
}

/// More than `limit` of `namespaces` configured at service level
pub fn count_exceeds(namespaces: &'static [&'static str], limit: usize) -> Predicate {
    Arc::new(move |s: &Service| s.count_capabilities(namespaces) > limit)
}

/// Any endpoint whose timeout is strictly greater than `limit`
pub fn timeout_exceeds(limit: Duration) -> Predicate {
    Arc::new(move |s: &Service| {
        s.endpoints()
            .any(|e| e.timeout().is_some_and(|timeout| timeout > limit))
    })
}

/// At least one endpoint matches `f`
pub fn any_endpoint<F>(f: F) -> Predicate
where
    F: Fn(&Endpoint) -> bool + Send + Sync + 'static,
{
    Arc::new(move |s: &Service| s.endpoints().any(&f))
}

/// Every endpoint matches `f`
pub fn every_endpoint<F>(f: F) -> Predicate
where
    F: Fn(&Endpoint) -> bool + Send + Sync + 'static,
{
    Arc::new(move |s: &Service| s.endpoints().all(&f))
}
