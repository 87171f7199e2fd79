//! Capability Namespaces
//!
//! Stable keys identifying a pluggable gateway feature inside a node's
//! capability map. The model loader must use exactly these strings.

/// HTTP server plugins; word 0 packs [`crate::flags::ServerPlugins`] bits
pub const SERVER_PLUGIN: &str = "plugin/http-server";
/// Router options; word 0 packs [`crate::flags::RouterFlags`] bits
pub const ROUTER: &str = "router";

// Authentication
pub const API_KEYS: &str = "auth/api-keys";
pub const JWT_VALIDATOR: &str = "auth/validator";
pub const JWT_SIGNER: &str = "auth/signer";

// Security
pub const HTTP_SECURE: &str = "security/http";
pub const CORS: &str = "security/cors";
pub const BOT_DETECTOR: &str = "security/bot-detector";

// Traffic management
pub const RATELIMIT_ROUTER: &str = "qos/ratelimit/router";
pub const RATELIMIT_PROXY: &str = "qos/ratelimit/proxy";
pub const CIRCUIT_BREAKER: &str = "qos/circuit-breaker";

// Telemetry
pub const OPENCENSUS: &str = "telemetry/opencensus";
pub const METRICS: &str = "telemetry/metrics";
pub const NEWRELIC: &str = "telemetry/newrelic";
pub const GANALYTICS: &str = "telemetry/ganalytics";
pub const INSTANA: &str = "telemetry/instana";

// Logging
pub const LOGGING: &str = "telemetry/logging";
pub const GELF: &str = "telemetry/gelf";
pub const LOGSTASH: &str = "telemetry/logstash";

/// Components able to export metrics
pub const TELEMETRY: &[&str] = &[OPENCENSUS, METRICS, NEWRELIC, GANALYTICS, INSTANA];

/// Components able to export traces
pub const TRACING: &[&str] = &[OPENCENSUS, NEWRELIC, INSTANA];

/// Structured logging components
pub const LOG_SINKS: &[&str] = &[LOGGING, GELF, LOGSTASH];

/// Every namespace known to the builtin rules
pub const ALL: &[&str] = &[
    SERVER_PLUGIN,
    ROUTER,
    API_KEYS,
    JWT_VALIDATOR,
    JWT_SIGNER,
    HTTP_SECURE,
    CORS,
    BOT_DETECTOR,
    RATELIMIT_ROUTER,
    RATELIMIT_PROXY,
    CIRCUIT_BREAKER,
    OPENCENSUS,
    METRICS,
    NEWRELIC,
    GANALYTICS,
    INSTANA,
    LOGGING,
    GELF,
    LOGSTASH,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_namespaces_are_unique() {
        let unique: HashSet<_> = ALL.iter().collect();
        assert_eq!(unique.len(), ALL.len());
    }

    #[test]
    fn test_groups_only_use_known_namespaces() {
        for ns in TELEMETRY.iter().chain(TRACING).chain(LOG_SINKS) {
            assert!(ALL.contains(ns), "unregistered namespace: {}", ns);
        }
    }
}
