//! Security Rules (2.x)
//!
//! Transport security, response headers and cross-origin/auth exposure:
//! - TLS presence and state
//! - Insecure outgoing connections
//! - HTTP security headers, CORS, version banner
//! - JWT validation coverage

use crate::flags::{RouterFlags, ServiceFlags};
use crate::model::namespace;
use crate::rules::predicates::{
    capability_flag_unset, flag_set, flag_set_without, flag_unset, missing_capability,
    no_endpoint_has,
};
use crate::rules::{Category, Rule, RuleBuilder, Severity};
use anyhow::Result;

pub fn rules() -> Result<Vec<Rule>> {
    Ok(vec![
        // TLS
        RuleBuilder::new("2.1.1", "Insecure connections allowed")
            .category(Category::Security)
            .severity(Severity::Critical)
            .recommendation("Only allow secure connections (avoid insecure_connections).")
            .shared_predicate(flag_set(ServiceFlags::ALLOW_INSECURE_CONNECTIONS))
            .tags(&["security", "tls"])
            .build()?,

        RuleBuilder::new("2.1.2", "TLS not configured")
            .category(Category::Security)
            .severity(Severity::Critical)
            .recommendation("Enable TLS or use a terminator in front of the gateway.")
            .shared_predicate(flag_unset(ServiceFlags::HAS_TLS))
            .tags(&["security", "tls"])
            .build()?,

        RuleBuilder::new("2.1.3", "TLS disabled")
            .category(Category::Security)
            .severity(Severity::Critical)
            .recommendation("TLS is configured but its disable flag prevents from using it.")
            .shared_predicate(flag_set_without(ServiceFlags::HAS_TLS, ServiceFlags::TLS_ENABLED))
            .tags(&["security", "tls"])
            .build()?,

        RuleBuilder::new("2.1.7", "HTTP security headers not enforced")
            .category(Category::Security)
            .severity(Severity::Critical)
            .recommendation("Enable HTTP security header checks (security/http).")
            .shared_predicate(missing_capability(namespace::HTTP_SECURE))
            .tags(&["security", "headers", "httpsecure"])
            .build()?,

        // Exposure
        RuleBuilder::new("2.2.1", "Version header exposed")
            .category(Category::Security)
            .severity(Severity::Warning)
            .recommendation("Hide the version banner in runtime.")
            .shared_predicate(capability_flag_unset(
                namespace::ROUTER,
                RouterFlags::HIDE_VERSION_HEADER,
            ))
            .tags(&["security", "headers", "router"])
            .build()?,

        RuleBuilder::new("2.2.2", "CORS not configured")
            .category(Category::Security)
            .severity(Severity::Critical)
            .recommendation("Enable CORS.")
            .shared_predicate(missing_capability(namespace::CORS))
            .tags(&["security", "cors"])
            .build()?,

        RuleBuilder::new("2.2.3", "No JWT validation")
            .category(Category::Security)
            .severity(Severity::Critical)
            .recommendation("Protect your endpoints with JWT validation (auth/validator) or an equivalent authorization layer.")
            .shared_predicate(no_endpoint_has(namespace::JWT_VALIDATOR))
            .tags(&["security", "auth", "jwt"])
            .build()?,
    ])
}
