//! Authentication Rules (1.x)
//!
//! Flags weak authentication schemes exposed at the gateway edge.

use crate::flags::ServerPlugins;
use crate::model::namespace;
use crate::rules::predicates::{capability_flag_set, has_capability};
use crate::rules::{Category, Rule, RuleBuilder, Severity};
use anyhow::Result;

pub fn rules() -> Result<Vec<Rule>> {
    Ok(vec![
        RuleBuilder::new("1.1.1", "Basic authentication enabled")
            .category(Category::Authentication)
            .severity(Severity::Warning)
            .recommendation("Implement more secure alternatives than Basic Auth to protect your data.")
            .shared_predicate(capability_flag_set(
                namespace::SERVER_PLUGIN,
                ServerPlugins::BASIC_AUTH,
            ))
            .tags(&["auth", "basic-auth"])
            .build()?,

        RuleBuilder::new("1.1.2", "API keys enabled")
            .category(Category::Authentication)
            .severity(Severity::Warning)
            .recommendation("Implement more secure alternatives than API Keys to protect your data.")
            .shared_predicate(has_capability(namespace::API_KEYS))
            .tags(&["auth", "api-keys"])
            .build()?,
    ])
}
