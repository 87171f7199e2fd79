//! Gateway Audit Library
//!
//! Audits an API gateway configuration for security and operational risks.
//! A catalog of named rules is evaluated against an in-memory model of the
//! configuration, producing an ordered report of findings with severity and
//! remediation guidance.
//!
//! # Features
//!
//! - **Packed flag registry**: documented bit positions for every packed field
//! - **Configuration model**: service → endpoint → backend tree with capability maps
//! - **Rule catalog**: 26 builtin rules across authentication, security,
//!   traffic management, telemetry and structure
//! - **Rule selection**: ignore lists, allow-lists and severity filters
//!
//! # Example
//!
//! ```ignore
//! use gateway_audit::{AuditConfig, AuditEngine, Service};
//!
//! let engine = AuditEngine::new(AuditConfig::default())?;
//! let report = engine.evaluate(&Service::new());
//! for finding in report.sorted_by_severity() {
//!     println!("[{}] {}: {}", finding.severity, finding.rule_id, finding.recommendation);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod flags;
pub mod loader;
pub mod model;
pub mod report;
pub mod rules;

// Re-exports for convenience
pub use config::{AuditConfig, RuleSelector};
pub use engine::{evaluate, AuditEngine};
pub use flags::{test_bit, EndpointFlags, PackedFlags, RouterFlags, ServerPlugins, ServiceFlags};
pub use model::{namespace, Agent, Backend, Capability, ConfigNode, Details, Endpoint, Service};
pub use report::{AuditReport, Finding, ReportView, SeveritySummary};
pub use rules::{Category, Rule, RuleBuilder, RuleCatalog, Severity};
