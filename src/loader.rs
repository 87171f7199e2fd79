//! Model Loader
//!
//! Reads an already-built configuration model (and optional audit
//! configuration) from JSON. Translating a gateway's native configuration
//! into this shape is the job of an upstream tool.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::AuditConfig;
use crate::model::Service;

/// Parse a model from its JSON form
pub fn service_from_json(json: &str) -> Result<Service> {
    serde_json::from_str(json).context("Invalid configuration model")
}

/// Load a model from a JSON file
pub fn load_service(path: &Path) -> Result<Service> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file: {}", path.display()))?;

    let service = service_from_json(&content)
        .with_context(|| format!("Failed to parse model file: {}", path.display()))?;

    debug!(
        path = %path.display(),
        flags = ?service.flags(),
        endpoints = service.endpoints.len(),
        backends = service.all_backends().count(),
        agents = service.agents.len(),
        "Configuration model loaded"
    );

    Ok(service)
}

/// Load an audit configuration from a JSON file
pub fn load_config(path: &Path) -> Result<AuditConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read audit config: {}", path.display()))?;

    AuditConfig::from_json(&content)
        .with_context(|| format!("Failed to parse audit config: {}", path.display()))
}
