//! Gateway Audit CLI
//!
//! Command-line interface for auditing a gateway configuration model.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use gateway_audit::config::parse_severities;
use gateway_audit::loader::{load_config, load_service};
use gateway_audit::{AuditConfig, AuditEngine, ReportView, RuleSelector, Severity};

/// Version information
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code when findings reach the `--fail-on` severity
const EXIT_FINDINGS: u8 = 2;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "gateway-audit", version)]
#[command(about = "Audit an API gateway configuration for security and operational risks")]
struct Args {
    /// Path to the configuration model (JSON)
    #[arg(long, short, env = "AUDIT_MODEL")]
    model: PathBuf,

    /// Path to an audit configuration file (JSON)
    #[arg(long, short, env = "AUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Rules to ignore (comma-separated: 2.1.2, 4.*, @telemetry)
    #[arg(long, short, env = "AUDIT_IGNORE")]
    ignore: Option<String>,

    /// Severities to report (comma-separated: critical,warning,info)
    #[arg(long, short, env = "AUDIT_SEVERITY")]
    severity: Option<String>,

    /// Exit with a non-zero code when a finding is at least this severe
    #[arg(long, env = "AUDIT_FAIL_ON")]
    fail_on: Option<Severity>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long, env = "AUDIT_VERBOSE")]
    verbose: bool,
}

impl Args {
    /// Merge the config file (if any) with command-line overrides
    fn to_config(&self) -> Result<AuditConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => AuditConfig::default(),
        };

        if let Some(list) = &self.ignore {
            config = config.ignoring(RuleSelector::parse_list(list));
        }

        if let Some(list) = &self.severity {
            config = config.with_severities(parse_severities(list)?);
        }

        Ok(config)
    }
}

fn run(args: &Args) -> Result<bool> {
    let config = args.to_config()?;

    info!(
        ignored = config.ignore.len(),
        severities = ?config.severities,
        fail_on = ?args.fail_on,
        "Configuration loaded"
    );

    let engine = AuditEngine::new(config)?;
    let service = load_service(&args.model)?;
    let report = engine.evaluate(&service);

    let view = ReportView::from(&report);
    let output = if args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{}", output);

    let summary = report.summary();
    info!(
        findings = summary.total(),
        critical = summary.critical,
        warning = summary.warning,
        info = summary.info,
        "Audit finished"
    );

    Ok(args.fail_on.is_some_and(|threshold| report.has_at_least(threshold)))
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the report
    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("{}={}", env!("CARGO_CRATE_NAME"), log_level))
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(version = VERSION, model = ?args.model, "Starting gateway audit");

    match run(&args) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(EXIT_FINDINGS),
        Err(e) => {
            error!(error = %e, "Audit failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
