//! # Check Subcommand
//!
//! Runs a single compliance check against the configured provider and
//! prints the result as JSON. Provider settings come from the same
//! `OPENAI_*` variables the API service reads.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use copilot_compliance::{CheckerSettings, ComplianceChecker};
use copilot_core::{Channel, ComplianceCheckInput, ComplianceCheckResult, Industry, RiskLevel};
use copilot_model_client::{ModelApiConfig, ModelClient, ResponsesAdapter};

use crate::EXIT_RISK_THRESHOLD;

/// Arguments for `copilot check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Industry whose policy applies (real_estate, finance, generic).
    #[arg(long)]
    pub industry: Industry,
    /// Region code, e.g. MD.
    #[arg(long)]
    pub jurisdiction: Option<String>,
    /// Delivery channel (email, sms, phone_script, chat, other).
    #[arg(long)]
    pub channel: Option<Channel>,
    /// Message text. Read from --file, or stdin, when omitted.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,
    /// File holding the message text.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Exit with code 3 when the result is at or above this risk level.
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<RiskLevel>,
    /// Risk level assumed when the model omits one.
    #[arg(long, env = "RISK_LEVEL_FALLBACK", default_value = "low")]
    pub risk_fallback: RiskLevel,
}

/// Execute the check subcommand against the live provider.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let config = ModelApiConfig::from_env().context("model provider not configured")?;
    let client = ModelClient::new(&config)?;
    let settings = CheckerSettings::from_model_config(&config, args.risk_fallback);
    run_check_with(args, Arc::new(client), settings, out)
}

/// Execute the check subcommand against an arbitrary backend.
pub fn run_check_with(
    args: &CheckArgs,
    adapter: Arc<dyn ResponsesAdapter>,
    settings: CheckerSettings,
    out: &mut impl Write,
) -> Result<u8> {
    let input = build_input(args, read_message(args)?)?;
    let checker = ComplianceChecker::new(adapter, settings);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let result = runtime.block_on(checker.check(&input))?;

    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    Ok(exit_code(&result, args.fail_on))
}

fn read_message(args: &CheckArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    let raw = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read message from stdin")?;
            buf
        }
    };
    Ok(raw.trim_end().to_string())
}

fn build_input(args: &CheckArgs, text: String) -> Result<ComplianceCheckInput> {
    let mut input = ComplianceCheckInput::new(text, args.industry)?;
    input.jurisdiction = args.jurisdiction.clone();
    input.channel = args.channel;
    Ok(input)
}

/// Process exit code for a finished check.
pub fn exit_code(result: &ComplianceCheckResult, fail_on: Option<RiskLevel>) -> u8 {
    match fail_on {
        Some(threshold) if result.risk_level >= threshold => EXIT_RISK_THRESHOLD,
        _ => 0,
    }
}
