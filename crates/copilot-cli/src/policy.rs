//! # Policy Subcommand
//!
//! Prints the exact policy text that would head the prompt for a given
//! industry, jurisdiction and channel.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use copilot_core::{policy_for, Channel, Industry};

/// Arguments for `copilot policy`.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Industry whose rules to print (real_estate, finance, generic).
    #[arg(long)]
    pub industry: Industry,
    /// Region code interpolated into the policy.
    #[arg(long)]
    pub jurisdiction: Option<String>,
    /// Delivery channel (email, sms, phone_script, chat, other).
    #[arg(long)]
    pub channel: Option<Channel>,
}

/// Execute the policy subcommand.
pub fn run_policy(args: &PolicyArgs, out: &mut impl Write) -> Result<u8> {
    let policy = policy_for(args.industry, args.jurisdiction.as_deref(), args.channel);
    write!(out, "{policy}")?;
    Ok(0)
}
