//! # copilot-cli — Command Line Interface for the Compliance Copilot
//!
//! ## Subcommands
//!
//! - `copilot policy` — print the reviewer instructions for an industry.
//! - `copilot schema` — print the strict output schema sent to the model.
//! - `copilot check` — run one compliance check and print the result.
//!
//! ```bash
//! copilot policy --industry real_estate --jurisdiction MD --channel email
//! copilot schema
//! echo "Guaranteed 12% returns!" | copilot check --industry finance --fail-on medium
//! ```
//!
//! Handlers write to a caller-supplied writer and return the process exit
//! code.

pub mod check;
pub mod policy;
pub mod schema;

/// Exit code when a check meets the `--fail-on` threshold.
pub const EXIT_RISK_THRESHOLD: u8 = 3;
