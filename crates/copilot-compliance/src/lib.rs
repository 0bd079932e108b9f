//! # copilot-compliance — Compliance Check Orchestration
//!
//! Turns a [`ComplianceCheckInput`](copilot_core::ComplianceCheckInput) into
//! a [`ComplianceCheckResult`](copilot_core::ComplianceCheckResult) with a
//! single call to the model:
//!
//! - [`prompt`] builds the prompt and the strict `ComplianceCheckResult`
//!   output schema.
//! - [`extract`] reads the first content block of the reply.
//! - [`normalize`] fills defaults for anything the model left out and
//!   reports what it filled.
//! - [`checker`] wires these together with a timeout, a tracing span and
//!   metrics.
//!
//! ## Crate Policy
//!
//! - The model backend is reached only through
//!   [`ResponsesAdapter`](copilot_model_client::ResponsesAdapter).
//! - One attempt per check. No retries, no caching.
//! - Message text never appears in logs.

pub mod checker;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod prompt;

pub use checker::{CheckerSettings, ComplianceChecker};
pub use error::CheckError;
pub use normalize::{normalize, Defaulted, Normalized};
pub use prompt::{build_prompt, output_schema, SCHEMA_NAME};
