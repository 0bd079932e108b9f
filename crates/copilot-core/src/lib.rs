//! # copilot-core — Domain Types for the Compliance Copilot
//!
//! The leaf crate of the workspace. Defines the vocabulary every other crate
//! speaks: which industry a message belongs to, which channel it is sent on,
//! how risky it is, and the request/result shapes exchanged with the HTTP
//! surface and the model.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for industries and channels.** `Industry` selects the
//!    policy template with an exhaustive `match`; adding an industry is a new
//!    variant plus a template, and the compiler points at every site to update.
//!
//! 2. **Lenient wire parsing, strict text parsing.** Unknown industry strings
//!    on the wire select [`Industry::Generic`] and unknown channels select
//!    [`Channel::Other`]. `FromStr` stays strict for operator input.
//!
//! 3. **Pure policy selection.** [`policy::select_policy`] has no side
//!    effects and no error path.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `copilot-*` crates.
//! - No `.unwrap()` outside tests.
//! - OpenAPI schema derives are behind the `openapi` feature.

pub mod check;
pub mod domain;
pub mod error;
pub mod policy;

pub use check::{ComplianceCheckInput, ComplianceCheckResult, ComplianceIssue};
pub use domain::{Channel, Industry, RiskLevel};
pub use error::{ParseEnumError, ValidationError};
pub use policy::{policy_for, select_policy};
