//! # copilot-model-client -- Typed Rust client for the model provider
//!
//! Provides typed access to the provider's Responses endpoint, the single
//! external collaborator of the compliance copilot:
//! - **Request**: one prompt, an output-token cap, and a strict JSON schema.
//! - **Response**: output items holding `output_text`, `output_json` or
//!   `refusal` content blocks.
//!
//! ## Architecture
//!
//! Callers depend on the [`ResponsesAdapter`] trait, not on HTTP. The live
//! implementation is [`ModelClient`]; [`MockResponsesAdapter`] replays a
//! scripted reply for tests. Neither retries.

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod responses;

pub use adapter::{MockReply, MockResponsesAdapter, ResponsesAdapter};
pub use client::ModelClient;
pub use config::{ConfigError, ModelApiConfig};
pub use error::ModelApiError;
pub use responses::{ContentBlock, ModelResponse, ResponsesRequest, Usage};
