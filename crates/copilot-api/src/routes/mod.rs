//! # Route Modules
//!
//! - [`health`] — `GET /` and `GET /health`
//! - [`compliance`] — `POST /api/compliance/check-message`

pub mod compliance;
pub mod health;
