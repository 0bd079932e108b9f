//! # Middleware
//!
//! Tower layers applied to every route, outermost first:
//! CORS → body limit → TraceLayer → request metrics.

pub mod metrics;
