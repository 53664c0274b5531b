//! Tower middleware layers for the AXOS HTTP client.
//!
//! Layers wrap the raw hyper service through [`crate::HyperClientBuilder::layer`].
//! The first layer added is the outermost one.
//!
//! # Available Layers
//!
//! - [`BasicAuthLayer`] - Adds `Authorization: Basic <base64>` header
//! - [`DefaultHeadersLayer`] - Fills in `Accept`, `Content-Type` and `User-Agent`
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! Any other `tower` layer working on [`crate::Request`] / [`crate::Response`]
//! can be added the same way, e.g. [`ConcurrencyLimitLayer`].
//!
//! # Example
//!
//! ```ignore
//! use axos::HyperClient;
//! use axos::middleware::ConcurrencyLimitLayer;
//!
//! let client = HyperClient::builder()
//!     .with_logging()
//!     .with_basic_auth("admin", "secret")
//!     .layer(ConcurrencyLimitLayer::new(8))
//!     .build()?;
//! ```

mod basic_auth;
mod default_headers;
mod logging;

pub use basic_auth::{BasicAuth, BasicAuthLayer};
pub use default_headers::{DefaultHeaders, DefaultHeadersLayer};
pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::limit::ConcurrencyLimitLayer;
pub use tower::{Layer, ServiceBuilder};
