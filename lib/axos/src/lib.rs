//! Async client for the Calix AXOS (SMx) REST API.
//!
//! Calls are described with [`Call`] and sent through [`AxosClient`]. Paths
//! are endpoint templates whose `{placeholders}` are filled from the query
//! parameters; what is left of the query goes to the query string.
//!
//! # Example
//!
//! ```ignore
//! use axos::prelude::*;
//! use serde_json::json;
//!
//! let client = AxosClient::new(AxosConfig::from_env()?)?;
//!
//! let created = client
//!     .call(
//!         Call::post("/ems/subscriber")
//!             .body(json!({"name": "t", "customId": 777})),
//!     )
//!     .await?;
//!
//! let account = client
//!     .full(
//!         Call::get("/ems/subscriber/org/{org-id}/account/{account-name}")
//!             .query([("org-id", json!("Calix")), ("account-name", json!(777))]),
//!     )
//!     .await?;
//! println!("{} {:?}", account.status(), account.result_code());
//! ```

mod axos_client;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

// Re-export client types
pub use axos_client::{AxosClient, Call};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    AxosConfig, AxosConfigBuilder, ClientConfig, ClientConfigBuilder, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT, ENV_HOST, ENV_PASSWORD, ENV_USERNAME,
};
pub use transport::Transport;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use axos_core::{
    ALLOWED_METHODS, ApiResponse, Error, Headers, HttpClient, JSON_CONTENT_TYPE, Method, Query,
    Request, RequestBuilder, Response, Result, decode_json, format_path, from_json, from_value,
    to_json,
};

// Re-export http types for status codes and headers
pub use axos_core::{StatusCode, header};
