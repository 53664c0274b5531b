//! Core types for the Calix AXOS REST client.
//!
//! This crate holds everything that does not touch the network:
//! - [`Method`] and [`ALLOWED_METHODS`] - HTTP methods understood by AXOS
//! - [`Query`] - ordered query parameters, also used to fill path placeholders
//! - [`format_path`] - endpoint template substitution and slash trimming
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] and [`ApiResponse`] - raw and normalized responses
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution

mod body;
mod client;
mod error;
mod method;
mod path_template;
pub mod prelude;
mod query;
mod request;
mod response;

pub use body::{JSON_CONTENT_TYPE, decode_json, from_json, from_value, to_json};
pub use client::HttpClient;
pub use error::{Error, Result};
pub use method::{ALLOWED_METHODS, Method};
pub use path_template::format_path;
pub use query::Query;
pub use request::{Request, RequestBuilder};
pub use response::{ApiResponse, Headers, Response};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
