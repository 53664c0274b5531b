//! Prelude module for convenient imports.
//!
//! ```ignore
//! use axos_core::prelude::*;
//! ```

pub use crate::{
    ALLOWED_METHODS, ApiResponse, Error, HttpClient, Method, Query, Request, RequestBuilder,
    Response, Result, format_path,
};
