//! Prelude module for convenient imports.
//!
//! ```ignore
//! use axos::prelude::*;
//! ```

pub use crate::{
    ALLOWED_METHODS, ApiResponse, AxosClient, AxosConfig, Call, Error, HttpClient, HyperClient,
    Method, Query, Result, Transport,
};
pub use serde::{Deserialize, Serialize};
