//! HTTP client trait.
//!
//! [`HttpClient`] is the seam between request construction and the network.
//! The `axos` crate provides a hyper-based implementation; tests and callers
//! with special needs can plug in their own.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations execute one request and hand back the raw response,
/// whatever its status. Only failures of the round trip itself are errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}
