//! Default headers middleware.
//!
//! Sets a fixed group of headers on every request, leaving any value the
//! caller already put on the request untouched.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, JSON_CONTENT_TYPE, Request, Response, Result};

/// Layer that fills in default request headers.
///
/// # Example
///
/// ```ignore
/// use axos::middleware::DefaultHeadersLayer;
///
/// let layer = DefaultHeadersLayer::json("axos-rs/0.1.0");
/// ```
#[derive(Debug, Clone)]
pub struct DefaultHeadersLayer {
    headers: Arc<[(String, String)]>,
}

impl DefaultHeadersLayer {
    /// Create a layer from explicit name/value pairs.
    pub fn new(headers: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            headers: headers.into_iter().collect(),
        }
    }

    /// JSON `Accept` and `Content-Type` plus the given `User-Agent`.
    pub fn json(user_agent: impl Into<String>) -> Self {
        Self::new([
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("User-Agent".to_string(), user_agent.into()),
        ])
    }

    /// Configured headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeaders {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// Service that fills in default request headers.
#[derive(Debug, Clone)]
pub struct DefaultHeaders<S> {
    inner: S,
    headers: Arc<[(String, String)]>,
}

impl<S> Service<Request<Bytes>> for DefaultHeaders<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        apply_defaults(&mut request, &self.headers);

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(request).await })
    }
}

fn apply_defaults(request: &mut Request<Bytes>, defaults: &[(String, String)]) {
    let headers = request.headers_mut();
    for (name, value) in defaults {
        let present = headers.keys().any(|key| key.eq_ignore_ascii_case(name));
        if !present {
            headers.insert(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Method;

    use super::*;

    fn request() -> Request<Bytes> {
        let url = "https://smx.example.net/rest/v1/ems/subscriber"
            .parse()
            .expect("valid URL");
        Request::builder(Method::Get, url).build()
    }

    #[test]
    fn json_defaults() {
        let layer = DefaultHeadersLayer::json("axos-rs/test");
        let mut request = request();
        apply_defaults(&mut request, layer.headers());

        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(
            request.header("Content-Type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(request.header("User-Agent"), Some("axos-rs/test"));
    }

    #[test]
    fn existing_header_wins_regardless_of_case() {
        let layer = DefaultHeadersLayer::json("axos-rs/test");
        let mut request = request();
        request
            .headers_mut()
            .insert("user-agent".to_string(), "custom".to_string());
        apply_defaults(&mut request, layer.headers());

        assert_eq!(request.header("User-Agent"), Some("custom"));
        let user_agents = request
            .headers()
            .keys()
            .filter(|name| name.eq_ignore_ascii_case("user-agent"))
            .count();
        assert_eq!(user_agents, 1);
    }
}
