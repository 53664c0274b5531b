//! Request dispatch against one AXOS server.
//!
//! [`Transport`] turns `(path, query, body)` into an HTTP request: the path
//! template is filled from the query, resolved against the base URL, the
//! leftover parameters become the query string, and POST/PUT carry the body
//! as JSON. The raw response comes back undecoded.

use bytes::Bytes;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::middleware::DefaultHeadersLayer;
use crate::{
    AxosConfig, HttpClient, HyperClient, Method, Query, Request, Response, Result, format_path,
};

/// HTTP transport bound to one base URL.
///
/// Holds no per-call state: a single instance (or its clones) can serve any
/// number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Transport<C = HyperClient> {
    client: C,
    base: String,
    base_url: Url,
}

impl Transport<HyperClient> {
    /// Build a transport from server settings.
    ///
    /// The underlying [`HyperClient`] adds the default JSON headers, basic
    /// authentication and request logging to every call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] if the base URL does not parse, or
    /// [`crate::Error::Tls`] if the TLS configuration cannot be built.
    pub fn new(config: &AxosConfig) -> Result<Self> {
        let client = HyperClient::builder()
            .config(&config.client_config())
            .layer(DefaultHeadersLayer::json(config.user_agent.clone()))
            .with_basic_auth(&config.username, &config.password)
            .with_debug_logging()
            .build()?;

        Self::with_client(client, &config.url)
    }
}

impl<C> Transport<C> {
    /// Build a transport around any [`HttpClient`].
    ///
    /// The client is used as is: headers and authentication are its concern.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] if the base URL does not parse.
    pub fn with_client(client: C, base_url: impl Into<String>) -> Result<Self> {
        let base = base_url.into();
        let base_url = Url::parse(&base)?;
        Ok(Self {
            client,
            base,
            base_url,
        })
    }

    /// Base URL as configured.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Build the request for a call without sending it.
    ///
    /// A body is attached only for methods that carry one, and only when it
    /// is present and not `null`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] if the resolved path cannot be
    /// joined to the base URL, or [`crate::Error::JsonSerialization`] if the
    /// body does not serialize.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<&Value>,
    ) -> Result<Request<Bytes>> {
        let (path, rest) = format_path(&self.base, path, query);
        let url = self.base_url.join(&path)?;
        debug!(%method, %path, "resolved endpoint");

        let builder = Request::builder(method, url).query(&rest);
        let builder = match body {
            Some(body) if method.has_body() && !body.is_null() => builder.json(body)?,
            _ => builder,
        };
        Ok(builder.build())
    }
}

impl<C: HttpClient> Transport<C> {
    /// Send a call with an explicit method.
    ///
    /// # Errors
    ///
    /// Returns the request construction errors of [`Transport::request`] and
    /// the transport errors of the client. HTTP error statuses are not errors.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<&Value>,
    ) -> Result<Response<Bytes>> {
        let request = self.request(method, path, query, body)?;
        self.client.execute(request).await
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`Transport::send`].
    pub async fn get(&self, path: &str, query: Query) -> Result<Response<Bytes>> {
        self.send(Method::Get, path, query, None).await
    }

    /// `POST path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`Transport::send`].
    pub async fn post(
        &self,
        path: &str,
        query: Query,
        body: Option<&Value>,
    ) -> Result<Response<Bytes>> {
        self.send(Method::Post, path, query, body).await
    }

    /// `PUT path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`Transport::send`].
    pub async fn put(
        &self,
        path: &str,
        query: Query,
        body: Option<&Value>,
    ) -> Result<Response<Bytes>> {
        self.send(Method::Put, path, query, body).await
    }

    /// `DELETE path`. Never carries a body.
    ///
    /// # Errors
    ///
    /// See [`Transport::send`].
    pub async fn delete(&self, path: &str, query: Query) -> Result<Response<Bytes>> {
        self.send(Method::Delete, path, query, None).await
    }
}
