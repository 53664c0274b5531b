//! High-level AXOS client.
//!
//! [`AxosClient`] is the single entry point most callers need: describe a
//! call with [`Call`], hand it to [`AxosClient::call`] for the decoded body or
//! to [`AxosClient::full`] for the whole [`ApiResponse`].

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    ApiResponse, AxosConfig, HttpClient, HyperClient, Method, Query, Result, Transport,
};

/// One logical API call: endpoint template, method, parameters and body.
///
/// A bare path converts into a `GET` call:
///
/// ```
/// use axos::{Call, Method};
///
/// let call: Call = "/ems/subscriber".into();
/// assert_eq!(call.method_kind(), Method::Get);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Call {
    path: String,
    method: Method,
    query: Query,
    body: Option<Value>,
}

impl Call {
    /// A `GET` call to `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// A `GET` call to `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// A `POST` call to `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).with_method(Method::Post)
    }

    /// A `PUT` call to `path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(path).with_method(Method::Put)
    }

    /// A `DELETE` call to `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path).with_method(Method::Delete)
    }

    /// Set the method by name, case-insensitively.
    ///
    /// Unknown names fall back to `GET` with a warning; parse the name with
    /// [`str::parse`] first to reject them instead.
    #[must_use]
    pub fn method(mut self, name: &str) -> Self {
        if name.parse::<Method>().is_err() {
            warn!(method = name, "unsupported HTTP method, sending GET");
        }
        self.method = Method::from_name(name);
        self
    }

    /// Set the method.
    #[must_use]
    pub const fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the path and query parameters.
    #[must_use]
    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the path and query parameters from any value serializing to a
    /// JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidQuery`] if the value is not object-like.
    pub fn query_from<T: Serialize + ?Sized>(mut self, query: &T) -> Result<Self> {
        self.query = Query::from_serialize(query)?;
        Ok(self)
    }

    /// Set the JSON body. Only `POST` and `PUT` send it.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the JSON body from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonSerialization`] if serialization fails.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Endpoint path template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolved method.
    #[must_use]
    pub const fn method_kind(&self) -> Method {
        self.method
    }

    /// Path and query parameters.
    #[must_use]
    pub const fn query_params(&self) -> &Query {
        &self.query
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body_value(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl From<&str> for Call {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Call {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Client for the Calix AXOS (SMx) REST API.
///
/// # Example
///
/// ```ignore
/// use axos::{AxosClient, AxosConfig, Call};
///
/// let client = AxosClient::new(AxosConfig::from_env()?)?;
///
/// let subscriber = client
///     .call(
///         Call::get("/ems/subscriber/org/{org-id}/account/{account-name}")
///             .query([("org-id", "Calix"), ("account-name", "777")]),
///     )
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct AxosClient<C = HyperClient> {
    transport: Transport<C>,
}

impl AxosClient<HyperClient> {
    /// Build a client for one server.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] for an unparseable base URL, or
    /// [`crate::Error::Tls`] if the TLS setup fails.
    pub fn new(config: AxosConfig) -> Result<Self> {
        Ok(Self::with_transport(Transport::new(&config)?))
    }
}

impl<C> AxosClient<C> {
    /// Build a client over an existing transport.
    #[must_use]
    pub const fn with_transport(transport: Transport<C>) -> Self {
        Self { transport }
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Transport<C> {
        &self.transport
    }
}

impl<C: HttpClient> AxosClient<C> {
    /// Perform a call and return the decoded body.
    ///
    /// Application-level failures (`resultCode` / `userMessage` bodies) and
    /// HTTP error statuses come back as data.
    ///
    /// # Errors
    ///
    /// Returns a transport error, or [`crate::Error::Decode`] if the body is
    /// not JSON.
    pub async fn call(&self, call: impl Into<Call>) -> Result<Value> {
        self.full(call).await.map(ApiResponse::into_body)
    }

    /// Perform a call and return the normalized response.
    ///
    /// # Errors
    ///
    /// See [`AxosClient::call`].
    pub async fn full(&self, call: impl Into<Call>) -> Result<ApiResponse> {
        let Call {
            path,
            method,
            query,
            body,
        } = call.into();

        let response = match method {
            Method::Post => self.transport.post(&path, query, body.as_ref()).await?,
            Method::Put => self.transport.put(&path, query, body.as_ref()).await?,
            Method::Delete => self.transport.delete(&path, query).await?,
            Method::Get => self.transport.get(&path, query).await?,
        };

        response.normalize().inspect_err(|err| {
            debug!(%method, %path, error = %err, "response body is not JSON");
        })
    }
}
