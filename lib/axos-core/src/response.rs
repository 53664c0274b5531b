//! HTTP response handling.
//!
//! [`Response`] is the raw result of one round trip: status, headers and the
//! undecoded body. [`ApiResponse`] is the normalized form handed to callers,
//! with the reason phrase resolved and the body decoded as JSON.
//!
//! # Example
//!
//! ```ignore
//! let response = client.full("/ems/subscriber/org/{org-id}/account/{account-name}").await?;
//! if response.result_code() == Some("COM.1003") {
//!     // account does not exist
//! }
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

/// Response headers: lower-case name to every value received, in order.
pub type Headers = HashMap<String, Vec<String>>;

// ============================================================================
// Raw Response
// ============================================================================

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: Headers,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        first_value(&self.headers, name)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, Headers, B) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Normalize into an [`ApiResponse`], decoding the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] if the body is neither empty nor valid JSON.
    pub fn normalize(self) -> crate::Result<ApiResponse> {
        let body = crate::decode_json(&self.body)?;
        Ok(ApiResponse {
            status: self.status,
            status_message: reason_phrase(self.status).to_string(),
            headers: self.headers,
            body,
        })
    }
}

// ============================================================================
// Normalized Response
// ============================================================================

/// Uniform view of an AXOS response, whatever the HTTP outcome.
///
/// The service reports application errors in the body with a `resultCode` /
/// `userMessage` pair, often alongside a 2xx status, so nothing here is
/// treated as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    status_message: String,
    headers: Headers,
    body: Value,
}

impl ApiResponse {
    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase for the status (`"OK"`, `"Not Found"`, ...).
    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        first_value(&self.headers, name)
    }

    /// Decoded body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Consume into the decoded body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Deserialize the decoded body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] with the failing JSON path.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_value(self.body.clone())
    }

    /// `resultCode` reported by the service, if any.
    ///
    /// Read from an object body, or from the first element of an array body
    /// (create/update/delete answer with a one-element array).
    #[must_use]
    pub fn result_code(&self) -> Option<&str> {
        self.outcome_field("resultCode")
    }

    /// `userMessage` reported by the service, if any.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        self.outcome_field("userMessage")
    }

    fn outcome_field(&self, name: &str) -> Option<&str> {
        let outcome = match &self.body {
            Value::Array(items) => items.first()?,
            other => other,
        };
        outcome.get(name)?.as_str()
    }
}

fn first_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .get(&name.to_ascii_lowercase())
        .and_then(|values| values.first())
        .map(String::as_str)
}

/// Canonical reason phrase for a status code, empty when unknown.
fn reason_phrase(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        let mut headers = Headers::new();
        for (name, value) in pairs {
            headers
                .entry((*name).to_string())
                .or_default()
                .push((*value).to_string());
        }
        headers
    }

    #[test]
    fn response_basic() {
        let response = Response::new(
            200,
            headers(&[("content-type", "application/json")]),
            Bytes::from(r#"{"name":"t"}"#),
        );

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn response_status_checks() {
        assert!(Response::new(404, Headers::new(), Bytes::new()).is_client_error());
        assert!(Response::new(500, Headers::new(), Bytes::new()).is_server_error());
    }

    #[test]
    fn response_keeps_repeated_headers() {
        let response = Response::new(
            200,
            headers(&[("set-cookie", "a=1"), ("set-cookie", "b=2")]),
            Bytes::new(),
        );
        assert_eq!(
            response.headers().get("set-cookie"),
            Some(&vec!["a=1".to_string(), "b=2".to_string()])
        );
        assert_eq!(response.header("Set-Cookie"), Some("a=1"));
    }

    #[test]
    fn response_text() {
        let response = Response::new(200, Headers::new(), Bytes::from("created"));
        assert_eq!(response.text().expect("text"), "created");
    }

    #[test]
    fn normalize_decodes_body_and_reason() {
        let raw = Response::new(
            201,
            headers(&[("x-request-id", "abc")]),
            Bytes::from(r#"[{"resultCode":"OBJ.5101","userMessage":"created"}]"#),
        );

        let response = raw.normalize().expect("valid json");

        assert_eq!(response.status(), 201);
        assert_eq!(response.status_message(), "Created");
        assert_eq!(response.header("X-Request-Id"), Some("abc"));
        assert_eq!(
            response.body(),
            &json!([{"resultCode": "OBJ.5101", "userMessage": "created"}])
        );
    }

    #[test]
    fn normalize_empty_body() {
        let response = Response::new(204, Headers::new(), Bytes::new())
            .normalize()
            .expect("empty body");
        assert_eq!(response.status_message(), "No Content");
        assert_eq!(response.body(), &Value::Null);
    }

    #[test]
    fn normalize_rejects_invalid_json() {
        let err = Response::new(502, Headers::new(), Bytes::from("Bad Gateway"))
            .normalize()
            .expect_err("not json");
        assert!(err.is_decode());
    }

    #[test]
    fn unknown_status_has_empty_reason() {
        let response = Response::new(599, Headers::new(), Bytes::new())
            .normalize()
            .expect("empty body");
        assert_eq!(response.status_message(), "");
    }

    #[test]
    fn outcome_from_array_body() {
        let response = Response::new(
            200,
            Headers::new(),
            Bytes::from(r#"[{"resultCode":"OBJ.5103","userMessage":"deleted"}]"#),
        )
        .normalize()
        .expect("json");

        assert_eq!(response.result_code(), Some("OBJ.5103"));
        assert_eq!(response.user_message(), Some("deleted"));
    }

    #[test]
    fn outcome_from_object_body() {
        let response = Response::new(
            404,
            Headers::new(),
            Bytes::from(r#"{"resultCode":"COM.1003","userMessage":"not found"}"#),
        )
        .normalize()
        .expect("json");

        assert_eq!(response.result_code(), Some("COM.1003"));
        assert_eq!(response.user_message(), Some("not found"));
    }

    #[test]
    fn outcome_absent_for_plain_data() {
        let response = Response::new(200, Headers::new(), Bytes::from(r#"{"name":"t"}"#))
            .normalize()
            .expect("json");
        assert_eq!(response.result_code(), None);
        assert_eq!(response.user_message(), None);
    }

    #[test]
    fn typed_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Subscriber {
            name: String,
            #[serde(rename = "customId")]
            custom_id: String,
        }

        let response = Response::new(
            200,
            Headers::new(),
            Bytes::from(r#"{"name":"PHPUnit","customId":"777"}"#),
        )
        .normalize()
        .expect("json");

        let subscriber: Subscriber = response.json().expect("typed");
        assert_eq!(
            subscriber,
            Subscriber {
                name: "PHPUnit".to_string(),
                custom_id: "777".to_string()
            }
        );
    }
}
