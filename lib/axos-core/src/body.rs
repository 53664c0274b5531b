//! Body serialization utilities.

use bytes::Bytes;
use serde_json::Value;

use crate::Result;

/// Content type sent with every AXOS request.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use axos_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Subscriber { name: String }
///
/// let subscriber = Subscriber { name: "Alice".to_string() };
/// let bytes = to_json(&subscriber).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Decode a response body into an untyped JSON value.
///
/// An empty (or whitespace-only) body decodes to [`Value::Null`]; anything
/// else must be valid JSON.
///
/// # Errors
///
/// Returns [`crate::Error::Decode`] if the body is not valid JSON.
pub fn decode_json(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    from_json(bytes)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns [`crate::Error::Decode`] if deserialization fails, with the path to
/// the problematic field (e.g., "[0].resultCode").
///
/// # Example
///
/// ```
/// use axos_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Outcome {
///     #[serde(rename = "resultCode")]
///     result_code: String,
/// }
///
/// let bytes = br#"{"resultCode":"OBJ.5101"}"#;
/// let outcome: Outcome = from_json(bytes).expect("deserialize");
/// assert_eq!(outcome.result_code, "OBJ.5101");
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| crate::Error::decode(e.path().to_string(), e.inner().to_string()))?;
    deserializer
        .end()
        .map_err(|e| crate::Error::decode("", e.to_string()))?;
    Ok(value)
}

/// Deserialize an already decoded JSON value with path-aware error messages.
///
/// # Errors
///
/// Returns [`crate::Error::Decode`] if the value does not match `T`.
pub fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value)
        .map_err(|e| crate::Error::decode(e.path().to_string(), e.inner().to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct Subscriber {
            name: String,
            #[serde(rename = "customId")]
            custom_id: u32,
        }

        let subscriber = Subscriber {
            name: "PHPUnit".to_string(),
            custom_id: 777,
        };

        let bytes = to_json(&subscriber).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"name":"PHPUnit","customId":777}"#);
    }

    #[test]
    fn to_json_keeps_field_order_of_values() {
        let body = json!({"name": "t", "orgId": "Calix", "customId": 777});
        let bytes = to_json(&body).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"name":"t","orgId":"Calix","customId":777}"#);
    }

    #[test]
    fn decode_json_value() {
        let value = decode_json(br#"[{"resultCode":"OBJ.5101"}]"#).expect("decode");
        assert_eq!(value, json!([{"resultCode": "OBJ.5101"}]));
    }

    #[test]
    fn decode_json_empty_body_is_null() {
        assert_eq!(decode_json(b"").expect("empty"), Value::Null);
        assert_eq!(decode_json(b" \r\n").expect("blank"), Value::Null);
    }

    #[test]
    fn decode_json_rejects_html() {
        let err = decode_json(b"<html>Service Unavailable</html>").expect_err("not json");
        assert!(err.is_decode());
    }

    #[test]
    fn decode_json_rejects_trailing_garbage() {
        let err = decode_json(br#"{"a":1} trailing"#).expect_err("trailing characters");
        assert!(err.is_decode());
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Subscriber {
            #[allow(dead_code)]
            address: Address,
        }

        let result: Result<Subscriber> = from_json(br#"{"address":{}}"#);
        let msg = result.expect_err("should fail").to_string();
        assert!(msg.contains("address"), "Expected path 'address' in error: {msg}");
        assert!(msg.contains("city"), "Expected field 'city' in error: {msg}");
    }

    #[test]
    fn from_value_reports_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Outcome {
            #[allow(dead_code)]
            #[serde(rename = "resultCode")]
            result_code: String,
        }

        let err = from_value::<Vec<Outcome>>(json!([{"resultCode": 5}])).expect_err("wrong type");
        assert!(err.to_string().contains("[0].resultCode"), "got: {err}");
    }
}
