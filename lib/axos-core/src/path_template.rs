//! Endpoint path templating.
//!
//! AXOS endpoints are written as templates such as
//! `/ems/subscriber/org/{org-id}/account/{account-name}`. The placeholders are
//! filled from the query parameters of the same call, and the parameters that
//! were used are taken out of the query so they do not show up twice.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;

use crate::Query;

/// Characters escaped in substituted values so a value can never add a path
/// segment, a query string, a fragment or a scheme.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b':')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// Resolves an endpoint path template against a base URL and query.
///
/// Returns the final path (relative to `base_url`) and the query parameters
/// that were not consumed by a placeholder.
///
/// - When `path` starts with `/` and `base_url` ends with `/`, every leading
///   and trailing `/` is stripped from `path` so the join does not produce
///   `//`.
/// - Every `{name}` token whose query value is a string or a number is
///   replaced (all occurrences) and `name` is removed from the query. Booleans,
///   nulls, arrays and objects are never substituted and stay in the query.
///   Neither are `.` and `..`, which would otherwise act as dot segments.
/// - Parameters are processed in query insertion order.
///
/// # Example
///
/// ```
/// use axos_core::{Query, format_path};
///
/// let query = Query::new()
///     .param("org-id", "Calix")
///     .param("account-name", 777)
///     .param("verbose", true);
///
/// let (path, rest) = format_path(
///     "https://smx.example.net:18443/rest/v1/",
///     "/ems/subscriber/org/{org-id}/account/{account-name}",
///     query,
/// );
///
/// assert_eq!(path, "ems/subscriber/org/Calix/account/777");
/// assert_eq!(rest, Query::new().param("verbose", true));
/// ```
#[must_use]
pub fn format_path(base_url: &str, path: &str, mut query: Query) -> (String, Query) {
    let mut path = trim_path(base_url, path).to_string();

    if query.is_empty() || !path.contains('{') {
        return (path, query);
    }

    let mut consumed = Vec::new();
    for (name, value) in &query {
        let Some(replacement) = scalar_segment(value) else {
            continue;
        };
        let token = format!("{{{name}}}");
        if path.contains(&token) {
            path = path.replace(&token, &replacement);
            consumed.push(name.clone());
        }
    }

    for name in &consumed {
        query.remove(name);
    }

    (path, query)
}

/// Strips leading and trailing `/` from `path` when both sides of the join
/// would otherwise contribute a separator.
fn trim_path<'a>(base_url: &str, path: &'a str) -> &'a str {
    if path.starts_with('/') && base_url.ends_with('/') {
        path.trim_matches('/')
    } else {
        path
    }
}

/// Percent-encoded string form of a substitutable value.
fn scalar_segment(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };
    // URL parsers treat these (even percent-encoded) as dot segments.
    if raw == "." || raw == ".." {
        return None;
    }
    Some(utf8_percent_encode(&raw, PATH_SEGMENT_ENCODE_SET).to_string())
}
