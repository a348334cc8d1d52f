//! Request Validation
//!
//! [`ValidatedJson`] runs the full body pipeline before a handler sees it:
//! Content-Type check, JSON parse, deserialisation into the target shape,
//! then [`Validate`]. Every rejection is an [`AppError`] with status 400, and
//! field-level problems are carried in its validation tree.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use kernel::error::app_error::AppError;
use kernel::validation::{Validate, ValidationErrors};
use serde::de::DeserializeOwned;

/// JSON body that has been parsed and validated
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request("Failed to read request body").with_source(e))?;

        parse_body(&bytes).map(ValidatedJson)
    }
}

fn check_content_type(headers: &HeaderMap) -> Result<(), AppError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Err(AppError::bad_request("Missing Content-Type header"));
    };

    let content_type = String::from_utf8_lossy(value.as_bytes());
    if content_type.to_ascii_lowercase().contains("application/json") {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "Expected Content-Type: application/json, but got: {content_type}"
        )))
    }
}

/// Parse, deserialise and validate a raw body
pub fn parse_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::bad_request("You are not sending JSON data").with_source(e))?;

    let parsed: T = serde_path_to_error::deserialize(value)
        .map_err(|e| AppError::validation(shape_errors(&e)))?;

    parsed.validate().map_err(AppError::validation)?;

    Ok(parsed)
}

/// Attribute a serde shape error to the node it happened at
///
/// serde reports ``missing field `x` `` and ``unknown field `x`, expected ..``
/// against the enclosing object, so the named field is appended to the path.
/// Other failures (wrong type, bad enum value) stay on the node they hit.
fn shape_errors(err: &serde_path_to_error::Error<serde_json::Error>) -> ValidationErrors {
    let message = err.inner().to_string();
    let mut path: Vec<String> = err.path().iter().filter_map(segment_key).collect();

    let text = if let Some(field) = quoted_after(&message, "missing field `") {
        push_leaf(&mut path, field);
        "Required".to_string()
    } else if let Some(field) = quoted_after(&message, "unknown field `") {
        push_leaf(&mut path, field);
        "Unrecognized key".to_string()
    } else {
        message
    };

    let mut errors = ValidationErrors::new();
    let mut node = &mut errors;
    for key in &path {
        node = node.field(key);
    }
    node.add(text);
    errors
}

fn segment_key(segment: &serde_path_to_error::Segment) -> Option<String> {
    use serde_path_to_error::Segment;

    match segment {
        Segment::Seq { index } => Some(index.to_string()),
        Segment::Map { key } => Some(key.clone()),
        Segment::Enum { variant } => Some(variant.clone()),
        _ => None,
    }
}

fn push_leaf(path: &mut Vec<String>, field: &str) {
    if path.last().map(String::as_str) != Some(field) {
        path.push(field.to_string());
    }
}

fn quoted_after<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = &message[message.find(prefix)? + prefix.len()..];
    rest.split_once('`').map(|(field, _)| field)
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}
