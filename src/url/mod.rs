//! URL handling module
//!
//! This module validates the inbound analysis request and provides the hostname
//! helpers the extractor uses to decide whether a link is internal.

mod domain;
mod validate;

use serde_json::Value;
use url::Url;

use crate::ValidationError;

// Re-export main functions
pub use domain::{extract_domain, is_internal_link};
pub use validate::validate_url;

/// A validated request to analyze one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// The URL string exactly as the caller submitted it
    pub raw_url: String,

    /// The parsed absolute http(s) URL used for fetching
    pub url: Url,
}

impl AnalysisRequest {
    /// Builds a request from a raw URL string, validating it on the way
    pub fn new(raw_url: &str) -> Result<Self, ValidationError> {
        let url = validate_url(raw_url)?;
        Ok(Self {
            raw_url: raw_url.to_string(),
            url,
        })
    }
}

/// Validates a decoded JSON request body into an [`AnalysisRequest`]
///
/// # Validation Order
///
/// | Body | Error |
/// |------|-------|
/// | not a JSON object | `InvalidBody` |
/// | `url` absent, `null` or `""` | `MissingField` |
/// | `url` not a string | `InvalidType` |
/// | `url` not an absolute URL | `InvalidFormat` |
/// | scheme other than http/https | `InvalidProtocol` |
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use seo_analyzer::url::parse_request;
/// use seo_analyzer::ValidationError;
///
/// let request = parse_request(&json!({ "url": "https://example.com" })).unwrap();
/// assert_eq!(request.url.host_str(), Some("example.com"));
///
/// let err = parse_request(&json!({ "url": 12345 })).unwrap_err();
/// assert_eq!(err, ValidationError::InvalidType);
/// ```
pub fn parse_request(body: &Value) -> Result<AnalysisRequest, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::InvalidBody)?;

    match object.get("url") {
        None | Some(Value::Null) => Err(ValidationError::MissingField),
        Some(Value::String(raw)) if raw.is_empty() => Err(ValidationError::MissingField),
        Some(Value::String(raw)) => AnalysisRequest::new(raw),
        Some(_) => Err(ValidationError::InvalidType),
    }
}

/// Decodes raw body bytes and validates them
///
/// Malformed JSON is reported as `InvalidBody` so that callers always receive
/// a classified validation error instead of a decoder message.
pub fn parse_request_bytes(body: &[u8]) -> Result<AnalysisRequest, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejecting malformed request body: {}", e);
        ValidationError::InvalidBody
    })?;
    parse_request(&value)
}
