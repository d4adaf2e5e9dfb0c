//! Failure classification
//!
//! Every pipeline failure is mapped to a public `(status, label, message)`
//! triple through the single table in [`classify`]. Underlying causes are
//! logged, never returned to the caller.

use crate::{AnalysisError, FetchError};
use serde::Serialize;

/// Public shape of a failed analysis
///
/// Serializes as `{"error": category, "message": message}`; the status code
/// travels as the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
    #[serde(skip)]
    pub status_code: u16,

    #[serde(rename = "error")]
    pub category: &'static str,

    pub message: String,
}

impl ClassifiedError {
    fn new(status_code: u16, category: &'static str, message: impl Into<String>) -> Self {
        Self {
            status_code,
            category,
            message: message.into(),
        }
    }

    fn unexpected() -> Self {
        Self::new(
            500,
            "Internal Server Error",
            "An unexpected error occurred during analysis",
        )
    }
}

/// Classifies a pipeline failure
///
/// # Classification Table
///
/// | Failure | Status | Label |
/// |---------|--------|-------|
/// | Any validation failure | 400 | Invalid Request |
/// | Timeout | 408 | Request Timeout |
/// | Connection refused | 403 | Access Forbidden |
/// | Empty content | 422 | Unprocessable Content |
/// | Content too large | 413 | Payload Too Large |
/// | DNS failure | 502 | Bad Gateway |
/// | Target 5xx | 502 | Bad Gateway |
/// | Target 4xx | 400 | Bad Request |
/// | Anything else | 500 | Internal Server Error |
///
/// # Example
///
/// ```
/// use seo_analyzer::{classify, AnalysisError, ValidationError};
///
/// let classified = classify(&AnalysisError::from(ValidationError::MissingField));
/// assert_eq!(classified.status_code, 400);
/// assert_eq!(classified.category, "Invalid Request");
/// assert_eq!(classified.message, "URL is required");
/// ```
pub fn classify(error: &AnalysisError) -> ClassifiedError {
    match error {
        AnalysisError::Validation(validation) => {
            ClassifiedError::new(400, "Invalid Request", validation.to_string())
        }
        AnalysisError::Fetch(fetch) => classify_fetch(fetch),
    }
}

fn classify_fetch(error: &FetchError) -> ClassifiedError {
    match error {
        FetchError::Timeout { .. } => ClassifiedError::new(
            408,
            "Request Timeout",
            "The request timed out while fetching the URL",
        ),
        FetchError::ConnectionRefused { .. } => ClassifiedError::new(
            403,
            "Access Forbidden",
            "The website is blocking access or refusing connections",
        ),
        FetchError::EmptyContent { .. } => ClassifiedError::new(
            422,
            "Unprocessable Content",
            "The page returned empty or no HTML content",
        ),
        FetchError::ContentTooLarge { .. } => ClassifiedError::new(
            413,
            "Payload Too Large",
            "The page content exceeds the maximum allowed size",
        ),
        FetchError::DnsFailure { .. } => {
            ClassifiedError::new(502, "Bad Gateway", "Unable to resolve the domain name")
        }
        FetchError::TargetServerError { status, .. } => ClassifiedError::new(
            502,
            "Bad Gateway",
            format!("Target server returned error: {}", status),
        ),
        FetchError::TargetClientError { status, .. } => ClassifiedError::new(
            400,
            "Bad Request",
            format!("Target server returned error: {}", status),
        ),
        FetchError::TlsError { .. }
        | FetchError::TooManyRedirects { .. }
        | FetchError::UnexpectedStatus { .. }
        | FetchError::UnsupportedContentType { .. }
        | FetchError::Unknown { .. } => ClassifiedError::unexpected(),
    }
}
