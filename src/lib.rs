//! SEO Analyzer: single-page SEO scoring
//!
//! This crate fetches one web page, extracts a fixed set of SEO signals from its
//! HTML, and turns them into a deterministic 0-100 score with pass/fail findings.
//! Every failure along the way is mapped to a stable, classified error.

pub mod analyzer;
pub mod config;
pub mod server;
pub mod url;

use thiserror::Error;

/// Errors raised while validating an inbound analysis request
///
/// The `Display` text of each variant is the message returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL is required")]
    MissingField,

    #[error("URL must be a string")]
    InvalidType,

    #[error("Invalid URL format")]
    InvalidFormat,

    #[error("Only HTTP and HTTPS protocols are supported")]
    InvalidProtocol { scheme: String },

    #[error("Request body must be a JSON object")]
    InvalidBody,
}

/// Errors raised while fetching the target page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("DNS resolution failed for {url}")]
    DnsFailure { url: String },

    #[error("Connection refused by {url}")]
    ConnectionRefused { url: String },

    #[error("TLS handshake failed for {url}: {message}")]
    TlsError { url: String, message: String },

    #[error("Too many redirects from {url}")]
    TooManyRedirects { url: String },

    #[error("Target {url} returned client error {status}")]
    TargetClientError { url: String, status: u16 },

    #[error("Target {url} returned server error {status}")]
    TargetServerError { url: String, status: u16 },

    #[error("Target {url} returned unexpected status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Unsupported content type for {url}: {content_type:?}")]
    UnsupportedContentType { url: String, content_type: String },

    #[error("Empty content returned by {url}")]
    EmptyContent { url: String },

    #[error("Content from {url} exceeds {limit} bytes")]
    ContentTooLarge { url: String, limit: usize },

    #[error("Fetch failed for {url}: {message}")]
    Unknown { url: String, message: String },
}

/// Any failure of the analysis pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use analyzer::{
    classify, AnalysisResponse, Analyzer, ClassifiedError, FetchOptions, ScoreResult, SeoSignals,
};
pub use config::Config;
pub use crate::url::{parse_request, validate_url, AnalysisRequest};
