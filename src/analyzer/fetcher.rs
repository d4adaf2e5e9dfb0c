//! HTTP fetcher implementation
//!
//! This module handles the single GET request of an analysis, including:
//! - Building the HTTP client with the identifying user agent
//! - Enforcing the timeout, redirect, content-type and size limits
//! - Classifying transport failures into [`FetchError`] variants

use crate::config::UserAgentConfig;
use crate::{FetchError, FetchResult};
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, Response, StatusCode};
use std::error::Error as StdError;
use std::io;
use std::time::Duration;
use url::Url;

/// Default hard timeout for one fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Maximum number of redirects followed automatically
pub const MAX_REDIRECTS: usize = 5;

/// Maximum accepted body size (10 MiB)
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Content types the analyzer is willing to parse
const SUPPORTED_CONTENT_TYPES: &[&str] = &["text/html", "text/plain"];

/// Limits applied to every fetch
///
/// The defaults are the fixed production limits. They are not read from the
/// configuration file; tests shorten them to exercise the failure paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Hard timeout covering connect, headers and body
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    pub max_redirects: usize,

    /// Maximum body size in bytes
    pub max_body_bytes: usize,

    /// Skip TLS certificate validation
    ///
    /// Enabled so that sites with self-signed or expired certificates can
    /// still be analyzed.
    pub accept_invalid_certs: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: MAX_REDIRECTS,
            max_body_bytes: MAX_BODY_BYTES,
            accept_invalid_certs: true,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `options` - The fetch limits
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use seo_analyzer::analyzer::{build_http_client, FetchOptions};
/// use seo_analyzer::config::UserAgentConfig;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetchOptions::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    options: &FetchOptions,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(options.timeout)
        .redirect(Policy::limited(options.max_redirects))
        .danger_accept_invalid_certs(options.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the HTML of a page
///
/// # Request Flow
///
/// 1. Send one GET request (redirects followed by the client policy)
/// 2. Reject any non-2xx status before reading the body
/// 3. Reject content types other than `text/html` and `text/plain`
/// 4. Read the body, aborting once it exceeds `max_body_bytes`
/// 5. Reject empty or whitespace-only bodies
///
/// # Failure Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `Timeout` |
/// | Name resolution failed | `DnsFailure` |
/// | Connection refused/reset | `ConnectionRefused` |
/// | TLS handshake failed | `TlsError` |
/// | Redirect limit hit | `TooManyRedirects` |
/// | HTTP 4xx | `TargetClientError` |
/// | HTTP 5xx | `TargetServerError` |
/// | Any other transport error | `Unknown` |
///
/// Nothing is retried.
pub async fn fetch_html(
    client: &Client,
    url: &Url,
    options: &FetchOptions,
) -> FetchResult<String> {
    tracing::debug!("Fetching {}", url);

    let response = client
        .get(url.clone())
        .timeout(options.timeout)
        .send()
        .await
        .map_err(|e| classify_transport_error(url, &e))?;

    check_status(url, response.status())?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    check_content_type(url, content_type.as_deref())?;

    let body = read_body(url, response, options.max_body_bytes).await?;

    if body.trim().is_empty() {
        return Err(FetchError::EmptyContent {
            url: url.to_string(),
        });
    }

    tracing::debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}

/// Maps a non-success status to its error
pub fn check_status(url: &Url, status: StatusCode) -> FetchResult<()> {
    let url = url.to_string();
    let status_code = status.as_u16();

    if status.is_success() {
        Ok(())
    } else if status.is_client_error() {
        Err(FetchError::TargetClientError {
            url,
            status: status_code,
        })
    } else if status.is_server_error() {
        Err(FetchError::TargetServerError {
            url,
            status: status_code,
        })
    } else {
        Err(FetchError::UnexpectedStatus {
            url,
            status: status_code,
        })
    }
}

/// Checks that the declared Content-Type is one the analyzer parses
///
/// A missing header is treated as unsupported.
pub fn check_content_type(url: &Url, content_type: Option<&str>) -> FetchResult<()> {
    let declared = content_type.unwrap_or("").to_ascii_lowercase();

    if SUPPORTED_CONTENT_TYPES
        .iter()
        .any(|supported| declared.contains(supported))
    {
        Ok(())
    } else {
        Err(FetchError::UnsupportedContentType {
            url: url.to_string(),
            content_type: content_type.unwrap_or("").to_string(),
        })
    }
}

/// Reads the body chunk by chunk, stopping as soon as it exceeds `limit`
async fn read_body(url: &Url, mut response: Response, limit: usize) -> FetchResult<String> {
    let too_large = || FetchError::ContentTooLarge {
        url: url.to_string(),
        limit,
    };

    if let Some(declared) = response.content_length() {
        if declared > limit as u64 {
            return Err(too_large());
        }
    }

    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| classify_transport_error(url, &e))?
    {
        if bytes.len() + chunk.len() > limit {
            return Err(too_large());
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Classifies a reqwest transport error
///
/// reqwest exposes timeouts and redirect failures directly. Refused
/// connections surface as an `io::Error` in the source chain. Resolver and
/// TLS failures only carry a description, so those are recognized from the
/// chain's messages.
pub fn classify_transport_error(url: &Url, error: &reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error.is_timeout() || has_io_error_kind(error, &[io::ErrorKind::TimedOut]) {
        return FetchError::Timeout { url };
    }

    if error.is_redirect() {
        return FetchError::TooManyRedirects { url };
    }

    if has_io_error_kind(
        error,
        &[
            io::ErrorKind::ConnectionRefused,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionAborted,
        ],
    ) {
        return FetchError::ConnectionRefused { url };
    }

    // The outermost message embeds the URL, so only the causes are inspected
    let messages: Vec<String> = error_chain(error)
        .skip(1)
        .map(|e| e.to_string().to_ascii_lowercase())
        .collect();

    if messages
        .iter()
        .any(|m| m.starts_with("dns error") || m.contains("failed to lookup address"))
    {
        return FetchError::DnsFailure { url };
    }

    if messages
        .iter()
        .any(|m| m.contains("certificate") || m.contains("handshake") || m.contains("tls"))
    {
        return FetchError::TlsError {
            url,
            message: describe(error),
        };
    }

    FetchError::Unknown {
        url,
        message: describe(error),
    }
}

/// Iterates over an error and all of its sources
fn error_chain<'a>(
    error: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(error), |&e| e.source())
}

fn has_io_error_kind(error: &reqwest::Error, kinds: &[io::ErrorKind]) -> bool {
    error_chain(error)
        .filter_map(|e| e.downcast_ref::<io::Error>())
        .any(|io_error| kinds.contains(&io_error.kind()))
}

/// Joins the chain into one line, e.g. `error sending request: tcp connect error`
fn describe(error: &reqwest::Error) -> String {
    error_chain(error)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
