use crate::ValidationError;
use url::Url;

/// Validates that a string is an absolute http(s) URL
///
/// The URL is returned in the form the `url` crate parsed it; it is not
/// re-encoded or otherwise normalized.
///
/// # Arguments
///
/// * `raw` - The URL string submitted by the caller
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(ValidationError::MissingField)` - The string is empty
/// * `Err(ValidationError::InvalidFormat)` - The string is not an absolute URL
/// * `Err(ValidationError::InvalidProtocol)` - The scheme is not http or https
///
/// # Examples
///
/// ```
/// use seo_analyzer::url::validate_url;
///
/// assert!(validate_url("https://example.com/").is_ok());
/// assert!(validate_url("/relative/path").is_err());
/// assert!(validate_url("mailto:someone@example.com").is_err());
/// ```
pub fn validate_url(raw: &str) -> Result<Url, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MissingField);
    }

    let url = Url::parse(raw).map_err(|_| ValidationError::InvalidFormat)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::InvalidProtocol {
            scheme: other.to_string(),
        }),
    }
}
