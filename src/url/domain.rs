use url::Url;

/// Hrefs with these prefixes are internal without resolution
const RELATIVE_PREFIXES: &[&str] = &["/", "./", "../"];

/// Extracts the hostname from a URL
///
/// The port is not part of the hostname. Hosts of special schemes are already
/// lowercased by the parser, so two URLs naming the same host compare equal.
///
/// # Arguments
///
/// * `url` - The URL to extract the hostname from
///
/// # Returns
///
/// * `Some(&str)` - The hostname
/// * `None` - If the URL has no host (e.g. `mailto:` or `data:` URLs)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_analyzer::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com"));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<&str> {
    url.host_str()
}

/// Decides whether an anchor's href points at the analyzed page's host
///
/// # Rules
///
/// 1. An href starting with `/`, `./` or `../` is internal as-is
/// 2. Otherwise the href is resolved against `source`; it is internal when the
///    resolved hostname equals the source hostname
/// 3. An href that fails to resolve is not internal
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_analyzer::url::is_internal_link;
///
/// let source = Url::parse("https://example.com/blog/").unwrap();
/// assert!(is_internal_link("/about", &source));
/// assert!(is_internal_link("post-1", &source));
/// assert!(is_internal_link("https://example.com/contact", &source));
/// assert!(!is_internal_link("https://other.com/", &source));
/// ```
pub fn is_internal_link(href: &str, source: &Url) -> bool {
    if RELATIVE_PREFIXES
        .iter()
        .any(|prefix| href.starts_with(prefix))
    {
        return true;
    }

    match source.join(href) {
        Ok(resolved) => match (extract_domain(&resolved), extract_domain(source)) {
            (Some(link_host), Some(source_host)) => link_host == source_host,
            _ => false,
        },
        Err(_) => false,
    }
}
