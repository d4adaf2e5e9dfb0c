//! HTML parser for extracting SEO signals
//!
//! This module handles parsing HTML content to extract:
//! - Page title and meta description
//! - H1 heading count
//! - Image counts and missing alt text
//! - Internal link count

use crate::url::is_internal_link;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

/// SEO signals extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSignals {
    /// Trimmed text of the first `<title>`
    pub title: Option<String>,

    /// `content` of the first `<meta name="description">`
    pub meta_description: Option<String>,

    /// Number of `<h1>` elements
    pub h1_count: usize,

    /// Number of `<img>` elements
    pub total_images: usize,

    /// Number of `<img>` elements without usable alt text
    pub images_missing_alt: usize,

    /// Number of `<a href>` elements pointing at the same host
    pub total_internal_links: usize,

    /// Whether the page was requested over HTTPS
    pub uses_https: bool,
}

/// Parses HTML content and extracts SEO signals
///
/// Never fails: malformed markup is parsed leniently and missing elements
/// yield `None` or zero.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `source_url` - The URL the content was fetched from
///
/// # Example
///
/// ```
/// use seo_analyzer::analyzer::extract_signals;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><h1>Hi</h1></body></html>"#;
/// let source = Url::parse("https://example.com/").unwrap();
/// let signals = extract_signals(html, &source);
/// assert_eq!(signals.title, Some("Test".to_string()));
/// assert_eq!(signals.h1_count, 1);
/// assert!(signals.uses_https);
/// ```
pub fn extract_signals(html: &str, source_url: &Url) -> SeoSignals {
    let document = Html::parse_document(html);

    let images: Vec<ElementRef> = select_all(&document, "img");
    let images_missing_alt = images
        .iter()
        .filter(|img| {
            img.value()
                .attr("alt")
                .map_or(true, |alt| alt.trim().is_empty())
        })
        .count();

    SeoSignals {
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        h1_count: select_all(&document, "h1").len(),
        total_images: images.len(),
        images_missing_alt,
        total_internal_links: count_internal_links(&document, source_url),
        uses_https: source_url.scheme() == "https",
    }
}

/// Collects every element matching a static selector
fn select_all<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the first meta description, matching `name` case-insensitively
fn extract_meta_description(document: &Html) -> Option<String> {
    let meta_selector = Selector::parse("meta[name]").ok()?;

    document
        .select(&meta_selector)
        .find(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.eq_ignore_ascii_case("description"))
        })
        .and_then(|element| element.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

/// Counts `<a href>` elements that are internal to `source_url`
fn count_internal_links(document: &Html, source_url: &Url) -> usize {
    select_all(document, "a[href]")
        .into_iter()
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| is_internal_link(href, source_url))
        .count()
}
