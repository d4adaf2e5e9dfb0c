//! Analysis pipeline
//!
//! Runs validate → fetch → extract → score, short-circuiting on the first
//! failure. Holds no per-request state; one [`Analyzer`] serves every request.

use super::classify::{classify, ClassifiedError};
use super::fetcher::{build_http_client, fetch_html, FetchOptions};
use super::parser::{extract_signals, SeoSignals};
use super::scorer::{score_signals, ScoreResult};
use crate::config::UserAgentConfig;
use crate::url::{parse_request, parse_request_bytes, AnalysisRequest};
use crate::{AnalysisError, FetchError};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use url::Url;

/// Successful analysis as returned to API consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// The URL exactly as submitted
    pub url: String,

    /// Score in `0..=100`
    pub seo_score: u8,

    /// `passed_checks` followed by `issues`
    pub checks: Vec<String>,

    /// Failed check messages
    pub issues: Vec<String>,

    /// Passed check messages
    pub passed_checks: Vec<String>,
}

impl AnalysisResponse {
    /// Merges a score result into the response shape
    pub fn new(url: impl Into<String>, result: &ScoreResult) -> Self {
        let checks = result
            .passed_checks
            .iter()
            .chain(result.issues.iter())
            .cloned()
            .collect();

        Self {
            url: url.into(),
            seo_score: result.score,
            checks,
            issues: result.issues.clone(),
            passed_checks: result.passed_checks.clone(),
        }
    }
}

/// Signals and score of one analyzed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAnalysis {
    pub signals: SeoSignals,
    pub result: ScoreResult,
}

/// Extracts and scores already-fetched HTML
///
/// Pure: identical input yields identical output.
pub fn analyze_html(html: &str, source_url: &Url) -> PageAnalysis {
    let signals = extract_signals(html, source_url);
    let result = score_signals(&signals);
    PageAnalysis { signals, result }
}

/// Entry point of the analysis pipeline
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use seo_analyzer::analyzer::Analyzer;
/// use seo_analyzer::config::UserAgentConfig;
///
/// # async fn example() {
/// let analyzer = Analyzer::new(&UserAgentConfig::default()).unwrap();
/// match analyzer.respond_to_url("https://example.com").await {
///     Ok(response) => println!("Score: {}", response.seo_score),
///     Err(classified) => println!("{}: {}", classified.category, classified.message),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: Client,
    options: FetchOptions,
}

impl Analyzer {
    /// Creates an analyzer with the fixed production fetch limits
    pub fn new(user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Self::with_options(user_agent, FetchOptions::default())
    }

    /// Creates an analyzer with custom fetch limits
    pub fn with_options(
        user_agent: &UserAgentConfig,
        options: FetchOptions,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, &options)?;
        Ok(Self { client, options })
    }

    /// The fetch limits in use
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetches, extracts and scores a validated request
    #[instrument(name = "analyze", skip_all, fields(url = %request.raw_url))]
    pub async fn analyze_request(
        &self,
        request: &AnalysisRequest,
    ) -> crate::Result<PageAnalysis> {
        let html = fetch_html(&self.client, &request.url, &self.options).await?;
        let analysis = analyze_html(&html, &request.url);

        tracing::info!(
            score = analysis.result.score,
            issues = analysis.result.issues.len(),
            "Analysis complete"
        );
        Ok(analysis)
    }

    /// Validates a raw URL string, then analyzes it
    pub async fn analyze_url(&self, raw_url: &str) -> crate::Result<AnalysisResponse> {
        let request = AnalysisRequest::new(raw_url)?;
        self.analyze_validated(&request).await
    }

    /// Validates a decoded JSON body, then analyzes it
    pub async fn analyze_value(&self, body: &Value) -> crate::Result<AnalysisResponse> {
        let request = parse_request(body)?;
        self.analyze_validated(&request).await
    }

    /// Validates raw body bytes, then analyzes them
    pub async fn analyze_body(&self, body: &[u8]) -> crate::Result<AnalysisResponse> {
        let request = parse_request_bytes(body)?;
        self.analyze_validated(&request).await
    }

    /// Runs the pipeline on raw body bytes and classifies any failure
    pub async fn respond(&self, body: &[u8]) -> Result<AnalysisResponse, ClassifiedError> {
        self.analyze_body(body).await.map_err(|e| classify_logged(&e))
    }

    /// Runs the pipeline on a URL string and classifies any failure
    pub async fn respond_to_url(&self, raw_url: &str) -> Result<AnalysisResponse, ClassifiedError> {
        self.analyze_url(raw_url).await.map_err(|e| classify_logged(&e))
    }

    async fn analyze_validated(
        &self,
        request: &AnalysisRequest,
    ) -> crate::Result<AnalysisResponse> {
        let analysis = self.analyze_request(request).await?;
        Ok(AnalysisResponse::new(
            request.raw_url.clone(),
            &analysis.result,
        ))
    }
}

/// Classifies a failure, logging the cause that the response will not carry
pub fn classify_logged(error: &AnalysisError) -> ClassifiedError {
    let classified = classify(error);

    tracing::warn!(
        status = classified.status_code,
        category = failure_kind(error),
        "Analysis failed: {}",
        error
    );

    classified
}

/// Internal category of a failure, finer than the response label
pub fn failure_kind(error: &AnalysisError) -> &'static str {
    match error {
        AnalysisError::Validation(_) => "validation",
        AnalysisError::Fetch(fetch) => match fetch {
            FetchError::Timeout { .. } => "timeout",
            FetchError::DnsFailure { .. } => "dns",
            FetchError::ConnectionRefused { .. } => "connection_refused",
            FetchError::TlsError { .. } => "tls",
            FetchError::TooManyRedirects { .. } => "too_many_redirects",
            FetchError::TargetClientError { .. } => "target_client_error",
            FetchError::TargetServerError { .. } => "target_server_error",
            FetchError::UnexpectedStatus { .. } => "unexpected_status",
            FetchError::UnsupportedContentType { .. } => "unsupported_content_type",
            FetchError::EmptyContent { .. } => "empty_content",
            FetchError::ContentTooLarge { .. } => "content_too_large",
            FetchError::Unknown { .. } => "unknown",
        },
    }
}
