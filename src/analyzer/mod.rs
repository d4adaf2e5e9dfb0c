//! Analyzer module for single-page SEO analysis
//!
//! This module contains the core pipeline, including:
//! - HTTP fetching with fixed timeout, redirect and size limits
//! - HTML parsing into SEO signals
//! - Weighted scoring of those signals
//! - Classification of every failure into a public error

mod classify;
mod fetcher;
mod parser;
mod pipeline;
mod scorer;

pub use classify::{classify, ClassifiedError};
pub use fetcher::{
    build_http_client, check_content_type, check_status, classify_transport_error, fetch_html,
    FetchOptions, DEFAULT_TIMEOUT, MAX_BODY_BYTES, MAX_REDIRECTS,
};
pub use parser::{extract_signals, SeoSignals};
pub use pipeline::{
    analyze_html, classify_logged, failure_kind, AnalysisResponse, Analyzer, PageAnalysis,
};
pub use scorer::{score_signals, ScoreResult, MAX_SCORE, POINTS_PER_CHECK};
