//! Weighted SEO scoring
//!
//! Five independent checks of 20 points each. The check order fixes the order
//! of the `passed_checks` and `issues` lists.

use super::parser::SeoSignals;
use serde::Serialize;

/// Points awarded for each passed check
pub const POINTS_PER_CHECK: u8 = 20;

/// Upper bound of the score
pub const MAX_SCORE: u8 = 100;

/// Result of scoring one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Sum of points for passed checks, capped at [`MAX_SCORE`]
    pub score: u8,

    /// Messages for passed checks, in check order
    pub passed_checks: Vec<String>,

    /// Messages for failed checks, in check order
    pub issues: Vec<String>,
}

/// Outcome of a single check
struct CheckOutcome {
    passed: bool,
    pass_message: String,
    fail_message: String,
}

impl CheckOutcome {
    fn new(passed: bool, pass_message: &str, fail_message: impl Into<String>) -> Self {
        Self {
            passed,
            pass_message: pass_message.to_string(),
            fail_message: fail_message.into(),
        }
    }
}

/// Runs the five checks in order
fn run_checks(signals: &SeoSignals) -> [CheckOutcome; 5] {
    [
        CheckOutcome::new(
            signals.title.is_some(),
            "Page has a title tag",
            "Missing page title tag",
        ),
        CheckOutcome::new(
            signals.meta_description.is_some(),
            "Page has a meta description",
            "Missing meta description",
        ),
        CheckOutcome::new(
            signals.h1_count >= 1,
            "Page has at least one H1 tag",
            "No H1 tags found on the page",
        ),
        CheckOutcome::new(
            signals.total_images == 0 || signals.images_missing_alt == 0,
            "All images have alt text",
            format!("{} image(s) missing alt text", signals.images_missing_alt),
        ),
        CheckOutcome::new(
            signals.uses_https,
            "Page uses HTTPS",
            "Page does not use HTTPS",
        ),
    ]
}

/// Scores a page's SEO signals
///
/// Pure and deterministic: the same signals always yield the same result.
///
/// # Example
///
/// ```
/// use seo_analyzer::analyzer::{score_signals, SeoSignals};
///
/// let signals = SeoSignals {
///     title: Some("Home".to_string()),
///     h1_count: 1,
///     uses_https: true,
///     ..SeoSignals::default()
/// };
/// let result = score_signals(&signals);
/// assert_eq!(result.score, 80);
/// assert_eq!(result.issues, vec!["Missing meta description".to_string()]);
/// ```
pub fn score_signals(signals: &SeoSignals) -> ScoreResult {
    let mut result = ScoreResult::default();
    let mut points: u32 = 0;

    for check in run_checks(signals) {
        if check.passed {
            points += u32::from(POINTS_PER_CHECK);
            result.passed_checks.push(check.pass_message);
        } else {
            result.issues.push(check.fail_message);
        }
    }

    result.score = points.min(u32::from(MAX_SCORE)) as u8;
    result
}
