//! Plain-text rendering of a tagging response.
//!
//! The one-shot CLI path renders the same per-domain structure the TUI
//! panels show: a title with a count badge, then one line per matched tag
//! with an optional two-decimal score, or a placeholder when a domain
//! matched nothing.

use crate::domains;
use crate::response::{TaggingResponse, format_score};

/// Renders a tagging response as a per-domain report.
///
/// Domains appear in the response's own order. Entries are ordered score
/// descending, ties by label. Scores are shown only when `show_scores` is
/// set, always with exactly two decimals.
///
/// # Examples
///
/// ```
/// use percolate::report::render;
/// use percolate::response::TaggingResponse;
///
/// let response: TaggingResponse =
///     serde_json::from_str(r#"{"countries": {"kenya": 1.0}}"#).unwrap();
/// let report = render(&response, true);
/// assert!(report.contains("Countries (1)"));
/// assert!(report.contains("kenya  1.00"));
/// ```
pub fn render(response: &TaggingResponse, show_scores: bool) -> String {
    let mut out = String::new();
    for (domain, set) in response.iter() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{} ({})\n", domains::title(domain), set.len()));
        if set.is_empty() {
            out.push_str("  (no results)\n");
            continue;
        }
        for (label, score) in set.entries() {
            if show_scores {
                out.push_str(&format!("  {}  {}\n", label, format_score(score)));
            } else {
                out.push_str(&format!("  {}\n", label));
            }
        }
    }
    out
}
