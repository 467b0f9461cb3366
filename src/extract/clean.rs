//! Field-cleaning rules for scraped text
//!
//! The source markup concatenates adjacent nodes, so raw text carries
//! win/loss records glued to names, doubled status markers, and venue
//! strings with the broadcast network appended. These functions normalize
//! that text into canonical field values.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a win-loss-draw record like "27-1-0"
static FIGHT_RECORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+-\d+-\d+").expect("fight record pattern"));

/// Matches parenthetical annotations like "(UFC)"
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern"));

/// Status marker that the layout duplicates across adjacent nodes
const RESULT_MARKER: &str = "Final";

/// Canonicalizes a fighter display name
///
/// Strips any win/loss record substring and parenthetical text, then keeps
/// only the first two whitespace-separated tokens.
///
/// # Examples
///
/// ```
/// use cagecrawl::extract::clean_name;
///
/// assert_eq!(clean_name("Jon Jones 27-1-0 (UFC)"), "Jon Jones");
/// assert_eq!(clean_name("Israel Adesanya"), "Israel Adesanya");
/// ```
pub fn clean_name(raw: &str) -> String {
    let stripped = FIGHT_RECORD.replace_all(raw, "");
    let stripped = PARENTHETICAL.replace_all(&stripped, "");
    stripped
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonicalizes a bout result string
///
/// Broadcast-teaser text ("ppv", "espn+") means the bout has not been
/// decided, so it becomes empty. When the "Final" marker appears more than
/// once (adjacent nodes concatenated), everything before the second
/// occurrence is discarded.
///
/// # Examples
///
/// ```
/// use cagecrawl::extract::clean_result;
///
/// assert_eq!(clean_result("Buy PPV"), "");
/// assert_eq!(clean_result("FinalFinalKO/TKOR1, 0:21"), "FinalKO/TKOR1, 0:21");
/// ```
pub fn clean_result(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    if lower.contains("ppv") || lower.contains("espn+") {
        return String::new();
    }

    if let Some(first) = trimmed.find(RESULT_MARKER) {
        let rest = first + RESULT_MARKER.len();
        if let Some(offset) = trimmed[rest..].find(RESULT_MARKER) {
            return trimmed[rest + offset..].to_string();
        }
    }

    trimmed.to_string()
}

/// Extracts the date portion of a combined date+venue string
///
/// The date is the first two comma-separated segments.
pub fn clean_event_date(raw: &str) -> String {
    raw.trim()
        .splitn(3, ',')
        .take(2)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extracts the venue portion of a location string
///
/// Keeps everything before the first broadcast keyword, trimmed of trailing
/// commas and whitespace.
pub fn clean_location(raw: &str, broadcast_keywords: &[String]) -> String {
    let mut cut = raw.len();
    for keyword in broadcast_keywords {
        if let Some(pos) = raw.find(keyword.as_str()) {
            cut = cut.min(pos);
        }
    }

    raw[..cut]
        .trim()
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}
