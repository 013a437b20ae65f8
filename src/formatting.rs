//! Shared formatting helpers for the CLI table and the TUI

use chrono::{DateTime, Utc};

use crate::models::Candidate;

/// Truncate a string to a maximum length (in characters), adding "..." at the end if truncated.
///
/// Counts characters, not bytes, so multi-byte names never split mid-character.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Coarse "time ago" text: "just now", "12m ago", "5h ago", "3d ago", "8mo ago", "2y ago".
///
/// Timestamps in the future (clock skew) read as "just now".
#[must_use]
pub fn format_relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 30 {
        format!("{}d ago", days)
    } else if days < 365 {
        format!("{}mo ago", days / 30)
    } else {
        format!("{}y ago", days / 365)
    }
}

/// Last activity of a candidate relative to `now`, or the raw value if it
/// does not parse, or "-" when absent
#[must_use]
pub fn format_last_activity(candidate: &Candidate, now: DateTime<Utc>) -> String {
    match (candidate.last_activity_at(), candidate.last_activity.as_deref()) {
        (Some(at), _) => format_relative_time(at, now),
        (None, Some(raw)) => raw.to_string(),
        (None, None) => "-".to_string(),
    }
}

/// "Showing N candidate applications"
#[must_use]
pub fn format_results_summary(total: u64) -> String {
    format!("Showing {} candidate applications", total)
}
