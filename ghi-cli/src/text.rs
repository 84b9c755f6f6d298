// ABOUTME: Small text helpers shared by the renderers
// ABOUTME: Whitespace collapsing, truncation, pluralization, relative time

use chrono::{DateTime, Duration, Utc};

/// Collapse runs of whitespace (including newlines) into single spaces so
/// multi-line titles stay on one table row.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    }
}

pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Human-friendly relative time, e.g. "about 2 days ago".
pub fn fuzzy_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let ago = now.signed_duration_since(then);
    if ago < Duration::zero() {
        return "just now".to_string();
    }
    if ago < Duration::minutes(1) {
        return "less than a minute ago".to_string();
    }
    if ago < Duration::hours(1) {
        return format!(
            "about {} ago",
            pluralize(ago.num_minutes() as usize, "minute")
        );
    }
    if ago < Duration::days(1) {
        return format!("about {} ago", pluralize(ago.num_hours() as usize, "hour"));
    }
    if ago < Duration::days(30) {
        return format!("about {} ago", pluralize(ago.num_days() as usize, "day"));
    }
    if ago < Duration::days(365) {
        return format!(
            "about {} ago",
            pluralize((ago.num_days() / 30) as usize, "month")
        );
    }
    format!(
        "about {} ago",
        pluralize((ago.num_days() / 365) as usize, "year")
    )
}
