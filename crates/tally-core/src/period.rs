//! Period parsing
//!
//! Extracts an optional month and/or 4-digit year from free question text,
//! detects year-to-date phrasing, and renders human-readable period labels
//! for answers.

use std::sync::OnceLock;

use regex::Regex;

/// Month names in calendar order; scan order matters, first match wins
pub const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

const YTD_MARKERS: &[&str] = &["ytd", "year to date", "to date"];

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{4}\b").expect("valid regex"))
}

/// Parse an optional (month 1-12, 4-digit year) pair from question text
///
/// The first month name found wins, so multi-month questions are ambiguous
/// here; callers that care about several months use [`mentioned_months`].
/// No error on no-match - both fields are simply absent.
pub fn parse_month_year(text: &str) -> (Option<u32>, Option<i32>) {
    let q = text.to_lowercase();

    let month = MONTHS
        .iter()
        .find(|(name, _)| q.contains(name))
        .map(|(_, idx)| *idx);

    let year = year_regex()
        .find_iter(&q)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .next();

    (month, year)
}

/// All distinct month names mentioned, in order of the month table
pub fn mentioned_months(text: &str) -> Vec<u32> {
    let q = text.to_lowercase();
    MONTHS
        .iter()
        .filter(|(name, _)| q.contains(name))
        .map(|(_, idx)| *idx)
        .collect()
}

/// Whether the question is a year-to-date query
pub fn is_ytd(text: &str) -> bool {
    let q = text.to_lowercase();
    YTD_MARKERS.iter().any(|m| q.contains(m))
}

/// Title-cased month name for a 1-12 index
pub fn month_name(month: u32) -> String {
    MONTHS
        .iter()
        .find(|(_, idx)| *idx == month)
        .map(|(name, _)| {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .unwrap_or_else(|| format!("Month {}", month))
}

/// Human-friendly label for the period mentioned in the question
pub fn describe_period(text: &str) -> String {
    let (month, year) = parse_month_year(text);
    match (month, year) {
        (Some(m), Some(y)) => format!("{} {}", month_name(m), y),
        (Some(m), None) => month_name(m),
        (None, Some(y)) => y.to_string(),
        (None, None) => {
            if is_ytd(text) {
                "year to date".to_string()
            } else {
                "the selected period".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_and_year() {
        assert_eq!(
            parse_month_year("How much did I spend in June 2025?"),
            (Some(6), Some(2025))
        );
    }

    #[test]
    fn test_parse_year_without_month() {
        // A 4-digit year with no month name yields just the year
        assert_eq!(parse_month_year("total spend in 2025"), (None, Some(2025)));
    }

    #[test]
    fn test_parse_no_match_is_absent() {
        assert_eq!(parse_month_year("how much did I spend?"), (None, None));
    }

    #[test]
    fn test_first_month_wins_on_ambiguity() {
        // Scan order is calendar order, so "june" beats "august" here even
        // though august appears first in the text
        assert_eq!(
            parse_month_year("compare august vs june"),
            (Some(6), None)
        );
    }

    #[test]
    fn test_mentioned_months() {
        assert_eq!(mentioned_months("compare june and august"), vec![6, 8]);
        assert!(mentioned_months("no months here").is_empty());
    }

    #[test]
    fn test_is_ytd() {
        assert!(is_ytd("spend YTD"));
        assert!(is_ytd("year to date totals"));
        assert!(is_ytd("spend to date"));
        assert!(!is_ytd("spend in June"));
    }

    #[test]
    fn test_describe_period() {
        assert_eq!(describe_period("summary for June 2025"), "June 2025");
        assert_eq!(describe_period("summary for June"), "June");
        assert_eq!(describe_period("summary for 2025"), "2025");
        assert_eq!(describe_period("spend ytd"), "year to date");
        assert_eq!(describe_period("spend"), "the selected period");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(6), "June");
        assert_eq!(month_name(13), "Month 13");
    }
}
