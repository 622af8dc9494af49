use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use crate::core::{levenshtein::levenshtein, normalize::normalize};
use crate::models::{Candidate, MatchingOptions};

/// Date-time layouts accepted besides RFC 3339, read as UTC
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Calendar-date layouts, read as midnight UTC
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"];

/// Score components for one source/target pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub name_score: f64,
    /// Present only when both candidates carry a birth date
    pub date_score: Option<f64>,
    pub score: f64,
}

/// Similarity of two strings in [0, 1], based on normalized edit distance
///
/// Two empty inputs are identical (1.0); one empty input scores 0.0.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let norm_a = normalize(a);
    let norm_b = normalize(b);

    let max_len = norm_a.chars().count().max(norm_b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - levenshtein(&norm_a, &norm_b) as f64 / max_len as f64
}

/// Name similarity in [0, 1]
///
/// Compares "first last" on both sides, and also the source in "last first"
/// order to tolerate swapped name fields. Only the source side is reversed.
pub fn compare_names(source: &Candidate, target: &Candidate) -> f64 {
    let source_full = format!("{} {}", source.first_name, source.last_name);
    let source_reversed = format!("{} {}", source.last_name, source.first_name);
    let target_full = format!("{} {}", target.first_name, target.last_name);

    let normal = string_similarity(&source_full, &target_full);
    let reversed = string_similarity(&source_reversed, &target_full);

    normal.max(reversed)
}

/// Binary birth-date similarity: 1.0 for the same date, 0.0 otherwise
///
/// Absent, empty or unparsable dates score 0.0. Identical raw strings match
/// without parsing.
pub fn compare_dates(d1: Option<&str>, d2: Option<&str>) -> f64 {
    let (d1, d2) = match (d1, d2) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => (a, b),
        _ => return 0.0,
    };

    if d1 == d2 {
        return 1.0;
    }

    match (parse_date(d1), parse_date(d2)) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}

/// Parse a date string into a UTC instant
///
/// Accepts RFC 3339, ISO date-times without offset, ISO and slash-separated
/// calendar dates, US month/day/year, and dates with spelled-out months.
/// Anything without an offset is taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Score a source/target pair under the given options
///
/// score = name_score * name_weight + date_score * date_weight, with the date
/// component counted as 0 when either birth date is missing.
/// `options.fuzzy_date_matching` is not consulted.
pub fn score_pair(source: &Candidate, target: &Candidate, options: &MatchingOptions) -> PairScore {
    let name_score = compare_names(source, target);

    let date_score = match (source.birth_date(), target.birth_date()) {
        (Some(a), Some(b)) => Some(compare_dates(Some(a), Some(b))),
        _ => None,
    };

    let score = name_score * options.name_weight + date_score.unwrap_or(0.0) * options.date_weight;

    PairScore {
        name_score,
        date_score,
        score,
    }
}
