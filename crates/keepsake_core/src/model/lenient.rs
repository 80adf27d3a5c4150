//! Field-level defaulting rules for loosely typed JSON entries.
//!
//! Store files may be hand-edited or written by older tool versions, so
//! every field is read through these helpers: the wrong type yields the
//! documented default instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serializer;
use serde_json::{Map, Value};

const DAY_FORMAT: &str = "%Y-%m-%d";
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Returns the string value, or `default` for a missing or non-string field.
pub fn string_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

/// Reads an integer score, truncating floats and clamping into `[min, max]`.
///
/// Non-numeric values yield `default` (which is also clamped).
pub fn clamped_int(value: Option<&Value>, default: i64, min: i64, max: i64) -> i64 {
    let raw = match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(default),
        _ => default,
    };
    raw.clamp(min, max)
}

/// Reads a tag list; strings are kept, numbers and booleans are stringified.
///
/// A non-array value yields an empty list.
pub fn tag_list(value: Option<&Value>) -> Vec<String> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    let raw: Vec<String> = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        })
        .collect();
    normalize_tags(&raw)
}

/// Parses an RFC 3339 timestamp, or a naive ISO datetime taken as UTC.
pub fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

/// Parses a `YYYY-MM-DD` calendar day.
pub fn day(value: &Value) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.as_str()?.trim(), DAY_FORMAT).ok()
}

/// Resolves a record timestamp, falling back to midnight UTC of its day.
pub fn timestamp_or_day(
    object: &Map<String, Value>,
    timestamp_key: &str,
    day_key: &str,
) -> Option<DateTime<Utc>> {
    object.get(timestamp_key).and_then(timestamp).or_else(|| {
        object
            .get(day_key)
            .and_then(day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// Canonical text form of a persisted timestamp.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Serde adapter writing timestamps in the canonical text form.
pub fn serialize_timestamp<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(value))
}

/// Normalizes one tag: trimmed, case kept, `None` when empty.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes and deduplicates tags, keeping first-seen order. Tags that
/// differ only in case are distinct.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag.as_ref()) {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
    }
    unique
}

/// Splits a comma-separated tag argument into normalized tags.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = raw.split(',').collect();
    normalize_tags(&parts)
}

#[cfg(test)]
mod tests {
    use super::{clamped_int, day, normalize_tags, parse_tag_list, string_or, tag_list, timestamp};
    use serde_json::json;

    #[test]
    fn string_or_defaults_non_strings() {
        assert_eq!(string_or(Some(&json!("work")), "life"), "work");
        assert_eq!(string_or(Some(&json!(42)), "life"), "life");
        assert_eq!(string_or(None, "life"), "life");
    }

    #[test]
    fn clamped_int_truncates_floats_and_clamps() {
        assert_eq!(clamped_int(Some(&json!(1.9)), 0, -2, 2), 1);
        assert_eq!(clamped_int(Some(&json!(99)), 0, -2, 2), 2);
        assert_eq!(clamped_int(Some(&json!(-7)), 3, 1, 5), 1);
        assert_eq!(clamped_int(Some(&json!("high")), 3, 1, 5), 3);
        assert_eq!(clamped_int(None, 0, -2, 2), 0);
    }

    #[test]
    fn tag_list_stringifies_scalars_and_drops_nested_values() {
        let tags = tag_list(Some(&json!(["Work", 7, true, {"x": 1}, " work ", ""])));
        assert_eq!(tags, vec!["Work", "7", "true", "work"]);
        assert!(tag_list(Some(&json!("work"))).is_empty());
    }

    #[test]
    fn timestamp_accepts_offset_and_naive_forms() {
        let with_offset = timestamp(&json!("2026-03-01T10:00:00+02:00")).unwrap();
        assert_eq!(with_offset.to_rfc3339(), "2026-03-01T08:00:00+00:00");

        let naive = timestamp(&json!("2026-03-01T10:00:00.250")).unwrap();
        assert_eq!(naive.to_rfc3339(), "2026-03-01T10:00:00.250+00:00");

        assert!(timestamp(&json!("yesterday")).is_none());
        assert!(timestamp(&json!(12)).is_none());
    }

    #[test]
    fn day_parses_iso_dates_only() {
        assert!(day(&json!("2026-03-01")).is_some());
        assert!(day(&json!("03/01/2026")).is_none());
    }

    #[test]
    fn tag_helpers_trim_dedupe_and_keep_order() {
        assert_eq!(normalize_tags(&["b", " b ", "a", " "]), vec!["b", "a"]);
        assert_eq!(parse_tag_list("health, Family,,health"), vec!["health", "Family"]);
    }

    #[test]
    fn tag_helpers_keep_case() {
        assert_eq!(normalize_tags(&["Work", "work", " Work"]), vec!["Work", "work"]);
        assert_eq!(tag_list(Some(&json!(["Reading", "GTD"]))), vec!["Reading", "GTD"]);
    }
}
