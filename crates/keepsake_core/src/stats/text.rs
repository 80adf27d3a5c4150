//! Text lookups and human-friendly relative times.

use crate::model::record::Record;
use chrono::{DateTime, NaiveDate, Utc};

const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Records whose text contains `query`, ignoring case.
///
/// A blank query matches nothing.
pub fn search<'a, R: Record>(records: &'a [R], query: &str) -> Vec<&'a R> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| record.text().to_lowercase().contains(&needle))
        .collect()
}

/// Record with the earliest timestamp; the first one wins ties.
pub fn oldest<R: Record>(records: &[R]) -> Option<&R> {
    records.iter().reduce(|best, candidate| {
        if candidate.timestamp() < best.timestamp() {
            candidate
        } else {
            best
        }
    })
}

/// Day-granularity distance such as `today`, `3 days ago`, `2 months ago`.
pub fn relative_day(day: NaiveDate, today: NaiveDate) -> String {
    let days = (today - day).num_days();
    if days <= 0 {
        return "today".to_string();
    }
    if days == 1 {
        return "yesterday".to_string();
    }
    if days < DAYS_PER_WEEK {
        return format!("{days} days ago");
    }
    if days < DAYS_PER_MONTH {
        return plural_ago(days / DAYS_PER_WEEK, "week");
    }
    if days < DAYS_PER_YEAR {
        return plural_ago(days / DAYS_PER_MONTH, "month");
    }
    plural_ago(days / DAYS_PER_YEAR, "year")
}

/// Second-granularity distance such as `just now`, `5 minutes ago`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return plural_ago(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural_ago(hours, "hour");
    }
    let days = hours / 24;
    if days < DAYS_PER_MONTH {
        return plural_ago(days, "day");
    }
    let months = days / DAYS_PER_MONTH;
    if months < 12 {
        return plural_ago(months, "month");
    }
    plural_ago(days / DAYS_PER_YEAR, "year")
}

fn plural_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::{relative_day, relative_time};
    use chrono::{Duration, NaiveDate, Utc};

    #[test]
    fn relative_day_buckets() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let ago = |days: i64| today - Duration::days(days);
        assert_eq!(relative_day(today, today), "today");
        assert_eq!(relative_day(ago(1), today), "yesterday");
        assert_eq!(relative_day(ago(4), today), "4 days ago");
        assert_eq!(relative_day(ago(8), today), "1 week ago");
        assert_eq!(relative_day(ago(65), today), "2 months ago");
        assert_eq!(relative_day(ago(800), today), "2 years ago");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(now - Duration::seconds(5), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_time(now - Duration::days(40), now), "1 month ago");
        assert_eq!(relative_time(now - Duration::days(400), now), "1 year ago");
    }
}
