//! Calendar-day aggregations: streaks, grouping and the activity heatmap.

use crate::model::record::Record;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

pub const DAYS_PER_WEEK: usize = 7;
/// Number of distinct heatmap intensities, including "no records".
pub const HEATMAP_LEVELS: usize = 4;

/// Length of the run of consecutive record days ending today or yesterday.
///
/// Days after `today` are ignored. Returns 0 when the newest remaining day
/// is older than yesterday.
pub fn streak<R: Record>(records: &[R], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = records
        .iter()
        .map(Record::day)
        .filter(|day| *day <= today)
        .collect();

    let Some(&newest) = days.last() else {
        return 0;
    };
    if newest != today && Some(newest) != today.pred_opt() {
        return 0;
    }

    let mut count = 0;
    let mut expected = newest;
    for day in days.iter().rev() {
        if *day != expected {
            break;
        }
        count += 1;
        match expected.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }
    count
}

/// Partitions records by calendar day, keeping insertion order per day.
pub fn group_by_day<R: Record>(records: &[R]) -> BTreeMap<NaiveDate, Vec<&R>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&R>> = BTreeMap::new();
    for record in records {
        groups.entry(record.day()).or_default().push(record);
    }
    groups
}

/// Records whose day is on or after `cutoff`.
pub fn since<R: Record>(records: &[R], cutoff: NaiveDate) -> Vec<&R> {
    records.iter().filter(|record| record.day() >= cutoff).collect()
}

/// Weekly activity grid: one row per weekday (Monday first), one column
/// per week, oldest week first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    /// Monday of the first column.
    pub start: NaiveDate,
    /// `cells[weekday][week]`; `None` marks days after today.
    pub cells: Vec<Vec<Option<usize>>>,
    /// Short month name on the first column of each month, else `None`.
    pub month_labels: Vec<Option<String>>,
}

impl Heatmap {
    pub fn weeks(&self) -> usize {
        self.month_labels.len()
    }

    /// Maps a record count to an intensity level in `0..HEATMAP_LEVELS`.
    pub fn intensity(count: usize) -> usize {
        count.min(HEATMAP_LEVELS - 1)
    }
}

/// Builds a `weeks`-column heatmap ending with the week containing `today`.
pub fn heatmap<R: Record>(records: &[R], today: NaiveDate, weeks: usize) -> Heatmap {
    let counts: BTreeMap<NaiveDate, usize> = group_by_day(records)
        .into_iter()
        .map(|(day, entries)| (day, entries.len()))
        .collect();

    let current_monday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    let span = (weeks.saturating_sub(1) * DAYS_PER_WEEK) as u64;
    let start = current_monday
        .checked_sub_days(Days::new(span))
        .unwrap_or(current_monday);

    let mut cells = vec![vec![None; weeks]; DAYS_PER_WEEK];
    let mut month_labels = vec![None; weeks];
    let mut previous_month = None;

    for week in 0..weeks {
        let Some(monday) = start.checked_add_days(Days::new((week * DAYS_PER_WEEK) as u64)) else {
            break;
        };
        if previous_month != Some(monday.month()) {
            month_labels[week] = Some(monday.format("%b").to_string());
            previous_month = Some(monday.month());
        }
        for (weekday, row) in cells.iter_mut().enumerate() {
            let Some(day) = monday.checked_add_days(Days::new(weekday as u64)) else {
                continue;
            };
            if day <= today {
                row[week] = Some(counts.get(&day).copied().unwrap_or(0));
            }
        }
    }

    Heatmap {
        start,
        cells,
        month_labels,
    }
}
