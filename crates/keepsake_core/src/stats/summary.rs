//! Tag, type and score aggregations for life commits and tagged records.

use crate::model::commit::{CommitType, LifeCommit};
use crate::model::record::Record;
use crate::stats::daily::DAYS_PER_WEEK;
use chrono::{Datelike, Days, NaiveDate};

/// Minimum tagged commits before a tag shows up in the mood correlation.
pub const TAG_MOOD_MIN_OCCURRENCES: usize = 2;

/// Count plus mean mood and energy; all zero for an empty set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Averages {
    pub count: usize,
    pub mood: f64,
    pub energy: f64,
}

/// This week (Monday through today) against the previous full week.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeeklyTrend {
    pub this_week: Averages,
    pub last_week: Averages,
}

/// Mean mood across commits carrying `tag`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMood {
    pub tag: String,
    pub mood: f64,
    pub count: usize,
}

/// Tag usage counts, most used first; ties keep first-seen order.
pub fn tag_counts<R: Record>(records: &[R]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for tag in records.iter().flat_map(Record::tags) {
        match counts.iter_mut().find(|(seen, _)| seen == tag) {
            Some((_, count)) => *count += 1,
            None => counts.push((tag.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The `limit` most used tags.
pub fn top_tags<R: Record>(records: &[R], limit: usize) -> Vec<String> {
    tag_counts(records)
        .into_iter()
        .take(limit)
        .map(|(tag, _)| tag)
        .collect()
}

/// Commit type frequencies, most frequent first; ties keep first-seen order.
pub fn type_distribution(commits: &[LifeCommit]) -> Vec<(CommitType, usize)> {
    let mut counts: Vec<(CommitType, usize)> = Vec::new();
    for commit in commits {
        match counts.iter_mut().find(|(kind, _)| *kind == commit.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((commit.kind, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Mean mood and energy over `commits`.
pub fn averages<'a, I>(commits: I) -> Averages
where
    I: IntoIterator<Item = &'a LifeCommit>,
{
    let (count, mood_sum, energy_sum) = commits
        .into_iter()
        .fold((0usize, 0i64, 0i64), |(count, mood, energy), commit| {
            (count + 1, mood + commit.mood.value(), energy + commit.energy.value())
        });
    if count == 0 {
        return Averages::default();
    }
    Averages {
        count,
        mood: mood_sum as f64 / count as f64,
        energy: energy_sum as f64 / count as f64,
    }
}

/// Compares the current Monday-based week with the one before it.
pub fn weekly_trend(commits: &[LifeCommit], today: NaiveDate) -> WeeklyTrend {
    let this_monday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    let last_monday = this_monday
        .checked_sub_days(Days::new(DAYS_PER_WEEK as u64))
        .unwrap_or(this_monday);

    WeeklyTrend {
        this_week: averages(
            commits
                .iter()
                .filter(|c| c.date >= this_monday && c.date <= today),
        ),
        last_week: averages(
            commits
                .iter()
                .filter(|c| c.date >= last_monday && c.date < this_monday),
        ),
    }
}

/// Mean mood for each of the `top_n` most used tags.
///
/// Tags seen on fewer than two commits are left out.
pub fn tag_mood_correlation(commits: &[LifeCommit], top_n: usize) -> Vec<TagMood> {
    top_tags(commits, top_n)
        .into_iter()
        .filter_map(|tag| {
            let tagged = averages(commits.iter().filter(|c| c.tags.contains(&tag)));
            (tagged.count >= TAG_MOOD_MIN_OCCURRENCES).then_some(TagMood {
                tag,
                mood: tagged.mood,
                count: tagged.count,
            })
        })
        .collect()
}
