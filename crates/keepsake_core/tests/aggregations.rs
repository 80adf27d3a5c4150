use chrono::{Duration, NaiveDate, TimeZone, Utc};
use keepsake_core::stats::{
    averages, group_by_day, heatmap, oldest, search, since, streak, tag_mood_correlation,
    top_tags, type_distribution, weekly_trend,
};
use keepsake_core::{CapsuleNote, CommitType, LifeCommit, Memory};

fn today() -> NaiveDate {
    // A Wednesday.
    NaiveDate::from_ymd_opt(2026, 3, 11).unwrap()
}

fn commit_on(days_ago: i64, tags: &[&str], mood: i64, energy: i64) -> LifeCommit {
    let date = today() - Duration::days(days_ago);
    LifeCommit::new("entry", CommitType::Feat, Utc::now(), date)
        .with_tags(tags)
        .with_mood(mood)
        .with_energy(energy)
}

#[test]
fn streak_counts_today_and_yesterday_but_stops_at_gap() {
    let commits = vec![
        commit_on(3, &[], 0, 3),
        commit_on(1, &[], 0, 3),
        commit_on(0, &[], 0, 3),
        commit_on(0, &[], 0, 3),
    ];
    assert_eq!(streak(&commits, today()), 2);
}

#[test]
fn streak_is_zero_when_newest_is_older_than_yesterday() {
    let commits = vec![commit_on(2, &[], 0, 3), commit_on(3, &[], 0, 3)];
    assert_eq!(streak(&commits, today()), 0);
}

#[test]
fn empty_input_gives_neutral_results() {
    let commits: Vec<LifeCommit> = Vec::new();

    assert_eq!(streak(&commits, today()), 0);
    let avg = averages(&commits);
    assert_eq!(avg.count, 0);
    assert_eq!(avg.mood, 0.0);
    assert_eq!(avg.energy, 0.0);
    assert!(top_tags(&commits, 5).is_empty());
    assert!(type_distribution(&commits).is_empty());
    assert!(tag_mood_correlation(&commits, 5).is_empty());
    assert!(group_by_day(&commits).is_empty());

    let trend = weekly_trend(&commits, today());
    assert_eq!(trend.this_week.count, 0);
    assert_eq!(trend.last_week.mood, 0.0);

    let grid = heatmap(&commits, today(), 15);
    assert_eq!(grid.weeks(), 15);
    assert!(grid
        .cells
        .iter()
        .flatten()
        .all(|cell| matches!(cell, None | Some(0))));
}

#[test]
fn averages_and_weekly_trend_split_on_monday() {
    let commits = vec![
        commit_on(0, &[], 2, 5),  // Wed this week
        commit_on(2, &[], 0, 3),  // Mon this week
        commit_on(3, &[], -2, 1), // Sun last week
        commit_on(9, &[], 1, 2),  // Mon last week
        commit_on(10, &[], 2, 5), // two weeks ago
    ];

    let all = averages(&commits);
    assert_eq!(all.count, 5);
    assert!((all.mood - 0.6).abs() < 1e-9);
    assert!((all.energy - 3.2).abs() < 1e-9);

    let trend = weekly_trend(&commits, today());
    assert_eq!(trend.this_week.count, 2);
    assert!((trend.this_week.mood - 1.0).abs() < 1e-9);
    assert!((trend.this_week.energy - 4.0).abs() < 1e-9);
    assert_eq!(trend.last_week.count, 2);
    assert!((trend.last_week.mood + 0.5).abs() < 1e-9);
}

#[test]
fn tag_mood_correlation_requires_two_occurrences() {
    let commits = vec![
        commit_on(0, &["family", "walk"], 2, 3),
        commit_on(1, &["family"], 1, 3),
        commit_on(2, &["work"], -2, 3),
        commit_on(3, &["work"], -1, 3),
        commit_on(4, &["walk", "solo"], 0, 3),
    ];

    let correlation = tag_mood_correlation(&commits, 5);
    let summary: Vec<(&str, usize)> = correlation
        .iter()
        .map(|entry| (entry.tag.as_str(), entry.count))
        .collect();
    assert_eq!(summary, vec![("family", 2), ("walk", 2), ("work", 2)]);
    assert!((correlation[0].mood - 1.5).abs() < 1e-9);
    assert!((correlation[2].mood + 1.5).abs() < 1e-9);
}

#[test]
fn grouping_and_since_use_record_days() {
    let commits = vec![
        commit_on(8, &[], 0, 3),
        commit_on(1, &[], 0, 3),
        commit_on(1, &[], 0, 3),
    ];

    let groups = group_by_day(&commits);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[&(today() - Duration::days(1))].len(), 2);

    let recent = since(&commits, today() - Duration::days(7));
    assert_eq!(recent.len(), 2);
}

#[test]
fn search_and_oldest_over_plain_records() {
    let day = today();
    let at = |hour: u32| Utc.with_ymd_and_hms(2026, 3, 11, hour, 0, 0).unwrap();
    let memories = vec![
        Memory::new("Brother called on a Tuesday", at(9), day),
        Memory::new("a sunrise", at(6), day),
        Memory::new("brotherly advice", at(12), day),
    ];

    let found = search(&memories, "BROTHER");
    assert_eq!(found.len(), 2);
    assert!(search(&memories, "  ").is_empty());

    assert_eq!(oldest(&memories).unwrap().text, "a sunrise");
    let notes: Vec<CapsuleNote> = Vec::new();
    assert!(oldest(&notes).is_none());
}
