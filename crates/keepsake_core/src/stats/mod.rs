//! Read-only aggregations over an in-memory record sequence.
//!
//! # Invariants
//! - Functions are pure: no I/O, no clock reads; "today" is a parameter.
//! - Empty input yields neutral results (0, 0.0, empty lists), never errors.

pub mod daily;
pub mod summary;
pub mod text;

pub use daily::{group_by_day, heatmap, since, streak, Heatmap, HEATMAP_LEVELS};
pub use summary::{
    averages, tag_counts, tag_mood_correlation, top_tags, type_distribution, weekly_trend,
    Averages, TagMood, WeeklyTrend,
};
pub use text::{oldest, relative_day, relative_time, search};
