//! Life-commit record: a structured, git-style daily journal entry.
//!
//! # Responsibility
//! - Define the commit record, its type tag and bounded scores.
//! - Decode persisted entries with explicit per-field defaults.
//!
//! # Invariants
//! - `mood` is always within `[Mood::MIN, Mood::MAX]`.
//! - `energy` is always within `[Energy::MIN, Energy::MAX]`.
//! - `id` and `timestamp` never change after construction.

use crate::model::lenient;
use crate::model::record::{Layout, Record};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Length of the abbreviated commit identifier shown in listings.
pub const SHORT_ID_LENGTH: usize = 7;
/// Scope applied when none is given.
pub const DEFAULT_SCOPE: &str = "life";

/// Stable identifier of a life commit.
pub type CommitId = Uuid;

/// Conventional-commit style category for a life commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitType {
    #[default]
    Feat,
    Fix,
    Refactor,
    Chore,
    Docs,
    Style,
    Test,
}

impl CommitType {
    pub const ALL: [CommitType; 7] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Refactor,
        CommitType::Chore,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Refactor => "refactor",
            Self::Chore => "chore",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Test => "test",
        }
    }
}

impl Display for CommitType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown commit type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommitType(pub String);

impl Display for UnknownCommitType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown commit type `{}`; expected feat|fix|refactor|chore|docs|style|test",
            self.0
        )
    }
}

impl std::error::Error for UnknownCommitType {}

impl FromStr for CommitType {
    type Err = UnknownCommitType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownCommitType(value.to_string()))
    }
}

/// Mood score bounded to `[-2, 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Mood(i8);

impl Mood {
    pub const MIN: i64 = -2;
    pub const MAX: i64 = 2;
    pub const DEFAULT: i64 = 0;

    /// Builds a mood score, clamping out-of-range input into bounds.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX) as i8)
    }

    /// Returns `Some` only when `value` is already within bounds.
    pub fn checked(value: i64) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then(|| Self(value as i8))
    }

    pub fn value(self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::clamped(Self::DEFAULT)
    }
}

impl Display for Mood {
    /// Always signed, e.g. `+1`, `0`, `-2`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Energy score bounded to `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Energy(u8);

impl Energy {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;
    pub const DEFAULT: i64 = 3;

    /// Builds an energy score, clamping out-of-range input into bounds.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX) as u8)
    }

    /// Returns `Some` only when `value` is already within bounds.
    pub fn checked(value: i64) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then(|| Self(value as u8))
    }

    pub fn value(self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Energy {
    fn default() -> Self {
        Self::clamped(Self::DEFAULT)
    }
}

impl Display for Energy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One structured life commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeCommit {
    pub id: CommitId,
    #[serde(serialize_with = "lenient::serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Local calendar day the commit was recorded on.
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: CommitType,
    pub scope: String,
    pub message: String,
    pub details: String,
    pub tags: Vec<String>,
    #[serde(rename = "mood_score")]
    pub mood: Mood,
    #[serde(rename = "energy_score")]
    pub energy: Energy,
}

impl LifeCommit {
    /// Creates a commit with a fresh id and the given creation instant.
    ///
    /// Optional fields start at their defaults; use the `with_*` builders.
    pub fn new(
        message: impl Into<String>,
        kind: CommitType,
        timestamp: DateTime<Utc>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            date,
            kind,
            scope: DEFAULT_SCOPE.to_string(),
            message: message.into(),
            details: String::new(),
            tags: Vec::new(),
            mood: Mood::default(),
            energy: Energy::default(),
        }
    }

    /// Sets the scope; blank input keeps the default `life`.
    pub fn with_scope(mut self, scope: &str) -> Self {
        let trimmed = scope.trim();
        if !trimmed.is_empty() {
            self.scope = trimmed.to_string();
        }
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Replaces tags with their normalized, deduplicated form.
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = lenient::normalize_tags(tags);
        self
    }

    /// Sets the mood score, clamping into bounds.
    pub fn with_mood(mut self, mood: i64) -> Self {
        self.mood = Mood::clamped(mood);
        self
    }

    /// Sets the energy score, clamping into bounds.
    pub fn with_energy(mut self, energy: i64) -> Self {
        self.energy = Energy::clamped(energy);
        self
    }

    /// First characters of the id, as shown in compact listings.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string().chars().take(SHORT_ID_LENGTH).collect()
    }

    /// `type(scope)` heading, or just `type` for an empty scope.
    pub fn type_scope(&self) -> String {
        if self.scope.is_empty() {
            self.kind.to_string()
        } else {
            format!("{}({})", self.kind, self.scope)
        }
    }
}

impl Record for LifeCommit {
    const LAYOUT: Layout = Layout::Envelope {
        records_key: "commits",
    };

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn day(&self) -> NaiveDate {
        self.date
    }

    fn text(&self) -> &str {
        &self.message
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Defaults: unknown `type` → feat, missing `scope` → life, scores
    /// clamped, missing `date` → UTC day of `timestamp`. A missing or
    /// invalid `id` is replaced by [`derived_id`], so the same entry decodes
    /// to the same id on every load.
    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let timestamp = lenient::timestamp_or_day(object, "timestamp", "date")?;
        let date = object
            .get("date")
            .and_then(lenient::day)
            .unwrap_or_else(|| timestamp.date_naive());
        let message = lenient::string_or(object.get("message"), "");
        let raw_id = object.get("id").and_then(Value::as_str);
        let id = raw_id
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .unwrap_or_else(|| derived_id(raw_id.unwrap_or_default(), &timestamp, &message));
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();

        Some(Self {
            id,
            timestamp,
            date,
            kind,
            scope: lenient::string_or(object.get("scope"), DEFAULT_SCOPE),
            message,
            details: lenient::string_or(object.get("details"), ""),
            tags: lenient::tag_list(object.get("tags")),
            mood: Mood::clamped(lenient::clamped_int(
                object.get("mood_score"),
                Mood::DEFAULT,
                Mood::MIN,
                Mood::MAX,
            )),
            energy: Energy::clamped(lenient::clamped_int(
                object.get("energy_score"),
                Energy::DEFAULT,
                Energy::MIN,
                Energy::MAX,
            )),
        })
    }
}

/// Name-based id for an entry whose stored `id` is unusable.
///
/// Hashes the raw id text with the timestamp and message, so distinct entries
/// get distinct ids and the value is stable across loads.
pub fn derived_id(raw_id: &str, timestamp: &DateTime<Utc>, message: &str) -> CommitId {
    let name = format!(
        "keepsake-commit|{raw_id}|{}|{message}",
        lenient::format_timestamp(timestamp)
    );
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}
