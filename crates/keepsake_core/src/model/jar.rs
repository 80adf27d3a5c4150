//! Plain text "jar" records: pebbles, capsule notes and memories.
//!
//! These variants persist as bare JSON arrays. Entries without their text
//! or without any usable time information are skipped on load.

use crate::model::lenient;
use crate::model::record::{Layout, Record};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

/// A single moment of gratitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pebble {
    pub text: String,
    #[serde(serialize_with = "lenient::serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Pebble {
    pub fn new(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}

impl Record for Pebble {
    const LAYOUT: Layout = Layout::BareList;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = object.get("text")?.as_str()?.to_string();
        let timestamp = lenient::timestamp(object.get("timestamp")?)?;
        Some(Self { text, timestamp })
    }
}

/// A note left in the time capsule for a future self.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapsuleNote {
    pub message: String,
    #[serde(serialize_with = "lenient::serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl CapsuleNote {
    pub fn new(message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            created_at,
            tags: Vec::new(),
        }
    }
}

impl Record for CapsuleNote {
    const LAYOUT: Layout = Layout::BareList;

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn text(&self) -> &str {
        &self.message
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let message = object.get("message")?.as_str()?.to_string();
        let created_at = lenient::timestamp(object.get("created_at")?)?;
        Some(Self {
            message,
            created_at,
            tags: lenient::tag_list(object.get("tags")),
        })
    }
}

/// A small kept moment in the memory jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Memory {
    pub text: String,
    /// Local calendar day the memory was dropped in.
    pub date: NaiveDate,
    #[serde(serialize_with = "lenient::serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Memory {
    pub fn new(text: impl Into<String>, timestamp: DateTime<Utc>, date: NaiveDate) -> Self {
        Self {
            text: text.into(),
            date,
            timestamp,
        }
    }
}

impl Record for Memory {
    const LAYOUT: Layout = Layout::BareList;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn day(&self) -> NaiveDate {
        self.date
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = object.get("text")?.as_str()?.to_string();
        let timestamp = lenient::timestamp_or_day(object, "timestamp", "date")?;
        let date = object
            .get("date")
            .and_then(lenient::day)
            .unwrap_or_else(|| timestamp.date_naive());
        Some(Self {
            text,
            date,
            timestamp,
        })
    }
}
