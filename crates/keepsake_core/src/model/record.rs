//! Record contract and the persisted `Store` envelope.
//!
//! # Responsibility
//! - Describe how a record variant is timestamped, dated and decoded.
//! - Convert a whole store to and from its JSON document.
//!
//! # Invariants
//! - `Store::records` keeps insertion order; the last element is the newest.
//! - Decoding never fails on a bad entry, only on a bad root shape.

use crate::model::lenient;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Schema tag written into envelope-shaped store files.
pub const SCHEMA_VERSION: &str = "1.0";

/// On-disk document shape for one record variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// The file is a bare JSON array of record objects.
    BareList,
    /// The file is `{ "version", "created_at", <records_key>: [...] }`.
    Envelope { records_key: &'static str },
}

/// Contract every persisted record variant fulfils.
pub trait Record: Clone + Serialize {
    /// Document shape used when this variant is persisted.
    const LAYOUT: Layout;

    /// UTC creation time, assigned once by the store-side constructor.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Calendar day the record belongs to for grouping and streaks.
    fn day(&self) -> NaiveDate {
        self.timestamp().date_naive()
    }

    /// Primary free-text content.
    fn text(&self) -> &str;

    /// Tags attached to the record; plain variants have none.
    fn tags(&self) -> &[String] {
        &[]
    }

    /// Decodes one entry, applying the variant's defaulting rules.
    ///
    /// Returns `None` when the entry cannot be placed in time or lacks its
    /// required content; the loader skips such entries.
    fn from_json(value: &Value) -> Option<Self>;
}

/// Full persisted collection for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Store<R> {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub records: Vec<R>,
}

impl<R: Record> Store<R> {
    /// Creates an empty store stamped with the current schema and time.
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
            records: Vec::new(),
        }
    }

    /// Appends a record at the newest position.
    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Builds the JSON document for this store according to `R::LAYOUT`.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let records = serde_json::to_value(&self.records)?;
        Ok(match R::LAYOUT {
            Layout::BareList => records,
            Layout::Envelope { records_key } => {
                let mut root = Map::new();
                root.insert("version".to_string(), Value::String(self.version.clone()));
                root.insert(
                    "created_at".to_string(),
                    Value::String(lenient::format_timestamp(&self.created_at)),
                );
                root.insert(records_key.to_string(), records);
                Value::Object(root)
            }
        })
    }

    /// Decodes a store document.
    ///
    /// Returns `None` only when the root has the wrong JSON type for
    /// `R::LAYOUT`; every other defect is defaulted field by field.
    pub fn from_json(value: &Value) -> Option<Self> {
        match R::LAYOUT {
            Layout::BareList => {
                let entries = value.as_array()?;
                let records = decode_entries(entries);
                let created_at = records
                    .iter()
                    .map(Record::timestamp)
                    .min()
                    .unwrap_or_else(Utc::now);
                Some(Self {
                    version: SCHEMA_VERSION.to_string(),
                    created_at,
                    records,
                })
            }
            Layout::Envelope { records_key } => {
                let root = value.as_object()?;
                let version = lenient::string_or(root.get("version"), SCHEMA_VERSION);
                let created_at = root
                    .get("created_at")
                    .and_then(lenient::timestamp)
                    .unwrap_or_else(Utc::now);
                let records = root
                    .get(records_key)
                    .and_then(Value::as_array)
                    .map(|entries| decode_entries(entries))
                    .unwrap_or_default();
                Some(Self {
                    version,
                    created_at,
                    records,
                })
            }
        }
    }
}

impl<R: Record> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_entries<R: Record>(entries: &[Value]) -> Vec<R> {
    entries.iter().filter_map(R::from_json).collect()
}
