//! Generic journal use-cases shared by every tool.
//!
//! # Responsibility
//! - Wrap a `JsonStore` with load/append/clear entry points.
//! - Define the validation and service error taxonomy.

use crate::config::StoreConfig;
use crate::model::commit::{Energy, Mood, UnknownCommitType};
use crate::model::record::Record;
use crate::store::{JsonStore, Loaded, StoreError, StoreResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User input rejected before any store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required free text was empty or whitespace.
    EmptyText,
    MoodOutOfRange(i64),
    EnergyOutOfRange(i64),
    UnknownCommitType(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text cannot be empty"),
            Self::MoodOutOfRange(value) => write!(
                f,
                "mood must be between {} and {}, got {value}",
                Mood::MIN,
                Mood::MAX
            ),
            Self::EnergyOutOfRange(value) => write!(
                f,
                "energy must be between {} and {}, got {value}",
                Energy::MIN,
                Energy::MAX
            ),
            Self::UnknownCommitType(value) => {
                write!(f, "{}", UnknownCommitType(value.clone()))
            }
        }
    }
}

impl Error for ValidationError {}

impl From<UnknownCommitType> for ValidationError {
    fn from(value: UnknownCommitType) -> Self {
        Self::UnknownCommitType(value.0)
    }
}

/// Failure of one command: bad input or a terminal store error.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Returns the trimmed text, or `EmptyText` when nothing is left.
pub fn require_text(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyText)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Load/append/clear over one tool's store.
pub struct JournalService<R> {
    store: JsonStore<R>,
}

impl<R: Record> JournalService<R> {
    pub fn new(store: JsonStore<R>) -> Self {
        Self { store }
    }

    /// Builds the service directly from a resolved config.
    pub fn open(config: StoreConfig) -> Self {
        Self::new(JsonStore::new(config))
    }

    pub fn store(&self) -> &JsonStore<R> {
        &self.store
    }

    /// Loads the best available store; see `JsonStore::load`.
    pub fn load(&self) -> StoreResult<Loaded<R>> {
        self.store.load()
    }

    pub fn append(&self, record: R) -> StoreResult<Loaded<R>> {
        self.store.append(record)
    }

    pub fn clear(&self) -> StoreResult<usize> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::{require_text, ValidationError};

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("  a sunrise ").unwrap(), "a sunrise");
        assert_eq!(require_text(" \n").unwrap_err(), ValidationError::EmptyText);
    }

    #[test]
    fn validation_messages_name_the_range() {
        let message = ValidationError::MoodOutOfRange(5).to_string();
        assert_eq!(message, "mood must be between -2 and 2, got 5");
    }
}
