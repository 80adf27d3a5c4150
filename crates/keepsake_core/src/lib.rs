//! Core domain logic for keepsake journaling tools.
//! This crate owns record invariants and crash-safe persistence.

pub mod config;
pub mod logging;
pub mod model;
pub mod pick;
pub mod service;
pub mod stats;
pub mod store;

pub use config::{ConfigError, ConfigOverrides, StoreConfig, ToolKind, MAX_BACKUPS_LIMIT};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::commit::{CommitId, CommitType, Energy, LifeCommit, Mood, UnknownCommitType};
pub use model::jar::{CapsuleNote, Memory, Pebble};
pub use model::record::{Layout, Record, Store, SCHEMA_VERSION};
pub use pick::{chance, pick_uniform, pick_weighted, sample};
pub use service::commit_service::{detect_commit_type, CommitRequest, CommitService, RecordedCommit};
pub use service::journal_service::{require_text, JournalService, ServiceError, ValidationError};
pub use store::{JsonStore, LoadOutcome, Loaded, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
