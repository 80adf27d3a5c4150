//! Durable JSON persistence for record stores.
//!
//! # Responsibility
//! - Write store files so a reader never observes a partial document.
//! - Keep numbered backup generations of the previous file contents.
//! - Load the best available store, recovering from corruption.
//!
//! # Invariants
//! - Every save rewrites the whole file through `atomic::write_atomic`.
//! - A failed save leaves the previous file byte-for-byte intact.
//! - Corruption degrades to a backup or a fresh store. Loading fails only
//!   when the primary cannot be read or its `.corrupted` copy fails.
//! - No locking: two concurrent writers race and the later rename wins.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod atomic;
pub mod backup;
pub mod json_store;

pub use atomic::{write_atomic, StagedWrite};
pub use backup::{backup_path, corrupted_path, rotate_backups, BACKUP_SUFFIX, CORRUPTED_SUFFIX};
pub use json_store::{encode, JsonStore, LoadOutcome, Loaded};

pub type StoreResult<T> = Result<T, StoreError>;

/// Filesystem step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    CreateDir,
    CreateTemp,
    Write,
    Sync,
    Rename,
    Read,
    Copy,
}

impl IoOp {
    fn as_str(self) -> &'static str {
        match self {
            Self::CreateDir => "create directory",
            Self::CreateTemp => "create temporary file",
            Self::Write => "write",
            Self::Sync => "sync",
            Self::Rename => "rename",
            Self::Read => "read",
            Self::Copy => "copy",
        }
    }
}

/// Terminal persistence failure for one command invocation.
#[derive(Debug)]
pub enum StoreError {
    Io {
        op: IoOp,
        path: PathBuf,
        source: io::Error,
    },
    Encode(serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { op, path, source } => {
                write!(f, "failed to {} `{}`: {source}", op.as_str(), path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode store: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
