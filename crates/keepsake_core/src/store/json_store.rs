//! JSON file store with backup rotation and a corruption fallback chain.
//!
//! # Responsibility
//! - Load the whole store for one tool, never failing on bad data.
//! - Refuse to load (and so to save over) a primary it cannot read.
//! - Save the whole store: rotate backups, then write atomically.
//!
//! # Invariants
//! - A missing primary file yields a fresh empty store.
//! - An unreadable primary falls back to `.bak1`, `.bak2`, ... in order;
//!   the first valid generation is promoted back into the primary file.
//! - A corrupt primary is copied to `.corrupted` before any fallback; when
//!   that copy fails the load fails.
//! - When nothing is valid an empty store is returned.

use super::atomic::{ensure_parent_dir, write_atomic};
use super::backup::{backup_path, preserve_corrupted, rotate_backups};
use super::{IoOp, StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::record::{Record, Store};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// How `JsonStore::load` arrived at the returned store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No primary file existed; the store is new and empty.
    Fresh,
    /// The primary file was valid.
    Primary,
    /// The primary was unusable; backup `generation` was promoted. The old
    /// primary bytes were copied to `preserved` first.
    Recovered { generation: usize, preserved: PathBuf },
    /// Nothing was usable; an empty store replaces the corrupt data, which
    /// was copied to `preserved` first.
    Reset { preserved: PathBuf },
}

/// Result of a load: the store plus how it was obtained.
#[derive(Debug, Clone)]
pub struct Loaded<R> {
    pub store: Store<R>,
    pub outcome: LoadOutcome,
}

impl<R> Loaded<R> {
    /// Whether the returned data differs from what the primary file held.
    pub fn was_repaired(&self) -> bool {
        matches!(
            self.outcome,
            LoadOutcome::Recovered { .. } | LoadOutcome::Reset { .. }
        )
    }
}

enum Candidate<R> {
    Missing,
    Valid(Store<R>),
    Invalid(String),
    Unreadable(StoreError),
}

/// Whole-file JSON store for one record variant.
#[derive(Debug, Clone)]
pub struct JsonStore<R> {
    config: StoreConfig,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonStore<R> {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            _record: PhantomData,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Loads the best available valid store.
    ///
    /// # Side effects
    /// - May rewrite the primary file from a recovered backup.
    /// - Copies a corrupt primary file to its `.corrupted` side-name.
    ///
    /// # Errors
    /// - The primary exists but cannot be read (permissions, a directory in
    ///   its place). Its contents are unknown, so it is not treated as
    ///   corrupt.
    /// - The primary is corrupt and the `.corrupted` copy fails. Nothing is
    ///   reset until the old bytes are safe.
    pub fn load(&self) -> StoreResult<Loaded<R>> {
        let path = self.path();
        let reason = match read_candidate::<R>(path) {
            Candidate::Missing => {
                debug!(
                    "event=store_load module=store status=fresh path={}",
                    path.display()
                );
                return Ok(Loaded {
                    store: Store::new(),
                    outcome: LoadOutcome::Fresh,
                });
            }
            Candidate::Valid(store) => {
                debug!(
                    "event=store_load module=store status=ok path={} records={}",
                    path.display(),
                    store.len()
                );
                return Ok(Loaded {
                    store,
                    outcome: LoadOutcome::Primary,
                });
            }
            Candidate::Unreadable(err) => {
                warn!(
                    "event=store_load module=store status=error path={} error={}",
                    path.display(),
                    err
                );
                return Err(err);
            }
            Candidate::Invalid(reason) => reason,
        };

        warn!(
            "event=store_corrupt module=store path={} reason={}",
            path.display(),
            reason
        );
        let preserved = preserve_corrupted(path)?;

        for generation in 1..=self.config.max_backups {
            let candidate_path = backup_path(path, generation);
            match read_candidate::<R>(&candidate_path) {
                Candidate::Missing => continue,
                Candidate::Invalid(reason) => {
                    warn!(
                        "event=store_corrupt module=store path={} reason={}",
                        candidate_path.display(),
                        reason
                    );
                }
                Candidate::Unreadable(err) => {
                    warn!(
                        "event=backup_skip module=store status=error path={} error={}",
                        candidate_path.display(),
                        err
                    );
                }
                Candidate::Valid(store) => {
                    self.promote(&store, generation);
                    return Ok(Loaded {
                        store,
                        outcome: LoadOutcome::Recovered {
                            generation,
                            preserved,
                        },
                    });
                }
            }
        }

        warn!(
            "event=store_reset module=store path={} preserved={}",
            path.display(),
            preserved.display()
        );
        Ok(Loaded {
            store: Store::new(),
            outcome: LoadOutcome::Reset { preserved },
        })
    }

    /// Persists the full store, rotating backups first.
    ///
    /// # Errors
    /// - Encoding, directory creation, rotation or the atomic write fail.
    ///   The previous primary file is intact in every failure case.
    pub fn save(&self, store: &Store<R>) -> StoreResult<()> {
        let payload = encode(store)?;
        ensure_parent_dir(self.path())?;
        rotate_backups(self.path(), self.config.max_backups)?;
        write_atomic(self.path(), &payload)?;
        info!(
            "event=store_save module=store status=ok path={} records={}",
            self.path().display(),
            store.len()
        );
        Ok(())
    }

    /// Loads, appends one record and saves.
    ///
    /// Nothing is written when the load fails.
    ///
    /// Returns the updated store together with the outcome of the load that
    /// preceded the append, so callers can report a recovery.
    pub fn append(&self, record: R) -> StoreResult<Loaded<R>> {
        let mut loaded = self.load()?;
        loaded.store.push(record);
        self.save(&loaded.store)?;
        Ok(loaded)
    }

    /// Empties the store while keeping its version and creation time.
    ///
    /// Returns how many records were removed.
    pub fn clear(&self) -> StoreResult<usize> {
        let mut store = self.load()?.store;
        let removed = store.records.len();
        store.records.clear();
        self.save(&store)?;
        info!(
            "event=store_clear module=store status=ok path={} removed={}",
            self.path().display(),
            removed
        );
        Ok(removed)
    }

    fn promote(&self, store: &Store<R>, generation: usize) {
        let result = encode(store).and_then(|payload| write_atomic(self.path(), &payload));
        match result {
            Ok(()) => warn!(
                "event=store_recovered module=store path={} generation={}",
                self.path().display(),
                generation
            ),
            // The recovered data is still returned; the next save rewrites the file.
            Err(err) => warn!(
                "event=store_recovered module=store status=unpromoted path={} generation={} error={}",
                self.path().display(),
                generation,
                err
            ),
        }
    }
}

/// Serialized form of a store: pretty JSON with a trailing newline.
pub fn encode<R: Record>(store: &Store<R>) -> StoreResult<Vec<u8>> {
    let document = store.to_json()?;
    let mut payload = serde_json::to_vec_pretty(&document)?;
    payload.push(b'\n');
    Ok(payload)
}

fn read_candidate<R: Record>(path: &Path) -> Candidate<R> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Candidate::Missing,
        Err(err) => return Candidate::Unreadable(StoreError::io(IoOp::Read, path, err)),
    };

    if raw.trim().is_empty() {
        return Candidate::Valid(Store::new());
    }

    let document: Value = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(err) => return Candidate::Invalid(format!("invalid json: {err}")),
    };

    match Store::from_json(&document) {
        Some(store) => Candidate::Valid(store),
        None => Candidate::Invalid("unexpected root type".to_string()),
    }
}
