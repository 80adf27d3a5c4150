//! Numbered backup generations and the forensic corruption copy.
//!
//! Generation 1 is the most recent previous version: `<file>.bak1`.
//! Rotation shifts every generation up by one (the oldest beyond the limit
//! is overwritten) and then copies the live file into generation 1.

use super::atomic::write_atomic;
use super::{IoOp, StoreError, StoreResult};
use log::{debug, warn};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const BACKUP_SUFFIX: &str = ".bak";
pub const CORRUPTED_SUFFIX: &str = ".corrupted";

/// Path of backup `generation` (1-based) for `path`.
pub fn backup_path(path: &Path, generation: usize) -> PathBuf {
    with_suffix(path, &format!("{BACKUP_SUFFIX}{generation}"))
}

/// Side-name under which an unrecoverable primary file is preserved.
pub fn corrupted_path(path: &Path) -> PathBuf {
    with_suffix(path, CORRUPTED_SUFFIX)
}

/// Shifts backups up one generation and snapshots the live file.
///
/// Each shift is a single rename and the snapshot goes through the atomic
/// writer, so an interrupted rotation never damages the live file and
/// never leaves a truncated generation behind. A no-op when
/// `max_generations` is zero.
pub fn rotate_backups(path: &Path, max_generations: usize) -> StoreResult<()> {
    if max_generations == 0 {
        return Ok(());
    }

    for generation in (1..max_generations).rev() {
        let src = backup_path(path, generation);
        let dst = backup_path(path, generation + 1);
        match fs::rename(&src, &dst) {
            Ok(()) => debug!(
                "event=backup_shift module=store status=ok from={} to={}",
                src.display(),
                dst.display()
            ),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(StoreError::io(IoOp::Rename, src, err)),
        }
    }

    let current = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(StoreError::io(IoOp::Read, path, err)),
    };
    write_atomic(&backup_path(path, 1), &current)
}

/// Copies the corrupt primary file aside for later inspection.
///
/// Overwrites an earlier `.corrupted` copy.
///
/// # Errors
/// - The copy fails. Callers must not replace the primary in that case.
pub fn preserve_corrupted(path: &Path) -> StoreResult<PathBuf> {
    let target = corrupted_path(path);
    match fs::copy(path, &target) {
        Ok(_) => {
            debug!(
                "event=corrupt_preserve module=store status=ok path={}",
                target.display()
            );
            Ok(target)
        }
        Err(err) => {
            warn!(
                "event=corrupt_preserve module=store status=error path={} error={}",
                path.display(),
                err
            );
            Err(StoreError::io(IoOp::Copy, target, err))
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
