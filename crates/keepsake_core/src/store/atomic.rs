//! Write-temp-then-rename primitive.
//!
//! # Invariants
//! - The temporary file lives in the target's directory so the final
//!   rename stays on one filesystem.
//! - Data is flushed and synced before the rename.
//! - Any failure before the rename removes the temporary file and leaves
//!   the target untouched.

use super::{IoOp, StoreError, StoreResult};
use log::{debug, error};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const TEMP_PREFIX: &str = ".keepsake-";
const TEMP_SUFFIX: &str = ".tmp";

/// Payload fully written and synced next to its target, not yet visible.
///
/// Dropping a staged write without calling `commit` deletes the temporary
/// file; the target is never touched before `commit`.
#[derive(Debug)]
pub struct StagedWrite {
    target: PathBuf,
    temp: NamedTempFile,
}

impl StagedWrite {
    /// Writes and syncs `payload` into a temporary sibling of `target`.
    pub fn stage(target: &Path, payload: &[u8]) -> StoreResult<Self> {
        let dir = parent_dir(target);
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&dir)
            .map_err(|err| StoreError::io(IoOp::CreateTemp, &dir, err))?;

        temp.write_all(payload)
            .and_then(|()| temp.flush())
            .map_err(|err| StoreError::io(IoOp::Write, temp.path(), err))?;
        temp.as_file()
            .sync_all()
            .map_err(|err| StoreError::io(IoOp::Sync, temp.path(), err))?;

        Ok(Self {
            target: target.to_path_buf(),
            temp,
        })
    }

    /// Path of the temporary file holding the staged payload.
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Atomically replaces the target with the staged payload.
    pub fn commit(self) -> StoreResult<()> {
        let Self { target, temp } = self;
        // On failure `PersistError` hands the temp file back; dropping it unlinks.
        temp.persist(&target)
            .map_err(|err| StoreError::io(IoOp::Rename, &target, err.error))?;
        sync_dir(&parent_dir(&target));
        Ok(())
    }
}

/// Replaces `target` with `payload` so no partial file is ever visible.
pub fn write_atomic(target: &Path, payload: &[u8]) -> StoreResult<()> {
    let result = StagedWrite::stage(target, payload).and_then(StagedWrite::commit);
    match &result {
        Ok(()) => debug!(
            "event=atomic_write module=store status=ok path={} bytes={}",
            target.display(),
            payload.len()
        ),
        Err(err) => error!(
            "event=atomic_write module=store status=error path={} error={}",
            target.display(),
            err
        ),
    }
    result
}

/// Creates the target's parent directory when missing.
pub fn ensure_parent_dir(target: &Path) -> StoreResult<()> {
    let dir = parent_dir(target);
    fs::create_dir_all(&dir).map_err(|err| StoreError::io(IoOp::CreateDir, &dir, err))
}

pub(crate) fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    // Directory fsync makes the rename itself durable; best effort only.
    if let Err(err) = File::open(dir).and_then(|handle| handle.sync_all()) {
        debug!(
            "event=dir_sync module=store status=skipped path={} error={}",
            dir.display(),
            err
        );
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

#[cfg(test)]
mod tests {
    use super::{parent_dir, write_atomic, StagedWrite};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn temp_entries(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "tmp"))
            .collect()
    }

    #[test]
    fn write_atomic_creates_and_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("store.json");

        write_atomic(&target, b"first").unwrap();
        write_atomic(&target, b"second").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"second");
        assert!(temp_entries(dir.path()).is_empty());
    }

    #[test]
    fn dropped_stage_leaves_target_untouched_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("store.json");
        fs::write(&target, b"original").unwrap();

        let staged = StagedWrite::stage(&target, b"replacement").unwrap();
        assert_eq!(fs::read(staged.temp_path()).unwrap(), b"replacement");
        assert_eq!(fs::read(&target).unwrap(), b"original");
        drop(staged);

        assert_eq!(fs::read(&target).unwrap(), b"original");
        assert!(temp_entries(dir.path()).is_empty());
    }

    #[test]
    fn failed_rename_keeps_target_and_removes_temp() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let err = write_atomic(&target, b"payload").unwrap_err();
        assert!(err.to_string().contains("rename"), "unexpected error: {err}");
        assert!(target.join("keep").exists());
        assert!(temp_entries(dir.path()).is_empty());
    }

    #[test]
    fn missing_directory_is_reported_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("store.json");

        let err = write_atomic(&target, b"payload").unwrap_err();
        assert!(err.to_string().contains("temporary file"), "unexpected error: {err}");
        assert!(!target.exists());
    }

    #[test]
    fn parent_dir_defaults_to_current_directory() {
        assert_eq!(parent_dir(Path::new("store.json")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/store.json")), PathBuf::from("a"));
    }
}
