//! Run lock
//!
//! Prevents two concurrent `post` runs from racing to create duplicate posts.
//! Sequential runs are not deduplicated.
//!
//! The lock file is left on disk after release. Unlinking it would let a
//! second run lock the old inode while a third locks a freshly created file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Lock guard that ensures only one run posts at a time.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    lock_file: Option<File>,
}

impl RunLock {
    /// Acquire an exclusive lock on `path`.
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::LockError(format!("Failed to open lock file: {}", e)))?;

        match lock_file.try_lock_exclusive() {
            Ok(()) => {
                debug!(path = %path.display(), "Run lock acquired");
                Ok(Self {
                    path,
                    lock_file: Some(lock_file),
                })
            }
            Err(_) => {
                warn!(path = %path.display(), "Another leaderboard run holds the lock");
                Err(Error::AlreadyRunning)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock manually
    pub fn release(&mut self) {
        if let Some(file) = self.lock_file.take() {
            let _ = file.unlock();
            debug!(path = %self.path.display(), "Run lock released");
        }
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        self.release();
    }
}
