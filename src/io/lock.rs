use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;

const RETRY_INTERVAL: Duration = Duration::from_millis(25);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("{path} is held by another dose process")]
    Busy { path: PathBuf },
}

/// Exclusive writer lock for a store, backed by `flock(2)` on
/// `dosette/.lock`. The lock is released when the guard drops; the lock
/// file itself stays behind as an inert marker.
///
/// Readers never take the lock: cabinet saves are atomic renames, so a
/// concurrent load sees either the old file or the new one.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
}

impl StoreLock {
    /// Take the lock, retrying until `timeout` has passed.
    pub fn acquire(dosette_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = dosette_dir.join(".lock");
        let file = File::options()
            .create(true)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::Open {
                path: path.clone(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        while flock_exclusive(&file).is_err() {
            if Instant::now() >= deadline {
                return Err(LockError::Busy { path });
            }
            std::thread::sleep(RETRY_INTERVAL);
        }
        Ok(StoreLock { _file: file })
    }

    pub fn acquire_default(dosette_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(dosette_dir, DEFAULT_TIMEOUT)
    }
}

#[cfg(unix)]
fn flock_exclusive(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;
    match unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) } {
        0 => Ok(()),
        _ => Err(io::Error::last_os_error()),
    }
}

// No flock outside Unix; writers fall back to last-write-wins.
#[cfg(not(unix))]
fn flock_exclusive(_file: &File) -> io::Result<()> {
    Ok(())
}
