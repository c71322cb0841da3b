//! Atomic whole-file replacement with cross-process locking.
//!
//! Every write lands in a sibling temp file, is fsynced and then renamed over
//! the target, so a reader opening the file sees either the old or the new
//! content in full.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<AtomicFileError> for linkbook_core::LinkbookError {
    fn from(e: AtomicFileError) -> Self {
        match e {
            AtomicFileError::IoError(io) => io.into(),
            AtomicFileError::LockError(msg) => Self::data_access(msg),
        }
    }
}

/// A handle to a file that is only ever replaced as a whole.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: `update` holds an exclusive lock for read-modify-write
/// - **Durability**: Explicit fsync of the temp file before rename and of
///   the directory after it
#[derive(Debug, Clone)]
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(content))`: The file exists and is not blank
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read the file
    pub fn read(&self) -> Result<Option<String>, AtomicFileError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(content))
    }

    /// Replaces the file content atomically.
    pub fn write(&self, content: &str) -> Result<(), AtomicFileError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to temporary file in the same directory
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        // Atomic rename
        fs::rename(&tmp_path, &self.path)?;
        sync_parent_dir(&self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// `f` receives the current content (`None` when the file is missing or
    /// blank) and returns the replacement. Nothing is written if `f` fails;
    /// its error is returned as is.
    pub fn update<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(Option<String>) -> Result<String, E>,
        E: From<AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let current = self.read()?;
        let next = f(current)?;
        self.write(&next)?;

        Ok(())
    }

    /// Writes the content produced by `f` only if the file is missing or
    /// blank, under the same lock as [`update`](Self::update).
    ///
    /// Returns `true` when the file was written.
    pub fn create_if_missing<F, E>(&self, f: F) -> Result<bool, E>
    where
        F: FnOnce() -> Result<String, E>,
        E: From<AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        if self.read()?.is_some() {
            return Ok(false);
        }
        self.write(&f()?)?;

        Ok(true)
    }

    /// Gets a temporary file path for atomic writes.
    fn temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// Makes the rename itself durable.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<(), AtomicFileError> {
    if let Some(parent) = path.parent() {
        File::open(parent)?.sync_all()?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<(), AtomicFileError> {
    Ok(())
}

/// An exclusive lock on `<file>.lock`, released when dropped.
///
/// The lock file itself stays on disk. Removing it would let a later locker
/// create a fresh inode and lock that while an earlier waiter still holds the
/// unlinked one.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbook_core::LinkbookError;
    use tempfile::TempDir;

    fn increment(current: Option<String>) -> Result<String, AtomicFileError> {
        let n: u32 = current.map(|c| c.trim().parse().unwrap()).unwrap_or(0);
        Ok((n + 1).to_string())
    }

    #[test]
    fn test_read_missing_and_blank() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("data.json"));
        assert!(file.read().unwrap().is_none());

        fs::write(file.path(), "  \n").unwrap();
        assert!(file.read().unwrap().is_none());
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data.json");
        let file = AtomicFile::new(path.clone());

        file.write("{\"a\":1}").unwrap();

        assert_eq!(file.read().unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(!temp_dir.path().join("nested").join(".data.json.tmp").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_rewrite_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("data.json"));

        file.write("first").unwrap();
        file.write("second").unwrap();

        assert_eq!(file.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_update_sees_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("counter.txt"));

        for _ in 0..3 {
            file.update(increment).unwrap();
        }

        assert_eq!(file.read().unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("data.txt"));
        file.write("before").unwrap();

        let result = file.update(|_| Err(LinkbookError::serialization("text", "nope")));

        assert!(result.unwrap_err().is_serialization());
        assert_eq!(file.read().unwrap().as_deref(), Some("before"));
    }

    #[test]
    fn test_create_if_missing_keeps_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("data.txt"));

        let created: Result<bool, AtomicFileError> = file.create_if_missing(|| Ok("one".into()));
        assert!(created.unwrap());
        let created: Result<bool, AtomicFileError> = file.create_if_missing(|| Ok("two".into()));
        assert!(!created.unwrap());

        assert_eq!(file.read().unwrap().as_deref(), Some("one"));
    }

    #[test]
    fn test_concurrent_updates_are_serialised() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.txt");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let file = AtomicFile::new(path.clone());
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        file.update(increment).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let file = AtomicFile::new(path);
        assert_eq!(file.read().unwrap().as_deref(), Some("80"));
    }
}
