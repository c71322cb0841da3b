//! Typed TOML documents on top of [`AtomicFile`].

use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use linkbook_core::error::Result;

use super::atomic_file::AtomicFile;

/// A TOML file deserialized into `T`, written atomically.
pub struct AtomicTomlFile<T> {
    file: AtomicFile,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// Returns `Ok(None)` when the file doesn't exist or is empty.
    pub fn load(&self) -> Result<Option<T>> {
        match self.file.read()? {
            Some(content) => Ok(Some(toml::from_str(&content)?)),
            None => Ok(None),
        }
    }

    /// Saves `data` unless the file already holds a document.
    ///
    /// Returns `true` when the file was written.
    pub fn save_if_missing(&self, data: &T) -> Result<bool> {
        self.file
            .create_if_missing(|| Ok(toml::to_string_pretty(data)?))
    }

    /// Performs a locked update, starting from `default_value` when the file
    /// doesn't exist yet.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        self.file.update(|current| {
            let mut data = match current {
                Some(content) => toml::from_str(&content)?,
                None => default_value,
            };
            f(&mut data);
            Ok(toml::to_string_pretty(&data)?)
        })
    }
}
