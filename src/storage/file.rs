use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::KeyValueStore;
use crate::error::AppError;

/// One `<key>.json` file per key under a root directory.
///
/// The directory is created on the first write, so pointing the store at a
/// fresh path and only reading never touches the filesystem.
#[derive(Clone, Debug)]
pub struct FileStore {
    root_dir: PathBuf,
}

impl FileStore {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root_dir.join(format!("{key}.json"))
    }
}

fn storage_err(path: &Path, source: std::io::Error) -> AppError {
    AppError::Storage {
        path: path.display().to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err(&path, e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.root_dir).map_err(|e| storage_err(&self.root_dir, e))?;
        let path = self.path_for(key);
        // Write beside the target and rename so a crash never leaves half a document.
        let tmp = self.root_dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| storage_err(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_err(&path, e))?;
        debug!(path = %path.display(), bytes = value.len(), "wrote collection");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(&path, e)),
        }
    }
}
