use crate::storage::{CredentialStorage, is_valid_key};
use crate::{AuthError, Result as AuthErrorResult};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[track_caller]
    fn path_for(&self, key: &str) -> AuthErrorResult<PathBuf> {
        if !is_valid_key(key) {
            return Err(AuthError::invalid_key(key));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CredentialStorage for FileStorage {
    fn load(&self, key: &str) -> AuthErrorResult<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::file_read(path, e)),
        }
    }

    /// Writes through a temp file, fsync and atomic rename so a crash never
    /// leaves a half-written record behind.
    fn store(&self, key: &str, value: &str) -> AuthErrorResult<()> {
        let final_path = self.path_for(key)?;

        fs::create_dir_all(&self.dir)
            .map_err(|e| AuthError::dir_creation(self.dir.clone(), e))?;

        let temp_path = self
            .dir
            .join(format!("{key}.json.tmp.{}", std::process::id()));

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| AuthError::file_write(temp_path.clone(), e))?;

            file.write_all(value.as_bytes())
                .map_err(|e| AuthError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| AuthError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AuthError::atomic_rename(temp_path, final_path.clone(), e)
        })?;

        debug!("Stored credential record at {final_path:?}");
        Ok(())
    }

    fn remove(&self, key: &str) -> AuthErrorResult<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed credential record at {path:?}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::file_remove(path, e)),
        }
    }
}
