use super::KeyValueStore;
use crate::error::AppError;
use std::path::{Path, PathBuf};

pub const STORE_DIR_ENV_VAR: &str = "DAYTODO_STORE_DIR";
const APP_DIR_NAME: &str = "daytodo";

/// Resolves the directory holding the slot files.
///
/// `DAYTODO_STORE_DIR` wins over the configured directory, which wins over the
/// per-user default.
pub fn store_dir(configured: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_DIR_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }

    default_app_dir()
}

pub(crate) fn default_app_dir() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
    }
}

/// One JSON file per slot under a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> Result<PathBuf, AppError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(AppError::invalid_data(format!("invalid slot name '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.slot_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, value)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        let path = self.slot_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
