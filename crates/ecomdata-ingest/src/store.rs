use std::ffi::OsString;
use std::path::{Path, PathBuf};

use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use tracing::debug;

use crate::errors::IngestError;

const COMPANION_SUFFIXES: &[&str] = &["-wal", "-shm", "-journal"];

/// Delete the store file and its SQLite companions, creating the parent
/// directory if needed.
pub fn reset_store(path: &Path) -> Result<(), IngestError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| store_error(path, err))?;
        }
    }

    let mut targets = vec![path.to_path_buf()];
    targets.extend(COMPANION_SUFFIXES.iter().map(|suffix| with_suffix(path, suffix)));

    for target in targets {
        match std::fs::remove_file(&target) {
            Ok(()) => debug!(path = %target.display(), "removed store file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(store_error(&target, err)),
        }
    }

    Ok(())
}

/// Create a fresh store file and open a single connection to it.
pub async fn open_store(
    path: &Path,
    enforce_foreign_keys: bool,
) -> Result<SqliteConnection, IngestError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(enforce_foreign_keys);

    SqliteConnection::connect_with(&options)
        .await
        .map_err(|err| store_error(path, err))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> IngestError {
    IngestError::StoreState {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
