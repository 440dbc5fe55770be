//! JSON file helpers for the month-keyed store
//!
//! Every store file is read whole and replaced whole. Replacement goes
//! through a hidden sibling file that is renamed over the target, so a
//! crash mid-write leaves the previous version intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ExpenseError;

fn store_error(action: &str, path: &Path, err: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Hidden sibling used while rewriting `path`, e.g. `data/.transactions.json.partial`
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

/// Load a store file, or `T::default()` when it has not been written yet
///
/// A file that exists but cannot be parsed is an error; it is never
/// silently replaced by the default.
pub fn read_json<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no store file at {}, starting empty", path.display());
            return Ok(T::default());
        }
        Err(e) => return Err(store_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| store_error("parse", path, e))
}

/// Replace a store file with the pretty-printed JSON of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| store_error("create directory", dir, e))?;
    }

    let partial = partial_path(path);
    let result = write_partial(&partial, data).and_then(|()| {
        fs::rename(&partial, path).map_err(|e| store_error("replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&partial);
    } else {
        debug!("saved {}", path.display());
    }
    result
}

fn write_partial<T: Serialize>(partial: &Path, data: &T) -> Result<(), ExpenseError> {
    let file = File::create(partial).map_err(|e| store_error("create", partial, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| store_error("write", partial, e))?;
    writer.flush().map_err(|e| store_error("flush", partial, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| store_error("sync", partial, e))
}
