use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parser::Record;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize records")]
    Serialize(#[from] serde_json::Error),
}

pub fn read_text(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON, two-space indent, non-ASCII kept literal.
pub fn to_json(records: &[Record]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn write_records(path: &Path, records: &[Record]) -> Result<(), ExportError> {
    let json = to_json(records)?;
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)
}
