//! Input loading: reads the whole CSV file into memory and yields trimmed,
//! non-empty lines.
//!
//! Line numbers are 1-based positions in the *filtered* sequence, so a blank
//! line mid-file shifts the numbering of everything after it relative to the
//! on-disk file. This matches the reporting of the original tool; known
//! quirk, kept for compatibility.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::row::RawLine;

/// Fatal file-loading failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("CSV file {path:?} not found")]
    NotFound { path: PathBuf },
    #[error("CSV file {path:?} is not readable")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read CSV file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn load_lines(path: &Path) -> Result<Vec<RawLine>, FileError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => FileError::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => FileError::Unreadable {
            path: path.to_path_buf(),
            source: err,
        },
        _ => FileError::Read {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    Ok(split_lines(&content))
}

/// Splits content on newlines, trims each line, and drops lines that are
/// empty after trimming. Numbering restarts from 1 over what remains.
pub fn split_lines(content: &str) -> Vec<RawLine> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(idx, line)| RawLine {
            number: idx + 1,
            text: line.to_string(),
        })
        .collect()
}
