// src/error.rs
//! Error types for the collection pipeline.
//!
//! - `RequestError`: one source could not be fetched. Caught per source.
//! - `ParseError`: one record could not be normalized. Record is skipped.
//! - `ExportError`: an output file could not be written. Fatal.
//! - `LoadError`: a previously exported file could not be read back
//!   (returned by `store` directly; no run step loads files).
//! - `Error`: what the runner and CLI surface to the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A source client failed; its contribution to the run is empty.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("unexpected payload from {url}: {reason}")]
    Payload { url: String, reason: String },
}

impl RequestError {
    pub fn payload(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Payload { url: url.into(), reason: reason.into() }
    }
}

/// A single raw record did not have the shape of a posting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("record is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} has no header row", .0.display())]
    MissingHeader(PathBuf),

    #[error("{} is missing column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
