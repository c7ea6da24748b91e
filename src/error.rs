//! Error types for loading, writing and the upload run.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::model::document::DocumentId;

/// Errors raised while reading the vocabulary file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes are not UTF-8; `guess` is the detector's best candidate.
    #[error("{path} is not valid UTF-8 (looks like {guess})")]
    InvalidEncoding { path: PathBuf, guess: String },

    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },
}

/// Errors raised by a document store write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid store base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// Empty, `.` or `..` collection or document id.
    #[error("'{segment}' cannot be used as a document path segment")]
    InvalidPathSegment { segment: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401/403 from the store.
    #[error("not authorized (HTTP {}): {message}", .status.as_u16())]
    Unauthorized { status: StatusCode, message: String },

    #[error("rate limited: {message}")]
    RateLimited { message: String },

    #[error("HTTP {}: {message}", .status.as_u16())]
    Status { status: StatusCode, message: String },
}

/// Errors that end an upload run.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("The file was not found at {}", .path.display())]
    InputFileMissing { path: PathBuf },

    #[error(transparent)]
    Load(LoadError),

    /// Rows before `document_id` are already committed.
    #[error("failed to write document '{document_id}': {source}")]
    RemoteWriteFailure {
        document_id: DocumentId,
        #[source]
        source: StoreError,
    },
}

impl From<LoadError> for UploadError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::FileNotFound { path } => UploadError::InputFileMissing { path },
            other => UploadError::Load(other),
        }
    }
}

pub type Result<T, E = UploadError> = std::result::Result<T, E>;
