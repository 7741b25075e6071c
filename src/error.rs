//! Error types for collection conversion
//!
//! [`ConvertError`] ends a whole run. [`SkipReason`] costs a single item and
//! is recorded while the walk continues.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: nothing gets walked
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid JSON: {0}")]
    InputFormat(#[from] serde_json::Error),

    #[error("collection document must be a JSON object")]
    NotACollection,

    #[error("collection is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("invalid file type: {} (expected a .json file)", .0.display())]
    InvalidFileType(PathBuf),

    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// True when the payload itself could not be read as a collection
    pub fn is_input_format(&self) -> bool {
        matches!(
            self,
            ConvertError::InputFormat(_) | ConvertError::NotACollection | ConvertError::Encoding(_)
        )
    }
}

/// Why a single node produced no output
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("node is neither a folder nor a request")]
    UnrecognizedNode,

    #[error("malformed folder: {0}")]
    MalformedFolder(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("unsupported URL format: {0}")]
    UnsupportedUrl(String),

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
