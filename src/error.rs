use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{action} {path:?} failed: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed scene description: {0}")]
    Scene(#[from] serde_json::Error),
    #[error("sphere #{index} is invalid: {reason}")]
    InvalidSphere { index: usize, reason: &'static str },
    #[error("directional light #{index} is invalid: {reason}")]
    InvalidLight { index: usize, reason: &'static str },
    #[error("invalid render settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error.
    ///
    /// I/O failures report the OS error code when there is one.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io { source, .. } => match source.raw_os_error() {
                Some(code) if code != 0 => code,
                _ => 1,
            },
            _ => 1,
        }
    }
}
