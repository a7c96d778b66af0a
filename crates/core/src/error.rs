use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal failures of a run. Unparseable dates inside stored state are not
/// errors; see [`crate::analysis::tenure::Tenure::Unparsed`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode {what} at {}: {source}", .path.display())]
    Decode {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rotations payload: {0}")]
    InvalidPayload(String),

    #[error("storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::InvalidPayload(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
