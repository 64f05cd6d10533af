use std::path::PathBuf;

use thiserror::Error;

use stockbook_core::DomainError;

pub type InfraResult<T> = Result<T, InfraError>;

#[derive(Debug, Error)]
pub enum InfraError {
    /// The ledger or roster rejected the operation; nothing was written.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed state in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bookkeeper lock poisoned")]
    Poisoned,
}

impl InfraError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// The domain error behind this failure, if it was a rejected operation.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            InfraError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
