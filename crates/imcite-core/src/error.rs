//! Error taxonomy for the storage core

use std::fmt;
use std::path::PathBuf;

use imcite_domain::CitekeyError;

/// Which stored artifact an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Metadata,
    Bibdata,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Metadata => write!(f, "metadata"),
            Artifact::Bibdata => write!(f, "bibliographic"),
        }
    }
}

/// Errors from the storage brokers and cache.
///
/// `NotFound` and `MalformedRecord` are deliberately distinct: a
/// caller prompting for re-import needs to know whether the record is
/// missing or present but corrupt, and neither is ever papered over
/// with an empty record.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no library found at {0}")]
    RepositoryNotFound(PathBuf),

    #[error("no {artifact} record for citekey {citekey:?}")]
    NotFound { citekey: String, artifact: Artifact },

    #[error("malformed {artifact} record for citekey {citekey:?}: {message}")]
    MalformedRecord {
        citekey: String,
        artifact: Artifact,
        message: String,
    },

    #[error("bibliographic record for {0:?} is not keyed by that citekey")]
    MismatchedCitekey(String),

    #[error(transparent)]
    Citekey(#[from] CitekeyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the "this citekey lacks that artifact" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
