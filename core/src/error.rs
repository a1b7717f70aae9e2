use std::{io, path::PathBuf};

use thiserror::Error;

/// Describes the potential error conditions that might arise from
/// discovery and keyed store operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error("no git directory found at {} or any of its parents", .0.display())]
    GitDirNotFound(PathBuf),

    #[error("{} exists but is not a directory", .0.display())]
    GitDirNotADirectory(PathBuf),

    #[error("no value stored for key {0:?}")]
    KeyNotFound(String),

    #[error("record file {file} does not hold a key/value record")]
    CorruptRecord {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a usable git repository: {}", .path.display(), .reason)]
    InvalidRepo { path: PathBuf, reason: String },

    #[error("unable to serialize key/value record")]
    SerializeError(#[source] serde_json::Error),

    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of an [`Error`].
///
/// Callers that only need to decide between "initialize something" and
/// "give up" can branch on this instead of on individual variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A file system operation failed for a reason other than a missing entry.
    Io,

    /// No git directory was found, or no record exists for a key.
    NotFound,

    /// Something exists on disk but has the wrong shape.
    Corruption,

    /// The caller supplied an unusable configuration.
    Config,
}

impl Error {
    /// Return the coarse classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IoError(_) | Error::SerializeError(_) => ErrorKind::Io,
            Error::GitDirNotFound(_) | Error::KeyNotFound(_) => ErrorKind::NotFound,
            Error::GitDirNotADirectory(_)
            | Error::CorruptRecord { .. }
            | Error::InvalidRepo { .. } => ErrorKind::Corruption,
            Error::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    /// Return `true` if this error means "nothing there yet".
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// A specialized `Result` type for gitmeta operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use super::{Error, ErrorKind};

    #[test]
    fn io_errors_keep_their_kind() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn not_found_variants() {
        assert!(Error::GitDirNotFound(PathBuf::from("/x")).is_not_found());
        assert!(Error::KeyNotFound("foo".to_owned()).is_not_found());
    }

    #[test]
    fn corruption_variants() {
        let err = Error::GitDirNotADirectory(PathBuf::from("/x/.git"));
        assert_eq!(err.kind(), ErrorKind::Corruption);
        assert_eq!(err.to_string(), "/x/.git exists but is not a directory");

        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = Error::CorruptRecord {
            file: "abc.json".to_owned(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Corruption);
    }

    #[test]
    fn messages_name_the_key() {
        let err = Error::KeyNotFound("foo".to_owned());
        assert_eq!(err.to_string(), "no value stored for key \"foo\"");
    }
}
