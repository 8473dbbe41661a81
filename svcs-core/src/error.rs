use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a repository operation can report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Commit id prefix is ambiguous: {0}")]
    AmbiguousCommit(String),

    #[error("Tracked file is missing from the working directory: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid commit id: {0}")]
    InvalidCommitId(String),

    /// The candidate id already names a snapshot directory, usually left by
    /// an earlier commit that failed partway.
    #[error(
        "Snapshot already exists: {0} (an earlier commit may have failed partway; \
         retry with a different message)"
    )]
    CommitExists(String),

    #[error("Malformed commit log at line {line}: {reason}")]
    MalformedLog { line: usize, reason: String },
}

impl Error {
    /// True for every "the thing you named does not exist" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound(_) | Error::CommitNotFound(_))
    }
}
