use crate::hash::CommitId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: CommitId,
    pub author: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(id: CommitId, author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            message: message.into(),
        }
    }

    /// The on-disk form, including the trailing blank line.
    pub fn format(&self) -> String {
        format!(
            "commit {}\nAuthor: {}\n{}\n\n",
            self.id, self.author, self.message
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(CommitId),
    /// Nothing tracked changed since the last snapshot.
    NoOp,
}

impl CommitOutcome {
    pub fn created(&self) -> Option<&CommitId> {
        match self {
            CommitOutcome::Created(id) => Some(id),
            CommitOutcome::NoOp => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileState {
    Unchanged,
    Modified,
    /// Not part of the latest snapshot yet.
    New,
    /// Tracked but gone from the working directory.
    Missing,
}

impl FileState {
    pub fn as_str(&self) -> &str {
        match self {
            FileState::Unchanged => "unchanged",
            FileState::Modified => "modified",
            FileState::New => "new",
            FileState::Missing => "missing",
        }
    }

    pub fn is_dirty(&self) -> bool {
        !matches!(self, FileState::Unchanged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStatus {
    pub path: PathBuf,
    pub state: FileState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_format() {
        let id = CommitId::parse(&"ab".repeat(32)).unwrap();
        let entry = LogEntry::new(id.clone(), "alice", "init");

        assert_eq!(
            entry.format(),
            format!("commit {}\nAuthor: alice\ninit\n\n", id)
        );
    }

    #[test]
    fn test_commit_outcome_created() {
        let id = CommitId::parse(&"0".repeat(64)).unwrap();

        assert_eq!(CommitOutcome::Created(id.clone()).created(), Some(&id));
        assert_eq!(CommitOutcome::NoOp.created(), None);
    }

    #[test]
    fn test_file_state_dirty() {
        assert!(!FileState::Unchanged.is_dirty());
        assert!(FileState::Modified.is_dirty());
        assert!(FileState::New.is_dirty());
        assert!(FileState::Missing.is_dirty());
        assert_eq!(FileState::New.as_str(), "new");
    }
}
