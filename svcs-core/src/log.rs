//! The commit log: the only record of commit order.
//!
//! Newest entries come first. Each entry is
//!
//! ```text
//! commit <id>
//! Author: <author>
//! <message>
//!
//! ```
//!
//! A message may span several lines. It ends at a blank line that is followed
//! by the next `commit <id>` and `Author: ` header lines or by the end of the
//! file, so message text that merely starts with `commit ` stays in place.

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::hash::CommitId;
use crate::models::LogEntry;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const COMMIT_PREFIX: &str = "commit ";
const AUTHOR_PREFIX: &str = "Author: ";

pub struct CommitLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl CommitLog {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    /// Prepend `entry`, keeping every earlier entry below it.
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        let previous = self.read_raw()?;
        let mut contents = entry.format().into_bytes();
        contents.extend_from_slice(&previous);
        self.fs.write(&self.path, &contents)?;
        debug!("Log now starts with commit {}", entry.id);
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<LogEntry>> {
        let raw = self.read_raw()?;
        parse_log(&String::from_utf8_lossy(&raw))
    }

    pub fn head(&self) -> Result<Option<LogEntry>> {
        Ok(self.read_all()?.into_iter().next())
    }

    fn read_raw(&self) -> Result<Vec<u8>> {
        match self.fs.read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> Error {
    Error::MalformedLog {
        line,
        reason: reason.into(),
    }
}

pub(crate) fn parse_log(text: &str) -> Result<Vec<LogEntry>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let id_line = lines[i];
        let id = id_line
            .strip_prefix(COMMIT_PREFIX)
            .ok_or_else(|| malformed(i + 1, "expected a commit line"))?;
        let id = CommitId::parse(id.trim()).map_err(|_| malformed(i + 1, "invalid commit id"))?;
        i += 1;

        let author = lines
            .get(i)
            .and_then(|line| line.strip_prefix(AUTHOR_PREFIX))
            .ok_or_else(|| malformed(i + 1, "expected an Author line"))?;
        i += 1;

        let mut message = Vec::new();
        loop {
            match lines.get(i) {
                None => break,
                Some(line) if line.is_empty() && ends_entry(&lines, i + 1) => {
                    i += 1;
                    break;
                }
                Some(line) => {
                    message.push(*line);
                    i += 1;
                }
            }
        }

        entries.push(LogEntry::new(id, author, message.join("\n")));
    }

    Ok(entries)
}

/// A blank line closes the message only at end of file or right before a
/// well-formed `commit <id>` / `Author: ` header pair.
fn ends_entry(lines: &[&str], next: usize) -> bool {
    let Some(line) = lines.get(next) else {
        return true;
    };

    let valid_id = line
        .strip_prefix(COMMIT_PREFIX)
        .map_or(false, |id| CommitId::parse(id.trim()).is_ok());
    let has_author = lines
        .get(next + 1)
        .map_or(false, |line| line.starts_with(AUTHOR_PREFIX));

    valid_id && has_author
}
