//! Commit identifiers.
//!
//! An id is the SHA-256 of what the commit contains: its parent, author,
//! message and every tracked file. Every field is length-prefixed before it is
//! fed to the hasher, so two different inputs never share a byte stream.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

const ID_LEN: usize = 64;
const SHORT_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != ID_LEN || !is_lower_hex(s) {
            return Err(Error::InvalidCommitId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short(&self) -> &str {
        &self.0[..SHORT_LEN]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Derive the id a commit would get. `files` is keyed by tracked path, so
/// duplicate index entries collapse and ordering is stable.
pub fn compute_candidate_id(
    parent: Option<&CommitId>,
    author: &str,
    message: &str,
    files: &BTreeMap<PathBuf, Vec<u8>>,
) -> CommitId {
    let mut hasher = Sha256::new();

    match parent {
        Some(parent) => {
            hasher.update([1u8]);
            update_field(&mut hasher, parent.as_str().as_bytes());
        }
        None => hasher.update([0u8]),
    }
    update_field(&mut hasher, author.as_bytes());
    update_field(&mut hasher, message.as_bytes());

    hasher.update((files.len() as u64).to_le_bytes());
    for (path, contents) in files {
        update_field(&mut hasher, path.to_string_lossy().as_bytes());
        update_field(&mut hasher, contents);
    }

    CommitId(hex::encode(hasher.finalize()))
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(entries: &[(&str, &str)]) -> BTreeMap<PathBuf, Vec<u8>> {
        entries
            .iter()
            .map(|(p, c)| (PathBuf::from(p), c.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn test_id_is_stable_hex() {
        let f = files(&[("a.txt", "hello")]);
        let a = compute_candidate_id(None, "alice", "init", &f);
        let b = compute_candidate_id(None, "alice", "init", &f);

        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(CommitId::parse(a.as_str()).is_ok());
        assert_eq!(a.short().len(), 7);
    }

    #[test]
    fn test_id_depends_on_every_input() {
        let f = files(&[("a.txt", "hello")]);
        let base = compute_candidate_id(None, "alice", "init", &f);

        assert_ne!(base, compute_candidate_id(None, "bob", "init", &f));
        assert_ne!(base, compute_candidate_id(None, "alice", "other", &f));
        assert_ne!(
            base,
            compute_candidate_id(None, "alice", "init", &files(&[("a.txt", "world")]))
        );
        assert_ne!(
            base,
            compute_candidate_id(None, "alice", "init", &files(&[("b.txt", "hello")]))
        );
        assert_ne!(base, compute_candidate_id(Some(&base), "alice", "init", &f));
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        let f = files(&[]);
        let a = compute_candidate_id(None, "ab", "c", &f);
        let b = compute_candidate_id(None, "a", "bc", &f);
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_rejects_bad_ids() {
        assert!(CommitId::parse("abc").is_err());
        assert!(CommitId::parse(&"G".repeat(64)).is_err());
        assert!(CommitId::parse(&"A".repeat(64)).is_err());
        assert!(CommitId::parse(&"a".repeat(64)).is_ok());
    }
}
