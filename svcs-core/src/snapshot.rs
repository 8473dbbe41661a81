//! Full-copy snapshots, one directory per commit.
//!
//! ```text
//! commits/
//!   <commit id>/
//!     <tracked path>   # byte-for-byte copy at commit time
//! ```
//!
//! The store itself has no notion of order. "Latest" always means the head
//! of the [`CommitLog`].
//!
//! The log entry is written after the copy, so a copy that fails partway
//! leaves a snapshot directory with no log entry. Retrying the same commit
//! computes the same id and fails with [`Error::CommitExists`]; the retry
//! needs a different message.

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::hash::{compute_candidate_id, is_lower_hex, CommitId};
use crate::identity::IdentityStore;
use crate::index::TrackedIndex;
use crate::log::CommitLog;
use crate::models::{CommitOutcome, LogEntry};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

const MIN_PREFIX_LEN: usize = 4;

/// Contents of the working copy, keyed by tracked path.
pub type WorkingFiles = BTreeMap<PathBuf, Vec<u8>>;

/// A snapshot directory that is known to exist.
pub struct SnapshotHandle {
    id: CommitId,
    dir: PathBuf,
    files: Vec<PathBuf>,
    fs: Arc<dyn FileSystem>,
}

impl SnapshotHandle {
    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stored paths relative to the snapshot root, sorted.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f == path)
    }

    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.fs.read(&self.dir.join(path)).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })
    }
}

pub struct SnapshotStore {
    fs: Arc<dyn FileSystem>,
    commits_dir: PathBuf,
    work_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(fs: Arc<dyn FileSystem>, commits_dir: PathBuf, work_dir: PathBuf) -> Self {
        Self {
            fs,
            commits_dir,
            work_dir,
        }
    }

    /// Snapshot the tracked files if anything changed since the log head.
    pub fn commit(
        &self,
        index: &TrackedIndex,
        identity: &IdentityStore,
        log: &CommitLog,
        message: &str,
    ) -> Result<CommitOutcome> {
        let tracked = index.list_tracked()?;
        let files = self.read_working_files(&tracked)?;

        let parent = match log.head()? {
            None => {
                debug!("No commits yet, creating the first snapshot");
                None
            }
            Some(head) => {
                let snapshot = self.get_snapshot(head.id.as_str()).map_err(|e| {
                    warn!("Log head {} has no snapshot directory", head.id);
                    e
                })?;
                if !self.has_changes(&snapshot, &files)? {
                    info!("Nothing changed since {}", head.id.short());
                    return Ok(CommitOutcome::NoOp);
                }
                Some(head.id)
            }
        };

        let author = identity.get_identity()?;
        let id = compute_candidate_id(parent.as_ref(), &author, message, &files);
        self.write_snapshot(&id, &files)?;
        log.append(&LogEntry::new(id.clone(), author, message))?;

        info!("Created commit {} with {} file(s)", id.short(), files.len());
        Ok(CommitOutcome::Created(id))
    }

    pub fn get_snapshot(&self, id: &str) -> Result<SnapshotHandle> {
        let id = CommitId::parse(id).map_err(|_| Error::CommitNotFound(id.to_string()))?;
        let dir = self.snapshot_dir(&id);
        if !self.fs.is_dir(&dir) {
            return Err(Error::CommitNotFound(id.to_string()));
        }

        let files = self.fs.walk_files(&dir)?;
        Ok(SnapshotHandle {
            id,
            dir,
            files,
            fs: Arc::clone(&self.fs),
        })
    }

    /// Accepts a full id or an unambiguous prefix of at least four characters.
    pub fn resolve(&self, prefix: &str) -> Result<CommitId> {
        let prefix = prefix.trim();
        if prefix.len() < MIN_PREFIX_LEN || !is_lower_hex(prefix) {
            return Err(Error::CommitNotFound(prefix.to_string()));
        }

        let mut matches = self
            .list_ids()?
            .into_iter()
            .filter(|id| id.as_str().starts_with(prefix));

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(Error::CommitNotFound(prefix.to_string())),
            (Some(_), Some(_)) => Err(Error::AmbiguousCommit(prefix.to_string())),
        }
    }

    /// Every snapshot directory name that is a valid commit id.
    pub fn list_ids(&self) -> Result<Vec<CommitId>> {
        if !self.fs.is_dir(&self.commits_dir) {
            return Ok(Vec::new());
        }

        Ok(self
            .fs
            .list_dir(&self.commits_dir)?
            .iter()
            .filter_map(|name| CommitId::parse(name).ok())
            .collect())
    }

    pub fn exists(&self, id: &CommitId) -> bool {
        self.fs.is_dir(&self.snapshot_dir(id))
    }

    /// Reads every tracked file. Fails on the first one that is gone.
    pub fn read_working_files(&self, tracked: &[PathBuf]) -> Result<WorkingFiles> {
        let mut files = WorkingFiles::new();
        for path in tracked {
            if files.contains_key(path) {
                continue;
            }
            let contents = self
                .read_working_file(path)?
                .ok_or_else(|| Error::MissingFile(path.clone()))?;
            files.insert(path.clone(), contents);
        }
        Ok(files)
    }

    /// `None` when the file is not in the working directory.
    pub fn read_working_file(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match self.fs.read(&self.work_dir.join(path)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn has_changes(&self, snapshot: &SnapshotHandle, files: &WorkingFiles) -> Result<bool> {
        for (path, current) in files {
            match snapshot.read(path) {
                Ok(previous) if previous == *current => continue,
                Ok(_) => {
                    debug!("{} differs from {}", path.display(), snapshot.id().short());
                    return Ok(true);
                }
                Err(Error::FileNotFound(_)) => {
                    debug!("{} is not in {}", path.display(), snapshot.id().short());
                    return Ok(true);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }

    fn write_snapshot(&self, id: &CommitId, files: &WorkingFiles) -> Result<()> {
        let dir = self.snapshot_dir(id);
        if self.fs.exists(&dir) {
            return Err(Error::CommitExists(id.to_string()));
        }

        self.fs.create_dir_all(&dir)?;
        for (path, contents) in files {
            self.fs.write(&dir.join(path), contents)?;
        }
        Ok(())
    }

    fn snapshot_dir(&self, id: &CommitId) -> PathBuf {
        self.commits_dir.join(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::layout::RepoLayout;

    struct Fixture {
        fs: Arc<MemoryFs>,
        index: TrackedIndex,
        identity: IdentityStore,
        log: CommitLog,
        store: SnapshotStore,
    }

    impl Fixture {
        fn new() -> Self {
            let fs = Arc::new(MemoryFs::new());
            let dyn_fs: Arc<dyn FileSystem> = fs.clone();
            let work = PathBuf::from("/work");
            let vcs = work.join("vcs");
            dyn_fs.create_dir_all(&vcs.join("commits")).unwrap();

            Self {
                index: TrackedIndex::new(dyn_fs.clone(), &RepoLayout::new(&vcs, &work)),
                identity: IdentityStore::new(dyn_fs.clone(), vcs.join("identity")),
                log: CommitLog::new(dyn_fs.clone(), vcs.join("log")),
                store: SnapshotStore::new(dyn_fs, vcs.join("commits"), work),
                fs,
            }
        }

        fn write(&self, path: &str, contents: &str) {
            self.fs
                .write(&Path::new("/work").join(path), contents.as_bytes())
                .unwrap();
        }

        fn commit(&self, message: &str) -> Result<CommitOutcome> {
            self.store
                .commit(&self.index, &self.identity, &self.log, message)
        }
    }

    #[test]
    fn test_first_commit_copies_tracked_files() {
        let fx = Fixture::new();
        fx.identity.set_identity("alice").unwrap();
        fx.write("a.txt", "hello");
        fx.write("src/b.rs", "fn b() {}");
        fx.index.track("a.txt").unwrap();
        fx.index.track("src/b.rs").unwrap();

        let id = match fx.commit("init").unwrap() {
            CommitOutcome::Created(id) => id,
            CommitOutcome::NoOp => panic!("first commit must create a snapshot"),
        };

        let snapshot = fx.store.get_snapshot(id.as_str()).unwrap();
        assert_eq!(
            snapshot.files(),
            &[PathBuf::from("a.txt"), PathBuf::from("src/b.rs")]
        );
        assert_eq!(snapshot.read(Path::new("a.txt")).unwrap(), b"hello");

        let head = fx.log.head().unwrap().unwrap();
        assert_eq!(head, LogEntry::new(id, "alice", "init"));
    }

    #[test]
    fn test_unchanged_commit_is_noop() {
        let fx = Fixture::new();
        fx.write("a.txt", "hello");
        fx.index.track("a.txt").unwrap();

        assert!(fx.commit("init").unwrap().created().is_some());
        assert_eq!(fx.commit("again").unwrap(), CommitOutcome::NoOp);
        assert_eq!(fx.log.read_all().unwrap().len(), 1);
        assert_eq!(fx.store.list_ids().unwrap().len(), 1);
    }

    #[test]
    fn test_newly_tracked_file_counts_as_change() {
        let fx = Fixture::new();
        fx.write("a.txt", "hello");
        fx.write("b.txt", "bee");
        fx.index.track("a.txt").unwrap();
        fx.commit("init").unwrap();

        fx.index.track("b.txt").unwrap();
        let outcome = fx.commit("add b").unwrap();

        let id = outcome.created().expect("new tracked file should commit");
        let snapshot = fx.store.get_snapshot(id.as_str()).unwrap();
        assert!(snapshot.contains(Path::new("b.txt")));
    }

    #[test]
    fn test_missing_tracked_file_fails_without_writes() {
        let fx = Fixture::new();
        fx.write("a.txt", "hello");
        fx.index.track("a.txt").unwrap();
        // gone.txt was tracked and later deleted by hand
        fx.fs
            .append(Path::new("/work/vcs/index"), b"gone.txt\n")
            .unwrap();

        let err = fx.commit("init").unwrap_err();
        assert!(matches!(err, Error::MissingFile(ref p) if p == Path::new("gone.txt")));
        assert!(fx.log.read_all().unwrap().is_empty());
        assert!(fx.store.list_ids().unwrap().is_empty());
    }

    #[test]
    fn test_reverting_content_gets_a_fresh_id() {
        let fx = Fixture::new();
        fx.write("a.txt", "one");
        fx.index.track("a.txt").unwrap();
        let first = fx.commit("msg").unwrap();

        fx.write("a.txt", "two");
        let second = fx.commit("msg").unwrap();

        fx.write("a.txt", "one");
        let third = fx.commit("msg").unwrap();

        let ids: Vec<_> = [first, second, third]
            .iter()
            .map(|o| o.created().cloned().unwrap())
            .collect();
        assert_ne!(ids[0], ids[2]);
        assert_eq!(fx.store.list_ids().unwrap().len(), 3);
    }

    #[test]
    fn test_get_snapshot_not_found() {
        let fx = Fixture::new();
        assert!(matches!(
            fx.store.get_snapshot(&"a".repeat(64)),
            Err(Error::CommitNotFound(_))
        ));
        assert!(matches!(
            fx.store.get_snapshot("../../etc"),
            Err(Error::CommitNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_prefix() {
        let fx = Fixture::new();
        let a = format!("abcd{}", "0".repeat(60));
        let b = format!("abce{}", "0".repeat(60));
        fx.fs.create_dir_all(&Path::new("/work/vcs/commits").join(&a)).unwrap();
        fx.fs.create_dir_all(&Path::new("/work/vcs/commits").join(&b)).unwrap();

        assert_eq!(fx.store.resolve("abcd").unwrap().as_str(), a);
        assert_eq!(fx.store.resolve(&b).unwrap().as_str(), b);
        assert!(matches!(fx.store.resolve("abc0"), Err(Error::CommitNotFound(_))));
        assert!(matches!(
            fx.store.resolve("abc"),
            Err(ref e) if e.is_not_found()
        ));
        let c = format!("abcd{}", "1".repeat(60));
        fx.fs
            .create_dir_all(&Path::new("/work/vcs/commits").join(c))
            .unwrap();
        assert!(matches!(fx.store.resolve("abcd"), Err(Error::AmbiguousCommit(_))));
    }

    #[test]
    fn test_retry_after_partial_snapshot() {
        let fx = Fixture::new();
        fx.write("a.txt", "hello");
        fx.index.track("a.txt").unwrap();

        let mut files = WorkingFiles::new();
        files.insert(PathBuf::from("a.txt"), b"hello".to_vec());
        let leftover = compute_candidate_id(None, "", "init", &files);
        fx.fs
            .write(&Path::new("/work/vcs/commits").join(leftover.as_str()).join("a.txt"), b"hel")
            .unwrap();

        let err = fx.commit("init").unwrap_err();
        assert!(matches!(err, Error::CommitExists(ref id) if *id == leftover.to_string()));
        assert!(err.to_string().contains("retry with a different message"));
        assert!(fx.log.read_all().unwrap().is_empty());

        let id = fx.commit("init, second try").unwrap().created().cloned().unwrap();
        assert_eq!(fx.log.head().unwrap().unwrap().id, id);
        assert_eq!(
            fx.store.get_snapshot(id.as_str()).unwrap().read(Path::new("a.txt")).unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_log_head_without_snapshot_is_an_error() {
        let fx = Fixture::new();
        fx.write("a.txt", "hello");
        fx.index.track("a.txt").unwrap();
        fx.log
            .append(&LogEntry::new(
                CommitId::parse(&"f".repeat(64)).unwrap(),
                "ghost",
                "lost",
            ))
            .unwrap();

        assert!(matches!(fx.commit("next"), Err(Error::CommitNotFound(_))));
    }
}
