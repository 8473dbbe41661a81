use crate::error::Result;
use crate::fs::FileSystem;
use crate::snapshot::SnapshotStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Copies a snapshot back over the working directory.
///
/// Every stored file is overwritten or created. Files the snapshot does not
/// hold are left alone.
pub struct CheckoutEngine {
    fs: Arc<dyn FileSystem>,
    work_dir: PathBuf,
}

impl CheckoutEngine {
    pub fn new(fs: Arc<dyn FileSystem>, work_dir: PathBuf) -> Self {
        Self { fs, work_dir }
    }

    /// Returns the restored paths, relative to the working directory.
    pub fn checkout(&self, snapshots: &SnapshotStore, id: &str) -> Result<Vec<PathBuf>> {
        let id = snapshots.resolve(id)?;
        let snapshot = snapshots.get_snapshot(id.as_str())?;

        // Read everything before touching the working directory.
        let mut contents = Vec::with_capacity(snapshot.files().len());
        for path in snapshot.files() {
            contents.push((path.clone(), snapshot.read(path)?));
        }

        for (path, bytes) in &contents {
            debug!("Restoring {}", path.display());
            self.fs.write(&self.work_dir.join(path), bytes)?;
        }

        info!("Checked out {} ({} file(s))", id.short(), contents.len());
        Ok(contents.into_iter().map(|(path, _)| path).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fs::MemoryFs;
    use crate::hash::CommitId;
    use std::path::Path;

    fn setup() -> (Arc<MemoryFs>, SnapshotStore, CheckoutEngine) {
        let fs = Arc::new(MemoryFs::new());
        fs.create_dir_all(Path::new("/work/vcs/commits")).unwrap();
        let store = SnapshotStore::new(
            fs.clone(),
            PathBuf::from("/work/vcs/commits"),
            PathBuf::from("/work"),
        );
        let engine = CheckoutEngine::new(fs.clone(), PathBuf::from("/work"));
        (fs, store, engine)
    }

    #[test]
    fn test_checkout_overwrites_and_creates() {
        let (fs, store, engine) = setup();
        let id = CommitId::parse(&"c".repeat(64)).unwrap();
        let dir = Path::new("/work/vcs/commits").join(id.as_str());
        fs.write(&dir.join("a.txt"), b"old a").unwrap();
        fs.write(&dir.join("docs/b.md"), b"old b").unwrap();

        fs.write(Path::new("/work/a.txt"), b"new a").unwrap();
        fs.write(Path::new("/work/untracked.txt"), b"keep me").unwrap();

        let restored = engine.checkout(&store, id.as_str()).unwrap();

        assert_eq!(
            restored,
            vec![PathBuf::from("a.txt"), PathBuf::from("docs/b.md")]
        );
        assert_eq!(fs.read(Path::new("/work/a.txt")).unwrap(), b"old a");
        assert_eq!(fs.read(Path::new("/work/docs/b.md")).unwrap(), b"old b");
        assert_eq!(fs.read(Path::new("/work/untracked.txt")).unwrap(), b"keep me");
    }

    #[test]
    fn test_checkout_unknown_id_writes_nothing() {
        let (fs, store, engine) = setup();
        fs.write(Path::new("/work/a.txt"), b"current").unwrap();

        let err = engine.checkout(&store, &"d".repeat(64)).unwrap_err();

        assert!(matches!(err, Error::CommitNotFound(_)));
        assert_eq!(fs.read(Path::new("/work/a.txt")).unwrap(), b"current");
    }

    #[test]
    fn test_checkout_by_prefix() {
        let (fs, store, engine) = setup();
        let id = CommitId::parse(&"e".repeat(64)).unwrap();
        fs.write(
            &Path::new("/work/vcs/commits").join(id.as_str()).join("a.txt"),
            b"from snapshot",
        )
        .unwrap();

        engine.checkout(&store, "eeeeeee").unwrap();
        assert_eq!(fs.read(Path::new("/work/a.txt")).unwrap(), b"from snapshot");
    }
}
