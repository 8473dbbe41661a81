use crate::checkout::CheckoutEngine;
use crate::diff::FileDiff;
use crate::error::Result;
use crate::fs::{DiskFs, FileSystem, MemoryFs};
use crate::identity::IdentityStore;
use crate::index::TrackedIndex;
use crate::layout::RepoLayout;
use crate::log::CommitLog;
use crate::models::{CommitOutcome, FileStatus, LogEntry};
use crate::snapshot::{SnapshotHandle, SnapshotStore};
use crate::status;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// All repository state for one working directory.
///
/// Nothing is cached between calls: every operation reads what it needs
/// from the file system.
pub struct Repository {
    layout: RepoLayout,
    fs: Arc<dyn FileSystem>,
    identity: IdentityStore,
    index: TrackedIndex,
    log: CommitLog,
    snapshots: SnapshotStore,
    checkout: CheckoutEngine,
}

impl Repository {
    pub fn new(layout: RepoLayout) -> Result<Self> {
        Self::with_fs(layout, Arc::new(DiskFs))
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_fs(RepoLayout::for_work_dir("/work"), Arc::new(MemoryFs::new()))
    }

    pub fn with_fs(layout: RepoLayout, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let repo = Self {
            identity: IdentityStore::new(Arc::clone(&fs), layout.identity_path()),
            index: TrackedIndex::new(Arc::clone(&fs), &layout),
            log: CommitLog::new(Arc::clone(&fs), layout.log_path()),
            snapshots: SnapshotStore::new(
                Arc::clone(&fs),
                layout.commits_dir(),
                layout.work_dir.clone(),
            ),
            checkout: CheckoutEngine::new(Arc::clone(&fs), layout.work_dir.clone()),
            fs,
            layout,
        };
        repo.initialize()?;
        Ok(repo)
    }

    /// Creates the state directory and its files when they are missing.
    fn initialize(&self) -> Result<()> {
        self.fs.create_dir_all(&self.layout.vcs_dir)?;
        self.fs.create_dir_all(&self.layout.commits_dir())?;

        for path in [
            self.layout.identity_path(),
            self.layout.index_path(),
            self.layout.log_path(),
        ] {
            if !self.fs.exists(&path) {
                self.fs.write(&path, b"")?;
            }
        }

        debug!("Repository ready at {}", self.layout.vcs_dir.display());
        Ok(())
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    // Identity
    pub fn set_identity(&self, name: &str) -> Result<()> {
        self.identity.set_identity(name)
    }

    pub fn get_identity(&self) -> Result<String> {
        self.identity.get_identity()
    }

    // Index
    pub fn track(&self, path: &str) -> Result<()> {
        self.index.track(path)
    }

    pub fn list_tracked(&self) -> Result<Vec<PathBuf>> {
        self.index.list_tracked()
    }

    // Commits
    pub fn commit(&self, message: &str) -> Result<CommitOutcome> {
        self.snapshots
            .commit(&self.index, &self.identity, &self.log, message)
    }

    pub fn log(&self) -> Result<Vec<LogEntry>> {
        self.log.read_all()
    }

    pub fn get_snapshot(&self, id: &str) -> Result<SnapshotHandle> {
        let id = self.snapshots.resolve(id)?;
        self.snapshots.get_snapshot(id.as_str())
    }

    pub fn checkout(&self, id: &str) -> Result<Vec<PathBuf>> {
        self.checkout.checkout(&self.snapshots, id)
    }

    // Working copy
    pub fn status(&self) -> Result<Vec<FileStatus>> {
        status::status(&self.snapshots, &self.index, &self.log)
    }

    pub fn diff(&self) -> Result<Vec<FileDiff>> {
        status::diff(&self.snapshots, &self.index, &self.log)
    }
}
