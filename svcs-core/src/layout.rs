use std::path::{Path, PathBuf};

pub const DEFAULT_VCS_DIR: &str = "vcs";

const IDENTITY_FILE: &str = "identity";
const INDEX_FILE: &str = "index";
const COMMITS_DIR: &str = "commits";
const LOG_FILE: &str = "log";

/// Where the repository keeps its state and which tree it snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLayout {
    pub vcs_dir: PathBuf,
    pub work_dir: PathBuf,
}

impl RepoLayout {
    pub fn new(vcs_dir: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            vcs_dir: vcs_dir.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Layout with the state directory at `<work_dir>/vcs`.
    pub fn for_work_dir(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            vcs_dir: work_dir.join(DEFAULT_VCS_DIR),
            work_dir,
        }
    }

    pub fn identity_path(&self) -> PathBuf {
        self.vcs_dir.join(IDENTITY_FILE)
    }

    pub fn index_path(&self) -> PathBuf {
        self.vcs_dir.join(INDEX_FILE)
    }

    pub fn commits_dir(&self) -> PathBuf {
        self.vcs_dir.join(COMMITS_DIR)
    }

    pub fn log_path(&self) -> PathBuf {
        self.vcs_dir.join(LOG_FILE)
    }

    pub fn work_path(&self, relative: &Path) -> PathBuf {
        self.work_dir.join(relative)
    }
}
