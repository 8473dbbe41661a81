use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::layout::RepoLayout;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// The ordered list of paths that go into every snapshot.
///
/// Stored one path per line. Entries are never removed and never
/// deduplicated; tracking a path twice just copies it twice per commit.
/// Nothing under the repository's own state directory can be tracked.
pub struct TrackedIndex {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    work_dir: PathBuf,
    vcs_dir: PathBuf,
}

impl TrackedIndex {
    pub fn new(fs: Arc<dyn FileSystem>, layout: &RepoLayout) -> Self {
        Self {
            fs,
            path: layout.index_path(),
            work_dir: layout.work_dir.clone(),
            vcs_dir: layout.vcs_dir.clone(),
        }
    }

    pub fn track(&self, path: &str) -> Result<()> {
        let relative = validate_tracked_path(path)?;
        let full_path = self.work_dir.join(&relative);

        if without_cur_dir(&full_path).starts_with(without_cur_dir(&self.vcs_dir)) {
            return Err(Error::InvalidPath(format!(
                "{} is inside the repository state directory",
                path
            )));
        }

        if self.fs.is_dir(&full_path) {
            return Err(Error::InvalidPath(format!("{} is a directory", path)));
        }
        if !self.fs.is_file(&full_path) {
            return Err(Error::FileNotFound(relative));
        }

        self.fs.append(&self.path, format!("{}\n", path).as_bytes())?;
        info!("Tracking {}", path);
        Ok(())
    }

    pub fn list_tracked(&self) -> Result<Vec<PathBuf>> {
        let bytes = match self.fs.read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let tracked: Vec<PathBuf> = String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect();

        debug!("Index holds {} entries", tracked.len());
        Ok(tracked)
    }
}

/// Tracked paths are relative and stay inside the working directory, since
/// they are replayed under the snapshot directory and on checkout.
pub(crate) fn validate_tracked_path(path: &str) -> Result<PathBuf> {
    if path.trim().is_empty() || path.contains('\n') || path.contains('\r') {
        return Err(Error::InvalidPath(path.to_string()));
    }

    let candidate = Path::new(path);
    let escapes = candidate.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(Error::InvalidPath(path.to_string()));
    }

    Ok(candidate.to_path_buf())
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
