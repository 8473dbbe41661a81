pub mod add;
pub mod checkout;
pub mod commit;
pub mod config;
pub mod diff;
pub mod log;
pub mod status;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use svcs_core::{RepoLayout, Repository};

/// Relative directories are resolved against `cwd`.
pub fn resolve_layout(cwd: &Path, vcs_dir: Option<PathBuf>, work_dir: PathBuf) -> RepoLayout {
    let work_dir = cwd.join(work_dir);
    match vcs_dir {
        Some(vcs_dir) => RepoLayout::new(cwd.join(vcs_dir), work_dir),
        None => RepoLayout::for_work_dir(work_dir),
    }
}

/// Opens the repository, creating its state directory on first use.
pub fn open_repository(vcs_dir: Option<PathBuf>, work_dir: PathBuf) -> Result<Repository> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let layout = resolve_layout(&cwd, vcs_dir, work_dir);
    Repository::new(layout.clone())
        .with_context(|| format!("Failed to open repository at {}", layout.vcs_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_vcs_dir_lives_in_work_dir() {
        let layout = resolve_layout(Path::new("/home"), None, PathBuf::from("project"));
        assert_eq!(layout.vcs_dir, PathBuf::from("/home/project/vcs"));
        assert_eq!(layout.work_dir, PathBuf::from("/home/project"));
    }

    #[test]
    fn test_custom_vcs_dir() {
        let layout = resolve_layout(
            Path::new("/home"),
            Some(PathBuf::from("/state")),
            PathBuf::from("."),
        );
        assert_eq!(layout.vcs_dir, PathBuf::from("/state"));
    }

    #[test]
    fn test_relative_vcs_dir_is_anchored_to_cwd() {
        let layout = resolve_layout(
            Path::new("/home"),
            Some(PathBuf::from("state")),
            PathBuf::from("/srv/work"),
        );
        assert_eq!(layout.vcs_dir, PathBuf::from("/home/state"));
        assert_eq!(layout.work_dir, PathBuf::from("/srv/work"));
    }

    #[test]
    fn test_add_refuses_state_files() {
        let temp_dir = TempDir::new().unwrap();
        let repo = open_repository(None, temp_dir.path().to_path_buf()).unwrap();

        assert!(matches!(
            repo.track("vcs/log"),
            Err(svcs_core::Error::InvalidPath(_))
        ));
    }

    #[test]
    fn test_open_repository_bootstraps() {
        let temp_dir = TempDir::new().unwrap();
        open_repository(None, temp_dir.path().to_path_buf()).unwrap();

        let vcs = temp_dir.path().join("vcs");
        assert!(vcs.join("commits").is_dir());
        assert!(vcs.join("identity").is_file());
        assert!(vcs.join("index").is_file());
        assert!(vcs.join("log").is_file());
    }
}
