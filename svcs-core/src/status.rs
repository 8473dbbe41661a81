//! Read-only comparison of the working copy against the latest snapshot.

use crate::diff::FileDiff;
use crate::error::Result;
use crate::index::TrackedIndex;
use crate::log::CommitLog;
use crate::models::{FileState, FileStatus};
use crate::snapshot::{SnapshotHandle, SnapshotStore};
use std::collections::HashSet;
use std::path::PathBuf;

struct WorkingChange {
    path: PathBuf,
    state: FileState,
    previous: Option<Vec<u8>>,
    current: Option<Vec<u8>>,
}

fn working_changes(
    snapshots: &SnapshotStore,
    index: &TrackedIndex,
    log: &CommitLog,
) -> Result<Vec<WorkingChange>> {
    let head: Option<SnapshotHandle> = match log.head()? {
        Some(entry) => Some(snapshots.get_snapshot(entry.id.as_str())?),
        None => None,
    };

    let mut seen = HashSet::new();
    let mut changes = Vec::new();

    for path in index.list_tracked()? {
        if !seen.insert(path.clone()) {
            continue;
        }

        let current = snapshots.read_working_file(&path)?;
        let previous = match &head {
            Some(snapshot) if snapshot.contains(&path) => Some(snapshot.read(&path)?),
            _ => None,
        };

        let state = match (&previous, &current) {
            (_, None) => FileState::Missing,
            (None, Some(_)) => FileState::New,
            (Some(old), Some(new)) if old == new => FileState::Unchanged,
            (Some(_), Some(_)) => FileState::Modified,
        };

        changes.push(WorkingChange {
            path,
            state,
            previous,
            current,
        });
    }

    Ok(changes)
}

/// One entry per distinct tracked path, in index order.
pub fn status(
    snapshots: &SnapshotStore,
    index: &TrackedIndex,
    log: &CommitLog,
) -> Result<Vec<FileStatus>> {
    Ok(working_changes(snapshots, index, log)?
        .into_iter()
        .map(|change| FileStatus {
            path: change.path,
            state: change.state,
        })
        .collect())
}

/// Diffs for files that are new or modified. Missing files are reported by
/// [`status`] only.
pub fn diff(snapshots: &SnapshotStore, index: &TrackedIndex, log: &CommitLog) -> Result<Vec<FileDiff>> {
    Ok(working_changes(snapshots, index, log)?
        .into_iter()
        .filter(|change| matches!(change.state, FileState::Modified | FileState::New))
        .map(|change| {
            FileDiff::between(
                change.path.to_string_lossy(),
                change.previous.as_deref(),
                change.current.as_deref(),
            )
        })
        .collect())
}
