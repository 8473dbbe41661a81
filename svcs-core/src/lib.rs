//! # svcs-core
//!
//! Core library for svcs - a minimal snapshot version control system.
//!
//! Tracked files are copied in full into one directory per commit, and a
//! newest-first text log records who committed what. Checking out a commit
//! copies its files back over the working directory.

pub mod checkout;
pub mod diff;
pub mod error;
pub mod fs;
pub mod hash;
pub mod identity;
pub mod index;
pub mod layout;
pub mod log;
pub mod models;
pub mod repository;
pub mod snapshot;
pub mod status;

pub use error::{Error, Result};
pub use hash::CommitId;
pub use layout::RepoLayout;
pub use models::{CommitOutcome, FileState, FileStatus, LogEntry};
pub use repository::Repository;
