use crate::error::Result;
use crate::fs::FileSystem;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// The committer name, kept verbatim in a single file.
pub struct IdentityStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn set_identity(&self, name: &str) -> Result<()> {
        debug!("Setting identity to {:?}", name);
        self.fs.write(&self.path, name.as_bytes())?;
        Ok(())
    }

    /// Empty string when no identity has been set.
    pub fn get_identity(&self) -> Result<String> {
        match self.fs.read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}
