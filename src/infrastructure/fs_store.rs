// Filesystem-backed archive store
use crate::application::archive_store::ArchiveStore;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Key-addressed files under a root directory. Useful for local runs and
/// tests; satisfies the same contract as the object store.
pub struct FsArchiveStore {
    root: PathBuf,
}

impl FsArchiveStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl ArchiveStore for FsArchiveStore {
    async fn put(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create archive directory {}", parent.display()))?;
        }
        fs::write(&path, body)
            .await
            .with_context(|| format!("write archive object {}", path.display()))
    }

    fn target(&self) -> String {
        format!("file://{}", self.root.display())
    }
}
