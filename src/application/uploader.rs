// Archive uploader - stage locally, upload, clear the staging file
use crate::application::archive_store::ArchiveStore;
use crate::domain::reading::{AggregateResult, ArchiveRecord};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Moves aggregate results into durable storage. Each record is written to a
/// local staging file, uploaded under its timestamp-derived key, and the
/// staging file is deleted only after the backend reports success. On failure
/// the file stays in place so a later cycle can retry; the uploader itself
/// never retries.
pub struct ArchiveUploader {
    store: Arc<dyn ArchiveStore>,
    staging_path: PathBuf,
    // The staging file is write-once, read-once, then deleted. The lock keeps
    // that cycle atomic if the transport ever delivers concurrently.
    staging_lock: Mutex<()>,
}

impl ArchiveUploader {
    pub fn new(store: Arc<dyn ArchiveStore>, staging_path: PathBuf) -> Self {
        Self {
            store,
            staging_path,
            staging_lock: Mutex::new(()),
        }
    }

    /// Stage the record, then upload and clean up.
    pub async fn archive(&self, result: &AggregateResult) -> anyhow::Result<()> {
        let record = ArchiveRecord::from(result);
        let _guard = self.staging_lock.lock().await;
        self.stage(&record).await?;
        self.upload_staged(&record).await
    }

    /// Re-attempt a staging file left behind by an earlier failed cycle.
    /// A missing file means the previous run shut down clean; that is not an
    /// error.
    pub async fn recover_staged(&self) -> anyhow::Result<()> {
        let _guard = self.staging_lock.lock().await;
        let body = match fs::read(&self.staging_path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("read staging file {}", self.staging_path.display())
                });
            }
        };
        let record: ArchiveRecord = serde_json::from_slice(&body)
            .with_context(|| format!("decode staging file {}", self.staging_path.display()))?;
        tracing::info!(
            timestamp = record.timestamp,
            "found staged record from a previous cycle, retrying upload"
        );
        self.upload_staged(&record).await
    }

    async fn stage(&self, record: &ArchiveRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.staging_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create staging directory {}", parent.display()))?;
        }
        let body = serde_json::to_vec(record).context("serialize archive record")?;
        fs::write(&self.staging_path, body)
            .await
            .with_context(|| format!("write staging file {}", self.staging_path.display()))
    }

    async fn upload_staged(&self, record: &ArchiveRecord) -> anyhow::Result<()> {
        let key = record.storage_key();
        let body = fs::read(&self.staging_path)
            .await
            .with_context(|| format!("read staging file {}", self.staging_path.display()))?;

        self.store
            .put(&key, body)
            .await
            .with_context(|| format!("upload {key} to {}", self.store.target()))?;

        // Local staging is transient; once archived it must not persist.
        fs::remove_file(&self.staging_path)
            .await
            .with_context(|| format!("remove staging file {}", self.staging_path.display()))?;

        tracing::info!(%key, target = %self.store.target(), "archived aggregate result");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pollutant::Pollutant;
    use crate::infrastructure::fs_store::FsArchiveStore;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct FailingStore;

    #[async_trait]
    impl ArchiveStore for FailingStore {
        async fn put(&self, _key: &str, _body: Vec<u8>) -> anyhow::Result<()> {
            anyhow::bail!("injected backend failure")
        }

        fn target(&self) -> String {
            "test://failing".to_string()
        }
    }

    fn sample_result() -> AggregateResult {
        AggregateResult {
            timestamp: 1000,
            aqi: 217,
            dominant: Pollutant::Co2,
            sub_indices: BTreeMap::from([(Pollutant::Co2, 217)]),
        }
    }

    #[tokio::test]
    async fn test_successful_upload_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("staging/air_quality_data.json");
        let store = Arc::new(FsArchiveStore::new(dir.path().join("archive")));
        let uploader = ArchiveUploader::new(store, staging.clone());

        uploader.archive(&sample_result()).await.unwrap();

        assert!(!staging.exists(), "staging file should be cleared");
        let archived = dir.path().join("archive/air-quality-data/1000.json");
        let body: ArchiveRecord =
            serde_json::from_slice(&std::fs::read(archived).unwrap()).unwrap();
        assert_eq!(
            body,
            ArchiveRecord {
                timestamp: 1000,
                aqi: 217
            }
        );
    }

    #[tokio::test]
    async fn test_failed_upload_preserves_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("air_quality_data.json");
        let uploader = ArchiveUploader::new(Arc::new(FailingStore), staging.clone());

        let err = uploader.archive(&sample_result()).await.unwrap_err();

        assert!(err.to_string().contains("air-quality-data/1000.json"));
        assert!(staging.exists(), "staging file must survive a failed upload");
    }

    #[tokio::test]
    async fn test_recover_retries_an_existing_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("air_quality_data.json");
        let record = ArchiveRecord {
            timestamp: 2000,
            aqi: 58,
        };
        std::fs::write(&staging, serde_json::to_vec(&record).unwrap()).unwrap();

        let store = Arc::new(FsArchiveStore::new(dir.path().join("archive")));
        let uploader = ArchiveUploader::new(store, staging.clone());
        uploader.recover_staged().await.unwrap();

        assert!(!staging.exists());
        assert!(dir.path().join("archive/air-quality-data/2000.json").exists());
    }

    #[tokio::test]
    async fn test_recover_with_no_staging_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FsArchiveStore::new(dir.path().join("archive")));
        let uploader = ArchiveUploader::new(store, dir.path().join("missing.json"));

        uploader.recover_staged().await.unwrap();
    }
}
