// Message dispatcher - per-message decode, aggregate, archive
use crate::application::aggregator::{AggregateError, ReadingAggregator};
use crate::application::uploader::ArchiveUploader;
use crate::domain::reading::{AggregateResult, SensorReading};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("archive failed: {0:#}")]
    Archive(anyhow::Error),
}

/// Entry point for inbound transport messages. Every failure mode is a
/// `Result` variant handled right here; nothing a message contains can
/// terminate the subscriber loop.
pub struct MessageDispatcher {
    aggregator: ReadingAggregator,
    uploader: ArchiveUploader,
}

impl MessageDispatcher {
    pub fn new(aggregator: ReadingAggregator, uploader: ArchiveUploader) -> Self {
        Self {
            aggregator,
            uploader,
        }
    }

    /// Handle one inbound message, logging and dropping it on any failure.
    /// Messages are independent: no state crosses between calls beyond the
    /// uploader's staging file.
    pub async fn handle_message(&self, payload: &[u8]) {
        match self.process(payload).await {
            Ok(result) => {
                tracing::info!(
                    timestamp = result.timestamp,
                    aqi = result.aqi,
                    dominant = %result.dominant,
                    "reading archived"
                );
            }
            Err(DispatchError::Decode(e)) => {
                tracing::error!("dropping message, failed to decode payload: {e}");
            }
            Err(DispatchError::Aggregate(e)) => {
                tracing::error!("dropping message, aggregation failed: {e}");
            }
            Err(DispatchError::Archive(e)) => {
                // Staging file is intact; a later cycle can retry the upload.
                tracing::error!("upload failed, staging file kept for retry: {e:#}");
            }
        }
    }

    async fn process(&self, payload: &[u8]) -> Result<AggregateResult, DispatchError> {
        let reading: SensorReading = serde_json::from_slice(payload)?;
        tracing::debug!(
            timestamp = reading.timestamp,
            pollutants = reading.measurements.len(),
            "received reading"
        );
        let result = self.aggregator.aggregate(&reading)?;
        self.uploader
            .archive(&result)
            .await
            .map_err(DispatchError::Archive)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::archive_store::ArchiveStore;
    use crate::domain::breakpoints::BreakpointTable;
    use crate::domain::pollutant::Pollutant;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryStore {
        objects: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl ArchiveStore for MemoryStore {
        async fn put(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
            self.objects.lock().unwrap().insert(key.to_string(), body);
            Ok(())
        }

        fn target(&self) -> String {
            "test://memory".to_string()
        }
    }

    fn dispatcher(store: Arc<MemoryStore>, staging: std::path::PathBuf) -> MessageDispatcher {
        MessageDispatcher::new(
            ReadingAggregator::new(BreakpointTable::national()),
            ArchiveUploader::new(store, staging),
        )
    }

    #[tokio::test]
    async fn test_valid_message_is_archived_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("air_quality_data.json");
        let store = Arc::new(MemoryStore::default());
        let dispatcher = dispatcher(store.clone(), staging.clone());

        let result = dispatcher
            .process(br#"{"timestamp": 1000, "pm2.5": 35.0, "co2": 2500.0}"#)
            .await
            .unwrap();

        assert_eq!(result.aqi, 217);
        assert_eq!(result.dominant, Pollutant::Co2);
        let objects = store.objects.lock().unwrap();
        assert!(objects.contains_key("air-quality-data/1000.json"));
        assert!(!staging.exists(), "staging file cleared after upload");
    }

    #[tokio::test]
    async fn test_malformed_payload_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::default());
        let dispatcher = dispatcher(store.clone(), dir.path().join("staging.json"));

        let err = dispatcher.process(b"not json at all").await.unwrap_err();
        assert!(matches!(err, DispatchError::Decode(_)));

        // The public entry point swallows the failure entirely.
        dispatcher.handle_message(b"not json at all").await;
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_reading_makes_no_upload_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::default());
        let staging = dir.path().join("staging.json");
        let dispatcher = dispatcher(store.clone(), staging.clone());

        let err = dispatcher.process(br#"{"timestamp": 1000}"#).await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Aggregate(AggregateError::EmptyReading)
        ));
        assert!(store.objects.lock().unwrap().is_empty());
        assert!(!staging.exists(), "nothing should be staged");
    }

    #[tokio::test]
    async fn test_unknown_pollutant_is_dropped_with_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::default());
        let dispatcher = dispatcher(store.clone(), dir.path().join("staging.json"));

        let err = dispatcher
            .process(br#"{"timestamp": 1000, "pm10": 80.0}"#)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Aggregate(AggregateError::UnknownPollutant(ref key)) if key == "pm10"
        ));
        assert!(store.objects.lock().unwrap().is_empty());
    }
}
