// S3-backed archive store
use crate::application::archive_store::ArchiveStore;
use anyhow::Context;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};

pub struct S3ArchiveStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ArchiveStore {
    /// Build a client from the default credential chain and the configured
    /// region.
    pub async fn connect(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
        }
    }
}

#[async_trait]
impl ArchiveStore for S3ArchiveStore {
    async fn put(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body.into())
            .send()
            .await
            .with_context(|| format!("s3 put_object {}/{key}", self.bucket))?;
        Ok(())
    }

    fn target(&self) -> String {
        format!("s3://{}", self.bucket)
    }
}
