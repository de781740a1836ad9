// Object-storage seam for archive uploads
use async_trait::async_trait;

/// Durable backend for archive records. The pipeline only needs "upload
/// bytes under a key"; any object store (or a local directory) satisfies
/// the contract, and tests substitute in-memory fakes.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Upload `body` under `key`, overwriting any existing object.
    async fn put(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()>;

    /// Backend description for log context, e.g. `s3://fog-node-data`.
    fn target(&self) -> String;
}
