use super::entity::DispatchPayload;
use thiserror::Error;

/// Durable storage for serialized snapshots, one per key.
pub trait SnapshotStore {
    async fn load(&self, key: &str) -> Result<Option<String>, SnapshotStoreError>;

    async fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotStoreError>;
}

#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    #[error("IO error on snapshot `{0}`: {1}")]
    Io(String, #[source] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The external automation endpoint. A single attempt per call, no retries.
pub trait DispatchGateway {
    async fn dispatch(&self, payload: &DispatchPayload) -> Result<(), DispatchError>;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Cannot reach the automation webhook at {0}")]
    Unreachable(String),
    #[error("Request to the automation webhook at {0} timed out")]
    TimedOut(String),
    #[error("Automation webhook rejected the request (HTTP {0})")]
    Rejected(u16),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
