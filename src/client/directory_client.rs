//! The client interface for the remote directory API.

use async_trait::async_trait;

use crate::record::{ChildrenPage, RecordDetails, RecordId};

// =============================================================================
// Error Types
// =============================================================================

/// Error type for directory client operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The requested record does not exist remotely.
    #[error("not found")]
    NotFound,

    /// Network or protocol failure, including undecodable responses.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for directory client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

// =============================================================================
// Page Cursor
// =============================================================================

/// Where a children page should start.
///
/// The remote `batchStartRecordId` parameter is inclusive: the page starts
/// *at* the named record, not after it. Callers that want strictly-after
/// semantics skip the leading echo themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStart {
    /// Start from the first child of the parent.
    Beginning,
    /// Start at the named record (inclusive).
    At(RecordId),
}

// =============================================================================
// DirectoryClient Trait
// =============================================================================

/// The navigation primitives the remote catalogue offers.
///
/// All operations are asynchronous, one network call each. No retries are
/// performed here; retry policy belongs to a wrapping client.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Retrieve a record's details, enough to know its parent.
    ///
    /// Returns `ClientError::NotFound` if the record does not exist.
    async fn fetch_details(&self, id: &RecordId) -> Result<RecordDetails>;

    /// Retrieve one page of a record's children, capped at `limit` records.
    async fn fetch_children(
        &self,
        parent: &RecordId,
        start: PageStart,
        limit: u32,
    ) -> Result<ChildrenPage>;
}
