//! The range traversal state machine.
//!
//! Walks the sibling chain from a start record to an end record using only the
//! two navigation primitives the remote API offers: "get details" (to find a
//! parent) and "get a children page". The walk descends forward under one
//! parent at a time; when a parent's children run out before the end record
//! is found, it ascends one level to locate the next sibling parent and
//! resumes under it.
//!
//! The traversal is inherently sequential: every page fetch depends on the
//! cursor produced by the previous one. Dropping the returned future between
//! fetches cancels the walk promptly; no state outlives one invocation.

use super::leaf_expander::{expand_container, leaf_from_child};
use super::sink::ResultSink;
use crate::client::{ClientError, DirectoryClient, PageStart};
use crate::record::{LeafRecord, RecordId};

// =============================================================================
// Constants
// =============================================================================

/// Page size for forward walking and container expansion.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Page size for the ascend probe: the exhausted parent itself (the inclusive
/// cursor echoes it back) plus the sibling that follows it.
const SIBLING_PROBE_LIMIT: u32 = 2;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that abort a traversal.
///
/// All of these are fatal for the whole walk; there is no partial-result
/// return. A truncated citation range is worse than no answer.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A record id does not exist remotely.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Network or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// A record lacks a field the walk needs. Skipping it would silently
    /// drop data from the range.
    #[error("malformed record {id}: missing {field}")]
    MalformedRecord { id: RecordId, field: &'static str },

    /// The ascend recovery found no next sibling parent: the requested range
    /// is not a contiguous sibling-chain range.
    #[error("target unreachable: no sibling parent after {0}")]
    UnreachableTarget(RecordId),

    /// The remote reported more children but returned none.
    #[error("pagination stalled under {0}")]
    PaginationStalled(RecordId),
}

impl WalkError {
    /// Attach the id a client call was about when converting its error.
    pub(crate) fn from_client(e: ClientError, id: &RecordId) -> Self {
        match e {
            ClientError::NotFound => WalkError::NotFound(id.clone()),
            ClientError::Transport(msg) => WalkError::Transport(msg),
        }
    }
}

/// Result type for traversal operations.
pub type Result<T> = std::result::Result<T, WalkError>;

// =============================================================================
// Request and State
// =============================================================================

/// One range traversal request.
#[derive(Debug, Clone)]
pub struct RangeRequest {
    /// Inclusive start of the range.
    pub from: RecordId,
    /// Inclusive end of the range; the walk stops immediately after the
    /// record with this id is emitted or expanded through.
    pub to: RecordId,
    /// Whether containers met during the walk are expanded into their leaf
    /// descendants instead of being emitted as themselves.
    pub include_items: bool,
}

/// Where the next children page of the current parent starts.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageCursor {
    /// First child of the parent (fresh after an ascend).
    Beginning,
    /// At the named record, inclusive (the initial page, so the start record
    /// itself is emitted).
    StartAt(RecordId),
    /// After the named record: request the inclusive page and drop the echo.
    After(RecordId),
}

/// Walk state passed between steps.
#[derive(Debug)]
enum WalkState {
    /// Normal forward walk under a fixed parent.
    Descending { parent: RecordId, cursor: PageCursor },
    /// The current parent is exhausted; find the next sibling parent.
    Ascending { parent: RecordId },
    /// The end record was reached.
    Done,
}

// =============================================================================
// RangeWalker
// =============================================================================

/// Drives a from/to traversal against a [`DirectoryClient`].
pub struct RangeWalker<'a> {
    client: &'a dyn DirectoryClient,
    page_size: u32,
}

impl<'a> RangeWalker<'a> {
    pub fn new(client: &'a dyn DirectoryClient) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(client: &'a dyn DirectoryClient, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// Run the traversal and return the emitted leaves in order.
    pub async fn run(&self, request: &RangeRequest) -> Result<Vec<LeafRecord>> {
        let details = self
            .client
            .fetch_details(&request.from)
            .await
            .map_err(|e| WalkError::from_client(e, &request.from))?;
        let parent = details
            .parent_id
            .ok_or_else(|| WalkError::MalformedRecord {
                id: request.from.clone(),
                field: "parentId",
            })?;

        let mut sink = ResultSink::new();
        let mut state = WalkState::Descending {
            parent,
            cursor: PageCursor::StartAt(request.from.clone()),
        };

        loop {
            state = match state {
                WalkState::Descending { parent, cursor } => {
                    self.descend_step(request, parent, cursor, &mut sink).await?
                }
                WalkState::Ascending { parent } => self.ascend_step(parent).await?,
                WalkState::Done => break,
            };
        }

        Ok(sink.into_leaves())
    }

    /// One page of forward walking under `parent`.
    async fn descend_step(
        &self,
        request: &RangeRequest,
        parent: RecordId,
        cursor: PageCursor,
        sink: &mut ResultSink,
    ) -> Result<WalkState> {
        let (start, echo) = match cursor {
            PageCursor::Beginning => (PageStart::Beginning, None),
            PageCursor::StartAt(id) => (PageStart::At(id), None),
            PageCursor::After(id) => (PageStart::At(id.clone()), Some(id)),
        };

        // A continuation page spends one slot on the echoed record; request
        // one extra so the page still carries `page_size` new records.
        let limit = match &echo {
            Some(_) => self.page_size.saturating_add(1),
            None => self.page_size,
        };

        let page = self
            .client
            .fetch_children(&parent, start, limit)
            .await
            .map_err(|e| WalkError::from_client(e, &parent))?;

        let mut last: Option<RecordId> = None;
        for (ix, record) in page.records.iter().enumerate() {
            // A continuation page starts at the already-emitted record; drop it.
            if ix == 0 && echo.as_deref() == Some(record.id.as_str()) {
                continue;
            }

            if request.include_items && record.is_container {
                // Expansion is unconditional: every leaf under the container
                // is emitted, even past what the end record would suggest.
                expand_container(self.client, &record.id, self.page_size, sink).await?;
            } else {
                sink.push(leaf_from_child(record)?);
            }

            last = Some(record.id.clone());
            // The end check is only ever against the top-level id, never
            // against ids discovered during expansion. The rest of the page
            // is abandoned once the target is found.
            if record.id == request.to {
                return Ok(WalkState::Done);
            }
        }

        match last {
            Some(last_id) if page.has_more => Ok(WalkState::Descending {
                parent,
                cursor: PageCursor::After(last_id),
            }),
            None if page.has_more => Err(WalkError::PaginationStalled(parent)),
            _ => Ok(WalkState::Ascending { parent }),
        }
    }

    /// Recovery when `parent`'s children are exhausted without finding the
    /// end record: locate the sibling parent that follows it one level up.
    async fn ascend_step(&self, parent: RecordId) -> Result<WalkState> {
        let details = match self.client.fetch_details(&parent).await {
            Ok(details) => details,
            // A parent that vanished mid-walk is treated as "no next sibling".
            Err(ClientError::NotFound) => return Err(WalkError::UnreachableTarget(parent)),
            Err(e) => return Err(WalkError::from_client(e, &parent)),
        };
        let grandparent = match details.parent_id {
            Some(grandparent) => grandparent,
            None => return Err(WalkError::UnreachableTarget(parent)),
        };

        let siblings = match self
            .client
            .fetch_children(&grandparent, PageStart::At(parent.clone()), SIBLING_PROBE_LIMIT)
            .await
        {
            Ok(page) => page,
            Err(ClientError::NotFound) => return Err(WalkError::UnreachableTarget(parent)),
            Err(e) => return Err(WalkError::from_client(e, &grandparent)),
        };

        // The probe page is [parent, next sibling]; the walk resumes from the
        // start of the sibling's children.
        match siblings.records.get(1) {
            Some(next) => Ok(WalkState::Descending {
                parent: next.id.clone(),
                cursor: PageCursor::Beginning,
            }),
            None => Err(WalkError::UnreachableTarget(parent)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
