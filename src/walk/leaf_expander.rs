//! Exhaustive single-level expansion of a container record.
//!
//! Containers in this catalogue contain only leaves, so expansion is a flat
//! bounded pagination loop, not a recursive tree walk. Expansion ignores the
//! surrounding range's end boundary entirely; it is bounded only by the
//! remote "no more" signal.

use super::range_walker::{Result, WalkError};
use super::sink::ResultSink;
use crate::client::{DirectoryClient, PageStart};
use crate::record::{ChildRecord, LeafRecord, RecordId};

/// Build an emitted leaf from a child record, failing on missing fields.
pub(crate) fn leaf_from_child(record: &ChildRecord) -> Result<LeafRecord> {
    let citable_reference =
        record
            .citable_reference
            .clone()
            .ok_or_else(|| WalkError::MalformedRecord {
                id: record.id.clone(),
                field: "citableReference",
            })?;

    let description = record
        .scope_content
        .as_ref()
        .and_then(|scope| scope.cleaned_description())
        .ok_or_else(|| WalkError::MalformedRecord {
            id: record.id.clone(),
            field: "scopeContent.description",
        })?;

    Ok(LeafRecord {
        citable_reference,
        description,
    })
}

/// Emit every leaf under `container_id` into the sink.
///
/// Paginates the container's children from the beginning until the remote
/// reports no more, regardless of any range boundary. Children are expected
/// to be leaves; one missing a required field fails the whole walk.
pub async fn expand_container(
    client: &dyn DirectoryClient,
    container_id: &RecordId,
    page_size: u32,
    sink: &mut ResultSink,
) -> Result<()> {
    let mut last: Option<RecordId> = None;

    loop {
        // Continuation pages spend one slot on the echoed record; request one
        // extra so each page still carries `page_size` new leaves.
        let (start, limit) = match &last {
            None => (PageStart::Beginning, page_size),
            Some(id) => (PageStart::At(id.clone()), page_size.saturating_add(1)),
        };
        let page = client
            .fetch_children(container_id, start, limit)
            .await
            .map_err(|e| WalkError::from_client(e, container_id))?;

        let echo = last.clone();
        let mut advanced = false;
        for (ix, record) in page.records.iter().enumerate() {
            // A continuation page starts at the last emitted record; drop the echo.
            if ix == 0 && echo.as_deref() == Some(record.id.as_str()) {
                continue;
            }
            sink.push(leaf_from_child(record)?);
            last = Some(record.id.clone());
            advanced = true;
        }

        if !page.has_more {
            return Ok(());
        }
        if !advanced {
            // The remote claims more children but yields none; bail out
            // rather than loop forever.
            return Err(WalkError::PaginationStalled(container_id.clone()));
        }
    }
}
