//! An in-memory implementation of [`DirectoryClient`].
//!
//! Holds a small catalogue tree entirely in memory. Used by tests and offline
//! demos; pagination follows the same inclusive `batchStartRecordId` semantics
//! as the real API.

use std::collections::HashMap;

use async_trait::async_trait;

use super::directory_client::{ClientError, DirectoryClient, PageStart, Result};
use crate::record::{ChildRecord, ChildrenPage, RecordDetails, RecordId, ScopeContent};

/// One record held by the in-memory catalogue.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecord {
    pub parent: Option<RecordId>,
    pub citable_reference: Option<String>,
    /// Raw description, envelope and all, exactly as the wire would carry it.
    pub description: Option<String>,
    pub is_container: bool,
}

/// An in-memory [`DirectoryClient`] over a fixed catalogue tree.
#[derive(Debug, Default)]
pub struct MemoryDirectoryClient {
    records: HashMap<RecordId, MemoryRecord>,
    children: HashMap<RecordId, Vec<RecordId>>,
}

impl MemoryDirectoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the catalogue. Child order under a parent is the
    /// insertion order of these calls.
    pub fn add_record(&mut self, id: impl Into<RecordId>, record: MemoryRecord) {
        let id = id.into();
        if let Some(parent) = &record.parent {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(id.clone());
        }
        self.records.insert(id, record);
    }

    /// Add a leaf record with a citable reference and an envelope-wrapped
    /// description derived from the id.
    pub fn add_leaf(&mut self, id: &str, parent: &str) {
        self.add_record(
            id,
            MemoryRecord {
                parent: Some(parent.to_string()),
                citable_reference: Some(format!("REF {}", id)),
                description: Some(format!(
                    "<scopecontent><p>Description of {}</p></scopecontent>",
                    id
                )),
                is_container: false,
            },
        );
    }

    /// Add a container record (one that has children of its own).
    pub fn add_container(&mut self, id: &str, parent: &str) {
        self.add_record(
            id,
            MemoryRecord {
                parent: Some(parent.to_string()),
                citable_reference: Some(format!("REF {}", id)),
                description: Some(format!(
                    "<scopecontent><p>Description of {}</p></scopecontent>",
                    id
                )),
                is_container: true,
            },
        );
    }

    /// Add a root-level record with no parent.
    pub fn add_root(&mut self, id: &str) {
        self.add_record(id, MemoryRecord::default());
    }

    fn child_record(&self, id: &RecordId) -> ChildRecord {
        let record = &self.records[id];
        ChildRecord {
            id: id.clone(),
            citable_reference: record.citable_reference.clone(),
            is_container: record.is_container,
            scope_content: record.description.as_ref().map(|d| ScopeContent {
                description: Some(d.clone()),
            }),
        }
    }
}

#[async_trait]
impl DirectoryClient for MemoryDirectoryClient {
    async fn fetch_details(&self, id: &RecordId) -> Result<RecordDetails> {
        match self.records.get(id) {
            Some(record) => Ok(RecordDetails {
                parent_id: record.parent.clone(),
            }),
            None => Err(ClientError::NotFound),
        }
    }

    async fn fetch_children(
        &self,
        parent: &RecordId,
        start: PageStart,
        limit: u32,
    ) -> Result<ChildrenPage> {
        if !self.records.contains_key(parent) {
            return Err(ClientError::NotFound);
        }
        let ids = self.children.get(parent).map(Vec::as_slice).unwrap_or(&[]);

        let from = match &start {
            PageStart::Beginning => 0,
            PageStart::At(id) => ids.iter().position(|c| c == id).ok_or_else(|| {
                ClientError::Transport(format!("record {} is not a child of {}", id, parent))
            })?,
        };

        let to = usize::min(from + limit as usize, ids.len());
        let records = ids[from..to].iter().map(|id| self.child_record(id)).collect();

        Ok(ChildrenPage {
            records,
            has_more: to < ids.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalogue() -> MemoryDirectoryClient {
        let mut client = MemoryDirectoryClient::new();
        client.add_root("P");
        client.add_leaf("A", "P");
        client.add_leaf("B", "P");
        client.add_leaf("C", "P");
        client
    }

    #[tokio::test]
    async fn test_fetch_details() {
        let client = small_catalogue();
        let details = client.fetch_details(&"A".to_string()).await.unwrap();
        assert_eq!(details.parent_id.as_deref(), Some("P"));

        let root = client.fetch_details(&"P".to_string()).await.unwrap();
        assert!(root.parent_id.is_none());

        let missing = client.fetch_details(&"Z".to_string()).await;
        assert!(matches!(missing, Err(ClientError::NotFound)));
    }

    #[tokio::test]
    async fn test_fetch_children_from_beginning() {
        let client = small_catalogue();
        let page = client
            .fetch_children(&"P".to_string(), PageStart::Beginning, 100)
            .await
            .unwrap();
        let ids: Vec<_> = page.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_fetch_children_start_is_inclusive() {
        let client = small_catalogue();
        let page = client
            .fetch_children(&"P".to_string(), PageStart::At("B".to_string()), 100)
            .await
            .unwrap();
        let ids: Vec<_> = page.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_fetch_children_pagination() {
        let client = small_catalogue();
        let page = client
            .fetch_children(&"P".to_string(), PageStart::Beginning, 2)
            .await
            .unwrap();
        assert_eq!(page.records.len(), 2);
        assert!(page.has_more);

        let next = client
            .fetch_children(&"P".to_string(), PageStart::At("B".to_string()), 2)
            .await
            .unwrap();
        let ids: Vec<_> = next.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert!(!next.has_more);
    }

    #[tokio::test]
    async fn test_fetch_children_of_childless_record() {
        let client = small_catalogue();
        let page = client
            .fetch_children(&"A".to_string(), PageStart::Beginning, 100)
            .await
            .unwrap();
        assert!(page.records.is_empty());
        assert!(!page.has_more);
    }
}
