//! In-memory representation of Discovery catalogue records and children pages.
//!
//! These types mirror the JSON the Discovery API returns. Fields the traversal
//! does not need are ignored during deserialization; fields it does need are
//! optional here and validated by the walker, which fails loudly on a missing
//! field instead of silently dropping data from the range.

use serde::{Deserialize, Serialize};

/// Record ID is an opaque identifier assigned by the remote catalogue,
/// unique within it.
pub type RecordId = String;

// =============================================================================
// Wire Types
// =============================================================================

/// The subset of a record's details the traversal needs: its parent.
///
/// `parent_id` is absent only for the catalogue root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordDetails {
    pub parent_id: Option<RecordId>,
}

/// A record's free-text description, wrapped in the catalogue's fixed
/// markup envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeContent {
    pub description: Option<String>,
}

impl ScopeContent {
    /// The description with the markup envelope stripped, if present.
    pub fn cleaned_description(&self) -> Option<String> {
        self.description.as_deref().map(strip_scope_envelope)
    }
}

/// One child record as returned by the children endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildRecord {
    pub id: RecordId,
    pub citable_reference: Option<String>,
    /// True if the record itself has children to enumerate rather than being
    /// a terminal leaf.
    #[serde(rename = "isParent")]
    pub is_container: bool,
    pub scope_content: Option<ScopeContent>,
}

/// One page of a record's children, in the remote API's natural sibling order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildrenPage {
    /// Ordered child records for this page.
    #[serde(rename = "assets")]
    pub records: Vec<ChildRecord>,
    /// Whether more children exist after the last record in this page.
    #[serde(rename = "hasMoreAfterLast")]
    pub has_more: bool,
}

// =============================================================================
// Emitted Leaves
// =============================================================================

/// A leaf emitted by the traversal: a citable reference and a cleaned
/// description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafRecord {
    pub citable_reference: String,
    pub description: String,
}

// =============================================================================
// Description Cleaning
// =============================================================================

const ENVELOPE_OPEN: &str = "<scopecontent><p>";
const ENVELOPE_CLOSE: &str = "</p></scopecontent>";

/// Strip the catalogue's markup envelope from a description.
///
/// Idempotent: a description without the envelope is returned unchanged, and
/// the output never contains the envelope tags.
pub fn strip_scope_envelope(description: &str) -> String {
    description
        .replace(ENVELOPE_OPEN, "")
        .replace(ENVELOPE_CLOSE, "")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scope_envelope() {
        assert_eq!(
            strip_scope_envelope("<scopecontent><p>Court rolls.</p></scopecontent>"),
            "Court rolls."
        );
    }

    #[test]
    fn test_strip_scope_envelope_without_envelope() {
        assert_eq!(strip_scope_envelope("Court rolls."), "Court rolls.");
        assert_eq!(strip_scope_envelope(""), "");
    }

    #[test]
    fn test_strip_scope_envelope_idempotent() {
        let raw = "<scopecontent><p>Letters patent, 1603.</p></scopecontent>";
        let once = strip_scope_envelope(raw);
        let twice = strip_scope_envelope(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cleaned_description() {
        let scope = ScopeContent {
            description: Some("<scopecontent><p>Assize records</p></scopecontent>".to_string()),
        };
        assert_eq!(scope.cleaned_description().unwrap(), "Assize records");

        let empty = ScopeContent { description: None };
        assert!(empty.cleaned_description().is_none());
    }

    #[test]
    fn test_deserialize_details() {
        let details: RecordDetails =
            serde_json::from_str(r#"{"parentId":"C123","title":"ignored"}"#).unwrap();
        assert_eq!(details.parent_id.as_deref(), Some("C123"));

        let root: RecordDetails = serde_json::from_str(r#"{}"#).unwrap();
        assert!(root.parent_id.is_none());
    }

    #[test]
    fn test_deserialize_children_page() {
        let json = r#"{
            "assets": [
                {
                    "id": "C1",
                    "citableReference": "E 101/1",
                    "isParent": false,
                    "scopeContent": {
                        "description": "<scopecontent><p>Accounts.</p></scopecontent>"
                    }
                },
                {
                    "id": "C2",
                    "citableReference": "E 101/2",
                    "isParent": true
                }
            ],
            "hasMoreAfterLast": true
        }"#;
        let page: ChildrenPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.records.len(), 2);
        assert!(page.has_more);

        let first = &page.records[0];
        assert_eq!(first.id, "C1");
        assert_eq!(first.citable_reference.as_deref(), Some("E 101/1"));
        assert!(!first.is_container);
        assert_eq!(
            first.scope_content.as_ref().unwrap().cleaned_description(),
            Some("Accounts.".to_string())
        );

        let second = &page.records[1];
        assert!(second.is_container);
        assert!(second.scope_content.is_none());
    }

    #[test]
    fn test_deserialize_empty_page() {
        let page: ChildrenPage = serde_json::from_str(r#"{}"#).unwrap();
        assert!(page.records.is_empty());
        assert!(!page.has_more);
    }
}
