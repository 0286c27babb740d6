//! Executes one range query for the hosting framework.

use std::sync::Arc;

use super::bindings::{BindingIteration, BindingSet, OutputVariables};
use crate::client::DirectoryClient;
use crate::record::LeafRecord;
use crate::walk::{RangeRequest, RangeWalker, Result, WalkError};

/// Parse the string form of the `includeItems` input. Case-sensitive: only
/// the exact string `"true"` enables expansion.
pub fn parse_include_items(raw: &str) -> bool {
    raw == "true"
}

/// Runs range traversals and maps the emitted leaves onto the caller's
/// variable names.
///
/// Each invocation owns its own cursor state and sink; the service itself is
/// stateless and can be shared.
pub struct RangeSearchService {
    client: Arc<dyn DirectoryClient>,
    page_size: u32,
}

impl RangeSearchService {
    pub fn new(client: Arc<dyn DirectoryClient>, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// Run a traversal and return the raw leaves.
    pub async fn run_range(&self, request: &RangeRequest) -> Result<Vec<LeafRecord>> {
        let walker = RangeWalker::with_page_size(self.client.as_ref(), self.page_size);
        walker.run(request).await
    }

    /// Entry point for callers that pass inputs as raw strings, the way the
    /// hosting framework delivers them. `include_items` goes through
    /// [`parse_include_items`].
    pub async fn execute_inputs(
        &self,
        from: &str,
        to: &str,
        include_items: &str,
        variables: &OutputVariables,
    ) -> std::result::Result<BindingIteration, WalkError> {
        let request = RangeRequest {
            from: from.to_string(),
            to: to.to_string(),
            include_items: parse_include_items(include_items),
        };
        self.execute(&request, variables).await
    }

    /// Run a traversal and return its results as a closeable binding
    /// iteration, one binding set per leaf.
    ///
    /// On failure the caller receives the error alone; no truncated
    /// iteration is ever produced.
    pub async fn execute(
        &self,
        request: &RangeRequest,
        variables: &OutputVariables,
    ) -> std::result::Result<BindingIteration, WalkError> {
        let leaves = self.run_range(request).await?;

        let sets = leaves
            .into_iter()
            .map(|leaf| {
                let mut set = BindingSet::new();
                set.add_binding(variables.citable_reference.clone(), leaf.citable_reference);
                set.add_binding(variables.description.clone(), leaf.description);
                set
            })
            .collect();

        Ok(BindingIteration::new(sets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryDirectoryClient;

    #[test]
    fn test_parse_include_items_is_case_sensitive() {
        assert!(parse_include_items("true"));
        assert!(!parse_include_items("True"));
        assert!(!parse_include_items("TRUE"));
        assert!(!parse_include_items("1"));
        assert!(!parse_include_items(""));
    }

    fn service() -> RangeSearchService {
        let mut client = MemoryDirectoryClient::new();
        client.add_root("P1");
        client.add_leaf("A", "P1");
        client.add_leaf("B", "P1");
        RangeSearchService::new(Arc::new(client), 100)
    }

    fn variables() -> OutputVariables {
        OutputVariables {
            citable_reference: "reference".to_string(),
            description: "description".to_string(),
        }
    }

    #[tokio::test]
    async fn test_execute_binds_caller_variable_names() {
        let request = RangeRequest {
            from: "A".to_string(),
            to: "B".to_string(),
            include_items: false,
        };

        let sets: Vec<_> = service()
            .execute(&request, &variables())
            .await
            .unwrap()
            .collect();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].get("reference"), Some("REF A"));
        assert_eq!(sets[0].get("description"), Some("Description of A"));
        assert_eq!(sets[1].get("reference"), Some("REF B"));
    }

    #[tokio::test]
    async fn test_execute_inputs_parses_include_items_string() {
        let mut client = MemoryDirectoryClient::new();
        client.add_root("P1");
        client.add_leaf("A", "P1");
        client.add_container("B", "P1");
        client.add_leaf("B1", "B");
        let service = RangeSearchService::new(Arc::new(client), 100);

        let expanded: Vec<_> = service
            .execute_inputs("A", "B", "true", &variables())
            .await
            .unwrap()
            .collect();
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[1].get("reference"), Some("REF B1"));

        // Only the exact string "true" enables expansion.
        let unexpanded: Vec<_> = service
            .execute_inputs("A", "B", "True", &variables())
            .await
            .unwrap()
            .collect();
        assert_eq!(unexpanded.len(), 2);
        assert_eq!(unexpanded[1].get("reference"), Some("REF B"));
    }

    #[tokio::test]
    async fn test_execute_reports_failure_without_results() {
        let request = RangeRequest {
            from: "A".to_string(),
            to: "MISSING".to_string(),
            include_items: false,
        };

        let result = service().execute(&request, &variables()).await;
        assert!(matches!(result, Err(WalkError::UnreachableTarget(_))));
    }
}
