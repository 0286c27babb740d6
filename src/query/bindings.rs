//! Key/value bindings produced for the hosting query framework.

// =============================================================================
// Output Variables
// =============================================================================

/// Maps the two logical output fields onto the caller's variable names.
#[derive(Debug, Clone)]
pub struct OutputVariables {
    /// Variable name bound to the citable reference.
    pub citable_reference: String,
    /// Variable name bound to the cleaned description.
    pub description: String,
}

// =============================================================================
// Binding Sets
// =============================================================================

/// One emitted leaf as ordered variable/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSet {
    bindings: Vec<(String, String)>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Bind a variable name to a value.
    pub fn add_binding(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.push((name.into(), value.into()));
    }

    /// Look up a binding by variable name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Default for BindingSet {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Binding Iteration
// =============================================================================

/// A closeable iteration over finalized binding sets.
///
/// All fetching has already completed by the time one of these is returned;
/// closing only stops further consumption, it never abandons partial data.
#[derive(Debug)]
pub struct BindingIteration {
    remaining: std::vec::IntoIter<BindingSet>,
    closed: bool,
}

impl BindingIteration {
    pub fn new(sets: Vec<BindingSet>) -> Self {
        Self {
            remaining: sets.into_iter(),
            closed: false,
        }
    }

    /// Stop the iteration. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Iterator for BindingIteration {
    type Item = BindingSet;

    fn next(&mut self) -> Option<BindingSet> {
        if self.closed {
            None
        } else {
            self.remaining.next()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn set(reference: &str, description: &str) -> BindingSet {
        let mut set = BindingSet::new();
        set.add_binding("ref", reference);
        set.add_binding("desc", description);
        set
    }

    #[test]
    fn test_binding_lookup() {
        let set = set("E 101/1", "Accounts.");
        assert_eq!(set.get("ref"), Some("E 101/1"));
        assert_eq!(set.get("desc"), Some("Accounts."));
        assert_eq!(set.get("other"), None);
    }

    #[test]
    fn test_iteration_yields_in_order() {
        let iteration = BindingIteration::new(vec![set("R1", "d1"), set("R2", "d2")]);
        let refs: Vec<_> = iteration
            .map(|s| s.get("ref").unwrap().to_string())
            .collect();
        assert_eq!(refs, vec!["R1", "R2"]);
    }

    #[test]
    fn test_close_stops_consumption() {
        let mut iteration = BindingIteration::new(vec![set("R1", "d1"), set("R2", "d2")]);
        assert!(iteration.next().is_some());
        iteration.close();
        assert!(iteration.next().is_none());
        iteration.close();
        assert!(iteration.is_closed());
    }
}
