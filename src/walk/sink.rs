//! Ordered accumulation of emitted leaves.

use crate::record::LeafRecord;

/// An ordered, append-only buffer of emitted leaves.
///
/// Leaves are appended strictly in emission order and handed out as a single
/// finalized sequence once the walk completes. On a fatal walk failure the
/// sink is dropped with it; partial results are never returned.
#[derive(Debug, Default)]
pub struct ResultSink {
    leaves: Vec<LeafRecord>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one leaf.
    pub fn push(&mut self, leaf: LeafRecord) {
        self.leaves.push(leaf);
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Finalize the sink into the emitted sequence.
    pub fn into_leaves(self) -> Vec<LeafRecord> {
        self.leaves
    }
}
