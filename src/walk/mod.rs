//! The range traversal: walker state machine, container expansion, result sink.

mod leaf_expander;
mod range_walker;
mod sink;

pub use leaf_expander::expand_container;
pub use range_walker::{RangeRequest, RangeWalker, Result, WalkError, DEFAULT_PAGE_SIZE};
pub use sink::ResultSink;
