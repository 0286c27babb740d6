//! The hosting-framework surface: output-variable bindings and the range
//! search service.

mod bindings;
mod service;

pub use bindings::{BindingIteration, BindingSet, OutputVariables};
pub use service::{parse_include_items, RangeSearchService};
