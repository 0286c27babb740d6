//! Record model for the Discovery catalogue.

mod types;

pub use types::{
    strip_scope_envelope, ChildRecord, ChildrenPage, LeafRecord, RecordDetails, RecordId,
    ScopeContent,
};
