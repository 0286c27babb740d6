//! tna-range-rs - Range retrieval from The National Archives Discovery catalogue.
//!
//! Walks a remote, paginated, tree-structured directory API and flattens an
//! inclusive range of records into a linear sequence of leaves, each carrying
//! a citable reference and a cleaned description.

pub mod cli;
pub mod client;
pub mod config;
pub mod query;
pub mod record;
pub mod walk;

pub use client::{
    ClientError, DirectoryClient, HttpDirectoryClient, MemoryDirectoryClient, PageStart,
    RetryingDirectoryClient,
};
pub use query::{BindingIteration, BindingSet, OutputVariables, RangeSearchService};
pub use record::{
    strip_scope_envelope, ChildRecord, ChildrenPage, LeafRecord, RecordDetails, RecordId,
    ScopeContent,
};
pub use walk::{expand_container, RangeRequest, RangeWalker, ResultSink, WalkError};
