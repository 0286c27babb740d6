//! CLI subcommand implementations.

pub mod details;
pub mod range;
