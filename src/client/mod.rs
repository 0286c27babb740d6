//! Clients for the remote Discovery directory API.

mod directory_client;
mod http_client;
mod memory_client;
mod retrying_client;

pub use directory_client::{ClientError, DirectoryClient, PageStart, Result};
pub use http_client::HttpDirectoryClient;
pub use memory_client::{MemoryDirectoryClient, MemoryRecord};
pub use retrying_client::RetryingDirectoryClient;
