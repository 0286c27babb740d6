//! Configuration types for tna-range-rs.

// =============================================================================
// Config Sections
// =============================================================================

/// [discovery] section - remote API endpoints and traversal tuning.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Base URL of the record details endpoint.
    pub details_url: String,
    /// Base URL of the children endpoint.
    pub children_url: String,
    /// Page size for forward walking and container expansion.
    pub page_size: u32,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Additional attempts after a transport failure. Zero disables retries.
    pub max_retries: u32,
}

// =============================================================================
// Top-Level Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub discovery: DiscoveryConfig,
}
