//! An HTTP implementation of [`DirectoryClient`].
//!
//! Operates against the Discovery records API: unauthenticated HTTPS GET,
//! JSON in/out.
//!
//! - `GET {details_base}/{id}` - record details
//! - `GET {children_base}/{parent}?batchStartRecordId={id}&limit={n}` - one
//!   page of children; `batchStartRecordId` is inclusive and absent means
//!   "first page"

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, StatusCode};

use super::directory_client::{ClientError, DirectoryClient, PageStart, Result};
use crate::record::{ChildrenPage, RecordDetails, RecordId};

/// Characters that must be escaped when a record id is used as a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// An HTTP-based implementation of [`DirectoryClient`].
pub struct HttpDirectoryClient {
    client: Client,
    details_base: String,
    children_base: String,
}

impl HttpDirectoryClient {
    /// Create a new HTTP client for the given endpoint base URLs.
    pub fn new(details_base: impl Into<String>, children_base: impl Into<String>) -> Self {
        Self::with_client(Client::new(), details_base, children_base)
    }

    /// Create a new HTTP client with a per-request timeout.
    pub fn with_timeout(
        details_base: impl Into<String>,
        children_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, details_base, children_base))
    }

    /// Create a new HTTP client with a custom reqwest client.
    pub fn with_client(
        client: Client,
        details_base: impl Into<String>,
        children_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            details_base: details_base.into().trim_end_matches('/').to_string(),
            children_base: children_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn details_url(&self, id: &RecordId) -> String {
        format!(
            "{}/{}",
            self.details_base,
            utf8_percent_encode(id, PATH_SEGMENT)
        )
    }

    fn children_url(&self, parent: &RecordId) -> String {
        format!(
            "{}/{}",
            self.children_base,
            utf8_percent_encode(parent, PATH_SEGMENT)
        )
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn fetch_details(&self, id: &RecordId) -> Result<RecordDetails> {
        let response = self
            .client
            .get(self.details_url(id))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| ClientError::Transport(format!("failed to parse details: {}", e))),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status => Err(ClientError::Transport(format!(
                "unexpected status code: {}",
                status
            ))),
        }
    }

    async fn fetch_children(
        &self,
        parent: &RecordId,
        start: PageStart,
        limit: u32,
    ) -> Result<ChildrenPage> {
        let mut request = self
            .client
            .get(self.children_url(parent))
            .query(&[("limit", limit.to_string())]);
        if let PageStart::At(id) = &start {
            request = request.query(&[("batchStartRecordId", id.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| ClientError::Transport(format!("failed to parse children: {}", e))),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status => Err(ClientError::Transport(format!(
                "unexpected status code: {}",
                status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_trims_trailing_slash() {
        let client = HttpDirectoryClient::new(
            "https://example.test/API/records/v1/details/",
            "https://example.test/API/records/v1/children/",
        );
        assert_eq!(
            client.details_url(&"C123".to_string()),
            "https://example.test/API/records/v1/details/C123"
        );
        assert_eq!(
            client.children_url(&"C123".to_string()),
            "https://example.test/API/records/v1/children/C123"
        );
    }

    #[test]
    fn test_url_building_escapes_ids() {
        let client = HttpDirectoryClient::new(
            "https://example.test/details",
            "https://example.test/children",
        );
        assert_eq!(
            client.details_url(&"C 1/2".to_string()),
            "https://example.test/details/C%201%2F2"
        );
    }
}
