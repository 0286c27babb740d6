//! A retrying wrapper around a [`DirectoryClient`].
//!
//! The core traversal performs no retries of its own; this decorator gives a
//! bounded number of additional attempts for transport failures. `NotFound`
//! is never retried, since it carries meaning for the walk.

use std::time::Duration;

use async_trait::async_trait;

use super::directory_client::{ClientError, DirectoryClient, PageStart, Result};
use crate::record::{ChildrenPage, RecordDetails, RecordId};

/// Wraps another client and retries transport failures.
pub struct RetryingDirectoryClient<C> {
    inner: C,
    max_retries: u32,
    retry_delay: Duration,
}

impl<C: DirectoryClient> RetryingDirectoryClient<C> {
    /// Create a wrapper allowing `max_retries` additional attempts after the
    /// first failure, waiting `retry_delay` between attempts.
    pub fn new(inner: C, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            retry_delay,
        }
    }

    async fn pause_before_retry(&self) {
        if !self.retry_delay.is_zero() {
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}

#[async_trait]
impl<C: DirectoryClient> DirectoryClient for RetryingDirectoryClient<C> {
    async fn fetch_details(&self, id: &RecordId) -> Result<RecordDetails> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch_details(id).await {
                Err(ClientError::Transport(_)) if attempt < self.max_retries => {
                    attempt += 1;
                    self.pause_before_retry().await;
                }
                result => return result,
            }
        }
    }

    async fn fetch_children(
        &self,
        parent: &RecordId,
        start: PageStart,
        limit: u32,
    ) -> Result<ChildrenPage> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch_children(parent, start.clone(), limit).await {
                Err(ClientError::Transport(_)) if attempt < self.max_retries => {
                    attempt += 1;
                    self.pause_before_retry().await;
                }
                result => return result,
            }
        }
    }
}
