// Profile lookup trait — the swap-ready abstraction over profile sources.

use anyhow::Result;
use async_trait::async_trait;

use crate::profile::{Platform, ProfileRecord};

/// Trait for fetching a profile by username. Async because any real
/// implementation talks to a remote API.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Fetch a single profile. Fails when the account doesn't exist.
    async fn lookup(&self, username: &str, platform: Platform) -> Result<ProfileRecord>;

    /// Fetch several profiles, returning results in the same order.
    /// Default implementation calls `lookup` sequentially and keeps going
    /// past failures so one missing account doesn't sink the rest.
    async fn lookup_many(
        &self,
        usernames: &[String],
        platform: Platform,
    ) -> Vec<Result<ProfileRecord>> {
        let mut results = Vec::with_capacity(usernames.len());
        for username in usernames {
            results.push(self.lookup(username, platform).await);
        }
        results
    }
}
