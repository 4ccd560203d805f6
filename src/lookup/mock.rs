// Mock profile source — deterministic, offline.
//
// Registered fixtures are returned as-is. Any other valid username gets a
// synthesized profile derived from a hash of the username and platform, so
// the same query always yields the same record for a given reference time.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::links::account_age_months;
use super::traits::ProfileLookup;
use crate::profile::{Platform, ProfilePicture, ProfileRecord};

const MAX_USERNAME_CHARS: usize = 30;

const SAMPLE_BIOS: [&str; 5] = [
    "",
    "hi",
    "Coffee lover, amateur photographer and weekend hiker",
    "Follow for daily deals! Link in bio",
    "Software engineer. Opinions are my own.",
];

pub struct MockLookup {
    fixtures: HashMap<(String, Platform), ProfileRecord>,
    now: DateTime<Utc>,
}

impl Default for MockLookup {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl MockLookup {
    /// Synthesize ages relative to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            fixtures: HashMap::new(),
            now,
        }
    }

    /// Register a fixed profile returned for its username and platform.
    pub fn with_profile(mut self, record: ProfileRecord) -> Self {
        let key = (record.username.to_lowercase(), record.platform);
        self.fixtures.insert(key, record);
        self
    }

    fn synthesize(&self, username: &str, platform: Platform) -> ProfileRecord {
        let h = fnv1a(&format!("{}:{}", username.to_lowercase(), platform.as_str()));
        // Slice independent fields out of different bit ranges of the hash.
        let bits = |shift: u32, modulo: u64| (h >> shift) % modulo;

        let created_at = self.now - Duration::days(bits(0, 2_000) as i64);
        let picture = match bits(11, 3) {
            0 => ProfilePicture::Custom,
            1 => ProfilePicture::Default,
            _ => ProfilePicture::None,
        };

        ProfileRecord {
            username: username.to_string(),
            display_name: display_name_from(username),
            bio: SAMPLE_BIOS[bits(13, SAMPLE_BIOS.len() as u64) as usize].to_string(),
            follower_count: bits(17, 20_000),
            following_count: bits(32, 6_000),
            post_count: bits(45, 3_000),
            account_age_months: account_age_months(created_at, self.now),
            profile_picture: picture,
            platform,
        }
    }
}

/// FNV-1a, 64-bit. Stable across Rust releases, unlike `DefaultHasher`.
fn fnv1a(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

/// "jane_smith99" -> "Jane Smith"
fn display_name_from(username: &str) -> String {
    username
        .split(['_', '.', '-'])
        .map(|part| part.trim_matches(|c: char| c.is_ascii_digit()))
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.chars().count() <= MAX_USERNAME_CHARS
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[async_trait]
impl ProfileLookup for MockLookup {
    async fn lookup(&self, username: &str, platform: Platform) -> Result<ProfileRecord> {
        let username = username.trim().trim_start_matches('@');

        if let Some(record) = self.fixtures.get(&(username.to_lowercase(), platform)) {
            debug!(username, platform = platform.as_str(), "Returning fixture profile");
            return Ok(record.clone());
        }

        if !is_valid_username(username) {
            anyhow::bail!("User not found: '{username}' on {}", platform.display_name());
        }

        debug!(username, platform = platform.as_str(), "Synthesizing mock profile");
        Ok(self.synthesize(username, platform))
    }
}
