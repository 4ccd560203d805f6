// Link and date helpers shared by lookup sources and presentation.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::profile::Platform;

/// Characters escaped in a URL query component: everything except
/// alphanumerics and `-_.!~*'()`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const REVERSE_IMAGE_SEARCH_BASE: &str = "https://www.google.com/searchbyimage?image_url=";

/// Days per month used when converting an account creation date.
const DAYS_PER_MONTH: i64 = 30;

/// Whole months between account creation and `now`, in 30-day steps.
/// A creation date in the future counts as zero.
pub fn account_age_months(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now - created_at).num_days();
    if days <= 0 {
        return 0;
    }
    u32::try_from(days / DAYS_PER_MONTH).unwrap_or(u32::MAX)
}

/// Link that runs a reverse image search for a profile picture.
pub fn reverse_image_search_url(image_url: &str) -> String {
    format!(
        "{REVERSE_IMAGE_SEARCH_BASE}{}",
        utf8_percent_encode(image_url, QUERY_COMPONENT)
    )
}

/// Public profile URL, when the platform has a predictable one.
pub fn profile_url(username: &str, platform: Platform) -> Option<String> {
    let handle = username.trim_start_matches('@');
    match platform {
        Platform::Instagram => Some(format!("https://www.instagram.com/{handle}")),
        Platform::Facebook => Some(format!("https://www.facebook.com/{handle}")),
        Platform::Twitter => Some(format!("https://twitter.com/{handle}")),
        Platform::Unspecified => None,
    }
}
