// Field-driven risk factors.
//
// Each calculator is a total function of a few profile fields and returns
// a score in 0..=100 plus a sentence explaining it. None of them look at
// each other's output; the engine runs them independently and the
// aggregator combines the scores afterwards.

use crate::profile::ProfilePicture;

/// One calculator's output before it is labelled for a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorScore {
    pub score: u32,
    pub description: String,
}

impl FactorScore {
    pub fn new(score: u32, description: impl Into<String>) -> Self {
        Self {
            score: score.min(MAX_SCORE),
            description: description.into(),
        }
    }
}

pub const MAX_SCORE: u32 = 100;

/// Bios shorter than this count as missing.
pub const MIN_BIO_CHARS: usize = 10;

const EMPTY_USERNAME_SCORE: u32 = 90;
const LONG_USERNAME_CHARS: usize = 15;
const DIGIT_RUN_LEN: usize = 4;

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '.' | '-')
}

/// Length of the longest run of consecutive ASCII digits.
fn longest_digit_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in s.chars() {
        if c.is_ascii_digit() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Score how machine-generated a username looks.
///
/// Points are additive and capped at 100:
/// - +20 any digit
/// - +15 any `_`, `.` or `-`
/// - +15 longer than 15 characters
/// - +20 display name given but not contained in the username
/// - +30 four or more digits in a row
///
/// An empty username scores 90 and skips the other checks.
pub fn username_risk(username: &str, display_name: &str) -> FactorScore {
    if username.is_empty() {
        return FactorScore::new(EMPTY_USERNAME_SCORE, "No username provided");
    }

    let has_digits = username.chars().any(|c| c.is_ascii_digit());
    let has_separators = username.chars().any(is_separator);
    let is_long = username.chars().count() > LONG_USERNAME_CHARS;
    let name_mismatch = !display_name.is_empty()
        && !username
            .to_lowercase()
            .contains(&display_name.to_lowercase());
    let has_digit_run = longest_digit_run(username) >= DIGIT_RUN_LEN;

    let mut score = 0;
    if has_digits {
        score += 20;
    }
    if has_separators {
        score += 15;
    }
    if is_long {
        score += 15;
    }
    if name_mismatch {
        score += 20;
    }
    if has_digit_run {
        score += 30;
    }

    let description = if has_digit_run {
        "Contains many numbers (potential automated creation)"
    } else if has_separators && has_digits {
        "Contains random characters and numbers"
    } else if has_digits {
        "Contains numbers in username"
    } else {
        "Username appears normal"
    };

    FactorScore::new(score, description)
}

/// Score how much of the profile was left unfilled.
///
/// Each gap adds to a missing-field count (short bio 1, no picture 2,
/// default picture 1, no posts 1) worth 25 points apiece.
pub fn completeness_risk(
    bio: &str,
    picture: ProfilePicture,
    post_count: u64,
) -> FactorScore {
    let bio_missing = bio.chars().count() < MIN_BIO_CHARS;

    let mut missing_fields: u32 = 0;
    if bio_missing {
        missing_fields += 1;
    }
    match picture {
        ProfilePicture::None => missing_fields += 2,
        ProfilePicture::Default => missing_fields += 1,
        ProfilePicture::Custom => {}
    }
    if post_count == 0 {
        missing_fields += 1;
    }

    let description = match (bio_missing, picture) {
        (true, ProfilePicture::None) => "Missing bio and profile picture",
        (true, _) => "Missing or minimal bio information",
        (false, ProfilePicture::None) => "No profile picture uploaded",
        (false, ProfilePicture::Default) => "Using default profile picture",
        (false, ProfilePicture::Custom) => "Profile is reasonably complete",
    };

    FactorScore::new(missing_fields * 25, description)
}

/// Score the balance between followers and accounts followed.
pub fn follower_ratio_risk(followers: u64, following: u64) -> FactorScore {
    match (followers, following) {
        (0, 0) => FactorScore::new(50, "No followers or following anyone"),
        (0, _) => FactorScore::new(70, "Following others but has no followers"),
        (_, 0) => FactorScore::new(40, "Has followers but not following anyone"),
        _ => {
            // Both non-zero past this point.
            let ratio = following as f64 / followers as f64;
            if ratio > 10.0 {
                FactorScore::new(
                    80,
                    format!("Following {following} accounts but only has {followers} followers"),
                )
            } else if ratio > 5.0 {
                FactorScore::new(
                    60,
                    format!("Following {following} accounts with only {followers} followers"),
                )
            } else if ratio < 0.1 {
                FactorScore::new(
                    70,
                    format!("Has many followers ({followers}) but following few ({following})"),
                )
            } else {
                FactorScore::new(30, "Balanced follower/following ratio")
            }
        }
    }
}

/// Score posting frequency relative to account age.
///
/// A zero-month account is "brand new" whatever its post count; otherwise
/// an account with no posts at all is the strongest signal.
pub fn activity_risk(post_count: u64, age_months: u32) -> FactorScore {
    if age_months == 0 {
        return FactorScore::new(70, "Brand new account");
    }
    if post_count == 0 {
        return FactorScore::new(80, "No posts detected");
    }

    let posts_per_month = post_count as f64 / f64::from(age_months);
    let rounded = posts_per_month.round() as u64;

    if posts_per_month > 100.0 {
        FactorScore::new(70, format!("Very high activity ({rounded} posts/month)"))
    } else if posts_per_month < 0.5 {
        FactorScore::new(60, "Very low posting activity")
    } else {
        FactorScore::new(30, format!("Normal activity level ({rounded} posts/month)"))
    }
}

/// Score account age. Younger is riskier; never increases with age.
pub fn account_age_risk(age_months: u32) -> FactorScore {
    let score = match age_months {
        // Ages are whole months, so the sub-month step (80) collapses into 0.
        0 => 90,
        m if m < 3 => 60,
        m if m < 6 => 40,
        _ => 20,
    };

    let description = match age_months {
        0 => "Brand new account".to_string(),
        m if m < 3 => format!("Account only {m} months old"),
        m if m < 12 => format!("Account created {m} months ago"),
        m => format!("Established account ({m} months old)"),
    };

    FactorScore::new(score, description)
}
