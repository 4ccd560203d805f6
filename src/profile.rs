// Profile data model — the record every analysis starts from.
//
// ProfileRecord is the validated, immutable input to the scoring engine.
// ProfileInput is the raw shape a form or JSON file hands us: optional
// strings and signed counts. Validation turns one into the other, so the
// engine never sees a negative count or a blank username.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// State of the profile picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfilePicture {
    /// A picture the owner uploaded
    Custom,
    /// The platform's placeholder avatar
    Default,
    /// No picture at all
    None,
}

impl ProfilePicture {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfilePicture::Custom => "custom",
            ProfilePicture::Default => "default",
            ProfilePicture::None => "none",
        }
    }
}

impl fmt::Display for ProfilePicture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProfilePicture {
    type Err = String;

    /// Accepts the canonical names plus the old form values ("yes" / "no").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "custom" | "yes" => Ok(ProfilePicture::Custom),
            "default" => Ok(ProfilePicture::Default),
            "none" | "no" => Ok(ProfilePicture::None),
            other => Err(format!(
                "unknown profile picture state '{other}' (expected custom, default or none)"
            )),
        }
    }
}

/// Social network the profile lives on.
///
/// Adding a platform means adding a variant here; the platform-specific
/// calculator matches exhaustively, so the compiler points at every rule
/// that needs a new arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Twitter,
    #[default]
    Unspecified,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Unspecified => "unspecified",
        }
    }

    /// Human-facing name used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Twitter => "Twitter",
            Platform::Unspecified => "Social Media",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            "twitter" | "x" => Ok(Platform::Twitter),
            "" | "unspecified" | "other" => Ok(Platform::Unspecified),
            other => Err(format!(
                "unknown platform '{other}' (expected instagram, facebook, twitter or unspecified)"
            )),
        }
    }
}

/// A validated description of one social media profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub post_count: u64,
    pub account_age_months: u32,
    pub profile_picture: ProfilePicture,
    #[serde(default)]
    pub platform: Platform,
}

impl ProfileRecord {
    /// Check the invariants the type system can't express.
    ///
    /// Counts are unsigned so they can't go negative; the remaining rule is
    /// that a record must name a username. Records read back from JSON go
    /// through here before they are scored.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            anyhow::bail!("Invalid profile: username is required");
        }
        Ok(())
    }
}

/// Raw, unvalidated profile values as captured from a form or a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub follower_count: i64,
    #[serde(default)]
    pub following_count: i64,
    #[serde(default)]
    pub post_count: i64,
    #[serde(default, alias = "accountAge")]
    pub account_age_months: i64,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

impl ProfileInput {
    /// Validate raw values and build a ProfileRecord.
    ///
    /// Every rejected field is listed in the error, so a caller fixing a
    /// form sees all problems at once instead of one per attempt.
    pub fn validate(self) -> Result<ProfileRecord> {
        let mut problems: Vec<String> = Vec::new();

        let username = self
            .username
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if username.is_empty() {
            problems.push("username is required".to_string());
        }

        let follower_count = non_negative("followerCount", self.follower_count, &mut problems);
        let following_count = non_negative("followingCount", self.following_count, &mut problems);
        let post_count = non_negative("postCount", self.post_count, &mut problems);
        let account_age_months = match u32::try_from(self.account_age_months) {
            Ok(months) => months,
            Err(_) if self.account_age_months < 0 => {
                problems.push(format!(
                    "accountAgeMonths must be a non-negative number (got {})",
                    self.account_age_months
                ));
                0
            }
            Err(_) => {
                problems.push(format!(
                    "accountAgeMonths is out of range (got {}, max {})",
                    self.account_age_months,
                    u32::MAX
                ));
                0
            }
        };

        let profile_picture = match self.profile_picture.as_deref() {
            None => ProfilePicture::Default,
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                problems.push(e);
                ProfilePicture::Default
            }),
        };
        let platform = match self.platform.as_deref() {
            None => Platform::Unspecified,
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                problems.push(e);
                Platform::Unspecified
            }),
        };

        if !problems.is_empty() {
            anyhow::bail!("Invalid profile: {}", problems.join("; "));
        }

        Ok(ProfileRecord {
            username,
            display_name: self.display_name.unwrap_or_default().trim().to_string(),
            bio: self.bio.unwrap_or_default(),
            follower_count,
            following_count,
            post_count,
            account_age_months,
            profile_picture,
            platform,
        })
    }
}

fn non_negative(field: &str, value: i64, problems: &mut Vec<String>) -> u64 {
    match u64::try_from(value) {
        Ok(v) => v,
        Err(_) => {
            problems.push(format!("{field} must be a non-negative number (got {value})"));
            0
        }
    }
}
