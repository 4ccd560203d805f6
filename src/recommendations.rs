// Recommended actions — turns a report into advice.
//
// The headline action depends only on the tier. Suggestions look at the
// raw profile fields, so two profiles with the same score can get
// different advice.

use serde::{Deserialize, Serialize};

use crate::profile::{ProfilePicture, ProfileRecord};
use crate::scoring::factors::MIN_BIO_CHARS;
use crate::scoring::{RiskTier, ScoringReport};

/// What the user should do about the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub title: String,
    pub description: String,
    /// Short call to action, e.g. "Report & Block"
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: RecommendedAction,
    pub suggestions: Vec<String>,
}

pub fn action_for(tier: RiskTier) -> RecommendedAction {
    let (title, description, action) = match tier {
        RiskTier::Authentic => (
            "Likely Authentic",
            "This profile has a low risk score and appears to be authentic.",
            "Safe to Engage",
        ),
        RiskTier::Suspicious => (
            "Exercise Caution",
            "This profile has some suspicious elements. Verify identity before sharing personal information.",
            "Verify First",
        ),
        RiskTier::HighRisk => (
            "High Risk - Likely Fake",
            "This profile shows strong indicators of being inauthentic. Avoid engaging or sharing information.",
            "Report & Block",
        ),
    };
    RecommendedAction {
        title: title.to_string(),
        description: description.to_string(),
        action: action.to_string(),
    }
}

/// Field-specific advice, most urgent first.
pub fn suggestions(record: &ProfileRecord, score: u32, authentic_below: u32) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();

    if record.account_age_months < 3 {
        out.push("Account is very new. Wait to see more activity history before engaging deeply.");
    }

    if matches!(
        record.profile_picture,
        ProfilePicture::None | ProfilePicture::Default
    ) {
        out.push("Profile lacks a personalized profile picture, which is common in fake accounts.");
    }

    if record.bio.chars().count() < MIN_BIO_CHARS {
        out.push("Minimal or missing bio information can indicate a hastily created profile.");
    }

    if record.post_count == 0 {
        out.push("No posts detected. Most legitimate users create content regularly.");
    }

    let followers = record.follower_count;
    let following = record.following_count;

    if following > followers.saturating_mul(10) && following > 100 {
        out.push("Following many accounts with few followers is a common pattern in fake profiles.");
    }

    if followers > following.saturating_mul(10) && record.post_count < 10 {
        out.push("High follower count with little content can indicate purchased followers.");
    }

    if out.is_empty() {
        if score < authentic_below {
            out.push("Profile appears authentic, but always use caution when sharing personal information online.");
        } else {
            out.push("Verify this profile through external means before engaging deeply.");
        }
    }

    out.into_iter().map(String::from).collect()
}

/// Build the full recommendation for an analyzed profile.
pub fn recommend(
    record: &ProfileRecord,
    report: &ScoringReport,
    authentic_below: u32,
) -> Recommendation {
    Recommendation {
        action: action_for(report.tier),
        suggestions: suggestions(record, report.score, authentic_below),
    }
}
