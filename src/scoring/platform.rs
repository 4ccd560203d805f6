// Platform-specific abuse patterns.
//
// Every network has its own tell-tale shapes of fake accounts: bought
// followers on Instagram, freshly-made pages with big audiences on
// Facebook, firehose posting on Twitter. The rules are an exhaustive match
// over Platform so a new variant can't slip through unscored.

use std::sync::OnceLock;

use regex_lite::Regex;

use super::factors::FactorScore;
use crate::profile::{Platform, ProfileRecord};

/// Switches for the optional platform rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformRules {
    /// Raise Instagram accounts whose bio reads like an advert to 75.
    pub instagram_promo_keywords: bool,
}

fn promo_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Literal pattern; compiling it can't fail.
        Regex::new(r"(?i)\b(buy|follow|link|bio)\b").expect("static promo regex")
    })
}

/// Whether a bio contains promotional call-to-action keywords.
pub fn is_promotional_bio(bio: &str) -> bool {
    promo_pattern().is_match(bio)
}

/// Score the record against its platform's known fake-account patterns.
pub fn platform_risk(record: &ProfileRecord, rules: &PlatformRules) -> FactorScore {
    let followers = record.follower_count;
    let following = record.following_count;
    let posts = record.post_count;
    let age = record.account_age_months;

    match record.platform {
        Platform::Unspecified => {
            FactorScore::new(50, "Evaluated against general social media patterns")
        }
        Platform::Instagram => {
            if followers > 10_000 && posts < 10 {
                FactorScore::new(
                    85,
                    "Large following with almost no posts (possible purchased followers)",
                )
            } else if following > 5_000 && followers < 100 {
                FactorScore::new(
                    80,
                    "Mass-following pattern common to Instagram bot accounts",
                )
            } else if rules.instagram_promo_keywords && is_promotional_bio(&record.bio) {
                FactorScore::new(75, "Bio reads like a promotional or spam account")
            } else {
                FactorScore::new(40, "No Instagram-specific risk patterns detected")
            }
        }
        Platform::Facebook => {
            if age < 3 && followers > 1_000 {
                FactorScore::new(
                    90,
                    "New Facebook account with an unusually large audience",
                )
            } else {
                FactorScore::new(50, "No Facebook-specific risk patterns detected")
            }
        }
        Platform::Twitter => {
            if posts > 1_000 && age < 1 {
                FactorScore::new(
                    90,
                    "Over 1000 posts in the first month (automated posting)",
                )
            } else if following > 2_000 && followers < 100 {
                FactorScore::new(
                    85,
                    "Follows thousands of accounts with few followers back (follow-spam)",
                )
            } else {
                FactorScore::new(45, "No Twitter-specific risk patterns detected")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfilePicture;

    fn record(platform: Platform) -> ProfileRecord {
        ProfileRecord {
            username: "someone".to_string(),
            display_name: String::new(),
            bio: "Coffee, cameras and long walks".to_string(),
            follower_count: 300,
            following_count: 250,
            post_count: 90,
            account_age_months: 20,
            profile_picture: ProfilePicture::Custom,
            platform,
        }
    }

    #[test]
    fn test_unspecified_is_neutral() {
        let r = platform_risk(&record(Platform::Unspecified), &PlatformRules::default());
        assert_eq!(r.score, 50);
    }

    #[test]
    fn test_instagram_bought_followers() {
        let mut rec = record(Platform::Instagram);
        rec.follower_count = 12_000;
        rec.post_count = 3;
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 85);
    }

    #[test]
    fn test_instagram_thresholds_are_strict() {
        let mut rec = record(Platform::Instagram);
        rec.follower_count = 10_000;
        rec.post_count = 3;
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 40);
    }

    #[test]
    fn test_instagram_mass_follow() {
        let mut rec = record(Platform::Instagram);
        rec.following_count = 6_000;
        rec.follower_count = 40;
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 80);
    }

    #[test]
    fn test_instagram_promo_bio_only_when_enabled() {
        let mut rec = record(Platform::Instagram);
        rec.bio = "DM to BUY followers, link in bio".to_string();
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 40);
        let rules = PlatformRules {
            instagram_promo_keywords: true,
        };
        assert_eq!(platform_risk(&rec, &rules).score, 75);
    }

    #[test]
    fn test_promo_keywords_need_whole_words() {
        assert!(is_promotional_bio("Follow me"));
        assert!(!is_promotional_bio("biology student, buyer at a bookshop"));
    }

    #[test]
    fn test_facebook_new_with_audience() {
        let mut rec = record(Platform::Facebook);
        rec.account_age_months = 2;
        rec.follower_count = 1_500;
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 90);
        rec.account_age_months = 3;
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 50);
    }

    #[test]
    fn test_twitter_branches() {
        let mut rec = record(Platform::Twitter);
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 45);

        rec.following_count = 2_500;
        rec.follower_count = 20;
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 85);

        rec.post_count = 1_200;
        rec.account_age_months = 0;
        assert_eq!(platform_risk(&rec, &PlatformRules::default()).score, 90);
    }
}
