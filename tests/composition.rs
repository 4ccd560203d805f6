// Composition tests — verifying that the pieces chain together correctly.
//
// These tests exercise the data flow between modules:
//   ProfileInput -> ProfileRecord -> ScoringEngine -> Recommendation -> Report
// without any network calls or database access (except report generation,
// which writes to /tmp).

use veracity::pipeline::batch::{self, BatchResult};
use veracity::profile::{Platform, ProfileInput, ProfilePicture, ProfileRecord};
use veracity::recommendations::recommend;
use veracity::scoring::weights::WeightProfile;
use veracity::scoring::{RiskFactor, RiskTier, ScoringConfig, ScoringEngine};

fn suspicious_new_account() -> ProfileRecord {
    ProfileRecord {
        username: "john_doe42".to_string(),
        display_name: "John Doe".to_string(),
        bio: String::new(),
        follower_count: 10,
        following_count: 2000,
        post_count: 0,
        account_age_months: 0,
        profile_picture: ProfilePicture::Default,
        platform: Platform::Unspecified,
    }
}

fn established_account() -> ProfileRecord {
    ProfileRecord {
        username: "janesmith".to_string(),
        display_name: "Jane".to_string(),
        bio: "Photographer and dog person based in Lisbon".to_string(),
        follower_count: 800,
        following_count: 400,
        post_count: 500,
        account_age_months: 36,
        profile_picture: ProfilePicture::Custom,
        platform: Platform::Instagram,
    }
}

// ============================================================
// End-to-end scenarios
// ============================================================

#[test]
fn new_mass_following_account_is_high_risk() {
    let engine = ScoringEngine::default();
    let report = engine.analyze(&suspicious_new_account());

    assert_eq!(report.score, 74);
    assert_eq!(report.tier, RiskTier::HighRisk);

    let score_of = |f| report.factor(f).map(|r| r.score);
    assert_eq!(score_of(RiskFactor::Username), Some(55));
    assert_eq!(score_of(RiskFactor::Completeness), Some(75));
    assert_eq!(score_of(RiskFactor::FollowerRatio), Some(80));
    assert_eq!(score_of(RiskFactor::Activity), Some(70));
    assert_eq!(score_of(RiskFactor::AccountAge), Some(90));
    assert_eq!(score_of(RiskFactor::Platform), Some(50));
    assert_eq!(
        report.strongest_factor().map(|f| f.factor),
        Some(RiskFactor::AccountAge)
    );
}

#[test]
fn established_account_is_authentic() {
    let report = ScoringEngine::default().analyze(&established_account());
    assert_eq!(report.score, 22);
    assert_eq!(report.tier, RiskTier::Authentic);
    assert_eq!(report.tier.label(), "Likely Authentic");
}

#[test]
fn five_factor_profile_ignores_platform() {
    let engine = ScoringEngine::new(ScoringConfig::from_profile(WeightProfile::FiveFactor)).unwrap();
    let report = engine.analyze(&established_account());
    // 0.20*30 + 0.25*30 + 0.20*20
    assert_eq!(report.score, 18);
    assert_eq!(report.factors.len(), 6);
}

#[test]
fn report_lists_all_factors_in_order() {
    let report = ScoringEngine::default().analyze(&established_account());
    let order: Vec<RiskFactor> = report.factors.iter().map(|f| f.factor).collect();
    assert_eq!(order, RiskFactor::ALL.to_vec());
    assert!(report.factors.iter().all(|f| !f.tooltip.is_empty()));
}

// ============================================================
// Properties: determinism, range, age monotonicity
// ============================================================

#[test]
fn identical_records_give_identical_reports() {
    let engine = ScoringEngine::default();
    let a = engine.analyze(&suspicious_new_account());
    let b = engine.clone().analyze(&suspicious_new_account());
    assert_eq!(a, b);
}

#[test]
fn score_stays_in_range_across_extremes() {
    let engine = ScoringEngine::default();
    let counts = [0u64, 1, 9, 99, 5_001, 10_001, u64::MAX];
    let ages = [0u32, 1, 2, 5, 11, 240, u32::MAX];
    let platforms = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::Twitter,
        Platform::Unspecified,
    ];

    for &followers in &counts {
        for &following in &counts {
            for &age in &ages {
                for platform in platforms {
                    let record = ProfileRecord {
                        follower_count: followers,
                        following_count: following,
                        post_count: followers,
                        account_age_months: age,
                        platform,
                        ..suspicious_new_account()
                    };
                    let report = engine.analyze(&record);
                    assert!(report.score <= 100, "{record:?} -> {}", report.score);
                    assert!(report.factors.iter().all(|f| f.score <= 100));
                }
            }
        }
    }
}

#[test]
fn older_accounts_never_score_higher_on_age() {
    let engine = ScoringEngine::default();
    let mut previous = u32::MAX;
    for age in [0, 1, 3, 6] {
        let record = ProfileRecord {
            account_age_months: age,
            ..established_account()
        };
        let report = engine.analyze(&record);
        let age_score = report
            .factor(RiskFactor::AccountAge)
            .map(|f| f.score)
            .unwrap();
        assert!(age_score <= previous);
        previous = age_score;
    }
}

// ============================================================
// Chain: input validation -> scoring -> recommendation
// ============================================================

#[test]
fn raw_input_flows_through_to_advice() {
    let input: ProfileInput = serde_json::from_str(
        r#"{
            "username": " john_doe42 ",
            "displayName": "John Doe",
            "followerCount": 10,
            "followingCount": 2000,
            "postCount": 0,
            "accountAgeMonths": 0,
            "profilePicture": "default"
        }"#,
    )
    .unwrap();
    let record = input.validate().unwrap();
    assert_eq!(record, suspicious_new_account());

    let report = ScoringEngine::default().analyze(&record);
    let rec = recommend(&record, &report, 30);
    assert_eq!(rec.action.action, "Report & Block");
    assert!(rec.suggestions.len() >= 4);
    assert!(rec.suggestions[0].starts_with("Account is very new"));
}

#[test]
fn invalid_input_names_every_problem() {
    let input = ProfileInput {
        username: Some("   ".to_string()),
        follower_count: -1,
        account_age_months: -3,
        ..ProfileInput::default()
    };
    let err = input.validate().unwrap_err().to_string();
    assert!(err.contains("username is required"), "got: {err}");
    assert!(err.contains("followerCount"), "got: {err}");
    assert!(err.contains("accountAgeMonths"), "got: {err}");
}

// ============================================================
// Chain: batch -> Markdown report
// ============================================================

#[tokio::test]
async fn batch_results_render_to_markdown() {
    let engine = ScoringEngine::default();
    let results: Vec<BatchResult> = batch::run(
        &engine,
        vec![suspicious_new_account(), established_account()],
        None,
        2,
        false,
    )
    .await
    .unwrap();

    let tmp_path = "/tmp/veracity_test_batch_report.md";
    let markdown = veracity::output::markdown::generate_report(&results, tmp_path).unwrap();
    let content = std::fs::read_to_string(tmp_path).unwrap();
    assert_eq!(content, markdown);

    assert!(content.contains("# Veracity Risk Report"));
    assert!(content.contains("| High Risk - Likely Fake | 1 |"));
    assert!(content.contains("| Potentially Suspicious | 0 |"));
    assert!(content.contains("| Likely Authentic | 1 |"));
    assert!(content.contains("| **Total** | **2** |"));
    // highest score ranks first
    assert!(content.contains("| 1 | @john_doe42 | Social Media | 74 |"));
    assert!(content.contains("### @janesmith (22/100, Likely Authentic)"));
    // no platform given: the platform factor is listed but carries no weight
    assert!(content.contains("| Platform-Specific Patterns | 50 | 0% |"));
    assert!(content.contains("| Account Age | 90 | 19% |"));

    let _ = std::fs::remove_file(tmp_path);
}

#[test]
fn empty_report_has_only_summary() {
    let markdown = veracity::output::markdown::render(&[]).unwrap();
    assert!(markdown.contains("| **Total** | **0** |"));
    assert!(!markdown.contains("## Factor Breakdown"));
}
