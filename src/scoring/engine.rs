// Scoring engine — runs the calculators, aggregates, classifies.
//
// Given a validated ProfileRecord, this module:
// 1. Runs the six factor calculators (independent of each other)
// 2. Combines their scores with the configured weight table
// 3. Classifies the composite score into a tier
// 4. Assembles the labelled per-factor explanations
//
// The engine holds nothing but its immutable configuration, so a single
// instance can be cloned into as many threads or tasks as needed.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::factors;
use super::platform::{self, PlatformRules};
use super::report::{self, FactorOutputs, RiskTier, ScoringReport};
use super::weights::{self, ScoringWeights, TierThresholds, WeightProfile};
use crate::profile::{Platform, ProfileRecord};

/// Everything that can be tuned about a scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: TierThresholds,
    /// Drop the platform weight for `Platform::Unspecified` records and
    /// spread it over the other five factors. Off means the weight table
    /// applies as-is and the generic platform score counts like any other.
    #[serde(default = "default_renormalize_unspecified")]
    pub renormalize_unspecified: bool,
    #[serde(skip)]
    pub platform_rules: PlatformRules,
}

fn default_renormalize_unspecified() -> bool {
    true
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::from_profile(WeightProfile::Canonical)
    }
}

impl ScoringConfig {
    pub fn from_profile(profile: WeightProfile) -> Self {
        Self {
            weights: profile.weights(),
            thresholds: TierThresholds::default(),
            renormalize_unspecified: default_renormalize_unspecified(),
            platform_rules: PlatformRules::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        Ok(())
    }

    /// Weights applied to a record on `platform`.
    pub fn weights_for(&self, platform: Platform) -> ScoringWeights {
        if self.renormalize_unspecified {
            self.weights.effective_for(platform)
        } else {
            self.weights
        }
    }
}

/// Stateless profile scorer.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Build an engine, rejecting configurations that break the score range.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run every factor calculator against the record.
    pub fn factor_outputs(&self, record: &ProfileRecord) -> FactorOutputs {
        FactorOutputs {
            username: factors::username_risk(&record.username, &record.display_name),
            completeness: factors::completeness_risk(
                &record.bio,
                record.profile_picture,
                record.post_count,
            ),
            follower_ratio: factors::follower_ratio_risk(
                record.follower_count,
                record.following_count,
            ),
            activity: factors::activity_risk(record.post_count, record.account_age_months),
            account_age: factors::account_age_risk(record.account_age_months),
            platform: platform::platform_risk(record, &self.config.platform_rules),
        }
    }

    /// Score a profile.
    ///
    /// Total for any record: zero divisors are handled as explicit branches
    /// inside the calculators, and the composite is clamped to 0-100.
    pub fn analyze(&self, record: &ProfileRecord) -> ScoringReport {
        let outputs = self.factor_outputs(record);
        let scores = outputs.scores();

        let weights = self.config.weights_for(record.platform);
        let score = weights::composite_score(&scores, &weights);
        let tier = RiskTier::from_score(score, &self.config.thresholds);

        debug!(
            username = record.username.as_str(),
            username_risk = scores.username,
            completeness = scores.completeness,
            follower_ratio = scores.follower_ratio,
            activity = scores.activity,
            account_age = scores.account_age,
            platform = scores.platform,
            "Factor scores"
        );

        info!(
            username = record.username.as_str(),
            platform = record.platform.as_str(),
            score,
            tier = tier.as_str(),
            "Analyzed profile"
        );

        ScoringReport {
            score,
            tier,
            factors: report::assemble_explanations(outputs, &weights),
        }
    }

    /// Validate a record that came from outside (history, JSON) and score it.
    pub fn analyze_checked(&self, record: &ProfileRecord) -> Result<ScoringReport> {
        record.validate()?;
        Ok(self.analyze(record))
    }
}
