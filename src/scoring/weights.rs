// Weighting aggregator and tier thresholds.
//
// The composite score is a weighted average of the six factor scores.
// Weights and thresholds travel as immutable values handed to the engine
// rather than module-level constants, so tests can score with alternate
// tables without touching global state.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::profile::Platform;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Named weight vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightProfile {
    /// All six factors, platform-specific included at 0.20.
    #[default]
    Canonical,
    /// The older vector that ignores the platform factor entirely.
    FiveFactor,
}

impl WeightProfile {
    pub fn weights(&self) -> ScoringWeights {
        match self {
            WeightProfile::Canonical => ScoringWeights::default(),
            WeightProfile::FiveFactor => ScoringWeights::five_factor(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightProfile::Canonical => "canonical",
            WeightProfile::FiveFactor => "five-factor",
        }
    }
}

impl std::fmt::Display for WeightProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WeightProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" | "six-factor" => Ok(WeightProfile::Canonical),
            "five-factor" | "legacy" => Ok(WeightProfile::FiveFactor),
            other => Err(format!(
                "unknown weight profile '{other}' (expected canonical or five-factor)"
            )),
        }
    }
}

/// Per-factor weights for the composite score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub username: f64,
    pub completeness: f64,
    pub follower_ratio: f64,
    pub activity: f64,
    pub account_age: f64,
    pub platform: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            username: 0.15,
            completeness: 0.15,
            follower_ratio: 0.15,
            activity: 0.20,
            account_age: 0.15,
            platform: 0.20,
        }
    }
}

impl ScoringWeights {
    pub fn five_factor() -> Self {
        Self {
            username: 0.15,
            completeness: 0.20,
            follower_ratio: 0.20,
            activity: 0.25,
            account_age: 0.20,
            platform: 0.0,
        }
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.username,
            self.completeness,
            self.follower_ratio,
            self.activity,
            self.account_age,
            self.platform,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Reject weight tables that can't produce a 0-100 weighted average.
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.as_array().iter().find(|w| !w.is_finite() || **w < 0.0) {
            anyhow::bail!("Invalid scoring weights: every weight must be a finite value >= 0 (found {bad})");
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            anyhow::bail!("Invalid scoring weights: weights must sum to 1.0 (got {sum:.6})");
        }
        Ok(())
    }

    /// Weights actually applied for a profile on `platform`.
    ///
    /// An unspecified platform carries no platform signal, so its weight is
    /// dropped and the other five are scaled back up to sum to 1.0.
    pub fn effective_for(&self, platform: Platform) -> Self {
        if platform != Platform::Unspecified || self.platform == 0.0 {
            return *self;
        }
        let remaining = 1.0 - self.platform;
        if remaining <= 0.0 {
            // Platform-only table: nothing left to renormalize onto.
            return *self;
        }
        Self {
            username: self.username / remaining,
            completeness: self.completeness / remaining,
            follower_ratio: self.follower_ratio / remaining,
            activity: self.activity / remaining,
            account_age: self.account_age / remaining,
            platform: 0.0,
        }
    }
}

/// The six factor scores in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorScores {
    pub username: u32,
    pub completeness: u32,
    pub follower_ratio: u32,
    pub activity: u32,
    pub account_age: u32,
    pub platform: u32,
}

/// Combine factor scores into the composite 0-100 score.
///
/// Rounds half away from zero and clamps, so a table that drifts a hair
/// over 1.0 still can't push the result past 100.
pub fn composite_score(scores: &FactorScores, weights: &ScoringWeights) -> u32 {
    let weighted = f64::from(scores.username) * weights.username
        + f64::from(scores.completeness) * weights.completeness
        + f64::from(scores.follower_ratio) * weights.follower_ratio
        + f64::from(scores.activity) * weights.activity
        + f64::from(scores.account_age) * weights.account_age
        + f64::from(scores.platform) * weights.platform;

    weighted.round().clamp(0.0, 100.0) as u32
}

/// Composite-score cut-offs between tiers.
///
/// Scores below `suspicious` are Authentic, below `high_risk` Suspicious,
/// everything else HighRisk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub suspicious: u32,
    pub high_risk: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            suspicious: 30,
            high_risk: 70,
        }
    }
}

impl TierThresholds {
    pub fn validate(&self) -> Result<()> {
        if self.suspicious > self.high_risk || self.high_risk > 100 {
            anyhow::bail!(
                "Invalid tier thresholds: need suspicious <= high_risk <= 100 (got {} / {})",
                self.suspicious,
                self.high_risk
            );
        }
        Ok(())
    }
}
