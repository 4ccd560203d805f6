// Scoring report types and the explanation assembler.
//
// A report is what presentation, recommendations and batch output all
// consume: the composite score, the tier, and one labelled entry per factor
// in a fixed order.

use serde::{Deserialize, Serialize};

use super::factors::FactorScore;
use super::weights::{FactorScores, ScoringWeights, TierThresholds};

/// The six risk dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFactor {
    Username,
    Completeness,
    FollowerRatio,
    Activity,
    AccountAge,
    Platform,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 6] = [
        RiskFactor::Username,
        RiskFactor::Completeness,
        RiskFactor::FollowerRatio,
        RiskFactor::Activity,
        RiskFactor::AccountAge,
        RiskFactor::Platform,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RiskFactor::Username => "Username Characteristics",
            RiskFactor::Completeness => "Profile Completeness",
            RiskFactor::FollowerRatio => "Follower/Following Ratio",
            RiskFactor::Activity => "Activity Level",
            RiskFactor::AccountAge => "Account Age",
            RiskFactor::Platform => "Platform-Specific Patterns",
        }
    }

    /// Static explanation of what the factor measures.
    pub fn tooltip(&self) -> &'static str {
        match self {
            RiskFactor::Username => {
                "Evaluates patterns in the username that may indicate automated creation"
            }
            RiskFactor::Completeness => "Measures how completely the profile has been filled out",
            RiskFactor::FollowerRatio => {
                "Analyzes the balance between followers and accounts being followed"
            }
            RiskFactor::Activity => "Evaluates posting frequency relative to account age",
            RiskFactor::AccountAge => {
                "Newer accounts are generally higher risk than established ones"
            }
            RiskFactor::Platform => "Checks for abuse patterns known on the profile's platform",
        }
    }
}

/// One factor's contribution, labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorResult {
    pub factor: RiskFactor,
    pub name: String,
    pub score: u32,
    /// Weight actually applied in the composite (0 when the factor was dropped)
    pub weight: f64,
    pub description: String,
    pub tooltip: String,
}

impl RiskFactorResult {
    pub fn new(factor: RiskFactor, output: FactorScore, weight: f64) -> Self {
        Self {
            factor,
            name: factor.name().to_string(),
            score: output.score,
            weight,
            description: output.description,
            tooltip: factor.tooltip().to_string(),
        }
    }

    /// Points this factor added to the composite before rounding.
    pub fn contribution(&self) -> f64 {
        f64::from(self.score) * self.weight
    }
}

/// Coarse classification derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Authentic,
    Suspicious,
    HighRisk,
}

impl RiskTier {
    /// Classify a composite score against the given cut-offs.
    pub fn from_score(score: u32, thresholds: &TierThresholds) -> Self {
        match score {
            s if s < thresholds.suspicious => RiskTier::Authentic,
            s if s < thresholds.high_risk => RiskTier::Suspicious,
            _ => RiskTier::HighRisk,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Authentic => "Authentic",
            RiskTier::Suspicious => "Suspicious",
            RiskTier::HighRisk => "HighRisk",
        }
    }

    /// Label shown next to the score.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Authentic => "Likely Authentic",
            RiskTier::Suspicious => "Potentially Suspicious",
            RiskTier::HighRisk => "High Risk - Likely Fake",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final output of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringReport {
    /// Composite score, 0-100
    pub score: u32,
    pub tier: RiskTier,
    /// One entry per factor, always in `RiskFactor::ALL` order
    pub factors: Vec<RiskFactorResult>,
}

impl ScoringReport {
    pub fn factor(&self, factor: RiskFactor) -> Option<&RiskFactorResult> {
        self.factors.iter().find(|f| f.factor == factor)
    }

    /// Highest-scoring factor, first in report order on ties.
    pub fn strongest_factor(&self) -> Option<&RiskFactorResult> {
        self.factors
            .iter()
            .rev()
            .max_by_key(|f| f.score)
    }
}

/// Raw outputs of the six calculators.
#[derive(Debug, Clone)]
pub struct FactorOutputs {
    pub username: FactorScore,
    pub completeness: FactorScore,
    pub follower_ratio: FactorScore,
    pub activity: FactorScore,
    pub account_age: FactorScore,
    pub platform: FactorScore,
}

impl FactorOutputs {
    pub fn scores(&self) -> FactorScores {
        FactorScores {
            username: self.username.score,
            completeness: self.completeness.score,
            follower_ratio: self.follower_ratio.score,
            activity: self.activity.score,
            account_age: self.account_age.score,
            platform: self.platform.score,
        }
    }
}

/// Label each calculator's output with the weight it was scored under and
/// put them in report order.
pub fn assemble_explanations(
    outputs: FactorOutputs,
    weights: &ScoringWeights,
) -> Vec<RiskFactorResult> {
    vec![
        RiskFactorResult::new(RiskFactor::Username, outputs.username, weights.username),
        RiskFactorResult::new(
            RiskFactor::Completeness,
            outputs.completeness,
            weights.completeness,
        ),
        RiskFactorResult::new(
            RiskFactor::FollowerRatio,
            outputs.follower_ratio,
            weights.follower_ratio,
        ),
        RiskFactorResult::new(RiskFactor::Activity, outputs.activity, weights.activity),
        RiskFactorResult::new(RiskFactor::AccountAge, outputs.account_age, weights.account_age),
        RiskFactorResult::new(RiskFactor::Platform, outputs.platform, weights.platform),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let t = TierThresholds::default();
        assert_eq!(RiskTier::from_score(0, &t), RiskTier::Authentic);
        assert_eq!(RiskTier::from_score(29, &t), RiskTier::Authentic);
        assert_eq!(RiskTier::from_score(30, &t), RiskTier::Suspicious);
        assert_eq!(RiskTier::from_score(69, &t), RiskTier::Suspicious);
        assert_eq!(RiskTier::from_score(70, &t), RiskTier::HighRisk);
        assert_eq!(RiskTier::from_score(100, &t), RiskTier::HighRisk);
    }

    #[test]
    fn test_tier_custom_thresholds() {
        let t = TierThresholds {
            suspicious: 10,
            high_risk: 20,
        };
        assert_eq!(RiskTier::from_score(15, &t), RiskTier::Suspicious);
        assert_eq!(RiskTier::from_score(20, &t), RiskTier::HighRisk);
    }

    #[test]
    fn test_display_matches_as_str() {
        for tier in [RiskTier::Authentic, RiskTier::Suspicious, RiskTier::HighRisk] {
            assert_eq!(tier.to_string(), tier.as_str());
        }
    }

    #[test]
    fn test_assembled_order_and_tooltips() {
        let f = |s| FactorScore::new(s, "x");
        let outputs = FactorOutputs {
            username: f(10),
            completeness: f(20),
            follower_ratio: f(30),
            activity: f(40),
            account_age: f(50),
            platform: f(60),
        };
        let factors = assemble_explanations(outputs, &ScoringWeights::default());
        let order: Vec<RiskFactor> = factors.iter().map(|r| r.factor).collect();
        assert_eq!(order, RiskFactor::ALL.to_vec());
        for r in &factors {
            assert!(r.weight > 0.0);
            assert_eq!(r.name, r.factor.name());
            assert_eq!(r.tooltip, r.factor.tooltip());
        }
    }

    #[test]
    fn test_strongest_factor_prefers_first_on_tie() {
        let f = |s| FactorScore::new(s, "x");
        let outputs = FactorOutputs {
            username: f(10),
            completeness: f(80),
            follower_ratio: f(30),
            activity: f(80),
            account_age: f(50),
            platform: f(60),
        };
        let report = ScoringReport {
            score: 50,
            tier: RiskTier::Suspicious,
            factors: assemble_explanations(outputs, &ScoringWeights::default()),
        };
        assert_eq!(
            report.strongest_factor().map(|r| r.factor),
            Some(RiskFactor::Completeness)
        );
    }
}
