// Risk scoring — factor calculators, weighting, tiers, and the engine
// that ties them together.

pub mod engine;
pub mod factors;
pub mod platform;
pub mod report;
pub mod weights;

pub use engine::{ScoringConfig, ScoringEngine};
pub use report::{RiskFactor, RiskFactorResult, RiskTier, ScoringReport};
