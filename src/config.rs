use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::history::DEFAULT_CAPACITY;
use crate::scoring::platform::PlatformRules;
use crate::scoring::weights::WeightProfile;
use crate::scoring::ScoringConfig;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// setting has a default, so a bare `veracity analyze` works out of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite file holding the analysis history
    pub db_path: String,
    pub weight_profile: WeightProfile,
    /// Enable the Instagram promotional-bio rule
    pub instagram_promo: bool,
    /// Drop the platform weight for profiles with no platform
    pub renormalize_unspecified: bool,
    /// How many history entries to keep
    pub history_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let weight_profile = match get("VERACITY_WEIGHTS") {
            Some(raw) => raw
                .parse::<WeightProfile>()
                .map_err(anyhow::Error::msg)
                .context("Invalid VERACITY_WEIGHTS")?,
            None => WeightProfile::default(),
        };

        let instagram_promo = flag(&get, "VERACITY_INSTAGRAM_PROMO", false)?;
        let renormalize_unspecified = flag(&get, "VERACITY_RENORMALIZE_UNSPECIFIED", true)?;

        let history_limit = match get("VERACITY_HISTORY_LIMIT") {
            Some(raw) => {
                let limit: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("VERACITY_HISTORY_LIMIT must be a number (got '{raw}')"))?;
                if limit == 0 {
                    anyhow::bail!("VERACITY_HISTORY_LIMIT must be at least 1");
                }
                // SQLite LIMIT is a signed 64-bit value; negatives mean "no limit".
                if i64::try_from(limit).is_err() {
                    anyhow::bail!("VERACITY_HISTORY_LIMIT is too large (got {limit})");
                }
                limit
            }
            None => DEFAULT_CAPACITY,
        };

        Ok(Self {
            db_path: get("VERACITY_DB_PATH").unwrap_or_else(default_db_path),
            weight_profile,
            instagram_promo,
            renormalize_unspecified,
            history_limit,
        })
    }

    /// The immutable scoring configuration these settings describe.
    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            platform_rules: PlatformRules {
                instagram_promo_keywords: self.instagram_promo,
            },
            renormalize_unspecified: self.renormalize_unspecified,
            ..ScoringConfig::from_profile(self.weight_profile)
        }
    }
}

/// Read a boolean switch. Unset means `default`; anything unrecognized is
/// an error rather than a silent false.
fn flag<F>(get: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{key} must be true or false (got '{raw}')"),
        },
    }
}

/// `<data dir>/veracity/history.db`, or `./veracity.db` when the platform
/// has no data directory.
fn default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("veracity").join("history.db"))
        .unwrap_or_else(|| PathBuf::from("./veracity.db"))
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.weight_profile, WeightProfile::Canonical);
        assert!(!config.instagram_promo);
        assert!(config.renormalize_unspecified);
        assert!(config.scoring_config().renormalize_unspecified);
        assert_eq!(config.history_limit, 20);
        assert!(config.db_path.ends_with("history.db") || config.db_path.ends_with("veracity.db"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("VERACITY_DB_PATH", "/tmp/v.db"),
            ("VERACITY_WEIGHTS", "five-factor"),
            ("VERACITY_INSTAGRAM_PROMO", "true"),
            ("VERACITY_HISTORY_LIMIT", "5"),
        ])
        .unwrap();
        assert_eq!(config.db_path, "/tmp/v.db");
        assert_eq!(config.weight_profile, WeightProfile::FiveFactor);
        assert!(config.instagram_promo);
        assert_eq!(config.history_limit, 5);

        let scoring = config.scoring_config();
        assert!(scoring.platform_rules.instagram_promo_keywords);
        assert_eq!(scoring.weights.platform, 0.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config_from(&[("VERACITY_WEIGHTS", "seven")]).is_err());
        assert!(config_from(&[("VERACITY_HISTORY_LIMIT", "0")]).is_err());
        assert!(config_from(&[("VERACITY_HISTORY_LIMIT", "lots")]).is_err());
        assert!(config_from(&[("VERACITY_INSTAGRAM_PROMO", "maybe")]).is_err());
    }

    #[test]
    fn test_history_limit_must_fit_sqlite_limit() {
        let too_big = (i64::MAX as u64 + 1).to_string();
        let err = config_from(&[("VERACITY_HISTORY_LIMIT", too_big.as_str())])
            .unwrap_err()
            .to_string();
        assert!(err.contains("too large"), "got: {err}");

        let max = i64::MAX.to_string();
        let config = config_from(&[("VERACITY_HISTORY_LIMIT", max.as_str())]).unwrap();
        assert_eq!(config.history_limit as i64, i64::MAX);
    }

    #[test]
    fn test_renormalization_switch() {
        let config = config_from(&[("VERACITY_RENORMALIZE_UNSPECIFIED", "false")]).unwrap();
        assert!(!config.renormalize_unspecified);
        assert!(!config.scoring_config().renormalize_unspecified);
    }
}
