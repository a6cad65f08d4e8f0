use crate::cli::GlobalArgs;
use std::{env, path::PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DATA_DIR_VAR: &str = "DIVVY_DATA_DIR";
pub const CURRENCY_VAR: &str = "DIVVY_CURRENCY";
pub const MAX_PARTICIPANTS_VAR: &str = "DIVVY_MAX_PARTICIPANTS";

const DEFAULT_DATA_DIR: &str = ".divvy";
const DEFAULT_CURRENCY: &str = "₹";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub currency: String,
    pub max_participants: usize,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment. Command-line
    /// flags win over both.
    pub fn from_env(overrides: &GlobalArgs) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok(), overrides)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &GlobalArgs,
    ) -> Result<Self, ConfigError> {
        let data_dir = match &overrides.data_dir {
            Some(dir) => dir.clone(),
            None => lookup(DATA_DIR_VAR)
                .filter(|value| !value.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
        };

        let currency = match &overrides.currency {
            Some(currency) => currency.clone(),
            None => lookup(CURRENCY_VAR).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        };
        if currency.trim().is_empty() {
            return Err(ConfigError::Empty { key: CURRENCY_VAR });
        }

        let max_participants = match overrides.max_participants {
            Some(max) => parse_positive("--max-participants", &max.to_string())?,
            None => match lookup(MAX_PARTICIPANTS_VAR) {
                Some(raw) => parse_positive(MAX_PARTICIPANTS_VAR, &raw)?,
                None => divvy_domain::DEFAULT_ROSTER_CAPACITY,
            },
        };

        Ok(Self {
            data_dir,
            currency,
            max_participants,
        })
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Initialize logging and tracing
///
/// Filter comes from `RUST_LOG`; output goes to stderr so command output on
/// stdout stays clean.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[]), &GlobalArgs::default())
            .expect("config");

        assert_eq!(
            config,
            AppConfig {
                data_dir: PathBuf::from(".divvy"),
                currency: "₹".to_string(),
                max_participants: 20,
            }
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(
            lookup_from(&[
                (DATA_DIR_VAR, "/tmp/trip"),
                (CURRENCY_VAR, "€"),
                (MAX_PARTICIPANTS_VAR, " 8 "),
            ]),
            &GlobalArgs::default(),
        )
        .expect("config");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/trip"));
        assert_eq!(config.currency, "€");
        assert_eq!(config.max_participants, 8);
    }

    #[test]
    fn flags_override_environment() {
        let overrides = GlobalArgs {
            data_dir: Some(PathBuf::from("flat")),
            currency: Some("$".to_string()),
            max_participants: Some(4),
        };
        let config = AppConfig::from_lookup(
            lookup_from(&[
                (DATA_DIR_VAR, "/tmp/trip"),
                (CURRENCY_VAR, "€"),
                (MAX_PARTICIPANTS_VAR, "not a number"),
            ]),
            &overrides,
        )
        .expect("config");

        assert_eq!(config.data_dir, PathBuf::from("flat"));
        assert_eq!(config.currency, "$");
        assert_eq!(config.max_participants, 4);
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-3")]
    #[case::text("lots")]
    fn rejects_invalid_capacity(#[case] raw: &str) {
        let err = AppConfig::from_lookup(
            lookup_from(&[(MAX_PARTICIPANTS_VAR, raw)]),
            &GlobalArgs::default(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: MAX_PARTICIPANTS_VAR,
                value: raw.to_string(),
            }
        );
    }

    #[test]
    fn rejects_zero_capacity_flag() {
        let overrides = GlobalArgs {
            max_participants: Some(0),
            ..GlobalArgs::default()
        };
        let err = AppConfig::from_lookup(lookup_from(&[]), &overrides).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                key: "--max-participants",
                ..
            }
        ));
    }

    #[test]
    fn rejects_blank_currency() {
        let err = AppConfig::from_lookup(
            lookup_from(&[(CURRENCY_VAR, "  ")]),
            &GlobalArgs::default(),
        )
        .unwrap_err();

        assert_eq!(err, ConfigError::Empty { key: CURRENCY_VAR });
    }
}
