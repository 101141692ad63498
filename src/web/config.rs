use log::LevelFilter;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

use crate::databank::{SectorContext, SectorId};

const ENVIRONMENT_VAR: &str = "DNS_ENVIRONMENT";
const PORT_VAR: &str = "DNS_PORT";
const LOG_LEVEL_VAR: &str = "DSN_LOG_LEVEL";
const SECTOR_ID_VAR: &str = "DSN_SECTOR_ID";

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing sector ID")]
    MissingSectorId,
    #[error("invalid sector ID, must be a positive integer")]
    InvalidSectorId,
    #[error("invalid log level provided: {0}")]
    InvalidLogLevel(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    Local,
    Production,
}

impl Profile {
    fn default_log_level(self) -> LevelFilter {
        match self {
            Profile::Local => LevelFilter::Debug,
            Profile::Production => LevelFilter::Warn,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    pub log_level: LevelFilter,
    pub sector: SectorContext,
    pub bind: String,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    profile: Profile,
    sector_id: Option<SectorId>,
    log_level: Option<String>,
    #[serde(default = "default_bind")]
    bind: String,
}

fn default_bind() -> String {
    bind_for_port(DEFAULT_PORT)
}

fn bind_for_port(port: u16) -> String {
    format!("0.0.0.0:{}", port)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the config from `DNS_*`/`DSN_*` style variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let profile = match var(ENVIRONMENT_VAR) {
            Some(env) if env.eq_ignore_ascii_case("production") => Profile::Production,
            _ => Profile::Local,
        };

        let sector_id = var(SECTOR_ID_VAR)
            .map(|raw| raw.parse::<SectorId>())
            .transpose()
            .map_err(|_| ConfigError::InvalidSectorId)?;

        let bind = match var(PORT_VAR) {
            Some(raw) => {
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
                bind_for_port(port)
            }
            None => default_bind(),
        };

        let log_level = var(LOG_LEVEL_VAR);
        Self::resolve(profile, sector_id, log_level.as_deref(), bind)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = serde_yaml::from_str(content)?;
        Self::resolve(
            file.profile,
            file.sector_id,
            file.log_level.as_deref(),
            file.bind,
        )
    }

    fn resolve(
        profile: Profile,
        sector_id: Option<SectorId>,
        log_level: Option<&str>,
        bind: String,
    ) -> Result<Self, ConfigError> {
        let sector_id = match (profile, sector_id) {
            (_, Some(id)) => id,
            (Profile::Production, None) => return Err(ConfigError::MissingSectorId),
            (Profile::Local, None) => SectorId::default(),
        };

        let log_level = match log_level {
            Some(raw) => LevelFilter::from_str(raw)
                .map_err(|_| ConfigError::InvalidLogLevel(raw.to_string()))?,
            None => profile.default_log_level(),
        };

        Ok(Config {
            profile,
            log_level,
            sector: SectorContext::new(sector_id),
            bind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn local_profile_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.profile, Profile::Local);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.sector.sector_id.get(), 1);
        assert_eq!(config.bind, "0.0.0.0:8080");
    }

    #[test]
    fn local_profile_honours_explicit_values() {
        let config = from_vars(&[(SECTOR_ID_VAR, "7"), (LOG_LEVEL_VAR, "trace")]).unwrap();
        assert_eq!(config.profile, Profile::Local);
        assert_eq!(config.sector.sector_id.get(), 7);
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn production_requires_sector_id() {
        let err = from_vars(&[(ENVIRONMENT_VAR, "PRODUCTION")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSectorId));
    }

    #[test]
    fn production_reads_sector_and_defaults_to_warn() {
        let config = from_vars(&[
            (ENVIRONMENT_VAR, "PRODUCTION"),
            (SECTOR_ID_VAR, "5"),
            (PORT_VAR, "9000"),
        ])
        .unwrap();
        assert_eq!(config.profile, Profile::Production);
        assert_eq!(config.sector.sector_id.get(), 5);
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.bind, "0.0.0.0:9000");
    }

    #[test]
    fn production_honours_log_level() {
        let config = from_vars(&[
            (ENVIRONMENT_VAR, "production"),
            (SECTOR_ID_VAR, "2"),
            (LOG_LEVEL_VAR, "info"),
        ])
        .unwrap();
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn rejects_bad_values() {
        for sector in ["0", "-3", "two", "1.5"] {
            let err = from_vars(&[(ENVIRONMENT_VAR, "PRODUCTION"), (SECTOR_ID_VAR, sector)])
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSectorId), "{sector}");
        }

        let err = from_vars(&[(LOG_LEVEL_VAR, "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(level) if level == "loud"));

        let err = from_vars(&[(PORT_VAR, "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn empty_variables_count_as_unset() {
        let config = from_vars(&[(PORT_VAR, ""), (SECTOR_ID_VAR, "")]).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.sector.sector_id.get(), 1);
    }

    #[test]
    fn yaml_config() {
        let config = Config::from_yaml(
            "profile: production\nsector_id: 3\nlog_level: error\nbind: 127.0.0.1:3000\n",
        )
        .unwrap();
        assert_eq!(config.profile, Profile::Production);
        assert_eq!(config.sector.sector_id.get(), 3);
        assert_eq!(config.log_level, LevelFilter::Error);
        assert_eq!(config.bind, "127.0.0.1:3000");

        let err = Config::from_yaml("profile: production\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSectorId));

        assert!(matches!(
            Config::from_yaml("sector_id: 0\n").unwrap_err(),
            ConfigError::Yaml(_)
        ));
    }
}
