use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{Matcher, ProposingSide, RankingPolicy, RankingStage, SelectionStrategy};
use crate::models::{RosterError, SeniorityScale, UnknownSeniorityPolicy};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Required; there is no implicit policy for unknown seniorities
    pub unknown_seniority_policy: UnknownSeniorityPolicy,
    #[serde(default)]
    pub selection_strategy: SelectionStrategy,
    #[serde(default)]
    pub proposing_side: ProposingSide,
    /// Junior to senior; defaults to the built-in table
    pub seniority_levels: Option<Vec<String>>,
    pub seeks_mentor_stages: Option<Vec<RankingStage>>,
    pub seeks_mentee_stages: Option<Vec<RankingStage>>,
}

impl MatchingSettings {
    pub fn seniority_scale(&self) -> Result<SeniorityScale, RosterError> {
        match &self.seniority_levels {
            Some(levels) => SeniorityScale::new(levels),
            None => Ok(SeniorityScale::default()),
        }
    }

    pub fn ranking_policy(&self) -> RankingPolicy {
        let defaults = RankingPolicy::default();
        RankingPolicy {
            seeks_mentor: self.seeks_mentor_stages.clone().unwrap_or(defaults.seeks_mentor),
            seeks_mentee: self.seeks_mentee_stages.clone().unwrap_or(defaults.seeks_mentee),
        }
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.ranking_policy(), self.selection_strategy, self.proposing_side)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables, e.g. MENTOR_MATCH__SERVER__PORT -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MENTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
