//! Quoter Configuration Module
//!
//! Loads settings from an optional TOML file, then applies `CURVE_`-prefixed
//! environment overrides. Nested keys use a double underscore:
//! `CURVE_POOL_DEFAULTS__TOTAL_SUPPLY=5000`.

use crate::defaults;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main quoter configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CurveConfig {
    pub network: NetworkConfig,
    pub pool_defaults: PoolDefaults,
    pub chart: ChartConfig,
    pub log_level: LogLevel,
}

/// Cluster connection settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    pub cluster: String,
    pub rpc_url: String,
    pub program_id: String,
    pub commitment: String,
}

/// Parameters proposed for a newly initialized pool
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PoolDefaults {
    pub total_supply: u64,
    /// Lamports
    pub virtual_sol_reserve: u64,
    pub virtual_token_reserve: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ChartConfig {
    pub points: u32,
}

/// Tracing filter directive, e.g. `info` or `curve_amm=debug`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct LogLevel(pub String);

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            cluster: defaults::network::CLUSTER.to_string(),
            rpc_url: defaults::network::RPC_URL.to_string(),
            program_id: defaults::network::PROGRAM_ID.to_string(),
            commitment: defaults::network::COMMITMENT.to_string(),
        }
    }
}

impl Default for PoolDefaults {
    fn default() -> Self {
        Self {
            total_supply: defaults::pool::TOTAL_SUPPLY,
            virtual_sol_reserve: defaults::pool::VIRTUAL_SOL_RESERVE,
            virtual_token_reserve: defaults::pool::VIRTUAL_TOKEN_RESERVE,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            points: defaults::chart::POINTS,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self(defaults::LOG_LEVEL.to_string())
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CurveConfig {
    /// Load configuration from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`CurveConfig::load`], reading overrides from `env` instead of
    /// the process environment when given
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading quoter config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let mut settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        settings.expand_env_vars()?;

        debug!(cluster = %settings.network.cluster, rpc_url = %settings.network.rpc_url, "Configuration loaded");
        Ok(settings)
    }

    /// Expand environment variables in the RPC URL
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let expanded = shellexpand::env(&self.network.rpc_url).context("Failed to expand RPC URL")?;
        self.network.rpc_url = expanded.into_owned();
        Ok(())
    }
}
