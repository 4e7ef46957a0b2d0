//! Application configuration management.
//!
//! Configuration is layered from default values, an optional TOML file and
//! environment variables, in increasing order of precedence.

use crate::CliError;
use hyd_solver::EngineSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Numerical settings of the offer engine
    #[serde(default)]
    pub engine: EngineSettings,

    /// Defaults for coupled markets
    #[serde(default)]
    pub interconnector: InterconnectorConfig,
}

/// Defaults for coupled markets
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InterconnectorConfig {
    /// Flow assumed in every segment of the first period, unless the scenario sets one
    #[serde(default)]
    pub first_period_flow: f64,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given on the command line
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `HYD_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Loosen the energy budget check
    /// export HYD_ENGINE__ENERGY_TOLERANCE=1e-3
    ///
    /// # Assume 2 GW of exports in the first period
    /// export HYD_INTERCONNECTOR__FIRST_PERIOD_FLOW=2000
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path));
            } else {
                return Err(CliError::MissingConfig(path.to_path_buf()).into());
            }
        }

        // Override with environment variables
        config = config.add_source(
            config::Environment::with_prefix("HYD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
