//! # settle-config
//!
//! Layered configuration loading for settle using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SETTLE_*` prefix, `__` as separator)
//! 2. Project-level `.settle/config.toml`
//! 3. User-level `~/.config/settle/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SETTLE_HTTP__TIMEOUT_SECS` -> `http.timeout_secs`,
//! `SETTLE_PIPELINE__PRIMARY_URL` -> `pipeline.primary_url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use settle_config::SettleConfig;
//!
//! let config = SettleConfig::load_with_dotenv().expect("config");
//! println!("primary: {}", config.pipeline.primary_url);
//! ```

mod error;
mod general;
mod http;
mod pipeline;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use http::HttpConfig;
pub use pipeline::PipelineConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SettleConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SettleConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` into the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".settle/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SETTLE_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("settle").join("config.toml"))
    }
}
