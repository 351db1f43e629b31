//! Layered configuration for the tonalia CLI.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/tonalia/config.toml` (system)
//! 2. `~/.config/tonalia/config.toml` (user)
//! 3. `./tonalia.toml` (local override, replaced by `--config <path>`)
//! 4. Environment variables (`TONALIA_*`, `RUST_LOG`, `NO_COLOR`)
//!
//! # Example Config
//!
//! ```toml
//! [defaults]
//! tonic = "C"
//! mode = "ionian"
//! arity = "triad"
//! prefer = "sharp"
//!
//! [output]
//! format = "text"
//! color = true
//!
//! [telemetry]
//! log_level = "warn"
//! ```

pub mod loader;
pub mod sections;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use sections::{DefaultsConfig, OutputConfig, TelemetryConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete tonalia configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TonaliaConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl TonaliaConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration and return information about sources.
    ///
    /// If `config_path` is provided, it takes precedence over the local
    /// `./tonalia.toml`. System and user configs still load first.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let files = loader::discover_config_files_with_override(config_path);
        let (mut config, mut sources) = Self::from_files(&files)?;

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Layer the given files over the defaults, in order, without
    /// consulting the environment.
    pub fn from_files(files: &[PathBuf]) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = TonaliaConfig::default();

        for path in files {
            loader::load_from_file(&mut config, path)?;
            sources.files.push(path.clone());
        }

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Build TOML manually for nicer formatting
        let mut output = String::new();

        output.push_str("# tonalia configuration\n\n");

        output.push_str("[defaults]\n");
        output.push_str(&format!("tonic = {}\n", quoted(&self.defaults.tonic)));
        output.push_str(&format!("mode = {}\n", quoted(&self.defaults.mode)));
        output.push_str(&format!("arity = {}\n", quoted(&self.defaults.arity)));
        output.push_str(&format!("prefer = {}\n", quoted(&self.defaults.prefer)));

        output.push_str("\n[output]\n");
        output.push_str(&format!("format = {}\n", quoted(&self.output.format)));
        output.push_str(&format!("color = {}\n", self.output.color));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!("log_level = {}\n", quoted(&self.telemetry.log_level)));

        output
    }
}

/// Render a TOML basic string with proper escaping.
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
