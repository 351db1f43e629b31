//! Config sections. Values stay as strings here; the CLI parses them with
//! the harmony types so errors name the offending value.

use serde::{Deserialize, Serialize};

/// Fallbacks for arguments the user leaves out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Tonic used when a subcommand's tonic is omitted.
    /// Default: C
    #[serde(default = "DefaultsConfig::default_tonic")]
    pub tonic: String,

    /// Scale type tag or alias.
    /// Default: ionian
    #[serde(default = "DefaultsConfig::default_mode")]
    pub mode: String,

    /// triad or tetrad.
    /// Default: triad
    #[serde(default = "DefaultsConfig::default_arity")]
    pub arity: String,

    /// Spelling for black-key tonics in key tables (sharp or flat).
    /// Default: sharp
    #[serde(default = "DefaultsConfig::default_prefer")]
    pub prefer: String,
}

impl DefaultsConfig {
    fn default_tonic() -> String {
        "C".to_string()
    }

    fn default_mode() -> String {
        "ionian".to_string()
    }

    fn default_arity() -> String {
        "triad".to_string()
    }

    fn default_prefer() -> String {
        "sharp".to_string()
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tonic: Self::default_tonic(),
            mode: Self::default_mode(),
            arity: Self::default_arity(),
            prefer: Self::default_prefer(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// text or json.
    /// Default: text
    #[serde(default = "OutputConfig::default_format")]
    pub format: String,

    /// Colorize text output.
    /// Default: true
    #[serde(default = "OutputConfig::default_color")]
    pub color: bool,
}

impl OutputConfig {
    fn default_format() -> String {
        "text".to_string()
    }

    fn default_color() -> bool {
        true
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
            color: Self::default_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive for the log subscriber (trace, debug, info, warn, error).
    /// Default: warn
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
