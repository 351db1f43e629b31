//! Effective settings: command-line flags first, then configuration.

use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

use anyhow::{Context, Result};
use harmony::{Arity, EnharmonicPreference, Note, ScaleType};
use tonaliaconf::TonaliaConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format: {} (expected text or json)", s)),
        }
    }
}

/// Global flags after clap parsing; `None` defers to configuration.
#[derive(Debug, Default)]
pub struct GlobalFlags {
    pub format: Option<OutputFormat>,
    pub prefer: Option<EnharmonicPreference>,
    pub no_color: bool,
}

/// Resolves each setting on demand, so a bad configured value only fails
/// the commands that actually need it.
#[derive(Debug)]
pub struct Settings {
    config: TonaliaConfig,
    flags: GlobalFlags,
}

impl Settings {
    pub fn new(config: TonaliaConfig, flags: GlobalFlags) -> Self {
        Self { config, flags }
    }

    pub fn config(&self) -> &TonaliaConfig {
        &self.config
    }

    /// Tonic respelled for the enharmonic preference.
    ///
    /// A `--prefer` flag respells any tonic. The configured preference only
    /// respells the configured default tonic, so `scale C#` stays C# unless
    /// the flag asks otherwise.
    pub fn tonic(&self, flag: Option<Note>) -> Result<Note> {
        match flag {
            Some(note) => Ok(match self.flags.prefer {
                Some(prefer) => note.with_preference(prefer),
                None => note,
            }),
            None => {
                let note: Note = resolve(None, &self.config.defaults.tonic, "defaults.tonic")?;
                Ok(note.with_preference(self.prefer()?))
            }
        }
    }

    pub fn mode(&self, flag: Option<ScaleType>) -> Result<ScaleType> {
        resolve(flag, &self.config.defaults.mode, "defaults.mode")
    }

    pub fn arity(&self, flag: Option<Arity>) -> Result<Arity> {
        resolve(flag, &self.config.defaults.arity, "defaults.arity")
    }

    pub fn prefer(&self) -> Result<EnharmonicPreference> {
        resolve(self.flags.prefer, &self.config.defaults.prefer, "defaults.prefer")
    }

    pub fn format(&self) -> Result<OutputFormat> {
        match self.flags.format {
            Some(format) => Ok(format),
            None => self
                .config
                .output
                .format
                .parse()
                .map_err(anyhow::Error::msg)
                .context("invalid output.format in configuration"),
        }
    }

    /// Color only when enabled everywhere and stdout is a terminal.
    pub fn color(&self) -> bool {
        !self.flags.no_color && self.config.output.color && std::io::stdout().is_terminal()
    }
}

fn resolve<T>(flag: Option<T>, configured: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match flag {
        Some(value) => Ok(value),
        None => configured
            .parse()
            .with_context(|| format!("invalid {} in configuration", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_win_over_config() {
        let mut config = TonaliaConfig::default();
        config.defaults.mode = "locrian".to_string();
        let settings = Settings::new(config, GlobalFlags::default());

        assert_eq!(settings.mode(None).unwrap(), ScaleType::Locrian);
        assert_eq!(settings.mode(Some(ScaleType::Dorian)).unwrap(), ScaleType::Dorian);
    }

    #[test]
    fn test_bad_config_value_names_the_key() {
        let mut config = TonaliaConfig::default();
        config.defaults.tonic = "H".to_string();
        config.output.format = "yaml".to_string();
        let settings = Settings::new(config, GlobalFlags::default());

        let err = settings.tonic(None).unwrap_err();
        assert!(format!("{:#}", err).contains("defaults.tonic"));
        assert_eq!(settings.tonic(Some(Note::E)).unwrap(), Note::E);

        let err = settings.format().unwrap_err();
        assert!(format!("{:#}", err).contains("yaml"));
    }

    #[test]
    fn test_configured_tonic_follows_preference() {
        let mut config = TonaliaConfig::default();
        config.defaults.tonic = "C#".to_string();
        config.defaults.prefer = "flat".to_string();
        let settings = Settings::new(config, GlobalFlags::default());

        assert_eq!(settings.tonic(None).unwrap(), Note::DFlat);
        // Explicit tonic is left alone without the flag
        assert_eq!(settings.tonic(Some(Note::CSharp)).unwrap(), Note::CSharp);
    }

    #[test]
    fn test_prefer_flag_respells_explicit_tonic() {
        let flags = GlobalFlags {
            prefer: Some(EnharmonicPreference::Sharp),
            ..Default::default()
        };
        let settings = Settings::new(TonaliaConfig::default(), flags);

        assert_eq!(settings.tonic(Some(Note::BFlat)).unwrap(), Note::ASharp);
        assert_eq!(settings.tonic(Some(Note::E)).unwrap(), Note::E);
    }

    #[test]
    fn test_no_color_flag() {
        let flags = GlobalFlags {
            no_color: true,
            ..Default::default()
        };
        let settings = Settings::new(TonaliaConfig::default(), flags);
        assert!(!settings.color());
    }
}
