//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, TonaliaConfig};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Config files in load order: system, user, then local or `cli_path`.
///
/// If `cli_path` is provided it replaces the local `tonalia.toml`. Unlike
/// the standard locations it is returned even when missing, so a typo in
/// `--config` is reported instead of silently ignored. A leading `~`
/// expands to the home directory, which covers `--config=~/x.toml` where
/// the shell leaves the tilde alone.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/tonalia/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("tonalia/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(expand_home(path));
        return files;
    }

    let local = PathBuf::from("tonalia.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a TOML file and layer its values over `config`.
pub fn load_from_file(config: &mut TonaliaConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    apply_toml(config, &contents, path)
}

/// Layer the keys present in `contents` over `config`. Absent keys keep
/// whatever earlier layers set.
pub(crate) fn apply_toml(
    config: &mut TonaliaConfig,
    contents: &str,
    path: &Path,
) -> Result<(), ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(defaults) = section(&table, "defaults", path)? {
        if let Some(v) = string_key(defaults, "tonic", path)? {
            config.defaults.tonic = v;
        }
        if let Some(v) = string_key(defaults, "mode", path)? {
            config.defaults.mode = v;
        }
        if let Some(v) = string_key(defaults, "arity", path)? {
            config.defaults.arity = v;
        }
        if let Some(v) = string_key(defaults, "prefer", path)? {
            config.defaults.prefer = v;
        }
    }

    if let Some(output) = section(&table, "output", path)? {
        if let Some(v) = string_key(output, "format", path)? {
            config.output.format = v;
        }
        if let Some(v) = output.get("color") {
            config.output.color = v.as_bool().ok_or_else(|| ConfigError::Parse {
                path: path.to_path_buf(),
                message: "output.color must be a boolean".to_string(),
            })?;
        }
    }

    if let Some(telemetry) = section(&table, "telemetry", path)? {
        if let Some(v) = string_key(telemetry, "log_level", path)? {
            config.telemetry.log_level = v;
        }
    }

    Ok(())
}

fn section<'a>(
    table: &'a toml::Table,
    name: &str,
    path: &Path,
) -> Result<Option<&'a toml::Table>, ConfigError> {
    match table.get(name) {
        None => Ok(None),
        Some(value) => value.as_table().map(Some).ok_or_else(|| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("[{}] must be a table", name),
        }),
    }
}

fn string_key(table: &toml::Table, key: &str, path: &Path) -> Result<Option<String>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ConfigError::Parse {
                path: path.to_path_buf(),
                message: format!("{} must be a string", key),
            }),
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut TonaliaConfig, sources: &mut ConfigSources) {
    apply_overrides_from(config, sources, |key| env::var(key).ok());
}

/// Apply overrides from any variable lookup; `apply_env_overrides` passes
/// the process environment.
pub fn apply_overrides_from(
    config: &mut TonaliaConfig,
    sources: &mut ConfigSources,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let mut set = |key: &str, target: &mut String| {
        if let Some(v) = lookup(key) {
            *target = v;
            sources.env_overrides.push(key.to_string());
        }
    };

    set("TONALIA_TONIC", &mut config.defaults.tonic);
    set("TONALIA_MODE", &mut config.defaults.mode);
    set("TONALIA_ARITY", &mut config.defaults.arity);
    set("TONALIA_PREFER", &mut config.defaults.prefer);
    set("TONALIA_FORMAT", &mut config.output.format);
    set("TONALIA_LOG_LEVEL", &mut config.telemetry.log_level);
    // Also support RUST_LOG
    set("RUST_LOG", &mut config.telemetry.log_level);

    if let Some(enabled) = lookup("TONALIA_COLOR").as_deref().and_then(parse_bool) {
        config.output.color = enabled;
        sources.env_overrides.push("TONALIA_COLOR".to_string());
    }
    // https://no-color.org: any non-empty value disables color
    if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        config.output.color = false;
        sources.env_overrides.push("NO_COLOR".to_string());
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Resolve a leading `~` against the home directory. Other paths,
/// including `$VAR` forms, are taken literally.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match directories::BaseDirs::new() {
            Some(dirs) => dirs.home_dir().join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_expand_home_tilde() {
        let expanded = expand_home(Path::new("~/music/tonalia.toml"));
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("music/tonalia.toml"));
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(
            expand_home(Path::new("/absolute/path")),
            PathBuf::from("/absolute/path")
        );
        assert_eq!(
            expand_home(Path::new("$HOME/tonalia.toml")),
            PathBuf::from("$HOME/tonalia.toml")
        );
        assert_eq!(
            expand_home(Path::new("~other/tonalia.toml")),
            PathBuf::from("~other/tonalia.toml")
        );
    }

    #[test]
    fn test_cli_override_expands_home() {
        let files = discover_config_files_with_override(Some(Path::new("~/tonalia-alt.toml")));
        let last = files.last().unwrap();
        assert!(last.is_absolute() || directories::BaseDirs::new().is_none());
        assert!(last.ends_with("tonalia-alt.toml"));
    }

    #[test]
    fn test_cli_override_is_kept_even_if_missing() {
        let files = discover_config_files_with_override(Some(Path::new("/no/such/tonalia.toml")));
        assert_eq!(files.last(), Some(&PathBuf::from("/no/such/tonalia.toml")));
    }

    #[test]
    fn test_apply_minimal_toml() {
        let toml = r#"
[defaults]
mode = "dorian"
"#;
        let mut config = TonaliaConfig::default();
        apply_toml(&mut config, toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.defaults.mode, "dorian");
        // Other values should be defaults
        assert_eq!(config.defaults.tonic, "C");
        assert_eq!(config.output.format, "text");
        assert!(config.output.color);
    }

    #[test]
    fn test_apply_full_toml() {
        let toml = r#"
[defaults]
tonic = "Eb"
mode = "harmonicMinor"
arity = "tetrad"
prefer = "flat"

[output]
format = "json"
color = false

[telemetry]
log_level = "debug"
"#;
        let mut config = TonaliaConfig::default();
        apply_toml(&mut config, toml, Path::new("test.toml")).unwrap();

        assert_eq!(config.defaults.tonic, "Eb");
        assert_eq!(config.defaults.mode, "harmonicMinor");
        assert_eq!(config.defaults.arity, "tetrad");
        assert_eq!(config.defaults.prefer, "flat");
        assert_eq!(config.output.format, "json");
        assert!(!config.output.color);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_later_layer_can_restore_default_value() {
        let mut config = TonaliaConfig::default();
        apply_toml(&mut config, "[defaults]\nmode = \"lydian\"\n", Path::new("a.toml")).unwrap();
        apply_toml(&mut config, "[defaults]\nmode = \"ionian\"\n", Path::new("b.toml")).unwrap();
        assert_eq!(config.defaults.mode, "ionian");
    }

    #[test]
    fn test_wrong_value_type_is_a_parse_error() {
        let mut config = TonaliaConfig::default();
        let err = apply_toml(&mut config, "[output]\ncolor = \"yes\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == Path::new("bad.toml")));

        let err = apply_toml(&mut config, "defaults = 3\n", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("[defaults] must be a table"));
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let mut config = TonaliaConfig::default();
        let err = apply_toml(&mut config, "[defaults\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env = env_of(&[
            ("TONALIA_TONIC", "F#"),
            ("TONALIA_MODE", "locrian"),
            ("TONALIA_COLOR", "off"),
            ("TONALIA_LOG_LEVEL", "info"),
        ]);
        let mut config = TonaliaConfig::default();
        let mut sources = ConfigSources::default();
        apply_overrides_from(&mut config, &mut sources, |k| env.get(k).cloned());

        assert_eq!(config.defaults.tonic, "F#");
        assert_eq!(config.defaults.mode, "locrian");
        assert!(!config.output.color);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            sources.env_overrides,
            ["TONALIA_TONIC", "TONALIA_MODE", "TONALIA_LOG_LEVEL", "TONALIA_COLOR"]
        );
    }

    #[test]
    fn test_rust_log_wins_over_tonalia_log_level() {
        let env = env_of(&[("TONALIA_LOG_LEVEL", "info"), ("RUST_LOG", "harmony=trace")]);
        let mut config = TonaliaConfig::default();
        let mut sources = ConfigSources::default();
        apply_overrides_from(&mut config, &mut sources, |k| env.get(k).cloned());
        assert_eq!(config.telemetry.log_level, "harmony=trace");
    }

    #[test]
    fn test_no_color_and_bad_bool() {
        let env = env_of(&[("TONALIA_COLOR", "maybe"), ("NO_COLOR", "1")]);
        let mut config = TonaliaConfig::default();
        let mut sources = ConfigSources::default();
        apply_overrides_from(&mut config, &mut sources, |k| env.get(k).cloned());
        assert!(!config.output.color);
        assert_eq!(sources.env_overrides, ["NO_COLOR"]);
    }
}
