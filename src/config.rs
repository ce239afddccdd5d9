//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (built-in defaults when that file is absent) or an explicit `--config`
//! path (which must exist), then applies `CATALOG_LOG_LEVEL` and
//! `CATALOG_SEED_DEMO` env overrides.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// How the console renders listings and search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `ISBN: …, Title: …` line per record.
    #[default]
    Text,
    /// A JSON array of records.
    Json,
}

/// Catalog start-up configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Load the demonstration books and members before the console starts.
    pub seed_demo: bool,
}

/// Console (menu loop) configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub format: OutputFormat,
    /// Wait for Enter after each action before redrawing the menu.
    pub pause_after_action: bool,
    /// Print the welcome banner and genre list on start.
    pub banner: bool,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub catalog: CatalogConfig,
    pub console: ConsoleConfig,
}

/// Values that take precedence over the TOML file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub seed_demo: Option<bool>,
}

impl Overrides {
    /// Collect overrides from `CATALOG_LOG_LEVEL` and `CATALOG_SEED_DEMO`.
    pub fn from_env() -> Result<Self, AppError> {
        let seed_demo = match env::var("CATALOG_SEED_DEMO") {
            Ok(raw) => Some(parse_flag("CATALOG_SEED_DEMO", &raw)?),
            Err(_) => None,
        };
        Ok(Self {
            log_level: env::var("CATALOG_LOG_LEVEL").ok(),
            seed_demo,
        })
    }
}

/// Raw TOML shape, the `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    app: RawApp,
    #[serde(default)]
    catalog: RawCatalog,
    #[serde(default)]
    console: RawConsole,
}

#[derive(Deserialize)]
struct RawApp {
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize, Default)]
struct RawCatalog {
    #[serde(default)]
    seed_demo: bool,
}

#[derive(Deserialize)]
struct RawConsole {
    #[serde(default)]
    format: OutputFormat,
    #[serde(default = "default_true")]
    pause_after_action: bool,
    #[serde(default = "default_true")]
    banner: bool,
}

impl Default for RawApp {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

impl Default for RawConsole {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pause_after_action: true,
            banner: true,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("{name} must be a boolean, got '{other}'"))),
    }
}

/// Load config from `path` (or the default location), then apply env-var
/// overrides.
pub fn load(path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env()?;
    match path {
        Some(p) => load_from(Some(&expand_home(p)), &overrides),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            load_from(default.exists().then_some(default), &overrides)
        }
    }
}

/// Internal loader. Accepts an explicit path and overrides.
/// `None` means "no file": every setting takes its default.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: Option<&Path>, overrides: &Overrides) -> Result<Config, AppError> {
    let parsed: RawConfig = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            toml::from_str(&raw)
                .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?
        }
        None => RawConfig::default(),
    };

    Ok(Config {
        log_level: overrides.log_level.clone().unwrap_or(parsed.app.log_level),
        catalog: CatalogConfig {
            seed_demo: overrides.seed_demo.unwrap_or(parsed.catalog.seed_demo),
        },
        console: ConsoleConfig {
            format: parsed.console.format,
            pause_after_action: parsed.console.pause_after_action,
            banner: parsed.console.banner,
        },
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[app]
log_level = "debug"

[catalog]
seed_demo = true

[console]
format = "json"
pause_after_action = false
banner = false
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn no_file_gives_defaults() {
        let cfg = load_from(None, &Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "warn");
        assert!(!cfg.catalog.seed_demo);
        assert_eq!(cfg.console.format, OutputFormat::Text);
        assert!(cfg.console.pause_after_action);
        assert!(cfg.console.banner);
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(FULL_TOML);
        let cfg = load_from(Some(f.path()), &Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert!(cfg.catalog.seed_demo);
        assert_eq!(cfg.console.format, OutputFormat::Json);
        assert!(!cfg.console.pause_after_action);
        assert!(!cfg.console.banner);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let f = write_toml("");
        let cfg = load_from(Some(f.path()), &Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "warn");
        assert!(cfg.console.banner);
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        let f = write_toml("[console]\nformat = \"yaml\"\n");
        let msg = load_from(Some(f.path()), &Overrides::default()).unwrap_err().to_string();
        assert!(msg.contains("parse error"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Some(Path::new("/nonexistent/config.toml")), &Overrides::default());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn overrides_win_over_file() {
        let f = write_toml(FULL_TOML);
        let overrides = Overrides {
            log_level: Some("trace".into()),
            seed_demo: Some(false),
        };
        let cfg = load_from(Some(f.path()), &overrides).unwrap();
        assert_eq!(cfg.log_level, "trace");
        assert!(!cfg.catalog.seed_demo);
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("X", "TRUE").unwrap());
        assert!(parse_flag("X", " 1 ").unwrap());
        assert!(!parse_flag("X", "off").unwrap());
        assert!(parse_flag("X", "maybe").is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/catalog.toml");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with("catalog.toml"));
    }

    #[test]
    fn relative_path_unchanged() {
        assert_eq!(expand_home("config/other.toml"), PathBuf::from("config/other.toml"));
    }
}
