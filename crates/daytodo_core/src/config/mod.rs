use crate::error::AppError;
use crate::storage::file_store::default_app_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "DAYTODO_CONFIG_PATH";

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name).as_deref() {
        Some("noir") => Palette {
            accent: "\x1b[38;5;208m",
            muted: "\x1b[38;5;244m",
            reset: "\x1b[0m",
        },
        Some("solarized") => Palette {
            accent: "\x1b[38;5;108m",
            muted: "\x1b[38;5;246m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            muted: "",
            reset: "",
        },
    }
}

pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let cleaned = canonical_key(raw);
    if cleaned.is_empty() {
        return Some("default".into());
    }

    match cleaned.as_str() {
        "vanilla" | "light" => Some("default".to_string()),
        "dark" | "dark_mode" | "darkmode" => Some("noir".to_string()),
        other => Some(other.to_string()),
    }
}

/// Lowercases and collapses every run of non-alphanumerics into one `_`.
pub fn canonical_key(raw: &str) -> String {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    cleaned.trim_matches('_').to_string()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub store_dir: Option<PathBuf>,
    pub theme: Option<String>,
    pub log_filter: Option<String>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(default_app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_config() -> Result<Config, AppError> {
    let path = config_path()?;
    load_config_from_path(&path)
}

/// Never fails: problems are returned beside a default config.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.and_then(|name| canonical_theme_name(&name));
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref().and_then(canonical_theme_name) {
        merged.theme = Some(theme);
    }
    if let Some(store_dir) = overrides.store_dir.as_ref() {
        merged.store_dir = Some(store_dir.clone());
    }
    if let Some(log_filter) = overrides.log_filter.as_ref() {
        merged.log_filter = Some(log_filter.clone());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, canonical_key, canonical_theme_name, load_config_from_path,
        load_config_with_fallback_from_path, merge_overrides, palette_for_theme,
    };
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_with_fallback_from_path(&dir.path().join("missing.json"));

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert_eq!(result.error.unwrap().code(), "invalid_data");
    }

    #[test]
    fn load_config_reads_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid-config.json");
        let content = serde_json::json!({
            "store_dir": "/tmp/daytodo",
            "theme": "Dark Mode",
            "log_filter": "daytodo_core=debug"
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();

        assert_eq!(loaded.store_dir, Some(PathBuf::from("/tmp/daytodo")));
        assert_eq!(loaded.theme.as_deref(), Some("noir"));
        assert_eq!(loaded.log_filter.as_deref(), Some("daytodo_core=debug"));
    }

    #[test]
    fn merge_overrides_replaces_only_given_fields() {
        let base = Config {
            store_dir: Some(PathBuf::from("/data")),
            theme: Some("default".into()),
            log_filter: None,
        };
        let overrides = ConfigOverrides {
            theme: Some("Solarized".into()),
            log_filter: Some("debug".into()),
            ..ConfigOverrides::default()
        };

        let merged = merge_overrides(&base, &overrides);

        assert_eq!(merged.store_dir, Some(PathBuf::from("/data")));
        assert_eq!(merged.theme.as_deref(), Some("solarized"));
        assert_eq!(merged.log_filter.as_deref(), Some("debug"));
        assert_eq!(base.theme.as_deref(), Some("default"));
    }

    #[test]
    fn merge_overrides_with_empty_overrides_returns_clone() {
        let base = Config {
            store_dir: None,
            theme: Some("noir".into()),
            log_filter: Some("info".into()),
        };

        assert_eq!(merge_overrides(&base, &ConfigOverrides::default()), base);
    }

    #[test]
    fn canonical_theme_name_maps_variants() {
        assert_eq!(canonical_theme_name("Vanilla"), Some("default".into()));
        assert_eq!(canonical_theme_name("Noir"), Some("noir".into()));
        assert_eq!(canonical_theme_name("dark-mode"), Some("noir".into()));
        assert_eq!(canonical_theme_name("  "), Some("default".into()));
    }

    #[test]
    fn canonical_key_collapses_separators() {
        assert_eq!(canonical_key(" Store-Dir "), "store_dir");
        assert_eq!(canonical_key("LOG__filter"), "log_filter");
        assert_eq!(canonical_key("--"), "");
    }

    #[test]
    fn palette_for_theme_returns_palette() {
        let default_palette = palette_for_theme(Some("vanilla"));
        assert!(default_palette.accent.is_empty());
        assert_eq!(default_palette.mutedize("done"), "done");

        let noir_palette = palette_for_theme(Some("noir"));
        assert_eq!(noir_palette.accent, "\x1b[38;5;208m");
        assert_eq!(noir_palette.mutedize("done"), "\x1b[38;5;244mdone\x1b[0m");

        assert!(palette_for_theme(Some("oceanic")).accent.is_empty());
        assert!(palette_for_theme(None).muted.is_empty());
    }
}
