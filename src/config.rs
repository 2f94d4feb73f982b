use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;

use crate::error::MisterError;

const DEFAULT_CONFIG_FILE: &str = "mister.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
struct FileConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    pub fallback_language: String,
    pub listen: String,
    pub portfolio_keys: Vec<String>,
    pub log: FileLogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
struct FileLogConfig {
    pub level: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: None,
            fallback_language: crate::i18n::FALLBACK_LANGUAGE.to_string(),
            listen: "127.0.0.1:9923".to_string(),
            portfolio_keys: Vec::new(),
            log: FileLogConfig::default(),
        }
    }
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub fallback_language: String,
    pub listen: String,
    /// `data-i18n` keys of the portfolio skeleton; empty means "every key in the bundle".
    pub portfolio_keys: Vec<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        build_config(FileConfig::default())
    }
}

impl AppConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Loads `mister.toml` (or the file named by `MISTER_CONFIG`). A missing
/// file yields defaults; `MISTER_BASE_URL` overrides the backend address.
pub fn load_config() -> Result<AppConfig, MisterError> {
    let path = env::var("MISTER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut cfg = if path.exists() {
        load_config_from(&path)?
    } else {
        AppConfig::default()
    };

    if let Ok(base_url) = env::var("MISTER_BASE_URL") {
        cfg.base_url = base_url;
    }
    Ok(cfg)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, MisterError> {
    if !path.is_file() {
        return Err(MisterError::Config(format!(
            "Config path is not a file: {}",
            path.display()
        )));
    }
    let s = fs::read_to_string(path)
        .map_err(|e| MisterError::Config(format!("{}: {}", path.display(), e)))?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<AppConfig, MisterError> {
    let cfg: FileConfig = toml::from_str(s).map_err(|e| MisterError::Config(e.to_string()))?;
    if cfg.base_url.trim().is_empty() {
        return Err(MisterError::Config("base_url must not be empty".into()));
    }
    Ok(build_config(cfg))
}

fn build_config(cfg: FileConfig) -> AppConfig {
    AppConfig {
        base_url: cfg.base_url.trim_end_matches('/').to_string(),
        timeout: cfg.timeout_secs.map(Duration::from_secs),
        fallback_language: cfg.fallback_language,
        listen: cfg.listen,
        portfolio_keys: cfg.portfolio_keys,
        log_level: cfg.log.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg = parse_config(
            r#"
            base_url = "http://mister.local:8080/"
            timeout_secs = 5
            fallback_language = "en"
            portfolio_keys = ["title", "about"]

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.base_url, "http://mister.local:8080");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
        assert_eq!(cfg.fallback_language, "en");
        assert_eq!(cfg.portfolio_keys, vec!["title", "about"]);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.listen, "127.0.0.1:9923");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.fallback_language, "es");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn rejects_blank_base_url() {
        assert!(matches!(
            parse_config(r#"base_url = "  ""#),
            Err(MisterError::Config(_))
        ));
    }
}
