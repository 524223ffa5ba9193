//! User configuration for mindcheck.
//!
//! Read from `$XDG_CONFIG_HOME/mindcheck/config.toml` (falling back to
//! `~/.config/mindcheck/config.toml`). Every key is optional; a missing file
//! means defaults. `MINDCHECK_API_URL` and `MINDCHECK_THEME` override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("config parse error in {path:?}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the prediction/chat service.
    pub api_base_url: String,
    /// Upper bound for a single request, in seconds.
    pub request_timeout_secs: u64,
    /// Theme name, see `Theme::from_name`.
    pub theme: String,
    /// Log file location; `None` means the XDG state directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_secs: 30,
            theme: DEFAULT_THEME.to_owned(),
            log_file: None,
        }
    }
}

impl Config {
    /// Loads the config at `path`. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// `ConfigError::Read` for I/O failures other than "not found",
    /// `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path: path.to_owned(), source }),
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }

    /// Applies environment overrides, reading variables through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("MINDCHECK_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(theme) = lookup("MINDCHECK_THEME").filter(|v| !v.trim().is_empty()) {
            self.theme = theme;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Resolved log file path.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| xdg_dir("XDG_STATE_HOME", ".local/state").join("mindcheck.log"))
    }
}

/// Returns the path to the mindcheck config file.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("config.toml")
}

/// `$<var>/mindcheck`, falling back to `~/<home_fallback>/mindcheck`.
fn xdg_dir(var: &str, home_fallback: &str) -> PathBuf {
    let base = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(home_fallback)))
        .unwrap_or_else(|| PathBuf::from(home_fallback));
    base.join("mindcheck")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base_url, "http://localhost:5001");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config("api_base_url = \"http://10.0.0.5:8080\"\ntheme = \"dark\"\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:8080");
        assert_eq!(config.theme, "dark");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("api_base_url = [");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));

        let file = write_config("colour = \"blue\"\n");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn env_overrides_win_over_file() {
        let config = Config::default().with_env_overrides(|key| match key {
            "MINDCHECK_API_URL" => Some("http://predict.internal".into()),
            "MINDCHECK_THEME" => Some("   ".into()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "http://predict.internal");
        assert_eq!(config.theme, DEFAULT_THEME, "blank override is ignored");
    }

    #[test]
    fn explicit_log_file_is_used() {
        let config = Config { log_file: Some("/tmp/mc.log".into()), ..Config::default() };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/mc.log"));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = Config { request_timeout_secs: 0, ..Config::default() };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
