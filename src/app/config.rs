use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_ENDPOINT_BASE_URL, DEFAULT_ENDPOINT_PATH, DEFAULT_MAX_UPLOAD_BYTES, DEMO_LATENCY_MS,
};
use crate::widget::Mode;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Verification endpoint
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Engine selection
    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Input collection limits
    #[serde(default)]
    pub input: InputConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Where verification requests are sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Scheme, host and port of the verification service
    pub base_url: String,
    /// Path of the submission endpoint
    pub path: String,
    /// Optional client-side timeout; unset leaves latency to the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT_BASE_URL.to_string(),
            path: DEFAULT_ENDPOINT_PATH.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl EndpointConfig {
    /// Full submission URL
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Verification engine selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// "http" or "demo"
    pub backend: String,
    /// Simulated latency of the demo engine
    pub demo_latency_ms: u64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            demo_latency_ms: DEMO_LATENCY_MS,
        }
    }
}

/// Input collection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Largest image or audio file accepted for selection
    pub max_upload_bytes: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIConfig {
    /// Color theme ("dark" or "light")
    pub theme: String,
    /// Mode selected when the widget opens
    pub default_mode: Mode,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            default_mode: Mode::default(),
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(".checkmate/config.toml");
    load_config_from(&[global_config, local_config])
}

/// Layer defaults, the given TOML files (later wins) and CHECKMATE_ env vars
pub fn load_config_from(files: &[PathBuf]) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    for file in files {
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
    }

    // CHECKMATE_ENDPOINT__BASE_URL -> endpoint.base_url
    figment = figment.merge(Env::prefixed("CHECKMATE_").split("__"));

    figment.extract().context("Failed to load configuration")
}

/// Load a single explicit configuration file on top of the defaults
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file {} does not exist", path.display());
    }
    load_config_from(&[path.to_path_buf()])
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "checkmate") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("checkmate");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Where the interactive UI writes its log file
pub fn get_log_path() -> Result<PathBuf> {
    let dir = match ProjectDirs::from("", "", "checkmate") {
        Some(proj_dirs) => proj_dirs.data_local_dir().to_path_buf(),
        None => get_config_dir()?,
    };
    Ok(dir.join("checkmate.log"))
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    // Create example local config
    let local_example = PathBuf::from(".checkmate/config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# Checkmate Project Configuration
# This file overrides global settings for this directory

[endpoint]
base_url = "http://127.0.0.1:5000"
path = "/api/predict"
# request_timeout_secs = 60

[verifier]
backend = "http"   # or "demo" for canned offline verdicts

[ui]
theme = "dark"
default_mode = "text"
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint.endpoint_url(), "http://127.0.0.1:5000/api/predict");
        assert_eq!(config.endpoint.request_timeout_secs, None);
        assert_eq!(config.verifier.backend, "http");
        assert_eq!(config.ui.default_mode, Mode::Text);
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        std::fs::write(
            &global,
            "[endpoint]\nbase_url = \"http://verify.internal:8080\"\npath = \"/predict\"\n",
        )
        .unwrap();
        std::fs::write(&local, "[ui]\ntheme = \"light\"\ndefault_mode = \"audio\"\n").unwrap();

        let config = load_config_from(&[global, local, dir.path().join("missing.toml")]).unwrap();
        assert_eq!(config.endpoint.endpoint_url(), "http://verify.internal:8080/predict");
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.ui.default_mode, Mode::Audio);
        assert_eq!(config.verifier, VerifierConfig::default());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.verifier.backend = "demo".to_string();
        config.endpoint.request_timeout_secs = Some(30);

        save_config(&config, Some(path.clone())).unwrap();
        assert_eq!(load_config_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_config_file(&dir.path().join("nope.toml")).is_err());
    }
}
