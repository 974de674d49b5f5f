use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CompareOptions;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub topics: Option<TopicsConfig>,
    pub comparison: Option<ComparisonConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// Overrides the built-in topic list, preserving the given order.
    pub list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub excerpt_window_chars: Option<usize>,
    pub unchanged_threshold: Option<f64>,
    pub moderate_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub max_upload_mb: Option<u32>,
}

impl ConfigFile {
    /// Topic list in effect: configured list, or the built-in default.
    pub fn effective_topics(&self) -> Vec<String> {
        self.topics
            .as_ref()
            .and_then(|t| t.list.clone())
            .unwrap_or_else(crate::default_topics)
    }

    /// Comparator options in effect: configured values over defaults.
    pub fn effective_options(&self) -> CompareOptions {
        let defaults = CompareOptions::default();
        let section = self.comparison.as_ref();
        CompareOptions {
            excerpt_window_chars: section
                .and_then(|c| c.excerpt_window_chars)
                .unwrap_or(defaults.excerpt_window_chars),
            unchanged_threshold: section
                .and_then(|c| c.unchanged_threshold)
                .unwrap_or(defaults.unchanged_threshold),
            moderate_threshold: section
                .and_then(|c| c.moderate_threshold)
                .unwrap_or(defaults.moderate_threshold),
        }
    }
}

/// Platform config directory path: `<config_dir>/polidiff/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("polidiff").join("config.toml"))
}

/// Load config by cascading CWD `.polidiff.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".polidiff.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        topics: Some(TopicsConfig {
            list: overlay
                .topics
                .as_ref()
                .and_then(|t| t.list.clone())
                .or_else(|| base.topics.as_ref().and_then(|t| t.list.clone())),
        }),
        comparison: Some(ComparisonConfig {
            excerpt_window_chars: overlay
                .comparison
                .as_ref()
                .and_then(|c| c.excerpt_window_chars)
                .or_else(|| {
                    base.comparison
                        .as_ref()
                        .and_then(|c| c.excerpt_window_chars)
                }),
            unchanged_threshold: overlay
                .comparison
                .as_ref()
                .and_then(|c| c.unchanged_threshold)
                .or_else(|| base.comparison.as_ref().and_then(|c| c.unchanged_threshold)),
            moderate_threshold: overlay
                .comparison
                .as_ref()
                .and_then(|c| c.moderate_threshold)
                .or_else(|| base.comparison.as_ref().and_then(|c| c.moderate_threshold)),
        }),
        server: Some(ServerConfig {
            port: overlay
                .server
                .as_ref()
                .and_then(|s| s.port)
                .or_else(|| base.server.as_ref().and_then(|s| s.port)),
            max_upload_mb: overlay
                .server
                .as_ref()
                .and_then(|s| s.max_upload_mb)
                .or_else(|| base.server.as_ref().and_then(|s| s.max_upload_mb)),
        }),
    }
}

/// Save the current config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Serialize a config as TOML and write it to `path`, creating parent
/// directories as needed.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}
