use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration from `.heft.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provision: ProvisionConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// How the disposable environment gets built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// Base interpreter used to create the virtualenv.
    #[serde(default = "default_python")]
    pub python: String,
}

fn default_python() -> String {
    "python3".to_string()
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
        }
    }
}

/// Suffix sets and comment syntax for file classification and line counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default = "default_binary_extensions")]
    pub binary_extensions: Vec<String>,
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

fn default_source_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_binary_extensions() -> Vec<String> {
    vec!["so".to_string()]
}

fn default_comment_prefix() -> String {
    "#".to_string()
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            source_extensions: default_source_extensions(),
            binary_extensions: default_binary_extensions(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

/// Column widths for the text report tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_package_width")]
    pub package_width: usize,
    #[serde(default = "default_file_width")]
    pub file_width: usize,
    #[serde(default = "default_size_width")]
    pub size_width: usize,
}

fn default_package_width() -> usize {
    30
}

fn default_file_width() -> usize {
    80
}

fn default_size_width() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            package_width: default_package_width(),
            file_width: default_file_width(),
            size_width: default_size_width(),
        }
    }
}

impl Config {
    /// Load configuration from a `.heft.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse '{}'", path.display()))?;
        Ok(config)
    }

    /// Load from `.heft.toml` in the given directory or any ancestor, or return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = start.as_path();
        loop {
            let config_path = current.join(".heft.toml");
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!(
                            "Warning: failed to load config from '{}': {e:#}. Using defaults.",
                            config_path.display()
                        );
                        Self::default()
                    }
                };
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Self::default()
    }
}
