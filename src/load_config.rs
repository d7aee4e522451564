//! `load_config` module: loads the optional YAML configuration into the
//! internal [`Config`] struct.
//!
//! This module is the only place where untrusted YAML is parsed and mapped
//! to typed internal structs.
//!
//! # Responsibilities
//! - Parse a user-supplied YAML configuration file into type-safe structs
//! - Provide baked-in defaults when no file is given
//! - Ensure robust error messages for CLI and tests: any failure in
//!   loading must result in clear diagnostics.
//!
//! Secrets never live in the file: the model API key is read from the
//! `GEMINI_API_KEY` environment variable (with `.env` support) at client
//! construction time.
//!
//! # Errors
//! All errors in this module use `anyhow::Error` for context-rich
//! diagnostics, and are surfaced at the CLI boundary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    /// Overrides the session state file location (also settable with
    /// `--state`).
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub model: String,
    pub image_model: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

/// Loads the YAML config file when a path is given; otherwise returns the
/// defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    info!(config_path = ?path, "loading configuration from file");

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path, "failed to read config file");
            return Err(anyhow::anyhow!("failed to read config file {path:?}: {e}"));
        }
    };

    match serde_yaml::from_str(&content) {
        Ok(config) => {
            info!(config_path = ?path, "parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "failed to parse config YAML");
            Err(anyhow::anyhow!("failed to parse config YAML: {e}"))
        }
    }
    .with_context(|| format!("loading configuration from {path:?}"))
}
