//! Configuration loading and parsing
//!
//! TOML configuration for replay runs: which vehicle profile to load (and
//! its parameter flags), optional threshold overrides, and input/output
//! paths. Everything the quick command-line flags cover can also be pinned
//! down in a config file for repeatable conformance runs.

use anyhow::{Context, Result};
use can_safety_core::{ProfileId, Thresholds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub profile: ProfileConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Vehicle tuning overrides; omitted fields keep the profile defaults
    pub thresholds: Option<Thresholds>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub name: ProfileId,
    /// Raw profile parameter word (sub-mode flags, e.g. alternate wiring)
    #[serde(default)]
    pub flags: u16,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// JSON-Lines trace of decoded frames
    pub trace: Option<PathBuf>,
    /// Stop after this many trace records
    pub max_frames: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Report destination (stdout when omitted)
    pub report: Option<PathBuf>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
