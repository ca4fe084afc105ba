use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::cli::Cli;
use crate::models::{CloneOptions, ExistingPolicy};

pub const DEFAULT_CONFIG_FILE: &str = "clone.toml";

/// Contents of `clone.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CloneConfig {
    pub root: Option<PathBuf>,
    pub depth: Option<u32>,
    pub on_existing: Option<ExistingPolicy>,
    pub git_program: Option<PathBuf>,
}

/// Load the config file named on the command line, or `clone.toml` in the
/// working directory if present. An explicit path that doesn't exist is an
/// error; a missing default file is not.
pub fn load_clone_config(explicit: Option<&Path>) -> Result<CloneConfig> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                return Ok(CloneConfig::default());
            }
            default_path
        }
    };

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: CloneConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse TOML from: {}", config_path.display()))?;

    Ok(config)
}

/// Command line beats config file beats built-in defaults.
pub fn resolve_options(cli: &Cli, config: CloneConfig) -> Result<CloneOptions> {
    let defaults = CloneOptions::default();

    let depth = match cli.depth.or(config.depth) {
        Some(depth) => NonZeroU32::new(depth)
            .ok_or_else(|| anyhow!("depth must be at least 1"))?,
        None => defaults.depth,
    };

    Ok(CloneOptions {
        root: cli.root.clone().or(config.root).unwrap_or(defaults.root),
        depth,
        on_existing: cli
            .on_existing
            .or(config.on_existing)
            .unwrap_or(defaults.on_existing),
        git_program: cli
            .git
            .clone()
            .or(config.git_program)
            .unwrap_or(defaults.git_program),
    })
}
