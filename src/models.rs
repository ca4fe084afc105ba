use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::errors::InputError;
use crate::utils::repo_dir_name;
use crate::validation::validate_repo_url;

pub const DEFAULT_ROOT: &str = "models";
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// What to do when the target directory already holds something.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExistingPolicy {
    #[default]
    Fail,
    Overwrite,
    Skip,
}

/// Resolved settings for a single clone.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    pub root: PathBuf,
    pub depth: NonZeroU32,
    pub on_existing: ExistingPolicy,
    pub git_program: PathBuf,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            depth: NonZeroU32::MIN,
            on_existing: ExistingPolicy::Fail,
            git_program: PathBuf::from(DEFAULT_GIT_PROGRAM),
        }
    }
}

/// A repository URL paired with the directory it will be cloned into.
///
/// The target is always a direct child of the root it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    source_url: String,
    target_directory: PathBuf,
}

impl CloneRequest {
    pub fn new(source_url: &str, root: &Path) -> Result<Self, InputError> {
        let source_url = source_url.trim();
        validate_repo_url(source_url)?;
        let name = repo_dir_name(source_url)?;

        Ok(Self {
            source_url: source_url.to_string(),
            target_directory: root.join(name),
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn target_directory(&self) -> &Path {
        &self.target_directory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CloneOutcome {
    Cloned { url: String, target: PathBuf },
    Skipped { url: String, target: PathBuf },
}

impl CloneOutcome {
    /// The single human-readable line printed on stdout.
    pub fn summary(&self) -> String {
        match self {
            CloneOutcome::Cloned { url, target } => {
                format!("Cloned {} into {}", url, target.display())
            }
            CloneOutcome::Skipped { url, target } => {
                format!("Skipped {}: {} already exists", url, target.display())
            }
        }
    }
}
