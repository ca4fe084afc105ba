use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the URL argument itself. Nothing has touched the disk or
/// the network when one of these is returned.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Missing repo URL argument")]
    MissingUrl,

    #[error("cannot derive a directory name from '{url}'")]
    UnnamedRepository { url: String },

    #[error("unsupported URL scheme '{scheme}' in '{url}' (expected http, https, git, ssh or file)")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("'{url}' looks like a command-line option, not a repository URL")]
    LooksLikeOption { url: String },
}

#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to inspect {}: {source}", .path.display())]
    Inspect { path: PathBuf, source: io::Error },

    #[error("destination path {} already exists and is not an empty directory", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to remove existing {}: {source}", .path.display())]
    Clear { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to launch {}: {source}", .program.display())]
    Spawn { program: PathBuf, source: io::Error },

    #[error("{}", failure_message(.code, .stderr))]
    Failed { code: Option<i32>, stderr: String },
}

fn failure_message(code: &Option<i32>, stderr: &str) -> String {
    if !stderr.is_empty() {
        return stderr.to_string();
    }

    match code {
        Some(code) => format!("git exited with status {}", code),
        None => "git was terminated by a signal".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum CloneError {
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Filesystem,
    Transport,
}

impl CloneError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CloneError::Filesystem(_) => ErrorKind::Filesystem,
            CloneError::Transport(_) => ErrorKind::Transport,
        }
    }
}
