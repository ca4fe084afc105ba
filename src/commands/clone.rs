use std::io;
use std::path::Path;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::errors::{CloneError, FilesystemError};
use crate::git_utils::CloneBackend;
use crate::models::{CloneOptions, CloneOutcome, CloneRequest, ExistingPolicy};

/// State of the target directory before we touch it.
#[derive(Debug, PartialEq, Eq)]
enum TargetState {
    Absent,
    Empty,
    Occupied,
}

pub async fn run_clone<B: CloneBackend>(
    backend: &B,
    request: &CloneRequest,
    options: &CloneOptions,
) -> Result<CloneOutcome, CloneError> {
    let target = request.target_directory();

    let state = inspect_target(target).await?;
    debug!(path = %target.display(), ?state, "inspected clone target");

    if state == TargetState::Occupied {
        match options.on_existing {
            ExistingPolicy::Fail => {
                return Err(FilesystemError::AlreadyExists {
                    path: target.to_path_buf(),
                }
                .into());
            }
            ExistingPolicy::Skip => {
                info!(path = %target.display(), "target already populated, skipping");
                return Ok(CloneOutcome::Skipped {
                    url: request.source_url().to_string(),
                    target: target.to_path_buf(),
                });
            }
            ExistingPolicy::Overwrite => {
                info!(path = %target.display(), "removing existing target");
                clear_target(target).await?;
            }
        }
    }

    let created = state != TargetState::Empty;
    fs::create_dir_all(target)
        .await
        .map_err(|source| FilesystemError::CreateDir {
            path: target.to_path_buf(),
            source,
        })?;

    info!(url = request.source_url(), path = %target.display(), "cloning");

    if let Err(err) = backend.clone_repo(request, options).await {
        if created {
            if let Err(cleanup) = fs::remove_dir_all(target).await {
                warn!(path = %target.display(), error = %cleanup, "failed to remove directory after failed clone");
            }
        }
        return Err(err.into());
    }

    Ok(CloneOutcome::Cloned {
        url: request.source_url().to_string(),
        target: target.to_path_buf(),
    })
}

async fn inspect_target(target: &Path) -> Result<TargetState, FilesystemError> {
    let inspect_err = |source| FilesystemError::Inspect {
        path: target.to_path_buf(),
        source,
    };

    let metadata = match fs::symlink_metadata(target).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TargetState::Absent),
        Err(e) => return Err(inspect_err(e)),
    };

    if !metadata.is_dir() {
        return Ok(TargetState::Occupied);
    }

    let mut entries = fs::read_dir(target).await.map_err(inspect_err)?;
    match entries.next_entry().await.map_err(inspect_err)? {
        Some(_) => Ok(TargetState::Occupied),
        None => Ok(TargetState::Empty),
    }
}

async fn clear_target(target: &Path) -> Result<(), FilesystemError> {
    let metadata = fs::symlink_metadata(target)
        .await
        .map_err(|source| FilesystemError::Inspect {
            path: target.to_path_buf(),
            source,
        })?;

    let result = if metadata.is_dir() {
        fs::remove_dir_all(target).await
    } else {
        fs::remove_file(target).await
    };

    result.map_err(|source| FilesystemError::Clear {
        path: target.to_path_buf(),
        source,
    })
}
