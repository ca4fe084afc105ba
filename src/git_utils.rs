use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::TransportError;
use crate::models::{CloneOptions, CloneRequest};

/// Something that can materialize a remote repository into a local directory.
pub trait CloneBackend {
    fn clone_repo(
        &self,
        request: &CloneRequest,
        options: &CloneOptions,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Shells out to the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn build_command(&self, request: &CloneRequest, options: &CloneOptions) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("clone")
            .arg("--depth")
            .arg(options.depth.to_string())
            .arg("--single-branch")
            .arg("--")
            .arg(request.source_url())
            .arg(request.target_directory())
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl CloneBackend for GitCli {
    async fn clone_repo(
        &self,
        request: &CloneRequest,
        options: &CloneOptions,
    ) -> Result<(), TransportError> {
        let mut cmd = self.build_command(request, options);

        debug!(
            program = %self.program.display(),
            url = request.source_url(),
            path = %request.target_directory().display(),
            depth = options.depth.get(),
            "running git clone"
        );

        let output = cmd.output().await.map_err(|source| TransportError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransportError::Failed {
                code: output.status.code(),
                stderr: clean_git_stderr(&stderr),
            });
        }

        Ok(())
    }
}

/// Drop git's progress chatter so only the actual complaint remains, folded
/// onto one line.
fn clean_git_stderr(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("Cloning into"))
        .collect::<Vec<_>>()
        .join("; ")
}
