use promlaunch_core::{ExitOutcome, LaunchError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{error, info};

/// How the child is started: where, and with which environment
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub env: Vec<(OsString, OsString)>,
    pub working_directory: PathBuf,
}

impl ProcessConfig {
    /// Run in `dir` with a copy of the current environment
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            env: snapshot_env(),
            working_directory: dir.as_ref().to_path_buf(),
        }
    }

    pub fn with_env(mut self, env: Vec<(OsString, OsString)>) -> Self {
        self.env = env;
        self
    }
}

/// Copy of this process's environment
pub fn snapshot_env() -> Vec<(OsString, OsString)> {
    std::env::vars_os().collect()
}

/// Look a program up on PATH. Diagnostics only; spawning resolves by name itself.
pub fn locate_executable(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Spawn `program` with stdio inherited, wait for it once, and report how it ended
pub async fn run_inherited(
    program: &str,
    args: &[String],
    config: &ProcessConfig,
) -> Result<ExitOutcome> {
    let mut child = Command::new(program)
        .args(args)
        .current_dir(&config.working_directory)
        .env_clear()
        .envs(config.env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| {
            error!(
                program = %program,
                on_path = ?locate_executable(program),
                error = %e,
                "Failed to spawn child process"
            );
            LaunchError::from_spawn(program, e)
        })?;

    info!(program = %program, pid = ?child.id(), "Child process spawned");

    let status = child
        .wait()
        .await
        .map_err(|source| LaunchError::Wait { source })?;
    let outcome = outcome_from_status(status);

    info!(program = %program, outcome = ?outcome, "Child process exited");

    Ok(outcome)
}

pub fn outcome_from_status(status: ExitStatus) -> ExitOutcome {
    if let Some(code) = status.code() {
        return ExitOutcome::Exited(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ExitOutcome::Signaled(signal);
        }
    }

    ExitOutcome::Unknown
}
