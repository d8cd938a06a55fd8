use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;

/// Which kind of command starts the server
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunnerKind {
    /// A package-manager runner (`uv run python ...`), chosen when the marker file exists
    PackageManagerRunner,
    /// A bare interpreter (`python3 ...`), used otherwise
    DirectInterpreter,
}

impl std::fmt::Display for RunnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerKind::PackageManagerRunner => write!(f, "package-manager-runner"),
            RunnerKind::DirectInterpreter => write!(f, "direct-interpreter"),
        }
    }
}

/// Everything needed to spawn the child, decided before anything runs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LaunchPlan {
    pub kind: RunnerKind,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Copy of the launcher's environment at planning time
    #[serde(skip)]
    pub env: Vec<(OsString, OsString)>,
}

impl LaunchPlan {
    /// Program and arguments joined for display
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How the child process ended
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(i32),
    Unknown,
}

impl ExitOutcome {
    /// Code the launcher itself should exit with
    pub fn exit_code(&self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => *code,
            ExitOutcome::Signaled(signal) => 128 + signal,
            ExitOutcome::Unknown => 1,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}

/// Launcher lifecycle, strictly in declaration order
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum LaunchPhase {
    Start,
    RunnerSelected,
    ChildSpawned,
    Terminated,
}
