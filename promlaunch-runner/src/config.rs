use promlaunch_core::{LaunchError, Result};
use std::path::{Path, PathBuf};

/// Descriptor whose presence selects the package-manager runner
pub const DEFAULT_MARKER_FILE: &str = "pyproject.toml";
pub const DEFAULT_RUNNER_PROGRAM: &str = "uv";
pub const DEFAULT_INTERPRETER_PROGRAM: &str = "python3";
/// Server entry point, relative to the installation directory
pub const DEFAULT_SCRIPT: &str = "src/prometheus_mcp_server/server.py";

/// Where the launcher lives and what it starts
#[derive(Debug, Clone, PartialEq)]
pub struct LauncherConfig {
    pub install_dir: PathBuf,
    pub marker_file: String,
    pub runner_program: String,
    pub interpreter_program: String,
    pub script: String,
}

impl LauncherConfig {
    pub fn new<P: AsRef<Path>>(install_dir: P) -> Self {
        Self {
            install_dir: install_dir.as_ref().to_path_buf(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            runner_program: DEFAULT_RUNNER_PROGRAM.to_string(),
            interpreter_program: DEFAULT_INTERPRETER_PROGRAM.to_string(),
            script: DEFAULT_SCRIPT.to_string(),
        }
    }

    /// Use the directory containing the running executable
    pub fn from_current_exe() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| LaunchError::InstallDir(format!("cannot locate executable: {}", e)))?;
        let dir = exe.parent().ok_or_else(|| {
            LaunchError::InstallDir(format!("{} has no parent directory", exe.display()))
        })?;
        Ok(Self::new(dir))
    }

    pub fn with_marker_file<S: Into<String>>(mut self, name: S) -> Self {
        self.marker_file = name.into();
        self
    }

    pub fn with_runner_program<S: Into<String>>(mut self, program: S) -> Self {
        self.runner_program = program.into();
        self
    }

    pub fn with_interpreter_program<S: Into<String>>(mut self, program: S) -> Self {
        self.interpreter_program = program.into();
        self
    }

    pub fn with_script<S: Into<String>>(mut self, script: S) -> Self {
        self.script = script.into();
        self
    }

    /// The single path probed for the marker file
    pub fn marker_path(&self) -> PathBuf {
        self.install_dir.join(&self.marker_file)
    }
}
