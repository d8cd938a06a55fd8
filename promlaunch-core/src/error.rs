use thiserror::Error;

/// Exit code reported when the selected executable is not on the search path.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code reported when the executable exists but cannot be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Exit code for any other failure that happens before the child runs.
pub const EXIT_LAUNCH_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Executable not found: {program}")]
    ExecutableNotFound { program: String },

    #[error("Permission denied executing: {program}")]
    PermissionDenied { program: String },

    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for child process: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid installation directory: {0}")]
    InstallDir(String),
}

impl LaunchError {
    /// Classify an error returned by the OS while spawning `program`.
    pub fn from_spawn(program: &str, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => LaunchError::ExecutableNotFound {
                program: program.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => LaunchError::PermissionDenied {
                program: program.to_string(),
            },
            _ => LaunchError::SpawnFailed {
                program: program.to_string(),
                source,
            },
        }
    }

    /// Code the launcher terminates with when the child never produced one.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ExecutableNotFound { .. } => EXIT_NOT_FOUND,
            LaunchError::PermissionDenied { .. } => EXIT_NOT_EXECUTABLE,
            LaunchError::SpawnFailed { .. }
            | LaunchError::Wait { .. }
            | LaunchError::InstallDir(_) => EXIT_LAUNCH_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
