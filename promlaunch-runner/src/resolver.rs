use crate::config::LauncherConfig;
use promlaunch_core::RunnerKind;
use std::path::Path;
use tracing::{debug, warn};

/// Answers whether the marker file exists at exactly one path
pub trait MarkerProbe {
    fn marker_exists(&self, path: &Path) -> bool;
}

impl<F> MarkerProbe for F
where
    F: Fn(&Path) -> bool,
{
    fn marker_exists(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Checks the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMarkerProbe;

impl MarkerProbe for FsMarkerProbe {
    fn marker_exists(&self, path: &Path) -> bool {
        match path.try_exists() {
            Ok(exists) => exists,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not probe marker file, treating as absent");
                false
            }
        }
    }
}

/// Turns a script path into a program and argument list
pub trait CommandResolver: Send + Sync {
    fn kind(&self) -> RunnerKind;
    fn program(&self) -> &str;
    fn args(&self, script: &str) -> Vec<String>;
}

/// `<runner> run python <script>`
#[derive(Debug, Clone)]
pub struct PackageManagerRunner {
    program: String,
}

impl PackageManagerRunner {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommandResolver for PackageManagerRunner {
    fn kind(&self) -> RunnerKind {
        RunnerKind::PackageManagerRunner
    }

    fn program(&self) -> &str {
        &self.program
    }

    fn args(&self, script: &str) -> Vec<String> {
        vec!["run".to_string(), "python".to_string(), script.to_string()]
    }
}

/// `<interpreter> <script>`
#[derive(Debug, Clone)]
pub struct DirectInterpreter {
    program: String,
}

impl DirectInterpreter {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommandResolver for DirectInterpreter {
    fn kind(&self) -> RunnerKind {
        RunnerKind::DirectInterpreter
    }

    fn program(&self) -> &str {
        &self.program
    }

    fn args(&self, script: &str) -> Vec<String> {
        vec![script.to_string()]
    }
}

/// Pick the runner when the marker file is present, the interpreter otherwise
pub fn select_resolver<P>(config: &LauncherConfig, probe: &P) -> Box<dyn CommandResolver>
where
    P: MarkerProbe + ?Sized,
{
    let marker = config.marker_path();
    let present = probe.marker_exists(&marker);

    debug!(marker = %marker.display(), present, "Probed marker file");

    if present {
        Box::new(PackageManagerRunner::new(config.runner_program.clone()))
    } else {
        Box::new(DirectInterpreter::new(config.interpreter_program.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[test]
    fn test_marker_present_selects_runner() {
        let config = LauncherConfig::new("/opt/app");
        let resolver = select_resolver(&config, &|_: &Path| true);

        assert_eq!(resolver.kind(), RunnerKind::PackageManagerRunner);
        assert_eq!(resolver.program(), "uv");
        assert_eq!(
            resolver.args(&config.script),
            vec!["run", "python", "src/prometheus_mcp_server/server.py"]
        );
    }

    #[test]
    fn test_marker_absent_selects_interpreter() {
        let config = LauncherConfig::new("/opt/app");
        let resolver = select_resolver(&config, &|_: &Path| false);

        assert_eq!(resolver.kind(), RunnerKind::DirectInterpreter);
        assert_eq!(resolver.program(), "python3");
        assert_eq!(
            resolver.args(&config.script),
            vec!["src/prometheus_mcp_server/server.py"]
        );
    }

    #[test]
    fn test_probe_sees_only_the_marker_path() {
        let config = LauncherConfig::new("/opt/app");
        let seen: RefCell<Vec<PathBuf>> = RefCell::new(Vec::new());
        let probe = |path: &Path| {
            seen.borrow_mut().push(path.to_path_buf());
            false
        };

        select_resolver(&config, &probe);

        assert_eq!(seen.into_inner(), vec![PathBuf::from("/opt/app/pyproject.toml")]);
    }

    #[test]
    fn test_fs_probe_checks_directory_only() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "[project]\n").unwrap();

        assert!(FsMarkerProbe.marker_exists(&dir.path().join("pyproject.toml")));
        // the parent has one, the nested directory does not
        assert!(!FsMarkerProbe.marker_exists(&nested.join("pyproject.toml")));
    }

    #[test]
    fn test_fs_probe_selects_runner_from_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = LauncherConfig::new(dir.path());
        assert_eq!(
            select_resolver(&config, &FsMarkerProbe).kind(),
            RunnerKind::DirectInterpreter
        );

        std::fs::write(config.marker_path(), "").unwrap();
        assert_eq!(
            select_resolver(&config, &FsMarkerProbe).kind(),
            RunnerKind::PackageManagerRunner
        );
    }
}
