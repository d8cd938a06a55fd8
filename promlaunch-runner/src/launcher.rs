use crate::config::LauncherConfig;
use crate::process::{run_inherited, snapshot_env, ProcessConfig};
use crate::resolver::{select_resolver, FsMarkerProbe, MarkerProbe};
use promlaunch_core::{ExitOutcome, LaunchError, LaunchPhase, LaunchPlan, Result};
use std::ffi::OsString;
use tracing::{debug, info};

/// Picks a runner for the server script and hands the terminal over to it
pub struct Launcher<P = FsMarkerProbe> {
    config: LauncherConfig,
    probe: P,
    env: Vec<(OsString, OsString)>,
}

impl Launcher<FsMarkerProbe> {
    pub fn new(config: LauncherConfig) -> Self {
        Self {
            config,
            probe: FsMarkerProbe,
            env: snapshot_env(),
        }
    }
}

impl<P: MarkerProbe> Launcher<P> {
    /// Swap the filesystem check, mainly for tests
    pub fn with_probe<Q: MarkerProbe>(self, probe: Q) -> Launcher<Q> {
        Launcher {
            config: self.config,
            probe,
            env: self.env,
        }
    }

    /// Replace the environment snapshot handed to the child
    pub fn with_env(mut self, env: Vec<(OsString, OsString)>) -> Self {
        self.env = env;
        self
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Decide what to run without running it
    pub fn plan(&self) -> LaunchPlan {
        debug!(phase = ?LaunchPhase::Start, install_dir = %self.config.install_dir.display());

        let resolver = select_resolver(&self.config, &self.probe);
        let plan = LaunchPlan {
            kind: resolver.kind(),
            program: resolver.program().to_string(),
            args: resolver.args(&self.config.script),
            working_dir: self.config.install_dir.clone(),
            env: self.env.clone(),
        };

        debug!(
            phase = ?LaunchPhase::RunnerSelected,
            kind = %plan.kind,
            command = %plan.command_line()
        );

        plan
    }

    /// Plan, spawn, and wait for the child
    pub async fn launch(&self) -> Result<ExitOutcome> {
        let plan = self.plan();
        execute(&plan).await
    }
}

/// Run a prepared plan to completion
pub async fn execute(plan: &LaunchPlan) -> Result<ExitOutcome> {
    if !plan.working_dir.is_dir() {
        return Err(LaunchError::InstallDir(format!(
            "{} is not a directory",
            plan.working_dir.display()
        )));
    }

    info!(
        phase = ?LaunchPhase::ChildSpawned,
        command = %plan.command_line(),
        working_dir = %plan.working_dir.display(),
        "Launching server"
    );

    let config = ProcessConfig {
        env: plan.env.clone(),
        working_directory: plan.working_dir.clone(),
    };
    let outcome = run_inherited(&plan.program, &plan.args, &config).await?;

    info!(
        phase = ?LaunchPhase::Terminated,
        exit_code = outcome.exit_code(),
        "Server exited"
    );

    Ok(outcome)
}
