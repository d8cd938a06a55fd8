pub mod config;
pub mod launcher;
pub mod process;
pub mod resolver;

pub use config::LauncherConfig;
pub use launcher::{execute, Launcher};
pub use process::{locate_executable, run_inherited, snapshot_env, ProcessConfig};
pub use resolver::{
    select_resolver, CommandResolver, DirectInterpreter, FsMarkerProbe, MarkerProbe,
    PackageManagerRunner,
};
