use clap::Parser;
use promlaunch_core::{LaunchError, LaunchPlan, EXIT_LAUNCH_FAILURE};
use promlaunch_runner::{locate_executable, Launcher, LauncherConfig};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prometheus-mcp-server")]
#[command(about = "Start the Prometheus MCP server through uv or python3", long_about = None)]
struct Cli {
    /// Directory holding the server sources (defaults to this executable's directory)
    #[arg(long)]
    install_dir: Option<PathBuf>,

    /// Print the launch plan as JSON and exit without starting the server
    #[arg(long)]
    dry_run: bool,

    /// Accepted but not forwarded to the server
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<String>,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    #[serde(flatten)]
    plan: &'a LaunchPlan,
    command: String,
    resolved_program: Option<PathBuf>,
    env_vars: usize,
}

#[tokio::main]
async fn main() {
    // stdout belongs to the MCP stdio channel
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("prometheus-mcp-server: {:#}", e);
            exit_code_for(&e)
        }
    };

    process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    if !cli.ignored.is_empty() {
        debug!(ignored = ?cli.ignored, "Launcher arguments are not forwarded to the server");
    }

    let config = match cli.install_dir {
        Some(dir) => LauncherConfig::new(dir),
        None => LauncherConfig::from_current_exe()?,
    };
    let launcher = Launcher::new(config);

    if cli.dry_run {
        let plan = launcher.plan();
        println!("{}", serde_json::to_string_pretty(&plan_report(&plan))?);
        return Ok(0);
    }

    let outcome = launcher.launch().await?;
    Ok(outcome.exit_code())
}

fn plan_report(plan: &LaunchPlan) -> PlanReport<'_> {
    PlanReport {
        plan,
        command: plan.command_line(),
        resolved_program: locate_executable(&plan.program),
        env_vars: plan.env.len(),
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<LaunchError>()
        .map(LaunchError::exit_code)
        .unwrap_or(EXIT_LAUNCH_FAILURE)
}
