//! # qline Main Entry Point
//!
//! Interactive console by default; `--render` and `--run` are one-shot modes.

use std::process::ExitCode;

use anyhow::{Context, Result};
use qline::cmd_args::{CommandLineArgs, Mode};
use qline::config::{self, ConsoleProfile};
use qline::repl::services::{format_outcome, run_program, HttpExecutor};
use qline::{AppController, Highlighter};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(config::LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}

fn load_profile(args: &CommandLineArgs) -> Result<ConsoleProfile> {
    let mut profile = ConsoleProfile::load(args.profile(), &config::get_profile_path())?;
    if let Some(server) = args.server() {
        profile.server = server.to_string();
    }
    Ok(profile)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CommandLineArgs::parse();
    init_tracing(args.verbose());
    tracing::info!("Tracing initialized successfully");

    match args.mode() {
        Mode::Render(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let highlighter = Highlighter::new()?;
            println!("{}", highlighter.render(&source));
            Ok(ExitCode::SUCCESS)
        }
        Mode::Run(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let profile = load_profile(&args)?;
            let shots = args.shots().unwrap_or(profile.shots);
            let executor = HttpExecutor::new(&profile)?;

            let outcome = run_program(&executor, &source, shots).await;
            println!("{}", format_outcome(&outcome));
            Ok(if outcome.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Mode::Console => {
            let profile = load_profile(&args)?;
            let mut app = AppController::new(&profile)?;
            app.run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
