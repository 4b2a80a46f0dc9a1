//! bootgate
//!
//! Waits for an application URL to become reachable, then hands off to it.
//!
//! ```text
//!   bootgate run http://127.0.0.1:8080/
//!
//!        ┌────────────┐  HEAD   ┌──────────┐
//!        │   probe    │───────▶│  target  │
//!        └─────┬──────┘        └──────────┘
//!              │ 2xx                    │ error / no response
//!              ▼                        ▼
//!        ┌────────────┐        ┌──────────────────────────┐
//!        │ navigator  │        │ wait min(prev + 1s, 5s)  │──▶ probe again
//!        │ print/spawn│        └──────────────────────────┘
//!        └────────────┘
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use url::Url;

use bootgate::config::{self, GateConfig, LogFormat, NavigationMode, TargetConfig};
use bootgate::error::{ConfigError, GateError};
use bootgate::lifecycle::{signals, Shutdown};
use bootgate::observability::{logging, metrics};
use bootgate::{navigation, spawn_all, BackoffPolicy, GateOutcome, HttpProber, ProbeOutcome, Prober};

/// Exit status when interrupted, matching shells' 128 + SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

/// Exit status for setup failures: bad configuration, no targets, client
/// construction. Kept apart from the `probe` outcome codes.
const EXIT_SETUP_FAILED: u8 = 3;

#[derive(Parser)]
#[command(name = "bootgate", version)]
#[command(about = "Wait for an app URL to become reachable, then hand off to it", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe targets until reachable, then redirect to each
    Run(RunArgs),
    /// Probe a URL once and report the result
    Probe {
        url: Url,
    },
    /// Load and validate the configuration file
    CheckConfig,
}

#[derive(Args)]
struct RunArgs {
    /// Target URLs, in addition to those in the config file
    urls: Vec<Url>,

    #[arg(long)]
    start_interval_ms: Option<u64>,

    #[arg(long)]
    interval_increase_ms: Option<u64>,

    #[arg(long)]
    max_interval_ms: Option<u64>,

    #[arg(long)]
    probe_timeout_secs: Option<u64>,

    /// Launch this program with the URL instead of printing it
    #[arg(long)]
    spawn: Option<String>,

    /// Launcher argument, `{url}` is replaced with the target URL
    #[arg(long = "arg", requires = "spawn", allow_hyphen_values = true)]
    args: Vec<String>,

    #[arg(long)]
    log_level: Option<String>,

    #[arg(long, value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run_cli(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(EXIT_SETUP_FAILED)
        }
    }
}

async fn run_cli(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config = resolve_config(cli.config.as_deref(), &cli.command)?;

    logging::init(&config.observability)?;

    match cli.command {
        Commands::Run(_) => run(config).await,
        Commands::Probe { url } => probe_once(&config, &url).await,
        Commands::CheckConfig => check_config(cli.config.is_some(), &config),
    }
}

/// File values, then command-line overrides, then validation of the merge.
fn resolve_config(path: Option<&Path>, command: &Commands) -> Result<GateConfig, ConfigError> {
    let mut config = match path {
        Some(path) => config::read_config(path)?,
        None => GateConfig::default(),
    };
    if let Commands::Run(args) = command {
        apply_overrides(&mut config, args);
    }
    config::validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_overrides(config: &mut GateConfig, args: &RunArgs) {
    config
        .targets
        .extend(args.urls.iter().cloned().map(TargetConfig::new));

    if let Some(ms) = args.start_interval_ms {
        config.backoff.start_interval_ms = ms;
    }
    if let Some(ms) = args.interval_increase_ms {
        config.backoff.interval_increase_ms = ms;
    }
    if let Some(ms) = args.max_interval_ms {
        config.backoff.max_interval_ms = ms;
    }
    if let Some(secs) = args.probe_timeout_secs {
        config.probe.timeout_secs = secs;
        config.probe.connect_timeout_secs = config.probe.connect_timeout_secs.min(secs);
    }
    if let Some(command) = &args.spawn {
        config.navigation.mode = NavigationMode::Spawn;
        config.navigation.command = command.clone();
        config.navigation.args = args.args.clone();
    }
    if let Some(level) = &args.log_level {
        config.observability.log_level = level.clone();
    }
    if let Some(format) = args.log_format {
        config.observability.log_format = format.into();
    }
}

async fn run(config: GateConfig) -> Result<ExitCode, Box<dyn Error>> {
    if config.targets.is_empty() {
        return Err(GateError::NoTargets.into());
    }

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let policy = BackoffPolicy::from(&config.backoff);
    let prober = HttpProber::new(&config.probe).map_err(GateError::Client)?;
    let navigator = navigation::from_config(&config.navigation);

    tracing::info!(
        targets = config.targets.len(),
        start_ms = config.backoff.start_interval_ms,
        increase_ms = config.backoff.interval_increase_ms,
        max_ms = config.backoff.max_interval_ms,
        navigation = ?config.navigation.mode,
        "bootgate v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let shutdown = Shutdown::new();
    let signal_task = signals::spawn_signal_handler(shutdown.clone());

    let handles = spawn_all(&config.targets, policy, prober, navigator, shutdown.token());

    let mut interrupted = false;
    for handle in handles {
        let url = handle.url().clone();
        match handle.wait().await? {
            GateOutcome::Redirected { attempts } => {
                tracing::debug!(url = %url, attempts, "Gate finished");
            }
            GateOutcome::Cancelled { .. } => interrupted = true,
        }
    }
    signal_task.abort();

    if interrupted {
        Ok(ExitCode::from(EXIT_INTERRUPTED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn probe_once(config: &GateConfig, url: &Url) -> Result<ExitCode, Box<dyn Error>> {
    let prober = HttpProber::new(&config.probe).map_err(GateError::Client)?;
    let outcome = prober.probe(url).await;
    println!("{}: {}", url, outcome);

    Ok(ExitCode::from(probe_exit_code(&outcome)))
}

fn probe_exit_code(outcome: &ProbeOutcome) -> u8 {
    match outcome {
        ProbeOutcome::Reachable(_) => 0,
        ProbeOutcome::ErrorStatus(_) => 1,
        ProbeOutcome::NoResponse(_) => 2,
    }
}

fn check_config(loaded: bool, config: &GateConfig) -> Result<ExitCode, Box<dyn Error>> {
    if !loaded {
        return Err("check-config needs --config <FILE>".into());
    }
    println!(
        "configuration ok: {} target(s), backoff {}ms +{}ms up to {}ms",
        config.targets.len(),
        config.backoff.start_interval_ms,
        config.backoff.interval_increase_ms,
        config.backoff.max_interval_ms
    );
    Ok(ExitCode::SUCCESS)
}
