//! heartcard CLI
//!
//! Ask the big question in a terminal, celebrate the answer.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use heartcard::config::{CardConfig, resolve_config};
use heartcard::error::Error;
use heartcard::preview::{PreviewOptions, run_preview};
use heartcard::report::{format_config, format_report};
use heartcard::tui;
use heartcard::types::{OutputFormat, TrajectoryModel};

#[derive(Parser)]
#[command(name = "heartcard")]
#[command(about = "Ask the big question, with buttons that won't take no for an answer")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/heartcard/config.json, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append logs to this file (RUST_LOG sets the filter)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    card: CardArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the card in the terminal (default)
    Play,

    /// Simulate a session on a virtual clock and report what the hearts did
    Preview {
        /// Times to press No before Yes
        #[arg(long, default_value_t = 0)]
        declines: u32,

        /// Celebration length in milliseconds
        #[arg(long, default_value_t = 5_000)]
        duration_ms: u64,

        /// Virtual frame length in milliseconds
        #[arg(long, default_value_t = 16)]
        step_ms: u64,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the effective configuration
    Config {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormatArg,
    },
}

/// Flags that override config file values.
#[derive(Args)]
struct CardArgs {
    /// Question on the first screen
    #[arg(long, global = true)]
    question: Option<String>,

    /// Headline after the yes
    #[arg(long, global = true)]
    celebration: Option<String>,

    /// Directory holding 1.jpg .. N.jpg
    #[arg(long, global = true)]
    asset_root: Option<PathBuf>,

    /// Number of photos to show
    #[arg(long, global = true)]
    photos: Option<usize>,

    /// Particle trajectory model
    #[arg(long, value_enum, global = true)]
    trajectory: Option<TrajectoryArg>,

    /// Particles per spawn tick
    #[arg(long, global = true)]
    per_tick: Option<usize>,

    /// Milliseconds between spawn ticks
    #[arg(long, global = true)]
    rate_ms: Option<u64>,

    /// Maximum live particles
    #[arg(long, global = true)]
    max_particles: Option<usize>,

    /// Fixed random seed
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TrajectoryArg {
    Drift,
    Burst,
}

impl From<TrajectoryArg> for TrajectoryModel {
    fn from(arg: TrajectoryArg) -> Self {
        match arg {
            TrajectoryArg::Drift => TrajectoryModel::Drift,
            TrajectoryArg::Burst => TrajectoryModel::Burst,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play);

    // The TUI owns the terminal, so it only logs when given a file.
    let to_stderr = !matches!(command, Commands::Play);
    if let Err(e) = init_logging(cli.log_file.as_deref(), to_stderr) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let result = load_config(cli.config.as_deref(), cli.card).and_then(|config| match command {
        Commands::Play => cmd_play(&config),
        Commands::Preview {
            declines,
            duration_ms,
            step_ms,
            format,
        } => cmd_preview(&config, declines, duration_ms, step_ms, format.into()),
        Commands::Config { format } => cmd_config(&config, format.into()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if to_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn load_config(path: Option<&Path>, args: CardArgs) -> Result<CardConfig, Error> {
    let mut config = resolve_config(path)?;

    if let Some(question) = args.question {
        config.question = question;
    }
    if let Some(celebration) = args.celebration {
        config.celebration = celebration;
    }
    if let Some(root) = args.asset_root {
        config.asset_root = root;
    }
    if let Some(photos) = args.photos {
        config.photo_count = photos;
    }

    let particles = &mut config.particles;
    if let Some(trajectory) = args.trajectory {
        particles.trajectory = trajectory.into();
    }
    if let Some(per_tick) = args.per_tick {
        particles.per_tick = per_tick;
    }
    if let Some(rate_ms) = args.rate_ms {
        particles.rate_ms = rate_ms;
    }
    if let Some(max) = args.max_particles {
        particles.max_particles = max;
    }
    if args.seed.is_some() {
        particles.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_play(config: &CardConfig) -> Result<(), Error> {
    tui::run(config)?;
    Ok(())
}

fn cmd_preview(
    config: &CardConfig,
    declines: u32,
    duration_ms: u64,
    step_ms: u64,
    format: OutputFormat,
) -> Result<(), Error> {
    let options = PreviewOptions {
        declines,
        duration_ms,
        step_ms,
    };
    let report = run_preview(&config.particles, &options);
    println!("{}", format_report(&report, format)?);
    Ok(())
}

fn cmd_config(config: &CardConfig, format: OutputFormat) -> Result<(), Error> {
    println!("{}", format_config(config, format)?);
    Ok(())
}
