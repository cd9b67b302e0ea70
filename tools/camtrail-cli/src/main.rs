//! camtrail CLI: fly a scripted camera, record it, and export Deforum schedules.
//!
//! Usage:
//!   camtrail simulate [OPTIONS]   Record a scripted flight and export schedules
//!   camtrail validate [OPTIONS]   Check export options against a frame count
//!   camtrail config [OPTIONS]     Show or initialise the configuration file

use std::path::PathBuf;

use camtrail_common::config::AppConfig;
use clap::{Parser, Subcommand};

mod commands;
mod flight;

use commands::ExportArgs;
use flight::FlightShape;

#[derive(Parser)]
#[command(
    name = "camtrail",
    about = "Record camera trajectories and export Deforum keyframe schedules",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fly a scripted path, record it, and export schedules
    Simulate {
        /// Flight path to fly
        #[arg(long, value_enum, default_value = "flythrough")]
        shape: FlightShape,

        /// Flight duration (seconds)
        #[arg(long, default_value = "4.0")]
        duration: f64,

        /// Recording rate (defaults to the configured rate)
        #[arg(long)]
        fps: Option<f64>,

        /// Simulated render-loop rate
        #[arg(long, default_value = "60.0")]
        render_fps: f64,

        /// Smoothing window; enables smoothing when set
        #[arg(long)]
        smooth_window: Option<usize>,

        /// Smoothing passes
        #[arg(long)]
        smooth_iterations: Option<u32>,

        /// Smooth without keeping a revertible baseline
        #[arg(long)]
        destructive: bool,

        /// Replay the recording before exporting
        #[arg(long)]
        playback: bool,

        #[command(flatten)]
        export: ExportArgs,

        /// Output format: json|text (defaults to the output extension)
        #[arg(long)]
        format: Option<String>,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check export options against a recording length
    Validate {
        /// Number of recorded frames
        #[arg(long)]
        frames: usize,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Show the effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,

        /// Write the current configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = camtrail_common::logging::VERBOSE_LOG_FILTER.to_string();
    }
    camtrail_common::logging::init_logging(&logging);
    tracing::debug!(
        path = %camtrail_common::config::config_file_path().display(),
        fps = config.recording.fps,
        "Loaded configuration"
    );

    match cli.command {
        Commands::Simulate {
            shape,
            duration,
            fps,
            render_fps,
            smooth_window,
            smooth_iterations,
            destructive,
            playback,
            export,
            format,
            output,
        } => commands::simulate::run(
            &config,
            commands::simulate::SimulateArgs {
                shape,
                duration,
                fps,
                render_fps,
                smooth_window,
                smooth_iterations,
                destructive,
                playback,
                export,
                format,
                output,
            },
        ),
        Commands::Validate { frames, export } => commands::validate::run(&config, frames, &export),
        Commands::Config { path, init } => commands::config::run(&config, path, init),
    }
}
