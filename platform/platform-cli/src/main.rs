//! Command-line front end for the platform kinematics engine.
//!
//! # Commands
//!
//! - `platform topologies` - List supported leg/joint layouts
//! - `platform solve` - Leg lengths, angles and feasibility for one pose
//! - `platform workspace` - Reachable translations at a fixed orientation
//! - `platform level` - Run the leveling planner against a measured tilt
//! - `platform animate` - Drive a sinusoidal pose source through the solver
//! - `platform compare` - Stroke statistics for every topology
//!
//! Logging goes to stderr through `tracing`. Set `RUST_LOG` or pass `-v`
//! (debug) / `-vv` (trace).

mod animate;
mod args;
mod compare;
mod level;
mod solve;
mod workspace;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::args::{GeometryArgs, OrientationArgs, PlatformArgs, PoseArgs};

/// Inverse kinematics and workspace safety for parallel motion platforms
#[derive(Parser)]
#[command(name = "platform")]
#[command(
    about = "Inverse kinematics and workspace safety for parallel platforms",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported topologies
    Topologies {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Solve one pose and validate it
    Solve {
        #[command(flatten)]
        platform: PlatformArgs,

        #[command(flatten)]
        pose: PoseArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Sample the reachable workspace at a fixed orientation
    Workspace {
        #[command(flatten)]
        platform: PlatformArgs,

        #[command(flatten)]
        pose: PoseArgs,

        /// Half-width of the sampling box in x and y (mm)
        #[arg(long, default_value_t = 80.0)]
        extent: f64,

        /// Half-height of the sampling box in z (mm)
        #[arg(long, default_value_t = 40.0)]
        z_extent: f64,

        /// Grid step (mm)
        #[arg(long, default_value_t = 10.0)]
        step: f64,

        /// Also require collision-free legs
        #[arg(long)]
        collision_free: bool,

        /// Evaluate on one thread
        #[arg(long)]
        sequential: bool,

        /// Print every point as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the leveling planner against a steady measured tilt
    Level {
        #[command(flatten)]
        platform: PlatformArgs,

        #[command(flatten)]
        measured: OrientationArgs,

        /// Correct yaw as well as roll and pitch
        #[arg(long)]
        full: bool,

        /// Planner ticks to simulate
        #[arg(long, default_value_t = 6)]
        ticks: usize,

        /// Maximum correction rate (deg/s)
        #[arg(long, default_value_t = 5.0)]
        max_rate: f64,

        /// Planner update rate (Hz)
        #[arg(long, default_value_t = 2.0)]
        rate: f64,

        /// Answer as a one-shot level request, printed as JSON
        #[arg(long)]
        once: bool,
    },

    /// Animate a sinusoidal motion through the solver
    Animate {
        #[command(flatten)]
        platform: PlatformArgs,

        /// Duration to simulate (s)
        #[arg(long, default_value_t = 8.0)]
        duration: f64,

        /// Time step (s)
        #[arg(long, default_value_t = 0.1)]
        dt: f64,

        /// Roll and pitch amplitude (deg)
        #[arg(long, default_value_t = 8.0)]
        tilt: f64,

        /// Heave amplitude (mm)
        #[arg(long, default_value_t = 5.0)]
        heave: f64,

        /// Print every frame instead of a summary
        #[arg(long)]
        frames: bool,
    },

    /// Compare every topology over the standard tilt cases
    Compare {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Topologies { json } => solve::topologies(json),
        Commands::Solve { platform, pose, json } => solve::run(&platform, &pose, json),
        Commands::Workspace {
            platform,
            pose,
            extent,
            z_extent,
            step,
            collision_free,
            sequential,
            json,
        } => workspace::run(
            &platform,
            &pose,
            &workspace::SweepArgs {
                extent,
                z_extent,
                step,
                collision_free,
                sequential,
            },
            json,
        ),
        Commands::Level {
            platform,
            measured,
            full,
            ticks,
            max_rate,
            rate,
            once,
        } => level::run(
            &platform,
            &measured,
            &level::LevelArgs {
                full,
                ticks,
                max_rate,
                rate,
                once,
            },
        ),
        Commands::Animate {
            platform,
            duration,
            dt,
            tilt,
            heave,
            frames,
        } => animate::run(
            &platform,
            &animate::AnimateArgs {
                duration,
                dt,
                tilt,
                heave,
                frames,
            },
        ),
        Commands::Compare { geometry, json } => compare::run(&geometry, json),
    }
}
