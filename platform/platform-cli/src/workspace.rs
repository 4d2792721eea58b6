//! `platform workspace`.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use platform_kinematics::{DistanceBand, GridBounds, WorkspaceParams, sample_workspace};
use platform_types::{Point3, Vector3};

use crate::args::{PlatformArgs, PoseArgs};

pub struct SweepArgs {
    pub extent: f64,
    pub z_extent: f64,
    pub step: f64,
    pub collision_free: bool,
    pub sequential: bool,
}

pub fn run(
    platform: &PlatformArgs,
    pose_args: &PoseArgs,
    sweep: &SweepArgs,
    json: bool,
) -> Result<()> {
    let config = platform.configuration()?;
    let reference = pose_args.pose()?;

    let center = Point3::from(*reference.translation());
    let half_extent = Vector3::new(sweep.extent, sweep.extent, sweep.z_extent);
    let bounds = GridBounds::centered(center, half_extent);
    let params = WorkspaceParams::default()
        .with_bounds(bounds)
        .with_step(sweep.step)
        .with_collision_free(sweep.collision_free)
        .with_parallel(!sweep.sequential);

    let envelope =
        sample_workspace(&config, &reference, &params).context("Workspace sweep failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(envelope.points())?);
        return Ok(());
    }

    let o = envelope.orientation();
    println!();
    println!(
        "{} {}  rpy ({:.1}, {:.1}, {:.1})°  step {} mm",
        "Workspace".bold(),
        config.topology().id().bold(),
        o.roll_deg(),
        o.pitch_deg(),
        o.yaw_deg(),
        sweep.step
    );
    println!();
    println!("  Grid points:   {}", envelope.points().len());
    println!(
        "  Reachable:     {} ({:.1}%)",
        envelope.reachable_count().to_string().green(),
        envelope.coverage() * 100.0
    );
    println!("  Max reach:     {:.1} mm", envelope.max_reach());
    println!();

    let histogram = envelope.band_histogram();
    let widest = histogram.iter().copied().max().unwrap_or(0).max(1);
    for band in DistanceBand::ALL {
        let count = histogram[band.index()];
        let bar = "█".repeat(count * 40 / widest);
        println!("  {:8} {:>6}  {}", format!("{band:?}"), count, bar.cyan());
    }
    println!();
    Ok(())
}
