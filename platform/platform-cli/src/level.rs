//! `platform level`.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use platform_kinematics::ValidationParams;
use platform_leveling::{
    GeometryRequest, LevelRequest, LevelingConfig, LevelingController, LevelingDecision,
    LevelingMode, handle_level_request,
};

use crate::args::{OrientationArgs, PlatformArgs};

pub struct LevelArgs {
    pub full: bool,
    pub ticks: usize,
    pub max_rate: f64,
    pub rate: f64,
    pub once: bool,
}

pub fn run(
    platform: &PlatformArgs,
    measured_args: &OrientationArgs,
    args: &LevelArgs,
) -> Result<()> {
    let mode = if args.full {
        LevelingMode::Full
    } else {
        LevelingMode::RollPitch
    };
    let settings = LevelingConfig::default()
        .with_mode(mode)
        .with_max_rate(args.max_rate)
        .with_update_rate(args.rate);

    if args.once {
        let request = LevelRequest {
            roll: measured_args.roll,
            pitch: measured_args.pitch,
            yaw: measured_args.yaw,
            configuration: platform.topology.clone(),
            geometry: Some(GeometryRequest::from(&platform.geometry.params())),
        };
        let response = handle_level_request(&request, &settings, &ValidationParams::default())
            .context("Level request failed")?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let config = platform.configuration()?;
    let measured = measured_args.orientation()?;
    let mut controller =
        LevelingController::new(config, settings.clone(), ValidationParams::default())
            .context("Invalid leveling settings")?;

    println!();
    println!(
        "{} {}  measured rpy ({:.1}, {:.1}, {:.1})°  tilt {:.2}°  mode {}  step {:.2}°/tick",
        "Leveling".bold(),
        platform.topology.bold(),
        measured.roll_deg(),
        measured.pitch_deg(),
        measured.yaw_deg(),
        measured.tilt_deg(),
        settings.mode.as_str(),
        settings.step_limit_deg()
    );
    println!();

    for tick in 0..args.ticks {
        #[allow(clippy::cast_precision_loss)]
        let t = tick as f64 * settings.tick_seconds();
        let decision = controller.update(&measured);
        let label = match &decision {
            LevelingDecision::Command(_) => decision.label().green().to_string(),
            LevelingDecision::Rejected { .. } => decision.label().red().bold().to_string(),
            _ => decision.label().dimmed().to_string(),
        };
        match &decision {
            LevelingDecision::Command(command) => {
                let o = command.pose.orientation();
                let lengths: Vec<String> =
                    command.leg_lengths.iter().map(|l| format!("{l:.1}")).collect();
                println!(
                    "  t={t:5.2}s  {label:>9}  rpy ({:+.2}, {:+.2}, {:+.2})°  {}  [{}]",
                    o.roll_deg(),
                    o.pitch_deg(),
                    o.yaw_deg(),
                    if command.saturated { "rate-limited" } else { "on target  " },
                    lengths.join(", ")
                );
            }
            LevelingDecision::Rejected { validation, .. } => {
                println!("  t={t:5.2}s  {label:>9}  {}", validation.summary());
            }
            LevelingDecision::AlreadyLevel { tilt_deg } => {
                println!("  t={t:5.2}s  {label:>9}  tilt {tilt_deg:.2}° under threshold");
            }
            LevelingDecision::Hold { change_deg } => {
                println!("  t={t:5.2}s  {label:>9}  change {change_deg:.2}° inside deadband");
            }
        }
    }
    println!();
    Ok(())
}
