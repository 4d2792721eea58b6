//! `platform animate`.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use platform_kinematics::{ValidationParams, solve, validate_solution};
use platform_leveling::{PoseSource, Sinusoid, SinusoidalMotion, SinusoidalPoseSource};

use crate::args::PlatformArgs;

pub struct AnimateArgs {
    pub duration: f64,
    pub dt: f64,
    pub tilt: f64,
    pub heave: f64,
    pub frames: bool,
}

pub fn run(platform: &PlatformArgs, args: &AnimateArgs) -> Result<()> {
    let config = platform.configuration()?;
    let motion = SinusoidalMotion {
        z: Sinusoid::new(args.heave, 0.5, 0.0),
        roll: Sinusoid::new(args.tilt, 0.25, 0.0),
        pitch: Sinusoid::new(args.tilt, 0.25, std::f64::consts::FRAC_PI_2),
        ..SinusoidalMotion::default()
    };
    let mut source =
        SinusoidalPoseSource::new(motion, args.dt).context("Invalid animation settings")?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let frame_count = (args.duration / args.dt).floor().max(0.0) as usize + 1;
    let params = ValidationParams::default();

    let mut invalid = 0usize;
    let mut shortest = f64::INFINITY;
    let mut longest = f64::NEG_INFINITY;

    for (frame, pose) in source.take_poses(frame_count).into_iter().enumerate() {
        let solution = solve(&config, &pose);
        let result = validate_solution(&config, &solution, &params);
        let lengths = solution.leg_lengths();
        shortest = lengths.iter().copied().fold(shortest, f64::min);
        longest = lengths.iter().copied().fold(longest, f64::max);
        if !result.is_valid() {
            invalid += 1;
        }

        if args.frames {
            let o = pose.orientation();
            let status = if result.is_valid() {
                "ok".green().to_string()
            } else {
                result.summary().red().to_string()
            };
            let lengths: Vec<String> = lengths.iter().map(|l| format!("{l:.1}")).collect();
            println!(
                "{frame:4}  z {:6.1}  rpy ({:+5.1}, {:+5.1}, {:+5.1})  [{}]  {status}",
                pose.z(),
                o.roll_deg(),
                o.pitch_deg(),
                o.yaw_deg(),
                lengths.join(", ")
            );
        }
    }

    println!();
    println!("{} {}", "Animation".bold(), config.topology().id().bold());
    println!("  Frames:        {frame_count}");
    let invalid_text = if invalid == 0 {
        invalid.to_string().green().to_string()
    } else {
        invalid.to_string().red().bold().to_string()
    };
    println!("  Infeasible:    {invalid_text}");
    println!("  Leg range:     {shortest:.1} .. {longest:.1} mm");
    println!();
    Ok(())
}
