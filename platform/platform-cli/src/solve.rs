//! `platform topologies` and `platform solve`.

use anyhow::Result;
use owo_colors::OwoColorize;
use platform_kinematics::{
    AngleSeverity, ForceBand, ValidationParams, ValidationResult, solve, validate_solution,
};
use platform_leveling::available_topologies;
use platform_types::Topology;
use serde_json::json;

use crate::args::{PlatformArgs, PoseArgs};

pub fn topologies(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&available_topologies())?);
        return Ok(());
    }

    println!();
    println!("{}", "Supported Topologies".bold());
    println!("{}", "====================".bold());
    println!();
    for topology in Topology::ALL {
        let shared = if topology.has_shared_joints() {
            "shared joints".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:16} {:16} {} legs  {}",
            topology.id().bold(),
            topology.name(),
            topology.leg_count(),
            shared
        );
        println!("  {:16} {}", "", topology.description().dimmed());
    }
    println!();
    Ok(())
}

fn band_label(band: ForceBand) -> String {
    match band {
        ForceBand::Normal => band.as_str().green().to_string(),
        ForceBand::Moderate => band.as_str().yellow().to_string(),
        ForceBand::High => band.as_str().red().bold().to_string(),
    }
}

fn print_verdict(result: &ValidationResult) {
    if result.is_valid() && result.warning_count() == 0 {
        println!("{}", format!("✓ {}", result.summary()).green());
    } else if result.is_valid() {
        println!("{}", format!("✓ {}", result.summary()).yellow());
    } else {
        println!("{}", format!("✗ {}", result.summary()).red().bold());
    }
}

pub fn run(platform: &PlatformArgs, pose_args: &PoseArgs, json: bool) -> Result<()> {
    let config = platform.configuration()?;
    let pose = pose_args.pose()?;
    let solution = solve(&config, &pose);
    let result = validate_solution(&config, &solution, &ValidationParams::default());
    let states = solution.leg_states();

    if json {
        let legs: Vec<_> = states
            .iter()
            .map(|leg| {
                json!({
                    "world_joint": [leg.world_joint.x, leg.world_joint.y, leg.world_joint.z],
                    "length": leg.length,
                    "extension": leg.extension,
                    "angle_from_vertical_deg": leg.angle_from_vertical_deg,
                    "force": leg.force,
                })
            })
            .collect();
        let report = json!({
            "configuration": config.topology().id(),
            "leg_lengths": solution.leg_lengths(),
            "valid": result.is_valid(),
            "summary": result.summary(),
            "legs": legs,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let o = pose.orientation();
    println!();
    println!(
        "{} {}  pose ({:.1}, {:.1}, {:.1}) mm  rpy ({:.1}, {:.1}, {:.1})°",
        "Topology".bold(),
        config.topology().id().bold(),
        pose.x(),
        pose.y(),
        pose.z(),
        o.roll_deg(),
        o.pitch_deg(),
        o.yaw_deg()
    );
    println!();
    println!(
        "  {:>3}  {:>9}  {:>9}  {:>8}  {:>8}",
        "Leg", "Length", "Extension", "Angle", "Force"
    );
    for (i, leg) in states.iter().enumerate() {
        let angle = format!("{:7.1}°", leg.angle_from_vertical_deg);
        let angle = if leg.angle_from_vertical_deg > ValidationParams::default().angle_warning_deg {
            angle.yellow().to_string()
        } else {
            angle
        };
        let flagged = result.length_violations.iter().any(|v| v.leg == i);
        let length = format!("{:9.2}", leg.length);
        let length = if flagged { length.red().to_string() } else { length };
        println!(
            "  {:>3}  {}  {:>+9.2}  {}  {}",
            i,
            length,
            leg.extension,
            angle,
            band_label(leg.force.band)
        );
    }
    println!();
    print_verdict(&result);
    for warning in &result.angle_warnings {
        let note = match warning.severity {
            AngleSeverity::NearSingular => "near singular",
            AngleSeverity::Unreachable => "unreachable",
        };
        println!("    leg {} at {:.1}° ({note})", warning.leg, warning.angle_deg);
    }
    println!();
    Ok(())
}
