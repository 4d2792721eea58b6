//! `platform compare`.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use platform_kinematics::{ValidationParams, compare_all};

use crate::args::GeometryArgs;

fn or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub fn run(geometry: &GeometryArgs, json: bool) -> Result<()> {
    let reports = compare_all(&geometry.params(), &ValidationParams::default())
        .context("Topology comparison failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!();
    println!("{}", "Topology Comparison".bold());
    println!("{}", "===================".bold());
    println!();
    println!(
        "  {:16} {:>7} {:>12} {:>12}",
        "Topology", "Valid", "Avg stroke", "Avg max"
    );
    for report in &reports {
        let valid = format!("{}/{}", report.valid_count(), report.poses.len());
        let valid = if report.valid_count() == report.poses.len() {
            valid.green().to_string()
        } else {
            valid.yellow().to_string()
        };
        println!(
            "  {:16} {:>7} {:>12} {:>12}",
            report.topology.id(),
            valid,
            or_dash(report.average_stroke_range()),
            or_dash(report.average_max_length())
        );
    }
    println!();

    // Per-case detail, one row per case, one column per topology.
    let Some(first) = reports.first() else {
        return Ok(());
    };
    print!("  {:32}", "Case");
    for report in &reports {
        print!(" {:>14}", report.topology.id());
    }
    println!();
    for (i, case) in first.poses.iter().enumerate() {
        print!("  {:32}", case.label);
        for report in &reports {
            let pose = &report.poses[i];
            let cell = format!("{:.1}", pose.stroke_range);
            if pose.valid {
                print!(" {cell:>14}");
            } else {
                print!(" {:>14}", "✗".red());
            }
        }
        println!();
    }
    println!();
    Ok(())
}
