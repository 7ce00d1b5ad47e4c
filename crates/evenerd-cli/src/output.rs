//! Output formatting for command results.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use evenerd_lib::output::format_duration;
use evenerd_lib::Parameters;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Serialise any command result as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialise output as JSON")
}

/// Human-readable description of a traveler profile.
pub fn render_parameters(parameters: &Parameters) -> String {
    let mut buffer = String::new();

    match parameters.jump_drive_range() {
        Some(range) => {
            let _ = writeln!(buffer, "Jump drive: {range:.1} LY");
        }
        None => {
            let _ = writeln!(buffer, "Jump drive: none");
        }
    }
    let _ = writeln!(buffer, "Warp speed: {:.2} AU/s", parameters.warp_speed);
    let _ = writeln!(buffer, "Align time: {:.2} s", parameters.align_time);
    if parameters.gates_enabled() {
        let _ = writeln!(buffer, "Gate cost: {:.1} s", parameters.gate_cost);
    } else {
        let _ = writeln!(buffer, "Gate cost: disabled");
    }
    let _ = writeln!(
        buffer,
        "Jump range reduction: {:.2}",
        parameters.jump_range_reduction
    );
    let _ = writeln!(buffer, "Fatigue model: {}", parameters.fatigue_model);

    buffer
}

/// One row of the distances listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceRow {
    pub id: i64,
    pub name: String,
    pub system: String,
    pub cost: f64,
}

pub fn render_distances(rows: &[DistanceRow]) -> String {
    let mut buffer = String::new();
    for row in rows {
        let _ = writeln!(
            buffer,
            "{:>9}  {:>9}  {} ({})",
            format_duration(row.cost),
            row.id,
            row.name,
            row.system
        );
    }
    buffer
}
