//! Batch command handler: solve many `src dst` pairs and report per-solve timings.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use evenerd_lib::{Parameters, Solver, SolverConfig, Universe};

use crate::commands::resolve_body;
use crate::output::{to_json, OutputFormat};

/// Outcome of one line of a batch file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchRecord {
    pub source: i64,
    pub destination: i64,
    pub elapsed_ns: u128,
    /// Zero when the destination is unreachable.
    pub waypoints: usize,
    pub loops: u32,
    pub total_cost: Option<f64>,
}

/// Parse a batch file: one `src dst` pair per line, blank lines and `#` comments skipped.
pub fn parse_batch(contents: &str) -> Result<Vec<(i64, i64)>> {
    let mut pairs = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(src), Some(dst), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(anyhow!("line {}: expected 'src dst', got '{line}'", number + 1));
        };
        let src = src
            .parse()
            .with_context(|| format!("line {}: invalid source id '{src}'", number + 1))?;
        let dst = dst
            .parse()
            .with_context(|| format!("line {}: invalid destination id '{dst}'", number + 1))?;
        pairs.push((src, dst));
    }
    Ok(pairs)
}

/// Handle the batch subcommand.
pub fn handle_batch_command(
    universe: &Universe,
    parameters: &Parameters,
    config: SolverConfig,
    format: OutputFormat,
    file: &Path,
) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("failed to read batch file {}", file.display()))?;
    let pairs = parse_batch(&contents)?;
    let solver = Solver::new(universe, config).context("failed to start the solver")?;

    let mut records = Vec::with_capacity(pairs.len());
    for (src, dst) in pairs {
        let source = universe.body(resolve_body(universe, src)?).id;
        let destination = universe.body(resolve_body(universe, dst)?).id;

        let started = Instant::now();
        let result = solver.solve(source, Some(destination), parameters);
        let elapsed_ns = started.elapsed().as_nanos();

        let record = match result {
            Ok(route) => BatchRecord {
                source: src,
                destination: dst,
                elapsed_ns,
                waypoints: route.waypoints.len(),
                loops: route.loop_count,
                total_cost: Some(route.total_cost),
            },
            Err(err) if err.is_unreachable() => {
                warn!(source = src, destination = dst, "no route");
                BatchRecord {
                    source: src,
                    destination: dst,
                    elapsed_ns,
                    waypoints: 0,
                    loops: 0,
                    total_cost: None,
                }
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to route {src} -> {dst}"))
            }
        };

        if format == OutputFormat::Text {
            println!(
                "{} {} {} {} {}",
                record.source, record.destination, record.elapsed_ns, record.waypoints, record.loops
            );
        }
        records.push(record);
    }

    info!(solves = records.len(), "batch finished");
    if format == OutputFormat::Json {
        println!("{}", to_json(&records)?);
    }

    Ok(())
}
