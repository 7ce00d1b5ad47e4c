//! Distances command handler: travel time to every reachable relevant body.

use anyhow::{Context, Result};

use evenerd_lib::{Parameters, Solver, SolverConfig, Universe};

use crate::commands::resolve_body;
use crate::output::{render_distances, to_json, DistanceRow, OutputFormat};

/// Arguments for the distances command.
#[derive(Debug, Clone, Copy)]
pub struct DistancesCommandArgs {
    /// Starting body or system id.
    pub from: i64,
    /// Only list the closest `limit` bodies.
    pub limit: Option<usize>,
}

/// Handle the distances subcommand.
pub fn handle_distances_command(
    universe: &Universe,
    parameters: &Parameters,
    config: SolverConfig,
    format: OutputFormat,
    args: &DistancesCommandArgs,
) -> Result<()> {
    let source = universe.body(resolve_body(universe, args.from)?).id;
    let solver = Solver::new(universe, config).context("failed to start the solver")?;
    let distances = solver
        .solve_all_distances(source, parameters)
        .with_context(|| format!("failed to compute distances from {source}"))?;

    let mut rows: Vec<DistanceRow> = distances
        .into_iter()
        .filter_map(|(id, cost)| {
            let body = universe.body_by_id(id)?;
            Some(DistanceRow {
                id,
                name: body.name.clone(),
                system: universe.system_of(body.index).name.clone(),
                cost,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.cost.total_cmp(&b.cost).then(a.id.cmp(&b.id)));
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&rows)?),
        OutputFormat::Text => print!("{}", render_distances(&rows)),
    }

    Ok(())
}
