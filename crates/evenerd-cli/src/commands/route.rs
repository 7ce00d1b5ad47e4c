//! Route command handler for computing the fastest route between two bodies.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use evenerd_lib::{Parameters, RouteSummary, Solver, SolverConfig, Universe};

use crate::commands::resolve_body;
use crate::output::{to_json, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone, Copy)]
pub struct RouteCommandArgs {
    /// Starting body or system id.
    pub from: i64,
    /// Destination body or system id.
    pub to: i64,
}

#[derive(Debug, Serialize)]
struct NoRoute {
    status: &'static str,
    from: i64,
    to: i64,
}

/// Handle the route subcommand.
pub fn handle_route_command(
    universe: &Universe,
    parameters: &Parameters,
    config: SolverConfig,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let source = universe.body(resolve_body(universe, args.from)?).id;
    let destination = universe.body(resolve_body(universe, args.to)?).id;

    let solver = Solver::new(universe, config).context("failed to start the solver")?;
    let route = match solver.solve(source, Some(destination), parameters) {
        Ok(route) => route,
        Err(err) if err.is_unreachable() => {
            let no_route = NoRoute {
                status: "no_route",
                from: source,
                to: destination,
            };
            match format {
                OutputFormat::Json => println!("{}", to_json(&no_route)?),
                OutputFormat::Text => println!("No route found from {source} to {destination}"),
            }
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to route {source} -> {destination}"))
        }
    };

    info!(
        cost = route.total_cost,
        hops = route.hop_count(),
        loops = route.loop_count,
        "route found"
    );
    let summary = RouteSummary::from_route(universe, &route);
    match format {
        OutputFormat::Json => println!("{}", to_json(&summary)?),
        OutputFormat::Text => print!("{}", summary.render_text()),
    }

    Ok(())
}
