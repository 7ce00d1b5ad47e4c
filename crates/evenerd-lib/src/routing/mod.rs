//! Travel-time routing over the universe.
//!
//! This module provides:
//! - [`Solver`] - owns the worker pool and precomputed system coordinates
//! - [`SolveRequest`] / [`SolveMode`] - point-to-point or all-distances queries
//! - [`Route`] / [`Waypoint`] / [`MovementType`] - the route handed back to callers
//! - [`solve`] / [`solve_all_distances`] - one-shot helpers using the default configuration
//!
//! # Algorithm
//!
//! The graph has no adjacency list: every time a body is finalized its
//! neighbours are computed from geometry (warps within the system, jumps to
//! systems in range) and static links (stargates, bridges). Each extraction
//! runs the cheap warp/gate/bridge relaxations sequentially, then fans the
//! jump relaxation out over the worker pool; all writes to the frontier go
//! through one mutex.
//!
//! # Example
//!
//! ```no_run
//! use evenerd_lib::{load_universe, ShipPreset, Solver, SolverConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let universe = load_universe(
//!     std::path::Path::new("mapDenormalize.csv"),
//!     std::path::Path::new("mapJumps.csv"),
//! )?;
//! let solver = Solver::new(&universe, SolverConfig::default())?;
//! let route = solver.solve(60003760, Some(60008494), &ShipPreset::Cruiser.parameters())?;
//! println!("{} waypoints in {:.0}s", route.waypoints.len(), route.total_cost);
//! # Ok(())
//! # }
//! ```

mod dijkstra;
mod relax;
mod state;

use std::collections::HashMap;
use std::fmt;

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::parameters::{Parameters, SolverConfig};
use crate::universe::{BodyId, BodyIndex, Universe};

use dijkstra::Dijkstra;
use relax::SystemCoords;

/// How a waypoint was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// The route's first waypoint.
    Start,
    Warp,
    Gate,
    Jump,
    Bridge,
}

impl MovementType {
    /// Jumps and bridges share the jump cost table and fatigue rules.
    pub fn is_jump(self) -> bool {
        matches!(self, MovementType::Jump | MovementType::Bridge)
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            MovementType::Start => "STRT",
            MovementType::Warp => "WARP",
            MovementType::Gate => "GATE",
            MovementType::Jump => "JUMP",
            MovementType::Bridge => "BRDG",
        };
        f.write_str(value)
    }
}

/// A body on a route and the movement used to arrive there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    pub body: BodyId,
    #[serde(skip)]
    pub index: BodyIndex,
    pub movement: MovementType,
    /// Cost accumulated up to and including this waypoint.
    pub cost: f64,
}

/// Minimum-cost route from a source to a destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub total_cost: f64,
    /// Number of frontier extractions the solve performed.
    pub loop_count: u32,
    pub waypoints: Vec<Waypoint>,
}

impl Route {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }
}

/// Finalized cost of every body reachable from the source.
pub type DistanceMap = HashMap<BodyId, f64>;

/// Whether a solve stops at a destination or explores everything reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMode {
    PointToPoint,
    AllDistances,
}

/// A single solve query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveRequest {
    pub source: BodyId,
    pub destination: Option<BodyId>,
    pub mode: SolveMode,
}

impl SolveRequest {
    pub fn point_to_point(source: BodyId, destination: BodyId) -> Self {
        Self {
            source,
            destination: Some(destination),
            mode: SolveMode::PointToPoint,
        }
    }

    pub fn all_distances(source: BodyId) -> Self {
        Self {
            source,
            destination: None,
            mode: SolveMode::AllDistances,
        }
    }

    /// Reject requests whose destination does not match the mode.
    pub fn validate(&self) -> Result<()> {
        match (self.mode, self.destination) {
            (SolveMode::PointToPoint, None) => Err(Error::InvalidSolveMode {
                message: "point-to-point solve requires a destination".to_string(),
            }),
            (SolveMode::AllDistances, Some(destination)) => Err(Error::InvalidSolveMode {
                message: format!("all-distances solve must not name a destination ({destination})"),
            }),
            _ => Ok(()),
        }
    }
}

/// What [`Solver::execute`] produced for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Route(Route),
    Distances(DistanceMap),
}

/// Reusable router bound to one universe.
///
/// Each solve owns its own frontier and per-body state; the solver only keeps
/// read-only data and the worker pool, so it can serve many solves.
pub struct Solver<'u> {
    universe: &'u Universe,
    coords: SystemCoords,
    pool: ThreadPool,
}

impl<'u> Solver<'u> {
    pub fn new(universe: &'u Universe, config: SolverConfig) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads.max(1))
            .thread_name(|index| format!("evenerd-jump-{index}"))
            .build()?;

        Ok(Self {
            universe,
            coords: SystemCoords::new(universe),
            pool,
        })
    }

    pub fn universe(&self) -> &'u Universe {
        self.universe
    }

    /// Find the cheapest route from `source` to `destination`.
    ///
    /// Returns [`Error::RouteNotFound`] when the destination is unreachable.
    pub fn solve(
        &self,
        source: BodyId,
        destination: Option<BodyId>,
        parameters: &Parameters,
    ) -> Result<Route> {
        let request = SolveRequest {
            source,
            destination,
            mode: SolveMode::PointToPoint,
        };
        let mut dijkstra = self.prepare(&request, parameters)?;
        dijkstra.run();
        dijkstra.route()
    }

    /// Cost of reaching every reachable relevant body from `source`.
    pub fn solve_all_distances(
        &self,
        source: BodyId,
        parameters: &Parameters,
    ) -> Result<DistanceMap> {
        let request = SolveRequest::all_distances(source);
        let mut dijkstra = self.prepare(&request, parameters)?;
        dijkstra.run();
        Ok(dijkstra.distances())
    }

    /// Run a request in whichever mode it names.
    ///
    /// Requests whose destination does not fit the mode fail with
    /// [`Error::InvalidSolveMode`] before any work is done.
    pub fn execute(
        &self,
        request: &SolveRequest,
        parameters: &Parameters,
    ) -> Result<SolveOutcome> {
        let mut dijkstra = self.prepare(request, parameters)?;
        dijkstra.run();
        match request.mode {
            SolveMode::PointToPoint => dijkstra.route().map(SolveOutcome::Route),
            SolveMode::AllDistances => Ok(SolveOutcome::Distances(dijkstra.distances())),
        }
    }

    fn prepare(&self, request: &SolveRequest, parameters: &Parameters) -> Result<Dijkstra<'_>> {
        request.validate()?;
        parameters.validate()?;

        let source = self.universe.body_index(request.source)?;
        let destination = request
            .destination
            .map(|id| self.universe.body_index(id))
            .transpose()?;

        debug!(
            source = request.source,
            destination = ?request.destination,
            mode = ?request.mode,
            "starting solve"
        );

        Ok(Dijkstra::new(
            self.universe,
            &self.coords,
            &self.pool,
            *parameters,
            source,
            destination,
        ))
    }
}

/// Solve a single point-to-point query with the default solver configuration.
pub fn solve(
    universe: &Universe,
    source: BodyId,
    destination: Option<BodyId>,
    parameters: &Parameters,
) -> Result<Route> {
    Solver::new(universe, SolverConfig::default())?.solve(source, destination, parameters)
}

/// Compute all distances from `source` with the default solver configuration.
pub fn solve_all_distances(
    universe: &Universe,
    source: BodyId,
    parameters: &Parameters,
) -> Result<DistanceMap> {
    Solver::new(universe, SolverConfig::default())?.solve_all_distances(source, parameters)
}
