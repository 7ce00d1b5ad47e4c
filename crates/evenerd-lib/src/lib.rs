//! EveNerd library entry points.
//!
//! This crate holds the in-memory universe of systems and bodies, the CSV
//! loader that populates it, and the travel-time router that runs Dijkstra
//! over warp, stargate, bridge and jump-drive movements. Higher-level
//! consumers (the CLI) should only depend on the items exported here instead
//! of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cost;
pub mod error;
pub mod heap;
pub mod loader;
pub mod output;
pub mod parameters;
pub mod routing;
pub mod universe;

pub use error::{Error, Result};
pub use heap::IndexedMinHeap;
pub use loader::{load_universe, load_universe_from_readers};
pub use output::{RouteSummary, WaypointSummary};
pub use parameters::{FatigueModel, Parameters, ShipPreset, SolverConfig};
pub use routing::{
    solve, solve_all_distances, DistanceMap, MovementType, Route, SolveMode, SolveOutcome,
    SolveRequest, Solver, Waypoint,
};
pub use universe::{Body, BodyId, BodyIndex, BodyKind, Position, System, SystemId, Universe};
