use parking_lot::Mutex;
use rayon::ThreadPool;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::parameters::Parameters;
use crate::universe::{BodyIndex, Universe};

use super::relax::{Origin, Relaxer, SystemCoords};
use super::state::Frontier;
use super::{DistanceMap, Route, Waypoint};

/// State of one solve: the frontier plus the visited/tracked flags.
///
/// Only relevant bodies (and the source and destination) are tracked; the
/// rest never enter the queue and are never relaxed into.
pub(crate) struct Dijkstra<'a> {
    universe: &'a Universe,
    coords: &'a SystemCoords,
    pool: &'a ThreadPool,
    parameters: Parameters,
    source: BodyIndex,
    destination: Option<BodyIndex>,
    destination_system: Option<usize>,
    tracked: Vec<bool>,
    visited: Vec<bool>,
    frontier: Mutex<Frontier>,
    loops: u32,
}

impl<'a> Dijkstra<'a> {
    pub(crate) fn new(
        universe: &'a Universe,
        coords: &'a SystemCoords,
        pool: &'a ThreadPool,
        parameters: Parameters,
        source: BodyIndex,
        destination: Option<BodyIndex>,
    ) -> Self {
        let body_count = universe.body_count();
        let mut frontier = Frontier::new(body_count);
        let mut tracked = vec![false; body_count];

        for body in universe.bodies() {
            let index = body.index;
            if !body.is_relevant() && index != source && Some(index) != destination {
                continue;
            }

            tracked[index] = true;
            let cost = if index == source { 0.0 } else { f64::INFINITY };
            frontier.enqueue(index, cost);
        }

        Self {
            universe,
            coords,
            pool,
            parameters,
            source,
            destination,
            destination_system: destination.map(|index| universe.body(index).system),
            tracked,
            visited: vec![false; body_count],
            frontier: Mutex::new(frontier),
            loops: 0,
        }
    }

    /// Extract, finalize and relax until the destination is finalized, the
    /// queue is exhausted, or only unreachable bodies remain.
    pub(crate) fn run(&mut self) {
        loop {
            let frontier = self.frontier.get_mut();
            let Some((cost, current)) = frontier.queue.extract_min() else {
                break;
            };
            if cost.is_infinite() {
                break;
            }
            let fatigue = frontier.fatigue[current];

            self.visited[current] = true;
            self.loops += 1;
            trace!(body = self.universe.body(current).id, cost, "finalized");

            if Some(current) == self.destination {
                break;
            }

            let origin = Origin {
                index: current,
                cost,
                fatigue,
            };
            let relaxer = Relaxer {
                universe: self.universe,
                coords: self.coords,
                parameters: &self.parameters,
                tracked: &self.tracked,
                visited: &self.visited,
                destination_system: self.destination_system,
            };

            let frontier = self.frontier.get_mut();
            relaxer.warp_set(frontier, &origin);
            relaxer.gate_set(frontier, &origin);
            relaxer.bridge_set(frontier, &origin);

            relaxer.jump_set(&self.frontier, &origin, self.pool);
        }

        debug!(
            source = self.universe.body(self.source).id,
            loops = self.loops,
            "solve finished"
        );
    }

    /// Walk predecessors back from the destination.
    pub(crate) fn route(self) -> Result<Route> {
        let destination = self.destination.ok_or_else(|| Error::InvalidSolveMode {
            message: "route requested from a solve without a destination".to_string(),
        })?;
        let frontier = self.frontier.into_inner();

        let total_cost = frontier.cost[destination];
        if !self.visited[destination] || total_cost.is_infinite() {
            return Err(Error::RouteNotFound {
                start: self.universe.body(self.source).id,
                goal: self.universe.body(destination).id,
            });
        }

        let mut waypoints = Vec::new();
        let mut current = Some(destination);
        while let Some(index) = current {
            waypoints.push(Waypoint {
                body: self.universe.body(index).id,
                index,
                movement: frontier.movement[index],
                cost: frontier.cost[index],
            });
            current = frontier.prev[index];
        }
        waypoints.reverse();

        debug!(
            total_cost,
            loops = self.loops,
            waypoints = waypoints.len(),
            "route found"
        );

        Ok(Route {
            total_cost,
            loop_count: self.loops,
            waypoints,
        })
    }

    /// Finalized costs of every reached body.
    pub(crate) fn distances(self) -> DistanceMap {
        let frontier = self.frontier.into_inner();
        self.visited
            .iter()
            .enumerate()
            .filter(|(index, &visited)| visited && frontier.cost[*index].is_finite())
            .map(|(index, _)| (self.universe.body(index).id, frontier.cost[index]))
            .collect()
    }
}
