//! Neighbour generation and edge relaxation.
//!
//! The graph has no stored edges. For a finalized body the relaxer derives
//! four candidate sets on the fly: warps to the other tracked bodies of its
//! system, its stargate, its static bridge, and jumps to every system within
//! range. Only the jump set scans all systems, so it is the only one that
//! runs on the worker pool.

use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::cost::{apply_edge, warp_cost, FatigueState, LY_TO_M};
use crate::parameters::Parameters;
use crate::universe::{BodyIndex, Position, Universe};

use super::state::Frontier;
use super::MovementType;

/// Systems compared per distance batch.
pub(crate) const LANES: usize = 8;

/// Batches handed to a worker at a time.
const BLOCKS_PER_TASK: usize = 8;

/// Struct-of-arrays copy of system centres, padded to a whole number of lanes.
#[derive(Debug, Clone)]
pub(crate) struct SystemCoords {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    len: usize,
}

impl SystemCoords {
    pub(crate) fn new(universe: &Universe) -> Self {
        let len = universe.system_count();
        let padded = len.div_ceil(LANES) * LANES;

        let mut x = vec![0.0; padded];
        let mut y = vec![0.0; padded];
        let mut z = vec![0.0; padded];
        for (index, system) in universe.systems().iter().enumerate() {
            x[index] = system.position.x;
            y[index] = system.position.y;
            z[index] = system.position.z;
        }

        Self { x, y, z, len }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn blocks(&self) -> usize {
        self.x.len() / LANES
    }

    /// Squared distances from `origin` to the `LANES` systems starting at `base`.
    pub(crate) fn squared_distances(&self, base: usize, origin: &Position) -> [f64; LANES] {
        let xs = &self.x[base..base + LANES];
        let ys = &self.y[base..base + LANES];
        let zs = &self.z[base..base + LANES];

        let mut out = [0.0; LANES];
        for lane in 0..LANES {
            let dx = xs[lane] - origin.x;
            let dy = ys[lane] - origin.y;
            let dz = zs[lane] - origin.z;
            out[lane] = dx * dx + dy * dy + dz * dz;
        }
        out
    }
}

/// The finalized body being expanded.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Origin {
    pub(crate) index: BodyIndex,
    pub(crate) cost: f64,
    pub(crate) fatigue: FatigueState,
}

/// Read-only view of everything relaxation needs besides the frontier.
pub(crate) struct Relaxer<'a> {
    pub(crate) universe: &'a Universe,
    pub(crate) coords: &'a SystemCoords,
    pub(crate) parameters: &'a Parameters,
    pub(crate) tracked: &'a [bool],
    pub(crate) visited: &'a [bool],
    pub(crate) destination_system: Option<usize>,
}

impl Relaxer<'_> {
    fn accepts(&self, target: BodyIndex) -> bool {
        self.tracked[target] && !self.visited[target]
    }

    /// Try to reach `target` from `origin` over an edge of raw cost `raw`.
    pub(crate) fn relax(
        &self,
        frontier: &mut Frontier,
        origin: &Origin,
        target: BodyIndex,
        raw: f64,
        movement: MovementType,
    ) -> bool {
        if !self.accepts(target) {
            return false;
        }

        let (applied, fatigue) = apply_edge(self.parameters, movement, raw, origin.fatigue);
        let candidate = origin.cost + applied;
        if !candidate.is_finite() || candidate > frontier.cost[target] {
            return false;
        }

        frontier.improve(target, origin.index, candidate, movement, fatigue);
        true
    }

    /// Warps to every other tracked body in the origin's system.
    pub(crate) fn warp_set(&self, frontier: &mut Frontier, origin: &Origin) {
        let body = self.universe.body(origin.index);
        let system = self.universe.system_of(origin.index);

        for &target in system.bodies() {
            if target == origin.index || !self.accepts(target) {
                continue;
            }
            let distance = body
                .position
                .distance_to(&self.universe.body(target).position);
            self.relax(
                frontier,
                origin,
                target,
                warp_cost(self.parameters, distance),
                MovementType::Warp,
            );
        }
    }

    /// The origin's stargate, when gates are enabled.
    pub(crate) fn gate_set(&self, frontier: &mut Frontier, origin: &Origin) {
        if !self.parameters.gates_enabled() {
            return;
        }
        if let Some(target) = self.universe.body(origin.index).stargate {
            self.relax(
                frontier,
                origin,
                target,
                self.parameters.gate_cost,
                MovementType::Gate,
            );
        }
    }

    /// The origin's static bridge partner, used only without a jump drive.
    ///
    /// The raw distance is the distance between the two system centres in
    /// metres, reduced by the profile's jump range reduction.
    pub(crate) fn bridge_set(&self, frontier: &mut Frontier, origin: &Origin) {
        if self.parameters.jump_drive_range().is_some() {
            return;
        }
        let Some(partner) = self.universe.body(origin.index).bridge else {
            return;
        };

        let from = self.universe.system_of(origin.index).position;
        let to = self.universe.system_of(partner).position;
        let raw = from.distance_to(&to) * (1.0 - self.parameters.jump_range_reduction);
        self.relax(frontier, origin, partner, raw, MovementType::Bridge);
    }

    /// Jumps to every low-security system in range, fanned out over `pool`.
    ///
    /// A body's local jump range takes precedence over the traveler's drive.
    pub(crate) fn jump_set(&self, frontier: &Mutex<Frontier>, origin: &Origin, pool: &ThreadPool) {
        let body = self.universe.body(origin.index);
        let Some(range) = body
            .local_jump_range()
            .or_else(|| self.parameters.jump_drive_range())
        else {
            return;
        };

        let range_sq = (range * LY_TO_M).powi(2);
        let origin_system = body.system;
        let center = self.universe.systems()[origin_system].position;

        pool.install(|| {
            (0..self.coords.blocks())
                .into_par_iter()
                .with_min_len(BLOCKS_PER_TASK)
                .for_each(|block| {
                    self.jump_block(frontier, origin, block * LANES, &center, range_sq, origin_system)
                });
        });
    }

    fn jump_block(
        &self,
        frontier: &Mutex<Frontier>,
        origin: &Origin,
        base: usize,
        center: &Position,
        range_sq: f64,
        origin_system: usize,
    ) {
        let distances = self.coords.squared_distances(base, center);

        for (lane, &distance_sq) in distances.iter().enumerate() {
            let index = base + lane;
            if index >= self.coords.len() || distance_sq > range_sq || index == origin_system {
                continue;
            }

            let system = &self.universe.systems()[index];
            if system.is_high_security() {
                continue;
            }

            // Arrivals must be gate-like unless this is where the route ends,
            // since the destination may be a plain celestial.
            let targets = if Some(index) == self.destination_system {
                system.bodies()
            } else {
                system.gate_like_bodies()
            };
            if !targets.iter().any(|&target| self.accepts(target)) {
                continue;
            }

            let distance_ly =
                distance_sq.sqrt() / LY_TO_M * (1.0 - self.parameters.jump_range_reduction);

            let mut guard = frontier.lock();
            for &target in targets {
                self.relax(&mut guard, origin, target, distance_ly, MovementType::Jump);
            }
        }
    }
}
