use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// External identifier of a body (celestial, stargate or station).
pub type BodyId = i64;

/// External identifier of a solar system.
pub type SystemId = i64;

/// Dense, zero-based index of a body. All per-solve state is indexed by it.
pub type BodyIndex = usize;

/// Group id the dataset uses for suns.
const SUN_GROUP_ID: i64 = 6;

/// Security level from which a system is off limits to jump drives.
pub const HIGH_SECURITY: f64 = 0.5;

/// Cartesian coordinates in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance, used for range filtering before any square root.
    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }
}

/// Classification of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Celestial,
    Station,
    Stargate,
}

impl BodyKind {
    /// Stargates and stations are valid arrival points for inter-system jumps.
    pub fn is_gate_like(self) -> bool {
        !matches!(self, BodyKind::Celestial)
    }
}

/// A node of the routing graph.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub index: BodyIndex,
    pub name: String,
    pub kind: BodyKind,
    pub group_id: Option<i64>,
    pub position: Position,
    /// Dense index of the owning system.
    pub system: usize,
    /// Directed stargate link.
    pub stargate: Option<BodyIndex>,
    /// Symmetric static bridge partner.
    pub bridge: Option<BodyIndex>,
    /// Local jump range override in light-years.
    pub jump_range: Option<f64>,
}

impl Body {
    /// Local jump range, treating NaN the same as no override.
    pub fn local_jump_range(&self) -> Option<f64> {
        self.jump_range.filter(|range| !range.is_nan())
    }

    /// Whether the body may serve as an intermediate hop.
    pub fn is_relevant(&self) -> bool {
        self.stargate.is_some() || self.bridge.is_some() || self.local_jump_range().is_some()
    }

    fn is_jump_arrival(&self) -> bool {
        self.kind.is_gate_like() || self.bridge.is_some() || self.local_jump_range().is_some()
    }
}

/// A solar system and the bodies it owns.
///
/// Bodies are kept partitioned: plain celestials first, then the gate-like
/// range (stargates, stations, and any celestial with a bridge or a local
/// jump range) which is what inter-system jumps may arrive at.
#[derive(Debug, Clone)]
pub struct System {
    pub id: SystemId,
    pub index: usize,
    pub name: String,
    pub position: Position,
    pub security: f64,
    bodies: Vec<BodyIndex>,
    gate_start: usize,
}

impl System {
    /// All bodies of the system.
    pub fn bodies(&self) -> &[BodyIndex] {
        &self.bodies
    }

    /// Celestials that cannot be jumped to.
    pub fn plain_bodies(&self) -> &[BodyIndex] {
        &self.bodies[..self.gate_start]
    }

    /// Bodies that are valid arrival points for inter-system jumps.
    pub fn gate_like_bodies(&self) -> &[BodyIndex] {
        &self.bodies[self.gate_start..]
    }

    pub fn is_high_security(&self) -> bool {
        self.security >= HIGH_SECURITY
    }

    fn insert_body(&mut self, body: BodyIndex, gate_like: bool) {
        if gate_like {
            self.bodies.push(body);
        } else {
            self.bodies.insert(self.gate_start, body);
            self.gate_start += 1;
        }
    }

    fn promote(&mut self, body: BodyIndex) {
        let Some(slot) = self.plain_bodies().iter().position(|&b| b == body) else {
            return;
        };
        let last_plain = self.gate_start - 1;
        self.bodies.swap(slot, last_plain);
        self.gate_start = last_plain;
    }
}

/// In-memory, read-only (during a solve) store of systems and bodies.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    systems: Vec<System>,
    bodies: Vec<Body>,
    system_map: HashMap<SystemId, usize>,
    body_map: HashMap<BodyId, BodyIndex>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system. Re-registering an id replaces nothing and returns the existing index.
    pub fn add_system(
        &mut self,
        id: SystemId,
        name: impl Into<String>,
        position: Position,
        security: f64,
    ) -> usize {
        if let Some(&index) = self.system_map.get(&id) {
            return index;
        }

        let index = self.systems.len();
        self.systems.push(System {
            id,
            index,
            name: name.into(),
            position,
            security,
            bodies: Vec::new(),
            gate_start: 0,
        });
        self.system_map.insert(id, index);
        index
    }

    /// Register a body inside an existing system and return its dense index.
    pub fn add_body(
        &mut self,
        system_id: SystemId,
        id: BodyId,
        kind: BodyKind,
        name: impl Into<String>,
        position: Position,
    ) -> Result<BodyIndex> {
        let system = *self
            .system_map
            .get(&system_id)
            .ok_or(Error::UnknownSystem { id: system_id })?;
        if self.body_map.contains_key(&id) {
            return Err(Error::DuplicateBody { id });
        }

        let index = self.bodies.len();
        self.bodies.push(Body {
            id,
            index,
            name: name.into(),
            kind,
            group_id: None,
            position,
            system,
            stargate: None,
            bridge: None,
            jump_range: None,
        });
        self.body_map.insert(id, index);
        self.systems[system].insert_body(index, kind.is_gate_like());
        Ok(index)
    }

    /// Record the dataset group of a body (suns are group 6).
    pub fn set_group(&mut self, body: BodyId, group_id: i64) -> Result<()> {
        let index = self.body_index(body)?;
        self.bodies[index].group_id = Some(group_id);
        Ok(())
    }

    /// Replace the display name of a body.
    pub fn rename_body(&mut self, body: BodyId, name: impl Into<String>) -> Result<()> {
        let index = self.body_index(body)?;
        self.bodies[index].name = name.into();
        Ok(())
    }

    /// Create a directed stargate link.
    pub fn link_stargate(&mut self, from: BodyId, to: BodyId) -> Result<()> {
        let from = self.body_index(from)?;
        let to = self.body_index(to)?;
        self.bodies[from].stargate = Some(to);
        Ok(())
    }

    /// Pair two bodies with a symmetric static bridge.
    ///
    /// Bridges are strictly pairwise: a body that already has a partner is rejected.
    pub fn add_static_bridge(&mut self, a: BodyId, b: BodyId) -> Result<()> {
        let ia = self.body_index(a)?;
        let ib = self.body_index(b)?;
        if ia == ib {
            return Err(Error::SelfBridge { body: a });
        }

        if self.bodies[ia].bridge.is_some() {
            return Err(Error::DuplicateBridge { body: a });
        }
        if self.bodies[ib].bridge.is_some() {
            return Err(Error::DuplicateBridge { body: b });
        }

        self.bodies[ia].bridge = Some(ib);
        self.bodies[ib].bridge = Some(ia);
        self.refresh_arrival(ia);
        self.refresh_arrival(ib);
        debug!(a, b, "added static bridge");
        Ok(())
    }

    /// Attach a local jump range (light-years) to a body, e.g. a beacon.
    ///
    /// NaN leaves the body without jump capability; negative or infinite ranges
    /// are rejected.
    pub fn add_dynamic_bridge(&mut self, body: BodyId, range_ly: f64) -> Result<()> {
        let index = self.body_index(body)?;
        if range_ly < 0.0 || range_ly.is_infinite() {
            return Err(Error::InvalidParameters {
                message: format!(
                    "jump range of body {body} must be a non-negative distance, got {range_ly}"
                ),
            });
        }
        self.bodies[index].jump_range = (!range_ly.is_nan()).then_some(range_ly);
        self.refresh_arrival(index);
        debug!(body, range_ly, "added dynamic bridge");
        Ok(())
    }

    fn refresh_arrival(&mut self, index: BodyIndex) {
        let body = &self.bodies[index];
        if body.is_jump_arrival() {
            let system = body.system;
            self.systems[system].promote(index);
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Body by dense index.
    pub fn body(&self, index: BodyIndex) -> &Body {
        &self.bodies[index]
    }

    /// Owning system of a body.
    pub fn system_of(&self, index: BodyIndex) -> &System {
        &self.systems[self.bodies[index].system]
    }

    /// Resolve an external body id to its dense index.
    pub fn body_index(&self, id: BodyId) -> Result<BodyIndex> {
        self.body_map
            .get(&id)
            .copied()
            .ok_or(Error::UnknownBody { id })
    }

    pub fn body_by_id(&self, id: BodyId) -> Option<&Body> {
        self.body_map.get(&id).map(|&index| &self.bodies[index])
    }

    pub fn system_by_id(&self, id: SystemId) -> Option<&System> {
        self.system_map.get(&id).map(|&index| &self.systems[index])
    }

    /// Resolve an id that may name either a body or a system.
    ///
    /// A system id resolves to its first station, otherwise its sun, otherwise
    /// its first body.
    pub fn body_or_default(&self, id: i64) -> Result<BodyIndex> {
        let Some(system) = self.system_by_id(id) else {
            return self.body_index(id);
        };

        let bodies = system.bodies();
        let station = bodies
            .iter()
            .copied()
            .find(|&b| self.bodies[b].kind == BodyKind::Station);
        let sun = || {
            bodies
                .iter()
                .copied()
                .find(|&b| self.bodies[b].group_id == Some(SUN_GROUP_ID))
        };

        let resolved = station
            .or_else(sun)
            .or_else(|| bodies.first().copied())
            .ok_or(Error::UnknownBody { id })?;

        debug!(
            system = id,
            body = self.bodies[resolved].id,
            "resolved system id to body"
        );
        Ok(resolved)
    }
}
