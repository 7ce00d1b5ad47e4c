#![allow(dead_code)]

use std::path::PathBuf;

use evenerd_lib::cost::{apply_edge, warp_cost, FatigueState, AU_TO_M, LY_TO_M};
use evenerd_lib::{
    BodyId, BodyKind, MovementType, Parameters, Position, Route, SystemId, Universe,
};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_universe() -> Universe {
    let dir = fixtures_dir();
    evenerd_lib::load_universe(&dir.join("mapDenormalize.csv"), &dir.join("mapJumps.csv"))
        .expect("fixture dataset loads")
}

/// Position `au` astronomical units along the x axis of a system.
pub fn au(au: f64) -> Position {
    Position::new(au * AU_TO_M, 0.0, 0.0)
}

/// Position `ly` light-years along the x axis.
pub fn ly(ly: f64) -> Position {
    Position::new(ly * LY_TO_M, 0.0, 0.0)
}

/// Price a route again hop by hop from body positions and movements.
///
/// Fatigue is threaded through every hop the same way the solver does, starting
/// from a rested traveler at the first waypoint.
pub fn replay_cost(universe: &Universe, route: &Route, parameters: &Parameters) -> f64 {
    let reduction = 1.0 - parameters.jump_range_reduction;
    let mut state = FatigueState::default();
    let mut total = 0.0;

    for hop in route.waypoints.windows(2) {
        let (from, to) = (hop[0].index, hop[1].index);
        let centres = universe
            .system_of(from)
            .position
            .distance_to(&universe.system_of(to).position);
        let raw = match hop[1].movement {
            MovementType::Warp => warp_cost(
                parameters,
                universe.body(from).position.distance_to(&universe.body(to).position),
            ),
            MovementType::Gate => parameters.gate_cost,
            MovementType::Jump => centres / LY_TO_M * reduction,
            MovementType::Bridge => centres * reduction,
            MovementType::Start => panic!("only the first waypoint is a start"),
        };
        let (applied, next) = apply_edge(parameters, hop[1].movement, raw, state);
        total += applied;
        state = next;
    }

    total
}

/// Small fluent builder so scenarios read top to bottom.
#[derive(Default)]
pub struct UniverseBuilder {
    universe: Universe,
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(mut self, id: SystemId, position: Position, security: f64) -> Self {
        self.universe
            .add_system(id, format!("System {id}"), position, security);
        self
    }

    pub fn body(mut self, system: SystemId, id: BodyId, kind: BodyKind, position: Position) -> Self {
        self.universe
            .add_body(system, id, kind, format!("Body {id}"), position)
            .expect("system registered before its bodies");
        self
    }

    /// Two stargates linked in both directions.
    pub fn gates(mut self, a: BodyId, b: BodyId) -> Self {
        self.universe.link_stargate(a, b).expect("gate a exists");
        self.universe.link_stargate(b, a).expect("gate b exists");
        self
    }

    pub fn bridge(mut self, a: BodyId, b: BodyId) -> Self {
        self.universe
            .add_static_bridge(a, b)
            .expect("bodies have no bridge yet");
        self
    }

    pub fn beacon(mut self, body: BodyId, range_ly: f64) -> Self {
        self.universe
            .add_dynamic_bridge(body, range_ly)
            .expect("beacon body exists");
        self
    }

    pub fn build(self) -> Universe {
        self.universe
    }
}

/// Two high-security systems 3 ly apart joined by a stargate pair.
///
/// Station 60000001 sits at the centre of system 30000001, its gate 50000001
/// is 10 AU away. Gate 50000002 sits at the centre of system 30000002 and
/// station 60000002 is 4 AU from it.
pub fn gate_pair() -> Universe {
    UniverseBuilder::new()
        .system(30000001, ly(0.0), 0.9)
        .system(30000002, ly(3.0), 0.9)
        .body(30000001, 60000001, BodyKind::Station, au(0.0))
        .body(30000001, 50000001, BodyKind::Stargate, au(10.0))
        .body(30000002, 50000002, BodyKind::Stargate, au(0.0))
        .body(30000002, 60000002, BodyKind::Station, au(4.0))
        .gates(50000001, 50000002)
        .build()
}

/// Three low-security systems on a line, 5 ly apart, with stargates that
/// only serve as jump arrival points.
///
/// Route of interest: station 60000001 (system 30000001) to station
/// 60000003 (system 30000003). Gates 50000001..50000004 are linked
/// 1 <-> 2 and 3 <-> 4.
pub fn low_sec_line(middle_security: f64) -> Universe {
    UniverseBuilder::new()
        .system(30000001, ly(0.0), 0.3)
        .system(30000002, ly(5.0), middle_security)
        .system(30000003, ly(10.0), 0.4)
        .body(30000001, 60000001, BodyKind::Station, au(0.0))
        .body(30000001, 50000001, BodyKind::Stargate, au(1.0))
        .body(30000002, 50000002, BodyKind::Stargate, au(0.0))
        .body(30000002, 50000003, BodyKind::Stargate, au(6.0))
        .body(30000003, 50000004, BodyKind::Stargate, au(0.0))
        .body(30000003, 60000003, BodyKind::Station, au(2.0))
        .gates(50000001, 50000002)
        .gates(50000003, 50000004)
        .build()
}
