use std::fmt::Write;

use serde::Serialize;

use crate::routing::{MovementType, Route};
use crate::universe::{BodyId, SystemId, Universe};

/// Waypoint with resolved body and system names.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaypointSummary {
    pub id: BodyId,
    pub name: String,
    pub system_id: SystemId,
    pub system_name: String,
    pub movement: MovementType,
    /// Seconds elapsed on arrival.
    pub cost: f64,
}

impl WaypointSummary {
    fn describe(&self) -> String {
        match self.movement {
            MovementType::Start => format!("Start at {} in {}", self.name, self.system_name),
            MovementType::Warp => format!("Warp to {}", self.name),
            MovementType::Gate => format!("Gate into {}", self.system_name),
            MovementType::Jump => format!("Jump to {} in {}", self.name, self.system_name),
            MovementType::Bridge => format!("Bridge to {} in {}", self.name, self.system_name),
        }
    }
}

/// Structured representation of a route that callers can print or serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub total_cost: f64,
    pub hops: usize,
    pub loops: u32,
    pub waypoints: Vec<WaypointSummary>,
}

impl RouteSummary {
    /// Resolve the names of every waypoint of `route`.
    pub fn from_route(universe: &Universe, route: &Route) -> Self {
        let waypoints = route
            .waypoints
            .iter()
            .map(|waypoint| {
                let body = universe.body(waypoint.index);
                let system = universe.system_of(waypoint.index);
                WaypointSummary {
                    id: body.id,
                    name: body.name.clone(),
                    system_id: system.id,
                    system_name: system.name.clone(),
                    movement: waypoint.movement,
                    cost: waypoint.cost,
                }
            })
            .collect();

        Self {
            total_cost: route.total_cost,
            hops: route.hop_count(),
            loops: route.loop_count,
            waypoints,
        }
    }

    /// Human-readable listing: a header, the travel time, then one line per waypoint.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();

        if let (Some(first), Some(last)) = (self.waypoints.first(), self.waypoints.last()) {
            let _ = writeln!(
                buffer,
                "{} to {} ({} hops)",
                first.system_name, last.system_name, self.hops
            );
        }
        let _ = writeln!(
            buffer,
            "Estimated travel time: {}",
            format_duration(self.total_cost)
        );
        for waypoint in &self.waypoints {
            let _ = writeln!(buffer, "{}", waypoint.describe());
        }

        buffer
    }
}

/// Format whole seconds as `H:MM:SS`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!(
        "{}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
