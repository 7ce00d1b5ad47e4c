//! Handlers for CLI subcommands.
//!
//! `main.rs` parses arguments and dispatches here; every handler receives a
//! loaded [`Universe`] (except `parameters`) and the effective traveler profile.

pub mod batch;
pub mod distances;
pub mod parameters;
pub mod route;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use evenerd_lib::{
    load_universe, BodyId, BodyIndex, FatigueModel, Parameters, ShipPreset, Universe,
};

/// Dataset files plus the extra links layered on top of them.
#[derive(Debug, Clone)]
pub struct DatasetArgs {
    pub denormalize: PathBuf,
    pub jumps: PathBuf,
    pub bridges: Vec<BridgeSpec>,
    pub beacons: Vec<BeaconSpec>,
}

/// A static bridge between two bodies, written `A:B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeSpec {
    pub a: BodyId,
    pub b: BodyId,
}

/// A local jump range attached to a body, written `BODY:RANGE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeaconSpec {
    pub body: BodyId,
    pub range_ly: f64,
}

pub fn parse_bridge(value: &str) -> std::result::Result<BridgeSpec, String> {
    let (a, b) = value
        .split_once(':')
        .ok_or_else(|| format!("expected A:B, got '{value}'"))?;
    Ok(BridgeSpec {
        a: a.trim().parse().map_err(|_| format!("invalid body id '{a}'"))?,
        b: b.trim().parse().map_err(|_| format!("invalid body id '{b}'"))?,
    })
}

pub fn parse_beacon(value: &str) -> std::result::Result<BeaconSpec, String> {
    let (body, range) = value
        .split_once(':')
        .ok_or_else(|| format!("expected BODY:RANGE, got '{value}'"))?;
    Ok(BeaconSpec {
        body: body
            .trim()
            .parse()
            .map_err(|_| format!("invalid body id '{body}'"))?,
        range_ly: range
            .trim()
            .parse()
            .map_err(|_| format!("invalid range '{range}'"))?,
    })
}

impl DatasetArgs {
    /// Load both CSV exports and apply the requested bridges and beacons.
    pub fn load(&self) -> Result<Universe> {
        let mut universe = load_universe(&self.denormalize, &self.jumps).with_context(|| {
            format!(
                "failed to load dataset from {} and {}",
                self.denormalize.display(),
                self.jumps.display()
            )
        })?;

        for bridge in &self.bridges {
            universe
                .add_static_bridge(bridge.a, bridge.b)
                .with_context(|| format!("failed to add bridge {}:{}", bridge.a, bridge.b))?;
        }
        for beacon in &self.beacons {
            universe
                .add_dynamic_bridge(beacon.body, beacon.range_ly)
                .with_context(|| format!("failed to add beacon at {}", beacon.body))?;
        }

        Ok(universe)
    }
}

/// Traveler profile selection: a preset or JSON file plus field overrides.
#[derive(Debug, Clone, Default)]
pub struct ProfileArgs {
    pub ship: Option<ShipPreset>,
    pub params: Option<PathBuf>,
    pub jump: Option<f64>,
    pub warp: Option<f64>,
    pub align: Option<f64>,
    pub gate: Option<f64>,
    pub reduction: Option<f64>,
    pub fatigue_model: Option<FatigueModel>,
}

impl ProfileArgs {
    /// Build the effective profile. A JSON file takes precedence over the preset;
    /// individual overrides are applied last.
    pub fn resolve(&self) -> Result<Parameters> {
        let mut parameters = match &self.params {
            Some(path) => Parameters::from_json_file(path)
                .with_context(|| format!("failed to load parameters from {}", path.display()))?,
            None => self.ship.unwrap_or(ShipPreset::Frigate).parameters(),
        };

        if let Some(jump) = self.jump {
            parameters.jump_range = Some(jump);
        }
        if let Some(warp) = self.warp {
            parameters.warp_speed = warp;
        }
        if let Some(align) = self.align {
            parameters.align_time = align;
        }
        if let Some(gate) = self.gate {
            parameters.gate_cost = gate;
        }
        if let Some(reduction) = self.reduction {
            parameters.jump_range_reduction = reduction;
        }
        if let Some(model) = self.fatigue_model {
            parameters.fatigue_model = model;
        }

        parameters
            .validate()
            .context("invalid traveler profile")?;
        Ok(parameters)
    }
}

/// Resolve a body or system id to the body a solve should use.
pub fn resolve_body(universe: &Universe, id: i64) -> Result<BodyIndex> {
    let index = universe
        .body_or_default(id)
        .map_err(|_| anyhow!("unknown body or system id {id}"))?;
    debug!(id, body = universe.body(index).id, "resolved endpoint");
    Ok(index)
}
