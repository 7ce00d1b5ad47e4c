//! Traveler profiles and solver configuration.
//!
//! A [`Parameters`] value describes the ship being routed: how fast it warps,
//! how long it takes to align, what a stargate costs it, and whether (and how
//! far) it can jump. Profiles are immutable for the duration of a solve and can
//! be built from a [`ShipPreset`] or deserialized from JSON.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of workers cooperating on the jump relaxation phase.
pub const DEFAULT_THREADS: usize = 3;

/// Policy deciding what a jump costs and how fatigue feeds back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FatigueModel {
    /// Every jump costs a flat ten seconds.
    Ignore,
    /// Jumps cost the reactivation delay they incur.
    #[default]
    ReactivationCost,
    /// Jumps cost the fatigue they incur.
    FatigueCost,
    /// Jumps cost the reactivation timer still running at the source.
    ReactivationCountdown,
    /// Jumps cost the fatigue still running at the source.
    FatigueCountdown,
    /// Reserved; jumping is effectively disabled.
    Full,
}

impl FatigueModel {
    pub const ALL: [FatigueModel; 6] = [
        FatigueModel::Ignore,
        FatigueModel::ReactivationCost,
        FatigueModel::FatigueCost,
        FatigueModel::ReactivationCountdown,
        FatigueModel::FatigueCountdown,
        FatigueModel::Full,
    ];
}

impl FromStr for FatigueModel {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = normalize(value);
        FatigueModel::ALL
            .into_iter()
            .find(|model| model.to_string() == normalized)
            .ok_or_else(|| Error::InvalidParameters {
                message: format!("unknown fatigue model '{value}'"),
            })
    }
}

impl fmt::Display for FatigueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            FatigueModel::Ignore => "ignore",
            FatigueModel::ReactivationCost => "reactivation-cost",
            FatigueModel::FatigueCost => "fatigue-cost",
            FatigueModel::ReactivationCountdown => "reactivation-countdown",
            FatigueModel::FatigueCountdown => "fatigue-countdown",
            FatigueModel::Full => "full",
        };
        f.write_str(value)
    }
}

/// Traveler profile used for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Jump drive range in light-years. `None` or NaN disables the jump drive.
    #[serde(default)]
    pub jump_range: Option<f64>,
    /// Warp speed in AU/s.
    pub warp_speed: f64,
    /// Align time in seconds.
    pub align_time: f64,
    /// Seconds spent per stargate. Negative disables gates.
    pub gate_cost: f64,
    /// Fraction by which jump distances are reduced before costing.
    #[serde(default)]
    pub jump_range_reduction: f64,
    #[serde(default)]
    pub fatigue_model: FatigueModel,
}

impl Parameters {
    /// Subcapital-style profile without a jump drive.
    pub const fn new(warp_speed: f64, align_time: f64, gate_cost: f64) -> Self {
        Self {
            jump_range: None,
            warp_speed,
            align_time,
            gate_cost,
            jump_range_reduction: 0.0,
            fatigue_model: FatigueModel::ReactivationCost,
        }
    }

    pub const fn with_jump_range(mut self, jump_range: f64) -> Self {
        self.jump_range = Some(jump_range);
        self
    }

    pub const fn with_fatigue_model(mut self, fatigue_model: FatigueModel) -> Self {
        self.fatigue_model = fatigue_model;
        self
    }

    pub const fn with_jump_range_reduction(mut self, reduction: f64) -> Self {
        self.jump_range_reduction = reduction;
        self
    }

    /// Configured jump range, treating NaN the same as no jump drive.
    pub fn jump_drive_range(&self) -> Option<f64> {
        self.jump_range.filter(|range| !range.is_nan())
    }

    pub fn gates_enabled(&self) -> bool {
        self.gate_cost >= 0.0
    }

    /// Reject values the cost model cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.warp_speed.is_finite() || self.warp_speed <= 0.0 {
            return Err(Error::InvalidParameters {
                message: format!("warp speed must be positive, got {}", self.warp_speed),
            });
        }
        if !self.align_time.is_finite() || self.align_time < 0.0 {
            return Err(Error::InvalidParameters {
                message: format!("align time must be non-negative, got {}", self.align_time),
            });
        }
        if self.gate_cost.is_nan() {
            return Err(Error::InvalidParameters {
                message: "gate cost must be a number".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.jump_range_reduction) {
            return Err(Error::InvalidParameters {
                message: format!(
                    "jump range reduction must lie within [0, 1], got {}",
                    self.jump_range_reduction
                ),
            });
        }
        if let Some(range) = self.jump_drive_range() {
            if range < 0.0 {
                return Err(Error::InvalidParameters {
                    message: format!("jump range must be non-negative, got {range}"),
                });
            }
        }
        Ok(())
    }

    /// Load a profile from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let parameters: Parameters = serde_json::from_reader(reader)?;
        parameters.validate()?;
        Ok(parameters)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        ShipPreset::Frigate.parameters()
    }
}

/// Built-in ship profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShipPreset {
    Frigate,
    Destroyer,
    Cruiser,
    Battlecruiser,
    Battleship,
    Carrier,
    Dreadnought,
    Supercarrier,
    Titan,
    Rorqual,
    JumpFreighter,
}

impl ShipPreset {
    pub const ALL: [ShipPreset; 11] = [
        ShipPreset::Frigate,
        ShipPreset::Destroyer,
        ShipPreset::Cruiser,
        ShipPreset::Battlecruiser,
        ShipPreset::Battleship,
        ShipPreset::Carrier,
        ShipPreset::Dreadnought,
        ShipPreset::Supercarrier,
        ShipPreset::Titan,
        ShipPreset::Rorqual,
        ShipPreset::JumpFreighter,
    ];

    pub const fn parameters(self) -> Parameters {
        match self {
            ShipPreset::Frigate => Parameters::new(5.0, 3.0, 10.0),
            ShipPreset::Destroyer => Parameters::new(4.5, 4.0, 10.0),
            ShipPreset::Cruiser => Parameters::new(3.0, 7.0, 10.0),
            ShipPreset::Battlecruiser => Parameters::new(2.7, 8.0, 10.0),
            ShipPreset::Battleship => Parameters::new(2.0, 12.0, 10.0),
            // Capitals cannot use stargates.
            ShipPreset::Carrier => Parameters::new(1.5, 30.0, -1.0).with_jump_range(7.0),
            ShipPreset::Dreadnought => Parameters::new(1.5, 40.0, -1.0).with_jump_range(7.0),
            ShipPreset::Supercarrier => Parameters::new(1.5, 40.0, -1.0).with_jump_range(6.0),
            ShipPreset::Titan => Parameters::new(1.37, 60.0, -1.0).with_jump_range(6.0),
            ShipPreset::Rorqual => Parameters::new(1.5, 50.0, -1.0).with_jump_range(10.0),
            ShipPreset::JumpFreighter => Parameters::new(1.5, 40.0, -1.0).with_jump_range(10.0),
        }
    }
}

impl fmt::Display for ShipPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ShipPreset::Frigate => "frigate",
            ShipPreset::Destroyer => "destroyer",
            ShipPreset::Cruiser => "cruiser",
            ShipPreset::Battlecruiser => "battlecruiser",
            ShipPreset::Battleship => "battleship",
            ShipPreset::Carrier => "carrier",
            ShipPreset::Dreadnought => "dreadnought",
            ShipPreset::Supercarrier => "supercarrier",
            ShipPreset::Titan => "titan",
            ShipPreset::Rorqual => "rorqual",
            ShipPreset::JumpFreighter => "jump-freighter",
        };
        f.write_str(value)
    }
}

impl FromStr for ShipPreset {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = normalize(value);
        ShipPreset::ALL
            .into_iter()
            .find(|preset| preset.to_string() == normalized)
            .ok_or_else(|| Error::InvalidParameters {
                message: format!("unknown ship preset '{value}'"),
            })
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}

/// Solver tuning knobs that do not change results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Size of the worker pool used for jump relaxation.
    pub threads: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
        }
    }
}
