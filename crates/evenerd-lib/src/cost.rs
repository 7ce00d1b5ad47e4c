//! Cost functions for each movement primitive and the fatigue model.
//!
//! All costs are in seconds. Warp cost follows the in-game acceleration,
//! cruise and deceleration profile; jump and bridge costs depend on the
//! [`FatigueModel`] selected in [`Parameters`].

use crate::parameters::{FatigueModel, Parameters};
use crate::routing::MovementType;

/// Metres per astronomical unit.
pub const AU_TO_M: f64 = 149_597_870_700.0;

/// Metres per light-year.
pub const LY_TO_M: f64 = 9_460_730_472_580_800.0;

/// Fatigue never exceeds one week.
pub const MAX_FATIGUE: f64 = 60.0 * 60.0 * 24.0 * 7.0;

/// Minimum fatigue a jump starts from.
const BASE_FATIGUE: f64 = 600.0;

/// Warp exit speed in m/s.
const WARP_DROPOUT_SPEED: f64 = 100.0;

/// Flat jump cost when fatigue is ignored, also added by the countdown models.
const FLAT_JUMP_COST: f64 = 10.0;

/// Time in seconds to warp `distance` metres at `warp_speed` AU/s.
///
/// Short warps that never reach full speed blend acceleration and
/// deceleration into a lower peak speed and skip the cruise phase. Hops so
/// short that the closed form turns negative are clamped to zero.
pub fn warp_time(distance: f64, warp_speed: f64) -> f64 {
    let k_accel = warp_speed;
    let k_decel = (warp_speed / 3.0).min(2.0);

    let mut v_max = warp_speed * AU_TO_M;

    let d_accel = AU_TO_M;
    let d_decel = v_max / k_decel;
    let d_min = d_accel + d_decel;

    let mut cruise_time = 0.0;

    if d_min > distance {
        v_max = distance * k_accel * k_decel / (k_accel + k_decel);
    } else {
        cruise_time = (distance - d_min) / v_max;
    }

    let t_accel = (v_max / k_accel).ln() / k_accel;
    let t_decel = (v_max / WARP_DROPOUT_SPEED).ln() / k_decel;

    (cruise_time + t_accel + t_decel).max(0.0)
}

/// Align plus warp time between two bodies `distance` metres apart.
pub fn warp_cost(parameters: &Parameters, distance: f64) -> f64 {
    parameters.align_time + warp_time(distance, parameters.warp_speed)
}

/// Per-body jump fatigue and reactivation timers, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FatigueState {
    pub fatigue: f64,
    pub reactivation: f64,
}

impl FatigueState {
    /// State after jumping `distance_ly` light-years from this state.
    pub fn after_jump(self, distance_ly: f64) -> Self {
        let scale = distance_ly + 1.0;
        Self {
            fatigue: (self.fatigue.max(BASE_FATIGUE) * scale).min(MAX_FATIGUE),
            reactivation: (self.fatigue / BASE_FATIGUE).max(60.0 * scale),
        }
    }

    /// State after spending `cost` seconds on anything but a jump.
    pub fn after_travel(self, cost: f64) -> Self {
        Self {
            fatigue: (self.fatigue - cost).max(0.0),
            reactivation: (self.reactivation - cost).max(0.0),
        }
    }
}

/// Cost of a jump or bridge of `distance_ly` from a body in `source` state.
pub fn jump_cost(model: FatigueModel, distance_ly: f64, source: FatigueState) -> f64 {
    match model {
        FatigueModel::Ignore => FLAT_JUMP_COST,
        FatigueModel::ReactivationCost => 60.0 * (distance_ly + 1.0),
        FatigueModel::FatigueCost => 600.0 * distance_ly,
        FatigueModel::ReactivationCountdown => source.reactivation + FLAT_JUMP_COST,
        FatigueModel::FatigueCountdown => source.fatigue + FLAT_JUMP_COST,
        FatigueModel::Full => f64::INFINITY,
    }
}

/// Applied cost of an edge plus the fatigue state it leaves the target in.
///
/// `raw` is the warp/gate cost for those movements and the (reduced) jump
/// distance for jumps and bridges.
pub fn apply_edge(
    parameters: &Parameters,
    movement: MovementType,
    raw: f64,
    source: FatigueState,
) -> (f64, FatigueState) {
    if movement.is_jump() {
        let cost = jump_cost(parameters.fatigue_model, raw, source);
        (cost, source.after_jump(raw))
    } else {
        (raw, source.after_travel(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * a.abs().max(1.0)
    }

    #[test]
    fn long_warp_includes_cruise_phase() {
        let warp_speed = 3.0;
        let distance = 50.0 * AU_TO_M;
        let v_max = warp_speed * AU_TO_M;
        let k_decel = 1.0;
        let cruise = (distance - (AU_TO_M + v_max / k_decel)) / v_max;
        let expected = cruise
            + (v_max / warp_speed).ln() / warp_speed
            + (v_max / 100.0).ln() / k_decel;

        assert!(approx(warp_time(distance, warp_speed), expected));
    }

    #[test]
    fn short_warp_skips_cruise_phase() {
        let warp_speed = 6.0;
        let distance = 0.5 * AU_TO_M;
        let k_decel = 2.0;
        let v_max = distance * warp_speed * k_decel / (warp_speed + k_decel);
        let expected = (v_max / warp_speed).ln() / warp_speed + (v_max / 100.0).ln() / k_decel;

        assert!(approx(warp_time(distance, warp_speed), expected));
    }

    #[test]
    fn warp_time_grows_with_distance() {
        let near = warp_time(1.0 * AU_TO_M, 3.0);
        let far = warp_time(30.0 * AU_TO_M, 3.0);
        assert!(far > near);
        assert!(near > 0.0);
    }

    #[test]
    fn zero_distance_warp_is_clamped() {
        assert_eq!(warp_time(0.0, 3.0), 0.0);
    }

    #[test]
    fn warp_cost_adds_align_time() {
        let parameters = Parameters::new(3.0, 7.0, 10.0);
        let distance = 10.0 * AU_TO_M;
        assert!(approx(
            warp_cost(&parameters, distance),
            7.0 + warp_time(distance, 3.0)
        ));
    }

    #[test]
    fn jump_cost_table() {
        let state = FatigueState {
            fatigue: 1200.0,
            reactivation: 300.0,
        };
        assert_eq!(jump_cost(FatigueModel::Ignore, 5.0, state), 10.0);
        assert_eq!(jump_cost(FatigueModel::ReactivationCost, 5.0, state), 360.0);
        assert_eq!(jump_cost(FatigueModel::FatigueCost, 5.0, state), 3000.0);
        assert_eq!(
            jump_cost(FatigueModel::ReactivationCountdown, 5.0, state),
            310.0
        );
        assert_eq!(jump_cost(FatigueModel::FatigueCountdown, 5.0, state), 1210.0);
        assert!(jump_cost(FatigueModel::Full, 5.0, state).is_infinite());
    }

    #[test]
    fn jump_accumulates_fatigue() {
        let fresh = FatigueState::default().after_jump(4.0);
        assert_eq!(fresh.fatigue, 3000.0);
        assert_eq!(fresh.reactivation, 300.0);

        let tired = FatigueState {
            fatigue: 100_000.0,
            reactivation: 0.0,
        }
        .after_jump(9.0);
        assert_eq!(tired.fatigue, MAX_FATIGUE);
        assert_eq!(tired.reactivation, 600.0);
    }

    #[test]
    fn travel_decays_timers() {
        let state = FatigueState {
            fatigue: 100.0,
            reactivation: 30.0,
        }
        .after_travel(50.0);
        assert_eq!(state.fatigue, 50.0);
        assert_eq!(state.reactivation, 0.0);
    }

    #[test]
    fn apply_edge_dispatches_on_movement() {
        let parameters = Parameters::new(3.0, 7.0, 10.0).with_fatigue_model(FatigueModel::Ignore);
        let source = FatigueState {
            fatigue: 700.0,
            reactivation: 20.0,
        };

        let (cost, state) = apply_edge(&parameters, MovementType::Gate, 10.0, source);
        assert_eq!(cost, 10.0);
        assert_eq!(state.fatigue, 690.0);
        assert_eq!(state.reactivation, 10.0);

        let (cost, state) = apply_edge(&parameters, MovementType::Jump, 2.0, source);
        assert_eq!(cost, 10.0);
        assert_eq!(state.fatigue, 2100.0);
        assert_eq!(state.reactivation, 180.0);
    }
}
