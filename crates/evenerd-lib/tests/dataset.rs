mod common;

use std::fs;

use common::{fixture_universe, fixtures_dir};
use evenerd_lib::{
    load_universe, BodyKind, Error, FatigueModel, MovementType, Parameters, RouteSummary,
    ShipPreset, Solver, SolverConfig,
};
use tempfile::tempdir;

#[test]
fn fixture_dataset_loads() {
    let universe = fixture_universe();

    assert_eq!(universe.system_count(), 4);
    assert_eq!(universe.body_count(), 14);
    assert!(universe.system_by_id(31000001).is_none());
    assert!(universe.body_by_id(40000007).is_none());

    let gate = universe.body_by_id(50000001).expect("gate loaded");
    assert_eq!(gate.kind, BodyKind::Stargate);
    assert_eq!(gate.name, "Alpha - Bravo gate");
    assert_eq!(gate.stargate, Some(universe.body_index(50000002).unwrap()));
}

#[test]
fn system_ids_resolve_to_station_or_sun() {
    let universe = fixture_universe();

    let alpha = universe.body_or_default(30000001).unwrap();
    assert_eq!(universe.body(alpha).id, 60000001);

    let delta = universe.body_or_default(30000004).unwrap();
    assert_eq!(universe.body(delta).id, 40000005);

    let body = universe.body_or_default(40000006).unwrap();
    assert_eq!(universe.body(body).id, 40000006);
}

#[test]
fn subcapital_follows_the_gate_chain() {
    let universe = fixture_universe();
    let solver = Solver::new(&universe, SolverConfig::default()).unwrap();

    let route = solver
        .solve(60000001, Some(40000005), &ShipPreset::Cruiser.parameters())
        .expect("route exists");

    let gates = route
        .waypoints
        .iter()
        .filter(|w| w.movement == MovementType::Gate)
        .count();
    assert_eq!(gates, 3);
    assert_eq!(route.waypoints.last().unwrap().body, 40000005);

    let text = RouteSummary::from_route(&universe, &route).render_text();
    assert!(text.contains("Start at Alpha I - Trade Hub in Alpha"));
    assert!(text.contains("Gate into Delta"));
    assert!(text.contains("Warp to Delta - Star"));
}

#[test]
fn capital_skips_high_security_bravo() {
    let universe = fixture_universe();
    let solver = Solver::new(&universe, SolverConfig::default()).unwrap();

    let route = solver
        .solve(60000001, Some(40000005), &ShipPreset::Carrier.parameters())
        .expect("route exists");

    assert_eq!(route.waypoints.len(), 3);
    assert!([50000004, 50000005].contains(&route.waypoints[1].body));
    assert!(route
        .waypoints
        .iter()
        .skip(1)
        .all(|w| w.movement == MovementType::Jump));
}

#[test]
fn loads_from_arbitrary_paths() {
    let dir = tempdir().unwrap();
    let denormalize = dir.path().join("denormalize.csv");
    let jumps = dir.path().join("jumps.csv");
    fs::copy(fixtures_dir().join("mapDenormalize.csv"), &denormalize).unwrap();
    fs::write(&jumps, "stargateID,destinationID\n").unwrap();

    let universe = load_universe(&denormalize, &jumps).expect("dataset loads");
    assert_eq!(universe.system_count(), 4);
    assert!(universe.body_by_id(50000001).unwrap().stargate.is_none());
}

#[test]
fn missing_dataset_is_an_io_error() {
    let dir = tempdir().unwrap();
    let error = load_universe(&dir.path().join("missing.csv"), &dir.path().join("jumps.csv"))
        .expect_err("file is missing");
    assert!(matches!(error, Error::Io(_)));
}

#[test]
fn parameters_load_from_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(
        &path,
        r#"{"jump_range": 5.0, "warp_speed": 1.5, "align_time": 25.0, "gate_cost": -1.0, "fatigue_model": "fatigue-cost"}"#,
    )
    .unwrap();

    let parameters = Parameters::from_json_file(&path).expect("profile loads");
    assert_eq!(parameters.jump_drive_range(), Some(5.0));
    assert_eq!(parameters.fatigue_model, FatigueModel::FatigueCost);
    assert!(!parameters.gates_enabled());

    fs::write(&path, r#"{"warp_speed": 0.0, "align_time": 1.0, "gate_cost": 1.0}"#).unwrap();
    assert!(matches!(
        Parameters::from_json_file(&path),
        Err(Error::InvalidParameters { .. })
    ));
}
