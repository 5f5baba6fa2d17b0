//! Loading simulations from JSON configuration.

use mirror_rooms::*;

#[test]
fn test_partial_json_uses_defaults() {
    let config = SimulationConfig::from_json_str(
        r#"{
            "room": { "width": 5, "mirrored_walls": { "top": true, "right": false, "bottom": true, "left": false } },
            "max_order": 3
        }"#,
    )
    .unwrap();

    assert_eq!(config.room.width, 5);
    assert_eq!(config.room.height, 4);
    assert_eq!(config.object, Vec2::new(1.0, 1.0));

    let sim = Simulation::new(config).unwrap();
    // A column of images above and below the real room.
    assert_eq!(sim.rooms().len(), 7);
    assert!(sim.rooms().iter().all(|r| r.width() == 5));
}

#[test]
fn test_json_round_trip_builds_same_tree() {
    let mut sim = Simulation::default();
    sim.set_mirrored_walls(WallConfig::new(false, true, true, true))
        .unwrap();

    let json = sim.config().to_json_string().unwrap();
    let reloaded = Simulation::new(SimulationConfig::from_json_str(&json).unwrap()).unwrap();
    assert_eq!(reloaded.rooms(), sim.rooms());
    assert_eq!(reloaded.virtual_objects(), sim.virtual_objects());
}

#[test]
fn test_invalid_json_configs() {
    assert!(matches!(
        SimulationConfig::from_json_str("{ not json"),
        Err(MirrorRoomsError::JsonError(_))
    ));
    assert!(matches!(
        SimulationConfig::from_json_str(r#"{ "max_order": 9 }"#),
        Err(MirrorRoomsError::OrderOutOfRange { requested: 9, max: 8 })
    ));
    assert!(matches!(
        SimulationConfig::from_json_str(r#"{ "observer": [4, 0] }"#),
        Err(MirrorRoomsError::InvalidConfig(_))
    ));
}

#[test]
fn test_load_json_file() {
    let path = std::env::temp_dir().join(format!("mirror-rooms-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "max_order": 1 }"#).unwrap();
    let config = SimulationConfig::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.max_order, 1);

    assert!(matches!(
        SimulationConfig::load_json(&path),
        Err(MirrorRoomsError::IoError(_))
    ));
}
