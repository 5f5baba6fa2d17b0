//! End-to-end scenarios for mirror-rooms.
//!
//! Each test builds a small room, derives its images and checks one
//! observable outcome through the public API.

use mirror_rooms::*;

fn config(walls: WallConfig, max_order: u32) -> SimulationConfig {
    SimulationConfig {
        room: RoomConfig {
            width: 4,
            height: 4,
            mirrored_walls: walls,
        },
        max_order,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_three_mirrors_first_order() {
    init_logging();
    let sim = Simulation::new(config(WallConfig::new(true, true, false, true), 1)).unwrap();

    let images: Vec<(Wall, IVec2)> = sim
        .tree()
        .virtual_rooms()
        .map(|r| (r.reflection_wall().unwrap(), r.position()))
        .collect();
    assert_eq!(
        images,
        vec![
            (Wall::Top, IVec2::new(0, -1)),
            (Wall::Right, IVec2::new(1, 0)),
            (Wall::Left, IVec2::new(-1, 0)),
        ]
    );
    assert_eq!(sim.virtual_objects().len(), 3);
}

#[test]
fn test_object_reflected_across_top() {
    let sim = Simulation::new(config(WallConfig::new(true, false, false, false), 1)).unwrap();
    let [image] = sim.virtual_objects() else {
        panic!("expected a single image, got {:?}", sim.virtual_objects());
    };
    assert_eq!(image.position, Vec2::new(1.0, 2.0));
    assert_eq!(sim.room(&image.room_id).unwrap().reflection_wall(), Some(Wall::Top));
}

#[test]
fn test_sight_line_from_outside() {
    let sim = Simulation::new(config(WallConfig::ALL_MIRRORED, 0)).unwrap();
    let path = RayPath::trace(Vec2::new(-3.0, 2.5), sim.observer(), sim.tree());

    assert_eq!(path.segments.len(), 2);
    assert_eq!(path.segments[0].owner, SegmentOwner::Outside);
    assert_eq!(path.segments[1].owner, SegmentOwner::Room(RoomId::root()));
    assert_eq!(path.segments[0].t0, 0.0);
    assert_eq!(path.segments[1].t1, 1.0);
    assert!(!path.visible);
}

#[test]
fn test_every_image_has_a_sight_line() {
    let sim = Simulation::new(config(WallConfig::ALL_MIRRORED, 3)).unwrap();
    for image in sim.virtual_objects() {
        let path = sim.sight_line(&image.id).unwrap();
        assert!(!path.segments.is_empty());
        assert_eq!(path.segments.last().unwrap().t1, 1.0);
        // The observer is always in the real room.
        assert!(path.rooms().last().unwrap().is_root());
    }
}

#[test]
fn test_fold_third_order_image() {
    // Image at cell (-1, -2): three bounces off bottom, left and top.
    let sim = Simulation::new(config(WallConfig::ALL_MIRRORED, 3)).unwrap();
    let room = sim.tree().at_cell(IVec2::new(-1, -2)).unwrap();
    let image = sim
        .virtual_objects()
        .iter()
        .find(|o| &o.room_id == room.id())
        .unwrap();

    let path = sim.sight_line(&image.id).unwrap();
    assert!(path.visible);
    assert_eq!(path.reflection_points.len(), 3);

    let mut folder = sim.path_folder(&image.id).unwrap();
    assert_eq!(folder.steps().len(), 3);

    let mut index = 0;
    while let Some(step) = folder.current_step() {
        let halfway = folder.preview(0.5);
        assert_eq!(halfway.len(), folder.points().len());
        assert_eq!(folder.step_index(), index);
        assert_ne!(step.room_id, RoomId::root());
        folder.commit_step();
        index += 1;
    }

    let folded = folder.folded_path().unwrap();
    let real = sim.real_object().global_position(sim.root());
    assert!((folded[0] - real).length() < 1e-3);
    assert!((*folded.last().unwrap() - sim.observer()).length() < 1e-3);
    for p in &folded {
        assert!(sim.root().contains(*p, 1e-3), "{p} is outside the real room");
    }
}

#[test]
fn test_rebuild_after_mirror_change() {
    let mut sim = Simulation::default();
    let all = sim.rooms().len();

    sim.set_mirrored_walls(WallConfig::new(true, false, true, false))
        .unwrap();
    assert!(sim.rooms().len() < all);
    assert!(sim
        .rooms()
        .iter()
        .all(|r| r.position().x == 0));

    sim.set_mirrored_walls(WallConfig::ALL_MIRRORED).unwrap();
    assert_eq!(sim.rooms().len(), all);
}
