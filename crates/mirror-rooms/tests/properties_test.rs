//! Property tests over randomly configured rooms.

use std::collections::{HashMap, HashSet, VecDeque};

use mirror_rooms::{
    intersect_rooms, reflect_wall_config, IVec2, RayPath, Room, RoomConfig, RoomTree, Simulation,
    SimulationConfig, UVec2, Vec2, WallConfig, T_EPSILON,
};
use proptest::prelude::*;

fn walls_strategy() -> impl Strategy<Value = WallConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(top, right, bottom, left)| WallConfig::new(top, right, bottom, left))
}

/// Shortest number of bounces to every reachable cell, by breadth-first
/// search through mirrored walls.
fn bfs_orders(walls: WallConfig, max_order: u32) -> HashMap<IVec2, u32> {
    let mut orders = HashMap::from([(IVec2::ZERO, 0)]);
    let mut queue = VecDeque::from([(IVec2::ZERO, walls, 0u32)]);
    while let Some((cell, config, order)) = queue.pop_front() {
        if order == max_order {
            continue;
        }
        for wall in config.mirrored() {
            let next = cell + wall.step();
            if orders.contains_key(&next) {
                continue;
            }
            orders.insert(next, order + 1);
            queue.push_back((next, reflect_wall_config(config, wall), order + 1));
        }
    }
    orders
}

proptest! {
    #[test]
    fn prop_tree_is_well_formed(
        walls in walls_strategy(),
        width in 1u32..8,
        height in 1u32..8,
        max_order in 0u32..6,
    ) {
        let tree = RoomTree::build(&Room::root(width, height, walls), max_order);
        let mut cells = HashSet::new();

        prop_assert!(tree.root().is_root());
        for room in tree.rooms() {
            prop_assert!(room.reflection_order() <= max_order);
            prop_assert!(cells.insert(room.position()), "two rooms at {}", room.position());
            prop_assert_eq!(room.size(), UVec2::new(width, height));

            if room.is_root() {
                prop_assert!(room.parent_id().is_none());
                prop_assert!(room.reflection_wall().is_none());
                continue;
            }
            let parent = tree.get(room.parent_id().unwrap()).unwrap();
            let wall = room.reflection_wall().unwrap();
            prop_assert_eq!(room.reflection_order(), parent.reflection_order() + 1);
            prop_assert!(parent.walls().is_mirrored(wall));
            prop_assert_eq!(room.position(), parent.position() + wall.step());
            prop_assert_eq!(room.walls(), reflect_wall_config(parent.walls(), wall));
        }
    }

    #[test]
    fn prop_cells_hold_shortest_order(
        walls in walls_strategy(),
        max_order in 0u32..6,
    ) {
        let tree = RoomTree::build(&Room::root(4, 3, walls), max_order);
        let expected = bfs_orders(walls, max_order);

        prop_assert_eq!(tree.len(), expected.len());
        for room in tree.rooms() {
            prop_assert_eq!(Some(&room.reflection_order()), expected.get(&room.position()));
        }
    }

    #[test]
    fn prop_segments_partition_the_line(
        walls in walls_strategy(),
        max_order in 0u32..4,
        sx in -20.0f32..20.0, sy in -20.0f32..20.0,
        ex in -20.0f32..20.0, ey in -20.0f32..20.0,
    ) {
        let tree = RoomTree::build(&Room::root(4, 4, walls), max_order);
        let (start, end) = (Vec2::new(sx, sy), Vec2::new(ex, ey));

        let segments = intersect_rooms(start, end, tree.rooms());
        for s in &segments {
            prop_assert!(s.t0 >= 0.0 && s.t1 <= 1.0 && s.t0 < s.t1);
        }
        for pair in segments.windows(2) {
            prop_assert!(pair[0].t0 <= pair[1].t0);
            prop_assert!(pair[0].t1 <= pair[1].t0 + T_EPSILON);
        }

        let path = RayPath::from_segments(start, end, &segments, &tree);
        prop_assert!(!path.segments.is_empty());
        prop_assert_eq!(path.segments[0].t0, 0.0);
        prop_assert_eq!(path.segments.last().unwrap().t1, 1.0);
        for pair in path.segments.windows(2) {
            prop_assert_eq!(pair[0].t1, pair[1].t0);
        }
        prop_assert_eq!(path.points.len(), path.segments.len() + 1);
    }

    #[test]
    fn prop_reset_restores_unfolded_points(
        max_order in 1u32..5,
        pick in any::<prop::sample::Index>(),
        ox in 0u32..4, oy in 0u32..4,
    ) {
        let config = SimulationConfig {
            object: Vec2::new(ox as f32, oy as f32),
            max_order,
            ..SimulationConfig::default()
        };
        let sim = Simulation::new(config).unwrap();
        let image = &sim.virtual_objects()[pick.index(sim.virtual_objects().len())];

        let mut folder = sim.path_folder(&image.id).unwrap();
        let original = folder.points().to_vec();
        prop_assert_eq!(folder.preview(0.0), original.clone());

        folder.fold_fully();
        prop_assert!(folder.is_complete());
        prop_assert!(!folder.is_truncated());

        folder.reset();
        prop_assert_eq!(folder.step_index(), 0);
        prop_assert_eq!(folder.points(), original.as_slice());
    }

    #[test]
    fn prop_full_fold_is_a_physical_path(
        width in 2u32..7,
        height in 2u32..7,
        max_order in 1u32..5,
        object in any::<(prop::sample::Index, prop::sample::Index)>(),
        observer in any::<(prop::sample::Index, prop::sample::Index)>(),
    ) {
        let cell = |(x, y): (prop::sample::Index, prop::sample::Index)| {
            Vec2::new(x.index(width as usize) as f32, y.index(height as usize) as f32)
        };
        let config = SimulationConfig {
            room: RoomConfig {
                width,
                height,
                mirrored_walls: WallConfig::ALL_MIRRORED,
            },
            object: cell(object),
            observer: cell(observer),
            max_order,
        };
        let sim = Simulation::new(config).unwrap();
        let real = sim.real_object().global_position(sim.root());

        for image in sim.virtual_objects() {
            let folded = sim.path_folder(&image.id).unwrap().folded_path().unwrap();
            prop_assert!((folded[0] - real).length() < 1e-3, "{} starts at {}", image.id, folded[0]);
            prop_assert!((*folded.last().unwrap() - sim.observer()).length() < 1e-3);
            for p in &folded {
                prop_assert!(sim.root().contains(*p, 1e-3), "{} leaves the real room at {}", image.id, p);
            }
        }
    }
}
