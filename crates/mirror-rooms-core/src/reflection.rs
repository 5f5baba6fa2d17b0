//! Reflection formulas for axis-aligned rooms.
//!
//! Every function here is pure and an involution: applying the same
//! reflection twice with the same parameters returns the input.

use glam::{UVec2, Vec2};

use crate::wall::{Wall, WallConfig};

/// Reflects a global point across one wall of a room.
///
/// `room_position` is the room's global top-left corner and `room_size` its
/// extent. The coordinate along the wall's axis is mirrored about the wall
/// line; the other coordinate passes through unchanged.
#[must_use]
pub fn reflect_point(point: Vec2, wall: Wall, room_position: Vec2, room_size: Vec2) -> Vec2 {
    match wall {
        Wall::Top => Vec2::new(point.x, 2.0 * room_position.y - point.y),
        Wall::Bottom => Vec2::new(point.x, 2.0 * (room_position.y + room_size.y) - point.y),
        Wall::Right => Vec2::new(2.0 * (room_position.x + room_size.x) - point.x, point.y),
        Wall::Left => Vec2::new(2.0 * room_position.x - point.x, point.y),
    }
}

/// Returns the mirror configuration of the image of a room across `wall`.
///
/// Reflecting across top or bottom swaps the top and bottom flags;
/// reflecting across left or right swaps left and right.
#[must_use]
pub fn reflect_wall_config(walls: WallConfig, wall: Wall) -> WallConfig {
    match wall {
        Wall::Top | Wall::Bottom => WallConfig {
            top: walls.bottom,
            bottom: walls.top,
            ..walls
        },
        Wall::Left | Wall::Right => WallConfig {
            left: walls.right,
            right: walls.left,
            ..walls
        },
    }
}

/// Reflects a grid-local cell index into the neighboring room's local frame.
///
/// The cell center is reflected across `wall` of a room anchored at the
/// origin, then re-expressed relative to the neighbor. For a 4×4 room the
/// cell `(1, 1)` maps to `(1, 2)` across top or bottom.
#[must_use]
pub fn reflect_cell(cell: Vec2, wall: Wall, room_size: UVec2) -> Vec2 {
    let size = room_size.as_vec2();
    let center = cell + Vec2::splat(0.5);
    let reflected = reflect_point(center, wall, Vec2::ZERO, size);
    let neighbor_origin = wall.step().as_vec2() * size;
    reflected - neighbor_origin - Vec2::splat(0.5)
}

/// Linearly interpolates `point` toward its reflection across `wall`.
///
/// `progress` is clamped to `[0, 1]`; `1.0` equals [`reflect_point`].
#[must_use]
pub fn reflect_point_partial(
    point: Vec2,
    wall: Wall,
    room_position: Vec2,
    room_size: Vec2,
    progress: f32,
) -> Vec2 {
    let progress = progress.clamp(0.0, 1.0);
    if progress <= 0.0 {
        return point;
    }
    if progress >= 1.0 {
        return reflect_point(point, wall, room_position, room_size);
    }
    let target = reflect_point(point, wall, room_position, room_size);
    point.lerp(target, progress)
}
