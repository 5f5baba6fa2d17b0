//! Projection of real objects into virtual rooms.

use glam::Vec2;
use mirror_rooms_core::{reflect_cell, PlacedObject, Room, Wall};

use crate::room_tree::RoomTree;

/// Projects every real object into every virtual room of `tree`.
///
/// One virtual object is produced per (real object, room of order >= 1)
/// pair, rooms in tree order. Rooms whose ancestry cannot be resolved are
/// skipped.
pub fn project_objects(real_objects: &[PlacedObject], tree: &RoomTree) -> Vec<PlacedObject> {
    let mut projected = Vec::with_capacity(real_objects.len() * tree.len().saturating_sub(1));
    for room in tree.virtual_rooms() {
        let Some(walls) = reflection_sequence(tree, room) else {
            continue;
        };
        for object in real_objects {
            let position = project_position(object.position, &walls, tree.root());
            projected.push(PlacedObject::virtual_copy(object, room.id(), position));
        }
    }
    projected
}

/// Projects a single real object into `room`.
///
/// Returns `None` for the root room or when the ancestry is broken.
pub fn project_object(object: &PlacedObject, room: &Room, tree: &RoomTree) -> Option<PlacedObject> {
    if room.is_root() {
        return None;
    }
    let walls = reflection_sequence(tree, room)?;
    let position = project_position(object.position, &walls, tree.root());
    Some(PlacedObject::virtual_copy(object, room.id(), position))
}

/// Applies the root-to-leaf reflection walls to a grid-local position,
/// always with the root room's size.
fn project_position(position: Vec2, walls: &[Wall], root: &Room) -> Vec2 {
    walls
        .iter()
        .fold(position, |p, &wall| reflect_cell(p, wall, root.size()))
}

fn reflection_sequence(tree: &RoomTree, room: &Room) -> Option<Vec<Wall>> {
    let ancestry = match tree.ancestry(room.id()) {
        Ok(ancestry) => ancestry,
        Err(err) => {
            log::warn!("cannot project into '{}': {err}", room.id());
            return None;
        }
    };
    if let Some(err) = &ancestry.broken {
        log::warn!("skipping projection into '{}': {err}", room.id());
        return None;
    }
    Some(ancestry.walls_from_root().collect())
}
