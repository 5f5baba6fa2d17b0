//! Objects placed in rooms.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::room::{Room, RoomId};

/// An object placed on the grid of a room.
///
/// Real objects live in the order-0 room. Virtual objects are their mirror
/// images, derived once per retained virtual room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Unique id. Virtual objects use `<real id>@<room id>`.
    pub id: String,

    /// Grid-local cell position inside `room_id`.
    pub position: Vec2,

    /// Whether this object is a mirror image.
    pub is_virtual: bool,

    /// The room this object lives in.
    pub room_id: RoomId,
}

impl PlacedObject {
    /// Creates a real object in the root room.
    pub fn real(id: impl Into<String>, position: Vec2) -> Self {
        Self {
            id: id.into(),
            position,
            is_virtual: false,
            room_id: RoomId::root(),
        }
    }

    /// Creates the mirror image of `source` inside `room` at `position`.
    pub fn virtual_copy(source: &PlacedObject, room: &RoomId, position: Vec2) -> Self {
        Self {
            id: format!("{}@{room}", source.id),
            position,
            is_virtual: true,
            room_id: room.clone(),
        }
    }

    /// Returns the global anchor (cell center) of this object in `room`.
    ///
    /// `room` must be the room named by `room_id`.
    #[must_use]
    pub fn global_position(&self, room: &Room) -> Vec2 {
        debug_assert_eq!(room.id(), &self.room_id);
        room.cell_center(self.position)
    }
}
