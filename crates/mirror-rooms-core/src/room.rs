//! Real and virtual rooms.
//!
//! A [`Room`] is a rectangle on an integer grid of room-sized cells. The
//! order-0 room is the real room; every other room is a mirror image reached
//! by reflecting its parent across one mirrored wall.

use std::fmt;

use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::reflection::reflect_wall_config;
use crate::wall::{Wall, WallConfig};

/// Deterministic room identifier encoding the room's ancestry.
///
/// The root is `root`; a child reached across `wall` at `order` is
/// `<parent>><wall>:<order>`, e.g. `root>top:1>left:2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Identifier of the order-0 room.
    pub const ROOT: &'static str = "root";

    /// Returns the root identifier.
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// Derives a child identifier from its parent, wall and order.
    pub fn child(parent: &RoomId, wall: Wall, order: u32) -> Self {
        Self(format!("{parent}>{wall}:{order}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this is the root identifier.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A real or virtual room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    size: UVec2,
    walls: WallConfig,
    /// Grid cell, in units of whole rooms.
    position: IVec2,
    reflection_order: u32,
    reflection_wall: Option<Wall>,
    parent: Option<RoomId>,
}

impl Room {
    /// Creates the real (order-0) room at grid cell `(0, 0)`.
    pub fn root(width: u32, height: u32, walls: WallConfig) -> Self {
        Self {
            id: RoomId::root(),
            size: UVec2::new(width, height),
            walls,
            position: IVec2::ZERO,
            reflection_order: 0,
            reflection_wall: None,
            parent: None,
        }
    }

    /// Creates the mirror image of `parent` across `wall`.
    ///
    /// The image sits one cell over in the wall's direction, is one order
    /// higher, and has the wall pair along `wall`'s axis swapped.
    pub fn reflected(parent: &Room, wall: Wall) -> Self {
        let order = parent.reflection_order + 1;
        Self {
            id: RoomId::child(&parent.id, wall, order),
            size: parent.size,
            walls: reflect_wall_config(parent.walls, wall),
            position: parent.position + wall.step(),
            reflection_order: order,
            reflection_wall: Some(wall),
            parent: Some(parent.id.clone()),
        }
    }

    #[must_use]
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.size.x
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// Returns the room size in grid units.
    #[must_use]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    #[must_use]
    pub fn walls(&self) -> WallConfig {
        self.walls
    }

    /// Returns the grid cell this room occupies.
    #[must_use]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    #[must_use]
    pub fn reflection_order(&self) -> u32 {
        self.reflection_order
    }

    /// Returns the parent wall this room was reflected across, if virtual.
    #[must_use]
    pub fn reflection_wall(&self) -> Option<Wall> {
        self.reflection_wall
    }

    #[must_use]
    pub fn parent_id(&self) -> Option<&RoomId> {
        self.parent.as_ref()
    }

    /// Returns whether this is the real room.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.reflection_order == 0
    }

    /// Returns the global coordinates of the top-left corner.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.position.as_vec2() * self.size.as_vec2()
    }

    /// Returns the axis-aligned box `(min, max)` in global coordinates.
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min = self.origin();
        (min, min + self.size.as_vec2())
    }

    /// Returns whether a global point lies inside the room, edges included
    /// within `eps`.
    #[must_use]
    pub fn contains(&self, point: Vec2, eps: f32) -> bool {
        let (min, max) = self.bounds();
        point.x >= min.x - eps
            && point.x <= max.x + eps
            && point.y >= min.y - eps
            && point.y <= max.y + eps
    }

    /// Converts a grid-local cell index to the global cell center.
    #[must_use]
    pub fn cell_center(&self, local: Vec2) -> Vec2 {
        self.origin() + local + Vec2::splat(0.5)
    }

    /// Converts a global point to room-local coordinates.
    #[must_use]
    pub fn to_local(&self, global: Vec2) -> Vec2 {
        global - self.origin()
    }
}
