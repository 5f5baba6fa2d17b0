//! Room walls and mirror configurations.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::MirrorRoomsError;

/// One side of a rectangular room.
///
/// The y axis grows downward, so [`Wall::Top`] faces `-y` and
/// [`Wall::Bottom`] faces `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Top,
    Right,
    Bottom,
    Left,
}

/// The axis a wall is perpendicular to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Wall {
    /// All walls, in expansion order.
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Right, Wall::Bottom, Wall::Left];

    /// Returns the axis this wall is perpendicular to.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Wall::Top | Wall::Bottom => Axis::Y,
            Wall::Left | Wall::Right => Axis::X,
        }
    }

    /// Returns the wall on the opposite side of the room.
    #[must_use]
    pub fn opposite(self) -> Wall {
        match self {
            Wall::Top => Wall::Bottom,
            Wall::Bottom => Wall::Top,
            Wall::Left => Wall::Right,
            Wall::Right => Wall::Left,
        }
    }

    /// Grid step taken when crossing this wall.
    #[must_use]
    pub fn step(self) -> IVec2 {
        match self {
            Wall::Top => IVec2::new(0, -1),
            Wall::Right => IVec2::new(1, 0),
            Wall::Bottom => IVec2::new(0, 1),
            Wall::Left => IVec2::new(-1, 0),
        }
    }

    /// Lowercase name used in ids and serialized configs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Wall::Top => "top",
            Wall::Right => "right",
            Wall::Bottom => "bottom",
            Wall::Left => "left",
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wall {
    type Err = MirrorRoomsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Wall::Top),
            "right" => Ok(Wall::Right),
            "bottom" => Ok(Wall::Bottom),
            "left" => Ok(Wall::Left),
            _ => Err(MirrorRoomsError::InvalidWallTag(s.to_string())),
        }
    }
}

/// Which walls of a room are mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WallConfig {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl WallConfig {
    /// Every wall mirrored.
    pub const ALL_MIRRORED: Self = Self {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    /// No wall mirrored.
    pub const NONE: Self = Self {
        top: false,
        right: false,
        bottom: false,
        left: false,
    };

    /// Creates a configuration from the four flags.
    pub fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Returns whether the given wall is a mirror.
    #[must_use]
    pub fn is_mirrored(&self, wall: Wall) -> bool {
        match wall {
            Wall::Top => self.top,
            Wall::Right => self.right,
            Wall::Bottom => self.bottom,
            Wall::Left => self.left,
        }
    }

    /// Sets whether the given wall is a mirror.
    pub fn set_mirrored(&mut self, wall: Wall, mirrored: bool) {
        match wall {
            Wall::Top => self.top = mirrored,
            Wall::Right => self.right = mirrored,
            Wall::Bottom => self.bottom = mirrored,
            Wall::Left => self.left = mirrored,
        }
    }

    /// Iterates over the mirrored walls in expansion order.
    pub fn mirrored(&self) -> impl Iterator<Item = Wall> + '_ {
        Wall::ALL.into_iter().filter(|w| self.is_mirrored(*w))
    }

    /// Returns the number of mirrored walls.
    #[must_use]
    pub fn count(&self) -> usize {
        self.mirrored().count()
    }
}
