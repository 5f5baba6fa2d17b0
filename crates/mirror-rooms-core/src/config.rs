//! Simulation configuration.

use std::path::Path;

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{MirrorRoomsError, Result};
use crate::wall::WallConfig;

/// Highest reflection order the engine will build.
pub const MAX_REFLECTION_ORDER: u32 = 8;

/// Geometry and mirrors of the real room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Room width in grid cells.
    pub width: u32,

    /// Room height in grid cells.
    pub height: u32,

    /// Which walls are mirrors.
    pub mirrored_walls: WallConfig,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            mirrored_walls: WallConfig::ALL_MIRRORED,
        }
    }
}

impl RoomConfig {
    /// Returns the room size.
    #[must_use]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Returns whether a grid-local position lies inside the room.
    #[must_use]
    pub fn contains_cell(&self, cell: Vec2) -> bool {
        cell.x >= 0.0
            && cell.y >= 0.0
            && cell.x < self.width as f32
            && cell.y < self.height as f32
    }
}

/// Full input to a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// The real room.
    pub room: RoomConfig,

    /// Grid cell of the real object.
    pub object: Vec2,

    /// Grid cell of the observer.
    pub observer: Vec2,

    /// Number of reflection orders to expand.
    pub max_order: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            room: RoomConfig::default(),
            object: Vec2::new(1.0, 1.0),
            observer: Vec2::new(2.0, 2.0),
            max_order: 2,
        }
    }
}

impl SimulationConfig {
    /// Checks that the configuration describes a buildable simulation.
    pub fn validate(&self) -> Result<()> {
        if self.room.width == 0 || self.room.height == 0 {
            return Err(MirrorRoomsError::InvalidConfig(format!(
                "room size must be positive, got {}x{}",
                self.room.width, self.room.height
            )));
        }
        if self.max_order > MAX_REFLECTION_ORDER {
            return Err(MirrorRoomsError::OrderOutOfRange {
                requested: self.max_order,
                max: MAX_REFLECTION_ORDER,
            });
        }
        if !self.room.contains_cell(self.object) {
            return Err(MirrorRoomsError::InvalidConfig(format!(
                "object {} lies outside the {}x{} room",
                self.object, self.room.width, self.room.height
            )));
        }
        if !self.room.contains_cell(self.observer) {
            return Err(MirrorRoomsError::InvalidConfig(format!(
                "observer {} lies outside the {}x{} room",
                self.observer, self.room.width, self.room.height
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded simulation config from {}", path.display());
        Ok(config)
    }
}
