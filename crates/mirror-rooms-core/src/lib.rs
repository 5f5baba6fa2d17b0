//! Core data model for mirror-rooms.
//!
//! This crate provides the fundamental types shared by the engine:
//! - [`Wall`] and [`WallConfig`] describing which sides of a room are mirrors
//! - [`Room`] and [`RoomId`] for the real room and its mirror images
//! - [`PlacedObject`] for real and virtual objects
//! - Pure reflection formulas in [`reflection`]
//! - [`SimulationConfig`] and the crate-wide error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Wall configurations legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Grid sizes are small; u32 -> f32 is exact in practice
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod error;
pub mod object;
pub mod reflection;
pub mod room;
pub mod wall;

pub use config::{RoomConfig, SimulationConfig, MAX_REFLECTION_ORDER};
pub use error::{MirrorRoomsError, Result};
pub use object::PlacedObject;
pub use reflection::{reflect_cell, reflect_point, reflect_point_partial, reflect_wall_config};
pub use room::{Room, RoomId};
pub use wall::{Axis, Wall, WallConfig};

// Re-export glam types for convenience
pub use glam::{IVec2, UVec2, Vec2};
