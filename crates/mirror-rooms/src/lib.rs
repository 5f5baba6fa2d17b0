//! mirror-rooms: virtual-room geometry for rooms with mirrored walls.
//!
//! An observer standing in a rectangular room with mirrors sees the room's
//! contents repeated in mirror images of the room. This crate builds those
//! images and answers where light actually travels.
//!
//! # Quick Start
//!
//! ```
//! use mirror_rooms::{Result, Simulation, SimulationConfig};
//!
//! fn main() -> Result<()> {
//!     let sim = Simulation::new(SimulationConfig::default())?;
//!
//!     // Pick a virtual object and trace its sight line to the observer.
//!     let image = &sim.virtual_objects()[0];
//!     let mut folder = sim.path_folder(&image.id)?;
//!
//!     // Fold the straight line back into the real room.
//!     folder.fold_fully();
//!     assert!(folder.is_complete());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`RoomTree`] expands the real room into its mirror images, keeping the
//!   lowest-order image per grid cell
//! - [`project_objects`] places a copy of each real object in every image
//! - [`intersect_rooms`] and [`RayPath`] split a sight line by room
//! - [`PathFolder`] folds a sight line into the physical light path
//! - [`Simulation`] ties the pieces together and rebuilds on every change

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors returning borrowed data don't need must_use
#![allow(clippy::must_use_candidate)]
// Grid sizes are small; u32 -> f32 is exact in practice
#![allow(clippy::cast_precision_loss)]

pub mod fold;
pub mod intersect;
pub mod projector;
pub mod ray_path;
pub mod room_tree;
pub mod simulation;

// Re-export core types
pub use mirror_rooms_core::{
    reflect_cell, reflect_point, reflect_point_partial, reflect_wall_config, Axis,
    MirrorRoomsError, PlacedObject, Result, Room, RoomConfig, RoomId, SimulationConfig, Wall,
    WallConfig, MAX_REFLECTION_ORDER,
};
pub use mirror_rooms_core::{IVec2, UVec2, Vec2};

pub use fold::{fold_step, FoldStep, PathFolder, FOLD_EPSILON};
pub use intersect::{clip_room, intersect_rooms, Segment, T_EPSILON};
pub use projector::{project_object, project_objects};
pub use ray_path::{PathSegment, RayPath, ReflectionPoint, SegmentOwner, WallRef};
pub use room_tree::{Ancestry, AncestryStep, RoomTree, RoomTreeBuilder};
pub use simulation::Simulation;

/// Initializes `env_logger` if no logger is installed yet.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
