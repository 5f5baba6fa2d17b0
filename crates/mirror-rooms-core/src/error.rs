//! Error types for mirror-rooms.

use thiserror::Error;

use crate::room::RoomId;

/// The main error type for mirror-rooms operations.
#[derive(Error, Debug)]
pub enum MirrorRoomsError {
    /// A room declares a parent that is not part of the tree.
    #[error("room '{room}' references missing parent '{parent}'")]
    BrokenAncestry { room: RoomId, parent: RoomId },

    /// A room with the given id was not found.
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),

    /// An object with the given id was not found.
    #[error("object '{0}' not found")]
    ObjectNotFound(String),

    /// A wall name outside `top`, `right`, `bottom` and `left`.
    #[error("invalid wall tag '{0}' - expected one of top, right, bottom, left")]
    InvalidWallTag(String),

    /// The simulation configuration is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Requested reflection order exceeds the supported maximum.
    #[error("reflection order {requested} exceeds the maximum of {max}")]
    OrderOutOfRange { requested: u32, max: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for mirror-rooms operations.
pub type Result<T> = std::result::Result<T, MirrorRoomsError>;
