//! The simulation facade.
//!
//! A [`Simulation`] owns a validated [`SimulationConfig`] and everything
//! derived from it. Any change to the configuration rebuilds the room tree
//! and the virtual objects from scratch.

use glam::{UVec2, Vec2};
use mirror_rooms_core::{
    MirrorRoomsError, PlacedObject, Result, Room, RoomId, SimulationConfig, WallConfig,
};

use crate::fold::PathFolder;
use crate::projector::project_objects;
use crate::ray_path::RayPath;
use crate::room_tree::RoomTree;

/// Id of the single real object.
pub const REAL_OBJECT_ID: &str = "object";

/// A room with mirrors, one real object, an observer, and their images.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    tree: RoomTree,
    real_object: PlacedObject,
    virtual_objects: Vec<PlacedObject>,
}

impl Simulation {
    /// Validates `config` and builds the simulation.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let (tree, real_object, virtual_objects) = Self::derive(&config);
        Ok(Self {
            config,
            tree,
            real_object,
            virtual_objects,
        })
    }

    fn derive(config: &SimulationConfig) -> (RoomTree, PlacedObject, Vec<PlacedObject>) {
        let root = Room::root(
            config.room.width,
            config.room.height,
            config.room.mirrored_walls,
        );
        let tree = RoomTree::build(&root, config.max_order);
        let real_object = PlacedObject::real(REAL_OBJECT_ID, config.object);
        let virtual_objects = project_objects(std::slice::from_ref(&real_object), &tree);

        log::info!(
            "rebuilt simulation: {}x{} room, {} mirrors, order {}, {} rooms, {} virtual objects",
            config.room.width,
            config.room.height,
            config.room.mirrored_walls.count(),
            config.max_order,
            tree.len(),
            virtual_objects.len()
        );
        (tree, real_object, virtual_objects)
    }

    /// Applies `edit` to a copy of the configuration and commits it only if
    /// it validates. On error the simulation is left untouched.
    fn update(&mut self, edit: impl FnOnce(&mut SimulationConfig)) -> Result<()> {
        let mut config = self.config.clone();
        edit(&mut config);
        config.validate()?;

        let (tree, real_object, virtual_objects) = Self::derive(&config);
        self.config = config;
        self.tree = tree;
        self.real_object = real_object;
        self.virtual_objects = virtual_objects;
        Ok(())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        self.update(|c| *c = config)
    }

    pub fn set_mirrored_walls(&mut self, walls: WallConfig) -> Result<()> {
        self.update(|c| c.room.mirrored_walls = walls)
    }

    pub fn set_max_order(&mut self, max_order: u32) -> Result<()> {
        self.update(|c| c.max_order = max_order)
    }

    /// Resizes the real room. Fails if the object or observer would end up
    /// outside it.
    pub fn set_room_size(&mut self, size: UVec2) -> Result<()> {
        self.update(|c| {
            c.room.width = size.x;
            c.room.height = size.y;
        })
    }

    /// Moves the real object to a grid cell of the real room.
    pub fn set_object(&mut self, position: Vec2) -> Result<()> {
        self.update(|c| c.object = position)
    }

    /// Moves the observer to a grid cell of the real room.
    pub fn set_observer(&mut self, position: Vec2) -> Result<()> {
        self.update(|c| c.observer = position)
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    #[must_use]
    pub fn tree(&self) -> &RoomTree {
        &self.tree
    }

    /// Returns the retained rooms, root first.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        self.tree.rooms()
    }

    #[must_use]
    pub fn root(&self) -> &Room {
        self.tree.root()
    }

    pub fn room(&self, id: &RoomId) -> Result<&Room> {
        self.tree
            .get(id)
            .ok_or_else(|| MirrorRoomsError::RoomNotFound(id.clone()))
    }

    #[must_use]
    pub fn real_object(&self) -> &PlacedObject {
        &self.real_object
    }

    /// Returns the observer's global position (the center of its cell).
    #[must_use]
    pub fn observer(&self) -> Vec2 {
        self.tree.root().cell_center(self.config.observer)
    }

    #[must_use]
    pub fn virtual_objects(&self) -> &[PlacedObject] {
        &self.virtual_objects
    }

    pub fn virtual_object(&self, id: &str) -> Result<&PlacedObject> {
        self.virtual_objects
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| MirrorRoomsError::ObjectNotFound(id.to_string()))
    }

    // ========================================================================
    // Sight lines
    // ========================================================================

    /// Traces the straight line from a virtual object to the observer.
    pub fn sight_line(&self, virtual_object_id: &str) -> Result<RayPath> {
        let object = self.virtual_object(virtual_object_id)?;
        let room = self.room(&object.room_id)?;
        let start = object.global_position(room);
        let path = RayPath::trace(start, self.observer(), &self.tree);
        log::debug!(
            "sight line from '{}': {} segments, visible: {}",
            object.id,
            path.segments.len(),
            path.visible
        );
        Ok(path)
    }

    /// Prepares to fold the sight line of a virtual object.
    pub fn path_folder(&self, virtual_object_id: &str) -> Result<PathFolder> {
        let path = self.sight_line(virtual_object_id)?;
        let object = self.virtual_object(virtual_object_id)?;
        PathFolder::new(path, &self.tree, &object.room_id)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        let config = SimulationConfig::default();
        let (tree, real_object, virtual_objects) = Self::derive(&config);
        Self {
            config,
            tree,
            real_object,
            virtual_objects,
        }
    }
}
