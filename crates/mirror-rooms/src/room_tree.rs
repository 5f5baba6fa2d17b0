//! Construction and lookup of the virtual room tree.
//!
//! Rooms are kept in an arena keyed by [`RoomId`] next to an explicit
//! grid-cell index. A cell is owned by exactly one room; when a lower-order
//! image reaches a cell already owned by a higher-order one, the owner and
//! its whole subtree are evicted and the newcomer is expanded in its place.

use std::collections::HashMap;

use glam::{IVec2, Vec2};
use mirror_rooms_core::{MirrorRoomsError, Result, Room, RoomId, Wall, MAX_REFLECTION_ORDER};

/// Arena entry used while building.
struct Node {
    room: Room,
    children: Vec<RoomId>,
    /// Insertion sequence, used to emit rooms in a deterministic order.
    seq: u64,
}

/// Expands a root room into a bounded tree of mirror images.
pub struct RoomTreeBuilder {
    max_order: u32,
    arena: HashMap<RoomId, Node>,
    cells: HashMap<IVec2, RoomId>,
    next_seq: u64,
    evictions: usize,
}

impl RoomTreeBuilder {
    /// Creates a builder that expands up to `max_order` reflections.
    ///
    /// Orders above [`MAX_REFLECTION_ORDER`] are clamped to it.
    pub fn new(max_order: u32) -> Self {
        if max_order > MAX_REFLECTION_ORDER {
            log::warn!(
                "reflection order {max_order} exceeds the maximum of {MAX_REFLECTION_ORDER}; clamping"
            );
        }
        Self {
            max_order: max_order.min(MAX_REFLECTION_ORDER),
            arena: HashMap::new(),
            cells: HashMap::new(),
            next_seq: 0,
            evictions: 0,
        }
    }

    /// Builds the tree rooted at `root`.
    ///
    /// `root` is re-anchored as the order-0 room regardless of how it was
    /// constructed, so only its size and mirrors matter.
    pub fn build(mut self, root: &Room) -> RoomTree {
        let root = Room::root(root.width(), root.height(), root.walls());
        let root_id = root.id().clone();
        self.install(root, None);
        self.expand(&root_id);

        let mut nodes: Vec<Node> = self.arena.into_values().collect();
        nodes.sort_by_key(|n| n.seq);
        let rooms: Vec<Room> = nodes.into_iter().map(|n| n.room).collect();

        log::debug!(
            "built room tree: {} rooms up to order {} ({} evictions)",
            rooms.len(),
            self.max_order,
            self.evictions
        );

        RoomTree::from_parts(rooms, self.max_order)
    }

    fn install(&mut self, room: Room, parent: Option<&RoomId>) {
        let id = room.id().clone();
        if let Some(parent) = parent {
            if let Some(node) = self.arena.get_mut(parent) {
                node.children.push(id.clone());
            }
        }
        self.cells.insert(room.position(), id.clone());
        self.arena.insert(
            id,
            Node {
                room,
                children: Vec::new(),
                seq: self.next_seq,
            },
        );
        self.next_seq += 1;
    }

    fn expand(&mut self, id: &RoomId) {
        let Some(room) = self.arena.get(id).map(|n| n.room.clone()) else {
            return;
        };
        if room.reflection_order() >= self.max_order {
            return;
        }

        let walls = room.walls();
        for wall in walls.mirrored() {
            if !self.arena.contains_key(id) {
                log::warn!("room '{id}' was evicted while expanding; abandoning branch");
                return;
            }

            let candidate = Room::reflected(&room, wall);
            if !self.claim_cell(&candidate) {
                continue;
            }

            let candidate_id = candidate.id().clone();
            self.install(candidate, Some(id));
            self.expand(&candidate_id);
        }
    }

    /// Decides whether `candidate` may own its cell, evicting a
    /// higher-order owner if necessary.
    fn claim_cell(&mut self, candidate: &Room) -> bool {
        let Some(owner_id) = self.cells.get(&candidate.position()).cloned() else {
            return true;
        };
        let Some(owner) = self.arena.get(&owner_id) else {
            // Stale index entry; the cell is effectively free.
            self.cells.remove(&candidate.position());
            return true;
        };
        if owner.room.reflection_order() <= candidate.reflection_order() {
            return false;
        }

        log::debug!(
            "evicting '{owner_id}' (order {}) in favour of '{}' (order {})",
            owner.room.reflection_order(),
            candidate.id(),
            candidate.reflection_order()
        );
        match self.evict(&owner_id) {
            Ok(removed) => {
                self.evictions += removed;
                true
            }
            Err(err) => {
                log::warn!("{err}; abandoning branch at '{}'", candidate.id());
                false
            }
        }
    }

    /// Removes `id` and all of its descendants from the arena and the cell
    /// index. Returns the number of rooms removed.
    fn evict(&mut self, id: &RoomId) -> Result<usize> {
        let node = self
            .arena
            .get(id)
            .ok_or_else(|| MirrorRoomsError::RoomNotFound(id.clone()))?;
        if let Some(parent_id) = node.room.parent_id() {
            let parent_id = parent_id.clone();
            let parent =
                self.arena
                    .get_mut(&parent_id)
                    .ok_or_else(|| MirrorRoomsError::BrokenAncestry {
                        room: id.clone(),
                        parent: parent_id.clone(),
                    })?;
            parent.children.retain(|c| c != id);
        }

        let mut removed = 0;
        let mut stack = vec![id.clone()];
        while let Some(next) = stack.pop() {
            let Some(node) = self.arena.remove(&next) else {
                continue;
            };
            if self.cells.get(&node.room.position()) == Some(&next) {
                self.cells.remove(&node.room.position());
            }
            stack.extend(node.children);
            removed += 1;
        }
        Ok(removed)
    }
}

/// One link of an ancestry chain: `room` is the mirror image of `parent`
/// across `wall`.
#[derive(Debug, Clone, Copy)]
pub struct AncestryStep<'a> {
    pub room: &'a Room,
    pub parent: &'a Room,
    pub wall: Wall,
}

/// The ancestry chain of a room, ordered leaf-to-root.
#[derive(Debug)]
pub struct Ancestry<'a> {
    /// Resolved steps, starting at the queried room.
    pub steps: Vec<AncestryStep<'a>>,
    /// Set when the chain stopped before reaching the root.
    pub broken: Option<MirrorRoomsError>,
}

impl Ancestry<'_> {
    /// Returns whether the chain reaches the root.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.broken.is_none()
    }

    /// Returns the reflection walls in root-to-leaf order.
    pub fn walls_from_root(&self) -> impl Iterator<Item = Wall> + '_ {
        self.steps.iter().rev().map(|s| s.wall)
    }
}

/// The retained rooms of a simulation, with lookup by id and grid cell.
#[derive(Debug, Clone)]
pub struct RoomTree {
    rooms: Vec<Room>,
    index: HashMap<RoomId, usize>,
    cells: HashMap<IVec2, usize>,
    max_order: u32,
}

impl RoomTree {
    /// Builds the tree for `root` up to `max_order` reflections, clamped to
    /// [`MAX_REFLECTION_ORDER`].
    pub fn build(root: &Room, max_order: u32) -> Self {
        RoomTreeBuilder::new(max_order).build(root)
    }

    /// Wraps an externally supplied room list.
    ///
    /// The first room of order 0 is the root. When several rooms share a
    /// cell, the lowest-order one is indexed for that cell.
    pub fn from_rooms(rooms: Vec<Room>) -> Result<Self> {
        let max_order = rooms
            .iter()
            .map(Room::reflection_order)
            .max()
            .unwrap_or(0);
        if !rooms.iter().any(Room::is_root) {
            return Err(MirrorRoomsError::RoomNotFound(RoomId::root()));
        }
        Ok(Self::from_parts(rooms, max_order))
    }

    fn from_parts(rooms: Vec<Room>, max_order: u32) -> Self {
        let mut index = HashMap::with_capacity(rooms.len());
        let mut cells: HashMap<IVec2, usize> = HashMap::with_capacity(rooms.len());
        for (i, room) in rooms.iter().enumerate() {
            index.entry(room.id().clone()).or_insert(i);
            let slot = cells.entry(room.position()).or_insert(i);
            if rooms[*slot].reflection_order() > room.reflection_order() {
                *slot = i;
            }
        }
        Self {
            rooms,
            index,
            cells,
            max_order,
        }
    }

    /// Returns all rooms, root first, in deterministic build order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Consumes the tree and returns its rooms.
    pub fn into_rooms(self) -> Vec<Room> {
        self.rooms
    }

    /// Returns the order-0 room.
    #[must_use]
    pub fn root(&self) -> &Room {
        // Construction guarantees an order-0 room is present.
        self.rooms
            .iter()
            .find(|r| r.is_root())
            .unwrap_or(&self.rooms[0])
    }

    /// Returns the rooms of order 1 and above.
    pub fn virtual_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| !r.is_root())
    }

    #[must_use]
    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.index.get(id).map(|&i| &self.rooms[i])
    }

    /// Returns the room owning a grid cell.
    #[must_use]
    pub fn at_cell(&self, cell: IVec2) -> Option<&Room> {
        self.cells.get(&cell).map(|&i| &self.rooms[i])
    }

    /// Returns the room whose box contains a global point.
    ///
    /// Points on a shared edge resolve to the cell on the `+x`/`+y` side.
    #[must_use]
    pub fn room_at_point(&self, point: Vec2) -> Option<&Room> {
        let size = self.root().size().as_vec2();
        let cell = (point / size).floor().as_ivec2();
        self.at_cell(cell)
    }

    /// Returns the highest order this tree was built for.
    #[must_use]
    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// Returns the number of rooms, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns how many rooms have the given reflection order.
    #[must_use]
    pub fn count_by_order(&self, order: u32) -> usize {
        self.rooms
            .iter()
            .filter(|r| r.reflection_order() == order)
            .count()
    }

    /// Walks parent links from `id` toward the root.
    ///
    /// A missing parent stops the walk; the resolved prefix is kept and the
    /// break is reported in [`Ancestry::broken`].
    pub fn ancestry(&self, id: &RoomId) -> Result<Ancestry<'_>> {
        let mut room = self
            .get(id)
            .ok_or_else(|| MirrorRoomsError::RoomNotFound(id.clone()))?;
        let mut steps = Vec::with_capacity(room.reflection_order() as usize);
        let mut broken = None;

        while let (Some(parent_id), Some(wall)) = (room.parent_id(), room.reflection_wall()) {
            let Some(parent) = self.get(parent_id) else {
                broken = Some(MirrorRoomsError::BrokenAncestry {
                    room: room.id().clone(),
                    parent: parent_id.clone(),
                });
                break;
            };
            steps.push(AncestryStep { room, parent, wall });
            room = parent;
        }

        Ok(Ancestry { steps, broken })
    }
}
