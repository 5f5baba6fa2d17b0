//! Folding a straight sight line back into the real room.
//!
//! A sight line toward a virtual object is straight in the lattice of
//! virtual rooms. Folding reflects it back wall by wall, from the virtual
//! room toward the root, until every point lies in the real room and the
//! line has become the physical zig-zag light path.

use glam::Vec2;
use mirror_rooms_core::{
    reflect_point, reflect_point_partial, Axis, MirrorRoomsError, Result, RoomId, Wall,
};

use crate::ray_path::RayPath;
use crate::room_tree::{AncestryStep, RoomTree};

/// Tolerance for deciding whether a point lies in the room being folded.
pub const FOLD_EPSILON: f32 = 1e-4;

/// One fold: maps the contents of `room_id` onto its parent by reflecting
/// across the parent's `wall`.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldStep {
    pub room_id: RoomId,
    pub parent_id: RoomId,
    pub wall: Wall,
    /// Global box of the room being folded.
    pub bounds: (Vec2, Vec2),
    /// Global origin of the parent, whose wall is the mirror.
    pub parent_origin: Vec2,
    pub size: Vec2,
}

impl FoldStep {
    pub fn from_ancestry(step: &AncestryStep<'_>) -> Self {
        Self {
            room_id: step.room.id().clone(),
            parent_id: step.parent.id().clone(),
            wall: step.wall,
            bounds: step.room.bounds(),
            parent_origin: step.parent.origin(),
            size: step.parent.size().as_vec2(),
        }
    }

    /// Returns whether a point is affected by this fold.
    ///
    /// Only the coordinate along the fold axis is tested against the room's
    /// span on that axis, so crossings through neighbouring images off the
    /// ancestry chain fold too. Edges count; points on the fold wall stay
    /// fixed.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.bounds;
        let (value, lo, hi) = match self.wall.axis() {
            Axis::X => (point.x, min.x, max.x),
            Axis::Y => (point.y, min.y, max.y),
        };
        value >= lo - FOLD_EPSILON && value <= hi + FOLD_EPSILON
    }

    /// Returns the fully folded position of a point.
    #[must_use]
    pub fn target(&self, point: Vec2) -> Vec2 {
        reflect_point(point, self.wall, self.parent_origin, self.size)
    }
}

/// Applies one fold at `progress` (clamped to `[0, 1]`).
///
/// Points within the folded room's span along the fold axis move linearly
/// toward their reflection; everything else passes through unchanged.
/// `progress = 1` is the exact reflection.
#[must_use]
pub fn fold_step(points: &[Vec2], step: &FoldStep, progress: f32) -> Vec<Vec2> {
    points
        .iter()
        .map(|&p| {
            if step.contains(p) {
                reflect_point_partial(p, step.wall, step.parent_origin, step.size, progress)
            } else {
                p
            }
        })
        .collect()
}

/// Stateful leaf-to-root folding of one sight line.
#[derive(Debug, Clone)]
pub struct PathFolder {
    room_id: RoomId,
    path: RayPath,
    steps: Vec<FoldStep>,
    points: Vec<Vec2>,
    step_index: usize,
    /// `(room, missing parent)` where the ancestry chain broke.
    broken_link: Option<(RoomId, RoomId)>,
}

impl PathFolder {
    /// Prepares to fold `path`, which starts in the virtual room `room_id`.
    ///
    /// A broken ancestry chain is not an error: folding stops at the last
    /// resolvable step and [`is_truncated`](Self::is_truncated) reports it.
    pub fn new(path: RayPath, tree: &RoomTree, room_id: &RoomId) -> Result<Self> {
        let ancestry = tree.ancestry(room_id)?;
        let broken_link = match &ancestry.broken {
            Some(MirrorRoomsError::BrokenAncestry { room, parent }) => {
                log::warn!("folding '{room_id}' will stop at '{room}': parent '{parent}' is missing");
                Some((room.clone(), parent.clone()))
            }
            _ => None,
        };
        let steps: Vec<FoldStep> = ancestry.steps.iter().map(FoldStep::from_ancestry).collect();
        let points = Self::initial_points(&path);

        Ok(Self {
            room_id: room_id.clone(),
            path,
            steps,
            points,
            step_index: 0,
            broken_link,
        })
    }

    /// Point set of an unfolded path: every segment endpoint in order.
    #[must_use]
    pub fn initial_points(path: &RayPath) -> Vec<Vec2> {
        let Some(first) = path.segments.first() else {
            return path.points.clone();
        };
        std::iter::once(first.start)
            .chain(path.segments.iter().map(|s| s.end))
            .collect()
    }

    /// Returns the virtual room the path originates in.
    #[must_use]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Returns the unfolded path.
    #[must_use]
    pub fn path(&self) -> &RayPath {
        &self.path
    }

    /// Returns the fold steps, leaf to root.
    #[must_use]
    pub fn steps(&self) -> &[FoldStep] {
        &self.steps
    }

    /// Returns the index of the next step to fold.
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Returns the points with every committed fold applied.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Returns the next step to fold, if any.
    #[must_use]
    pub fn current_step(&self) -> Option<&FoldStep> {
        self.steps.get(self.step_index)
    }

    /// Returns the room currently holding the folded end of the path: the
    /// room the next step folds, or the last parent reached.
    #[must_use]
    pub fn active_room(&self) -> &RoomId {
        match (self.current_step(), self.steps.last()) {
            (Some(step), _) => &step.room_id,
            (None, Some(last)) => &last.parent_id,
            (None, None) => &self.room_id,
        }
    }

    /// Returns whether no steps remain.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step_index >= self.steps.len()
    }

    /// Returns whether the chain stopped short of the root.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.broken_link.is_some()
    }

    /// Returns the points with the current step applied at `progress`,
    /// without committing it.
    #[must_use]
    pub fn preview(&self, progress: f32) -> Vec<Vec2> {
        match self.current_step() {
            Some(step) => fold_step(&self.points, step, progress),
            None => self.points.clone(),
        }
    }

    /// Commits the current step. Returns `false` when already complete.
    pub fn commit_step(&mut self) -> bool {
        let Some(step) = self.current_step() else {
            return false;
        };
        let folded = fold_step(&self.points, step, 1.0);
        log::debug!(
            "folded '{}' onto '{}' across {}",
            step.room_id,
            step.parent_id,
            step.wall
        );
        self.points = folded;
        self.step_index += 1;
        true
    }

    /// Commits every remaining step and returns the physical path.
    pub fn fold_fully(&mut self) -> &[Vec2] {
        while self.commit_step() {}
        &self.points
    }

    /// Discards all folds and restores the unfolded points.
    pub fn reset(&mut self) {
        self.points = Self::initial_points(&self.path);
        self.step_index = 0;
    }

    /// Returns the fully folded path, or an error if the chain is broken.
    pub fn folded_path(&self) -> Result<Vec<Vec2>> {
        if let Some((room, parent)) = &self.broken_link {
            return Err(MirrorRoomsError::BrokenAncestry {
                room: room.clone(),
                parent: parent.clone(),
            });
        }
        let mut folder = self.clone();
        Ok(folder.fold_fully().to_vec())
    }
}
