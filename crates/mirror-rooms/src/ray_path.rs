//! Sight lines from virtual objects to the observer.

use glam::Vec2;
use mirror_rooms_core::{Room, RoomId, Wall};

use crate::intersect::{intersect_rooms, Segment, T_EPSILON};
use crate::room_tree::RoomTree;

/// Who owns a stretch of a sight line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentOwner {
    /// A retained room.
    Room(RoomId),
    /// No known room covers this stretch.
    Outside,
}

impl SegmentOwner {
    #[must_use]
    pub fn room_id(&self) -> Option<&RoomId> {
        match self {
            SegmentOwner::Room(id) => Some(id),
            SegmentOwner::Outside => None,
        }
    }

    #[must_use]
    pub fn is_outside(&self) -> bool {
        matches!(self, SegmentOwner::Outside)
    }
}

/// A piece of a sight line in global coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub t0: f32,
    pub t1: f32,
    pub owner: SegmentOwner,
}

/// A specific wall of a specific room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WallRef {
    pub room_id: RoomId,
    pub wall: Wall,
}

/// Where a sight line leaves one room for the next.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionPoint {
    pub point: Vec2,
    /// The crossed wall of the room being left.
    pub wall: WallRef,
    /// Whether that wall is a mirror, i.e. whether light can bounce there.
    pub mirrored: bool,
}

/// A straight sight line partitioned by the rooms it traverses.
///
/// Built fresh for each (virtual object, observer) selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RayPath {
    /// Segment endpoints, from the start of the line to its end.
    pub points: Vec<Vec2>,
    /// Consecutive pieces covering the whole line exactly once.
    pub segments: Vec<PathSegment>,
    /// Crossings between consecutive rooms.
    pub reflection_points: Vec<ReflectionPoint>,
    /// Whether light can actually travel this path: it stays inside known
    /// rooms, ends in the real room, and only crosses mirrored walls.
    pub visible: bool,
}

impl RayPath {
    /// Traces the line `start -> end` through the rooms of `tree`.
    pub fn trace(start: Vec2, end: Vec2, tree: &RoomTree) -> Self {
        let segments = intersect_rooms(start, end, tree.rooms());
        Self::from_segments(start, end, &segments, tree)
    }

    /// Assembles a path from intersector output, filling coverage gaps with
    /// [`SegmentOwner::Outside`].
    pub fn from_segments(start: Vec2, end: Vec2, segments: &[Segment], tree: &RoomTree) -> Self {
        let pieces = fill_gaps(segments);
        let delta = end - start;
        let at = |t: f32| {
            if t <= 0.0 {
                start
            } else if t >= 1.0 {
                end
            } else {
                start + delta * t
            }
        };

        let mut points = Vec::with_capacity(pieces.len() + 1);
        points.push(start);
        let segments: Vec<PathSegment> = pieces
            .into_iter()
            .map(|(t0, t1, owner)| {
                let seg = PathSegment {
                    start: at(t0),
                    end: at(t1),
                    t0,
                    t1,
                    owner,
                };
                points.push(seg.end);
                seg
            })
            .collect();

        let reflection_points = crossings(&segments, tree);
        let visible = !segments.is_empty()
            && segments.iter().all(|s| !s.owner.is_outside())
            && segments
                .last()
                .and_then(|s| s.owner.room_id())
                .is_some_and(RoomId::is_root)
            && reflection_points.iter().all(|r| r.mirrored);

        Self {
            points,
            segments,
            reflection_points,
            visible,
        }
    }

    /// Returns the ids of the rooms traversed, in order.
    pub fn rooms(&self) -> impl Iterator<Item = &RoomId> {
        self.segments.iter().filter_map(|s| s.owner.room_id())
    }

    /// Returns the total length of the line.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.segments.iter().map(|s| s.start.distance(s.end)).sum()
    }
}

/// Expands room segments into a partition of `[0, 1]`, inserting outside
/// pieces for leading, interior and trailing gaps.
#[must_use]
pub fn fill_gaps(segments: &[Segment]) -> Vec<(f32, f32, SegmentOwner)> {
    let mut pieces = Vec::with_capacity(segments.len() * 2 + 1);
    let mut cursor = 0.0_f32;
    for seg in segments {
        if seg.t1 <= cursor + T_EPSILON {
            continue;
        }
        let t0 = if seg.t0 > cursor + T_EPSILON {
            pieces.push((cursor, seg.t0, SegmentOwner::Outside));
            seg.t0
        } else {
            cursor
        };
        pieces.push((t0, seg.t1, SegmentOwner::Room(seg.room_id.clone())));
        cursor = seg.t1;
    }
    if cursor < 1.0 - T_EPSILON {
        pieces.push((cursor, 1.0, SegmentOwner::Outside));
    } else if let Some(last) = pieces.last_mut() {
        last.1 = 1.0;
    }
    pieces
}

fn crossings(segments: &[PathSegment], tree: &RoomTree) -> Vec<ReflectionPoint> {
    segments
        .windows(2)
        .filter_map(|pair| {
            let exited = tree.get(pair[0].owner.room_id()?)?;
            let entered = tree.get(pair[1].owner.room_id()?)?;
            let point = pair[0].end;
            let wall = crossing_wall(exited, entered, point);
            Some(ReflectionPoint {
                point,
                wall: WallRef {
                    room_id: exited.id().clone(),
                    wall,
                },
                mirrored: exited.walls().is_mirrored(wall),
            })
        })
        .collect()
}

/// Picks the wall of `exited` a crossing goes through: the shared wall when
/// the rooms are grid neighbours, else the side nearest to `point`.
fn crossing_wall(exited: &Room, entered: &Room, point: Vec2) -> Wall {
    let step = entered.position() - exited.position();
    if let Some(wall) = Wall::ALL.into_iter().find(|w| w.step() == step) {
        return wall;
    }
    let (min, max) = exited.bounds();
    let distances = [
        (Wall::Top, (point.y - min.y).abs()),
        (Wall::Right, (max.x - point.x).abs()),
        (Wall::Bottom, (max.y - point.y).abs()),
        (Wall::Left, (point.x - min.x).abs()),
    ];
    distances
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(Wall::Top, |(wall, _)| wall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_rooms_core::WallConfig;

    fn tree(walls: WallConfig, max_order: u32) -> RoomTree {
        RoomTree::build(&Room::root(4, 4, walls), max_order)
    }

    #[test]
    fn test_outside_then_root() {
        let tree = tree(WallConfig::ALL_MIRRORED, 0);
        let path = RayPath::trace(Vec2::new(-10.0, 2.0), Vec2::new(2.0, 2.0), &tree);

        assert_eq!(path.segments.len(), 2);
        assert!(path.segments[0].owner.is_outside());
        assert_eq!(path.segments[1].owner, SegmentOwner::Room(RoomId::root()));
        assert_eq!(path.points.len(), 3);
        assert_eq!(path.points[0], Vec2::new(-10.0, 2.0));
        assert_eq!(path.points[2], Vec2::new(2.0, 2.0));
        assert!(path.reflection_points.is_empty());
        assert!(!path.visible);
    }

    #[test]
    fn test_no_coverage_is_single_outside() {
        let tree = tree(WallConfig::ALL_MIRRORED, 0);
        let path = RayPath::trace(Vec2::new(-10.0, -2.0), Vec2::new(-5.0, -3.0), &tree);
        assert_eq!(path.segments.len(), 1);
        assert!(path.segments[0].owner.is_outside());
        assert_eq!((path.segments[0].t0, path.segments[0].t1), (0.0, 1.0));
        assert!(!path.visible);
    }

    #[test]
    fn test_single_bounce_is_visible() {
        let tree = tree(WallConfig::new(true, false, false, false), 1);
        // Virtual anchor of cell (1, 1) across top, toward observer (2.5, 2.5).
        let path = RayPath::trace(Vec2::new(1.5, -1.5), Vec2::new(2.5, 2.5), &tree);

        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.reflection_points.len(), 1);
        let bounce = &path.reflection_points[0];
        assert_eq!(bounce.wall.wall, Wall::Bottom);
        assert_eq!(bounce.wall.room_id.as_str(), "root>top:1");
        assert!(bounce.point.y.abs() < 1e-5);
        assert!(bounce.mirrored);
        assert!(path.visible);
    }

    #[test]
    fn test_crossing_plain_wall_is_not_visible() {
        // A hand-assembled image across a wall that is not a mirror.
        let root = Room::root(4, 4, WallConfig::NONE);
        let top = Room::reflected(&root, Wall::Top);
        let tree = RoomTree::from_rooms(vec![root, top]).unwrap();

        let path = RayPath::trace(Vec2::new(2.0, -2.0), Vec2::new(2.0, 2.0), &tree);
        assert_eq!(path.segments.len(), 2);
        assert!(path.segments.iter().all(|s| !s.owner.is_outside()));
        assert_eq!(path.reflection_points.len(), 1);
        assert!(!path.reflection_points[0].mirrored);
        assert!(!path.visible);
    }

    #[test]
    fn test_gap_filling_covers_unit_interval() {
        let segments = vec![
            Segment {
                t0: 0.2,
                t1: 0.4,
                room_id: RoomId::from("a"),
                reflection_order: 1,
            },
            Segment {
                t0: 0.6,
                t1: 0.99995,
                room_id: RoomId::root(),
                reflection_order: 0,
            },
        ];
        let pieces = fill_gaps(&segments);
        let owners: Vec<bool> = pieces.iter().map(|p| p.2.is_outside()).collect();
        assert_eq!(owners, vec![true, false, true, false]);
        assert_eq!(pieces[0].0, 0.0);
        assert_eq!(pieces.last().unwrap().1, 1.0);
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_length() {
        let tree = tree(WallConfig::ALL_MIRRORED, 1);
        let path = RayPath::trace(Vec2::new(-2.0, 2.0), Vec2::new(2.0, 2.0), &tree);
        assert!((path.length() - 4.0).abs() < 1e-5);
        assert_eq!(path.rooms().count(), 2);
    }
}
