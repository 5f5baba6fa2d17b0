//! Sight-line / room intersection using the slab method.
//!
//! The segment from `start` (`t = 0`) to `end` (`t = 1`) is clipped against
//! each room's box. Where boxes compete for the same stretch of the line the
//! lowest reflection order wins, so the output is an ordered,
//! non-overlapping partition of the covered part of `[0, 1]`.

use glam::Vec2;
use mirror_rooms_core::{Room, RoomId};

/// Absolute tolerance on the line parameter.
pub const T_EPSILON: f32 = 1e-4;

/// A stretch `[t0, t1]` of the sight line owned by one room.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub t0: f32,
    pub t1: f32,
    pub room_id: RoomId,
    pub reflection_order: u32,
}

impl Segment {
    /// Returns the parametric length of the segment.
    #[must_use]
    pub fn len(&self) -> f32 {
        self.t1 - self.t0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= T_EPSILON
    }

    /// Orders by reflection order, then id.
    fn beats(&self, other: &Segment) -> bool {
        (self.reflection_order, &self.room_id) < (other.reflection_order, &other.room_id)
    }
}

/// Parametric interval of the line inside `[lo, hi]` on one axis.
///
/// A line parallel to the axis is unconstrained when it runs inside the
/// slab and misses it otherwise.
fn axis_interval(origin: f32, delta: f32, lo: f32, hi: f32) -> Option<(f32, f32)> {
    if delta.abs() <= f32::EPSILON {
        return (origin >= lo && origin <= hi).then_some((f32::NEG_INFINITY, f32::INFINITY));
    }
    let a = (lo - origin) / delta;
    let b = (hi - origin) / delta;
    Some((a.min(b), a.max(b)))
}

/// Clips the line against one room, returning the covered `[t0, t1]`
/// clamped to `[0, 1]`.
#[must_use]
pub fn clip_room(start: Vec2, end: Vec2, room: &Room) -> Option<(f32, f32)> {
    let (min, max) = room.bounds();
    let delta = end - start;
    let (tx0, tx1) = axis_interval(start.x, delta.x, min.x, max.x)?;
    let (ty0, ty1) = axis_interval(start.y, delta.y, min.y, max.y)?;

    let t_enter = tx0.max(ty0);
    let t_exit = tx1.min(ty1);
    if t_enter >= t_exit || t_exit <= 0.0 || t_enter >= 1.0 {
        return None;
    }
    Some((t_enter.max(0.0), t_exit.min(1.0)))
}

/// Computes which rooms own which parts of the segment `start -> end`.
///
/// The result is sorted by `t0` and pairwise non-overlapping beyond
/// [`T_EPSILON`]. Stretches of `[0, 1]` not covered by any segment lie
/// outside every room. Slivers no longer than the tolerance are dropped.
pub fn intersect_rooms<'a>(
    start: Vec2,
    end: Vec2,
    rooms: impl IntoIterator<Item = &'a Room>,
) -> Vec<Segment> {
    let mut candidates: Vec<Segment> = rooms
        .into_iter()
        .filter_map(|room| {
            let (t0, t1) = clip_room(start, end, room)?;
            Some(Segment {
                t0,
                t1,
                room_id: room.id().clone(),
                reflection_order: room.reflection_order(),
            })
        })
        .filter(|s| !s.is_empty())
        .collect();

    candidates.sort_by(|a, b| {
        a.t0.total_cmp(&b.t0)
            .then(a.reflection_order.cmp(&b.reflection_order))
            .then_with(|| a.room_id.cmp(&b.room_id))
    });

    resolve_overlaps(&candidates)
}

/// Splits `[0, 1]` at every candidate endpoint and assigns each elementary
/// stretch to the best covering candidate, then merges neighbours owned by
/// the same room.
fn resolve_overlaps(candidates: &[Segment]) -> Vec<Segment> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut cuts: Vec<f32> = candidates.iter().flat_map(|s| [s.t0, s.t1]).collect();
    cuts.sort_by(f32::total_cmp);
    let mut breaks: Vec<f32> = Vec::with_capacity(cuts.len());
    for t in cuts {
        if breaks.last().map_or(true, |&last| t - last > T_EPSILON) {
            breaks.push(t);
        }
    }

    let mut resolved: Vec<Segment> = Vec::new();
    for window in breaks.windows(2) {
        let (a, b) = (window[0], window[1]);
        let owner = candidates
            .iter()
            .filter(|s| s.t0 <= a + T_EPSILON && s.t1 >= b - T_EPSILON)
            .reduce(|best, s| if s.beats(best) { s } else { best });
        let Some(owner) = owner else {
            continue;
        };

        match resolved.last_mut() {
            Some(last) if last.room_id == owner.room_id && (last.t1 - a).abs() <= T_EPSILON => {
                last.t1 = b;
            }
            _ => resolved.push(Segment {
                t0: a,
                t1: b,
                room_id: owner.room_id.clone(),
                reflection_order: owner.reflection_order,
            }),
        }
    }
    resolved
}
