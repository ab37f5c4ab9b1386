//! Structural correspondence between two patterns
//!
//! Matching registers the node cloud of one pattern against the other by
//! greedy nearest neighbor: each node (in index order) claims its
//! Euclidean-nearest counterpart, and if a counterpart is claimed twice
//! the registration is ambiguous and the whole match fails. Rope midpoints
//! are matched the same way. This is deliberately not a globally optimal
//! assignment - it is an order-dependent O(n²) heuristic that works
//! because both clouds live on the common scaled grid.
//!
//! A failed match is an expected negative outcome (`None`), never an
//! error.

use log::trace;

use crate::pattern::Pattern;

/// A structural correspondence between two patterns of equal topology.
///
/// Index mappings go from the promoted side to the other side;
/// `swap` records that the roles were exchanged because the first
/// argument of [`match_patterns`] was not promoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub node_mapping: Vec<usize>,
    pub rope_mapping: Vec<usize>,
    pub swap: bool,
}

/// Index of the point nearest to `(x, y)`. Ties go to the earliest point.
fn nearest_point(xs: &[f32], ys: &[f32], x: f32, y: f32) -> usize {
    debug_assert!(!xs.is_empty());
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for i in 0..xs.len() {
        let dx = (xs[i] - x) as f64;
        let dy = (ys[i] - y) as f64;
        let dist = dx * dx + dy * dy;
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Greedily match two equally sized point clouds. `None` when two source
/// points claim the same target (ambiguous registration).
fn match_clouds(from: (&[f32], &[f32]), to: (&[f32], &[f32])) -> Option<Vec<usize>> {
    let (x1, y1) = from;
    let (x2, y2) = to;
    debug_assert_eq!(x1.len(), x2.len());

    let mut result = Vec::with_capacity(x1.len());
    for i in 0..x1.len() {
        let best = nearest_point(x2, y2, x1[i], y1[i]);
        if result.contains(&best) {
            trace!("ambiguous registration: target {best} claimed twice");
            return None;
        }
        result.push(best);
    }
    Some(result)
}

/// Compute a structural correspondence between two patterns.
///
/// Fails fast (`None`) when the node or rope counts differ. At least one
/// side must be promoted; when `p1` is not, the roles are swapped
/// internally and recorded in [`Match::swap`] so the comparator can undo
/// it.
pub fn match_patterns(p1: &Pattern, p2: &Pattern) -> Option<Match> {
    if p1.node_count() != p2.node_count() {
        return None;
    }
    if p1.rope_count() != p2.rope_count() {
        return None;
    }

    debug_assert!(p1.is_promoted() || p2.is_promoted());
    let (p1, p2, swap) = if p1.is_promoted() {
        (p1, p2, false)
    } else {
        (p2, p1, true)
    };

    let node_mapping = match_clouds(p1.node_coords(), p2.node_coords())?;
    let rope_mapping = match_clouds(p1.median_coords(), p2.median_coords())?;

    Some(Match {
        node_mapping,
        rope_mapping,
        swap,
    })
}
