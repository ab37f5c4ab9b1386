//! Graph extraction from a thinned skeleton
//!
//! The framework cells double as traversal state. A cell holds the ink
//! value (`INK` for an unvisited skeleton pixel, `HOT` once it is known to
//! be a node) plus passed-edge flags recording which of its four axis
//! directions have been crossed by a rope walk. Each flag pair encodes one
//! axis component of the crossing direction, so marking an edge from either
//! endpoint is enough to recognize it as consumed from both sides, and each
//! undirected edge between two hot points gets walked exactly once.
//!
//! Path pixels are cleared as the walk passes over them; a skeleton path
//! pixel always has exactly one remaining nonzero neighbor, which is how
//! the walker finds its next direction without ever backtracking.

use log::trace;

use super::{Chaincode, Node, Rope};
use crate::bitmap::BorderedBitmap;
use crate::steps::step_char;

/// Unvisited skeleton pixel.
const INK: u8 = 1;

/// A pixel promoted to a node. Hot cells are never cleared, only marked.
const HOT: u8 = 2;

// Passed-edge flags, one per axis component of the crossing direction.
const DX_POS: u8 = 1 << 7;
const DX_ZERO: u8 = 1 << 6;
const DX_NEG: u8 = 1 << 5;
const DY_POS: u8 = 1 << 4;
const DY_ZERO: u8 = 1 << 3;
const DY_NEG: u8 = 1 << 2;

/// The flag pair for crossing a cell's `(dx, dy)` edge.
#[inline]
fn passed_mark(dx: isize, dy: isize) -> u8 {
    let fx = match dx {
        -1 => DX_NEG,
        0 => DX_ZERO,
        _ => DX_POS,
    };
    let fy = match dy {
        -1 => DY_NEG,
        0 => DY_ZERO,
        _ => DY_POS,
    };
    fx | fy
}

/// Has the `(dx, dy)` edge of this cell been crossed (in either direction)?
#[inline]
fn passed_edge(cell: u8, dx: isize, dy: isize) -> bool {
    let mark = passed_mark(dx, dy);
    cell & mark == mark
}

/// Count of crossed axis edges at a node cell.
#[inline]
fn count_passed_edges(cell: u8) -> usize {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .iter()
        .filter(|&&(dx, dy)| passed_edge(cell, dx, dy))
        .count()
}

/// Direction toward the single remaining nonzero neighbor.
#[inline]
fn continuing_direction(framework: &BorderedBitmap, x: isize, y: isize) -> (isize, isize) {
    let right = (framework.get(x + 1, y) != 0) as isize;
    let left = (framework.get(x - 1, y) != 0) as isize;
    let down = (framework.get(x, y + 1) != 0) as isize;
    let up = (framework.get(x, y - 1) != 0) as isize;
    debug_assert_eq!(right + left + down + up, 1);
    (right - left, down - up)
}

/// Same, but the cell we came from may still be nonzero (the start node of
/// the walk). It is blanked for the duration of the lookup.
fn continuing_direction_first_time(
    framework: &mut BorderedBitmap,
    x: isize,
    y: isize,
    dx: isize,
    dy: isize,
) -> (isize, isize) {
    let saved = framework.get(x - dx, y - dy);
    framework.set(x - dx, y - dy, 0);
    let result = continuing_direction(framework, x, y);
    framework.set(x - dx, y - dy, saved);
    result
}

/// Index of the node at `(x, y)`. Linear scan, intentionally: glyph graphs
/// have a handful of nodes and a spatial index would not pay for itself.
fn find_node(cc: &Chaincode, x: isize, y: isize) -> usize {
    cc.nodes
        .iter()
        .position(|n| n.x as isize == x && n.y as isize == y)
        .expect("rope walk ended off every node")
}

/// Walk one rope away from `start_node` in direction `(dx, dy)`, if there
/// is an unconsumed road that way, clearing path pixels behind and
/// recording one step symbol per pixel until the next hot point.
fn walk(
    cc: &mut Chaincode,
    framework: &mut BorderedBitmap,
    start_node: usize,
    mut dx: isize,
    mut dy: isize,
) {
    let mut x = cc.nodes[start_node].x as isize;
    let mut y = cc.nodes[start_node].y as isize;

    // No road that way, or this edge was already consumed from the far end.
    if framework.get(x + dx, y + dy) == 0 {
        return;
    }
    if passed_edge(framework.get(x, y), dx, dy) {
        return;
    }

    let rope_index = cc.ropes.len();
    debug_assert_eq!(
        cc.nodes[start_node].rope_indices.len(),
        count_passed_edges(framework.get(x, y))
    );
    cc.nodes[start_node].rope_indices.push(rope_index);
    framework.mark(x, y, passed_mark(dx, dy));

    let mut steps = Vec::new();
    x += dx;
    y += dy;
    steps.push(step_char(dx as i32, dy as i32));

    if framework.get(x, y) == INK {
        framework.set(x, y, 0);
        (dx, dy) = continuing_direction_first_time(framework, x, y, dx, dy);
        loop {
            x += dx;
            y += dy;
            steps.push(step_char(dx as i32, dy as i32));
            if framework.get(x, y) != INK {
                break;
            }
            framework.set(x, y, 0);
            (dx, dy) = continuing_direction(framework, x, y);
        }
    }

    // Arrived at a hot point; mark the entrance edge.
    debug_assert!(!passed_edge(framework.get(x, y), -dx, -dy));
    framework.mark(x, y, passed_mark(-dx, -dy));

    let end = find_node(cc, x, y);
    cc.nodes[end].rope_indices.push(rope_index);
    trace!(
        "rope {rope_index}: node {start_node} -> node {end}, {} steps",
        steps.len()
    );
    cc.ropes.push(Rope {
        start: start_node,
        end,
        steps,
    });
}

/// First pass: every skeleton pixel whose 4-neighbor degree is not 2
/// becomes a node. The pixels are not yet marked hot; overwriting them
/// here would corrupt the degree computation of pixels scanned later.
fn search_hot_points(cc: &mut Chaincode, framework: &BorderedBitmap) {
    for y in 0..framework.height() as isize {
        for x in 0..framework.width() as isize {
            if framework.get(x, y) == 0 {
                continue;
            }
            let degree = [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .iter()
                .filter(|&&(dx, dy)| framework.get(x + dx, y + dy) != 0)
                .count();
            if degree != 2 {
                cc.nodes.push(Node {
                    x: x as i32,
                    y: y as i32,
                    degree,
                    rope_indices: Vec::with_capacity(degree),
                });
            }
        }
    }
}

fn mark_hot_points(cc: &Chaincode, framework: &mut BorderedBitmap) {
    for node in &cc.nodes {
        framework.set(node.x as isize, node.y as isize, HOT);
    }
}

/// Consume one pure cycle through its canonical point `(x, y)`:
///
/// ```text
///    (x,y) <--
///      |
///      V
/// ```
///
/// A synthetic degree-2 node is injected there and a single walk downward
/// closes back onto it from the left.
fn take_cycle(cc: &mut Chaincode, framework: &mut BorderedBitmap, x: isize, y: isize) {
    debug_assert!(framework.get(x, y + 1) != 0);
    debug_assert!(framework.get(x + 1, y) != 0);

    framework.set(x, y, HOT);
    cc.nodes.push(Node {
        x: x as i32,
        y: y as i32,
        degree: 2,
        rope_indices: Vec::with_capacity(2),
    });

    let node = cc.nodes.len() - 1;
    walk(cc, framework, node, 0, 1);

    // The walk must have returned to the starting point from the left.
    debug_assert!(passed_edge(framework.get(x, y), 1, 0));
}

/// After all node-to-node ropes are walked, any remaining ink belongs to
/// simple closed loops. Find each loop's leftmost-of-topmost pixel (no ink
/// above or to the left, ink below and to the right) and take it.
fn take_all_cycles(cc: &mut Chaincode, framework: &mut BorderedBitmap) {
    for y in 0..framework.height() as isize {
        for x in 0..framework.width() as isize {
            if framework.get(x, y) == INK
                && framework.get(x - 1, y) == 0
                && framework.get(x, y - 1) == 0
            {
                take_cycle(cc, framework, x, y);
            }
        }
    }
}

impl Chaincode {
    /// Extract the glyph graph from a skeleton framework.
    ///
    /// The framework must contain only 0/1 cells on entry (anything a
    /// [`skeletonize`](crate::thin::skeletonize) call or
    /// [`BorderedBitmap::from_bitmap`] produces is fine). It is consumed as
    /// scratch space: on return only node cells are nonzero.
    pub fn from_framework(framework: &mut BorderedBitmap) -> Chaincode {
        let mut cc = Chaincode::new(framework.width(), framework.height());

        search_hot_points(&mut cc, framework);
        mark_hot_points(&cc, framework);

        for node in 0..cc.nodes.len() {
            walk(&mut cc, framework, node, 0, -1);
            walk(&mut cc, framework, node, 0, 1);
            walk(&mut cc, framework, node, -1, 0);
            walk(&mut cc, framework, node, 1, 0);
        }

        take_all_cycles(&mut cc, framework);

        debug_assert!(
            cc.nodes
                .iter()
                .all(|n| n.rope_indices.len() == n.degree)
        );
        cc.nodes.shrink_to_fit();
        cc.ropes.shrink_to_fit();
        cc
    }
}
