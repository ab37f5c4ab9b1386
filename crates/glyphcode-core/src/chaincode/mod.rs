//! Chaincode - the topological description of a thinned glyph
//!
//! A [`Chaincode`] is a graph extracted from a 1-pixel-wide skeleton:
//! [`Node`]s sit at endpoints, junctions and isolated pixels (every skeleton
//! pixel whose 4-neighbor degree is not 2), and [`Rope`]s are the paths
//! between them, encoded as sequences of direction step symbols (see
//! [`crate::steps`]). Pure cycles, which contain no such pixel, get one
//! synthetic degree-2 node injected at a canonical point.
//!
//! Extraction ([`Chaincode::from_framework`]) is lossless: [`Chaincode::render`]
//! reproduces the skeleton bit for bit. The graph can also be rescaled onto a
//! coarser grid ([`Chaincode::scale`]), which re-interprets each rope's steps
//! cell by cell, a deliberately cheap approximation of true vectorization.

mod extract;

use crate::bitmap::Bitmap;
use crate::error::{CoreError, CoreResult};
use crate::steps::{step_dx, step_dy};
use crate::thin::{Connectivity, skeletonize};

/// A graph vertex: an endpoint, junction, isolated pixel, or the synthetic
/// point injected into a pure cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub x: i32,
    pub y: i32,
    /// Count of incident rope ends. Never 2, except for the one synthetic
    /// node injected per cycle.
    pub degree: usize,
    /// Incident ropes in traversal order. A self-loop appears twice.
    pub rope_indices: Vec<usize>,
}

/// A path between two nodes, one direction symbol per unit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rope {
    pub start: usize,
    pub end: usize,
    pub steps: Vec<u8>,
}

impl Rope {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The extracted glyph graph, together with the source window size.
#[derive(Debug, Clone, PartialEq)]
pub struct Chaincode {
    pub nodes: Vec<Node>,
    pub ropes: Vec<Rope>,
    /// Width of the source window the graph was extracted from.
    pub width: usize,
    /// Height of the source window.
    pub height: usize,
}

impl Chaincode {
    /// An empty chaincode for a `width × height` window.
    pub fn new(width: usize, height: usize) -> Self {
        Chaincode {
            nodes: Vec::new(),
            ropes: Vec::new(),
            width,
            height,
        }
    }

    /// Skeletonize a glyph bitmap (4-connectivity) and extract its graph.
    pub fn from_bitmap(bitmap: &Bitmap) -> Self {
        let mut framework = skeletonize(bitmap, Connectivity::Four);
        Self::from_framework(&mut framework)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn rope_count(&self) -> usize {
        self.ropes.len()
    }

    /// The point reached after walking `floor(len / 2)` steps from the
    /// rope's start node.
    ///
    /// # Panics
    ///
    /// Panics if `rope_index` is out of range.
    pub fn rope_middle_point(&self, rope_index: usize) -> (i32, i32) {
        let rope = &self.ropes[rope_index];
        let node = &self.nodes[rope.start];
        let mut x = node.x;
        let mut y = node.y;
        for &step in &rope.steps[..rope.len() / 2] {
            x += step_dx(step);
            y += step_dy(step);
        }
        (x, y)
    }

    /// Paint the graph back into a bitmap. For a chaincode produced by
    /// [`Chaincode::from_framework`] this reproduces the input skeleton
    /// exactly.
    pub fn render(&self) -> CoreResult<Bitmap> {
        let mut bitmap = Bitmap::new(self.width, self.height)?;
        for node in &self.nodes {
            debug_assert!(node.x >= 0 && (node.x as usize) < self.width);
            debug_assert!(node.y >= 0 && (node.y as usize) < self.height);
            bitmap.set(node.x as usize, node.y as usize, 1);
        }
        for rope in &self.ropes {
            let node = &self.nodes[rope.start];
            let mut x = node.x;
            let mut y = node.y;
            for &step in &rope.steps {
                x += step_dx(step);
                y += step_dy(step);
                debug_assert!(x >= 0 && (x as usize) < self.width);
                debug_assert!(y >= 0 && (y as usize) < self.height);
                bitmap.set(x as usize, y as usize, 1);
            }
            debug_assert_eq!(x, self.nodes[rope.end].x);
            debug_assert_eq!(y, self.nodes[rope.end].y);
        }
        Ok(bitmap)
    }

    /// Rescale the graph by `coef`, producing a new chaincode.
    ///
    /// Node coordinates are truncated onto the target grid; each rope's
    /// direction string is replayed step by step at the new scale, emitting
    /// a symbol only when a grid-cell boundary is crossed. Scaling down
    /// (`coef < 1`) is the intended use.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidScale`] unless `0 < coef < 1e5`.
    pub fn scale(&self, coef: f64) -> CoreResult<Chaincode> {
        if !(coef > 0.0 && coef < 1e5) {
            return Err(CoreError::InvalidScale(coef));
        }
        let mut result = Chaincode {
            nodes: Vec::with_capacity(self.nodes.len()),
            ropes: Vec::with_capacity(self.ropes.len()),
            width: (self.width as f64 * coef) as usize,
            height: (self.height as f64 * coef) as usize,
        };
        for node in &self.nodes {
            result.nodes.push(Node {
                x: (node.x as f64 * coef) as i32,
                y: (node.y as f64 * coef) as i32,
                degree: node.degree,
                rope_indices: node.rope_indices.clone(),
            });
        }
        for rope in &self.ropes {
            result.ropes.push(Rope {
                start: rope.start,
                end: rope.end,
                steps: self.scale_rope_steps(rope, coef),
            });
        }
        Ok(result)
    }

    /// Replay one rope's steps at the new scale, emitting a symbol per
    /// grid-cell crossing.
    fn scale_rope_steps(&self, rope: &Rope, coef: f64) -> Vec<u8> {
        let mut x = self.nodes[rope.start].x as f64 * coef;
        let mut y = self.nodes[rope.start].y as f64 * coef;
        let mut cell_x = x as i64;
        let mut cell_y = y as i64;
        let mut steps = Vec::with_capacity(rope.len());

        for &step in &rope.steps {
            let mut new_cell_x = cell_x;
            let mut new_cell_y = cell_y;
            let mut dx = 0i64;
            let mut dy = 0i64;
            match step {
                b'4' => {
                    x -= coef;
                    dx = -1;
                    new_cell_x = x as i64;
                }
                b'6' => {
                    x += coef;
                    dx = 1;
                    new_cell_x = x as i64;
                }
                b'8' => {
                    y -= coef;
                    dy = -1;
                    new_cell_y = y as i64;
                }
                b'2' => {
                    y += coef;
                    dy = 1;
                    new_cell_y = y as i64;
                }
                _ => {}
            }
            while new_cell_x != cell_x || new_cell_y != cell_y {
                cell_x += dx;
                cell_y += dy;
                steps.push(step);
            }
        }
        steps
    }

    /// Check the structural invariants: rope endpoints index valid nodes,
    /// every node's incident list length equals its degree, the incident
    /// indices are valid, and the degree sum equals twice the rope count.
    ///
    /// Used by the deserializer; extraction establishes these by
    /// construction.
    pub fn validate(&self) -> CoreResult<()> {
        let n = self.nodes.len();
        let r = self.ropes.len();
        for (i, rope) in self.ropes.iter().enumerate() {
            if rope.start >= n || rope.end >= n {
                return Err(CoreError::InconsistentChaincode(format!(
                    "rope {i} connects {} -> {} but there are {n} nodes",
                    rope.start, rope.end
                )));
            }
        }
        let mut degree_sum = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.rope_indices.len() != node.degree {
                return Err(CoreError::InconsistentChaincode(format!(
                    "node {i} has degree {} but {} incident ropes",
                    node.degree,
                    node.rope_indices.len()
                )));
            }
            if let Some(&bad) = node.rope_indices.iter().find(|&&k| k >= r) {
                return Err(CoreError::InconsistentChaincode(format!(
                    "node {i} lists rope {bad} but there are {r} ropes"
                )));
            }
            degree_sum += node.degree;
        }
        if degree_sum != 2 * r {
            return Err(CoreError::InconsistentChaincode(format!(
                "degree sum {degree_sum} does not match {r} ropes"
            )));
        }
        Ok(())
    }
}
