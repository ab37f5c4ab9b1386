//! Patterns - matchable derivations of a glyph bitmap
//!
//! A [`Pattern`] bundles everything recognition needs to know about one
//! glyph: a scale-normalized chaincode, cached float coordinates of its
//! nodes and rope midpoints (the raw material of structural matching), a
//! lazily built reversed-rope cache enabling bidirectional rope
//! comparison, and a shift-and-cut fingerprint taken from the unscaled
//! pixels.
//!
//! The scale normalization fixes the half-perimeter of every pattern at
//! [`COMMON_HALF_PERIMETER`], so glyphs of different sizes land on a
//! common grid before their node clouds are compared.

use glyphcode_core::{Bitmap, Chaincode, reverse_step};
use log::debug;

use crate::fingerprint::Fingerprint;

/// Every pattern is scaled so that `width + height` of its chaincode grid
/// equals this.
pub const COMMON_HALF_PERIMETER: usize = 32;

/// Aspect ratios may differ by at most this factor (checked both ways)
/// before two patterns are considered incomparable by fingerprint.
pub const MAX_ASPECT_DIFF_COEF: f64 = 1.3;

/// A matchable description of one glyph.
#[derive(Debug, Clone)]
pub struct Pattern {
    cc: Chaincode,
    nodes_x: Vec<f32>,
    nodes_y: Vec<f32>,
    medians_x: Vec<f32>,
    medians_y: Vec<f32>,
    /// Reversed steps per rope, present only after [`Pattern::promote`].
    backwards: Option<Vec<Vec<u8>>>,
    fingerprint: Fingerprint,
}

impl Pattern {
    /// Derive a pattern from a glyph bitmap.
    ///
    /// The bitmap is windowed to its ink bounding box (an all-white bitmap
    /// degenerates to a 1x1 window), skeletonized, chaincoded, and scaled;
    /// the fingerprint is computed from the unscaled window pixels,
    /// bypassing the skeleton.
    pub fn new(bitmap: &Bitmap) -> Pattern {
        let window = match bitmap.bounding_box() {
            Some(b) => bitmap.window(&b),
            // 1x1 is always constructible
            None => Bitmap::new(1, 1).unwrap(),
        };
        let cc = Chaincode::from_bitmap(&window);
        let fingerprint = Fingerprint::of_bitmap(&window);
        Self::from_raw_chaincode(cc, fingerprint)
    }

    /// Scale a freshly extracted chaincode onto the common grid and build
    /// the coordinate caches.
    fn from_raw_chaincode(cc: Chaincode, fingerprint: Fingerprint) -> Pattern {
        let coef = COMMON_HALF_PERIMETER as f64 / (cc.width + cc.height) as f64;

        // midpoints are measured on the raw grid, then brought down with
        // the same coefficient
        let mut medians_x = Vec::with_capacity(cc.rope_count());
        let mut medians_y = Vec::with_capacity(cc.rope_count());
        for i in 0..cc.rope_count() {
            let (mx, my) = cc.rope_middle_point(i);
            medians_x.push((mx as f64 * coef) as f32);
            medians_y.push((my as f64 * coef) as f32);
        }

        // the half-perimeter coefficient is always in range
        let scaled = cc.scale(coef).unwrap();
        debug!(
            "pattern: {} nodes, {} ropes, coef {coef:.4}",
            scaled.node_count(),
            scaled.rope_count()
        );
        Self::from_parts(scaled, medians_x, medians_y, fingerprint)
    }

    /// Assemble a pattern from an already scaled chaincode and its cached
    /// rope medians, recomputing the node coordinate cache. This is the
    /// deserializer's entry point.
    pub fn from_parts(
        cc: Chaincode,
        medians_x: Vec<f32>,
        medians_y: Vec<f32>,
        fingerprint: Fingerprint,
    ) -> Pattern {
        debug_assert_eq!(medians_x.len(), cc.rope_count());
        debug_assert_eq!(medians_y.len(), cc.rope_count());
        let nodes_x = cc.nodes.iter().map(|n| n.x as f32).collect();
        let nodes_y = cc.nodes.iter().map(|n| n.y as f32).collect();
        Pattern {
            cc,
            nodes_x,
            nodes_y,
            medians_x,
            medians_y,
            backwards: None,
            fingerprint,
        }
    }

    /// The scale-normalized chaincode.
    #[inline]
    pub fn chaincode(&self) -> &Chaincode {
        &self.cc
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.cc.node_count()
    }

    #[inline]
    pub fn rope_count(&self) -> usize {
        self.cc.rope_count()
    }

    /// Cached node coordinates, parallel to `chaincode().nodes`.
    #[inline]
    pub fn node_coords(&self) -> (&[f32], &[f32]) {
        (&self.nodes_x, &self.nodes_y)
    }

    /// Cached rope midpoint coordinates, parallel to `chaincode().ropes`.
    #[inline]
    pub fn median_coords(&self) -> (&[f32], &[f32]) {
        (&self.medians_x, &self.medians_y)
    }

    #[inline]
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Whether the reversed-rope cache has been built.
    #[inline]
    pub fn is_promoted(&self) -> bool {
        self.backwards.is_some()
    }

    /// Reversed steps per rope, if promoted.
    #[inline]
    pub(crate) fn backwards(&self) -> Option<&[Vec<u8>]> {
        self.backwards.as_deref()
    }

    /// Build the reversed-rope cache: each rope's steps reversed in order
    /// with every symbol replaced by its opposite direction. Idempotent;
    /// promotion is the only mutation a pattern ever sees after
    /// construction.
    pub fn promote(&mut self) {
        if self.backwards.is_some() {
            return;
        }
        let backwards = self
            .cc
            .ropes
            .iter()
            .map(|rope| rope.steps.iter().rev().map(|&c| reverse_step(c)).collect())
            .collect();
        self.backwards = Some(backwards);
    }

    /// Do the two source windows have comparable aspect ratios?
    ///
    /// Cross-multiplied so the test is symmetric: neither `w1 * h2` nor
    /// `w2 * h1` may exceed the other by more than `coef`.
    pub fn aspect_compatible(&self, other: &Pattern, coef: f64) -> bool {
        let a = (self.cc.width * other.cc.height) as f64;
        let b = (other.cc.width * self.cc.height) as f64;
        !(a > coef * b || b > coef * a)
    }

    /// Squared fingerprint distance, or `i64::MAX` for patterns whose
    /// aspect ratios differ beyond [`MAX_ASPECT_DIFF_COEF`].
    pub fn fingerprint_distance(&self, other: &Pattern) -> i64 {
        if !self.aspect_compatible(other, MAX_ASPECT_DIFF_COEF) {
            return i64::MAX;
        }
        self.fingerprint.distance_squared(other.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bitmap_gives_empty_pattern() {
        let bitmap = Bitmap::new(9, 9).unwrap();
        let p = Pattern::new(&bitmap);
        assert_eq!(p.node_count(), 0);
        assert_eq!(p.rope_count(), 0);
    }

    #[test]
    fn test_half_perimeter_normalization() {
        let bitmap = Bitmap::from_ascii(
            "
            @......
            @......
            @......
            @@@@@@@
            ",
        );
        let p = Pattern::new(&bitmap);
        let cc = p.chaincode();
        // coordinate truncation can shave up to one unit off each side
        let half_perimeter = cc.width + cc.height;
        assert!(
            (COMMON_HALF_PERIMETER - 2..=COMMON_HALF_PERIMETER).contains(&half_perimeter),
            "got {half_perimeter}"
        );
    }

    #[test]
    fn test_medians_scaled_alongside_nodes() {
        let bitmap = Bitmap::from_ascii("@@@@@@@@@@@@@@@@");
        let p = Pattern::new(&bitmap);
        assert_eq!(p.rope_count(), 1);
        let (mx, _) = p.median_coords();
        let (nx, _) = p.node_coords();
        // the midpoint must land between the two endpoints on the scaled grid
        assert!(nx[0].min(nx[1]) <= mx[0] && mx[0] <= nx[0].max(nx[1]));
    }

    #[test]
    fn test_promote_is_idempotent() {
        let bitmap = Bitmap::from_ascii(
            "
            @....
            .@...
            ..@@@
            ",
        );
        let mut p = Pattern::new(&bitmap);
        assert!(!p.is_promoted());
        p.promote();
        assert!(p.is_promoted());
        let first = p.backwards().unwrap().to_vec();
        p.promote();
        assert_eq!(p.backwards().unwrap(), first.as_slice());
    }

    #[test]
    fn test_backwards_ropes_are_reversed() {
        let bitmap = Bitmap::from_ascii("@@@@@");
        let mut p = Pattern::new(&bitmap);
        p.promote();
        let back = p.backwards().unwrap();
        for (rope, rev) in p.cc.ropes.iter().zip(back.iter()) {
            assert_eq!(rope.steps.len(), rev.len());
            for (&a, &b) in rope.steps.iter().zip(rev.iter().rev()) {
                assert_eq!(reverse_step(a), b);
            }
        }
    }

    #[test]
    fn test_aspect_gate() {
        let square = Pattern::new(&Bitmap::from_ascii(
            "
            @@@@
            @..@
            @..@
            @@@@
            ",
        ));
        let tall = Pattern::new(&Bitmap::from_ascii(
            "
            @@
            @@
            @@
            @@
            @@
            @@
            @@
            @@
            ",
        ));
        assert!(square.aspect_compatible(&square, MAX_ASPECT_DIFF_COEF));
        assert!(!square.aspect_compatible(&tall, MAX_ASPECT_DIFF_COEF));
        assert!(!tall.aspect_compatible(&square, MAX_ASPECT_DIFF_COEF));
        assert_eq!(square.fingerprint_distance(&tall), i64::MAX);
        assert_eq!(square.fingerprint_distance(&square), 0);
    }
}
