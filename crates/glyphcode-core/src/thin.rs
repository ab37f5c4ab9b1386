//! Skeletonization by iterative peeling
//!
//! Reduces a glyph to a 1-pixel-wide framework suitable for chaincode
//! extraction: repeated passes clear border pixels whose removal does not
//! change the local connectivity (Yokoi crossing number 1) and that are not
//! stroke endpoints, until a pass makes no change.
//!
//! The output is a [`BorderedBitmap`] holding only 0/1 cells with its white
//! margin intact, exactly what
//! [`Chaincode::from_framework`](crate::chaincode::Chaincode::from_framework)
//! expects.

use crate::bitmap::{Bitmap, BorderedBitmap};

/// Which connectivity the peel must preserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 4-connected foreground (the recognition pipeline's choice)
    #[default]
    Four,
    /// 8-connected foreground
    Eight,
}

/// The eight neighbors of `(x, y)`, indexed counterclockwise from the right:
/// right, upper-right, up, upper-left, left, lower-left, down, lower-right.
#[inline]
fn neighborhood(framework: &BorderedBitmap, x: isize, y: isize) -> [u8; 8] {
    [
        (framework.get(x + 1, y) != 0) as u8,
        (framework.get(x + 1, y - 1) != 0) as u8,
        (framework.get(x, y - 1) != 0) as u8,
        (framework.get(x - 1, y - 1) != 0) as u8,
        (framework.get(x - 1, y) != 0) as u8,
        (framework.get(x - 1, y + 1) != 0) as u8,
        (framework.get(x, y + 1) != 0) as u8,
        (framework.get(x + 1, y + 1) != 0) as u8,
    ]
}

/// Yokoi crossing number: the count of foreground components the pixel
/// connects in its neighborhood. A pixel with crossing number 1 can be
/// cleared without splitting or merging anything.
fn crossing_number(n: &[u8; 8], connectivity: Connectivity) -> u32 {
    let v = |k: usize| -> u32 {
        let b = n[k % 8] as u32;
        match connectivity {
            Connectivity::Four => b,
            // the 8-connectivity number runs on the complement
            Connectivity::Eight => 1 - b,
        }
    };
    let mut sum = 0;
    for k in [0, 2, 4, 6] {
        sum += v(k) - v(k) * v(k + 1) * v(k + 2);
    }
    sum
}

/// One thinning pass in raster order. Returns `true` if any pixel was
/// cleared.
pub fn peel(framework: &mut BorderedBitmap, connectivity: Connectivity) -> bool {
    let mut changed = false;
    for y in 0..framework.height() as isize {
        for x in 0..framework.width() as isize {
            if framework.get(x, y) == 0 {
                continue;
            }
            let n = neighborhood(framework, x, y);
            let black: u32 = n.iter().map(|&b| b as u32).sum();
            // keep isolated pixels and stroke endpoints
            if black < 2 {
                continue;
            }
            if crossing_number(&n, connectivity) == 1 {
                framework.set(x, y, 0);
                changed = true;
            }
        }
    }
    changed
}

/// Thin a glyph to its framework, preserving the requested connectivity.
///
/// The result has the same interior dimensions as the input, with a white
/// one-pixel margin around it.
pub fn skeletonize(bitmap: &Bitmap, connectivity: Connectivity) -> BorderedBitmap {
    let mut framework = BorderedBitmap::from_bitmap(bitmap);
    while peel(&mut framework, connectivity) {}
    framework
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(framework: &BorderedBitmap) -> usize {
        framework.interior().ink_count()
    }

    #[test]
    fn test_empty_stays_empty() {
        let bitmap = Bitmap::new(5, 5).unwrap();
        let framework = skeletonize(&bitmap, Connectivity::Four);
        assert_eq!(ink(&framework), 0);
    }

    #[test]
    fn test_thin_line_is_stable() {
        let bitmap = Bitmap::from_ascii("@@@@@@@");
        let framework = skeletonize(&bitmap, Connectivity::Four);
        assert_eq!(framework.interior(), bitmap);
    }

    #[test]
    fn test_block_collapses() {
        let bitmap = Bitmap::from_ascii(
            "
            @@@@
            @@@@
            @@@@
            @@@@
            ",
        );
        let framework = skeletonize(&bitmap, Connectivity::Four);
        let left = ink(&framework);
        assert!(left >= 1 && left < 16, "got {left} pixels");
        // every survivor must be degree <= 2 in 4-connectivity
        for y in 0..4isize {
            for x in 0..4isize {
                if framework.get(x, y) == 0 {
                    continue;
                }
                let degree = [(-1, 0), (1, 0), (0, -1), (0, 1)]
                    .iter()
                    .filter(|&&(dx, dy)| framework.get(x + dx, y + dy) != 0)
                    .count();
                assert!(degree <= 2);
            }
        }
    }

    #[test]
    fn test_thick_bar_becomes_single_stroke() {
        let bitmap = Bitmap::from_ascii(
            "
            @@@@@@@@
            @@@@@@@@
            ",
        );
        let framework = skeletonize(&bitmap, Connectivity::Four);
        let remaining = ink(&framework);
        assert!(remaining >= 7 && remaining <= 9, "got {remaining} pixels");
    }

    #[test]
    fn test_connectivity_preserved() {
        // a filled ring must keep a closed loop (no ink vanishes entirely,
        // and the hole stays a hole)
        let bitmap = Bitmap::from_ascii(
            "
            @@@@@@
            @@@@@@
            @@..@@
            @@..@@
            @@@@@@
            @@@@@@
            ",
        );
        let framework = skeletonize(&bitmap, Connectivity::Four);
        assert!(ink(&framework) >= 8);
        assert_eq!(framework.get(2, 2), 0);
        assert_eq!(framework.get(3, 3), 0);
    }

    #[test]
    fn test_single_pixel_survives() {
        let bitmap = Bitmap::from_ascii("@");
        let framework = skeletonize(&bitmap, Connectivity::Four);
        assert_eq!(framework.get(0, 0), 1);
    }
}
