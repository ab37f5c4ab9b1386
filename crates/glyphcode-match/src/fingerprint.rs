//! Shift-and-cut fingerprints
//!
//! A fingerprint is a coarse shape descriptor independent of the glyph's
//! topology. The bitmap is cut horizontally so that the ink mass above and
//! below the cut is as equal as possible; each half is then cut vertically
//! in the same fashion, then horizontally again, and so on until 31 cuts
//! have been made. Each cut's position, normalized into 0..=255, lands in
//! the fingerprint array at a binary-heap-style index determined by its
//! place in the recursion (the root cut at slot 0, its two children at 1
//! and 2, ...), which makes fingerprints of equal length directly
//! comparable component by component.
//!
//! Mass is the count of black pixels for bilevel input, or summed darkness
//! (`255 - value`) for grayscale input.

/// Number of cut positions stored per fingerprint.
pub const FINGERPRINT_SIZE: usize = 31;

/// A fixed-size array of mass-bisection cut positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(pub [u8; FINGERPRINT_SIZE]);

use glyphcode_core::Bitmap;

/// How pixel values convert to ink mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mass {
    /// nonzero pixel = 1 unit
    BlackWhite,
    /// darkness = 255 - value
    Grayscale,
}

fn row_mass(bitmap: &Bitmap, mass: Mass, y: usize, x1: usize, x2: usize) -> i64 {
    let row = &bitmap.row(y)[x1..=x2];
    match mass {
        Mass::BlackWhite => row.iter().filter(|&&p| p != 0).count() as i64,
        Mass::Grayscale => row.iter().map(|&p| 255 - p as i64).sum(),
    }
}

fn column_mass(bitmap: &Bitmap, mass: Mass, x: usize, y1: usize, y2: usize) -> i64 {
    match mass {
        Mass::BlackWhite => (y1..=y2).filter(|&y| bitmap.get(x, y) != 0).count() as i64,
        Mass::Grayscale => (y1..=y2).map(|y| 255 - bitmap.get(x, y) as i64).sum(),
    }
}

/// Horizontal cut of the `w × h` region at `(left, top)` holding mass `a`,
/// storing into heap slot `k` (1-based), then recursing vertically into
/// both halves.
#[allow(clippy::too_many_arguments)]
fn make_hcut(
    bitmap: &Bitmap,
    mass: Mass,
    a: i64,
    left: usize,
    top: usize,
    w: usize,
    h: usize,
    f: &mut [u8; FINGERPRINT_SIZE],
    k: usize,
) {
    if k > FINGERPRINT_SIZE {
        return;
    }

    // how many rows end up in the top part
    let mut cut = 0;
    let mut up_weight: i64 = 0;

    if a != 0 {
        debug_assert!(w > 0 && h > 0);
        let mut last_row_weight: i64 = 0;

        while up_weight * 2 < a {
            last_row_weight = row_mass(bitmap, mass, top + cut, left, left + w - 1);
            up_weight += last_row_weight;
            cut += 1;
        }
        cut -= 1;
        up_weight -= last_row_weight;
        let (wi, hi) = (w as i64, h as i64);
        f[k - 1] =
            ((256 * (cut as i64 * wi + wi * ((a >> 1) - up_weight) / last_row_weight)) / (wi * hi))
                as u8;
        if a - up_weight * 2 > last_row_weight {
            cut += 1;
            up_weight += last_row_weight;
        }
    } else {
        cut = h / 2;
        f[k - 1] = 128;
    }

    make_vcut(bitmap, mass, up_weight, left, top, w, cut, f, k << 1);
    make_vcut(
        bitmap,
        mass,
        a - up_weight,
        left,
        top + cut,
        w,
        h - cut,
        f,
        (k << 1) | 1,
    );
}

/// Vertical counterpart of [`make_hcut`].
#[allow(clippy::too_many_arguments)]
fn make_vcut(
    bitmap: &Bitmap,
    mass: Mass,
    a: i64,
    left: usize,
    top: usize,
    w: usize,
    h: usize,
    f: &mut [u8; FINGERPRINT_SIZE],
    k: usize,
) {
    if k > FINGERPRINT_SIZE {
        return;
    }

    // how many columns end up in the left part
    let mut cut = 0;
    let mut left_weight: i64 = 0;

    if a != 0 {
        debug_assert!(w > 0 && h > 0);
        let mut last_col_weight: i64 = 0;

        while left_weight * 2 < a {
            last_col_weight = column_mass(bitmap, mass, left + cut, top, top + h - 1);
            left_weight += last_col_weight;
            cut += 1;
        }
        cut -= 1;
        left_weight -= last_col_weight;
        let (wi, hi) = (w as i64, h as i64);
        f[k - 1] = ((256 * (cut as i64 * hi + hi * ((a >> 1) - left_weight) / last_col_weight))
            / (wi * hi)) as u8;
        if a - left_weight * 2 > last_col_weight {
            cut += 1;
            left_weight += last_col_weight;
        }
    } else {
        cut = w / 2;
        f[k - 1] = 128;
    }

    make_hcut(bitmap, mass, left_weight, left, top, cut, h, f, k << 1);
    make_hcut(
        bitmap,
        mass,
        a - left_weight,
        left + cut,
        top,
        w - cut,
        h,
        f,
        (k << 1) | 1,
    );
}

fn compute(bitmap: &Bitmap, mass: Mass) -> Fingerprint {
    let mut area = 0;
    for y in 0..bitmap.height() {
        area += row_mass(bitmap, mass, y, 0, bitmap.width() - 1);
    }
    debug_assert!(area >= 0);

    let mut f = [0u8; FINGERPRINT_SIZE];
    make_hcut(
        bitmap,
        mass,
        area,
        0,
        0,
        bitmap.width(),
        bitmap.height(),
        &mut f,
        1,
    );
    Fingerprint(f)
}

impl Fingerprint {
    /// Fingerprint of a bilevel bitmap (nonzero = one unit of ink).
    pub fn of_bitmap(bitmap: &Bitmap) -> Fingerprint {
        compute(bitmap, Mass::BlackWhite)
    }

    /// Fingerprint of a grayscale bitmap (0 = black, 255 = white; mass is
    /// summed darkness).
    pub fn of_grayscale(bitmap: &Bitmap) -> Fingerprint {
        compute(bitmap, Mass::Grayscale)
    }

    /// Squared Euclidean distance between two fingerprints.
    pub fn distance_squared(&self, other: &Fingerprint) -> i64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| {
                let d = a as i64 - b as i64;
                d * d
            })
            .sum()
    }
}
