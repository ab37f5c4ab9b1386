//! Chaincode extraction regression test
//!
//! Extraction must be a lossless encoding of the skeleton: rendering the
//! graph reproduces the input framework exactly. The first test brute
//! forces every possible 3x4 bitmap; the second drives larger random
//! frameworks through the same round trip.

use glyphcode_core::{Bitmap, BorderedBitmap, Chaincode};
use glyphcode_test::RegParams;
use rand::{RngExt, SeedableRng, rngs::StdRng};

fn round_trips(bitmap: &Bitmap) -> bool {
    let framework = BorderedBitmap::from_bitmap(bitmap);
    let mut scratch = framework.clone();
    let cc = Chaincode::from_framework(&mut scratch);
    cc.validate().is_ok() && cc.render().map(|r| r == framework.interior()).unwrap_or(false)
}

#[test]
fn test_render_round_trip_exhaustive_3x4() {
    let mut rp = RegParams::new("chaincode_exhaustive");
    let (w, h) = (3usize, 4usize);

    let mut failures = 0i64;
    for mask in 0u32..(1 << (w * h)) {
        let mut bitmap = Bitmap::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                if mask & (1 << (y * w + x)) != 0 {
                    bitmap.set(x, y, 1);
                }
            }
        }
        if !round_trips(&bitmap) {
            failures += 1;
        }
    }
    rp.compare_ints(0, failures);
    assert!(rp.cleanup(), "chaincode exhaustive round trip failed");
}

#[test]
fn test_render_round_trip_random() {
    let mut rp = RegParams::new("chaincode_random");
    let mut rng = StdRng::seed_from_u64(0x9e3779b9);

    for trial in 0..200 {
        let w = rng.random_range(1..=24);
        let h = rng.random_range(1..=24);
        let density = rng.random_range(0.05..0.7);
        let mut bitmap = Bitmap::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                if rng.random_bool(density) {
                    bitmap.set(x, y, 1);
                }
            }
        }
        rp.check(&format!("trial {trial}"), round_trips(&bitmap));
    }
    assert!(rp.cleanup(), "chaincode random round trip failed");
}

#[test]
fn test_handshake_invariant() {
    let mut rp = RegParams::new("chaincode_handshake");
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let mut bitmap = Bitmap::new(16, 16).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                if rng.random_bool(0.35) {
                    bitmap.set(x, y, 1);
                }
            }
        }
        let mut framework = BorderedBitmap::from_bitmap(&bitmap);
        let cc = Chaincode::from_framework(&mut framework);
        let degree_sum: usize = cc.nodes.iter().map(|n| n.degree).sum();
        rp.compare_ints(2 * cc.rope_count() as i64, degree_sum as i64);
    }
    assert!(rp.cleanup(), "handshake invariant failed");
}
