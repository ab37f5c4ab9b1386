//! Pattern matching regression test
//!
//! Self-match must always succeed with an identity-like mapping and verify
//! with a non-positive penalty for every rope - driven over a set of
//! realistic glyph shapes.

use glyphcode_core::Bitmap;
use glyphcode_match::{Pattern, compare_patterns, match_patterns};
use glyphcode_test::RegParams;

const GLYPHS: &[(&str, &str)] = &[
    (
        "T",
        "
        @@@@@@@
        ...@...
        ...@...
        ...@...
        ...@...
        ",
    ),
    (
        "L",
        "
        @....
        @....
        @....
        @....
        @@@@@
        ",
    ),
    (
        "o",
        "
        .@@@.
        @...@
        @...@
        @...@
        .@@@.
        ",
    ),
    (
        "x",
        "
        @...@
        .@.@.
        ..@..
        .@.@.
        @...@
        ",
    ),
    (
        "i",
        "
        @
        .
        @
        @
        @
        ",
    ),
];

#[test]
fn test_self_match_over_glyph_set() {
    let mut rp = RegParams::new("match_self");

    for (name, art) in GLYPHS {
        let mut p = Pattern::new(&Bitmap::from_ascii(art));
        p.promote();

        let m = match (match_patterns(&p, &p), p.node_count()) {
            (Some(m), _) => m,
            (None, 0) => continue,
            (None, _) => {
                rp.check(&format!("glyph '{name}' self-matches"), false);
                continue;
            }
        };
        rp.check(&format!("glyph '{name}' no swap"), !m.swap);
        rp.check(
            &format!("glyph '{name}' identity nodes"),
            m.node_mapping.iter().enumerate().all(|(i, &j)| i == j),
        );

        let c = compare_patterns(50, &m, &p, &p);
        match c {
            Some(c) => {
                rp.check(&format!("glyph '{name}' verified"), c.verified);
                rp.check(&format!("glyph '{name}' penalty <= 0"), c.penalty <= 0);
            }
            None => {
                rp.check(&format!("glyph '{name}' comparable"), false);
            }
        }
    }
    assert!(rp.cleanup(), "self match regression failed");
}

#[test]
fn test_distinct_topologies_do_not_match() {
    let mut rp = RegParams::new("match_distinct");

    let mut patterns: Vec<(&str, Pattern)> = GLYPHS
        .iter()
        .map(|(name, art)| (*name, Pattern::new(&Bitmap::from_ascii(art))))
        .collect();
    for (_, p) in patterns.iter_mut() {
        p.promote();
    }

    // glyphs with different node/rope counts must be rejected outright
    for i in 0..patterns.len() {
        for j in 0..patterns.len() {
            if i == j {
                continue;
            }
            let (name_i, pi) = &patterns[i];
            let (name_j, pj) = &patterns[j];
            if pi.node_count() != pj.node_count() || pi.rope_count() != pj.rope_count() {
                rp.check(
                    &format!("'{name_i}' vs '{name_j}' rejected"),
                    match_patterns(pi, pj).is_none(),
                );
            }
        }
    }
    assert!(rp.cleanup(), "distinct topology regression failed");
}
