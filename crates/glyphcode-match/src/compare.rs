//! Correspondence verification by rope-path comparison
//!
//! A [`Match`](crate::Match) only says which node goes where; comparison
//! checks that the rope paths actually agree. Every rope of the promoted
//! side is aligned against its mapped counterpart with the weighted edit
//! distance, oriented by where the node mapping sends its endpoints: same
//! orientation uses the forward steps, opposite orientation uses the
//! promoted side's reversed-rope cache. A rope whose mapped endpoints
//! match in neither orientation is a topology mismatch and disqualifies
//! the correspondence outright.
//!
//! Edit distances are accumulated across all ropes even after one of them
//! fails verification - the total is the best-effort penalty the engine
//! uses to rank unverified candidates.

use log::trace;

use crate::editdist::edit_distance;
use crate::matcher::Match;
use crate::pattern::Pattern;

/// Outcome of verifying one correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// Every rope's edit distance stayed within tolerance (<= 0).
    pub verified: bool,
    /// Sum of all rope edit distances.
    pub penalty: i32,
}

/// Verify a correspondence rope by rope.
///
/// `radius` is the per-symbol match reward passed through to
/// [`edit_distance`]. Returns `None` on a topology mismatch (some rope's
/// mapped endpoints agree with neither orientation of its counterpart);
/// such a candidate is unusable even for best-effort ranking.
pub fn compare_patterns(radius: i32, m: &Match, p1: &Pattern, p2: &Pattern) -> Option<Comparison> {
    // mappings run from the promoted side; restore that orientation
    let (p1, p2) = if m.swap { (p2, p1) } else { (p1, p2) };
    debug_assert_eq!(p1.rope_count(), p2.rope_count());
    let back = p1
        .backwards()
        .expect("compare_patterns requires the promoted side of the match");

    let mut verified = true;
    let mut penalty = 0;

    for (i, r1) in p1.chaincode().ropes.iter().enumerate() {
        let r2 = &p2.chaincode().ropes[m.rope_mapping[i]];
        let s1 = m.node_mapping[r1.start];
        let e1 = m.node_mapping[r1.end];
        let (s2, e2) = (r2.start, r2.end);

        let ed = if s1 == s2 && e1 == e2 {
            edit_distance(radius, &r1.steps, &r2.steps)
        } else if s1 == e2 && e1 == s2 {
            edit_distance(radius, &back[i], &r2.steps)
        } else {
            trace!("rope {i}: endpoints ({s1},{e1}) match neither orientation of ({s2},{e2})");
            return None;
        };

        if ed > 0 {
            verified = false;
        }
        penalty += ed;
    }

    Some(Comparison { verified, penalty })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_patterns;
    use glyphcode_core::Bitmap;

    fn pattern(art: &str) -> Pattern {
        Pattern::new(&Bitmap::from_ascii(art))
    }

    const RADIUS: i32 = 50;

    #[test]
    fn test_self_comparison_verifies_with_negative_penalty() {
        let mut p = pattern(
            "
            .@...@
            .@..@.
            .@@@@.
            ...@..
            ",
        );
        p.promote();
        let m = match_patterns(&p, &p).expect("self match");
        let c = compare_patterns(RADIUS, &m, &p, &p).expect("no topology mismatch");
        assert!(c.verified);
        assert!(c.penalty <= 0);
    }

    #[test]
    fn test_penalty_is_radius_scaled_on_self() {
        let mut p = pattern("@@@@@@@");
        p.promote();
        let m = match_patterns(&p, &p).unwrap();
        let total_steps: usize = p.chaincode().ropes.iter().map(|r| r.len()).sum();
        let c = compare_patterns(RADIUS, &m, &p, &p).unwrap();
        assert_eq!(c.penalty, -(RADIUS * total_steps as i32));
    }

    #[test]
    fn test_swapped_match_compares_the_same() {
        let mut lib = pattern(
            "
            @@@@
            ...@
            ...@
            ",
        );
        lib.promote();
        let query = pattern(
            "
            @@@@
            ...@
            ...@
            ",
        );
        // query side unpromoted: match records swap
        let m = match_patterns(&query, &lib).expect("match");
        assert!(m.swap);
        let c = compare_patterns(RADIUS, &m, &query, &lib).expect("comparison");
        assert!(c.verified);
        assert!(c.penalty <= 0);
    }

    #[test]
    fn test_dissimilar_ropes_fail_verification() {
        // same endpoints, same topology, different path: an elbow versus a
        // staircase
        let mut elbow = pattern(
            "
            @....
            @....
            @....
            @....
            @@@@@
            ",
        );
        elbow.promote();
        let staircase = pattern(
            "
            @....
            @@...
            .@@..
            ..@@.
            ...@@
            ",
        );
        let m = match_patterns(&elbow, &staircase).expect("same topology");
        // with no match reward, disagreement must show up as a positive
        // penalty
        let c = compare_patterns(0, &m, &elbow, &staircase).expect("no topology mismatch");
        assert!(!c.verified);
        assert!(c.penalty > 0);
    }

    #[test]
    fn test_reversed_orientation_uses_backward_cache() {
        // force an endpoint-swapping correspondence on a straight stroke:
        // the comparator must reach for the reversed cache, and a straight
        // rope read backwards disagrees with itself symbol for symbol
        let mut p = pattern("@@@@@");
        p.promote();
        let steps = p.chaincode().ropes[0].len() as i32;
        let m = Match {
            node_mapping: vec![1, 0],
            rope_mapping: vec![0],
            swap: false,
        };
        let c = compare_patterns(RADIUS, &m, &p, &p).expect("orientation resolvable");
        assert!(!c.verified);
        assert_eq!(c.penalty, steps * 100);
    }

    #[test]
    fn test_topology_mismatch_is_unusable() {
        // a cross has four endpoint nodes around a junction; a mapping
        // that shuffles two endpoints breaks every rope through them
        let mut p = pattern(
            "
            .@.
            @@@
            .@.
            ",
        );
        p.promote();
        let identity = match_patterns(&p, &p).unwrap();
        let mut m = identity.clone();
        // swap the first two endpoint nodes in the mapping
        let endpoints: Vec<usize> = p
            .chaincode()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.degree == 1)
            .map(|(i, _)| i)
            .collect();
        m.node_mapping.swap(endpoints[0], endpoints[1]);
        assert!(compare_patterns(RADIUS, &m, &p, &p).is_none());
    }
}
