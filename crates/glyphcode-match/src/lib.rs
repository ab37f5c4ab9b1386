//! glyphcode-match - Pattern derivation and structural matching
//!
//! This crate turns glyph bitmaps into matchable [`Pattern`]s and decides
//! how well two patterns agree:
//!
//! - [`Fingerprint`]: shift-and-cut mass-bisection descriptor, the
//!   topology-free fallback measure
//! - [`edit_distance`]: weighted Damerau-Levenshtein alignment of rope
//!   step strings
//! - [`match_patterns`]: greedy nearest-neighbor structural correspondence
//! - [`compare_patterns`]: edit-distance verification of a correspondence
//!
//! Matching failures are expected negative outcomes (`Option`), never
//! errors; the confidence policy built on top of them lives in
//! glyphcode-engine.

mod compare;
mod editdist;
mod fingerprint;
mod matcher;
mod pattern;

pub use compare::{Comparison, compare_patterns};
pub use editdist::edit_distance;
pub use fingerprint::{FINGERPRINT_SIZE, Fingerprint};
pub use matcher::{Match, match_patterns};
pub use pattern::{COMMON_HALF_PERIMETER, MAX_ASPECT_DIFF_COEF, Pattern};
