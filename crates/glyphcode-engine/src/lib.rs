//! glyphcode-engine - Confidence-classified glyph recognition
//!
//! Combines the structural matcher, the comparator and the fingerprint
//! classifier over one or more pattern libraries, and distills their
//! evidence into a color-coded answer:
//!
//! | color   | meaning                                              |
//! |---------|------------------------------------------------------|
//! | GREEN   | verified consensus                                   |
//! | BLUE    | conflicting verified matches                         |
//! | YELLOW  | best unverified guess                                |
//! | MAGENTA | unverified guess corroborated by the fingerprint     |
//! | RED     | nothing                                              |
//! | BLACK   | structural consensus in the no-verification variant  |
//!
//! The engine owns its libraries and an optional "orange" side library
//! that accumulates low-confidence queries for later human labeling.

mod classifier;
mod color;
mod engine;

pub use classifier::fingerprint_recognize;
pub use color::{ColorCode, RecognizedGlyph, classify, classify_structural};
pub use engine::{EngineOptions, RecognitionEngine};
