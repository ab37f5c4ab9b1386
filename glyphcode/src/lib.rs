//! Glyphcode - printed-glyph recognition by chaincode matching
//!
//! Glyphcode recognizes isolated printed glyphs by converting their thinned
//! skeletons into topological descriptions ("chaincodes"), matching those
//! descriptions against a library of labeled patterns, and producing a
//! confidence-tagged textual guess.
//!
//! # Overview
//!
//! The pipeline, bottom to top:
//!
//! - Skeletonize the glyph bitmap to a 1-pixel framework
//! - Extract the chaincode graph: nodes at endpoints/junctions, ropes as
//!   direction-coded paths between them
//! - Derive a scale-normalized [`Pattern`] plus a shift-and-cut
//!   fingerprint
//! - Register and verify patterns against a [`Library`] of labeled
//!   records
//! - Classify the evidence into a color-coded answer (GREEN through RED)
//!
//! # Example
//!
//! ```
//! use glyphcode::{Bitmap, ColorCode, EngineOptions, GlyphBox, Library,
//!                 LibraryRecord, Pattern, RecognitionEngine, Shelf};
//!
//! let tee = Bitmap::from_ascii(
//!     "
//!     @@@@@
//!     ..@..
//!     ..@..
//!     ",
//! );
//! let mut library = Library::new();
//! let shelf = library.add_shelf(Shelf::new(Some(tee.clone())));
//! let bbox = GlyphBox::new(0, 0, tee.width(), tee.height());
//! shelf
//!     .records
//!     .push(LibraryRecord::new(Pattern::new(&tee), "T", Some(bbox)));
//!
//! let mut engine = RecognitionEngine::new(EngineOptions::default());
//! engine.add_library(library);
//!
//! let answer = engine.recognize_glyph(&tee);
//! assert_eq!(answer.color, ColorCode::Green);
//! assert_eq!(answer.text.as_deref(), Some("T"));
//! ```

// Re-export core types (the data structures used everywhere)
pub use glyphcode_core::*;

// Re-export the matching and library layers wholesale; their names do not
// collide with the core
pub use glyphcode_engine::*;
pub use glyphcode_library::*;
pub use glyphcode_match::*;
