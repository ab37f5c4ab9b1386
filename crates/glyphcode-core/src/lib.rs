//! glyphcode-core - Bitmaps, thinning and chaincode graphs
//!
//! This crate holds the raster-facing half of the glyphcode recognition
//! engine:
//!
//! - Byte-grid bitmap containers, including the bordered variant with an
//!   explicit one-pixel white margin
//! - Skeletonization (connectivity-preserving iterative peeling)
//! - Chaincode extraction: turning a 1-pixel-wide skeleton into a graph of
//!   nodes and direction-coded ropes, plus rescaling and rendering
//!
//! Everything here is deterministic and CPU-bound; there is no I/O.

pub mod bitmap;
pub mod chaincode;
mod error;
pub mod steps;
pub mod thin;

pub use bitmap::{Bitmap, BorderedBitmap, GlyphBox};
pub use chaincode::{Chaincode, Node, Rope};
pub use error::{CoreError, CoreResult};
pub use steps::{reverse_step, step_char, step_dx, step_dy};
pub use thin::{Connectivity, peel, skeletonize};
