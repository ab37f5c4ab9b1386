//! glyphcode-library - Pattern libraries and their on-disk format
//!
//! A library is the engine's training data: shelves of labeled glyph
//! records, each shelf cut from one prototype bitmap. This crate owns the
//! in-memory model ([`Library`], [`Shelf`], [`LibraryRecord`], the
//! flattening [`LibraryCursor`]) and the binary persistence layer:
//! big-endian primitives, the `"rle1"` prototype codec, pattern
//! serialization, and shelf framing with skippable sections.
//!
//! All framing errors are recoverable [`LibraryError`] values carrying
//! the offending shelf/record context.

mod error;
mod library;
mod pattern_io;
mod rle;
mod rw;
mod serial;

pub use error::{LibraryError, LibraryResult};
pub use library::{DEFAULT_RADIUS, Library, LibraryCursor, LibraryRecord, Shelf};
pub use pattern_io::{read_pattern, write_pattern};
pub use rle::{rle_decode, rle_encode};
pub use rw::MAX_TEXT_LEN;
pub use serial::{
    load_library_from_file, read_library, read_library_discarding_prototypes,
    save_library_to_file, write_library,
};
