//! Libraries, shelves and records
//!
//! A [`LibraryRecord`] is one labeled glyph: its pattern, its text (empty
//! means "not yet labeled"), the edit-distance tolerance to apply when
//! matching against it, and where it sits in the prototype image it was
//! cut from. A [`Shelf`] groups the records extracted from one prototype
//! bitmap; a [`Library`] is an ordered collection of shelves. Libraries
//! are loaded and freed as a unit and shared read-only by recognition.

use glyphcode_core::{Bitmap, GlyphBox};
use glyphcode_match::Pattern;

/// Default edit-distance tolerance for new records.
pub const DEFAULT_RADIUS: i32 = 50;

/// One labeled glyph.
#[derive(Debug, Clone)]
pub struct LibraryRecord {
    pub pattern: Pattern,
    /// Label text; empty = unknown.
    pub text: String,
    /// Edit-distance tolerance when this record is the library side of a
    /// comparison.
    pub radius: i32,
    /// Where the glyph sits in the shelf's prototype bitmap. `None` when
    /// the library was loaded without prototypes.
    pub bbox: Option<GlyphBox>,
    /// Disabled records are kept on the shelf but skipped by recognition.
    pub disabled: bool,
}

impl LibraryRecord {
    /// Build a record from a pattern and label, with the default radius.
    /// The pattern is promoted so the record is immediately usable as a
    /// comparison target.
    pub fn new(mut pattern: Pattern, text: impl Into<String>, bbox: Option<GlyphBox>) -> Self {
        pattern.promote();
        LibraryRecord {
            pattern,
            text: text.into(),
            radius: DEFAULT_RADIUS,
            bbox,
            disabled: false,
        }
    }

    /// Whether the record carries a label.
    #[inline]
    pub fn is_labeled(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Records sharing one source prototype bitmap.
#[derive(Debug, Clone, Default)]
pub struct Shelf {
    /// The prototype image the records were cut from; absent when the
    /// library was loaded in discard-prototypes mode.
    pub prototype: Option<Bitmap>,
    pub records: Vec<LibraryRecord>,
}

impl Shelf {
    pub fn new(prototype: Option<Bitmap>) -> Self {
        Shelf {
            prototype,
            records: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// An ordered collection of shelves.
#[derive(Debug, Clone, Default)]
pub struct Library {
    shelves: Vec<Shelf>,
}

impl Library {
    pub fn new() -> Self {
        Library::default()
    }

    #[inline]
    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    #[inline]
    pub fn shelf_count(&self) -> usize {
        self.shelves.len()
    }

    /// Total record count across all shelves.
    pub fn record_count(&self) -> usize {
        self.shelves.iter().map(Shelf::len).sum()
    }

    /// Append a shelf and return a mutable reference to it.
    pub fn add_shelf(&mut self, shelf: Shelf) -> &mut Shelf {
        self.shelves.push(shelf);
        // just pushed
        self.shelves.last_mut().unwrap()
    }

    /// Iterate this library's records in shelf order.
    pub fn records(&self) -> impl Iterator<Item = &LibraryRecord> {
        self.shelves.iter().flat_map(|s| s.records.iter())
    }
}

/// Forward-only cursor flattening `(library, shelf, record)` across a
/// slice of libraries into a single record sequence.
pub struct LibraryCursor<'a> {
    libraries: &'a [Library],
    library: usize,
    shelf: usize,
    record: usize,
}

impl<'a> LibraryCursor<'a> {
    pub fn new(libraries: &'a [Library]) -> Self {
        LibraryCursor {
            libraries,
            library: 0,
            shelf: 0,
            record: 0,
        }
    }
}

impl<'a> Iterator for LibraryCursor<'a> {
    type Item = &'a LibraryRecord;

    fn next(&mut self) -> Option<&'a LibraryRecord> {
        while self.library < self.libraries.len() {
            let shelves = self.libraries[self.library].shelves();
            if self.shelf >= shelves.len() {
                self.library += 1;
                self.shelf = 0;
                self.record = 0;
                continue;
            }
            let records = &shelves[self.shelf].records;
            if self.record >= records.len() {
                self.shelf += 1;
                self.record = 0;
                continue;
            }
            let item = &records[self.record];
            self.record += 1;
            return Some(item);
        }
        None
    }
}
