//! Library persistence
//!
//! A library file is a sequence of shelves, each framed so that readers
//! can skip what they do not need:
//!
//! ```text
//! u32 proto_size                 bytes in the prototype section
//! u32 records_size               bytes in the records section
//! [prototype section]            RLE bitmap, then one bounding box
//!                                (4 x i32) per record
//! [records section]              u32 record count, then per record:
//!                                pattern, i32 radius, NUL-terminated text
//! ```
//!
//! Appending shelves to an existing file yields a valid library, which is
//! how incremental training runs accumulate. The
//! discard-prototypes loading mode uses `proto_size` to hop over the
//! bitmap data when only the patterns matter (batch recognition);
//! records loaded that way carry no bounding boxes.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

use glyphcode_core::GlyphBox;
use log::debug;

use crate::error::{LibraryError, LibraryResult};
use crate::library::{Library, LibraryRecord, Shelf};
use crate::pattern_io::{read_pattern, write_pattern};
use crate::rle::{rle_decode, rle_encode};
use crate::rw::{read_i32, read_text, read_u32, read_u32_or_eof, write_i32, write_text, write_u32};

/// Largest section frame the reader will buffer.
const MAX_SECTION: u32 = 1 << 28;

fn write_record(w: &mut impl Write, record: &LibraryRecord) -> LibraryResult<()> {
    write_pattern(w, &record.pattern)?;
    write_i32(w, record.radius)?;
    write_text(w, &record.text)
}

fn read_record(r: &mut impl Read, context: &str) -> LibraryResult<LibraryRecord> {
    let mut pattern = read_pattern(r, context)?;
    // records are comparison targets; build the reversed-rope cache now
    pattern.promote();
    let radius = read_i32(r)?;
    let text = read_text(r)?;
    Ok(LibraryRecord {
        pattern,
        text,
        radius,
        bbox: None,
        disabled: false,
    })
}

fn write_shelf(w: &mut impl Write, shelf: &Shelf, shelf_index: usize) -> LibraryResult<()> {
    let prototype = shelf
        .prototype
        .as_ref()
        .ok_or(LibraryError::MissingPrototype(shelf_index))?;

    let mut proto_section = Vec::new();
    rle_encode(&mut proto_section, prototype)?;
    for record in &shelf.records {
        let b = record.bbox.unwrap_or(GlyphBox::new(0, 0, 0, 0));
        write_i32(&mut proto_section, b.left as i32)?;
        write_i32(&mut proto_section, b.top as i32)?;
        write_i32(&mut proto_section, b.width as i32)?;
        write_i32(&mut proto_section, b.height as i32)?;
    }

    let mut records_section = Vec::new();
    write_u32(&mut records_section, shelf.records.len() as u32)?;
    for record in &shelf.records {
        write_record(&mut records_section, record)?;
    }

    write_u32(w, proto_section.len() as u32)?;
    write_u32(w, records_section.len() as u32)?;
    w.write_all(&proto_section)?;
    w.write_all(&records_section)?;
    Ok(())
}

/// Parse the prototype section: the RLE bitmap plus one bounding box per
/// record. A zero-sized box means the record had none.
fn parse_prototype_section(
    bytes: &[u8],
    records: &mut [LibraryRecord],
    context: &str,
) -> LibraryResult<glyphcode_core::Bitmap> {
    let mut r = Cursor::new(bytes);
    let prototype = rle_decode(&mut r)?;
    for record in records.iter_mut() {
        let left = read_i32(&mut r)?;
        let top = read_i32(&mut r)?;
        let width = read_i32(&mut r)?;
        let height = read_i32(&mut r)?;
        if left < 0 || top < 0 || width < 0 || height < 0 {
            return Err(LibraryError::Corrupted(format!(
                "negative bounding box in {context}"
            )));
        }
        record.bbox = if width == 0 || height == 0 {
            None
        } else {
            Some(GlyphBox::new(
                left as usize,
                top as usize,
                width as usize,
                height as usize,
            ))
        };
    }
    Ok(prototype)
}

fn read_section(r: &mut impl Read, size: u32, what: &str, context: &str) -> LibraryResult<Vec<u8>> {
    if size > MAX_SECTION {
        return Err(LibraryError::Corrupted(format!(
            "implausible {what} section of {size} bytes in {context}"
        )));
    }
    let mut bytes = vec![0u8; size as usize];
    r.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Read one shelf, or `None` at a clean end of stream.
fn read_shelf(
    r: &mut impl Read,
    shelf_index: usize,
    keep_prototypes: bool,
) -> LibraryResult<Option<Shelf>> {
    let Some(proto_size) = read_u32_or_eof(r)? else {
        return Ok(None);
    };
    let context = format!("shelf {shelf_index}");
    let records_size = read_u32(r)?;
    if proto_size == 0 {
        return Err(LibraryError::Corrupted(format!(
            "{context} has an empty prototype section; the library is \
             corrupted or was saved without original images"
        )));
    }

    let proto_section = read_section(r, proto_size, "prototype", &context)?;
    let records_section = read_section(r, records_size, "records", &context)?;

    let mut records_reader = Cursor::new(&records_section);
    let count = read_u32(&mut records_reader)?;
    if count > MAX_SECTION {
        return Err(LibraryError::Corrupted(format!(
            "implausible record count {count} in {context}"
        )));
    }
    let mut records = Vec::with_capacity(count as usize);
    for i in 0..count {
        records.push(read_record(
            &mut records_reader,
            &format!("{context}, record {i}"),
        )?);
    }
    if records_reader.position() != records_section.len() as u64 {
        return Err(LibraryError::Corrupted(format!(
            "{context} records section has {} trailing bytes",
            records_section.len() as u64 - records_reader.position()
        )));
    }

    let prototype = if keep_prototypes {
        Some(parse_prototype_section(&proto_section, &mut records, &context)?)
    } else {
        None
    };

    Ok(Some(Shelf { prototype, records }))
}

/// Serialize a library: its shelves back to back.
pub fn write_library(w: &mut impl Write, library: &Library) -> LibraryResult<()> {
    for (i, shelf) in library.shelves().iter().enumerate() {
        write_shelf(w, shelf, i)?;
    }
    Ok(())
}

/// Read a library including prototype bitmaps and bounding boxes.
pub fn read_library(r: &mut impl Read) -> LibraryResult<Library> {
    read_shelves(r, true)
}

/// Read a library, skipping prototype bitmaps (records carry patterns but
/// no bounding boxes). The mode of choice for batch recognition.
pub fn read_library_discarding_prototypes(r: &mut impl Read) -> LibraryResult<Library> {
    read_shelves(r, false)
}

fn read_shelves(r: &mut impl Read, keep_prototypes: bool) -> LibraryResult<Library> {
    let mut library = Library::new();
    let mut index = 0;
    while let Some(shelf) = read_shelf(r, index, keep_prototypes)? {
        library.add_shelf(shelf);
        index += 1;
    }
    debug!(
        "loaded library: {} shelves, {} records",
        library.shelf_count(),
        library.record_count()
    );
    Ok(library)
}

/// Write a library to a file. With `append`, shelves are added after any
/// existing content, which produces a valid concatenated library.
pub fn save_library_to_file(
    library: &Library,
    path: impl AsRef<Path>,
    append: bool,
) -> LibraryResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    let mut w = BufWriter::new(file);
    write_library(&mut w, library)?;
    w.flush()?;
    Ok(())
}

/// Load a library from a file, prototypes included.
pub fn load_library_from_file(path: impl AsRef<Path>) -> LibraryResult<Library> {
    read_library(&mut BufReader::new(File::open(path)?))
}
