//! Pattern persistence
//!
//! Serialized layout, all integers big-endian (see [`crate::rw`]):
//!
//! ```text
//! u32 width, u32 height                      chaincode grid size
//! u32 node_count
//!   per node: f32 x, f32 y, u32 degree
//! u32 rope_count
//!   per rope: u32 start, u32 end, u32 length, `length` step bytes
//! rope_count x f32                           median x array
//! rope_count x f32                           median y array
//! 31 bytes                                   fingerprint
//! ```
//!
//! Node incident-rope lists are not stored; they are rebuilt from the rope
//! endpoints in rope order, which reproduces the extraction order exactly.
//! Coordinates are `f32` on disk; older integer-coordinate layouts are a
//! different format version and are not read here.

use std::io::{Read, Write};

use glyphcode_core::{Chaincode, Node, Rope};
use glyphcode_match::{FINGERPRINT_SIZE, Fingerprint, Pattern};

use crate::error::{LibraryError, LibraryResult};
use crate::rw::{read_f32, read_u32, write_f32, write_u32};

/// Upper bound on node/rope counts and rope lengths accepted by the
/// deserializer, against corrupt frames.
const MAX_ELEMENTS: u32 = 1 << 20;

fn checked_count(value: u32, what: &str, context: &str) -> LibraryResult<usize> {
    if value > MAX_ELEMENTS {
        return Err(LibraryError::Corrupted(format!(
            "implausible {what} count {value} in {context}"
        )));
    }
    Ok(value as usize)
}

fn write_chaincode(w: &mut impl Write, cc: &Chaincode) -> LibraryResult<()> {
    write_u32(w, cc.width as u32)?;
    write_u32(w, cc.height as u32)?;

    write_u32(w, cc.node_count() as u32)?;
    for node in &cc.nodes {
        write_f32(w, node.x as f32)?;
        write_f32(w, node.y as f32)?;
        write_u32(w, node.degree as u32)?;
    }

    write_u32(w, cc.rope_count() as u32)?;
    for rope in &cc.ropes {
        write_u32(w, rope.start as u32)?;
        write_u32(w, rope.end as u32)?;
        write_u32(w, rope.steps.len() as u32)?;
        w.write_all(&rope.steps)?;
    }
    Ok(())
}

fn read_chaincode(r: &mut impl Read, context: &str) -> LibraryResult<Chaincode> {
    let width = read_u32(r)? as usize;
    let height = read_u32(r)? as usize;

    let node_count = checked_count(read_u32(r)?, "node", context)?;
    let mut nodes = Vec::with_capacity(node_count);
    for _ in 0..node_count {
        let x = read_f32(r)?;
        let y = read_f32(r)?;
        let degree = checked_count(read_u32(r)?, "degree", context)?;
        nodes.push(Node {
            x: x as i32,
            y: y as i32,
            degree,
            rope_indices: Vec::with_capacity(degree),
        });
    }

    let rope_count = checked_count(read_u32(r)?, "rope", context)?;
    let mut ropes = Vec::with_capacity(rope_count);
    for i in 0..rope_count {
        let start = checked_count(read_u32(r)?, "rope start", context)?;
        let end = checked_count(read_u32(r)?, "rope end", context)?;
        let length = checked_count(read_u32(r)?, "rope length", context)?;
        let mut steps = vec![0u8; length];
        r.read_exact(&mut steps)?;
        if start >= node_count || end >= node_count {
            return Err(LibraryError::Corrupted(format!(
                "rope {i} endpoints {start} -> {end} out of range in {context}"
            )));
        }
        nodes[start].rope_indices.push(i);
        nodes[end].rope_indices.push(i);
        ropes.push(Rope { start, end, steps });
    }

    let cc = Chaincode {
        nodes,
        ropes,
        width,
        height,
    };
    cc.validate().map_err(|source| LibraryError::InvalidChaincode {
        context: context.to_string(),
        source,
    })?;
    Ok(cc)
}

/// Serialize a pattern.
pub fn write_pattern(w: &mut impl Write, pattern: &Pattern) -> LibraryResult<()> {
    write_chaincode(w, pattern.chaincode())?;
    let (mx, my) = pattern.median_coords();
    for &v in mx {
        write_f32(w, v)?;
    }
    for &v in my {
        write_f32(w, v)?;
    }
    w.write_all(&pattern.fingerprint().0)?;
    Ok(())
}

/// Deserialize a pattern. `context` names the surrounding shelf/record for
/// error reporting.
pub fn read_pattern(r: &mut impl Read, context: &str) -> LibraryResult<Pattern> {
    let cc = read_chaincode(r, context)?;
    let rope_count = cc.rope_count();

    let mut medians_x = Vec::with_capacity(rope_count);
    for _ in 0..rope_count {
        medians_x.push(read_f32(r)?);
    }
    let mut medians_y = Vec::with_capacity(rope_count);
    for _ in 0..rope_count {
        medians_y.push(read_f32(r)?);
    }

    let mut fingerprint = [0u8; FINGERPRINT_SIZE];
    r.read_exact(&mut fingerprint)?;

    Ok(Pattern::from_parts(
        cc,
        medians_x,
        medians_y,
        Fingerprint(fingerprint),
    ))
}
