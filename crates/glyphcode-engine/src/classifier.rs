//! Fingerprint fallback classifier
//!
//! Nearest-neighbor over the shift-and-cut fingerprints: a linear scan of
//! the library, gated by the aspect-ratio compatibility test (applied both
//! ways inside [`Pattern::fingerprint_distance`]), minimizing squared
//! distance. Ties keep the earliest-scanned record. This is the coarse,
//! topology-free measure recognition falls back on when structural
//! matching produced nothing trustworthy.

use glyphcode_library::LibraryRecord;
use glyphcode_match::Pattern;
use log::debug;

/// Nearest labeled record by fingerprint distance, or `None` when no
/// enabled, labeled, aspect-compatible record exists.
pub fn fingerprint_recognize<'a, I>(records: I, query: &Pattern) -> Option<&'a LibraryRecord>
where
    I: IntoIterator<Item = &'a LibraryRecord>,
{
    let mut best: Option<(&LibraryRecord, i64)> = None;
    for record in records {
        if record.disabled || !record.is_labeled() {
            continue;
        }
        let distance = record.pattern.fingerprint_distance(query);
        if distance == i64::MAX {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((record, distance));
        }
    }
    if let Some((record, distance)) = best {
        debug!("fingerprint fallback: '{}' at {distance}", record.text);
    }
    best.map(|(record, _)| record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcode_core::Bitmap;

    fn record(art: &str, label: &str) -> LibraryRecord {
        LibraryRecord::new(Pattern::new(&Bitmap::from_ascii(art)), label, None)
    }

    const DISC: &str = "
        .@@.
        @@@@
        @@@@
        .@@.
    ";

    const CORNER: &str = "
        @@@@
        @@..
        @...
        @...
    ";

    #[test]
    fn test_picks_nearest_shape() {
        let records = vec![record(CORNER, "L"), record(DISC, "o")];
        let query = Pattern::new(&Bitmap::from_ascii(DISC));
        let found = fingerprint_recognize(&records, &query).expect("match");
        assert_eq!(found.text, "o");
    }

    #[test]
    fn test_skips_unlabeled_and_disabled() {
        let mut disabled = record(DISC, "o");
        disabled.disabled = true;
        let records = vec![record(DISC, ""), disabled];
        let query = Pattern::new(&Bitmap::from_ascii(DISC));
        assert!(fingerprint_recognize(&records, &query).is_none());
    }

    #[test]
    fn test_aspect_gate_excludes_everything() {
        let tall = "
            @@
            @@
            @@
            @@
            @@
            @@
            @@
            @@
        ";
        let records = vec![record(tall, "|")];
        let query = Pattern::new(&Bitmap::from_ascii(DISC));
        assert!(fingerprint_recognize(&records, &query).is_none());
    }

    #[test]
    fn test_tie_prefers_earliest() {
        let records = vec![record(DISC, "first"), record(DISC, "second")];
        let query = Pattern::new(&Bitmap::from_ascii(DISC));
        let found = fingerprint_recognize(&records, &query).expect("match");
        assert_eq!(found.text, "first");
    }
}
