//! The recognition engine
//!
//! Orchestrates the full pipeline over one or more libraries: a
//! structural pass collects every record whose pattern registers against
//! the query, a verification pass runs the comparator over each candidate
//! while tracking the lowest-penalty one, and the fingerprint classifier
//! is consulted when nothing verified. The pure classification rules live
//! in [`crate::color`]; this module gathers their evidence.
//!
//! The optional "orange library" collects every query that ends up RED or
//! YELLOW - bitmap, pattern and box - so a human can label the hard cases
//! later and feed them back as training data. Collection never influences
//! the classification of the query that triggered it.

use glyphcode_core::{Bitmap, GlyphBox};
use glyphcode_library::{Library, LibraryCursor, LibraryRecord, Shelf};
use glyphcode_match::{Pattern, compare_patterns, match_patterns};
use log::debug;

use crate::classifier::fingerprint_recognize;
use crate::color::{ColorCode, RecognizedGlyph, classify, classify_structural};

/// Engine configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Run the comparator over structural candidates. When off, the
    /// engine is the simplified single-pass variant whose consensus
    /// answer is BLACK.
    pub verify: bool,
    /// Collect RED/YELLOW queries into the orange library.
    pub collect_uncertain: bool,
    /// Radius assigned to records appended to the orange library.
    pub default_radius: i32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            verify: true,
            collect_uncertain: false,
            default_radius: glyphcode_library::DEFAULT_RADIUS,
        }
    }
}

/// A recognition engine over an ordered set of libraries.
pub struct RecognitionEngine {
    libraries: Vec<Library>,
    options: EngineOptions,
    orange: Option<Library>,
}

impl RecognitionEngine {
    pub fn new(options: EngineOptions) -> Self {
        let orange = options.collect_uncertain.then(Library::new);
        RecognitionEngine {
            libraries: Vec::new(),
            options,
            orange,
        }
    }

    /// Add a library to the scan order.
    pub fn add_library(&mut self, library: Library) {
        self.libraries.push(library);
    }

    #[inline]
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// The collected low-confidence queries, when collection is enabled.
    #[inline]
    pub fn orange_library(&self) -> Option<&Library> {
        self.orange.as_ref()
    }

    /// Take the orange library out of the engine (e.g. to save it for
    /// labeling), leaving an empty one behind.
    pub fn take_orange_library(&mut self) -> Option<Library> {
        self.orange.as_mut().map(std::mem::take)
    }

    fn records(&self) -> impl Iterator<Item = &LibraryRecord> {
        LibraryCursor::new(&self.libraries).filter(|r| !r.disabled && r.is_labeled())
    }

    /// Recognize a prepared query pattern.
    pub fn recognize_pattern(&self, query: &Pattern) -> RecognizedGlyph {
        if !self.options.verify {
            return self.recognize_structural_only(query);
        }

        let mut verified: Vec<&str> = Vec::new();
        let mut best_unverified: Option<(&str, i32)> = None;
        let mut structural_candidates = 0usize;

        for record in self.records() {
            let Some(m) = match_patterns(&record.pattern, query) else {
                continue;
            };
            structural_candidates += 1;
            let Some(c) = compare_patterns(record.radius, &m, &record.pattern, query) else {
                continue;
            };
            if c.verified {
                verified.push(record.text.as_str());
            }
            if best_unverified.is_none_or(|(_, p)| c.penalty < p) {
                best_unverified = Some((record.text.as_str(), c.penalty));
            }
        }
        debug!(
            "structural pass: {structural_candidates} candidates, {} verified",
            verified.len()
        );

        let best_guess = best_unverified.map(|(t, _)| t);
        let fingerprint = if verified.is_empty() {
            self.fingerprint_fallback(query)
        } else {
            None
        };
        classify(&verified, best_guess, fingerprint.as_deref())
    }

    /// The simplified single-pass variant: no comparator, BLACK on unique
    /// structural consensus. The fingerprint fallback still fills in a
    /// text for otherwise RED answers.
    fn recognize_structural_only(&self, query: &Pattern) -> RecognizedGlyph {
        let candidates: Vec<&str> = self
            .records()
            .filter(|r| match_patterns(&r.pattern, query).is_some())
            .map(|r| r.text.as_str())
            .collect();
        let mut result = classify_structural(&candidates);
        if result.color == ColorCode::Red {
            result.text = self.fingerprint_fallback(query);
        }
        result
    }

    fn fingerprint_fallback(&self, query: &Pattern) -> Option<String> {
        fingerprint_recognize(LibraryCursor::new(&self.libraries), query)
            .map(|record| record.text.clone())
    }

    /// Recognize a glyph bitmap: derive its pattern, classify it, and -
    /// when collection is on - retain RED/YELLOW queries in the orange
    /// library.
    pub fn recognize_glyph(&mut self, bitmap: &Bitmap) -> RecognizedGlyph {
        let pattern = Pattern::new(bitmap);
        let result = self.recognize_pattern(&pattern);

        if matches!(result.color, ColorCode::Red | ColorCode::Yellow) {
            self.collect_uncertain(bitmap, pattern, &result);
        }
        result
    }

    fn collect_uncertain(&mut self, bitmap: &Bitmap, pattern: Pattern, result: &RecognizedGlyph) {
        let Some(orange) = self.orange.as_mut() else {
            return;
        };
        debug!(
            "orange library: retaining {:?} query ({} shelves so far)",
            result.color,
            orange.shelf_count()
        );
        let bbox = GlyphBox::new(0, 0, bitmap.width(), bitmap.height());
        let shelf = orange.add_shelf(Shelf::new(Some(bitmap.clone())));
        let mut record = LibraryRecord::new(
            pattern,
            result.text.clone().unwrap_or_default(),
            Some(bbox),
        );
        record.radius = self.options.default_radius;
        shelf.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_of(entries: &[(&str, &str)]) -> Library {
        let mut lib = Library::new();
        for (art, label) in entries {
            let bitmap = Bitmap::from_ascii(art);
            let bbox = GlyphBox::new(0, 0, bitmap.width(), bitmap.height());
            let shelf = lib.add_shelf(Shelf::new(Some(bitmap.clone())));
            shelf
                .records
                .push(LibraryRecord::new(Pattern::new(&bitmap), *label, Some(bbox)));
        }
        lib
    }

    const TEE: &str = "
        @@@@@@@
        ...@...
        ...@...
        ...@...
    ";

    const ELL: &str = "
        @....
        @....
        @....
        @@@@@
    ";

    #[test]
    fn test_exact_query_is_green() {
        let mut engine = RecognitionEngine::new(EngineOptions::default());
        engine.add_library(library_of(&[(TEE, "T")]));

        let result = engine.recognize_glyph(&Bitmap::from_ascii(TEE));
        assert_eq!(result.color, ColorCode::Green);
        assert_eq!(result.text.as_deref(), Some("T"));
    }

    #[test]
    fn test_incompatible_query_is_red() {
        let mut engine = RecognitionEngine::new(EngineOptions::default());
        engine.add_library(library_of(&[(TEE, "T")]));

        // a lone dot: different topology, hopeless aspect ratio
        let result = engine.recognize_glyph(&Bitmap::from_ascii("@"));
        assert_eq!(result.color, ColorCode::Red);
        assert_eq!(result.text, None);
    }

    #[test]
    fn test_empty_library_is_red() {
        let mut engine = RecognitionEngine::new(EngineOptions::default());
        let result = engine.recognize_glyph(&Bitmap::from_ascii(TEE));
        assert_eq!(result.color, ColorCode::Red);
    }

    #[test]
    fn test_structural_only_mode_is_black() {
        let options = EngineOptions {
            verify: false,
            ..EngineOptions::default()
        };
        let mut engine = RecognitionEngine::new(options);
        engine.add_library(library_of(&[(TEE, "T"), (ELL, "L")]));

        let result = engine.recognize_glyph(&Bitmap::from_ascii(TEE));
        assert_eq!(result.color, ColorCode::Black);
        assert_eq!(result.text.as_deref(), Some("T"));
    }

    #[test]
    fn test_unlabeled_records_are_ignored() {
        let mut engine = RecognitionEngine::new(EngineOptions::default());
        engine.add_library(library_of(&[(TEE, "")]));

        let result = engine.recognize_glyph(&Bitmap::from_ascii(TEE));
        assert_eq!(result.color, ColorCode::Red);
        assert_eq!(result.text, None);
    }

    #[test]
    fn test_orange_library_collects_red_queries() {
        let options = EngineOptions {
            collect_uncertain: true,
            ..EngineOptions::default()
        };
        let mut engine = RecognitionEngine::new(options);
        engine.add_library(library_of(&[(TEE, "T")]));

        engine.recognize_glyph(&Bitmap::from_ascii(TEE)); // GREEN: not collected
        engine.recognize_glyph(&Bitmap::from_ascii("@")); // RED: collected

        let orange = engine.orange_library().expect("collection enabled");
        assert_eq!(orange.shelf_count(), 1);
        assert_eq!(orange.record_count(), 1);
        let record = orange.records().next().unwrap();
        assert_eq!(record.text, "");
        assert!(record.bbox.is_some());

        let taken = engine.take_orange_library().unwrap();
        assert_eq!(taken.shelf_count(), 1);
        assert_eq!(engine.orange_library().unwrap().shelf_count(), 0);
    }

    #[test]
    fn test_orange_disabled_collects_nothing() {
        let mut engine = RecognitionEngine::new(EngineOptions::default());
        engine.add_library(library_of(&[(TEE, "T")]));
        engine.recognize_glyph(&Bitmap::from_ascii("@"));
        assert!(engine.orange_library().is_none());
    }

    #[test]
    fn test_disabled_record_is_skipped() {
        let mut lib = Library::new();
        let bitmap = Bitmap::from_ascii(TEE);
        let shelf = lib.add_shelf(Shelf::new(Some(bitmap.clone())));
        let mut record = LibraryRecord::new(Pattern::new(&bitmap), "T", None);
        record.disabled = true;
        shelf.records.push(record);

        let mut engine = RecognitionEngine::new(EngineOptions::default());
        engine.add_library(lib);
        let result = engine.recognize_glyph(&bitmap);
        assert_eq!(result.color, ColorCode::Red);
    }
}
