//! Confidence color codes and the classification decision
//!
//! Recognition never answers with a bare string: every guess carries a
//! color encoding how it was reached and how much to trust it. The
//! decision logic is a pure function over the evidence the engine
//! gathered, so every branch is unit-testable in isolation.

/// How a recognition result was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCode {
    /// Unique structural consensus in the single-pass (no-verification)
    /// engine variant.
    Black,
    /// Nothing matched at all.
    Red,
    /// Verified consensus: at least one edit-distance-verified match, and
    /// all verified matches agree.
    Green,
    /// Best unverified guess: structure matched somewhere, but nothing
    /// passed verification.
    Yellow,
    /// An unverified guess corroborated by the fingerprint classifier -
    /// two independent methods agree, yet neither is a verified
    /// structural match.
    Magenta,
    /// Conflicting verified matches (which is strange).
    Blue,
}

/// A confidence-tagged recognition answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedGlyph {
    pub color: ColorCode,
    pub text: Option<String>,
}

impl RecognizedGlyph {
    fn new(color: ColorCode, text: Option<&str>) -> Self {
        RecognizedGlyph {
            color,
            text: text.map(str::to_string),
        }
    }
}

/// Classify the evidence of a full (verifying) recognition pass.
///
/// * `verified` - labels of the edit-distance-verified candidates, in
///   scan order
/// * `best_unverified` - label of the lowest-penalty comparable candidate
///   (present whenever any candidate survived comparison)
/// * `fingerprint` - the fingerprint classifier's answer, consulted only
///   when no candidate verified
///
/// Verified consensus wins outright (GREEN), disagreement among verified
/// candidates reports the earliest one (BLUE). With no verified candidate
/// the best guess is YELLOW; the fingerprint result then corroborates it
/// (MAGENTA), overrides it, or - when there was no guess at all - becomes
/// the text of an otherwise RED answer.
pub fn classify(
    verified: &[&str],
    best_unverified: Option<&str>,
    fingerprint: Option<&str>,
) -> RecognizedGlyph {
    if let Some(&first) = verified.first() {
        let color = if verified.iter().all(|&t| t == first) {
            ColorCode::Green
        } else {
            ColorCode::Blue
        };
        return RecognizedGlyph::new(color, Some(first));
    }

    match (best_unverified, fingerprint) {
        (None, None) => RecognizedGlyph::new(ColorCode::Red, None),
        (None, Some(f)) => RecognizedGlyph::new(ColorCode::Red, Some(f)),
        (Some(g), None) => RecognizedGlyph::new(ColorCode::Yellow, Some(g)),
        (Some(g), Some(f)) if g == f => RecognizedGlyph::new(ColorCode::Magenta, Some(g)),
        (Some(_), Some(f)) => RecognizedGlyph::new(ColorCode::Yellow, Some(f)),
    }
}

/// Classify a structural-only pass (the simplified engine variant): a
/// unique consensus earns BLACK, disagreement falls back to the earliest
/// candidate as BLUE, and no candidate at all is RED.
pub fn classify_structural(candidates: &[&str]) -> RecognizedGlyph {
    match candidates.first() {
        None => RecognizedGlyph::new(ColorCode::Red, None),
        Some(&first) => {
            let color = if candidates.iter().all(|&t| t == first) {
                ColorCode::Black
            } else {
                ColorCode::Blue
            };
            RecognizedGlyph::new(color, Some(first))
        }
    }
}
