//! # Nashville Number System
//!
//! Rewrites chords as scale degrees of a reference key. The reference is the
//! chart's original key, never the transposition target, so the numbers stay
//! the same whatever key the band plays in.
//!
//! ## Degree Table
//! ```text
//! distance  0  1   2  3   4  5  6   7  8   9  10  11
//! degree    1  2b  2  3b  3  4  4#  5  6b  6  7b  7
//! ```
//!
//! The accidental glyph follows the degree and the chord suffix follows both:
//! `Bbmaj7` in C is `7bmaj7`, `Am` in C is `6m`.

use std::fmt;

use serde::Serialize;

use crate::chord::Chord;
use crate::key::{pitch_class, Accidental, Key};
use crate::section::map_body_lines;
use crate::tokenizer::{replace_chords, ChordRecognition};

const DEGREES: [u8; 12] = [1, 2, 2, 3, 3, 4, 4, 5, 6, 6, 7, 7];

/// Distances that sit a semitone below a diatonic degree.
const FLATTED: [u8; 4] = [1, 3, 8, 10];

/// Distances that sit a semitone above a diatonic degree.
const SHARPED: [u8; 1] = [6];

/// A chord as a scale degree of a reference key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NashvilleChord {
    pub degree: u8,
    pub accidental: Accidental,
    pub suffix: String,
}

impl NashvilleChord {
    /// Degree of `chord` relative to `key`.
    pub fn from_chord(chord: &Chord, key: &Key) -> Self {
        let distance = pitch_class(i32::from(chord.root) - i32::from(key.tonic()));
        let accidental = if FLATTED.contains(&distance) {
            Accidental::Flat
        } else if SHARPED.contains(&distance) {
            Accidental::Sharp
        } else {
            Accidental::Natural
        };
        Self {
            degree: DEGREES[usize::from(distance)],
            accidental,
            suffix: chord.suffix.clone(),
        }
    }
}

impl fmt::Display for NashvilleChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}{}", self.degree, glyph, self.suffix)
    }
}

/// Structured Nashville form of a chord symbol, `None` if its root is unresolvable.
pub fn nashville_chord(symbol: &str, key: &Key) -> Option<NashvilleChord> {
    Chord::parse(symbol).map(|chord| NashvilleChord::from_chord(&chord, key))
}

/// Nashville notation for one chord symbol.
///
/// Unresolvable tokens pass through unchanged.
///
/// ```rust
/// use chordchart::{nashville::to_nashville, Key};
///
/// let key: Key = "G".parse().unwrap();
/// assert_eq!(to_nashville("Em7", &key), "6m7");
/// assert_eq!(to_nashville("F", &key), "7b");
/// ```
pub fn to_nashville(symbol: &str, key: &Key) -> String {
    match nashville_chord(symbol, key) {
        Some(chord) => chord.to_string(),
        None => {
            log::debug!("leaving unresolved chord token {symbol:?} unchanged");
            symbol.to_string()
        }
    }
}

/// Rewrite every chord of chart text as Nashville numbers relative to `key`.
///
/// Header lines are left as written.
pub fn chart_to_nashville(text: &str, key: &Key, recognition: ChordRecognition) -> String {
    map_body_lines(text, |line| {
        replace_chords(line, recognition, |symbol| to_nashville(symbol, key))
    })
}
