//! # Key Transposer
//!
//! Moves every chord root in a chart by the semitone distance between two
//! keys. Suffixes are carried over untouched; only the root token changes.
//!
//! ## Algorithm
//! ```text
//! shift    = (to - from + 12) mod 12
//! new_root = (root + shift) mod 12
//! ```
//!
//! New roots are spelled from the sharp table by default. With
//! [`SpellingPolicy::KeySignature`] a target key written with flats (F, Bb,
//! Eb, ...) gets flat spellings instead.
//!
//! ## Failure Mode
//! Nothing here fails. A token whose root cannot be resolved is echoed
//! unchanged; an unknown key label turns the whole transposition into a no-op.
//!
//! ## Example
//! ```rust
//! use chordchart::transpose::transpose;
//!
//! let chart = "G     Em\nHello world";
//! assert_eq!(transpose(chart, "G", "A"), "A     F#m\nHello world");
//! ```

use serde::Serialize;

use crate::chord::Chord;
use crate::key::{pitch_class, Key, Spelling};
use crate::section::map_body_lines;
use crate::tokenizer::{replace_chords, ChordRecognition};

/// How transposed roots are spelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpellingPolicy {
    /// Always the first alternative of the key table: C#, D#, F#, G#, A#.
    #[default]
    Sharps,
    /// Follow the target key's signature: flats for flat keys.
    KeySignature,
}

impl SpellingPolicy {
    pub fn spelling_for(self, target: &Key) -> Spelling {
        match self {
            Self::Sharps => Spelling::Sharps,
            Self::KeySignature => target.spelling(),
        }
    }
}

/// Options for transposing chart text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransposeOptions {
    pub spelling: SpellingPolicy,
    pub recognition: ChordRecognition,
}

/// Semitones to move up to get from `from` to `to`, in `0..12`.
pub fn semitone_shift(from: &Key, to: &Key) -> u8 {
    pitch_class(i32::from(to.tonic()) - i32::from(from.tonic()))
}

/// Transpose a single chord symbol by `shift` semitones.
///
/// Returns the token unchanged when its root cannot be resolved or when the
/// shift is a whole number of octaves.
pub fn transpose_chord(symbol: &str, shift: i32, spelling: Spelling) -> String {
    if pitch_class(shift) == 0 {
        return symbol.to_string();
    }
    match Chord::parse(symbol) {
        Some(chord) => {
            let root = pitch_class(i32::from(chord.root) + shift);
            chord.with_root(root, spelling).to_string()
        }
        None => {
            log::debug!("leaving unresolved chord token {symbol:?} unchanged");
            symbol.to_string()
        }
    }
}

/// Transpose chart text between two key labels with default options.
///
/// Unknown key labels leave the text unchanged.
pub fn transpose(text: &str, from: &str, to: &str) -> String {
    match (Key::from_label(from), Key::from_label(to)) {
        (Some(from), Some(to)) => transpose_between(text, &from, &to, TransposeOptions::default()),
        _ => {
            log::warn!("cannot transpose from {from:?} to {to:?}: unknown key, chart left unchanged");
            text.to_string()
        }
    }
}

/// Transpose chart text from one key to another.
///
/// Header lines are never rewritten. When both keys share a tonic the text is
/// returned as-is without scanning for chords.
pub fn transpose_between(text: &str, from: &Key, to: &Key, options: TransposeOptions) -> String {
    let shift = semitone_shift(from, to);
    if shift == 0 {
        return text.to_string();
    }
    let spelling = options.spelling.spelling_for(to);
    log::debug!(
        "transposing {} -> {} ({shift} semitones, {spelling:?})",
        from.name(),
        to.name()
    );
    map_body_lines(text, |line| {
        replace_chords(line, options.recognition, |symbol| {
            transpose_chord(symbol, i32::from(shift), spelling)
        })
    })
}
