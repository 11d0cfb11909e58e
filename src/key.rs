//! # Key Model
//!
//! The 12 pitch-class chromatic circle, note spellings and musical keys.
//!
//! Pitch classes are plain `u8` values in `0..12` with `0 = C`. All arithmetic
//! goes through [`pitch_class`], which reduces modulo 12.
//!
//! ## Key labels
//! Keys are displayed with one of twelve fixed labels. Five of them are dual
//! (`"C#/Db"`); when a pitch class has to be re-spelled from the label table
//! only the first, sharp alternative is used.
//!
//! ```rust
//! use chordchart::Key;
//!
//! let key: Key = "Db".parse().unwrap();
//! assert_eq!(key.tonic(), 1);
//! assert_eq!(key.label(), "C#/Db");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ChartError;

/// Display labels for the twelve keys, indexed by pitch class.
pub const KEY_LABELS: [&str; 12] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Reduce any semitone count to a pitch class in `0..12`.
pub fn pitch_class(semitones: i32) -> u8 {
    semitones.rem_euclid(12) as u8
}

/// Natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Letters are accepted in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    /// Semitones above C
    pub fn semitone(self) -> i32 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Sharp),
            'b' => Some(Self::Flat),
            _ => None,
        }
    }

    fn offset(self) -> i32 {
        match self {
            Self::Natural => 0,
            Self::Sharp => 1,
            Self::Flat => -1,
        }
    }
}

/// A note name parsed from the start of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNote {
    pub pitch_class: u8,
    pub accidental: Accidental,
    /// Bytes of the input the note occupied (letter plus accidental).
    pub len: usize,
}

/// Parse a note name (`C`, `F#`, `Bb`) at the start of `s`.
///
/// Returns `None` when `s` does not start with a note letter. Anything after
/// the note is left for the caller.
pub fn parse_note(s: &str) -> Option<ParsedNote> {
    let mut chars = s.chars();
    let letter = NoteName::from_char(chars.next()?)?;
    let accidental = chars
        .next()
        .and_then(Accidental::from_char)
        .unwrap_or_default();
    let len = if accidental == Accidental::Natural { 1 } else { 2 };
    Some(ParsedNote {
        pitch_class: pitch_class(letter.semitone() + accidental.offset()),
        accidental,
        len,
    })
}

/// Which family of accidentals to use when spelling a pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// Spell a pitch class as a note name.
pub fn note_name(pc: u8, spelling: Spelling) -> &'static str {
    let idx = usize::from(pc % 12);
    match spelling {
        Spelling::Sharps => SHARP_NAMES[idx],
        Spelling::Flats => FLAT_NAMES[idx],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// A musical key: tonic pitch class, mode and conventional accidental family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Key {
    tonic: u8,
    mode: Mode,
    spelling: Spelling,
}

impl Default for Key {
    fn default() -> Self {
        Self::new(0, Mode::Major)
    }
}

impl Key {
    /// Build a key, choosing the accidental family its signature conventionally uses.
    pub fn new(tonic: u8, mode: Mode) -> Self {
        let tonic = tonic % 12;
        Self {
            tonic,
            mode,
            spelling: conventional_spelling(tonic, mode),
        }
    }

    /// Parse a key label.
    ///
    /// Accepts the canonical labels (`"C#/Db"`), either half of a dual label,
    /// plain note names (`"Bb"`, `"g"`) and minor keys (`"F#m"`, `"D minor"`).
    /// An explicit `#` or `b` on a single note overrides the conventional
    /// spelling family; dual labels keep the conventional one.
    pub fn from_label(label: &str) -> Option<Self> {
        let s = label.trim();
        let first = parse_note(s)?;
        let mut rest = &s[first.len..];

        let mut dual = false;
        if let Some(alt) = rest.strip_prefix('/') {
            let second = parse_note(alt)?;
            if second.pitch_class != first.pitch_class {
                return None;
            }
            rest = &alt[second.len..];
            dual = true;
        }

        let mode = match rest.trim() {
            "" | "maj" | "major" => Mode::Major,
            "m" | "min" | "minor" => Mode::Minor,
            _ => return None,
        };

        let mut key = Self::new(first.pitch_class, mode);
        if !dual {
            match first.accidental {
                Accidental::Sharp => key.spelling = Spelling::Sharps,
                Accidental::Flat => key.spelling = Spelling::Flats,
                Accidental::Natural => {}
            }
        }
        Some(key)
    }

    pub fn tonic(&self) -> u8 {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Accidental family of this key's signature.
    pub fn spelling(&self) -> Spelling {
        self.spelling
    }

    /// The canonical table label for the tonic, e.g. `"A#/Bb"`.
    pub fn label(&self) -> &'static str {
        KEY_LABELS[usize::from(self.tonic)]
    }

    /// Name spelled the way the key is written, e.g. `"Bb"` or `"F#m"`.
    pub fn name(&self) -> String {
        let tonic = note_name(self.tonic, self.spelling);
        match self.mode {
            Mode::Major => tonic.to_string(),
            Mode::Minor => format!("{tonic}m"),
        }
    }
}

impl FromStr for Key {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ChartError::InvalidKey(s.trim().to_string()))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Flat keys: F Bb Eb Ab Db major, and their relative minors D G C F Bb Eb.
/// Gb/F# is written with sharps.
fn conventional_spelling(tonic: u8, mode: Mode) -> Spelling {
    let flats = match mode {
        Mode::Major => matches!(tonic, 1 | 3 | 5 | 8 | 10),
        Mode::Minor => matches!(tonic, 0 | 2 | 3 | 5 | 7 | 10),
    };
    if flats {
        Spelling::Flats
    } else {
        Spelling::Sharps
    }
}
