//! Chord symbols: a root note plus an opaque suffix.
//!
//! The suffix is carried verbatim through transposition and Nashville
//! conversion. [`ChordQuality`] is a structured reading of it for callers that
//! want to reason about chord types; suffixes it does not recognize become
//! [`ChordQuality::Unknown`] and are still passed through unchanged.

use std::fmt;

use serde::Serialize;

use crate::key::{note_name, parse_note, Spelling};

/// Chord quality decoded from a chord suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "degree")]
pub enum ChordQuality {
    /// `""`, `maj`
    Major,
    /// `m`, `min`
    Minor,
    Augmented,
    Diminished,
    Diminished7,
    Sus2,
    Sus4,
    /// `7`, `9`, `13`
    Dominant(u8),
    /// `maj7`
    Major7,
    /// `m7`, `min7`
    Minor7,
    /// Added-tone and power chords: `2`, `5`, `6`, ...
    Added(u8),
    Unknown,
}

impl ChordQuality {
    /// Decode a suffix. Never fails; anything unrecognized is `Unknown`.
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "" | "maj" => Self::Major,
            "m" | "min" => Self::Minor,
            "aug" => Self::Augmented,
            "dim" => Self::Diminished,
            "dim7" => Self::Diminished7,
            "sus2" => Self::Sus2,
            "sus4" => Self::Sus4,
            "7" => Self::Dominant(7),
            "9" => Self::Dominant(9),
            "13" => Self::Dominant(13),
            "maj7" => Self::Major7,
            "m7" | "min7" => Self::Minor7,
            "2" => Self::Added(2),
            "3" => Self::Added(3),
            "4" => Self::Added(4),
            "5" => Self::Added(5),
            "6" => Self::Added(6),
            "8" => Self::Added(8),
            _ => Self::Unknown,
        }
    }

    /// The shortest conventional suffix for this quality, if it has one.
    pub fn canonical_suffix(&self) -> Option<String> {
        let suffix = match self {
            Self::Major => String::new(),
            Self::Minor => "m".to_string(),
            Self::Augmented => "aug".to_string(),
            Self::Diminished => "dim".to_string(),
            Self::Diminished7 => "dim7".to_string(),
            Self::Sus2 => "sus2".to_string(),
            Self::Sus4 => "sus4".to_string(),
            Self::Dominant(n) | Self::Added(n) => n.to_string(),
            Self::Major7 => "maj7".to_string(),
            Self::Minor7 => "m7".to_string(),
            Self::Unknown => return None,
        };
        Some(suffix)
    }
}

/// A chord split into root and suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub root: u8,
    /// Root exactly as written, e.g. `"Bb"`.
    pub root_text: String,
    pub suffix: String,
    pub quality: ChordQuality,
}

impl Chord {
    /// Split a chord symbol into root and suffix.
    ///
    /// Only the root letter must be uppercase; returns `None` when the symbol
    /// does not start with one.
    pub fn parse(symbol: &str) -> Option<Self> {
        if !symbol.starts_with(|c: char| ('A'..='G').contains(&c)) {
            return None;
        }
        let note = parse_note(symbol)?;
        let (root_text, suffix) = symbol.split_at(note.len);
        Some(Self {
            root: note.pitch_class,
            root_text: root_text.to_string(),
            suffix: suffix.to_string(),
            quality: ChordQuality::from_suffix(suffix),
        })
    }

    /// Same chord with its root moved to `root`, spelled from `spelling`.
    pub fn with_root(&self, root: u8, spelling: Spelling) -> Self {
        Self {
            root: root % 12,
            root_text: note_name(root, spelling).to_string(),
            suffix: self.suffix.clone(),
            quality: self.quality,
        }
    }

    /// Symbol rebuilt from the root and the canonical suffix of its quality.
    pub fn canonical_symbol(&self) -> Option<String> {
        self.quality
            .canonical_suffix()
            .map(|suffix| format!("{}{}", self.root_text, suffix))
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root_text, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_parsing() {
        let chord = Chord::parse("Am").unwrap();
        assert_eq!(chord.root, 9);
        assert_eq!(chord.root_text, "A");
        assert_eq!(chord.suffix, "m");
        assert_eq!(chord.quality, ChordQuality::Minor);

        let chord = Chord::parse("F#sus4").unwrap();
        assert_eq!(chord.root, 6);
        assert_eq!(chord.suffix, "sus4");
        assert_eq!(chord.quality, ChordQuality::Sus4);

        let chord = Chord::parse("Bb7").unwrap();
        assert_eq!(chord.root, 10);
        assert_eq!(chord.quality, ChordQuality::Dominant(7));
    }

    #[test]
    fn test_unknown_suffix_is_kept() {
        let chord = Chord::parse("C7#11").unwrap();
        assert_eq!(chord.suffix, "7#11");
        assert_eq!(chord.quality, ChordQuality::Unknown);
        assert_eq!(chord.to_string(), "C7#11");
        assert_eq!(chord.canonical_symbol(), None);
    }

    #[test]
    fn test_rejects_non_chords() {
        assert!(Chord::parse("H7").is_none());
        assert!(Chord::parse("am").is_none());
        assert!(Chord::parse("").is_none());
    }

    #[test]
    fn test_with_root_keeps_suffix() {
        let chord = Chord::parse("Ebmaj7").unwrap();
        let moved = chord.with_root(5, Spelling::Sharps);
        assert_eq!(moved.to_string(), "Fmaj7");
        assert_eq!(moved.quality, ChordQuality::Major7);
    }

    #[test]
    fn test_canonical_symbol() {
        assert_eq!(Chord::parse("Cmaj").unwrap().canonical_symbol().unwrap(), "C");
        assert_eq!(Chord::parse("Amin").unwrap().canonical_symbol().unwrap(), "Am");
        assert_eq!(Chord::parse("Dmin7").unwrap().canonical_symbol().unwrap(), "Dm7");
    }
}
