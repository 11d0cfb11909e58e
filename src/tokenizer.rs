//! # Chord Tokenizer
//!
//! Regex-driven extraction of chord symbols from chart text.
//!
//! ## Grammar
//! ```text
//! chord      = root accidental? quality? extension?
//! root       = "A" .. "G"
//! accidental = "#" | "b"
//! quality    = "maj" | "min" | "aug" | "dim" | "sus2" | "sus4" | "m"
//! extension  = "13" | "2" .. "9"
//! ```
//!
//! Matching is purely lexical. In [`ChordRecognition::Lexical`] mode a capital
//! `A` inside a lyric line is a chord like any other; [`ChordRecognition::ChordLines`]
//! restricts rewriting to lines made entirely of chord tokens.
//!
//! On a chord line every whitespace-separated token is one of:
//!
//! ```text
//! bar mark    | - / . %           kept verbatim
//! annotation  (x2) [x4] x2 3x N.C. kept verbatim
//! chord       root accidental? then any of maj min aug dim sus add m M digits # b + - ( )
//! ```
//!
//! Chord tokens may be slash chords (`D/F#`). Inside a chord token only the
//! grammar's prefix is rewritten, so `Cadd9` becomes `Dadd9` and `G7sus4`
//! becomes `A7sus4`.
//!
//! ## Example
//! ```rust
//! use chordchart::tokenizer::extract_unique_chords;
//!
//! assert_eq!(extract_unique_chords("G D G D G D"), vec!["G", "D"]);
//! ```

use std::collections::HashSet;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::ChartError;

const CHORD_PATTERN: &str = r"[A-G][#b]?(?:maj|min|aug|dim|sus2|sus4|m)?(?:13|[2-9])?";

static CHORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(CHORD_PATTERN).expect("invalid chord pattern"));

static WHOLE_CHORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{CHORD_PATTERN}$")).expect("invalid chord pattern"));

static CHORD_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-G][#b]?(?:maj|min|aug|dim|sus|add|m|M|[0-9]|[#b+()\-])*$")
        .expect("invalid chord token pattern")
});

static ANNOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\(.*\)|\[.*\]|[xX]\d+|\d+[xX]|N\.?C\.?)$").expect("invalid annotation pattern")
});

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("invalid token pattern"));

/// Which lines chord tokens are recognized on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordRecognition {
    /// Every chord-shaped substring anywhere in the text.
    #[default]
    Lexical,
    /// Only lines where [`is_chord_line`] holds.
    ChordLines,
}

impl FromStr for ChordRecognition {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(Self::Lexical),
            "chord-lines" | "chordlines" => Ok(Self::ChordLines),
            other => Err(ChartError::InvalidFormat(other.to_string())),
        }
    }
}

/// A chord token and its byte range in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordMatch<'a> {
    pub symbol: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Every chord-shaped substring of `text`, in order.
pub fn find_chords(text: &str) -> Vec<ChordMatch<'_>> {
    CHORD_RE
        .find_iter(text)
        .map(|m| ChordMatch {
            symbol: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Chord symbols of `text` verbatim, duplicates included.
pub fn extract_chords(text: &str) -> Vec<&str> {
    CHORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Distinct chord symbols in first-seen order, compared by exact text.
pub fn extract_unique_chords(text: &str) -> Vec<String> {
    unique_in_order(extract_chords(text))
}

/// Distinct chord symbols from the lines `recognition` accepts.
pub fn extract_unique_chords_with(text: &str, recognition: ChordRecognition) -> Vec<String> {
    match recognition {
        ChordRecognition::Lexical => extract_unique_chords(text),
        ChordRecognition::ChordLines => unique_in_order(
            text.lines()
                .filter(|line| is_chord_line(line))
                .flat_map(chord_line_symbols),
        ),
    }
}

/// Grammar chords inside the chord tokens of a line; annotations are skipped.
fn chord_line_symbols(line: &str) -> Vec<&str> {
    TOKEN_RE
        .find_iter(line)
        .filter(|token| classify(token.as_str()) == LineToken::Chord)
        .flat_map(|token| CHORD_RE.find_iter(token.as_str()).map(|m| m.as_str()))
        .collect()
}

pub(crate) fn unique_in_order<'a, I>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .filter(|symbol| seen.insert(*symbol))
        .map(str::to_string)
        .collect()
}

/// Whether `token` is exactly one chord, e.g. `"Am7"` but not `"Amazing"`.
pub fn is_chord(token: &str) -> bool {
    WHOLE_CHORD_RE.is_match(token)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineToken {
    BarMark,
    Annotation,
    Chord,
    Word,
}

fn classify(token: &str) -> LineToken {
    if token.chars().all(|c| matches!(c, '|' | '-' | '/' | '.' | '%')) {
        return LineToken::BarMark;
    }
    // Passing chords are often bracketed: (G) [D/F#]
    let inner = token.trim_matches(|c| matches!(c, '(' | ')' | '[' | ']'));
    if is_chord_token(inner) {
        LineToken::Chord
    } else if ANNOTATION_RE.is_match(token) {
        LineToken::Annotation
    } else {
        LineToken::Word
    }
}

fn is_chord_token(token: &str) -> bool {
    let mut parts = token.split('/').filter(|part| !part.is_empty()).peekable();
    parts.peek().is_some() && parts.all(|part| CHORD_TOKEN_RE.is_match(part))
}

/// A line holding only chords, slash chords (`G/B`), bar marks (`|`, `-`,
/// `/`, `.`, `%`) and annotations such as `(x2)` or `N.C.`.
///
/// Blank lines and lines without a single chord are not chord lines.
pub fn is_chord_line(line: &str) -> bool {
    let mut chords = 0;
    for token in line.split_whitespace() {
        match classify(token) {
            LineToken::Word => return false,
            LineToken::Chord => chords += 1,
            LineToken::BarMark | LineToken::Annotation => {}
        }
    }
    chords > 0
}

fn rewrite_chord_line<F>(line: &str, f: &mut F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for token in TOKEN_RE.find_iter(line) {
        if classify(token.as_str()) != LineToken::Chord {
            continue;
        }
        out.push_str(&line[last..token.start()]);
        out.push_str(&CHORD_RE.replace_all(token.as_str(), |caps: &Captures| f(&caps[0])));
        last = token.end();
    }
    out.push_str(&line[last..]);
    out
}

/// Rewrite every recognized chord token in `text` with `f`.
///
/// All bytes outside chord tokens, line endings included, are preserved.
pub fn replace_chords<F>(text: &str, recognition: ChordRecognition, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    match recognition {
        ChordRecognition::Lexical => CHORD_RE
            .replace_all(text, |caps: &Captures| f(&caps[0]))
            .into_owned(),
        ChordRecognition::ChordLines => {
            let mut out = String::with_capacity(text.len());
            for line in text.split_inclusive('\n') {
                if is_chord_line(line) {
                    out.push_str(&rewrite_chord_line(line, &mut f));
                } else {
                    out.push_str(line);
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_unique_chords() {
        assert_eq!(extract_unique_chords("G D G D G D"), vec!["G", "D"]);
        assert_eq!(
            extract_unique_chords("Am F C G\nAm F C G"),
            vec!["Am", "F", "C", "G"]
        );
        assert!(extract_unique_chords("").is_empty());
    }

    #[test]
    fn test_suffixes_are_verbatim() {
        let chords = extract_chords("Cmaj7 Dm7 Esus4 F#dim Bbaug G13 A2");
        assert_eq!(
            chords,
            vec!["Cmaj7", "Dm7", "Esus4", "F#dim", "Bbaug", "G13", "A2"]
        );
    }

    #[test]
    fn test_dedup_is_by_exact_text() {
        // Same pitch, different spelling: both kept
        assert_eq!(extract_unique_chords("A# Bb A#"), vec!["A#", "Bb"]);
    }

    #[test]
    fn test_lexical_matching_hits_lyrics() {
        // Documented limitation: capitals in lyrics look like chords
        assert_eq!(extract_chords("A day in Eden"), vec!["A", "E"]);
    }

    #[test]
    fn test_find_chords_ranges() {
        let found = find_chords("  G   Em");
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].start, found[0].end), (2, 3));
        assert_eq!(found[1].symbol, "Em");
        assert_eq!((found[1].start, found[1].end), (6, 8));
    }

    #[test]
    fn test_is_chord_line() {
        assert!(is_chord_line("G    D/F#   Em   C"));
        assert!(is_chord_line("| Am | F | C | G |"));
        assert!(!is_chord_line("Amazing grace how sweet the sound"));
        assert!(!is_chord_line("A day in the life"));
        assert!(!is_chord_line("   "));
        assert!(!is_chord_line("| | |"));
    }

    #[test]
    fn test_chord_line_with_annotations() {
        assert!(is_chord_line("G   C   D  (x2)"));
        assert!(is_chord_line("N.C.   G   D"));
        assert!(is_chord_line("[x4]  Am  F"));
        assert!(is_chord_line("G  (D/F#)  Em"));
        assert!(!is_chord_line("(x2)"));
        assert!(!is_chord_line("Chorus (x2)"));
    }

    #[test]
    fn test_chord_line_with_extended_chords() {
        assert!(is_chord_line("G   Cadd9   D"));
        assert!(is_chord_line("G7sus4  C"));
        assert!(is_chord_line("Dm7b5  G7/B  CM7"));
        assert!(!is_chord_line("Amazing  G"));
        assert!(!is_chord_line("Add  Bad  Dim"));
    }

    #[test]
    fn test_replace_chord_line_skips_annotations() {
        let text = "N.C.  G   C   D  (x2)\nG   Cadd9   D\nG7sus4  C\n";
        let out = replace_chords(text, ChordRecognition::ChordLines, |c| format!("[{c}]"));
        assert_eq!(
            out,
            "N.C.  [G]   [C]   [D]  (x2)\n[G]   [C]add9   [D]\n[G7]sus4  [C]\n"
        );
    }

    #[test]
    fn test_replace_bracketed_passing_chord() {
        let out = replace_chords("G  (D/F#)  Em", ChordRecognition::ChordLines, |c| {
            format!("[{c}]")
        });
        assert_eq!(out, "[G]  ([D]/[F#])  [Em]");
    }

    #[test]
    fn test_extract_with_chord_lines_skips_annotations() {
        let text = "N.C.  G  (x2)\nla la";
        assert_eq!(
            extract_unique_chords_with(text, ChordRecognition::ChordLines),
            vec!["G"]
        );
    }

    #[test]
    fn test_replace_chords_lexical() {
        let out = replace_chords("G  C\nHello A", ChordRecognition::Lexical, |c| {
            format!("[{c}]")
        });
        assert_eq!(out, "[G]  [C]\nHello [A]");
    }

    #[test]
    fn test_replace_chords_chord_lines_only() {
        let text = "G  C\nA day\n";
        let out = replace_chords(text, ChordRecognition::ChordLines, |c| format!("[{c}]"));
        assert_eq!(out, "[G]  [C]\nA day\n");
    }

    #[test]
    fn test_extract_with_chord_lines() {
        let text = "G  C\nA day in Eden";
        assert_eq!(
            extract_unique_chords_with(text, ChordRecognition::ChordLines),
            vec!["G", "C"]
        );
    }

    #[test]
    fn test_recognition_from_str() {
        assert_eq!("lexical".parse::<ChordRecognition>().unwrap(), ChordRecognition::Lexical);
        assert_eq!(
            "Chord-Lines".parse::<ChordRecognition>().unwrap(),
            ChordRecognition::ChordLines
        );
        assert!("words".parse::<ChordRecognition>().is_err());
    }
}
