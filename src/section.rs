//! # Section Parser
//!
//! Splits chart text into labeled sections.
//!
//! ## Headers
//! A header is a line naming a section type with an optional number and an
//! optional trailing colon, case-insensitively:
//!
//! ```text
//! Verse:      CHORUS 2     bridge      Intro:     Outro 1:
//! ```
//!
//! Header lines open a new section and are represented structurally, not kept
//! as content. Lines before the first header form an implicit leading verse
//! with no number, so no text is ever dropped.
//!
//! ## State Machine
//! ```text
//! SeekingHeader --header--> InSection --header--> InSection (new section)
//!       |                        ^
//!       +-------other line-------+ (opens the implicit leading verse)
//! ```
//!
//! ## Example
//! ```rust
//! use chordchart::section::{parse_sections, SectionKind};
//!
//! let sections = parse_sections("Verse:\nA B\nChorus:\nC D");
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].kind, SectionKind::Verse);
//! assert_eq!(sections[1].content, vec!["C D"]);
//! ```

use std::fmt;

use serde::Serialize;

use crate::tokenizer::{extract_unique_chords_with, unique_in_order, ChordRecognition};

/// Section types a header line can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Verse,
    Chorus,
    Bridge,
    Intro,
    Outro,
}

impl SectionKind {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "verse" => Some(Self::Verse),
            "chorus" => Some(Self::Chorus),
            "bridge" => Some(Self::Bridge),
            "intro" => Some(Self::Intro),
            "outro" => Some(Self::Outro),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Verse => "Verse",
            Self::Chorus => "Chorus",
            Self::Bridge => "Bridge",
            Self::Intro => "Intro",
            Self::Outro => "Outro",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A labeled run of chart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSection {
    pub kind: SectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    pub content: Vec<String>,
    /// True for the verse holding lines that preceded the first header.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub implicit: bool,
}

impl ChartSection {
    pub fn new(kind: SectionKind, number: Option<u32>) -> Self {
        Self {
            kind,
            number,
            content: Vec::new(),
            implicit: false,
        }
    }

    fn leading() -> Self {
        Self {
            implicit: true,
            ..Self::new(SectionKind::Verse, None)
        }
    }

    /// Display label, e.g. `"Chorus 2"`.
    pub fn label(&self) -> String {
        match self.number {
            Some(n) => format!("{} {}", self.kind, n),
            None => self.kind.to_string(),
        }
    }

    /// Header line that reproduces this section when re-parsed, e.g. `"Chorus 2:"`.
    pub fn header_line(&self) -> String {
        format!("{}:", self.label())
    }
}

/// Recognize a section header line.
///
/// Returns the section type and optional number, or `None` for any other line.
pub fn parse_header(line: &str) -> Option<(SectionKind, Option<u32>)> {
    let line = line.trim();
    let line = line.strip_suffix(':').unwrap_or(line);

    let word_end = line
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(line.len());
    let kind = SectionKind::from_word(&line[..word_end])?;

    let rest = line[word_end..].trim_start();
    if rest.is_empty() {
        return Some((kind, None));
    }
    if !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // A number too large for u32 still marks a header, just an unnumbered one
    Some((kind, rest.parse().ok()))
}

enum State {
    SeekingHeader,
    InSection(ChartSection),
}

/// Split chart text into sections in their original order.
///
/// Blank text yields no sections. Repeated headers are independent sections.
pub fn parse_sections(text: &str) -> Vec<ChartSection> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut state = State::SeekingHeader;

    for line in text.lines() {
        let header = parse_header(line);
        state = match (state, header) {
            (State::SeekingHeader, Some((kind, number))) => {
                State::InSection(ChartSection::new(kind, number))
            }
            (State::SeekingHeader, None) => {
                let mut section = ChartSection::leading();
                section.content.push(line.to_string());
                State::InSection(section)
            }
            (State::InSection(current), Some((kind, number))) => {
                sections.push(current);
                State::InSection(ChartSection::new(kind, number))
            }
            (State::InSection(mut current), None) => {
                current.content.push(line.to_string());
                State::InSection(current)
            }
        };
    }

    if let State::InSection(current) = state {
        sections.push(current);
    }
    sections
}

/// Render sections back to chart text, header lines included.
///
/// The implicit leading verse is written without a header so that
/// `parse_sections(&sections_to_text(s)) == s`.
pub fn sections_to_text(sections: &[ChartSection]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for section in sections {
        if !section.implicit {
            lines.push(section.header_line());
        }
        lines.extend(section.content.iter().cloned());
    }
    lines.join("\n")
}

/// Pass every non-header line of `text` through `f`, keeping header lines
/// and line endings exactly as written.
pub fn map_body_lines<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, ending) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        if parse_header(body).is_some() {
            out.push_str(body);
        } else {
            out.push_str(&f(body));
        }
        out.push_str(ending);
    }
    out
}

/// Split text into paragraphs of non-blank lines.
///
/// Runs of blank (whitespace-only) lines are the separators; leading and
/// trailing blank lines produce no empty paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Sections plus the distinct chords used anywhere in the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedChart {
    pub sections: Vec<ChartSection>,
    pub unique_chords: Vec<String>,
}

impl ParsedChart {
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, ChordRecognition::Lexical)
    }

    /// Chords are collected from section content only; header words like
    /// "Bridge" never contribute a chord.
    pub fn parse_with(text: &str, recognition: ChordRecognition) -> Self {
        let sections = parse_sections(text);
        let per_line: Vec<Vec<String>> = sections
            .iter()
            .flat_map(|section| section.content.iter())
            .map(|line| extract_unique_chords_with(line, recognition))
            .collect();
        let unique_chords = unique_in_order(per_line.iter().flatten().map(String::as_str));
        Self {
            sections,
            unique_chords,
        }
    }
}
