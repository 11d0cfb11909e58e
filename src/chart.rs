//! # Render Pipeline
//!
//! Ties the engine together for callers:
//!
//! ```text
//! source text
//!   -> split_frontmatter / ChartMetadata     (optional YAML block)
//!   -> transpose_between                     (chords as played in the target key)
//!   -> chart_to_nashville                    (Nashville mode only)
//!   -> parse_sections                        (labeled sections for display)
//!   -> extract_unique_chords + diagram       (chord list with fretboards)
//! ```
//!
//! Every render is a fresh, pure derivation from its inputs; nothing is cached
//! or mutated between calls.
//!
//! ## Example
//! ```rust
//! use chordchart::{Chart, FormatMode, RenderOptions};
//!
//! let chart = Chart::load("---\nkey: G\n---\nChorus:\nG   D   Em  C\nsing it\n").unwrap();
//! let options = RenderOptions {
//!     target_key: Some("A".parse().unwrap()),
//!     ..RenderOptions::default()
//! };
//! let rendered = chart.render(&options);
//! assert_eq!(rendered.sections[0].content[0], "A   E   F#m  D");
//! assert_eq!(rendered.chords.len(), 4);
//!
//! let nashville = chart.render(&RenderOptions { format: FormatMode::Nashville, ..options });
//! assert_eq!(nashville.sections[0].content[0], "1   5   6m  4");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::chord::{Chord, ChordQuality};
use crate::diagram::{diagram, ChordDiagram};
use crate::error::ChartError;
use crate::key::Key;
use crate::metadata::{split_frontmatter, ChartMetadata};
use crate::nashville::chart_to_nashville;
use crate::section::{parse_sections, sections_to_text, ChartSection, ParsedChart};
use crate::tokenizer::ChordRecognition;
use crate::transpose::{transpose_between, SpellingPolicy, TransposeOptions};

/// How chords are written in the rendered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Letter names, transposed to the target key.
    #[default]
    Standard,
    /// Scale degrees relative to the chart's original key.
    Nashville,
}

impl FromStr for FormatMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "nashville" => Ok(Self::Nashville),
            other => Err(ChartError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Nashville => f.write_str("nashville"),
        }
    }
}

/// Caller selections for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Original key; falls back to the chart's metadata key, then C.
    pub source_key: Option<Key>,
    /// Key to play in; defaults to the source key.
    pub target_key: Option<Key>,
    pub format: FormatMode,
    pub spelling: SpellingPolicy,
    pub recognition: ChordRecognition,
}

/// A distinct chord of the rendered chart with its fretboard diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordEntry {
    pub symbol: String,
    pub quality: ChordQuality,
    pub diagram: ChordDiagram,
}

impl ChordEntry {
    pub fn new(symbol: &str) -> Self {
        let quality = Chord::parse(symbol).map_or(ChordQuality::Unknown, |chord| chord.quality);
        Self {
            symbol: symbol.to_string(),
            quality,
            diagram: diagram(symbol),
        }
    }
}

/// Everything a display needs for one chart in one key and format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedChart {
    pub source_key: Key,
    pub target_key: Key,
    pub format: FormatMode,
    pub sections: Vec<ChartSection>,
    /// Re-notated chart text with the original line structure.
    pub text: String,
    /// Distinct chords as played in the target key, first-seen order.
    pub chords: Vec<ChordEntry>,
}

/// Render chart text without frontmatter.
///
/// Standard mode transposes source -> target; Nashville mode numbers every
/// chord against the source key. In both modes `chords` lists the chords as
/// played in the target key, spelled per `options.spelling`, so in Nashville
/// mode the target key and spelling only affect that list.
pub fn render(text: &str, options: &RenderOptions) -> RenderedChart {
    let source = options.source_key.unwrap_or_default();
    let target = options.target_key.unwrap_or(source);
    let transpose_options = TransposeOptions {
        spelling: options.spelling,
        recognition: options.recognition,
    };

    let played = transpose_between(text, &source, &target, transpose_options);
    let rendered_text = match options.format {
        FormatMode::Standard => played.clone(),
        FormatMode::Nashville => chart_to_nashville(text, &source, options.recognition),
    };

    let chords = ParsedChart::parse_with(&played, options.recognition)
        .unique_chords
        .iter()
        .map(|symbol| ChordEntry::new(symbol))
        .collect();

    RenderedChart {
        source_key: source,
        target_key: target,
        format: options.format,
        sections: parse_sections(&rendered_text),
        text: rendered_text,
        chords,
    }
}

/// A chart split into metadata and body text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chart {
    pub metadata: ChartMetadata,
    pub body: String,
}

impl Chart {
    /// Parse a chart source, frontmatter included.
    pub fn load(source: &str) -> Result<Self, ChartError> {
        let (frontmatter, body) = split_frontmatter(source);
        let metadata = match frontmatter {
            Some(content) => ChartMetadata::from_yaml(&content)?,
            None => ChartMetadata::default(),
        };
        Ok(Self { metadata, body })
    }

    /// The chart's original key: metadata key, else C.
    pub fn default_key(&self) -> Key {
        self.metadata.key.unwrap_or_default()
    }

    /// Render with `options`, using the metadata key when no source key is given.
    pub fn render(&self, options: &RenderOptions) -> RenderedChart {
        let options = RenderOptions {
            source_key: Some(options.source_key.unwrap_or_else(|| self.default_key())),
            ..*options
        };
        render(&self.body, &options)
    }
}

/// Flat plain-text export of a rendered chart.
///
/// Metadata lines (title, artist, key, capo) come first, then a blank line,
/// then the sections with their header lines.
pub fn export_plain_text(rendered: &RenderedChart, metadata: Option<&ChartMetadata>) -> String {
    let mut lines: Vec<String> = Vec::new();
    if let Some(metadata) = metadata {
        if let Some(title) = &metadata.title {
            lines.push(title.clone());
        }
        if let Some(artist) = &metadata.artist {
            lines.push(artist.clone());
        }
    }

    match rendered.format {
        FormatMode::Standard => lines.push(format!("Key: {}", rendered.target_key)),
        FormatMode::Nashville => {
            lines.push(format!("Key: {} (Nashville)", rendered.source_key));
        }
    }
    if let Some(capo) = metadata.and_then(|m| m.capo) {
        lines.push(format!("Capo: {capo}"));
    }

    lines.push(String::new());
    lines.push(sections_to_text(&rendered.sections));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
