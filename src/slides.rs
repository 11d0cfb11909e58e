//! Lyric slides for presentation displays.
//!
//! A lyrics block is split into slides at blank-line boundaries, using the
//! same paragraph primitive as the section parser. [`lyrics_only`] strips a
//! chord chart down to its lyrics first; section headers become slide breaks.

use serde::Serialize;

use crate::section::{parse_header, split_paragraphs};
use crate::tokenizer::is_chord_line;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// 1-based position in the deck.
    pub number: usize,
    pub lines: Vec<String>,
}

/// Split a lyrics block into slides.
///
/// ```rust
/// use chordchart::slides::split_slides;
///
/// let slides = split_slides("Line one\nLine two\n\nLine three");
/// assert_eq!(slides.len(), 2);
/// assert_eq!(slides[1].lines, vec!["Line three"]);
/// ```
pub fn split_slides(text: &str) -> Vec<Slide> {
    split_paragraphs(text)
        .into_iter()
        .enumerate()
        .map(|(i, lines)| Slide {
            number: i + 1,
            lines: lines.into_iter().map(|line| line.trim_end().to_string()).collect(),
        })
        .collect()
}

/// Drop chord lines from a chart and turn header lines into blank lines.
pub fn lyrics_only(chart: &str) -> String {
    chart
        .lines()
        .filter(|line| !is_chord_line(line))
        .map(|line| if parse_header(line).is_some() { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slides straight from a chord chart.
pub fn chart_slides(chart: &str) -> Vec<Slide> {
    split_slides(&lyrics_only(chart))
}
