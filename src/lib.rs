pub mod chart;
pub mod chord;
pub mod diagram;
pub mod error;
pub mod key;
pub mod metadata;
pub mod nashville;
pub mod section;
pub mod slides;
pub mod tokenizer;
pub mod transpose;

pub use chart::{
    export_plain_text, render, Chart, ChordEntry, FormatMode, RenderOptions, RenderedChart,
};
pub use chord::{Chord, ChordQuality};
pub use diagram::{diagram, ChordDiagram};
pub use error::*;
pub use key::{Key, KEY_LABELS};
pub use metadata::ChartMetadata;
pub use nashville::{to_nashville, NashvilleChord};
pub use section::{parse_sections, ChartSection, ParsedChart, SectionKind};
pub use slides::{split_slides, Slide};
pub use tokenizer::{extract_unique_chords, ChordRecognition};
pub use transpose::{transpose, SpellingPolicy};

/// Load a chart source (frontmatter included) and render it.
/// This is the main entry point for the library.
pub fn render_chart(source: &str, options: &RenderOptions) -> Result<RenderedChart, ChartError> {
    let chart = Chart::load(source)?;
    Ok(chart.render(options))
}

/// Load, render and export a chart as plain text in one step.
pub fn export_chart(source: &str, options: &RenderOptions) -> Result<String, ChartError> {
    let chart = Chart::load(source)?;
    let rendered = chart.render(options);
    Ok(export_plain_text(&rendered, Some(&chart.metadata)))
}
