//! Integration tests for the chord chart engine
//!
//! Exercises the public API end to end: chart text in, sections, re-notated
//! text, chord lists and diagrams out.

use chordchart::diagram::DEFAULT_SHAPE;
use chordchart::tokenizer::extract_chords;
use chordchart::{
    diagram, export_chart, extract_unique_chords, parse_sections, render_chart, split_slides,
    to_nashville, transpose, ChartError, Chord, ChordRecognition, FormatMode, Key,
    RenderOptions, SectionKind, KEY_LABELS,
};

const AMAZING_GRACE: &str = r#"---
title: Amazing Grace
artist: John Newton
key: G
---
Verse 1:
G              C         G
Amazing grace, how sweet the sound
G                  D
that saved a wretch like me

Chorus:
G           G7        C        G
I once was lost, but now am found
Em        D        G
was blind but now I see
"#;

fn roots(text: &str) -> Vec<u8> {
    extract_chords(text)
        .iter()
        .filter_map(|symbol| Chord::parse(symbol))
        .map(|chord| chord.root)
        .collect()
}

#[test]
fn test_transpose_same_key_is_identity() {
    for label in KEY_LABELS {
        assert_eq!(transpose(AMAZING_GRACE, label, label), AMAZING_GRACE);
    }
}

#[test]
fn test_twelve_single_steps_restore_spelling() {
    let mut chart = "C  D#m  F#7  Asus4  B".to_string();
    let labels: Vec<&str> = KEY_LABELS.iter().copied().chain(["C"]).collect();
    for pair in labels.windows(2) {
        chart = transpose(&chart, pair[0], pair[1]);
    }
    assert_eq!(chart, "C  D#m  F#7  Asus4  B");
}

#[test]
fn test_transpose_there_and_back_restores_pitch_classes() {
    for (from, to) in [("G", "Bb"), ("E", "C#/Db"), ("F", "B")] {
        let there = transpose(AMAZING_GRACE, from, to);
        let back = transpose(&there, to, from);
        assert_eq!(roots(&back), roots(AMAZING_GRACE));
    }
}

#[test]
fn test_nashville_is_deterministic() {
    let key: Key = "G".parse().unwrap();
    for symbol in ["G", "C", "D7", "Em", "Bb", "F#dim"] {
        assert_eq!(to_nashville(symbol, &key), to_nashville(symbol, &key));
    }
}

#[test]
fn test_parse_sections_examples() {
    let sections = parse_sections("Verse:\nA B\nChorus:\nC D");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].kind, SectionKind::Verse);
    assert_eq!(sections[0].content, vec!["A B"]);
    assert_eq!(sections[1].kind, SectionKind::Chorus);
    assert_eq!(sections[1].content, vec!["C D"]);

    let sections = parse_sections("just some text");
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].kind, SectionKind::Verse);
    assert_eq!(sections[0].content, vec!["just some text"]);
}

#[test]
fn test_extract_unique_chords_example() {
    assert_eq!(extract_unique_chords("G D G D G D"), vec!["G", "D"]);
}

#[test]
fn test_diagram_examples() {
    assert_eq!(diagram("G").shape, "320003");

    let unmapped = diagram("F#dim7");
    assert_eq!(unmapped.shape, DEFAULT_SHAPE);
    assert_eq!(unmapped.name, "F#dim7");
}

#[test]
fn test_render_full_chart() {
    let options = RenderOptions {
        target_key: Some("A".parse().unwrap()),
        recognition: ChordRecognition::ChordLines,
        ..RenderOptions::default()
    };
    let rendered = render_chart(AMAZING_GRACE, &options).unwrap();

    assert_eq!(rendered.source_key.tonic(), 7);
    assert_eq!(rendered.sections.len(), 2);
    assert_eq!(rendered.sections[0].label(), "Verse 1");
    assert_eq!(rendered.sections[1].label(), "Chorus");
    assert_eq!(rendered.sections[0].content[0], "A              D         A");
    // blank separator line stays with the verse
    assert_eq!(rendered.sections[0].content[4], "");

    let symbols: Vec<&str> = rendered.chords.iter().map(|c| c.symbol.as_str()).collect();
    assert!(symbols.starts_with(&["A", "D", "E"]));
    assert!(symbols.contains(&"A7"));
    assert!(symbols.contains(&"F#m"));
    for entry in &rendered.chords {
        assert_eq!(entry.diagram.name, entry.symbol);
    }
}

#[test]
fn test_render_nashville_chart() {
    let options = RenderOptions {
        format: FormatMode::Nashville,
        target_key: Some("D".parse().unwrap()),
        ..RenderOptions::default()
    };
    let rendered = render_chart(AMAZING_GRACE, &options).unwrap();
    assert_eq!(rendered.sections[1].content[0], "1           17        4        1");
    assert_eq!(rendered.sections[1].content[2], "6m        5        1");
}

#[test]
fn test_export_chart() {
    let text = export_chart(AMAZING_GRACE, &RenderOptions::default()).unwrap();
    assert!(text.starts_with("Amazing Grace\nJohn Newton\nKey: G\n\nVerse 1:\n"));
    assert!(text.contains("\nChorus:\n"));
}

#[test]
fn test_bad_frontmatter_is_reported() {
    let err = render_chart("---\nkey: Q\n---\nG", &RenderOptions::default()).unwrap_err();
    assert_eq!(err, ChartError::InvalidKey("Q".to_string()));
}

#[test]
fn test_leading_divider_renders_as_chart_text() {
    let options = RenderOptions {
        source_key: Some("G".parse().unwrap()),
        target_key: Some("A".parse().unwrap()),
        ..RenderOptions::default()
    };
    let rendered = render_chart("---\nG   C\n---\nla la\n", &options).unwrap();
    assert_eq!(rendered.text, "---\nA   D\n---\nla la\n");
}

#[test]
fn test_slides_from_lyrics() {
    let slides = split_slides("Amazing grace\nhow sweet the sound\n\nI once was lost");
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].lines.len(), 2);
}

#[test]
fn test_rendered_chart_serializes() {
    let rendered = render_chart("G  C\n", &RenderOptions::default()).unwrap();
    let json = serde_json::to_value(&rendered).unwrap();
    assert_eq!(json["format"], "standard");
    assert_eq!(json["chords"][0]["symbol"], "G");
    assert_eq!(json["chords"][0]["diagram"]["shape"], "320003");
    assert_eq!(json["sections"][0]["kind"], "verse");
}
