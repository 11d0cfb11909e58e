//! # Chord Diagram Renderer
//!
//! Fretboard descriptions for chord symbols.
//!
//! Shapes are six characters, one per string from low E to high E:
//! `x` = muted, `0` = open, `1`-`9` = fretted at that fret. G major is
//! `320003`.
//!
//! ## Lookup
//! 1. the symbol exactly as written
//! 2. the symbol rebuilt from its quality's canonical suffix (`Cmaj` -> `C`)
//! 3. the same two with the root re-spelled with sharps (`Gb` -> `F#`)
//!
//! A symbol that matches none of these gets the default `x00000` shape,
//! captioned with its own name. Lookup never fails.
//!
//! ## Output
//! [`ChordDiagram`] is a vector description (strings, frets, markers and
//! caption). [`ChordDiagram::to_svg`] renders it as an SVG document; nothing
//! here rasterizes.

use serde::Serialize;

use crate::chord::Chord;
use crate::key::Spelling;

/// Shape used for chords missing from the table.
pub const DEFAULT_SHAPE: &str = "x00000";

pub const STRING_COUNT: usize = 6;

/// Frets shown in a diagram at minimum
const MIN_FRET_SPAN: u8 = 4;

/// Open-position (and a few barre) shapes for common chords.
fn shape_for(symbol: &str) -> Option<&'static str> {
    let shape = match symbol {
        // C
        "C" => "x32010",
        "Cm" => "x35543",
        "C7" => "x32310",
        "Cmaj7" => "x32000",
        "Csus2" => "x30010",
        "Csus4" => "x33010",
        "Caug" => "x32110",
        "Cdim" => "x3454x",
        "C#" => "x46664",
        "C#m" => "x46654",

        // D
        "D" => "xx0232",
        "Dm" => "xx0231",
        "D7" => "xx0212",
        "Dm7" => "xx0211",
        "Dmaj7" => "xx0222",
        "Dsus2" => "xx0230",
        "Dsus4" => "xx0233",
        "D#" => "x68886",

        // E
        "E" => "022100",
        "Em" => "022000",
        "E7" => "020100",
        "Em7" => "022030",
        "Emaj7" => "021100",
        "Esus4" => "022200",

        // F
        "F" => "133211",
        "Fm" => "133111",
        "F7" => "131211",
        "Fmaj7" => "xx3210",
        "F#" => "244322",
        "F#m" => "244222",
        "F#7" => "242322",

        // G
        "G" => "320003",
        "Gm" => "355333",
        "G7" => "320001",
        "Gmaj7" => "320002",
        "G6" => "320000",
        "Gsus4" => "330013",
        "G#" => "466544",
        "G#m" => "466444",

        // A
        "A" => "x02220",
        "Am" => "x02210",
        "A7" => "x02020",
        "Am7" => "x02010",
        "Amaj7" => "x02120",
        "Asus2" => "x02200",
        "Asus4" => "x02230",
        "A#" => "x13331",
        "A#m" => "x13321",

        // B
        "B" => "x24442",
        "Bm" => "x24432",
        "B7" => "x21202",
        "Bm7" => "x20202",
        "Bdim" => "x2343x",

        _ => return None,
    };
    Some(shape)
}

/// What one string does in a chord shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "fret")]
pub enum StringState {
    Muted,
    Open,
    Fretted(u8),
}

impl StringState {
    fn from_char(c: char) -> Self {
        match c {
            '0' => Self::Open,
            '1'..='9' => Self::Fretted(c as u8 - b'0'),
            _ => Self::Muted,
        }
    }
}

/// A finger position on the fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretMarker {
    /// Guitar string number, 6 = low E, 1 = high E.
    pub string: u8,
    /// Absolute fret.
    pub fret: u8,
    /// Fret row within the diagram window, starting at 1.
    pub row: u8,
}

/// Fretboard diagram for one chord
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDiagram {
    /// Caption, always the symbol that was asked for.
    pub name: String,
    pub shape: String,
    /// Low E first.
    pub strings: Vec<StringState>,
    /// Fret shown at the top row. 1 means the nut is drawn.
    pub base_fret: u8,
    pub fret_span: u8,
    /// False when the default shape stands in for an unmapped chord.
    pub known: bool,
}

impl ChordDiagram {
    fn from_shape(name: &str, shape: &str, known: bool) -> Self {
        let strings: Vec<StringState> = shape.chars().map(StringState::from_char).collect();
        let frets = strings.iter().filter_map(|s| match s {
            StringState::Fretted(n) => Some(*n),
            _ => None,
        });
        let (lowest, highest) = frets.fold((u8::MAX, 0), |(lo, hi), f| (lo.min(f), hi.max(f)));

        let base_fret = if highest <= MIN_FRET_SPAN { 1 } else { lowest };
        let fret_span = if highest == 0 {
            MIN_FRET_SPAN
        } else {
            (highest - base_fret + 1).max(MIN_FRET_SPAN)
        };

        Self {
            name: name.to_string(),
            shape: shape.to_string(),
            strings,
            base_fret,
            fret_span,
            known,
        }
    }

    /// Fretted positions, low E first.
    pub fn markers(&self) -> Vec<FretMarker> {
        self.strings
            .iter()
            .enumerate()
            .filter_map(|(i, state)| match state {
                StringState::Fretted(fret) => Some(FretMarker {
                    string: (STRING_COUNT - i) as u8,
                    fret: *fret,
                    row: fret - self.base_fret + 1,
                }),
                _ => None,
            })
            .collect()
    }

    /// Render the diagram as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        const LEFT: u32 = 20;
        const TOP: u32 = 34;
        const STRING_GAP: u32 = 14;
        const FRET_GAP: u32 = 18;

        let width = LEFT * 2 + STRING_GAP * (STRING_COUNT as u32 - 1);
        let bottom = TOP + FRET_GAP * u32::from(self.fret_span);
        let height = bottom + 12;
        let right = LEFT + STRING_GAP * (STRING_COUNT as u32 - 1);

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        ));

        // Caption
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"14\" text-anchor=\"middle\" font-size=\"12\">{}</text>\n",
            width / 2,
            escape_xml(&self.name)
        ));

        // Nut or starting fret
        if self.base_fret == 1 {
            svg.push_str(&format!(
                "  <line x1=\"{LEFT}\" y1=\"{TOP}\" x2=\"{right}\" y2=\"{TOP}\" stroke=\"black\" stroke-width=\"4\"/>\n"
            ));
        } else {
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\">{}fr</text>\n",
                LEFT - 4,
                TOP + FRET_GAP / 2 + 4,
                self.base_fret
            ));
        }

        // Frets
        for row in 0..=u32::from(self.fret_span) {
            let y = TOP + row * FRET_GAP;
            svg.push_str(&format!(
                "  <line x1=\"{LEFT}\" y1=\"{y}\" x2=\"{right}\" y2=\"{y}\" stroke=\"black\"/>\n"
            ));
        }

        // Strings and open/muted indicators
        for (i, state) in self.strings.iter().enumerate() {
            let x = LEFT + STRING_GAP * i as u32;
            svg.push_str(&format!(
                "  <line x1=\"{x}\" y1=\"{TOP}\" x2=\"{x}\" y2=\"{bottom}\" stroke=\"black\"/>\n"
            ));
            match state {
                StringState::Open => svg.push_str(&format!(
                    "  <circle cx=\"{x}\" cy=\"{}\" r=\"4\" fill=\"none\" stroke=\"black\"/>\n",
                    TOP - 8
                )),
                StringState::Muted => svg.push_str(&format!(
                    "  <text x=\"{x}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\">x</text>\n",
                    TOP - 4
                )),
                StringState::Fretted(_) => {}
            }
        }

        // Finger dots
        for marker in self.markers() {
            let i = STRING_COUNT as u32 - u32::from(marker.string);
            let x = LEFT + STRING_GAP * i;
            let y = TOP + FRET_GAP * u32::from(marker.row) - FRET_GAP / 2;
            svg.push_str(&format!(
                "  <circle cx=\"{x}\" cy=\"{y}\" r=\"5\" fill=\"black\"/>\n"
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Diagram for a chord symbol, falling back to [`DEFAULT_SHAPE`].
///
/// ```rust
/// use chordchart::diagram::diagram;
///
/// assert_eq!(diagram("G").shape, "320003");
///
/// let unknown = diagram("F#dim7");
/// assert_eq!(unknown.shape, "x00000");
/// assert_eq!(unknown.name, "F#dim7");
/// ```
pub fn diagram(symbol: &str) -> ChordDiagram {
    match lookup_shape(symbol) {
        Some(shape) => ChordDiagram::from_shape(symbol, shape, true),
        None => {
            log::debug!("no diagram for {symbol:?}, using default shape");
            ChordDiagram::from_shape(symbol, DEFAULT_SHAPE, false)
        }
    }
}

fn lookup_shape(symbol: &str) -> Option<&'static str> {
    if let Some(shape) = shape_for(symbol) {
        return Some(shape);
    }
    let chord = Chord::parse(symbol)?;
    let sharp = chord.with_root(chord.root, Spelling::Sharps);
    let candidates = [
        chord.canonical_symbol(),
        Some(sharp.to_string()),
        sharp.canonical_symbol(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| shape_for(&candidate))
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_shapes() {
        let g = diagram("G");
        assert_eq!(g.shape, "320003");
        assert_eq!(g.name, "G");
        assert!(g.known);
        assert_eq!(
            g.strings,
            vec![
                StringState::Fretted(3),
                StringState::Fretted(2),
                StringState::Open,
                StringState::Open,
                StringState::Open,
                StringState::Fretted(3),
            ]
        );
        assert_eq!(g.base_fret, 1);
        assert_eq!(g.fret_span, 4);
    }

    #[test]
    fn test_unmapped_uses_default() {
        let d = diagram("F#dim7");
        assert_eq!(d.shape, DEFAULT_SHAPE);
        assert_eq!(d.name, "F#dim7");
        assert!(!d.known);
        assert_eq!(d.strings[0], StringState::Muted);
        assert!(d.markers().is_empty());
    }

    #[test]
    fn test_non_chord_uses_default() {
        let d = diagram("N.C.");
        assert_eq!(d.shape, DEFAULT_SHAPE);
        assert_eq!(d.name, "N.C.");
    }

    #[test]
    fn test_lookup_fallbacks() {
        // Canonical suffix
        assert_eq!(diagram("Amin").shape, "x02210");
        assert_eq!(diagram("Cmaj").shape, "x32010");
        // Enharmonic root
        assert_eq!(diagram("Gb").shape, "244322");
        assert_eq!(diagram("Dbm").shape, "x46654");
        // Caption keeps the asked-for name
        assert_eq!(diagram("Bb").name, "Bb");
        assert_eq!(diagram("Bb").shape, "x13331");
    }

    #[test]
    fn test_markers() {
        let c = diagram("C");
        let markers = c.markers();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0], FretMarker { string: 5, fret: 3, row: 3 });
        assert_eq!(markers[2], FretMarker { string: 2, fret: 1, row: 1 });
    }

    #[test]
    fn test_high_position_window() {
        let d = diagram("D#");
        assert_eq!(d.base_fret, 6);
        assert_eq!(d.fret_span, 4);
        let rows: Vec<u8> = d.markers().iter().map(|m| m.row).collect();
        assert_eq!(rows, vec![1, 3, 3, 3, 1]);
    }

    #[test]
    fn test_svg_output() {
        let svg = diagram("Am").to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Am</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
        // three fretted strings
        assert_eq!(svg.matches("fill=\"black\"").count(), 3);

        let svg = diagram("C<b>").to_svg();
        assert!(svg.contains("C&lt;b&gt;"));
    }

    #[test]
    fn test_svg_base_fret_label() {
        let svg = diagram("D#").to_svg();
        assert!(svg.contains(">6fr</text>"));
    }
}
