use std::fs;
use std::path::PathBuf;

use chordchart::slides::chart_slides;
use chordchart::{
    export_plain_text, Chart, ChartError, ChordRecognition, FormatMode, Key, RenderOptions,
    SpellingPolicy,
};
use clap::Parser;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err}");
            1
        }
    });
}

fn main_result() -> Result<(), ChartError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("chordchart=info"))
        .init();

    let args = CliArgs::parse();

    let source = fs::read_to_string(&args.input)
        .map_err(|e| ChartError::Io(format!("cannot read {:?}: {e}", args.input)))?;
    let chart = Chart::load(&source)?;

    let output = if args.slides {
        let slides = chart_slides(&chart.body);
        if args.json {
            serde_json::to_string_pretty(&slides)?
        } else {
            slides
                .iter()
                .map(|slide| slide.lines.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n")
        }
    } else {
        let options = RenderOptions {
            source_key: args.from.as_deref().map(str::parse::<Key>).transpose()?,
            target_key: args.to.as_deref().map(str::parse::<Key>).transpose()?,
            format: args.format.parse::<FormatMode>()?,
            spelling: if args.flats {
                SpellingPolicy::KeySignature
            } else {
                SpellingPolicy::Sharps
            },
            recognition: if args.chord_lines_only {
                ChordRecognition::ChordLines
            } else {
                ChordRecognition::Lexical
            },
        };
        let rendered = chart.render(&options);
        log::info!(
            "rendered {} section(s), {} distinct chord(s), {} -> {} ({})",
            rendered.sections.len(),
            rendered.chords.len(),
            rendered.source_key,
            rendered.target_key,
            rendered.format
        );
        if args.json {
            serde_json::to_string_pretty(&rendered)?
        } else {
            export_plain_text(&rendered, Some(&chart.metadata))
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .map_err(|e| ChartError::Io(format!("cannot write {path:?}: {e}")))?;
            log::info!("wrote {path:?}");
        }
        None => println!("{}", output.trim_end()),
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct CliArgs {
    /// Chord chart to read.
    input: PathBuf,
    /// Source key. Defaults to the chart's `key:` metadata, then C.
    #[arg(short, long)]
    from: Option<String>,
    /// Target key. Defaults to the source key.
    #[arg(short, long)]
    to: Option<String>,
    /// Output notation: standard or nashville.
    #[arg(long, default_value = "standard")]
    format: String,
    /// Spell transposed roots with flats when the target key uses them.
    #[arg(long, default_value_t = false)]
    flats: bool,
    /// Only rewrite lines made entirely of chords.
    #[arg(long, default_value_t = false)]
    chord_lines_only: bool,
    /// Emit JSON instead of plain text.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Emit lyric slides instead of the chart.
    #[arg(long, default_value_t = false)]
    slides: bool,
    /// Write to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}
