//! # Chart Metadata
//!
//! Optional YAML frontmatter at the top of a chart:
//!
//! ```text
//! ---
//! title: Amazing Grace
//! artist: John Newton
//! key: G
//! tempo: 72
//! capo: 2
//! ---
//! Verse 1:
//! G        C      G
//! Amazing grace how sweet the sound
//! ```
//!
//! The block must open on the first non-blank line and hold a YAML mapping
//! with at least one known field. Anything else between two `---` lines is a
//! chart divider and stays chart text. Charts without a block get default
//! (empty) metadata. `key` names the chart's original key, which is
//! the default transposition source and the Nashville reference.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::key::Key;

const FIELDS: [&str; 5] = ["title", "artist", "key", "tempo", "capo"];

/// Raw frontmatter as written
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawMetadata {
    title: Option<String>,
    artist: Option<String>,
    key: Option<String>,
    tempo: Option<u16>,
    capo: Option<u8>,
}

/// Validated chart metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capo: Option<u8>,
}

impl ChartMetadata {
    /// Parse the YAML between the `---` markers.
    pub fn from_yaml(content: &str) -> Result<Self, ChartError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawMetadata =
            serde_yaml::from_str(content).map_err(|e| ChartError::Metadata(e.to_string()))?;

        let key = raw.key.as_deref().map(str::parse::<Key>).transpose()?;

        Ok(Self {
            title: raw.title,
            artist: raw.artist,
            key,
            tempo: raw.tempo,
            capo: raw.capo,
        })
    }
}

/// Split a leading `---` frontmatter block from the chart body.
///
/// Returns the YAML content (without markers) and the remaining text. An
/// unterminated block, or one that is not a metadata mapping, is treated as
/// chart text.
pub fn split_frontmatter(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.lines().collect();

    let Some(start) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return (None, source.to_string());
    };
    if lines[start].trim() != "---" {
        return (None, source.to_string());
    }

    let Some(end) = lines[start + 1..]
        .iter()
        .position(|line| line.trim() == "---")
        .map(|offset| start + 1 + offset)
    else {
        return (None, source.to_string());
    };

    let content = lines[start + 1..end].join("\n");
    if !is_metadata_block(&content) {
        log::debug!("leading `---` block is not metadata, keeping it as chart text");
        return (None, source.to_string());
    }
    let mut body = lines[end + 1..].join("\n");
    if source.ends_with('\n') && !body.is_empty() {
        body.push('\n');
    }
    (Some(content), body)
}

fn is_metadata_block(content: &str) -> bool {
    if content.trim().is_empty() {
        return true;
    }
    match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(serde_yaml::Value::Mapping(map)) => map
            .keys()
            .filter_map(serde_yaml::Value::as_str)
            .any(|field| FIELDS.contains(&field)),
        _ => false,
    }
}
