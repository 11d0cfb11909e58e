//! # Error Types
//!
//! The engine itself is total: malformed chords, unknown keys and empty charts
//! degrade to pass-through output instead of failing. `ChartError` covers the
//! layers around it that can genuinely fail:
//!
//! - `Metadata` - frontmatter YAML that does not parse
//! - `InvalidKey` - a key label outside the twelve-key table
//! - `InvalidFormat` - an unknown format mode name
//! - `Io` / `Json` - reading charts and writing results from the CLI
//!
//! ## Usage
//! ```rust
//! use chordchart::{ChartError, Key};
//!
//! match "H".parse::<Key>() {
//!     Ok(key) => println!("key {}", key.label()),
//!     Err(ChartError::InvalidKey(label)) => eprintln!("no such key: {label}"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Frontmatter that is not valid YAML or has the wrong shape.
    ///
    /// # Example
    /// ```
    /// # use chordchart::ChartError;
    /// let err = ChartError::Metadata("tempo: invalid type".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: tempo: invalid type");
    /// ```
    #[error("Invalid metadata: {0}")]
    Metadata(String),

    /// A key label that does not name one of the twelve keys.
    ///
    /// # Example
    /// ```
    /// # use chordchart::ChartError;
    /// let err = ChartError::InvalidKey("H".to_string());
    /// assert_eq!(err.to_string(), "Unknown key: H");
    /// ```
    #[error("Unknown key: {0}")]
    InvalidKey(String),

    #[error("Unknown format mode: {0} (expected standard or nashville)")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<io::Error> for ChartError {
    fn from(error: io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
