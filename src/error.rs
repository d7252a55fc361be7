//! # Error Types
//!
//! This module defines all error types for the fretmap engine.
//!
//! Only malformed symbolic input (unparseable note names, unknown chord or
//! scale symbols, an empty tuning) is reported as an error. Geometrically
//! infeasible requests — a 7-tone arpeggio on a 4-string bass, a box index
//! beyond the available root occurrences — return empty results from the
//! search functions instead, since those are common, expected edges.
//!
//! ## Usage
//! ```rust
//! use fretmap::{PitchClass, FretError};
//!
//! match PitchClass::parse("H#") {
//!     Ok(pc) => println!("chroma {}", pc.value()),
//!     Err(FretError::InvalidNoteName(name)) => {
//!         eprintln!("not a note name: {}", name);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretError {
    /// An unrecognized note-name spelling reached the pitch model.
    ///
    /// Never silently coerced to a default pitch.
    ///
    /// # Example
    /// ```
    /// # use fretmap::FretError;
    /// let err = FretError::InvalidNoteName("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: 'H'");
    /// ```
    #[error("Invalid note name: '{0}'")]
    InvalidNoteName(String),

    /// A chord symbol whose root or quality could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use fretmap::FretError;
    /// let err = FretError::InvalidChordSymbol("Cmaj42".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord symbol: 'Cmaj42'");
    /// ```
    #[error("Invalid chord symbol: '{0}'")]
    InvalidChordSymbol(String),

    /// A scale name that is not in the scale catalog.
    #[error("Unknown scale: '{0}'")]
    UnknownScale(String),

    /// An instrument tuning that cannot be used for any computation,
    /// e.g. an empty string list.
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// An instrument description (YAML) that could not be read.
    #[error("Invalid instrument config: {0}")]
    InstrumentConfig(String),
}
