//! Error types for the demeter-soilwater crate.

use std::path::PathBuf;

use crate::date::DateKey;

/// Error type for all fallible operations in the demeter-soilwater crate.
#[derive(Debug, thiserror::Error)]
pub enum SoilWaterError {
    /// Returned when a file path does not carry a recognized extension.
    #[error("unsupported file extension on '{}' (expected vswc, vswd, or rzsw)", path.display())]
    UnsupportedExtension {
        /// The offending path.
        path: PathBuf,
    },

    /// Returned when a file cannot be opened, read, or written.
    #[error("i/o error on '{}': {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying i/o error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a file row cannot be parsed.
    #[error("{}:{line}: malformed row: {reason}", path.display())]
    Malformed {
        /// The file being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a date token is not in `YYYY-DOY` form.
    #[error("invalid date key '{token}' (expected YYYY-DOY)")]
    InvalidDate {
        /// The offending token.
        token: String,
    },

    /// Returned when a row is inserted with the wrong number of values.
    #[error("row for layer {depth} cm has {got} values, expected {expected}")]
    RowLength {
        /// Layer bottom depth (cm).
        depth: u32,
        /// Number of values supplied.
        got: usize,
        /// Number of date columns in the table.
        expected: usize,
    },

    /// Returned when per-layer field capacity data has no entry for a
    /// measured layer.
    #[error("no field capacity defined for soil layer at {depth} cm")]
    MissingFieldCapacity {
        /// Layer bottom depth (cm).
        depth: u32,
    },

    /// Returned when root-zone derivation runs before the deficit table is
    /// populated.
    #[error("deficit table is empty; load or derive soil water deficit data first")]
    DeficitNotComputed,

    /// Returned when the content table lacks a value the root-zone
    /// derivation needs.
    #[error("content table has no value for layer {depth} cm on {date}")]
    MissingContent {
        /// Layer bottom depth (cm).
        depth: u32,
        /// Measurement date.
        date: DateKey,
    },

    /// Returned when the maximum root depth reaches below the deepest
    /// measured soil layer.
    #[error("maximum root depth {zr_max} m extends below the deepest soil layer at {deepest} cm")]
    RootBeyondProfile {
        /// Configured maximum root depth (m).
        zr_max: f64,
        /// Deepest layer bottom depth (cm).
        deepest: u32,
    },
}
