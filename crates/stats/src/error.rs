//! Error types for the demeter-stats crate.

/// Error type for all fallible operations in the demeter-stats crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StatsError {
    /// Returned when either input series is empty.
    #[error("input series is empty")]
    EmptyInput,

    /// Returned when the measured and modeled series differ in length.
    #[error("length mismatch: measured has {meas_len} elements, modeled has {modeled_len}")]
    LengthMismatch {
        /// Length of the measured series.
        meas_len: usize,
        /// Length of the modeled series.
        modeled_len: usize,
    },

    /// Returned when the measured mean is zero, which leaves the percent
    /// bias undefined.
    #[error("measured series has zero mean; percent bias is undefined")]
    ZeroMeanMeasured,
}
