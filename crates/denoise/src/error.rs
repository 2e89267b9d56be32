//! Error types for the vectorwave-denoise crate.

use vectorwave_modwt::TransformError;

/// Error type for denoising operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DenoiseError {
    /// A transform-layer failure (validation, level range, wavelet kind).
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Returned when the threshold multiplier is non-positive or non-finite.
    #[error("threshold multiplier must be positive and finite, got {0}")]
    InvalidMultiplier(f64),

    /// Returned when the noise window size is zero.
    #[error("noise window size must be at least 1")]
    ZeroNoiseWindow,
}
