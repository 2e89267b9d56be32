//! Error types for the vectorwave-modwt crate.

/// Error type for all fallible operations in the MODWT crate.
///
/// Kernels never construct errors; the transform entry points are the
/// validation boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransformError {
    /// Returned when the input signal is empty.
    #[error("signal cannot be empty")]
    EmptySignal,

    /// Returned when the input contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the signal is shorter than the wavelet filter.
    #[error("signal too short: got {len} samples, filter needs at least {min}")]
    SignalTooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required (the filter length).
        min: usize,
    },

    /// Returned when coefficient sequences disagree in length.
    #[error("coefficient length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Returned when the requested decomposition level exceeds the maximum.
    #[error("level too high: requested {requested}, max for length {len} is {max}")]
    LevelTooHigh {
        /// Level that was requested.
        requested: usize,
        /// Maximum feasible level.
        max: usize,
        /// Length of the input signal.
        len: usize,
    },

    /// Returned when a continuous wavelet reaches a discrete transform.
    #[error("wavelet {0} has no discrete filter bank")]
    NotDiscrete(String),

    /// Returned when batch signals disagree in length.
    #[error("batch signal {index} has length {actual}, expected {expected}")]
    MixedBatchLengths {
        /// Index of the offending signal.
        index: usize,
        /// Length of the first signal.
        expected: usize,
        /// Length of the offending signal.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_signal() {
        assert_eq!(
            TransformError::EmptySignal.to_string(),
            "signal cannot be empty"
        );
    }

    #[test]
    fn error_signal_too_short() {
        let err = TransformError::SignalTooShort { len: 4, min: 8 };
        assert_eq!(
            err.to_string(),
            "signal too short: got 4 samples, filter needs at least 8"
        );
    }

    #[test]
    fn error_level_too_high() {
        let err = TransformError::LevelTooHigh {
            requested: 9,
            max: 6,
            len: 777,
        };
        assert_eq!(
            err.to_string(),
            "level too high: requested 9, max for length 777 is 6"
        );
    }

    #[test]
    fn error_not_discrete() {
        let err = TransformError::NotDiscrete("morl".into());
        assert_eq!(err.to_string(), "wavelet morl has no discrete filter bank");
    }

    #[test]
    fn error_mixed_batch_lengths() {
        let err = TransformError::MixedBatchLengths {
            index: 3,
            expected: 128,
            actual: 64,
        };
        assert_eq!(
            err.to_string(),
            "batch signal 3 has length 64, expected 128"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<TransformError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<TransformError>();
    }
}
