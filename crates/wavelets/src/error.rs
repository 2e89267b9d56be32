//! Error types for the vectorwave-wavelets crate.

/// Error type for all fallible operations in the wavelet catalog.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Returned when a wavelet name is not present in the catalog.
    #[error("unknown wavelet: {0}")]
    UnknownWavelet(String),

    /// Returned when a family constructor receives an unsupported order.
    #[error("unsupported {family} order: {order}")]
    UnsupportedOrder {
        /// Wavelet family name.
        family: &'static str,
        /// Order that was requested.
        order: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_wavelet() {
        let err = WaveletError::UnknownWavelet("db99".into());
        assert_eq!(err.to_string(), "unknown wavelet: db99");
    }

    #[test]
    fn error_unsupported_order() {
        let err = WaveletError::UnsupportedOrder {
            family: "daubechies",
            order: 7,
        };
        assert_eq!(err.to_string(), "unsupported daubechies order: 7");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<WaveletError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<WaveletError>();
    }
}
