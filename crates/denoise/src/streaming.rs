//! Streaming denoiser with online noise estimation.

use vectorwave_modwt::{BoundaryMode, Modwt};
use vectorwave_wavelets::Wavelet;

use crate::config::StreamingDenoiseConfig;
use crate::denoiser::Denoiser;
use crate::error::DenoiseError;
use crate::noise::NoiseEstimator;

/// Block-by-block denoiser that carries noise state across blocks.
///
/// Each block runs the batch pipeline, but the threshold scale comes from
/// an online estimator fed with the most recent finest-scale detail
/// magnitudes (a bounded ring), so the noise level survives across block
/// boundaries and, in adaptive mode, tracks drift.
///
/// # Example
///
/// ```
/// use vectorwave_denoise::{StreamingDenoiseConfig, StreamingDenoiser};
/// use vectorwave_modwt::BoundaryMode;
/// use vectorwave_wavelets::get_wavelet;
///
/// let mut denoiser = StreamingDenoiser::new(
///     get_wavelet("db4").unwrap(),
///     BoundaryMode::Periodic,
///     StreamingDenoiseConfig::new(2).with_noise_window_size(512),
/// )
/// .unwrap();
/// let block: Vec<f64> = (0..256).map(|i| (i as f64 * 0.1).sin()).collect();
/// let cleaned = denoiser.denoise(&block).unwrap();
/// assert_eq!(cleaned.len(), 256);
/// assert_eq!(denoiser.samples_processed(), 256);
/// ```
#[derive(Debug)]
pub struct StreamingDenoiser {
    denoiser: Denoiser,
    level_one: Modwt,
    estimator: NoiseEstimator,
    threshold_multiplier: f64,
    samples_processed: u64,
}

impl StreamingDenoiser {
    /// Creates a streaming denoiser.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`DenoiseError::Transform`] | continuous wavelet |
    /// | [`DenoiseError::InvalidMultiplier`] | non-positive or non-finite multiplier |
    /// | [`DenoiseError::ZeroNoiseWindow`] | zero noise window size |
    pub fn new(
        wavelet: Wavelet,
        boundary: BoundaryMode,
        config: StreamingDenoiseConfig,
    ) -> Result<Self, DenoiseError> {
        let multiplier = config.threshold_multiplier();
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(DenoiseError::InvalidMultiplier(multiplier));
        }
        if config.noise_window_size() == 0 {
            return Err(DenoiseError::ZeroNoiseWindow);
        }
        let level_one = Modwt::new(wavelet.clone(), boundary)?;
        let denoiser = Denoiser::new(wavelet, boundary, config.base())?;
        Ok(Self {
            denoiser,
            level_one,
            estimator: NoiseEstimator::new(config.noise_estimation(), config.noise_window_size()),
            threshold_multiplier: multiplier,
            samples_processed: 0,
        })
    }

    /// Denoises one block, updating the noise state first.
    ///
    /// # Errors
    ///
    /// Returns [`DenoiseError::Transform`] for invalid blocks (empty,
    /// shorter than the filter, non-finite, or too short for the
    /// configured depth).
    pub fn denoise(&mut self, block: &[f64]) -> Result<Vec<f64>, DenoiseError> {
        let first_level = self.level_one.forward(block)?;
        self.estimator.update(first_level.detail());

        let sigma = self.estimator.current() * self.threshold_multiplier;
        let result = self.denoiser.denoise_with_sigma(block, Some(sigma))?;

        self.samples_processed += block.len() as u64;
        Ok(result.into_signal())
    }

    /// Returns the current online noise estimate (before the multiplier).
    pub fn current_noise_level(&self) -> f64 {
        self.estimator.current()
    }

    /// Returns the total samples denoised so far.
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }
}
