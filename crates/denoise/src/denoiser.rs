//! Batch wavelet denoising.

use tracing::debug;
use vectorwave_modwt::{BoundaryMode, MultiLevelModwt};
use vectorwave_wavelets::Wavelet;

use crate::config::DenoiseConfig;
use crate::error::DenoiseError;
use crate::noise::mad_sigma;
use crate::threshold::{apply_threshold, threshold_for};

/// Outcome of a batch denoise: the cleaned signal plus the noise estimate
/// and the per-level thresholds that produced it.
#[derive(Clone, Debug)]
pub struct DenoiseResult {
    signal: Vec<f64>,
    noise_sigma: f64,
    thresholds: Vec<f64>,
}

impl DenoiseResult {
    /// Returns the denoised signal.
    pub fn signal(&self) -> &[f64] {
        &self.signal
    }

    /// Returns the MAD noise estimate taken from the finest detail level.
    ///
    /// Zero for a constant finest level; the denoiser then degraded to a
    /// no-op rather than erroring.
    pub fn noise_sigma(&self) -> f64 {
        self.noise_sigma
    }

    /// Returns the threshold applied at each level (index 0 = level 1).
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Consumes the result, returning the denoised signal.
    pub fn into_signal(self) -> Vec<f64> {
        self.signal
    }
}

/// Multi-level MODWT threshold denoiser.
///
/// Pipeline: multi-level forward, noise estimation from the finest detail
/// level, per-level threshold selection, shrinkage of the detail
/// coefficients in place, multi-level inverse.
///
/// # Example
///
/// ```
/// use vectorwave_denoise::{DenoiseConfig, Denoiser};
/// use vectorwave_modwt::BoundaryMode;
/// use vectorwave_wavelets::get_wavelet;
///
/// let denoiser = Denoiser::new(
///     get_wavelet("db4").unwrap(),
///     BoundaryMode::Periodic,
///     DenoiseConfig::new(3),
/// )
/// .unwrap();
/// let noisy: Vec<f64> = (0..200).map(|i| (i as f64 * 0.2).sin()).collect();
/// let result = denoiser.denoise(&noisy).unwrap();
/// assert_eq!(result.signal().len(), 200);
/// ```
#[derive(Debug)]
pub struct Denoiser {
    transform: MultiLevelModwt,
    config: DenoiseConfig,
}

impl Denoiser {
    /// Creates a denoiser for the given wavelet and boundary mode.
    ///
    /// # Errors
    ///
    /// Returns a transform error for continuous wavelets.
    pub fn new(
        wavelet: Wavelet,
        boundary: BoundaryMode,
        config: DenoiseConfig,
    ) -> Result<Self, DenoiseError> {
        let transform = MultiLevelModwt::new(wavelet, boundary)?;
        Ok(Self { transform, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> DenoiseConfig {
        self.config
    }

    /// Denoises a signal.
    ///
    /// The decomposition depth is validated against the signal length; a
    /// constant finest detail level (zero noise estimate) short-circuits
    /// to a no-op reconstruction rather than an error.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`DenoiseError::Transform`] | empty/short/non-finite signal, level out of range |
    pub fn denoise(&self, signal: &[f64]) -> Result<DenoiseResult, DenoiseError> {
        self.denoise_with_sigma(signal, None)
    }

    /// Denoises a signal with an externally supplied noise level, used by
    /// the streaming denoiser's online estimator.
    pub(crate) fn denoise_with_sigma(
        &self,
        signal: &[f64],
        sigma_override: Option<f64>,
    ) -> Result<DenoiseResult, DenoiseError> {
        let decomposition = self.transform.decompose(signal, self.config.levels())?;
        let n = signal.len();
        let levels = decomposition.levels();

        let sigma = match sigma_override {
            Some(sigma) => sigma,
            None => mad_sigma(decomposition.detail(1).expect("level 1 exists")),
        };

        if sigma <= 0.0 {
            debug!("zero noise estimate, denoising degrades to a no-op");
            let signal = self.transform.reconstruct(&decomposition)?;
            return Ok(DenoiseResult {
                signal,
                noise_sigma: 0.0,
                thresholds: vec![0.0; levels],
            });
        }

        let mut mutable = decomposition.into_mutable();
        let mut thresholds = Vec::with_capacity(levels);
        for level in 1..=levels {
            let detail = mutable.detail_mut(level).expect("level in range");
            let threshold = threshold_for(self.config.method(), detail, sigma, n);
            apply_threshold(detail, threshold, self.config.threshold_type());
            thresholds.push(threshold);
        }

        let signal = self.transform.reconstruct(&mutable.freeze())?;
        Ok(DenoiseResult {
            signal,
            noise_sigma: sigma,
            thresholds,
        })
    }
}
