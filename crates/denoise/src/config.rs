//! Denoiser configuration records.

use crate::noise::NoiseEstimation;
use crate::threshold::{ThresholdMethod, ThresholdType};

/// Configuration for batch denoising.
///
/// # Example
///
/// ```
/// use vectorwave_denoise::{DenoiseConfig, ThresholdMethod, ThresholdType};
///
/// let config = DenoiseConfig::new(4)
///     .with_method(ThresholdMethod::Sure)
///     .with_threshold_type(ThresholdType::Hard);
/// assert_eq!(config.levels(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DenoiseConfig {
    levels: usize,
    method: ThresholdMethod,
    threshold_type: ThresholdType,
}

impl DenoiseConfig {
    /// Creates a configuration with the given decomposition depth.
    ///
    /// Defaults: `method = Universal`, `threshold_type = Soft`.
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            method: ThresholdMethod::Universal,
            threshold_type: ThresholdType::Soft,
        }
    }

    /// Sets the threshold selection method.
    pub fn with_method(mut self, method: ThresholdMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the shrinkage type.
    pub fn with_threshold_type(mut self, threshold_type: ThresholdType) -> Self {
        self.threshold_type = threshold_type;
        self
    }

    /// Returns the decomposition depth.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Returns the threshold selection method.
    pub fn method(&self) -> ThresholdMethod {
        self.method
    }

    /// Returns the shrinkage type.
    pub fn threshold_type(&self) -> ThresholdType {
        self.threshold_type
    }
}

/// Configuration for streaming denoising.
///
/// Extends [`DenoiseConfig`] with the online noise-estimation state:
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `noise_estimation` | `Mad` |
/// | `noise_window_size` | 1024 |
/// | `threshold_multiplier` | 1.0 |
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamingDenoiseConfig {
    base: DenoiseConfig,
    noise_estimation: NoiseEstimation,
    noise_window_size: usize,
    threshold_multiplier: f64,
}

impl StreamingDenoiseConfig {
    /// Creates a streaming configuration with the given depth.
    pub fn new(levels: usize) -> Self {
        Self {
            base: DenoiseConfig::new(levels),
            noise_estimation: NoiseEstimation::Mad,
            noise_window_size: 1024,
            threshold_multiplier: 1.0,
        }
    }

    /// Sets the threshold selection method.
    pub fn with_method(mut self, method: ThresholdMethod) -> Self {
        self.base = self.base.with_method(method);
        self
    }

    /// Sets the shrinkage type.
    pub fn with_threshold_type(mut self, threshold_type: ThresholdType) -> Self {
        self.base = self.base.with_threshold_type(threshold_type);
        self
    }

    /// Sets the online noise estimation method.
    pub fn with_noise_estimation(mut self, estimation: NoiseEstimation) -> Self {
        self.noise_estimation = estimation;
        self
    }

    /// Sets the magnitude ring-buffer length for noise estimation.
    pub fn with_noise_window_size(mut self, size: usize) -> Self {
        self.noise_window_size = size;
        self
    }

    /// Sets a fixed multiplier applied to every computed threshold.
    pub fn with_threshold_multiplier(mut self, multiplier: f64) -> Self {
        self.threshold_multiplier = multiplier;
        self
    }

    /// Returns the batch-level configuration.
    pub fn base(&self) -> DenoiseConfig {
        self.base
    }

    /// Returns the decomposition depth.
    pub fn levels(&self) -> usize {
        self.base.levels()
    }

    /// Returns the online noise estimation method.
    pub fn noise_estimation(&self) -> NoiseEstimation {
        self.noise_estimation
    }

    /// Returns the noise window length.
    pub fn noise_window_size(&self) -> usize {
        self.noise_window_size
    }

    /// Returns the threshold multiplier.
    pub fn threshold_multiplier(&self) -> f64 {
        self.threshold_multiplier
    }
}
