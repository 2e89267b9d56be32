//! Noise level estimation from detail coefficients.

use std::collections::VecDeque;

/// Gaussian consistency constant: `median(|X|) = 0.6745 sigma` for
/// `X ~ N(0, sigma^2)`.
const MAD_SCALE: f64 = 0.6745;

/// Weight of the newest block estimate in adaptive blending.
const ADAPTIVE_BLEND: f64 = 0.3;

/// How the streaming denoiser tracks the noise level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoiseEstimation {
    /// Median absolute deviation over the full magnitude window.
    #[default]
    Mad,
    /// Recomputed each block and blended exponentially into the running
    /// estimate, tracking drift faster than the full-window median.
    Adaptive,
}

/// Median of a slice; averages the middle pair for even lengths.
pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Estimates the noise standard deviation from finest-scale detail
/// coefficients: `median(|d|) / 0.6745`.
pub fn mad_sigma(details: &[f64]) -> f64 {
    let magnitudes: Vec<f64> = details.iter().map(|d| d.abs()).collect();
    median(&magnitudes) / MAD_SCALE
}

/// Online noise estimator over a ring buffer of recent detail magnitudes.
#[derive(Clone, Debug)]
pub(crate) struct NoiseEstimator {
    method: NoiseEstimation,
    window: VecDeque<f64>,
    window_size: usize,
    sigma: f64,
    primed: bool,
}

impl NoiseEstimator {
    pub(crate) fn new(method: NoiseEstimation, window_size: usize) -> Self {
        Self {
            method,
            window: VecDeque::with_capacity(window_size),
            window_size,
            sigma: 0.0,
            primed: false,
        }
    }

    /// Feeds a block's finest-scale detail coefficients and refreshes the
    /// estimate.
    pub(crate) fn update(&mut self, details: &[f64]) {
        for &d in details {
            if self.window.len() == self.window_size {
                self.window.pop_front();
            }
            self.window.push_back(d.abs());
        }
        match self.method {
            NoiseEstimation::Mad => {
                let magnitudes: Vec<f64> = self.window.iter().copied().collect();
                self.sigma = median(&magnitudes) / MAD_SCALE;
            }
            NoiseEstimation::Adaptive => {
                let block_sigma = mad_sigma(details);
                self.sigma = if self.primed {
                    (1.0 - ADAPTIVE_BLEND) * self.sigma + ADAPTIVE_BLEND * block_sigma
                } else {
                    block_sigma
                };
            }
        }
        self.primed = true;
    }

    /// Returns the current noise level estimate.
    pub(crate) fn current(&self) -> f64 {
        self.sigma
    }
}
