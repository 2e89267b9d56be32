//! MODWT filter scaling and per-level upsampling.
//!
//! The MODWT uses the wavelet's base filters scaled by 1/sqrt(2). The
//! multi-level pyramid applies the same scaling at every level but
//! upsamples the filters by inserting `2^(j-1) - 1` zeros between taps,
//! which realizes the net `2^(-j/2)` level-j scaling across the cascade.

use vectorwave_wavelets::Wavelet;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Scales a filter by 1/sqrt(2).
pub fn scale(filter: &[f64]) -> Vec<f64> {
    filter.iter().map(|&c| c * FRAC_1_SQRT_2).collect()
}

/// Upsamples a filter by the given stride, scaling each tap by 1/sqrt(2).
///
/// The result has length `(L - 1) * stride + 1` with the original taps at
/// multiples of `stride` and zeros between.
pub fn upsample(filter: &[f64], stride: usize) -> Vec<f64> {
    if filter.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; (filter.len() - 1) * stride + 1];
    for (i, &c) in filter.iter().enumerate() {
        out[i * stride] = c * FRAC_1_SQRT_2;
    }
    out
}

/// The four MODWT filters for one decomposition level.
#[derive(Clone, Debug)]
pub struct LevelFilters {
    /// Level-j decomposition low-pass.
    pub h0: Vec<f64>,
    /// Level-j decomposition high-pass.
    pub h1: Vec<f64>,
    /// Level-j reconstruction low-pass.
    pub g0: Vec<f64>,
    /// Level-j reconstruction high-pass.
    pub g1: Vec<f64>,
}

impl LevelFilters {
    /// Builds the level-j filters: base filters scaled by 1/sqrt(2) and
    /// upsampled by `2^(j-1)`.
    pub fn for_level(wavelet: &Wavelet, level: usize) -> Self {
        debug_assert!(level >= 1);
        let stride = 1usize << (level - 1);
        Self {
            h0: upsample(wavelet.dec_low(), stride),
            h1: upsample(wavelet.dec_high(), stride),
            g0: upsample(wavelet.rec_low(), stride),
            g1: upsample(wavelet.rec_high(), stride),
        }
    }
}

/// Returns the leading prefix of a filter no longer than `n`.
///
/// High-level upsampled filters can outgrow short signals; the transform
/// truncates them to the signal length, matching the decomposition depth
/// cap's intent.
pub fn truncate(filter: &[f64], n: usize) -> &[f64] {
    &filter[..filter.len().min(n)]
}
