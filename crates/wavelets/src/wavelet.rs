//! The wavelet filter-bank record.

/// Classification of a wavelet's filter-bank structure.
///
/// Continuous entries exist in the catalog for completeness but carry no
/// discrete filter bank; MODWT entry points reject them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveletKind {
    /// Orthogonal filter bank: reconstruction filters equal decomposition filters.
    Orthogonal,
    /// Biorthogonal filter bank: independent analysis and synthesis filters.
    Biorthogonal,
    /// Continuous wavelet without a discrete filter bank.
    Continuous,
}

/// An immutable wavelet filter bank.
///
/// Carries the four filters of a two-channel bank plus the synthesis
/// metadata biorthogonal families need (energy compensation and cyclic
/// group-delay alignment). Orthogonal wavelets have `reconstruction_scale`
/// 1.0 and `group_delay` 0.
///
/// Filter naming follows the analysis/synthesis convention:
///
/// | Filter | Role |
/// |--------|------|
/// | `h0` | decomposition low-pass |
/// | `h1` | decomposition high-pass |
/// | `g0` | reconstruction low-pass |
/// | `g1` | reconstruction high-pass |
#[derive(Clone, Debug, PartialEq)]
pub struct Wavelet {
    name: &'static str,
    kind: WaveletKind,
    h0: Vec<f64>,
    h1: Vec<f64>,
    g0: Vec<f64>,
    g1: Vec<f64>,
    reconstruction_scale: f64,
    group_delay: usize,
}

/// Derives the high-pass filter from a low-pass filter via the quadrature
/// mirror relation `h1[i] = (-1)^i * h0[L-1-i]`.
pub(crate) fn quadrature_mirror(low: &[f64]) -> Vec<f64> {
    let len = low.len();
    (0..len)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            sign * low[len - 1 - i]
        })
        .collect()
}

/// Derives a biorthogonal high-pass filter from the opposite channel's
/// low-pass filter: reverse and apply alternating signs.
pub(crate) fn alternating_flip(low: &[f64]) -> Vec<f64> {
    let len = low.len();
    (0..len)
        .map(|i| {
            let sign = if (len - 1 - i) % 2 == 0 { 1.0 } else { -1.0 };
            sign * low[len - 1 - i]
        })
        .collect()
}

impl Wavelet {
    /// Builds an orthogonal wavelet from its low-pass decomposition filter.
    ///
    /// The high-pass filter is derived by the quadrature mirror relation and
    /// the reconstruction filters equal the decomposition filters.
    pub(crate) fn orthogonal(name: &'static str, h0: Vec<f64>) -> Self {
        let h1 = quadrature_mirror(&h0);
        Self {
            name,
            kind: WaveletKind::Orthogonal,
            g0: h0.clone(),
            g1: h1.clone(),
            h0,
            h1,
            reconstruction_scale: 1.0,
            group_delay: 0,
        }
    }

    /// Builds a biorthogonal wavelet from its two low-pass filters.
    ///
    /// The high-pass decomposition filter derives from the low-pass
    /// reconstruction filter and vice versa (alternating-sign reversal).
    /// `reconstruction_scale` compensates the synthesis energy so that
    /// constants reconstruct exactly; `group_delay` is the cyclic shift the
    /// analysis-synthesis cascade introduces under periodic boundaries.
    pub(crate) fn biorthogonal(
        name: &'static str,
        dec_lo: Vec<f64>,
        rec_lo: Vec<f64>,
        reconstruction_scale: f64,
        group_delay: usize,
    ) -> Self {
        let h1 = alternating_flip(&rec_lo);
        let g1 = alternating_flip(&dec_lo);
        Self {
            name,
            kind: WaveletKind::Biorthogonal,
            h0: dec_lo,
            h1,
            g0: rec_lo,
            g1,
            reconstruction_scale,
            group_delay,
        }
    }

    /// Builds a continuous-wavelet placeholder with no discrete filter bank.
    pub(crate) fn continuous(name: &'static str) -> Self {
        Self {
            name,
            kind: WaveletKind::Continuous,
            h0: Vec::new(),
            h1: Vec::new(),
            g0: Vec::new(),
            g1: Vec::new(),
            reconstruction_scale: 1.0,
            group_delay: 0,
        }
    }

    /// Returns the catalog name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the filter-bank classification.
    pub fn kind(&self) -> WaveletKind {
        self.kind
    }

    /// Returns the decomposition low-pass filter.
    pub fn dec_low(&self) -> &[f64] {
        &self.h0
    }

    /// Returns the decomposition high-pass filter.
    pub fn dec_high(&self) -> &[f64] {
        &self.h1
    }

    /// Returns the reconstruction low-pass filter.
    pub fn rec_low(&self) -> &[f64] {
        &self.g0
    }

    /// Returns the reconstruction high-pass filter.
    pub fn rec_high(&self) -> &[f64] {
        &self.g1
    }

    /// Returns the synthesis energy compensation factor (1.0 for orthogonal).
    pub fn reconstruction_scale(&self) -> f64 {
        self.reconstruction_scale
    }

    /// Returns the cyclic group delay in samples (0 for orthogonal).
    pub fn group_delay(&self) -> usize {
        self.group_delay
    }

    /// Returns the effective filter length: the longest decomposition filter.
    ///
    /// Biorthogonal banks may have channels of different lengths; transforms
    /// validate signal length and decomposition depth against the longest.
    pub fn filter_len(&self) -> usize {
        self.h0.len().max(self.h1.len())
    }

    /// Returns `true` if this wavelet participates in discrete transforms.
    pub fn is_discrete(&self) -> bool {
        self.kind != WaveletKind::Continuous
    }
}
