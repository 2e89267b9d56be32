//! Multi-level MODWT decomposition and reconstruction.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;
use vectorwave_wavelets::{Wavelet, WaveletKind};

use crate::boundary::BoundaryMode;
use crate::error::TransformError;
use crate::filters::{truncate, LevelFilters};
use crate::kernel;
use crate::transform::validate_signal;

/// Practical ceiling on decomposition depth.
///
/// At level j the upsampled filters grow as `(L-1)*2^(j-1)+1`; beyond ten
/// levels the filters dwarf any realistic signal and the coefficients carry
/// no usable information.
const MAX_DECOMPOSITION_LEVELS: usize = 10;

/// Computes the maximum feasible MODWT decomposition level for a signal
/// length and filter length: `floor(log2(N / (L - 1) + 1))`, at least 1
/// when `N >= L` and capped at ten levels.
///
/// # Example
///
/// ```
/// use vectorwave_modwt::max_level;
///
/// assert_eq!(max_level(256, 2), 8);   // Haar
/// assert_eq!(max_level(256, 8), 5);   // 8-tap filters
/// assert_eq!(max_level(4, 8), 0);     // too short for even one level
/// ```
pub fn max_level(n: usize, filter_len: usize) -> usize {
    if filter_len < 2 || n < filter_len {
        return 0;
    }
    let ratio = n as f64 / (filter_len as f64 - 1.0) + 1.0;
    (ratio.log2().floor() as usize).clamp(1, MAX_DECOMPOSITION_LEVELS)
}

/// Immutable multi-level MODWT decomposition.
///
/// Holds detail coefficients for levels `1..=J` and the level-J
/// approximation, all of the original signal length.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLevelModwtResult {
    details: Vec<Vec<f64>>,
    approx: Vec<f64>,
}

impl MultiLevelModwtResult {
    /// Creates a result from per-level details and the final approximation.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TransformError::EmptySignal`] | no detail levels or empty approximation |
    /// | [`TransformError::LengthMismatch`] | any level's length differs from the approximation's |
    pub fn from_parts(details: Vec<Vec<f64>>, approx: Vec<f64>) -> Result<Self, TransformError> {
        if details.is_empty() || approx.is_empty() {
            return Err(TransformError::EmptySignal);
        }
        for level in &details {
            if level.len() != approx.len() {
                return Err(TransformError::LengthMismatch {
                    expected: approx.len(),
                    actual: level.len(),
                });
            }
        }
        Ok(Self { details, approx })
    }

    /// Returns the number of decomposition levels J.
    pub fn levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the original signal length.
    pub fn signal_len(&self) -> usize {
        self.approx.len()
    }

    /// Returns the detail coefficients at the given level (1-based).
    ///
    /// Returns `None` if the level is out of range.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        if level == 0 {
            return None;
        }
        self.details.get(level - 1).map(|v| v.as_slice())
    }

    /// Returns the level-J approximation coefficients.
    pub fn approx(&self) -> &[f64] {
        &self.approx
    }

    /// Converts into the mutable form used for in-place thresholding.
    pub fn into_mutable(self) -> MutableMultiLevelModwtResult {
        MutableMultiLevelModwtResult { inner: self }
    }
}

/// Mutable multi-level result permitting in-place detail modification.
///
/// Used by denoising paths that own the decomposition; convert back with
/// [`MutableMultiLevelModwtResult::freeze`] before reconstruction.
#[derive(Clone, Debug)]
pub struct MutableMultiLevelModwtResult {
    inner: MultiLevelModwtResult,
}

impl MutableMultiLevelModwtResult {
    /// Returns the number of decomposition levels J.
    pub fn levels(&self) -> usize {
        self.inner.levels()
    }

    /// Returns the original signal length.
    pub fn signal_len(&self) -> usize {
        self.inner.signal_len()
    }

    /// Returns the detail coefficients at the given level (1-based).
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        self.inner.detail(level)
    }

    /// Returns a mutable view of the detail coefficients at the given level
    /// (1-based), or `None` if out of range.
    pub fn detail_mut(&mut self, level: usize) -> Option<&mut [f64]> {
        if level == 0 {
            return None;
        }
        self.inner.details.get_mut(level - 1).map(|v| v.as_mut_slice())
    }

    /// Returns the level-J approximation coefficients.
    pub fn approx(&self) -> &[f64] {
        self.inner.approx()
    }

    /// Freezes the result back into its immutable form.
    pub fn freeze(self) -> MultiLevelModwtResult {
        self.inner
    }
}

/// Multi-level MODWT transform for a fixed wavelet and boundary mode.
///
/// Runs the pyramid algorithm: each level convolves the previous
/// approximation with the level's upsampled filters. Upsampled filter
/// tables are computed lazily and cached per level behind a
/// single-writer/many-readers guard, so a shared instance amortizes the
/// filter construction across calls.
#[derive(Debug)]
pub struct MultiLevelModwt {
    wavelet: Wavelet,
    boundary: BoundaryMode,
    cache: RwLock<HashMap<usize, Arc<LevelFilters>>>,
}

impl MultiLevelModwt {
    /// Creates a multi-level MODWT transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotDiscrete`] for continuous wavelets.
    pub fn new(wavelet: Wavelet, boundary: BoundaryMode) -> Result<Self, TransformError> {
        if wavelet.kind() == WaveletKind::Continuous {
            return Err(TransformError::NotDiscrete(wavelet.name().to_string()));
        }
        Ok(Self {
            wavelet,
            boundary,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the wavelet this transform uses.
    pub fn wavelet(&self) -> &Wavelet {
        &self.wavelet
    }

    /// Returns the boundary mode this transform uses.
    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary
    }

    /// Returns the maximum feasible level for a signal of length `n`.
    pub fn max_level_for(&self, n: usize) -> usize {
        max_level(n, self.wavelet.filter_len())
    }

    fn level_filters(&self, level: usize) -> Arc<LevelFilters> {
        if let Some(filters) = self.cache.read().expect("filter cache poisoned").get(&level) {
            return Arc::clone(filters);
        }
        let mut cache = self.cache.write().expect("filter cache poisoned");
        Arc::clone(
            cache
                .entry(level)
                .or_insert_with(|| Arc::new(LevelFilters::for_level(&self.wavelet, level))),
        )
    }

    /// Decomposes a signal to the given number of levels.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TransformError::EmptySignal`] | empty input |
    /// | [`TransformError::SignalTooShort`] | fewer samples than filter taps |
    /// | [`TransformError::NonFiniteData`] | NaN or infinity in the input |
    /// | [`TransformError::LevelTooHigh`] | `levels` is 0 or exceeds [`max_level`] |
    pub fn decompose(
        &self,
        signal: &[f64],
        levels: usize,
    ) -> Result<MultiLevelModwtResult, TransformError> {
        validate_signal(signal, self.wavelet.filter_len())?;
        let n = signal.len();
        let max = self.max_level_for(n);
        if levels == 0 || levels > max {
            return Err(TransformError::LevelTooHigh {
                requested: levels,
                max,
                len: n,
            });
        }

        let mut approx = signal.to_vec();
        let mut next = vec![0.0; n];
        let mut details = Vec::with_capacity(levels);
        for level in 1..=levels {
            let filters = self.level_filters(level);
            let h0 = truncate(&filters.h0, n);
            let h1 = truncate(&filters.h1, n);
            if h0.len() < filters.h0.len() || h1.len() < filters.h1.len() {
                warn!(
                    level,
                    signal_len = n,
                    wavelet = self.wavelet.name(),
                    "upsampled decomposition filters truncated to signal length"
                );
            }
            let mut detail = vec![0.0; n];
            kernel::convolve(&approx, h0, &mut next, self.boundary);
            kernel::convolve(&approx, h1, &mut detail, self.boundary);
            details.push(detail);
            std::mem::swap(&mut approx, &mut next);
        }
        MultiLevelModwtResult::from_parts(details, approx)
    }

    /// Reconstructs the original signal from a decomposition.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::LevelTooHigh`] if the result holds more
    /// levels than this transform supports for its length.
    pub fn reconstruct(
        &self,
        result: &MultiLevelModwtResult,
    ) -> Result<Vec<f64>, TransformError> {
        self.reconstruct_with(result, |level| result.detail(level))
    }

    /// Reconstructs while discarding details finer than `start_level`.
    ///
    /// Levels `start_level..=J` contribute their coefficients; finer levels
    /// contribute zeros. Useful as a crude low-pass.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::LevelTooHigh`] if `start_level` is 0 or
    /// exceeds the result's level count.
    pub fn reconstruct_from_level(
        &self,
        result: &MultiLevelModwtResult,
        start_level: usize,
    ) -> Result<Vec<f64>, TransformError> {
        if start_level == 0 || start_level > result.levels() {
            return Err(TransformError::LevelTooHigh {
                requested: start_level,
                max: result.levels(),
                len: result.signal_len(),
            });
        }
        self.reconstruct_with(result, |level| {
            if level >= start_level {
                result.detail(level)
            } else {
                None
            }
        })
    }

    /// Reconstructs using only detail levels within `[min_level, max_level]`
    /// (band-limited reconstruction). The approximation contributes only
    /// when the coarsest level J lies within the range.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::LevelTooHigh`] if the range is empty or
    /// reaches past the result's level count.
    pub fn reconstruct_levels(
        &self,
        result: &MultiLevelModwtResult,
        min_level: usize,
        max_level: usize,
    ) -> Result<Vec<f64>, TransformError> {
        if min_level == 0 || min_level > max_level || max_level > result.levels() {
            return Err(TransformError::LevelTooHigh {
                requested: max_level,
                max: result.levels(),
                len: result.signal_len(),
            });
        }
        let n = result.signal_len();
        let levels = result.levels();
        let zeros = vec![0.0; n];
        let mut current = if levels <= max_level && levels >= min_level {
            result.approx().to_vec()
        } else {
            zeros.clone()
        };
        let mut out = vec![0.0; n];
        for level in (1..=levels).rev() {
            let detail = if level >= min_level && level <= max_level {
                result.detail(level).unwrap_or(&zeros)
            } else {
                &zeros
            };
            self.synthesize_level(&current, detail, &mut out, level);
            std::mem::swap(&mut current, &mut out);
        }
        Ok(current)
    }

    fn reconstruct_with<'a>(
        &self,
        result: &'a MultiLevelModwtResult,
        detail_at: impl Fn(usize) -> Option<&'a [f64]>,
    ) -> Result<Vec<f64>, TransformError> {
        let n = result.signal_len();
        let levels = result.levels();
        let zeros = vec![0.0; n];
        let mut current = result.approx().to_vec();
        let mut out = vec![0.0; n];
        for level in (1..=levels).rev() {
            let detail = detail_at(level).unwrap_or(&zeros);
            self.synthesize_level(&current, detail, &mut out, level);
            std::mem::swap(&mut current, &mut out);
        }
        Ok(current)
    }

    /// One synthesis step: level-j filters, biorthogonal compensation.
    fn synthesize_level(&self, approx: &[f64], detail: &[f64], out: &mut [f64], level: usize) {
        let n = out.len();
        let filters = self.level_filters(level);
        let g0 = truncate(&filters.g0, n);
        let g1 = truncate(&filters.g1, n);
        kernel::synthesize(approx, detail, g0, g1, out, self.boundary);
        let scale = self.wavelet.reconstruction_scale();
        if scale != 1.0 {
            for v in out.iter_mut() {
                *v *= scale;
            }
        }
        let delay = self.wavelet.group_delay();
        if delay > 0 && self.boundary == BoundaryMode::Periodic {
            out.rotate_left((delay << (level - 1)) % n);
        }
    }
}
