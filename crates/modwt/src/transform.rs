//! Single-level MODWT forward and inverse transforms.

use vectorwave_wavelets::{Wavelet, WaveletKind};

use crate::boundary::BoundaryMode;
use crate::error::TransformError;
use crate::filters;
use crate::kernel;

/// Validates a forward-transform input signal.
pub(crate) fn validate_signal(signal: &[f64], filter_len: usize) -> Result<(), TransformError> {
    if signal.is_empty() {
        return Err(TransformError::EmptySignal);
    }
    if signal.len() < filter_len {
        return Err(TransformError::SignalTooShort {
            len: signal.len(),
            min: filter_len,
        });
    }
    if !signal.iter().all(|v| v.is_finite()) {
        return Err(TransformError::NonFiniteData);
    }
    Ok(())
}

/// Result of a single-level MODWT: same-length approximation and detail
/// coefficients.
///
/// The record is immutable; accessors expose read-only views of privately
/// owned storage, so callers can never observe internal mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct ModwtResult {
    approx: Vec<f64>,
    detail: Vec<f64>,
}

impl ModwtResult {
    /// Creates a result from coefficient vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TransformError::EmptySignal`] | both vectors empty |
    /// | [`TransformError::LengthMismatch`] | `approx.len() != detail.len()` |
    pub fn new(approx: Vec<f64>, detail: Vec<f64>) -> Result<Self, TransformError> {
        if approx.len() != detail.len() {
            return Err(TransformError::LengthMismatch {
                expected: approx.len(),
                actual: detail.len(),
            });
        }
        if approx.is_empty() {
            return Err(TransformError::EmptySignal);
        }
        Ok(Self { approx, detail })
    }

    /// Returns the approximation (low-pass) coefficients.
    pub fn approx(&self) -> &[f64] {
        &self.approx
    }

    /// Returns the detail (high-pass) coefficients.
    pub fn detail(&self) -> &[f64] {
        &self.detail
    }

    /// Returns the signal length the coefficients correspond to.
    pub fn len(&self) -> usize {
        self.approx.len()
    }

    /// Returns `true` if the result holds no coefficients.
    ///
    /// Note: a constructed `ModwtResult` is never empty.
    pub fn is_empty(&self) -> bool {
        self.approx.is_empty()
    }

    /// Consumes the result, returning `(approx, detail)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.approx, self.detail)
    }
}

/// Single-level MODWT transform for a fixed wavelet and boundary mode.
///
/// The transform is a cheap value type holding the 1/sqrt(2)-scaled
/// filters; it keeps no mutable state, so one instance may be shared
/// freely across threads.
///
/// # Example
///
/// ```
/// use vectorwave_modwt::{BoundaryMode, Modwt};
/// use vectorwave_wavelets::haar;
///
/// let modwt = Modwt::new(haar(), BoundaryMode::Periodic).unwrap();
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
/// let result = modwt.forward(&x).unwrap();
/// assert_eq!(result.approx().len(), 7);
///
/// let restored = modwt.inverse(&result).unwrap();
/// for (a, b) in x.iter().zip(&restored) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Modwt {
    wavelet: Wavelet,
    boundary: BoundaryMode,
    h0: Vec<f64>,
    h1: Vec<f64>,
    g0: Vec<f64>,
    g1: Vec<f64>,
}

impl Modwt {
    /// Creates a single-level MODWT transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotDiscrete`] for continuous wavelets,
    /// which carry no filter bank.
    pub fn new(wavelet: Wavelet, boundary: BoundaryMode) -> Result<Self, TransformError> {
        if wavelet.kind() == WaveletKind::Continuous {
            return Err(TransformError::NotDiscrete(wavelet.name().to_string()));
        }
        let h0 = filters::scale(wavelet.dec_low());
        let h1 = filters::scale(wavelet.dec_high());
        let g0 = filters::scale(wavelet.rec_low());
        let g1 = filters::scale(wavelet.rec_high());
        Ok(Self {
            wavelet,
            boundary,
            h0,
            h1,
            g0,
            g1,
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

    /// The 1/sqrt(2)-scaled decomposition low-pass filter.
    pub(crate) fn scaled_dec_low(&self) -> &[f64] {
        &self.h0
    }

    /// The 1/sqrt(2)-scaled decomposition high-pass filter.
    pub(crate) fn scaled_dec_high(&self) -> &[f64] {
        &self.h1
    }

    /// The 1/sqrt(2)-scaled reconstruction low-pass filter.
    pub(crate) fn scaled_rec_low(&self) -> &[f64] {
        &self.g0
    }

    /// The 1/sqrt(2)-scaled reconstruction high-pass filter.
    pub(crate) fn scaled_rec_high(&self) -> &[f64] {
        &self.g1
    }

    /// Performs the forward transform, allocating the output.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TransformError::EmptySignal`] | empty input |
    /// | [`TransformError::SignalTooShort`] | fewer samples than filter taps |
    /// | [`TransformError::NonFiniteData`] | NaN or infinity in the input |
    pub fn forward(&self, signal: &[f64]) -> Result<ModwtResult, TransformError> {
        let mut approx = vec![0.0; signal.len()];
        let mut detail = vec![0.0; signal.len()];
        self.forward_into(signal, &mut approx, &mut detail)?;
        ModwtResult::new(approx, detail)
    }

    /// Performs the forward transform into caller-provided buffers.
    ///
    /// Allocation-free path for hot loops; pair with
    /// [`BufferPool`](crate::BufferPool) to recycle the outputs.
    ///
    /// # Errors
    ///
    /// As [`Modwt::forward`], plus [`TransformError::LengthMismatch`] if an
    /// output buffer length differs from the signal length.
    pub fn forward_into(
        &self,
        signal: &[f64],
        approx: &mut [f64],
        detail: &mut [f64],
    ) -> Result<(), TransformError> {
        validate_signal(signal, self.wavelet.filter_len())?;
        if approx.len() != signal.len() {
            return Err(TransformError::LengthMismatch {
                expected: signal.len(),
                actual: approx.len(),
            });
        }
        if detail.len() != signal.len() {
            return Err(TransformError::LengthMismatch {
                expected: signal.len(),
                actual: detail.len(),
            });
        }
        kernel::convolve(signal, &self.h0, approx, self.boundary);
        kernel::convolve(signal, &self.h1, detail, self.boundary);
        Ok(())
    }

    /// Reconstructs the signal from a single-level result.
    ///
    /// For biorthogonal wavelets the synthesis output is scaled by the
    /// wavelet's reconstruction factor, and under periodic boundaries the
    /// result is cyclically shifted to compensate the filter pair's group
    /// delay. Zero padding applies no shift; edge artifacts are expected.
    pub fn inverse(&self, result: &ModwtResult) -> Result<Vec<f64>, TransformError> {
        let mut out = vec![0.0; result.len()];
        self.inverse_into(result, &mut out)?;
        Ok(out)
    }

    /// Reconstructs into a caller-provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::LengthMismatch`] if the output buffer
    /// length differs from the coefficient length.
    pub fn inverse_into(
        &self,
        result: &ModwtResult,
        out: &mut [f64],
    ) -> Result<(), TransformError> {
        let n = result.len();
        if out.len() != n {
            return Err(TransformError::LengthMismatch {
                expected: n,
                actual: out.len(),
            });
        }
        kernel::synthesize(
            result.approx(),
            result.detail(),
            &self.g0,
            &self.g1,
            out,
            self.boundary,
        );
        let scale = self.wavelet.reconstruction_scale();
        if scale != 1.0 {
            for v in out.iter_mut() {
                *v *= scale;
            }
        }
        let delay = self.wavelet.group_delay();
        if delay > 0 && self.boundary == BoundaryMode::Periodic {
            out.rotate_left(delay % n);
        }
        Ok(())
    }
}
