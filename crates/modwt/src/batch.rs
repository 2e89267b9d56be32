//! Batch MODWT over a structure-of-arrays layout.
//!
//! Element `(b, t)` of a batch of `B` equal-length signals lives at linear
//! index `t * B + b`, so all signals' samples at one time point are
//! contiguous. The batch kernel broadcasts each filter tap across that
//! contiguous row and accumulates, and rows are sliced across rayon
//! workers for large batches. Accumulation order per element is fixed, so
//! threading never changes results.

use rayon::prelude::*;
use tracing::debug;

use crate::boundary::BoundaryMode;
use crate::error::TransformError;
use crate::transform::{Modwt, ModwtResult};

/// Batches smaller than this run the sequential per-signal path.
pub const MIN_BATCH: usize = 4;

/// Signals shorter than this run the sequential per-signal path.
pub const MIN_BATCH_LEN: usize = 64;

/// Work below this many row-elements stays on one thread.
const PAR_THRESHOLD: usize = 1 << 15;

/// Packs equal-length signals into a structure-of-arrays buffer.
pub fn pack_soa(signals: &[Vec<f64>], soa: &mut [f64]) {
    let batch = signals.len();
    for (b, signal) in signals.iter().enumerate() {
        for (t, &v) in signal.iter().enumerate() {
            soa[t * batch + b] = v;
        }
    }
}

/// Unpacks a structure-of-arrays buffer into per-signal vectors.
pub fn unpack_soa(soa: &[f64], batch: usize, n: usize) -> Vec<Vec<f64>> {
    let mut signals = vec![vec![0.0; n]; batch];
    for t in 0..n {
        let row = &soa[t * batch..(t + 1) * batch];
        for (b, &v) in row.iter().enumerate() {
            signals[b][t] = v;
        }
    }
    signals
}

/// Analysis convolution over a SoA buffer: every output row `t` accumulates
/// the filter taps over the wrapped (or zeroed) source rows.
fn batch_convolve_soa(
    soa: &[f64],
    out: &mut [f64],
    filter: &[f64],
    batch: usize,
    n: usize,
    mode: BoundaryMode,
) {
    debug_assert_eq!(soa.len(), batch * n);
    debug_assert_eq!(out.len(), batch * n);

    let row = |t: usize| &soa[t * batch..(t + 1) * batch];
    let fill_row = |t: usize, dst: &mut [f64]| {
        dst.fill(0.0);
        for (k, &fk) in filter.iter().enumerate() {
            let src = match mode {
                BoundaryMode::Periodic => {
                    (t as isize - k as isize).rem_euclid(n as isize) as usize
                }
                BoundaryMode::ZeroPadding => {
                    if k > t {
                        continue;
                    }
                    t - k
                }
            };
            for (d, &s) in dst.iter_mut().zip(row(src)) {
                *d = fk.mul_add(s, *d);
            }
        }
    };

    if batch * n >= PAR_THRESHOLD {
        out.par_chunks_mut(batch)
            .enumerate()
            .for_each(|(t, dst)| fill_row(t, dst));
    } else {
        for (t, dst) in out.chunks_mut(batch).enumerate() {
            fill_row(t, dst);
        }
    }
}

/// Synthesis convolution over SoA buffers, the `(t + k)` adjoint of
/// [`batch_convolve_soa`].
fn batch_synthesize_soa(
    approx: &[f64],
    detail: &[f64],
    out: &mut [f64],
    g0: &[f64],
    g1: &[f64],
    batch: usize,
    n: usize,
    mode: BoundaryMode,
) {
    let fill_row = |t: usize, dst: &mut [f64]| {
        dst.fill(0.0);
        for (k, &g) in g0.iter().enumerate() {
            let src = match mode {
                BoundaryMode::Periodic => (t + k) % n,
                BoundaryMode::ZeroPadding => {
                    if t + k >= n {
                        continue;
                    }
                    t + k
                }
            };
            let src_row = &approx[src * batch..(src + 1) * batch];
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d = g.mul_add(s, *d);
            }
        }
        for (k, &g) in g1.iter().enumerate() {
            let src = match mode {
                BoundaryMode::Periodic => (t + k) % n,
                BoundaryMode::ZeroPadding => {
                    if t + k >= n {
                        continue;
                    }
                    t + k
                }
            };
            let src_row = &detail[src * batch..(src + 1) * batch];
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d = g.mul_add(s, *d);
            }
        }
    };

    if batch * n >= PAR_THRESHOLD {
        out.par_chunks_mut(batch)
            .enumerate()
            .for_each(|(t, dst)| fill_row(t, dst));
    } else {
        for (t, dst) in out.chunks_mut(batch).enumerate() {
            fill_row(t, dst);
        }
    }
}

fn check_equal_lengths<T, F: Fn(&T) -> usize>(items: &[T], len_of: F) -> Result<usize, TransformError> {
    let expected = len_of(&items[0]);
    for (index, item) in items.iter().enumerate().skip(1) {
        let actual = len_of(item);
        if actual != expected {
            return Err(TransformError::MixedBatchLengths {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(expected)
}

/// Forward MODWT over a batch of equal-length signals.
///
/// Batches of at least [`MIN_BATCH`] signals of at least [`MIN_BATCH_LEN`]
/// samples run through the SoA kernel; anything smaller delegates to
/// sequential per-signal transforms. Results match the sequential path to
/// within IEEE-754 reassociation tolerance.
///
/// # Errors
///
/// Returns [`TransformError::MixedBatchLengths`] if the signals disagree in
/// length, or any single-signal validation error.
pub fn forward_batch(
    modwt: &Modwt,
    signals: &[Vec<f64>],
) -> Result<Vec<ModwtResult>, TransformError> {
    if signals.is_empty() {
        return Ok(Vec::new());
    }
    let n = check_equal_lengths(signals, |s| s.len())?;
    let batch = signals.len();

    if batch < MIN_BATCH || n < MIN_BATCH_LEN {
        debug!(batch, n, "batch below SoA threshold, running sequentially");
        return signals.iter().map(|s| modwt.forward(s)).collect();
    }
    for signal in signals {
        crate::transform::validate_signal(signal, modwt.wavelet().filter_len())?;
    }

    let mut soa = vec![0.0; batch * n];
    pack_soa(signals, &mut soa);
    let mut soa_approx = vec![0.0; batch * n];
    let mut soa_detail = vec![0.0; batch * n];

    batch_convolve_soa(
        &soa,
        &mut soa_approx,
        modwt.scaled_dec_low(),
        batch,
        n,
        modwt.boundary_mode(),
    );
    batch_convolve_soa(
        &soa,
        &mut soa_detail,
        modwt.scaled_dec_high(),
        batch,
        n,
        modwt.boundary_mode(),
    );

    let approx = unpack_soa(&soa_approx, batch, n);
    let detail = unpack_soa(&soa_detail, batch, n);
    approx
        .into_iter()
        .zip(detail)
        .map(|(a, d)| ModwtResult::new(a, d))
        .collect()
}

/// Inverse MODWT over a batch of equal-length results.
///
/// # Errors
///
/// Returns [`TransformError::MixedBatchLengths`] if the results disagree in
/// length.
pub fn inverse_batch(
    modwt: &Modwt,
    results: &[ModwtResult],
) -> Result<Vec<Vec<f64>>, TransformError> {
    if results.is_empty() {
        return Ok(Vec::new());
    }
    let n = check_equal_lengths(results, |r| r.len())?;
    let batch = results.len();

    if batch < MIN_BATCH || n < MIN_BATCH_LEN {
        debug!(batch, n, "batch below SoA threshold, running sequentially");
        return results.iter().map(|r| modwt.inverse(r)).collect();
    }

    let mut soa_approx = vec![0.0; batch * n];
    let mut soa_detail = vec![0.0; batch * n];
    for (b, result) in results.iter().enumerate() {
        for t in 0..n {
            soa_approx[t * batch + b] = result.approx()[t];
            soa_detail[t * batch + b] = result.detail()[t];
        }
    }

    let mut soa_out = vec![0.0; batch * n];
    batch_synthesize_soa(
        &soa_approx,
        &soa_detail,
        &mut soa_out,
        modwt.scaled_rec_low(),
        modwt.scaled_rec_high(),
        batch,
        n,
        modwt.boundary_mode(),
    );

    let mut signals = unpack_soa(&soa_out, batch, n);
    let scale = modwt.wavelet().reconstruction_scale();
    let delay = modwt.wavelet().group_delay();
    for signal in &mut signals {
        if scale != 1.0 {
            for v in signal.iter_mut() {
                *v *= scale;
            }
        }
        if delay > 0 && modwt.boundary_mode() == BoundaryMode::Periodic {
            signal.rotate_left(delay % n);
        }
    }
    Ok(signals)
}
