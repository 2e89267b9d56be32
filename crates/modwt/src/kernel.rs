//! Circular convolution kernels.
//!
//! Every kernel computes the stride-1 MODWT convolution
//! `y[t] = sum_k f[k] * x[(t - k) mod N]` (periodic) or its zero-padded
//! variant, writing all `N` outputs. Synthesis kernels compute the adjoint
//! `(t + k)` form used by the inverse transform.
//!
//! Kernel contract: `out.len() == x.len()`, the kernel overwrites `out`
//! completely and reads neither before nor past the declared lengths.
//! Kernels never validate beyond debug assertions; the transforms are the
//! validation boundary.
//!
//! Three families are provided:
//!
//! | Family | When selected |
//! |--------|---------------|
//! | scalar | `N < 64` or vectorization disabled |
//! | specialized (Haar L=2, DB4 L=8) | `L ∈ {2, 8}` and `N >= 64` |
//! | vector (lane-unrolled) | otherwise, `N >= 64` |
//!
//! All families accumulate taps in the same order with fused
//! multiply-adds, so their outputs agree to well within 1e-12 relative.

use std::sync::LazyLock;

use crate::boundary::BoundaryMode;

/// Signals shorter than this run the scalar kernel outright.
pub const VECTOR_MIN_LEN: usize = 64;

/// Widest lane count any supported platform reports.
const MAX_LANES: usize = 8;

/// Snapshot of the platform's vectorization capability.
///
/// Taken once at first use; the selection policy is deterministic in the
/// signal size, filter length, and this record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerformanceInfo {
    lanes: usize,
    vectorization: bool,
}

impl PerformanceInfo {
    /// Detects the preferred f64 lane count for this platform.
    pub fn detect() -> Self {
        Self {
            lanes: preferred_lanes(),
            vectorization: true,
        }
    }

    /// A configuration that forces the scalar kernel everywhere.
    pub fn scalar_only() -> Self {
        Self {
            lanes: 1,
            vectorization: false,
        }
    }

    /// Number of f64 lanes the vector kernel unrolls per iteration.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Whether the vector and specialized kernels are eligible at all.
    pub fn vectorization_enabled(&self) -> bool {
        self.vectorization
    }

    /// Minimum signal length for non-scalar kernels.
    pub fn vector_threshold(&self) -> usize {
        VECTOR_MIN_LEN
    }
}

fn preferred_lanes() -> usize {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx512f") {
            return 8;
        }
        if std::arch::is_x86_feature_detected!("avx2") {
            return 4;
        }
        2
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        2
    }
}

static PLATFORM: LazyLock<PerformanceInfo> = LazyLock::new(PerformanceInfo::detect);

/// Returns the process-wide platform capability snapshot.
pub fn performance_info() -> PerformanceInfo {
    *PLATFORM
}

/// Which kernel family the selection policy picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelKind {
    /// Straight double loop.
    Scalar,
    /// Unrolled Haar (L=2) or DB4 (L=8) kernel.
    Specialized,
    /// Lane-unrolled general kernel.
    Vector,
}

/// Deterministic kernel selection from signal size and filter length.
pub fn select_kernel(n: usize, filter_len: usize, info: &PerformanceInfo) -> KernelKind {
    if n < VECTOR_MIN_LEN || !info.vectorization {
        KernelKind::Scalar
    } else if filter_len == 2 || filter_len == 8 {
        KernelKind::Specialized
    } else {
        KernelKind::Vector
    }
}

/// Runs the analysis convolution with the policy-selected kernel.
pub fn convolve(x: &[f64], filter: &[f64], out: &mut [f64], mode: BoundaryMode) {
    let info = performance_info();
    match select_kernel(x.len(), filter.len(), &info) {
        KernelKind::Scalar => convolve_scalar(x, filter, out, mode),
        KernelKind::Specialized if filter.len() == 2 => convolve_haar(x, filter, out, mode),
        KernelKind::Specialized => convolve_db4(x, filter, out, mode),
        KernelKind::Vector => convolve_vector(x, filter, out, mode, info.lanes()),
    }
}

/// Computes the boundary outputs `out[0..upto]`, where index `t - k` may
/// fall before the signal start.
fn convolve_head(x: &[f64], filter: &[f64], out: &mut [f64], mode: BoundaryMode, upto: usize) {
    let n = x.len() as isize;
    match mode {
        BoundaryMode::Periodic => {
            for t in 0..upto {
                let mut acc = 0.0;
                for (k, &fk) in filter.iter().enumerate() {
                    let idx = (t as isize - k as isize).rem_euclid(n) as usize;
                    acc = fk.mul_add(x[idx], acc);
                }
                out[t] = acc;
            }
        }
        BoundaryMode::ZeroPadding => {
            for t in 0..upto {
                let mut acc = 0.0;
                for (k, &fk) in filter.iter().enumerate().take(t + 1) {
                    acc = fk.mul_add(x[t - k], acc);
                }
                out[t] = acc;
            }
        }
    }
}

/// Scalar reference kernel.
pub fn convolve_scalar(x: &[f64], filter: &[f64], out: &mut [f64], mode: BoundaryMode) {
    debug_assert_eq!(x.len(), out.len());
    let n = x.len();
    let l = filter.len();
    if l == 0 {
        out.fill(0.0);
        return;
    }
    let head = (l - 1).min(n);
    convolve_head(x, filter, out, mode, head);
    for t in head..n {
        let mut acc = 0.0;
        for (k, &fk) in filter.iter().enumerate() {
            acc = fk.mul_add(x[t - k], acc);
        }
        out[t] = acc;
    }
}

/// Lane-unrolled general kernel: `lanes` outputs per iteration over the
/// interior, scalar tail for the remainder.
pub fn convolve_vector(
    x: &[f64],
    filter: &[f64],
    out: &mut [f64],
    mode: BoundaryMode,
    lanes: usize,
) {
    debug_assert_eq!(x.len(), out.len());
    let n = x.len();
    let l = filter.len();
    if l == 0 {
        out.fill(0.0);
        return;
    }
    let lanes = lanes.clamp(1, MAX_LANES);
    let head = (l - 1).min(n);
    convolve_head(x, filter, out, mode, head);

    let mut t = head;
    while t + lanes <= n {
        let mut acc = [0.0_f64; MAX_LANES];
        for (k, &fk) in filter.iter().enumerate() {
            let base = t - k;
            for (j, a) in acc[..lanes].iter_mut().enumerate() {
                *a = fk.mul_add(x[base + j], *a);
            }
        }
        out[t..t + lanes].copy_from_slice(&acc[..lanes]);
        t += lanes;
    }
    for t in t..n {
        let mut acc = 0.0;
        for (k, &fk) in filter.iter().enumerate() {
            acc = fk.mul_add(x[t - k], acc);
        }
        out[t] = acc;
    }
}

/// Unrolled Haar kernel (L = 2).
pub fn convolve_haar(x: &[f64], filter: &[f64], out: &mut [f64], mode: BoundaryMode) {
    debug_assert_eq!(x.len(), out.len());
    debug_assert_eq!(filter.len(), 2);
    let n = x.len();
    if n == 0 {
        return;
    }
    let f0 = filter[0];
    let f1 = filter[1];
    out[0] = match mode {
        BoundaryMode::Periodic => f0.mul_add(x[0], f1 * x[n - 1]),
        BoundaryMode::ZeroPadding => f0 * x[0],
    };
    for t in 1..n {
        out[t] = f0.mul_add(x[t], f1 * x[t - 1]);
    }
}

/// Unrolled DB4 kernel (L = 8).
pub fn convolve_db4(x: &[f64], filter: &[f64], out: &mut [f64], mode: BoundaryMode) {
    debug_assert_eq!(x.len(), out.len());
    debug_assert_eq!(filter.len(), 8);
    let n = x.len();
    let head = 7.min(n);
    convolve_head(x, filter, out, mode, head);
    if n < 8 {
        return;
    }
    let [f0, f1, f2, f3, f4, f5, f6, f7] = [
        filter[0], filter[1], filter[2], filter[3], filter[4], filter[5], filter[6], filter[7],
    ];
    for t in 7..n {
        let mut acc = f0 * x[t];
        acc = f1.mul_add(x[t - 1], acc);
        acc = f2.mul_add(x[t - 2], acc);
        acc = f3.mul_add(x[t - 3], acc);
        acc = f4.mul_add(x[t - 4], acc);
        acc = f5.mul_add(x[t - 5], acc);
        acc = f6.mul_add(x[t - 6], acc);
        acc = f7.mul_add(x[t - 7], acc);
        out[t] = acc;
    }
}

/// Runs the synthesis convolution with the policy-selected kernel.
///
/// Computes `out[t] = sum_k g0[k]*approx[(t+k) mod N] + g1[k]*detail[(t+k) mod N]`
/// (periodic) or the truncated sum under zero padding.
pub fn synthesize(
    approx: &[f64],
    detail: &[f64],
    g0: &[f64],
    g1: &[f64],
    out: &mut [f64],
    mode: BoundaryMode,
) {
    let info = performance_info();
    let lmax = g0.len().max(g1.len());
    match select_kernel(out.len(), lmax, &info) {
        KernelKind::Scalar => synthesize_scalar(approx, detail, g0, g1, out, mode),
        _ => synthesize_vector(approx, detail, g0, g1, out, mode, info.lanes()),
    }
}

/// Computes the tail outputs `out[from..]`, where index `t + k` may run
/// past the signal end.
fn synthesize_tail(
    approx: &[f64],
    detail: &[f64],
    g0: &[f64],
    g1: &[f64],
    out: &mut [f64],
    mode: BoundaryMode,
    from: usize,
) {
    let n = out.len();
    match mode {
        BoundaryMode::Periodic => {
            for t in from..n {
                let mut acc = 0.0;
                for (k, &g) in g0.iter().enumerate() {
                    acc = g.mul_add(approx[(t + k) % n], acc);
                }
                for (k, &g) in g1.iter().enumerate() {
                    acc = g.mul_add(detail[(t + k) % n], acc);
                }
                out[t] = acc;
            }
        }
        BoundaryMode::ZeroPadding => {
            for t in from..n {
                let mut acc = 0.0;
                for (k, &g) in g0.iter().enumerate().take(n - t) {
                    acc = g.mul_add(approx[t + k], acc);
                }
                for (k, &g) in g1.iter().enumerate().take(n - t) {
                    acc = g.mul_add(detail[t + k], acc);
                }
                out[t] = acc;
            }
        }
    }
}

/// Scalar synthesis kernel.
pub fn synthesize_scalar(
    approx: &[f64],
    detail: &[f64],
    g0: &[f64],
    g1: &[f64],
    out: &mut [f64],
    mode: BoundaryMode,
) {
    debug_assert_eq!(approx.len(), out.len());
    debug_assert_eq!(detail.len(), out.len());
    let n = out.len();
    let lmax = g0.len().max(g1.len());
    let interior_end = n.saturating_sub(lmax.saturating_sub(1));
    for t in 0..interior_end {
        let mut acc = 0.0;
        for (k, &g) in g0.iter().enumerate() {
            acc = g.mul_add(approx[t + k], acc);
        }
        for (k, &g) in g1.iter().enumerate() {
            acc = g.mul_add(detail[t + k], acc);
        }
        out[t] = acc;
    }
    synthesize_tail(approx, detail, g0, g1, out, mode, interior_end);
}

/// Lane-unrolled synthesis kernel.
pub fn synthesize_vector(
    approx: &[f64],
    detail: &[f64],
    g0: &[f64],
    g1: &[f64],
    out: &mut [f64],
    mode: BoundaryMode,
    lanes: usize,
) {
    debug_assert_eq!(approx.len(), out.len());
    debug_assert_eq!(detail.len(), out.len());
    let n = out.len();
    let lanes = lanes.clamp(1, MAX_LANES);
    let lmax = g0.len().max(g1.len());
    let interior_end = n.saturating_sub(lmax.saturating_sub(1));

    let mut t = 0;
    while t + lanes <= interior_end {
        let mut acc = [0.0_f64; MAX_LANES];
        for (k, &g) in g0.iter().enumerate() {
            let base = t + k;
            for (j, a) in acc[..lanes].iter_mut().enumerate() {
                *a = g.mul_add(approx[base + j], *a);
            }
        }
        for (k, &g) in g1.iter().enumerate() {
            let base = t + k;
            for (j, a) in acc[..lanes].iter_mut().enumerate() {
                *a = g.mul_add(detail[base + j], *a);
            }
        }
        out[t..t + lanes].copy_from_slice(&acc[..lanes]);
        t += lanes;
    }
    for t in t..interior_end {
        let mut acc = 0.0;
        for (k, &g) in g0.iter().enumerate() {
            acc = g.mul_add(approx[t + k], acc);
        }
        for (k, &g) in g1.iter().enumerate() {
            acc = g.mul_add(detail[t + k], acc);
        }
        out[t] = acc;
    }
    synthesize_tail(approx, detail, g0, g1, out, mode, interior_end);
}
