//! Threshold selection and shrinkage.

/// Rule for choosing the shrinkage parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThresholdMethod {
    /// VisuShrink: `sigma * sqrt(2 ln N)`. Conservative, oversmooths.
    #[default]
    Universal,
    /// Minimizes Stein's Unbiased Risk Estimate over the coefficients.
    Sure,
    /// Minimax-optimal threshold from the published lookup table.
    Minimax,
}

/// Shrinkage nonlinearity applied to detail coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThresholdType {
    /// `sign(d) * max(|d| - t, 0)`: shrinks toward zero, fewer artifacts.
    #[default]
    Soft,
    /// `d if |d| > t else 0`: keeps features, may ring.
    Hard,
}

/// Universal (VisuShrink) threshold `sigma * sqrt(2 ln N)`.
pub fn universal_threshold(sigma: f64, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    sigma * (2.0 * (n as f64).ln()).sqrt()
}

/// Minimax threshold factors at power-of-two sample counts.
///
/// Published minimax-optimal soft-threshold values; the factor is 0 for
/// N <= 32, and intermediate N interpolate linearly in log2 N.
const MINIMAX_TABLE: [(usize, f64); 11] = [
    (64, 1.4910),
    (128, 1.6739),
    (256, 1.8568),
    (512, 2.0397),
    (1024, 2.2226),
    (2048, 2.4055),
    (4096, 2.5884),
    (8192, 2.7713),
    (16384, 2.9542),
    (32768, 3.1371),
    (65536, 3.3200),
];

/// Minimax threshold `sigma * lambda(N)`, with `lambda` interpolated from
/// [`MINIMAX_TABLE`] in log2 N.
pub fn minimax_threshold(sigma: f64, n: usize) -> f64 {
    if n <= 32 {
        return 0.0;
    }
    let log_n = (n as f64).log2();
    let (first_n, first) = MINIMAX_TABLE[0];
    let (last_n, last) = MINIMAX_TABLE[MINIMAX_TABLE.len() - 1];
    let lambda = if n <= first_n {
        // Interpolate between the zero point at N=32 and the first entry.
        let left = 5.0; // log2(32)
        let right = (first_n as f64).log2();
        first * (log_n - left) / (right - left)
    } else if n >= last_n {
        // Extend the table's final slope.
        let (prev_n, prev) = MINIMAX_TABLE[MINIMAX_TABLE.len() - 2];
        let slope = (last - prev) / ((last_n as f64).log2() - (prev_n as f64).log2());
        last + slope * (log_n - (last_n as f64).log2())
    } else {
        let mut lambda = last;
        for window in MINIMAX_TABLE.windows(2) {
            let (ln_, lv) = window[0];
            let (rn, rv) = window[1];
            if n <= rn {
                let left = (ln_ as f64).log2();
                let right = (rn as f64).log2();
                lambda = lv + (rv - lv) * (log_n - left) / (right - left);
                break;
            }
        }
        lambda
    };
    sigma * lambda
}

/// SURE threshold: minimizes
/// `SURE(t) = N - 2 * #{|y| <= t} + sum_i min(y_i^2, t^2)` over the
/// noise-standardized coefficients `y = d / sigma`, evaluated on the
/// candidate grid of sorted magnitudes (plus zero), and capped by the
/// universal threshold.
pub fn sure_threshold(coeffs: &[f64], sigma: f64) -> f64 {
    let n = coeffs.len();
    if n == 0 || sigma <= 0.0 {
        return 0.0;
    }
    let mut magnitudes: Vec<f64> = coeffs.iter().map(|d| (d / sigma).abs()).collect();
    magnitudes.sort_by(|a, b| a.partial_cmp(b).expect("finite coefficients"));

    // Prefix sums of squared magnitudes for O(1) risk evaluation per
    // candidate.
    let mut prefix_sq = Vec::with_capacity(n + 1);
    prefix_sq.push(0.0);
    for &m in &magnitudes {
        prefix_sq.push(prefix_sq.last().unwrap() + m * m);
    }
    let nf = n as f64;

    let risk_at = |t: f64, below: usize| {
        // `below` = #{|y| <= t} for the candidate grid.
        nf - 2.0 * below as f64 + prefix_sq[below] + (n - below) as f64 * t * t
    };

    let mut best_t = 0.0;
    let mut best_risk = risk_at(0.0, 0);
    for (k, &t) in magnitudes.iter().enumerate() {
        let risk = risk_at(t, k + 1);
        if risk < best_risk {
            best_risk = risk;
            best_t = t;
        }
    }

    let universal_factor = (2.0 * nf.ln()).sqrt();
    sigma * best_t.min(universal_factor)
}

/// Computes the threshold for a level's coefficients under the given
/// method.
pub fn threshold_for(method: ThresholdMethod, coeffs: &[f64], sigma: f64, n: usize) -> f64 {
    match method {
        ThresholdMethod::Universal => universal_threshold(sigma, n),
        ThresholdMethod::Minimax => minimax_threshold(sigma, n),
        ThresholdMethod::Sure => sure_threshold(coeffs, sigma),
    }
}

/// Applies the shrinkage nonlinearity in place.
pub fn apply_threshold(coeffs: &mut [f64], threshold: f64, kind: ThresholdType) {
    if threshold <= 0.0 {
        return;
    }
    match kind {
        ThresholdType::Soft => {
            for d in coeffs.iter_mut() {
                let shrunk = d.abs() - threshold;
                *d = if shrunk > 0.0 { d.signum() * shrunk } else { 0.0 };
            }
        }
        ThresholdType::Hard => {
            for d in coeffs.iter_mut() {
                if d.abs() <= threshold {
                    *d = 0.0;
                }
            }
        }
    }
}
