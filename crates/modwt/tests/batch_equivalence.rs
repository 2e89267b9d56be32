//! Batch SoA processing matches the sequential path.

use approx::assert_relative_eq;
use vectorwave_modwt::{forward_batch, inverse_batch, BoundaryMode, Modwt};
use vectorwave_wavelets::get_wavelet;

/// Batch Haar, B=64, N=333, deterministic sinusoids
/// `x_b[t] = sin(2 pi t / (10 + b))`; batch equals sequential within 1e-12
/// relative and both round-trip through the inverse.
#[test]
fn batch_haar_64_by_333() {
    let modwt = Modwt::new(get_wavelet("haar").unwrap(), BoundaryMode::Periodic).unwrap();
    let signals: Vec<Vec<f64>> = (0..64)
        .map(|b| {
            (0..333)
                .map(|t| (2.0 * std::f64::consts::PI * t as f64 / (10 + b) as f64).sin())
                .collect()
        })
        .collect();

    let batch = forward_batch(&modwt, &signals).unwrap();
    assert_eq!(batch.len(), 64);

    for (signal, result) in signals.iter().zip(&batch) {
        let single = modwt.forward(signal).unwrap();
        for (a, b) in single.approx().iter().zip(result.approx()) {
            assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-14);
        }
        for (a, b) in single.detail().iter().zip(result.detail()) {
            assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-14);
        }
    }

    let restored = inverse_batch(&modwt, &batch).unwrap();
    for (signal, back) in signals.iter().zip(&restored) {
        for (a, b) in signal.iter().zip(back) {
            assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-12);
        }
    }
}

#[test]
fn batch_db4_matches_sequential() {
    let modwt = Modwt::new(get_wavelet("db4").unwrap(), BoundaryMode::Periodic).unwrap();
    let signals: Vec<Vec<f64>> = (0..16)
        .map(|b| (0..256).map(|t| ((t + 3 * b) as f64 * 0.07).cos()).collect())
        .collect();
    let batch = forward_batch(&modwt, &signals).unwrap();
    for (signal, result) in signals.iter().zip(&batch) {
        let single = modwt.forward(signal).unwrap();
        for (a, b) in single.detail().iter().zip(result.detail()) {
            assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-14);
        }
    }
}

#[test]
fn batch_biorthogonal_round_trip_on_constants() {
    let modwt = Modwt::new(get_wavelet("bior1.3").unwrap(), BoundaryMode::Periodic).unwrap();
    let signals: Vec<Vec<f64>> = (0..8).map(|b| vec![b as f64 + 1.0; 96]).collect();
    let results = forward_batch(&modwt, &signals).unwrap();
    let restored = inverse_batch(&modwt, &results).unwrap();
    for (signal, back) in signals.iter().zip(&restored) {
        for (a, b) in signal.iter().zip(back) {
            assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-12);
        }
    }
}
