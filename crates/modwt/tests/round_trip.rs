//! Reconstruction and invariance properties of the single- and multi-level
//! transforms across the whole catalog.

use approx::assert_abs_diff_eq;
use vectorwave_modwt::{max_level, BoundaryMode, Modwt, MultiLevelModwt};
use vectorwave_wavelets::{get_wavelet, orthogonal_wavelets};

fn test_signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            (t * 0.073).sin() + 0.4 * (t * 0.31).cos() + 0.01 * t
        })
        .collect()
}

/// Perfect reconstruction for every orthogonal wavelet under periodic
/// boundaries, at several awkward (non power-of-two) lengths.
#[test]
fn orthogonal_periodic_reconstruction() {
    for wavelet in orthogonal_wavelets() {
        for n in [37, 100, 333, 1024] {
            if n < wavelet.filter_len() {
                continue;
            }
            let x = test_signal(n);
            let max_x = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
            let modwt = Modwt::new(wavelet.clone(), BoundaryMode::Periodic).unwrap();
            let restored = modwt.inverse(&modwt.forward(&x).unwrap()).unwrap();
            let tolerance = 10.0 * f64::EPSILON * max_x;
            for (i, (a, b)) in x.iter().zip(&restored).enumerate() {
                assert!(
                    (a - b).abs() <= tolerance.max(1e-13),
                    "{} n={} i={}: {} vs {}",
                    wavelet.name(),
                    n,
                    i,
                    a,
                    b
                );
            }
        }
    }
}

/// Haar, periodic, N=7: inverse recovers the input within 1e-14.
#[test]
fn haar_length_seven() {
    let modwt = Modwt::new(get_wavelet("haar").unwrap(), BoundaryMode::Periodic).unwrap();
    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let result = modwt.forward(&x).unwrap();
    assert_eq!(result.approx().len(), 7);
    assert_eq!(result.detail().len(), 7);
    let restored = modwt.inverse(&result).unwrap();
    for (a, b) in x.iter().zip(&restored) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-14);
    }
}

/// DB4 (8 taps), periodic, N=777, J=4: inverse within 1e-12.
#[test]
fn db4_multi_level_777() {
    let wavelet = get_wavelet("db4").unwrap();
    assert!(max_level(777, wavelet.filter_len()) >= 4);
    let transform = MultiLevelModwt::new(wavelet, BoundaryMode::Periodic).unwrap();
    let x = test_signal(777);
    let result = transform.decompose(&x, 4).unwrap();
    assert_eq!(result.levels(), 4);
    for level in 1..=4 {
        assert_eq!(result.detail(level).unwrap().len(), 777);
    }
    assert_eq!(result.approx().len(), 777);
    let restored = transform.reconstruct(&result).unwrap();
    for (a, b) in x.iter().zip(&restored) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
}

/// bior1.3, periodic, constant signal: exact reconstruction.
#[test]
fn bior1_3_constant_signal() {
    let modwt = Modwt::new(get_wavelet("bior1.3").unwrap(), BoundaryMode::Periodic).unwrap();
    let x = [3.0; 16];
    let restored = modwt.inverse(&modwt.forward(&x).unwrap()).unwrap();
    for v in &restored {
        assert_abs_diff_eq!(*v, 3.0, epsilon = 1e-13);
    }
}

/// Multi-level decomposition preserves length at every level for every
/// orthogonal wavelet.
#[test]
fn multi_level_length_preservation() {
    for wavelet in orthogonal_wavelets() {
        let n = 300;
        let levels = max_level(n, wavelet.filter_len()).min(3);
        if levels == 0 {
            continue;
        }
        let transform = MultiLevelModwt::new(wavelet, BoundaryMode::Periodic).unwrap();
        let result = transform.decompose(&test_signal(n), levels).unwrap();
        for level in 1..=levels {
            assert_eq!(result.detail(level).unwrap().len(), n);
        }
        assert_eq!(result.approx().len(), n);
    }
}

/// Cyclic shift invariance: shifting the input permutes the coefficients
/// but leaves the multiset of magnitudes unchanged.
#[test]
fn shift_invariance_of_magnitudes() {
    let modwt = Modwt::new(get_wavelet("db2").unwrap(), BoundaryMode::Periodic).unwrap();
    let x = test_signal(128);
    let shift = 17;
    let shifted: Vec<f64> = (0..x.len()).map(|i| x[(i + x.len() - shift) % x.len()]).collect();

    let base = modwt.forward(&x).unwrap();
    let moved = modwt.forward(&shifted).unwrap();

    let sorted = |v: &[f64]| {
        let mut m: Vec<f64> = v.iter().map(|c| c.abs()).collect();
        m.sort_by(|a, b| a.partial_cmp(b).unwrap());
        m
    };
    for (a, b) in sorted(base.approx()).iter().zip(sorted(moved.approx()).iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
    for (a, b) in sorted(base.detail()).iter().zip(sorted(moved.detail()).iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    // Under periodic boundaries the coefficients shift exactly with the input.
    for t in 0..x.len() {
        assert_abs_diff_eq!(
            moved.detail()[(t + shift) % x.len()],
            base.detail()[t],
            epsilon = 1e-12
        );
    }
}

/// Zero padding keeps output lengths and stays finite, but reconstruction
/// near the edges is best-effort only.
#[test]
fn zero_padding_interior_reconstruction() {
    let wavelet = get_wavelet("db2").unwrap();
    let filter_len = wavelet.filter_len();
    let modwt = Modwt::new(wavelet, BoundaryMode::ZeroPadding).unwrap();
    let x = test_signal(256);
    let result = modwt.forward(&x).unwrap();
    assert_eq!(result.approx().len(), 256);
    let restored = modwt.inverse(&result).unwrap();
    // Away from both edges the transform still inverts cleanly.
    for i in filter_len..256 - filter_len {
        assert_abs_diff_eq!(x[i], restored[i], epsilon = 1e-10);
    }
}
