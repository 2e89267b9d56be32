//! End-to-end denoising quality and property tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use vectorwave_denoise::{
    DenoiseConfig, Denoiser, StreamingDenoiseConfig, StreamingDenoiser, ThresholdMethod,
    ThresholdType,
};
use vectorwave_modwt::BoundaryMode;
use vectorwave_wavelets::get_wavelet;

fn clean_signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            (2.0 * std::f64::consts::PI * t / 32.0).sin()
                + 0.5 * (2.0 * std::f64::consts::PI * t / 8.0).sin()
        })
        .collect()
}

fn add_noise(clean: &[f64], sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).unwrap();
    clean.iter().map(|&v| v + normal.sample(&mut rng)).collect()
}

fn snr_db(clean: &[f64], noisy: &[f64]) -> f64 {
    let signal_power: f64 = clean.iter().map(|v| v * v).sum();
    let noise_power: f64 = clean
        .iter()
        .zip(noisy)
        .map(|(c, n)| (c - n) * (c - n))
        .sum();
    10.0 * (signal_power / noise_power).log10()
}

/// DB4, universal soft, N=500, J=4, Gaussian noise sigma=0.2,
/// seed 42. The denoiser must buy at least 6 dB of SNR.
#[test]
fn db4_universal_soft_improves_snr() {
    let clean = clean_signal(500);
    let noisy = add_noise(&clean, 0.2, 42);

    let denoiser = Denoiser::new(
        get_wavelet("db4").unwrap(),
        BoundaryMode::Periodic,
        DenoiseConfig::new(4)
            .with_method(ThresholdMethod::Universal)
            .with_threshold_type(ThresholdType::Soft),
    )
    .unwrap();
    let result = denoiser.denoise(&noisy).unwrap();

    let before = snr_db(&clean, &noisy);
    let after = snr_db(&clean, result.signal());
    assert!(
        after - before >= 6.0,
        "SNR improvement {:.2} dB (before {:.2}, after {:.2})",
        after - before,
        before,
        after
    );
}

/// All three methods and both threshold types produce finite output and
/// never amplify the noise.
#[test]
fn all_methods_are_sane() {
    let clean = clean_signal(512);
    let noisy = add_noise(&clean, 0.3, 7);
    let before = snr_db(&clean, &noisy);

    for method in [
        ThresholdMethod::Universal,
        ThresholdMethod::Sure,
        ThresholdMethod::Minimax,
    ] {
        for kind in [ThresholdType::Soft, ThresholdType::Hard] {
            let denoiser = Denoiser::new(
                get_wavelet("sym4").unwrap(),
                BoundaryMode::Periodic,
                DenoiseConfig::new(3)
                    .with_method(method)
                    .with_threshold_type(kind),
            )
            .unwrap();
            let result = denoiser.denoise(&noisy).unwrap();
            assert!(result.signal().iter().all(|v| v.is_finite()));
            let after = snr_db(&clean, result.signal());
            assert!(
                after > before - 1.0,
                "{method:?}/{kind:?} degraded SNR: {before:.2} -> {after:.2}"
            );
        }
    }
}

/// Soft-threshold monotonicity through the full pipeline: a larger
/// threshold multiplier leaves less detail energy behind.
#[test]
fn stronger_thresholds_remove_more_energy() {
    let noisy = add_noise(&clean_signal(256), 0.25, 11);
    let mut last_energy = f64::INFINITY;
    for multiplier in [0.5, 1.0, 2.0] {
        let mut denoiser = StreamingDenoiser::new(
            get_wavelet("db4").unwrap(),
            BoundaryMode::Periodic,
            StreamingDenoiseConfig::new(3).with_threshold_multiplier(multiplier),
        )
        .unwrap();
        let cleaned = denoiser.denoise(&noisy).unwrap();
        let energy: f64 = cleaned.iter().map(|v| v * v).sum();
        assert!(
            energy <= last_energy + 1e-9,
            "energy grew at multiplier {multiplier}"
        );
        last_energy = energy;
    }
}

/// Streaming denoising improves every block once the noise window has
/// warmed up, and the online estimate settles near the true noise level.
#[test]
fn streaming_improves_blocks_after_warmup() {
    let block_len = 250;
    let clean = clean_signal(block_len * 4);
    let noisy = add_noise(&clean, 0.2, 42);

    let mut streaming = StreamingDenoiser::new(
        get_wavelet("db4").unwrap(),
        BoundaryMode::Periodic,
        StreamingDenoiseConfig::new(3).with_noise_window_size(block_len),
    )
    .unwrap();

    let mut improvements = Vec::new();
    for (k, block) in noisy.chunks(block_len).enumerate() {
        let cleaned = streaming.denoise(block).unwrap();
        let clean_block = &clean[k * block_len..(k + 1) * block_len];
        improvements.push(snr_db(clean_block, &cleaned) - snr_db(clean_block, block));
    }
    // After warmup every block should improve.
    assert!(
        improvements.iter().skip(1).all(|&d| d > 0.0),
        "improvements: {improvements:?}"
    );
    assert!(streaming.current_noise_level() > 0.1);
    assert!(streaming.current_noise_level() < 0.4);
}

/// The denoiser maps the zero signal to exactly zero.
#[test]
fn zero_in_zero_out() {
    let denoiser = Denoiser::new(
        get_wavelet("db4").unwrap(),
        BoundaryMode::Periodic,
        DenoiseConfig::new(4),
    )
    .unwrap();
    let result = denoiser.denoise(&vec![0.0; 500]).unwrap();
    assert!(result.signal().iter().all(|&v| v == 0.0));
}
