//! # vectorwave-denoise
//!
//! Threshold denoising over the multi-level MODWT.
//!
//! ## Pipeline
//!
//! ```text
//! denoise(x)
//!   ├─ MultiLevelModwt::decompose(x, J)
//!   ├─ sigma = median(|d1|) / 0.6745          (noise.rs)
//!   ├─ per level j: t_j by Universal/SURE/Minimax (threshold.rs)
//!   ├─ soft/hard shrinkage of d_j in place
//!   └─ MultiLevelModwt::reconstruct
//! ```
//!
//! A zero noise estimate (constant finest level) is not an error: the
//! thresholds collapse to zero and the signal passes through unchanged.
//!
//! The streaming variant keeps an online noise estimate over a ring of
//! recent finest-scale detail magnitudes (`Mad` recomputes the median of
//! the full ring each block, `Adaptive` blends block estimates
//! exponentially) and exposes `current_noise_level()` and
//! `samples_processed()`.

mod config;
mod denoiser;
mod error;
mod noise;
mod streaming;
mod threshold;

pub use config::{DenoiseConfig, StreamingDenoiseConfig};
pub use denoiser::{DenoiseResult, Denoiser};
pub use error::DenoiseError;
pub use noise::{mad_sigma, NoiseEstimation};
pub use streaming::StreamingDenoiser;
pub use threshold::{
    apply_threshold, minimax_threshold, sure_threshold, threshold_for, universal_threshold,
    ThresholdMethod, ThresholdType,
};
