//! # vectorwave-wavelets
//!
//! Wavelet filter catalog: immutable filter banks keyed by name.
//!
//! ## Catalog
//!
//! | Family | Names | Kind |
//! |--------|-------|------|
//! | Haar | `haar` | orthogonal |
//! | Daubechies | `db2`, `db4`, `db6`, `db8` | orthogonal |
//! | Symlet | `sym2`, `sym3`, `sym4` | orthogonal |
//! | Coiflet | `coif1`, `coif2` | orthogonal |
//! | Biorthogonal spline | `bior1.1`, `bior1.3`, `bior2.2`, `bior3.1`, `bior4.4` | biorthogonal |
//! | Continuous | `morl`, `mexh` | continuous (no discrete filter bank) |
//!
//! ## Quick start
//!
//! ```
//! use vectorwave_wavelets::{get_wavelet, WaveletKind};
//!
//! let w = get_wavelet("haar").unwrap();
//! assert_eq!(w.kind(), WaveletKind::Orthogonal);
//! assert_eq!(w.dec_low().len(), 2);
//! ```
//!
//! Orthogonal entries store the low-pass decomposition filter and derive
//! the remaining channels through the quadrature mirror relation.
//! Biorthogonal entries carry independent analysis/synthesis banks plus
//! the reconstruction scale and cyclic group delay their synthesis needs.
//! Continuous entries are catalog placeholders that discrete transforms
//! reject.

mod catalog;
mod error;
mod families;
mod wavelet;

pub use catalog::{
    biorthogonal_wavelets, get_wavelet, orthogonal_wavelets, BIORTHOGONAL_NAMES,
    CONTINUOUS_NAMES, ORTHOGONAL_NAMES,
};
pub use error::WaveletError;
pub use families::{
    bior1_1, bior1_3, bior2_2, bior3_1, bior4_4, coiflet, daubechies, haar, mexican_hat, morlet,
    symlet,
};
pub use wavelet::{Wavelet, WaveletKind};
