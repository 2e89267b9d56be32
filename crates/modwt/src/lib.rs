//! # vectorwave-modwt
//!
//! Maximal Overlap Discrete Wavelet Transform (MODWT) for one-dimensional
//! real-valued signals: shift-invariant, non-decimated, arbitrary length.
//!
//! ## Architecture
//!
//! ```text
//! Modwt::forward()                       MultiLevelModwt::decompose()
//!   ├─ validate input                      ├─ validate input + level
//!   ├─ kernel::convolve(h0~)   (kernel.rs) ├─ LevelFilters::for_level() (filters.rs)
//!   └─ kernel::convolve(h1~)               └─ pyramid over kernel::convolve()
//!
//! forward_batch()              (batch.rs)  BufferPool                (pool.rs)
//!   ├─ pack SoA (t*B + b)                    └─ size-keyed bounded LIFO
//!   ├─ broadcast-tap batch kernel
//!   └─ unpack into ModwtResult values
//! ```
//!
//! ## Kernel selection
//!
//! | Condition | Kernel |
//! |-----------|--------|
//! | `N < 64` or vectorization disabled | scalar |
//! | `L ∈ {2, 8}` and `N >= 64` | specialized (Haar / DB4) |
//! | otherwise | lane-unrolled vector |
//!
//! Selection is deterministic in the signal size, filter length, and the
//! [`PerformanceInfo`] snapshot; all kernels agree to within 1e-12
//! relative.
//!
//! ## Quick start
//!
//! ```
//! use vectorwave_modwt::{BoundaryMode, Modwt};
//! use vectorwave_wavelets::get_wavelet;
//!
//! let modwt = Modwt::new(get_wavelet("haar").unwrap(), BoundaryMode::Periodic).unwrap();
//! let result = modwt.forward(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
//! let restored = modwt.inverse(&result).unwrap();
//! assert!((restored[0] - 1.0).abs() < 1e-12);
//! ```
//!
//! Perfect reconstruction holds for every orthogonal wavelet under
//! periodic boundaries to within `10 * eps * max|x|`. Zero padding is
//! best-effort near the edges.

mod batch;
mod boundary;
mod error;
pub mod filters;
pub mod kernel;
mod multi;
mod pool;
mod transform;

pub use batch::{forward_batch, inverse_batch, MIN_BATCH, MIN_BATCH_LEN};
pub use boundary::BoundaryMode;
pub use error::TransformError;
pub use kernel::{performance_info, select_kernel, KernelKind, PerformanceInfo, VECTOR_MIN_LEN};
pub use multi::{
    max_level, MultiLevelModwt, MultiLevelModwtResult, MutableMultiLevelModwtResult,
};
pub use pool::{BufferPool, PoolStats, DEFAULT_MAX_PER_SIZE};
pub use transform::{Modwt, ModwtResult};
