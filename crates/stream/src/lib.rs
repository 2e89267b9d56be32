//! # vectorwave-stream
//!
//! Block-oriented streaming MODWT: arbitrary-sized sample chunks in, one
//! transform result per completed block out, delivered to subscribers
//! with demand-counter backpressure.
//!
//! ## Flow
//!
//! ```text
//! push(chunk)
//!   ├─ accumulate samples (buffer < block_size)
//!   └─ per full block
//!        ├─ Modwt::forward(block)        (blocks are independent)
//!        └─ deliver to each subscriber, in subscription order
//!             ├─ demand > 0   → on_result (synchronous)
//!             ├─ queue < Q    → enqueue
//!             └─ queue full   → Block: stall push / Drop: on_error
//! ```
//!
//! The processor is single-threaded cooperative: every mutation runs on
//! the caller's thread, subscribers are invoked synchronously to preserve
//! ordering, and sinks that need parallelism copy the result. Per
//! subscriber, result `k` is always delivered before `k + 1`.
//!
//! See [`StreamingConfig`] for the block size, backpressure mode, and
//! close-time flush policy.

mod config;
mod error;
mod processor;
mod sink;

pub use config::{BackpressureMode, FlushPolicy, StreamingConfig};
pub use error::StreamError;
pub use processor::StreamingProcessor;
pub use sink::{ResultSink, SubscriberId};
