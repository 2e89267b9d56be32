//! Streaming processor configuration.

/// What to do when a subscriber's queue is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackpressureMode {
    /// Stall emission: `push` returns `WouldBlock` and keeps the samples
    /// buffered until demand is granted.
    #[default]
    Block,
    /// Drop the overflowing result and notify the subscriber via
    /// `on_error`.
    Drop,
}

/// What to do with a partial block when the stream closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Zero-pad the residue to a full block and emit one final result.
    #[default]
    ZeroPad,
    /// Discard the residue.
    Discard,
}

/// Frozen configuration for a [`StreamingProcessor`](crate::StreamingProcessor).
///
/// # Example
///
/// ```
/// use vectorwave_stream::{BackpressureMode, FlushPolicy, StreamingConfig};
///
/// let config = StreamingConfig::new(480)
///     .with_backpressure(BackpressureMode::Drop)
///     .with_queue_capacity(8)
///     .with_flush(FlushPolicy::Discard);
/// assert_eq!(config.block_size(), 480);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamingConfig {
    /// Samples per emitted result.
    block_size: usize,
    /// Full-queue policy.
    backpressure: BackpressureMode,
    /// Bound on results queued per subscriber while its demand is zero.
    queue_capacity: usize,
    /// Residue policy on close.
    flush: FlushPolicy,
}

impl StreamingConfig {
    /// Creates a configuration with the given block size.
    ///
    /// Defaults: `backpressure = Block`, `queue_capacity = 16`,
    /// `flush = ZeroPad`.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            backpressure: BackpressureMode::Block,
            queue_capacity: 16,
            flush: FlushPolicy::ZeroPad,
        }
    }

    /// Sets the full-queue policy.
    pub fn with_backpressure(mut self, mode: BackpressureMode) -> Self {
        self.backpressure = mode;
        self
    }

    /// Sets the per-subscriber queue bound.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Sets the close-time residue policy.
    pub fn with_flush(mut self, flush: FlushPolicy) -> Self {
        self.flush = flush;
        self
    }

    /// Returns the block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the full-queue policy.
    pub fn backpressure(&self) -> BackpressureMode {
        self.backpressure
    }

    /// Returns the per-subscriber queue bound.
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Returns the close-time residue policy.
    pub fn flush(&self) -> FlushPolicy {
        self.flush
    }
}
