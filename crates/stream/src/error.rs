//! Error types for the vectorwave-stream crate.

use vectorwave_modwt::TransformError;

/// Error type for streaming operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StreamError {
    /// Returned when pushing to or subscribing on a closed stream.
    #[error("stream is closed")]
    Closed,

    /// Returned from `push` in block mode when a subscriber queue is full.
    ///
    /// The staged samples stay buffered; granting demand via `request`
    /// resumes emission.
    #[error("backpressure: a subscriber queue is full")]
    WouldBlock,

    /// Delivered to a subscriber in drop mode when its queue overflows and
    /// a result is discarded.
    #[error("subscriber queue overflowed, result dropped")]
    Overflow,

    /// Delivered to a subscriber whose callback panicked; the subscriber is
    /// removed and the stream continues for others.
    #[error("subscriber callback panicked, subscriber removed")]
    SubscriberPanicked,

    /// Returned when the block size cannot hold even one filter support.
    #[error("block size {block_size} smaller than filter length {min}")]
    BlockTooSmall {
        /// Configured block size.
        block_size: usize,
        /// Minimum usable block size (the filter length).
        min: usize,
    },

    /// Returned when the subscriber queue capacity is zero.
    #[error("queue capacity must be at least 1")]
    ZeroQueueCapacity,

    /// Returned when a subscriber id does not identify a live subscriber.
    #[error("unknown subscriber id {0}")]
    UnknownSubscriber(usize),

    /// A transform-layer failure while processing a block.
    #[error(transparent)]
    Transform(#[from] TransformError),
}
