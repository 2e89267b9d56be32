//! The block-oriented streaming MODWT processor.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};
use vectorwave_modwt::{BoundaryMode, Modwt, ModwtResult};
use vectorwave_wavelets::Wavelet;

use crate::config::{BackpressureMode, FlushPolicy, StreamingConfig};
use crate::error::StreamError;
use crate::sink::{ResultSink, SubscriberId};

struct Subscriber {
    id: usize,
    sink: Box<dyn ResultSink>,
    demand: u64,
    queue: VecDeque<ModwtResult>,
}

/// Runs `on_result` under panic isolation. Returns `false` if the sink
/// panicked and must be removed.
fn invoke_result(sub: &mut Subscriber, result: &ModwtResult) -> bool {
    if catch_unwind(AssertUnwindSafe(|| sub.sink.on_result(result))).is_ok() {
        return true;
    }
    warn!(subscriber = sub.id, "subscriber panicked in on_result, removing");
    let _ = catch_unwind(AssertUnwindSafe(|| {
        sub.sink.on_error(&StreamError::SubscriberPanicked)
    }));
    false
}

/// Runs `on_error` under panic isolation. Returns `false` if the sink
/// panicked and must be removed.
fn invoke_error(sub: &mut Subscriber, error: &StreamError) -> bool {
    if catch_unwind(AssertUnwindSafe(|| sub.sink.on_error(error))).is_ok() {
        return true;
    }
    warn!(subscriber = sub.id, "subscriber panicked in on_error, removing");
    false
}

/// Block-oriented streaming MODWT publisher.
///
/// Samples accumulate until a full block is available; each completed
/// block runs through the single-level forward transform independently
/// (no inter-block continuity is attempted) and the result is delivered
/// synchronously, in subscription order, to every subscriber with
/// positive demand. Results produced while a subscriber's demand is zero
/// queue up to the configured capacity; the backpressure mode decides
/// what happens beyond that.
///
/// The processor is single-threaded cooperative: all state mutation
/// happens on the caller's thread and delivery is reentrant-free. For a
/// given stream, result `k` is always delivered before result `k + 1`.
///
/// # Example
///
/// ```
/// use vectorwave_modwt::{BoundaryMode, ModwtResult};
/// use vectorwave_stream::{ResultSink, StreamingConfig, StreamingProcessor};
/// use vectorwave_wavelets::haar;
///
/// struct Counter(usize);
/// impl ResultSink for Counter {
///     fn on_result(&mut self, _result: &ModwtResult) {
///         self.0 += 1;
///     }
/// }
///
/// let mut processor = StreamingProcessor::new(
///     haar(),
///     BoundaryMode::Periodic,
///     StreamingConfig::new(64),
/// )
/// .unwrap();
/// processor.subscribe(Box::new(Counter(0)), u64::MAX).unwrap();
/// processor.push(&[0.5; 200]).unwrap();
/// assert_eq!(processor.blocks_emitted(), 3);
/// processor.close().unwrap();
/// ```
pub struct StreamingProcessor {
    modwt: Modwt,
    config: StreamingConfig,
    buffer: Vec<f64>,
    subscribers: Vec<Subscriber>,
    next_id: usize,
    samples_processed: u64,
    blocks_emitted: u64,
    closed: bool,
}

impl std::fmt::Debug for StreamingProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingProcessor")
            .field("modwt", &self.modwt)
            .field("config", &self.config)
            .field("buffer_len", &self.buffer.len())
            .field("subscriber_count", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .field("samples_processed", &self.samples_processed)
            .field("blocks_emitted", &self.blocks_emitted)
            .field("closed", &self.closed)
            .finish()
    }
}

impl StreamingProcessor {
    /// Creates a streaming processor.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`StreamError::BlockTooSmall`] | `block_size` below the wavelet's filter length |
    /// | [`StreamError::ZeroQueueCapacity`] | `queue_capacity` is 0 |
    /// | [`StreamError::Transform`] | continuous wavelet |
    pub fn new(
        wavelet: Wavelet,
        boundary: BoundaryMode,
        config: StreamingConfig,
    ) -> Result<Self, StreamError> {
        if config.queue_capacity() == 0 {
            return Err(StreamError::ZeroQueueCapacity);
        }
        let min = wavelet.filter_len();
        if config.block_size() < min {
            return Err(StreamError::BlockTooSmall {
                block_size: config.block_size(),
                min,
            });
        }
        let modwt = Modwt::new(wavelet, boundary)?;
        Ok(Self {
            modwt,
            config,
            buffer: Vec::with_capacity(config.block_size()),
            subscribers: Vec::new(),
            next_id: 0,
            samples_processed: 0,
            blocks_emitted: 0,
            closed: false,
        })
    }

    /// Registers a sink with an initial demand and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] after `close`.
    pub fn subscribe(
        &mut self,
        sink: Box<dyn ResultSink>,
        initial_demand: u64,
    ) -> Result<SubscriberId, StreamError> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            sink,
            demand: initial_demand,
            queue: VecDeque::new(),
        });
        Ok(SubscriberId(id))
    }

    /// Removes a subscriber. Effective immediately; the sink receives no
    /// further callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnknownSubscriber`] for a stale id.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> Result<(), StreamError> {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id.0);
        if self.subscribers.len() == before {
            return Err(StreamError::UnknownSubscriber(id.0));
        }
        Ok(())
    }

    /// Grants a subscriber up to `n` additional results.
    ///
    /// Queued results drain first, then any blocks stalled on
    /// backpressure are emitted.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] after `close`, or
    /// [`StreamError::UnknownSubscriber`] for a stale id.
    pub fn request(&mut self, id: SubscriberId, n: u64) -> Result<(), StreamError> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        let index = self
            .subscribers
            .iter()
            .position(|s| s.id == id.0)
            .ok_or(StreamError::UnknownSubscriber(id.0))?;
        let mut dead = None;
        {
            let sub = &mut self.subscribers[index];
            sub.demand = sub.demand.saturating_add(n);
            while sub.demand > 0 {
                let Some(result) = sub.queue.pop_front() else {
                    break;
                };
                sub.demand -= 1;
                if !invoke_result(sub, &result) {
                    dead = Some(sub.id);
                    break;
                }
            }
        }
        if let Some(id) = dead {
            self.subscribers.retain(|s| s.id != id);
            return Ok(());
        }
        // Granting demand may unblock stalled emission.
        match self.drain_ready() {
            Err(StreamError::WouldBlock) => Ok(()),
            other => other,
        }
    }

    /// Appends samples, emitting one result per completed block.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`StreamError::Closed`] | stream already closed |
    /// | [`StreamError::WouldBlock`] | block mode and a subscriber queue is full; samples stay buffered |
    /// | [`StreamError::Transform`] | non-finite samples in a block |
    pub fn push(&mut self, chunk: &[f64]) -> Result<(), StreamError> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.buffer.extend_from_slice(chunk);
        self.samples_processed += chunk.len() as u64;
        self.drain_ready()
    }

    /// Flushes the residual buffer per the flush policy, delivers
    /// `on_complete` to every subscriber, and marks the stream terminal.
    /// Idempotent.
    pub fn close(&mut self) -> Result<(), StreamError> {
        if self.closed {
            return Ok(());
        }
        // Blocks stalled on backpressure are emitted now; close-time
        // delivery falls back to the overflow path when a queue is full.
        let block_size = self.config.block_size();
        while self.buffer.len() >= block_size {
            let block: Vec<f64> = self.buffer.drain(..block_size).collect();
            let result = self.modwt.forward(&block)?;
            self.blocks_emitted += 1;
            self.deliver(result);
        }
        if !self.buffer.is_empty() {
            match self.config.flush() {
                FlushPolicy::ZeroPad => {
                    let mut block = std::mem::take(&mut self.buffer);
                    debug!(
                        residue = block.len(),
                        block_size = self.config.block_size(),
                        "zero-padding residual block on close"
                    );
                    block.resize(self.config.block_size(), 0.0);
                    let result = self.modwt.forward(&block)?;
                    self.blocks_emitted += 1;
                    self.deliver(result);
                }
                FlushPolicy::Discard => {
                    debug!(residue = self.buffer.len(), "discarding residue on close");
                    self.buffer.clear();
                }
            }
        }
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for sub in &mut subscribers {
            let _ = catch_unwind(AssertUnwindSafe(|| sub.sink.on_complete()));
        }
        self.closed = true;
        Ok(())
    }

    /// Returns the total samples accepted so far.
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    /// Returns the number of results emitted so far.
    pub fn blocks_emitted(&self) -> u64 {
        self.blocks_emitted
    }

    /// Returns how many samples are waiting for a full block.
    pub fn buffer_level(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` after `close`.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn any_queue_full(&self) -> bool {
        self.subscribers
            .iter()
            .any(|s| s.demand == 0 && s.queue.len() >= self.config.queue_capacity())
    }

    fn drain_ready(&mut self) -> Result<(), StreamError> {
        let block_size = self.config.block_size();
        while self.buffer.len() >= block_size {
            if self.config.backpressure() == BackpressureMode::Block && self.any_queue_full() {
                return Err(StreamError::WouldBlock);
            }
            let block: Vec<f64> = self.buffer.drain(..block_size).collect();
            let result = self.modwt.forward(&block)?;
            self.blocks_emitted += 1;
            self.deliver(result);
        }
        Ok(())
    }

    fn deliver(&mut self, result: ModwtResult) {
        let capacity = self.config.queue_capacity();
        let mut dead = Vec::new();
        for sub in &mut self.subscribers {
            if sub.demand > 0 {
                sub.demand -= 1;
                if !invoke_result(sub, &result) {
                    dead.push(sub.id);
                }
            } else if sub.queue.len() < capacity {
                sub.queue.push_back(result.clone());
            } else {
                // Only reachable in drop mode (block mode stalls before
                // producing) and on the forced close-time flush.
                debug!(subscriber = sub.id, "queue full, dropping result");
                if !invoke_error(sub, &StreamError::Overflow) {
                    dead.push(sub.id);
                }
            }
        }
        if !dead.is_empty() {
            self.subscribers.retain(|s| !dead.contains(&s.id));
        }
    }
}
