//! Streaming end-to-end behavior: chunking equivalence, ordering,
//! backpressure.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use vectorwave_modwt::{BoundaryMode, Modwt, ModwtResult};
use vectorwave_stream::{
    BackpressureMode, ResultSink, StreamError, StreamingConfig, StreamingProcessor,
};
use vectorwave_wavelets::haar;

#[derive(Default)]
struct Collected {
    results: Vec<ModwtResult>,
    errors: usize,
    completed: bool,
}

struct Collector(Rc<RefCell<Collected>>);

impl ResultSink for Collector {
    fn on_result(&mut self, result: &ModwtResult) {
        self.0.borrow_mut().results.push(result.clone());
    }
    fn on_error(&mut self, _error: &StreamError) {
        self.0.borrow_mut().errors += 1;
    }
    fn on_complete(&mut self) {
        self.0.borrow_mut().completed = true;
    }
}

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.011).sin() + 0.002 * i as f64).collect()
}

/// Block size 480, five blocks fed as chunks 100+380+480+480+480+480.
/// Exactly 5 results, each identical to the forward transform of the
/// corresponding 480-sample slice.
#[test]
fn chunking_matches_blockwise_forward() {
    let block = 480;
    let samples = ramp(5 * block);

    let mut processor = StreamingProcessor::new(
        haar(),
        BoundaryMode::Periodic,
        StreamingConfig::new(block),
    )
    .unwrap();
    let state = Rc::new(RefCell::new(Collected::default()));
    processor
        .subscribe(Box::new(Collector(Rc::clone(&state))), u64::MAX)
        .unwrap();

    let mut offset = 0;
    for chunk_len in [100, 380, 480, 480, 480, 480] {
        processor.push(&samples[offset..offset + chunk_len]).unwrap();
        offset += chunk_len;
    }
    assert_eq!(offset, samples.len());
    assert_eq!(processor.blocks_emitted(), 5);

    let modwt = Modwt::new(haar(), BoundaryMode::Periodic).unwrap();
    let collected = state.borrow();
    assert_eq!(collected.results.len(), 5);
    for (k, result) in collected.results.iter().enumerate() {
        let expected = modwt.forward(&samples[k * block..(k + 1) * block]).unwrap();
        for (a, b) in expected.approx().iter().zip(result.approx()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
        for (a, b) in expected.detail().iter().zip(result.detail()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }
}

/// Ordering: result k arrives before result k+1, regardless of chunking.
#[test]
fn delivery_preserves_block_order() {
    let block = 32;
    let mut processor = StreamingProcessor::new(
        haar(),
        BoundaryMode::Periodic,
        StreamingConfig::new(block),
    )
    .unwrap();
    let state = Rc::new(RefCell::new(Collected::default()));
    processor
        .subscribe(Box::new(Collector(Rc::clone(&state))), u64::MAX)
        .unwrap();

    // Mark each block with a distinct constant so order is observable.
    for k in 0..10 {
        processor.push(&vec![k as f64; block]).unwrap();
    }
    let collected = state.borrow();
    assert_eq!(collected.results.len(), 10);
    for (k, result) in collected.results.iter().enumerate() {
        // A constant block has approximation == constant everywhere (Haar).
        assert_abs_diff_eq!(result.approx()[5], k as f64, epsilon = 1e-12);
    }
}

/// Two subscribers with different demand see consistent prefixes.
#[test]
fn demand_limits_delivery_per_subscriber() {
    let block = 64;
    let mut processor = StreamingProcessor::new(
        haar(),
        BoundaryMode::Periodic,
        StreamingConfig::new(block).with_queue_capacity(16),
    )
    .unwrap();
    let eager = Rc::new(RefCell::new(Collected::default()));
    let lazy = Rc::new(RefCell::new(Collected::default()));
    processor
        .subscribe(Box::new(Collector(Rc::clone(&eager))), u64::MAX)
        .unwrap();
    let lazy_id = processor
        .subscribe(Box::new(Collector(Rc::clone(&lazy))), 2)
        .unwrap();

    processor.push(&ramp(block * 6)).unwrap();
    assert_eq!(eager.borrow().results.len(), 6);
    assert_eq!(lazy.borrow().results.len(), 2);

    processor.request(lazy_id, 3).unwrap();
    assert_eq!(lazy.borrow().results.len(), 5);

    // The lazy subscriber's prefix matches the eager one's.
    let eager_ref = eager.borrow();
    let lazy_ref = lazy.borrow();
    for (a, b) in eager_ref.results.iter().zip(&lazy_ref.results) {
        assert_eq!(a.approx(), b.approx());
    }
}

/// Drop mode: at most Q results sit in a zero-demand subscriber's queue;
/// overflow is reported, and the stream keeps going.
#[test]
fn drop_mode_bounds_queue() {
    let block = 64;
    let q = 3;
    let mut processor = StreamingProcessor::new(
        haar(),
        BoundaryMode::Periodic,
        StreamingConfig::new(block)
            .with_backpressure(BackpressureMode::Drop)
            .with_queue_capacity(q),
    )
    .unwrap();
    let state = Rc::new(RefCell::new(Collected::default()));
    let id = processor
        .subscribe(Box::new(Collector(Rc::clone(&state))), 0)
        .unwrap();

    processor.push(&ramp(block * 8)).unwrap();
    assert_eq!(state.borrow().errors, 5); // 8 produced, 3 queued

    // The queued prefix is still intact and ordered.
    processor.request(id, u64::MAX).unwrap();
    assert_eq!(state.borrow().results.len(), 3);
}

/// Block mode: a full queue stalls push without losing samples.
#[test]
fn block_mode_backpressure_round_trip() {
    let block = 64;
    let mut processor = StreamingProcessor::new(
        haar(),
        BoundaryMode::Periodic,
        StreamingConfig::new(block).with_queue_capacity(2),
    )
    .unwrap();
    let state = Rc::new(RefCell::new(Collected::default()));
    let id = processor
        .subscribe(Box::new(Collector(Rc::clone(&state))), 0)
        .unwrap();

    let samples = ramp(block * 5);
    let mut accepted = 0;
    for chunk in samples.chunks(block) {
        match processor.push(chunk) {
            Ok(()) => accepted += chunk.len(),
            Err(StreamError::WouldBlock) => {
                accepted += chunk.len();
                processor.request(id, 4).unwrap();
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    processor.request(id, u64::MAX).unwrap();
    processor.close().unwrap();

    assert_eq!(accepted, samples.len());
    assert_eq!(state.borrow().results.len(), 5);
    assert!(state.borrow().completed);
    assert_eq!(state.borrow().errors, 0);
}

/// Close flushes a zero-padded residual block whose leading samples match
/// the tail of the stream.
#[test]
fn close_flush_contains_residue() {
    let block = 64;
    let mut processor = StreamingProcessor::new(
        haar(),
        BoundaryMode::Periodic,
        StreamingConfig::new(block),
    )
    .unwrap();
    let state = Rc::new(RefCell::new(Collected::default()));
    processor
        .subscribe(Box::new(Collector(Rc::clone(&state))), u64::MAX)
        .unwrap();

    processor.push(&[7.0; 40]).unwrap();
    processor.close().unwrap();

    let collected = state.borrow();
    assert_eq!(collected.results.len(), 1);
    assert!(collected.completed);
    let modwt = Modwt::new(haar(), BoundaryMode::Periodic).unwrap();
    let mut padded = vec![7.0; 40];
    padded.resize(block, 0.0);
    let expected = modwt.forward(&padded).unwrap();
    assert_eq!(collected.results[0].approx(), expected.approx());
}
