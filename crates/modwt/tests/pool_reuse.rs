//! Integration tests for buffer recycling through hot transform loops.

use vectorwave_modwt::{BoundaryMode, BufferPool, Modwt};
use vectorwave_wavelets::get_wavelet;

/// Pooled buffers produce identical results to fresh allocations.
#[test]
fn pooled_matches_allocating() {
    let modwt = Modwt::new(get_wavelet("db2").unwrap(), BoundaryMode::Periodic).unwrap();
    let pool = BufferPool::default();
    let x: Vec<f64> = (0..200).map(|i| (i as f64 * 0.13).sin()).collect();

    let baseline = modwt.forward(&x).unwrap();

    let mut approx = pool.acquire(x.len());
    let mut detail = pool.acquire(x.len());
    modwt.forward_into(&x, &mut approx, &mut detail).unwrap();
    assert_eq!(baseline.approx(), approx.as_slice());
    assert_eq!(baseline.detail(), detail.as_slice());
    pool.release(approx);
    pool.release(detail);
}

/// Simulate a block-processing loop that recycles its scratch buffers.
#[test]
fn hot_loop_reuses_buffers() {
    let modwt = Modwt::new(get_wavelet("haar").unwrap(), BoundaryMode::Periodic).unwrap();
    let pool = BufferPool::new(4);

    for block in 0..100u64 {
        let x: Vec<f64> = (0..256)
            .map(|i| ((i as u64 + block * 7) % 31) as f64 * 0.1)
            .collect();
        let mut approx = pool.acquire(256);
        let mut detail = pool.acquire(256);
        modwt.forward_into(&x, &mut approx, &mut detail).unwrap();
        pool.release(approx);
        pool.release(detail);
    }

    let stats = pool.stats();
    assert_eq!(stats.hits + stats.misses, 200);
    // After warmup every acquisition is a hit.
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 198);
}
