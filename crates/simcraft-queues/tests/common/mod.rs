#![allow(dead_code)]

use simcraft_queues::QueueStats;

pub fn assert_float_eq(x: f64, y: f64, eps: f64) {
    assert!(
        (x - y).abs() < eps || (x.max(y) - x.min(y)) / x.min(y) < eps,
        "Values do not match: {:.15} vs {:.15}",
        x,
        y
    );
}

/// Checks the invariants which must hold between any two queue operations.
pub fn check_invariants(stats: &QueueStats, len: usize, capacity: usize) {
    assert_eq!(stats.current_length(), len);
    assert_eq!((stats.entries() - stats.exits()) as usize, len);
    assert!(stats.max_length() >= len);
    if capacity > 0 {
        assert!(len <= capacity);
    }
}
