use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(0);

/// Generates a unique queue name with the given prefix.
pub(crate) fn generate_name(prefix: &str) -> String {
    format!("{}_{}", prefix, NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed))
}
