use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out strictly increasing fetch tickets. Clones share the counter.
///
/// A ticket is taken when a fetch is issued (or a local patch applied), not
/// when it completes, so the view state can tell a late response to an old
/// request from a fresh one.
#[derive(Debug, Clone, Default)]
pub struct FetchSequencer {
    next: Arc<AtomicU64>,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// First ticket is 1; 0 means "nothing applied yet" in the view state.
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }
}
