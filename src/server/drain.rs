// Connection drain module
// Waits for in-flight connections to finish after the listener is closed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until the active connection counter reaches zero or `timeout` passes.
///
/// Must run on the same `LocalSet` that spawned the connection tasks, otherwise
/// they never make progress. Returns the number of connections still open.
pub async fn drain_connections(active_connections: Arc<AtomicUsize>, timeout: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 || tokio::time::Instant::now() >= deadline {
            return remaining;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
