use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Ticket handed out when an external request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter. Only the most recently issued ticket is
/// current; responses carrying an older ticket are stale and dropped.
///
/// Cloning shares the counter, so a spawned task can check its ticket.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    latest: Arc<AtomicU64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
        assert!(second.id() > first.id());
    }

    #[tokio::test]
    async fn clones_share_the_counter() {
        let guard = RequestGuard::new();
        let t = guard.begin();
        let shared = guard.clone();
        let handle = tokio::spawn(async move { shared.is_current(t) });
        assert!(handle.await.unwrap());

        let _newer = guard.begin();
        let shared = guard.clone();
        let handle = tokio::spawn(async move { shared.is_current(t) });
        assert!(!handle.await.unwrap());
    }
}
