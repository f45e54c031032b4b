//! Destinations for inbox progress updates.
//!
//! Delivery is best effort: a sink either takes the value immediately or
//! drops it. Producers never wait on consumers and no backlog builds up.

use tokio::sync::mpsc;

use inbox_types::SearchIndexStatus;

/// Non-blocking receiver of [`SearchIndexStatus`] updates.
pub trait StatusSink: Send + Sync {
    /// Offer a status without blocking. Returns `false` if it was dropped.
    fn try_deliver(&self, status: SearchIndexStatus) -> bool;
}

/// Single-slot mailbox: a full or closed channel drops the new value.
impl StatusSink for mpsc::Sender<SearchIndexStatus> {
    fn try_deliver(&self, status: SearchIndexStatus) -> bool {
        self.try_send(status).is_ok()
    }
}

/// Create a single-slot status channel for a UI consumer.
pub fn status_channel() -> (
    mpsc::Sender<SearchIndexStatus>,
    mpsc::Receiver<SearchIndexStatus>,
) {
    mpsc::channel(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_channel_drops() {
        let (tx, mut rx) = status_channel();
        assert!(tx.try_deliver(SearchIndexStatus::new(10)));
        assert!(!tx.try_deliver(SearchIndexStatus::new(20)));

        assert_eq!(rx.try_recv().unwrap(), SearchIndexStatus::new(10));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_drops() {
        let (tx, rx) = status_channel();
        drop(rx);
        assert!(!tx.try_deliver(SearchIndexStatus::new(10)));
    }
}
