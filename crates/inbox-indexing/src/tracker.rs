//! Inbox-wide index progress.
//!
//! Holds one completeness snapshot per tracked conversation behind a single
//! lock. Mutations only mark the aggregate stale; the next read recomputes
//! it in one pass over all conversations and caches the result.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use inbox_types::{ConvId, ConversationRange, SearchIndexStatus};

use crate::completeness::{truncated_percent, CompletenessCalculator, CompletenessSnapshot};
use crate::error::IndexingError;
use crate::record::ConversationIndexRecord;
use crate::sink::StatusSink;

#[derive(Debug)]
struct TrackerState {
    inbox: HashMap<ConvId, CompletenessSnapshot>,
    dirty: bool,
    cached_percent: u8,
    recomputes: u64,
}

impl TrackerState {
    fn percent_indexed(&mut self) -> u8 {
        if self.dirty {
            let (num_missing, num_msgs) = self
                .inbox
                .values()
                .fold((0u64, 0u64), |(missing, msgs), status| {
                    (missing + status.num_missing, msgs + status.num_msgs)
                });
            self.cached_percent = if num_msgs == 0 {
                100
            } else {
                truncated_percent(num_missing, num_msgs)
            };
            self.dirty = false;
            self.recomputes += 1;
            debug!(
                conversations = self.inbox.len(),
                num_missing,
                num_msgs,
                percent = self.cached_percent,
                "Recomputed inbox index progress"
            );
        }
        self.cached_percent
    }
}

/// Thread-safe aggregate of index completeness across an inbox.
///
/// Share via `Arc` between the indexer and status readers. Every operation
/// holds the lock for its whole duration; the only outward call made under
/// the lock is a non-blocking [`StatusSink::try_deliver`].
pub struct InboxProgressTracker {
    state: Mutex<TrackerState>,
    sink: Option<Box<dyn StatusSink>>,
}

impl InboxProgressTracker {
    /// Create a tracker that pushes updates to `sink`.
    pub fn new(sink: impl StatusSink + 'static) -> Self {
        Self::with_sink(Some(Box::new(sink)))
    }

    /// Create a tracker with no UI consumer.
    pub fn without_sink() -> Self {
        Self::with_sink(None)
    }

    fn with_sink(sink: Option<Box<dyn StatusSink>>) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                inbox: HashMap::new(),
                // An empty inbox reads as 100 on first query
                dirty: true,
                cached_percent: 0,
                recomputes: 0,
            }),
            sink,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        // The dirty flag is set before any mutation, so a poisoned state is still consistent
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Track or refresh a conversation's completeness.
    pub fn add_conv(
        &self,
        record: Option<&ConversationIndexRecord>,
        conv: &impl ConversationRange,
    ) {
        let snapshot = CompletenessCalculator::snapshot(record, conv);
        let conv_id = conv.conv_id();
        debug!(
            conv_id = %conv_id,
            num_missing = snapshot.num_missing,
            num_msgs = snapshot.num_msgs,
            "Tracking conversation"
        );

        let mut state = self.lock();
        state.dirty = true;
        state.inbox.insert(conv_id, snapshot);
    }

    /// Stop tracking a conversation. No-op if it was not tracked.
    pub fn remove_conv(&self, conv: &impl ConversationRange) {
        let conv_id = conv.conv_id();
        let mut state = self.lock();
        state.dirty = true;
        if state.inbox.remove(&conv_id).is_some() {
            debug!(conv_id = %conv_id, "Stopped tracking conversation");
        }
    }

    pub fn conversation_count(&self) -> usize {
        self.lock().inbox.len()
    }

    /// Inbox-wide truncated percentage, recomputed only when stale.
    pub fn percent_indexed(&self) -> u8 {
        self.lock().percent_indexed()
    }

    /// Number of full aggregate recomputes performed so far.
    pub fn recompute_count(&self) -> u64 {
        self.lock().recomputes
    }

    /// Offer the current percentage to the UI sink without waiting.
    ///
    /// A consumer that is not ready simply misses this update. Fails only
    /// if `cancel` has fired by the time delivery is attempted.
    pub fn push_status_update(&self, cancel: &CancellationToken) -> Result<u8, IndexingError> {
        let mut state = self.lock();
        let percent = state.percent_indexed();

        if let Some(sink) = &self.sink {
            if cancel.is_cancelled() {
                info!(percent, "Status update cancelled");
                return Err(IndexingError::OperationCancelled);
            }
            if !sink.try_deliver(SearchIndexStatus::new(percent)) {
                trace!(percent, "Status update not taken by consumer");
            }
        }

        Ok(percent)
    }
}

impl std::fmt::Debug for InboxProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InboxProgressTracker")
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}
