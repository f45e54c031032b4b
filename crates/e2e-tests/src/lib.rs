//! End-to-end test infrastructure for inbox index tracking.
//!
//! Provides an in-memory record store standing in for the encrypted
//! storage layer, an inbox fixture with gapped message ranges, and a
//! simulated indexer step that drives the tracker the way a real
//! background indexer does.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::Rng;
use tracing::debug;

use inbox_indexing::{ConversationIndexRecord, InboxProgressTracker};
use inbox_types::{ConvId, Conversation, ConversationRange, IndexSettings, MessageId};

/// Install a test-friendly tracing subscriber once per process.
pub fn init_test_logging(settings: &IndexSettings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_test_writer()
        .try_init();
}

/// Byte-level record store keyed by conversation.
///
/// Mirrors the external storage contract: records whose version stamp
/// does not match the expected one are discarded on load.
pub struct RecordStore {
    settings: IndexSettings,
    records: Mutex<HashMap<ConvId, Vec<u8>>>,
}

impl RecordStore {
    pub fn new(settings: IndexSettings) -> Self {
        Self {
            settings,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Load a record, dropping it if stale or undecodable.
    pub fn load(&self, conv_id: &ConvId) -> Option<ConversationIndexRecord> {
        let mut records = self.records.lock().expect("record store poisoned");
        let bytes = records.get(conv_id)?;
        match ConversationIndexRecord::from_bytes(bytes) {
            Ok(record) if record.is_current(&self.settings.record_version()) => Some(record),
            _ => {
                debug!(conv_id = %conv_id, "Discarding stale index record");
                records.remove(conv_id);
                None
            }
        }
    }

    /// Load a record or create a fresh one stamped with the current version.
    pub fn load_or_create(&self, conv_id: &ConvId) -> ConversationIndexRecord {
        self.load(conv_id)
            .unwrap_or_else(|| ConversationIndexRecord::with_version(&self.settings))
    }

    pub fn store(&self, conv_id: &ConvId, record: &ConversationIndexRecord) {
        let bytes = record.to_bytes().expect("record encodes");
        self.records
            .lock()
            .expect("record store poisoned")
            .insert(conv_id.clone(), bytes);
    }

    /// Write raw bytes, e.g. a record from an older index version.
    pub fn store_raw(&self, conv_id: &ConvId, bytes: Vec<u8>) {
        self.records
            .lock()
            .expect("record store poisoned")
            .insert(conv_id.clone(), bytes);
    }
}

/// Build `count` conversations with random, possibly degenerate ranges.
pub fn create_inbox(count: usize, max_len: u32) -> Vec<Conversation> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let min = rng.random_range(1..50u32);
            let len = rng.random_range(0..max_len.max(1));
            Conversation::new(format!("conv-{i:04}"), MessageId(min), MessageId(min + len))
        })
        .collect()
}

/// Index up to `batch` missing messages of `conv`, persist the record and
/// refresh the tracker. Returns how many messages were newly indexed.
pub fn index_step(
    store: &RecordStore,
    tracker: &InboxProgressTracker,
    conv: &Conversation,
    batch: usize,
) -> usize {
    let conv_id = conv.conv_id();
    let mut record = store.load_or_create(&conv_id);
    let next: Vec<MessageId> = record.missing_ids(conv).into_iter().take(batch).collect();
    let indexed = next.len();
    record.mark_seen_all(next);
    store.store(&conv_id, &record);
    tracker.add_conv(Some(&record), conv);
    indexed
}

/// Index every conversation to completion in `batch`-sized steps.
pub fn index_inbox(
    store: &RecordStore,
    tracker: &InboxProgressTracker,
    inbox: &[Conversation],
    batch: usize,
) {
    for conv in inbox {
        while index_step(store, tracker, conv, batch) > 0 {}
    }
}
