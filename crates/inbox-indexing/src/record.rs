//! Per-conversation index record.
//!
//! Records which message IDs of one conversation have been indexed. The
//! external storage layer persists one record per conversation and discards
//! any record whose version stamp does not match [`IndexSettings::record_version`].

use std::collections::HashSet;
use std::mem::size_of;

use serde::{Deserialize, Serialize};

use inbox_types::{ConversationRange, IndexSettings, MessageId};

use crate::completeness::{CompletenessCalculator, CompletenessSnapshot};
use crate::error::IndexingError;

/// Set of indexed message IDs for a single conversation.
///
/// Insert-only: entries are never removed except by rebuilding the record.
/// Callers only insert IDs inside the conversation's valid range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationIndexRecord {
    #[serde(rename = "s")]
    seen_ids: HashSet<MessageId>,

    #[serde(rename = "v")]
    version: String,
}

impl Default for ConversationIndexRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationIndexRecord {
    /// Create an empty record stamped for the default index version.
    pub fn new() -> Self {
        Self::with_version(&IndexSettings::default())
    }

    /// Create an empty record stamped for the configured index version.
    pub fn with_version(settings: &IndexSettings) -> Self {
        Self {
            seen_ids: HashSet::new(),
            version: settings.record_version(),
        }
    }

    /// Independent deep copy; an absent record stays absent.
    pub fn duplicate(record: Option<&Self>) -> Option<Self> {
        record.cloned()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the stamp matches the expected combined version.
    pub fn is_current(&self, expected: &str) -> bool {
        self.version == expected
    }

    /// Record one message as indexed.
    pub fn mark_seen(&mut self, id: MessageId) {
        self.seen_ids.insert(id);
    }

    /// Record a batch of messages as indexed.
    pub fn mark_seen_all(&mut self, ids: impl IntoIterator<Item = MessageId>) {
        self.seen_ids.extend(ids);
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.seen_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.seen_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen_ids.is_empty()
    }

    /// IDs in `[min, max]` not yet indexed, ascending.
    ///
    /// Walks the whole range: the result is the indexer's next unit of work.
    pub fn missing_ids(&self, conv: &impl ConversationRange) -> Vec<MessageId> {
        let (min_id, max_id) = conv.min_max_ids();
        (min_id.0..=max_id.0)
            .map(MessageId)
            .filter(|id| !self.seen_ids.contains(id))
            .collect()
    }

    /// Count of IDs in `[min, max]` not yet indexed.
    pub fn num_missing(&self, min_id: MessageId, max_id: MessageId) -> u64 {
        (min_id.0..=max_id.0)
            .filter(|id| !self.seen_ids.contains(&MessageId(*id)))
            .count() as u64
    }

    /// Approximate memory cost in bytes, for cache accounting.
    pub fn estimated_size(&self) -> u64 {
        (size_of::<String>() + self.seen_ids.len() * size_of::<MessageId>()) as u64
    }

    pub fn index_status(&self, conv: &impl ConversationRange) -> CompletenessSnapshot {
        CompletenessCalculator::snapshot(Some(self), conv)
    }

    pub fn percent_indexed(&self, conv: &impl ConversationRange) -> u8 {
        self.index_status(conv).percentage()
    }

    pub fn fully_indexed(&self, conv: &impl ConversationRange) -> bool {
        CompletenessCalculator::is_fully_indexed(Some(self), conv)
    }

    /// Serialize to JSON bytes for storage
    pub fn to_bytes(&self) -> Result<Vec<u8>, IndexingError> {
        serde_json::to_vec(self).map_err(IndexingError::from)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IndexingError> {
        serde_json::from_slice(bytes).map_err(IndexingError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbox_types::Conversation;

    fn conv(min: u32, max: u32) -> Conversation {
        Conversation::new("conv", MessageId(min), MessageId(max))
    }

    #[test]
    fn test_new_record() {
        let record = ConversationIndexRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.version(), "1:3");
        assert!(record.is_current(&IndexSettings::default().record_version()));
    }

    #[test]
    fn test_with_version() {
        let settings = IndexSettings {
            index_version: 9,
            ..Default::default()
        };
        let record = ConversationIndexRecord::with_version(&settings);
        assert_eq!(record.version(), "9:3");
        assert!(!record.is_current("1:3"));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut original = ConversationIndexRecord::new();
        original.mark_seen_all([MessageId(1), MessageId(2)]);

        let mut copy = ConversationIndexRecord::duplicate(Some(&original)).unwrap();
        assert_eq!(copy, original);

        original.mark_seen(MessageId(3));
        assert!(!copy.contains(MessageId(3)));

        copy.mark_seen(MessageId(4));
        assert!(!original.contains(MessageId(4)));
        assert_eq!(original.len(), 3);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn test_duplicate_absent() {
        assert_eq!(ConversationIndexRecord::duplicate(None), None);
    }

    #[test]
    fn test_missing_ids_ordered() {
        let mut record = ConversationIndexRecord::new();
        record.mark_seen_all([MessageId(2), MessageId(4), MessageId(5)]);
        assert_eq!(
            record.missing_ids(&conv(1, 6)),
            vec![MessageId(1), MessageId(3), MessageId(6)]
        );
        assert_eq!(record.num_missing(MessageId(1), MessageId(6)), 3);
    }

    #[test]
    fn test_missing_ids_fully_seen() {
        let mut record = ConversationIndexRecord::new();
        record.mark_seen_all((3..=7).map(MessageId));
        assert!(record.missing_ids(&conv(3, 7)).is_empty());
    }

    #[test]
    fn test_size_estimate() {
        let mut record = ConversationIndexRecord::new();
        let base = record.estimated_size();
        record.mark_seen_all((1..=10).map(MessageId));
        assert_eq!(record.estimated_size(), base + 10 * size_of::<MessageId>() as u64);

        // Re-inserting does not grow the estimate
        record.mark_seen(MessageId(1));
        assert_eq!(record.estimated_size(), base + 40);
    }

    #[test]
    fn test_record_delegates_completeness() {
        let mut record = ConversationIndexRecord::new();
        record.mark_seen_all((1..=5).map(MessageId));
        let c = conv(1, 10);
        assert_eq!(record.index_status(&c), CompletenessSnapshot::new(5, 10));
        assert_eq!(record.percent_indexed(&c), 50);
        assert!(!record.fully_indexed(&c));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut record = ConversationIndexRecord::new();
        record.mark_seen_all([MessageId(8), MessageId(9)]);
        let bytes = record.to_bytes().unwrap();
        let decoded = ConversationIndexRecord::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_json_field_names() {
        let record = ConversationIndexRecord::new();
        let json = String::from_utf8(record.to_bytes().unwrap()).unwrap();
        assert_eq!(json, "{\"s\":[],\"v\":\"1:3\"}");
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = ConversationIndexRecord::from_bytes(b"{\"v\":").unwrap_err();
        assert!(matches!(err, IndexingError::Serialization(_)));
    }
}
