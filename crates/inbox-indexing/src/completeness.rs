//! Completeness of a conversation's index.
//!
//! Stateless derivation of `{num_missing, num_msgs}` from a record and a
//! conversation's message range. Conversations with at most one message
//! count as complete whatever the record holds.

use inbox_types::ConversationRange;

use crate::record::ConversationIndexRecord;

/// Point-in-time completeness of one conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletenessSnapshot {
    /// IDs in range not yet indexed
    pub num_missing: u64,
    /// Size of the inclusive ID range
    pub num_msgs: u64,
}

impl CompletenessSnapshot {
    pub fn new(num_missing: u64, num_msgs: u64) -> Self {
        Self {
            num_missing,
            num_msgs,
        }
    }

    pub fn percentage(&self) -> u8 {
        CompletenessCalculator::percentage(self)
    }
}

/// Completeness derivations over [`ConversationIndexRecord`]s.
pub struct CompletenessCalculator;

impl CompletenessCalculator {
    /// Snapshot a conversation's completeness.
    ///
    /// An absent record or a range of at most one message yields
    /// `{0, num_msgs}`.
    pub fn snapshot(
        record: Option<&ConversationIndexRecord>,
        conv: &impl ConversationRange,
    ) -> CompletenessSnapshot {
        let (min_id, max_id) = conv.min_max_ids();
        let num_msgs = range_len(min_id.0, max_id.0);
        match record {
            Some(record) if num_msgs > 1 => {
                CompletenessSnapshot::new(record.num_missing(min_id, max_id), num_msgs)
            }
            _ => CompletenessSnapshot::new(0, num_msgs),
        }
    }

    /// Truncated (not rounded) percentage of a snapshot; 100 for `num_msgs <= 1`.
    ///
    /// Reporting only. Use [`Self::is_fully_indexed`] to decide completeness.
    pub fn percentage(snapshot: &CompletenessSnapshot) -> u8 {
        if snapshot.num_msgs <= 1 {
            return 100;
        }
        truncated_percent(snapshot.num_missing, snapshot.num_msgs)
    }

    /// Exact completeness check.
    pub fn is_fully_indexed(
        record: Option<&ConversationIndexRecord>,
        conv: &impl ConversationRange,
    ) -> bool {
        let (min_id, max_id) = conv.min_max_ids();
        if max_id <= min_id {
            return true;
        }
        match record {
            Some(record) => record.num_missing(min_id, max_id) == 0,
            None => true,
        }
    }
}

fn range_len(min_id: u32, max_id: u32) -> u64 {
    if max_id < min_id {
        0
    } else {
        u64::from(max_id - min_id) + 1
    }
}

/// `floor(100 * (1 - missing / total))`, converting toward zero.
pub(crate) fn truncated_percent(num_missing: u64, num_msgs: u64) -> u8 {
    let fraction = num_missing as f64 / num_msgs as f64;
    (100.0 * (1.0 - fraction)) as u8
}
