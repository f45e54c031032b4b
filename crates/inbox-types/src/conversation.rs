//! Conversation range provider.
//!
//! The message store owns conversations; indexing only needs a stable
//! identity and the inclusive `[min, max]` bounds of valid message IDs.

use serde::{Deserialize, Serialize};

use crate::ids::{ConvId, MessageId};

/// Supplies a conversation's identity and valid message-identifier bounds.
///
/// Bounds must be consistent for a given conversation state: the range
/// never shrinks without the indexed entries outside it being removed.
/// An empty conversation reports `(MessageId(0), MessageId(0))`.
pub trait ConversationRange {
    /// Identity used to key per-conversation progress.
    fn conv_id(&self) -> ConvId;

    /// Inclusive `(min, max)` message identifiers.
    fn min_max_ids(&self) -> (MessageId, MessageId);
}

/// A conversation whose bounds are already known to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConvId,
    pub min_id: MessageId,
    pub max_id: MessageId,
}

impl Conversation {
    pub fn new(id: impl Into<ConvId>, min_id: MessageId, max_id: MessageId) -> Self {
        Self {
            id: id.into(),
            min_id,
            max_id,
        }
    }

    /// A conversation with no messages yet.
    pub fn empty(id: impl Into<ConvId>) -> Self {
        Self::new(id, MessageId(0), MessageId(0))
    }
}

impl ConversationRange for Conversation {
    fn conv_id(&self) -> ConvId {
        self.id.clone()
    }

    fn min_max_ids(&self) -> (MessageId, MessageId) {
        (self.min_id, self.max_id)
    }
}

impl<T: ConversationRange + ?Sized> ConversationRange for &T {
    fn conv_id(&self) -> ConvId {
        (**self).conv_id()
    }

    fn min_max_ids(&self) -> (MessageId, MessageId) {
        (**self).min_max_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_range() {
        let conv = Conversation::new("c1", MessageId(2), MessageId(9));
        assert_eq!(conv.conv_id(), ConvId::from("c1"));
        assert_eq!(conv.min_max_ids(), (MessageId(2), MessageId(9)));
    }

    #[test]
    fn test_empty_conversation() {
        let conv = Conversation::empty("c2");
        assert_eq!(conv.min_max_ids(), (MessageId(0), MessageId(0)));
    }
}
