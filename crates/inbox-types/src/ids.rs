//! Message and conversation identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a message within one conversation.
///
/// Assigned monotonically by the message store. Ranges are not dense:
/// deletions, edits and system events leave gaps between the minimum
/// and maximum identifier of a conversation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub u32);

impl From<u32> for MessageId {
    fn from(id: u32) -> Self {
        MessageId(id)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String form of a conversation identifier, used as a map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConvId(String);

impl ConvId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConvId {
    fn from(id: &str) -> Self {
        ConvId(id.to_string())
    }
}

impl From<String> for ConvId {
    fn from(id: String) -> Self {
        ConvId(id)
    }
}

impl std::fmt::Display for ConvId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
