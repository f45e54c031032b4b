//! Progress value delivered to UI consumers.

use serde::{Deserialize, Serialize};

/// Inbox-wide search index progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexStatus {
    /// Percentage of tracked messages indexed, 0..=100.
    pub percent_indexed: u8,
}

impl SearchIndexStatus {
    /// Build a status, clamping the percentage to 100.
    pub fn new(percent_indexed: u8) -> Self {
        Self {
            percent_indexed: percent_indexed.min(100),
        }
    }
}
