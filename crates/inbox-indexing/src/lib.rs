//! Search index completeness tracking for an inbox.
//!
//! A background indexer works through an inbox conversation by conversation.
//! This crate records which messages of each conversation have been indexed
//! and answers "how much is indexed?" cheaply while the indexer keeps running.
//! It does not index anything itself.
//!
//! ## Key Components
//!
//! - [`ConversationIndexRecord`]: Durable per-conversation set of indexed message IDs
//! - [`CompletenessCalculator`]: Derives a [`CompletenessSnapshot`] and percentage
//!   from a record and a conversation's message range
//! - [`InboxProgressTracker`]: Thread-safe inbox-wide aggregate with a
//!   dirty-bit cached percentage and best-effort UI notifications
//! - [`StatusSink`]: Non-blocking destination for progress updates
//! - [`IndexingError`]: Error types for indexing operations
//!
//! ## Example
//!
//! ```ignore
//! use inbox_indexing::{status_channel, ConversationIndexRecord, InboxProgressTracker};
//! use tokio_util::sync::CancellationToken;
//!
//! let (tx, mut rx) = status_channel();
//! let tracker = Arc::new(InboxProgressTracker::new(tx));
//!
//! // Indexer side: after indexing some messages of `conv`
//! record.mark_seen_all(indexed_ids);
//! tracker.add_conv(Some(&record), &conv);
//!
//! // UI side
//! let percent = tracker.push_status_update(&CancellationToken::new())?;
//! ```

pub mod completeness;
pub mod error;
pub mod record;
pub mod sink;
pub mod tracker;

pub use completeness::{CompletenessCalculator, CompletenessSnapshot};
pub use error::IndexingError;
pub use record::ConversationIndexRecord;
pub use sink::{status_channel, StatusSink};
pub use tracker::InboxProgressTracker;
