//! # inbox-types
//!
//! Shared domain types for inbox search indexing.
//!
//! This crate defines the values exchanged between the background indexer,
//! the progress tracker, and UI consumers:
//! - [`MessageId`] / [`ConvId`]: message and conversation identity
//! - [`ConversationRange`]: the provider of a conversation's valid message bounds
//! - [`SearchIndexStatus`]: the progress value pushed to the UI
//! - [`IndexSettings`]: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use inbox_types::{Conversation, ConversationRange, MessageId};
//!
//! let conv = Conversation::new("general", MessageId(1), MessageId(10));
//! assert_eq!(conv.min_max_ids(), (MessageId(1), MessageId(10)));
//! ```

pub mod config;
pub mod conversation;
pub mod error;
pub mod ids;
pub mod status;

pub use crate::config::{IndexSettings, RECORD_SCHEMA_VERSION};
pub use conversation::{Conversation, ConversationRange};
pub use error::TypesError;
pub use ids::{ConvId, MessageId};
pub use status::SearchIndexStatus;
