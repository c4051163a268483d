//! In-memory conversation history
//!
//! A session lives for one run of the program and is never persisted.

pub mod store;

pub use store::{ConversationRecord, Session};
