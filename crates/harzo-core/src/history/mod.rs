//! Generation history domain module.
//!
//! # Module Structure
//!
//! - `model`: `HistoryEntry` and id generation
//! - `repository`: Repository trait for history persistence
//!
//! # Usage
//!
//! ```ignore
//! use harzo_core::history::{HistoryEntry, HistoryRepository, HISTORY_CAPACITY};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{HistoryEntry, HistoryIdGenerator, now_millis};
pub use repository::{HISTORY_CAPACITY, HISTORY_STORAGE_KEY, HistoryRepository};
