//! History repository trait.

use super::model::HistoryEntry;
use crate::error::Result;

/// Maximum number of entries kept; the oldest is evicted beyond this.
pub const HISTORY_CAPACITY: usize = 50;

/// Namespace key under which the whole collection is persisted.
pub const HISTORY_STORAGE_KEY: &str = "harzo_history";

/// An abstract repository for the bounded generation history.
///
/// Implementations keep entries newest-first and never hold more than
/// [`HISTORY_CAPACITY`]. Every mutation rewrites the full collection.
#[async_trait::async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Returns all entries, newest first.
    ///
    /// Never fails: missing or unreadable data yields an empty list.
    async fn list(&self) -> Vec<HistoryEntry>;

    /// Prepends an entry and truncates the collection to capacity.
    async fn append(&self, entry: HistoryEntry) -> Result<()>;

    /// Removes the entry with the given id. Absent ids are a no-op.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Removes every persisted entry.
    async fn clear(&self) -> Result<()>;

    /// Looks up a single entry by id.
    async fn get(&self, id: &str) -> Option<HistoryEntry> {
        self.list().await.into_iter().find(|entry| entry.id == id)
    }
}
