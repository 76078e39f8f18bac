//! Recent-store port - abstracts the namespaced local persistence.
//!
//! The store holds four logical collections: item references, cached
//! content records, live native-handle records and named directory slots.
//! Failures propagate as generic errors; adapters map them to `io_error`
//! at the taxonomy boundary.

use anyhow::Result;
use async_trait::async_trait;

use crate::file::{ContentRecord, NamedDirectory, NativeHandle, StoredHandle};
use crate::ids::ItemId;

/// Persistence port used by every backend adapter.
///
/// Insertions into the default namespace trigger pruning as a follow-up
/// step of the same call: the insertion itself always succeeds, then item
/// references beyond the configured maximum (sorted most-recent-first) are
/// removed together with their paired content and handle records. Named
/// directory records are never pruned.
#[async_trait]
pub trait RecentStorePort: Send + Sync {
    /// Insert or overwrite a content record and its paired item reference
    /// atomically, then prune.
    async fn put_content(&self, record: ContentRecord) -> Result<()>;

    /// Insert an item reference for a path- or handle-less capture without
    /// cached content (e.g. a picked directory), then prune.
    async fn put_item(&self, item: StoredHandle) -> Result<()>;

    /// Insert an item reference derived from a live handle plus the handle
    /// record itself; the reference write commits first and the handle is
    /// published only on success. Prunes afterward.
    async fn put_handle(&self, item: StoredHandle, handle: NativeHandle) -> Result<()>;

    /// Point lookup; `None` is the not-found sentinel, not an error.
    async fn get_item(&self, id: &ItemId) -> Result<Option<StoredHandle>>;

    async fn get_content(&self, id: &ItemId) -> Result<Option<ContentRecord>>;

    async fn get_handle(&self, id: &ItemId) -> Result<Option<NativeHandle>>;

    /// All item references in the default namespace, most recent first;
    /// ties broken by insertion order.
    async fn list(&self) -> Result<Vec<StoredHandle>>;

    /// Number of item references in the default namespace.
    async fn len(&self) -> Result<usize>;

    /// Delete the item reference and any paired content/handle record.
    /// Idempotent: removing an absent identifier is not an error.
    async fn remove(&self, id: &ItemId) -> Result<()>;

    /// Empty the default namespace; named directory records are unaffected.
    async fn clear(&self) -> Result<()>;

    // === Named directory slots (independent namespace, never pruned) ===

    async fn set_named(&self, record: NamedDirectory) -> Result<()>;

    async fn get_named(&self, key: &str) -> Result<Option<NamedDirectory>>;

    async fn remove_named(&self, key: &str) -> Result<()>;
}
