//! SQLite-backed recent store with an in-memory live-handle registry.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, info};
use tokio::sync::RwLock;

use fb_core::ports::RecentStorePort;
use fb_core::{ContentRecord, ItemId, NamedDirectory, NativeHandle, StoredHandle};

use crate::db::models::{
    FileContentRow, NamedDirectoryRow, NewFileContentRow, NewNamedDirectoryRow, NewRecentItemRow,
    RecentItemRow,
};
use crate::db::pool::{init_db_pool, DbPool};
use crate::db::schema::{t_file_content, t_named_directory, t_recent_item};
use crate::store::paths::default_store_path;

/// Namespaced local store: one SQLite database per application identifier,
/// plus in-memory registries for live native handles.
///
/// Serializable state (item references, cached content, named directory
/// rows) lives in SQLite; live handles are host-managed object references
/// and live only as long as the process, keyed by the same identifiers.
pub struct LocalStore {
    pool: DbPool,
    max_recent: usize,
    handles: RwLock<HashMap<String, NativeHandle>>,
    named_handles: RwLock<HashMap<String, NativeHandle>>,
}

impl LocalStore {
    /// Open (creating and migrating as needed) the store for an app id in
    /// the platform data directory.
    pub fn open(app_id: &str, max_recent: usize) -> Result<Self> {
        let path = default_store_path(app_id)?;
        Self::open_at(&path, max_recent)
    }

    /// Open the store at an explicit database path.
    pub fn open_at(db_path: &Path, max_recent: usize) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let database_url = db_path.to_string_lossy().to_string();
        let pool = init_db_pool(&database_url)?;
        info!("Recent store opened at {database_url}");
        Ok(Self {
            pool,
            max_recent,
            handles: RwLock::new(HashMap::new()),
            named_handles: RwLock::new(HashMap::new()),
        })
    }

    pub fn max_recent(&self) -> usize {
        self.max_recent
    }

    /// Remove item references beyond the configured maximum (sorted
    /// most-recent-first) together with their paired content rows. Returns
    /// the evicted identifiers so the caller can drop registry entries.
    ///
    /// Runs as a follow-up step of the triggering insertion, which has
    /// already committed; the list may exceed the maximum by one entry in
    /// between.
    fn prune_overflow(conn: &mut SqliteConnection, max_recent: usize) -> Result<Vec<String>> {
        let count: i64 = t_recent_item::table.count().get_result(conn)?;
        if count <= max_recent as i64 {
            return Ok(Vec::new());
        }

        let overflow = count - max_recent as i64;
        // Tail of the (captured_at desc, seq asc) listing order.
        let ids: Vec<String> = t_recent_item::table
            .order((
                t_recent_item::captured_at_ms.asc(),
                t_recent_item::seq.desc(),
            ))
            .limit(overflow)
            .select(t_recent_item::id)
            .load(conn)?;

        diesel::delete(t_recent_item::table.filter(t_recent_item::id.eq_any(&ids)))
            .execute(conn)?;
        diesel::delete(t_file_content::table.filter(t_file_content::id.eq_any(&ids)))
            .execute(conn)?;

        debug!("Pruned {} overflow recent item(s)", ids.len());
        Ok(ids)
    }

    async fn drop_handles(&self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        let mut handles = self.handles.write().await;
        for id in ids {
            handles.remove(id);
        }
    }

    /// Replace any existing reference with the same identifier, then insert
    /// the fresh one. Re-capturing an identifier makes it the newest entry.
    fn upsert_item(conn: &mut SqliteConnection, item: &StoredHandle) -> Result<()> {
        conn.transaction::<_, anyhow::Error, _>(|conn| {
            diesel::delete(t_recent_item::table.filter(t_recent_item::id.eq(item.id.as_str())))
                .execute(conn)?;
            diesel::delete(t_file_content::table.filter(t_file_content::id.eq(item.id.as_str())))
                .execute(conn)?;
            diesel::insert_into(t_recent_item::table)
                .values(&NewRecentItemRow::from_domain(item))
                .execute(conn)?;
            Ok(())
        })
    }
}

#[async_trait]
impl RecentStorePort for LocalStore {
    async fn put_content(&self, record: ContentRecord) -> Result<()> {
        let item = record.item_ref();
        let pruned = {
            let mut conn = self.pool.get()?;
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                diesel::delete(
                    t_recent_item::table.filter(t_recent_item::id.eq(item.id.as_str())),
                )
                .execute(conn)?;
                diesel::delete(
                    t_file_content::table.filter(t_file_content::id.eq(item.id.as_str())),
                )
                .execute(conn)?;
                diesel::insert_into(t_recent_item::table)
                    .values(&NewRecentItemRow::from_domain(&item))
                    .execute(conn)?;
                diesel::insert_into(t_file_content::table)
                    .values(&NewFileContentRow::from_domain(&record))
                    .execute(conn)?;
                Ok(())
            })?;
            Self::prune_overflow(&mut conn, self.max_recent)?
        };
        self.drop_handles(&pruned).await;
        Ok(())
    }

    async fn put_item(&self, item: StoredHandle) -> Result<()> {
        let pruned = {
            let mut conn = self.pool.get()?;
            Self::upsert_item(&mut conn, &item)?;
            Self::prune_overflow(&mut conn, self.max_recent)?
        };
        self.drop_handles(&pruned).await;
        Ok(())
    }

    async fn put_handle(&self, item: StoredHandle, handle: NativeHandle) -> Result<()> {
        let id = item.id.as_str().to_string();
        let pruned = {
            let mut conn = self.pool.get()?;
            Self::upsert_item(&mut conn, &item)?;
            // Publish the live handle only after the reference committed.
            self.handles.write().await.insert(id.clone(), handle);
            Self::prune_overflow(&mut conn, self.max_recent)?
        };
        self.drop_handles(&pruned).await;
        Ok(())
    }

    async fn get_item(&self, id: &ItemId) -> Result<Option<StoredHandle>> {
        let mut conn = self.pool.get()?;
        let row = t_recent_item::table
            .filter(t_recent_item::id.eq(id.as_str()))
            .first::<RecentItemRow>(&mut conn)
            .optional()?;
        row.map(RecentItemRow::into_domain).transpose()
    }

    async fn get_content(&self, id: &ItemId) -> Result<Option<ContentRecord>> {
        let mut conn = self.pool.get()?;
        let row = t_file_content::table
            .filter(t_file_content::id.eq(id.as_str()))
            .first::<FileContentRow>(&mut conn)
            .optional()?;
        Ok(row.map(FileContentRow::into_domain))
    }

    async fn get_handle(&self, id: &ItemId) -> Result<Option<NativeHandle>> {
        Ok(self.handles.read().await.get(id.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<StoredHandle>> {
        let mut conn = self.pool.get()?;
        let rows = t_recent_item::table
            .order((
                t_recent_item::captured_at_ms.desc(),
                t_recent_item::seq.asc(),
            ))
            .load::<RecentItemRow>(&mut conn)?;
        rows.into_iter().map(RecentItemRow::into_domain).collect()
    }

    async fn len(&self) -> Result<usize> {
        let mut conn = self.pool.get()?;
        let count: i64 = t_recent_item::table.count().get_result(&mut conn)?;
        Ok(count as usize)
    }

    async fn remove(&self, id: &ItemId) -> Result<()> {
        {
            let mut conn = self.pool.get()?;
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                diesel::delete(t_recent_item::table.filter(t_recent_item::id.eq(id.as_str())))
                    .execute(conn)?;
                diesel::delete(t_file_content::table.filter(t_file_content::id.eq(id.as_str())))
                    .execute(conn)?;
                Ok(())
            })?;
        }
        self.handles.write().await.remove(id.as_str());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        {
            let mut conn = self.pool.get()?;
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                diesel::delete(t_recent_item::table).execute(conn)?;
                diesel::delete(t_file_content::table).execute(conn)?;
                Ok(())
            })?;
        }
        self.handles.write().await.clear();
        Ok(())
    }

    async fn set_named(&self, record: NamedDirectory) -> Result<()> {
        let key = record.key.clone();
        let handle = record.handle.clone();
        {
            let mut conn = self.pool.get()?;
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                diesel::delete(t_named_directory::table.filter(t_named_directory::key.eq(&key)))
                    .execute(conn)?;
                diesel::insert_into(t_named_directory::table)
                    .values(&NewNamedDirectoryRow::from_domain(&record))
                    .execute(conn)?;
                Ok(())
            })?;
        }
        let mut named = self.named_handles.write().await;
        match handle {
            Some(handle) => {
                named.insert(key, handle);
            }
            None => {
                named.remove(&key);
            }
        }
        Ok(())
    }

    async fn get_named(&self, key: &str) -> Result<Option<NamedDirectory>> {
        let row = {
            let mut conn = self.pool.get()?;
            t_named_directory::table
                .filter(t_named_directory::key.eq(key))
                .first::<NamedDirectoryRow>(&mut conn)
                .optional()?
        };
        let Some(row) = row else {
            return Ok(None);
        };
        let mut record = row.into_domain()?;
        record.handle = self.named_handles.read().await.get(key).cloned();
        Ok(Some(record))
    }

    async fn remove_named(&self, key: &str) -> Result<()> {
        {
            let mut conn = self.pool.get()?;
            diesel::delete(t_named_directory::table.filter(t_named_directory::key.eq(key)))
                .execute(&mut conn)?;
        }
        self.named_handles.write().await.remove(key);
        Ok(())
    }
}
