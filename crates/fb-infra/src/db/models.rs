//! Row structs for the recent-store collections.

use anyhow::{anyhow, Result};
use diesel::prelude::*;

use fb_core::{ContentRecord, EntryKind, ItemId, MimeType, NamedDirectory, StoredHandle};

use crate::db::schema::{t_file_content, t_named_directory, t_recent_item};

#[derive(Queryable)]
#[diesel(table_name = t_recent_item)]
pub struct RecentItemRow {
    pub seq: i64,
    pub id: String,
    pub name: String,
    pub path: Option<String>,
    pub kind: String,
    pub captured_at_ms: i64,
}

#[derive(Insertable)]
#[diesel(table_name = t_recent_item)]
pub struct NewRecentItemRow {
    pub id: String,
    pub name: String,
    pub path: Option<String>,
    pub kind: String,
    pub captured_at_ms: i64,
}

#[derive(Queryable)]
#[diesel(table_name = t_file_content)]
pub struct FileContentRow {
    pub id: String,
    pub name: String,
    pub path: Option<String>,
    pub bytes: Vec<u8>,
    pub mime: String,
    pub size: i64,
    pub modified_at_ms: i64,
    pub captured_at_ms: i64,
}

#[derive(Insertable)]
#[diesel(table_name = t_file_content)]
pub struct NewFileContentRow {
    pub id: String,
    pub name: String,
    pub path: Option<String>,
    pub bytes: Vec<u8>,
    pub mime: String,
    pub size: i64,
    pub modified_at_ms: i64,
    pub captured_at_ms: i64,
}

#[derive(Queryable)]
#[diesel(table_name = t_named_directory)]
pub struct NamedDirectoryRow {
    pub key: String,
    pub name: String,
    pub path: Option<String>,
    pub kind: String,
    pub captured_at_ms: i64,
}

#[derive(Insertable)]
#[diesel(table_name = t_named_directory)]
pub struct NewNamedDirectoryRow {
    pub key: String,
    pub name: String,
    pub path: Option<String>,
    pub kind: String,
    pub captured_at_ms: i64,
}

fn parse_kind(kind: &str) -> Result<EntryKind> {
    EntryKind::parse(kind).ok_or_else(|| anyhow!("unknown entry kind in store: {kind}"))
}

impl RecentItemRow {
    pub fn into_domain(self) -> Result<StoredHandle> {
        Ok(StoredHandle {
            id: ItemId::new(self.id),
            name: self.name,
            path: self.path,
            kind: parse_kind(&self.kind)?,
            captured_at_ms: self.captured_at_ms,
        })
    }
}

impl NewRecentItemRow {
    pub fn from_domain(item: &StoredHandle) -> Self {
        Self {
            id: item.id.as_str().to_string(),
            name: item.name.clone(),
            path: item.path.clone(),
            kind: item.kind.as_str().to_string(),
            captured_at_ms: item.captured_at_ms,
        }
    }
}

impl FileContentRow {
    pub fn into_domain(self) -> ContentRecord {
        ContentRecord {
            id: ItemId::new(self.id),
            name: self.name,
            path: self.path,
            bytes: self.bytes,
            mime: MimeType(self.mime),
            size: self.size,
            modified_at_ms: self.modified_at_ms,
            captured_at_ms: self.captured_at_ms,
        }
    }
}

impl NewFileContentRow {
    pub fn from_domain(record: &ContentRecord) -> Self {
        Self {
            id: record.id.as_str().to_string(),
            name: record.name.clone(),
            path: record.path.clone(),
            bytes: record.bytes.clone(),
            mime: record.mime.as_str().to_string(),
            size: record.size,
            modified_at_ms: record.modified_at_ms,
            captured_at_ms: record.captured_at_ms,
        }
    }
}

impl NamedDirectoryRow {
    /// The live handle (when one is registered) is attached by the store.
    pub fn into_domain(self) -> Result<NamedDirectory> {
        Ok(NamedDirectory {
            key: self.key,
            name: self.name,
            path: self.path,
            kind: parse_kind(&self.kind)?,
            captured_at_ms: self.captured_at_ms,
            handle: None,
        })
    }
}

impl NewNamedDirectoryRow {
    pub fn from_domain(record: &NamedDirectory) -> Self {
        Self {
            key: record.key.clone(),
            name: record.name.clone(),
            path: record.path.clone(),
            kind: record.kind.as_str().to_string(),
            captured_at_ms: record.captured_at_ms,
        }
    }
}
