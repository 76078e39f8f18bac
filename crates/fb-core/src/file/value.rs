//! File, directory and listing values returned by bridge operations.

use crate::file::handle::{EntryKind, NativeHandle, StoredHandle};
use crate::file::mime::MimeType;
use crate::ids::ItemId;

/// Fully loaded file returned by open/save-as/restore/entry-load.
#[derive(Debug, Clone)]
pub struct FileValue {
    pub id: ItemId,
    pub name: String,
    /// Only populated by path-addressable backends.
    pub path: Option<String>,
    pub bytes: Vec<u8>,
    pub mime: MimeType,
    pub size: i64,
    /// Source-reported last-modified time, or the capture time when the
    /// source does not report one.
    pub modified_at_ms: i64,
    /// Live handle enabling later in-place writes; present only on the
    /// capability-scoped backend.
    pub handle: Option<NativeHandle>,
}

/// Directory selected through a backend.
#[derive(Debug, Clone)]
pub struct DirectoryValue {
    pub id: ItemId,
    pub name: String,
    pub path: Option<String>,
    pub handle: Option<NativeHandle>,
}

/// Lazily listed directory entry: metadata only, never content.
///
/// `size` and `modified_at_ms` are populated for files only; `path` and
/// `handle` only by backends that have them cheaply available without
/// reading content.
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: Option<i64>,
    pub modified_at_ms: Option<i64>,
    pub path: Option<String>,
    pub handle: Option<NativeHandle>,
}

/// Content record cached by the local store, one-to-one with an item
/// reference on backends that cache content rather than a live handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub id: ItemId,
    pub name: String,
    pub path: Option<String>,
    pub bytes: Vec<u8>,
    pub mime: MimeType,
    pub size: i64,
    pub modified_at_ms: i64,
    pub captured_at_ms: i64,
}

impl ContentRecord {
    /// The item reference this record is paired with; both always share
    /// the same identifier.
    pub fn item_ref(&self) -> StoredHandle {
        StoredHandle {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            kind: EntryKind::File,
            captured_at_ms: self.captured_at_ms,
        }
    }

    /// Rehydrate a file value from cached content.
    pub fn into_file_value(self) -> FileValue {
        FileValue {
            id: self.id,
            name: self.name,
            path: self.path,
            bytes: self.bytes,
            mime: self.mime,
            size: self.size,
            modified_at_ms: self.modified_at_ms,
            handle: None,
        }
    }
}

impl FileValue {
    /// Content record capturing this file's current bytes.
    pub fn to_content_record(&self, captured_at_ms: i64) -> ContentRecord {
        ContentRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            bytes: self.bytes.clone(),
            mime: self.mime.clone(),
            size: self.size,
            modified_at_ms: self.modified_at_ms,
            captured_at_ms,
        }
    }

    /// The recent-list reference for this file.
    pub fn item_ref(&self, captured_at_ms: i64) -> StoredHandle {
        StoredHandle {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            kind: EntryKind::File,
            captured_at_ms,
        }
    }
}

impl DirectoryValue {
    pub fn item_ref(&self, captured_at_ms: i64) -> StoredHandle {
        StoredHandle {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            kind: EntryKind::Directory,
            captured_at_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ContentRecord {
        ContentRecord {
            id: ItemId::from("item-1"),
            name: "notes.txt".into(),
            path: Some("/home/u/notes.txt".into()),
            bytes: b"hello".to_vec(),
            mime: MimeType::text_plain(),
            size: 5,
            modified_at_ms: 1_000,
            captured_at_ms: 2_000,
        }
    }

    #[test]
    fn content_record_and_item_ref_share_identifier() {
        let record = sample_record();
        let item = record.item_ref();
        assert_eq!(item.id, record.id);
        assert_eq!(item.kind, EntryKind::File);
        assert_eq!(item.captured_at_ms, 2_000);
    }

    #[test]
    fn cached_record_rehydrates_verbatim() {
        let record = sample_record();
        let file = record.clone().into_file_value();
        assert_eq!(file.bytes, record.bytes);
        assert_eq!(file.modified_at_ms, 1_000);
        assert!(file.handle.is_none());
    }
}
