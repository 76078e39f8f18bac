//! Call options for the open/save operations.

use serde::{Deserialize, Serialize};

/// Extension filter offered to native pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    /// Human-readable filter label, e.g. "Images".
    pub name: String,
    /// Extensions without the leading dot, e.g. `["png", "jpg"]`.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Options for `open_files`.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    pub filters: Vec<FileFilter>,
    pub multiple: bool,
    /// Per-call override of the configured persistence default.
    pub persist: Option<bool>,
}

/// Options for `save_file_as`.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub suggested_name: String,
    pub filters: Vec<FileFilter>,
    pub persist: Option<bool>,
}

impl SaveOptions {
    pub fn new(suggested_name: impl Into<String>) -> Self {
        Self {
            suggested_name: suggested_name.into(),
            filters: Vec::new(),
            persist: None,
        }
    }
}

/// Content handed to the save operations. Text is written UTF-8 encoded.
#[derive(Debug, Clone)]
pub enum SaveContent {
    Bytes(Vec<u8>),
    Text(String),
}

impl SaveContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SaveContent::Bytes(b) => b,
            SaveContent::Text(t) => t.as_bytes(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SaveContent::Bytes(b) => b,
            SaveContent::Text(t) => t.into_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<Vec<u8>> for SaveContent {
    fn from(bytes: Vec<u8>) -> Self {
        SaveContent::Bytes(bytes)
    }
}

impl From<&str> for SaveContent {
    fn from(text: &str) -> Self {
        SaveContent::Text(text.to_string())
    }
}

impl From<String> for SaveContent {
    fn from(text: String) -> Self {
        SaveContent::Text(text)
    }
}
