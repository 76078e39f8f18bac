//! Store location, one database per application identifier.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

const STORE_FILE_NAME: &str = "filebridge.db";

/// Database path for an app id under the platform data directory.
pub fn default_store_path(app_id: &str) -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| anyhow!("no data directory on this platform"))?;
    Ok(base.join(app_id).join(STORE_FILE_NAME))
}

/// Database path inside an explicit override directory.
pub fn store_path_in(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE_NAME)
}
