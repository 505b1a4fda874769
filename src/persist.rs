//! Disk I/O helpers: load the document and write it back atomically.
//!
//! The rename-over approach is close to atomic on most platforms. On NTFS
//! (Windows) it's reliable; on FAT32 or network shares there are no hard
//! guarantees. If that matters to you, keep backups or use a real database.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Reads and parses the JSON document at `path`. A missing file is reported
/// as `Ok(None)` so the caller can decide between bootstrapping and failing.
pub async fn load<T>(path: &Path) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::StorageIo(e.to_string())),
    };
    let doc = serde_json::from_slice(&bytes).map_err(|e| Error::StorageCorrupt(e.to_string()))?;
    Ok(Some(doc))
}

/// Serializes `doc` and writes it over `path` atomically.
pub async fn store<T>(path: &Path, doc: &T, pretty: bool) -> Result<()>
where
    T: Serialize,
{
    let bytes = if pretty {
        serde_json::to_vec_pretty(doc)?
    } else {
        serde_json::to_vec(doc)?
    };
    atomic_write(path, &bytes).await
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| Error::StorageIo(e.to_string()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| Error::StorageIo(e.to_string()))?;
    Ok(())
}
