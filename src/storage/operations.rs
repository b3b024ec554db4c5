//! Storage operations
//!
//! The payload provider: produces the directory listing and opens files for
//! transfer. Only the configured server root is ever touched; the parser has
//! already rejected any name that could point outside it.

use log::info;
use std::io;
use std::path::Path;
use tokio::fs::{self, File};

use crate::error::StorageError;

/// Lists the entries of the served root: bare names, files and
/// subdirectories alike, sorted ascending so the listing is deterministic.
pub async fn list_directory(server_root: &Path) -> Result<Vec<String>, StorageError> {
    let mut dir = fs::read_dir(server_root).await?;
    let mut entries = Vec::new();

    while let Some(entry) = dir.next_entry().await? {
        entries.push(entry.file_name().to_string_lossy().into_owned());
    }
    entries.sort();

    info!(
        "Listed directory {} - {} entries",
        server_root.display(),
        entries.len()
    );

    Ok(entries)
}

/// Renders a listing as the data-channel payload: one entry per line,
/// newline terminated. An empty directory renders as an empty payload.
pub fn render_listing(entries: &[String]) -> String {
    let mut listing = String::new();
    for entry in entries {
        listing.push_str(entry);
        listing.push('\n');
    }
    listing
}

/// Opens a file under the served root for transfer.
///
/// A missing entry and a name that is not a regular file are both
/// `NotFound`, distinct from an underlying read failure.
pub async fn open_file(server_root: &Path, filename: &str) -> Result<File, StorageError> {
    let path = server_root.join(filename);

    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(filename.to_string()));
        }
        Err(e) => return Err(StorageError::Io(e)),
    };
    if !metadata.is_file() {
        return Err(StorageError::NotFound(filename.to_string()));
    }

    // The file can vanish between the check and the open.
    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(filename.to_string()));
        }
        Err(e) => return Err(StorageError::Io(e)),
    };

    info!(
        "Opened {} for transfer ({} bytes)",
        path.display(),
        metadata.len()
    );

    Ok(file)
}
