//! Details snapshot saved next to an environment before it is deleted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const BACKUP_FILE: &str = "venv.txt";

/// Write `text` to `<project_dir>/venv.txt`. Empty text writes nothing and
/// returns `Ok(None)`.
pub fn write_backup(project_dir: &Path, text: &str) -> io::Result<Option<PathBuf>> {
    if text.is_empty() {
        return Ok(None);
    }
    let backup = project_dir.join(BACKUP_FILE);
    fs::write(&backup, text)?;
    tracing::info!("Saved details to {}", backup.display());
    Ok(Some(backup))
}
