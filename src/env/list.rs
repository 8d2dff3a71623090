//! Environment List Module
//! Reads and rewrites the newline-delimited list of environment paths.

use crate::config::expand_tilde;
use crate::env::EnvEntry;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to delete {path}: {source}")]
    Delete { path: PathBuf, source: io::Error },
}

/// In-memory mirror of the list file.
#[derive(Debug, Clone)]
pub struct EnvList {
    file_path: PathBuf,
    entries: Vec<EnvEntry>,
}

impl EnvList {
    pub fn empty(file_path: PathBuf) -> Self {
        Self {
            file_path,
            entries: Vec::new(),
        }
    }

    /// Load the list file. A missing file is an empty list; blank lines and
    /// paths that no longer exist are skipped.
    pub fn load(file_path: &Path) -> Result<Self, ListError> {
        let mut list = Self::empty(file_path.to_path_buf());
        if !file_path.exists() {
            tracing::debug!("{} does not exist yet", file_path.display());
            return Ok(list);
        }

        let bytes = fs::read(file_path).map_err(|source| ListError::Read {
            path: file_path.to_path_buf(),
            source,
        })?;

        for line in bytes.split(|&b| b == b'\n') {
            let line = line.trim_ascii();
            if line.is_empty() {
                continue;
            }
            let raw = bytes_to_path(line);
            match expand_tilde(&raw).canonicalize() {
                Ok(path) => list.entries.push(EnvEntry::new(path)),
                Err(e) => tracing::debug!("Skipping {}: {}", raw.display(), e),
            }
        }

        tracing::info!("Loaded {} environments from {}", list.len(), file_path.display());
        Ok(list)
    }

    /// Rewrite the list file from the in-memory entries.
    pub fn save(&self) -> Result<(), ListError> {
        let mut contents = Vec::new();
        for entry in &self.entries {
            contents.extend_from_slice(&path_to_bytes(&entry.path));
            contents.push(b'\n');
        }
        fs::write(&self.file_path, contents).map_err(|source| ListError::Write {
            path: self.file_path.clone(),
            source,
        })
    }

    /// Drop every entry equal to `path`. Returns how many were removed.
    pub fn remove(&mut self, path: &Path) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.path != path);
        before - self.entries.len()
    }

    /// Delete the environment directory, then drop it from the list and
    /// rewrite the file. Nothing changes if the directory removal fails.
    pub fn delete_env(&mut self, path: &Path) -> Result<(), ListError> {
        fs::remove_dir_all(path).map_err(|source| ListError::Delete {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Deleted: {}", path.display());

        self.remove(path);
        self.save()
    }

    /// Entries matching the filter query, in file order.
    pub fn filtered<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a EnvEntry> + 'a {
        self.entries.iter().filter(move |e| e.matches(query))
    }

    pub fn entries(&self) -> &[EnvEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn from_paths(file_path: PathBuf, paths: &[PathBuf]) -> Self {
        Self {
            file_path,
            entries: paths.iter().cloned().map(EnvEntry::new).collect(),
        }
    }
}

/// Paths are stored as raw bytes so non-UTF-8 names survive a rewrite.
#[cfg(unix)]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(OsStr::new(String::from_utf8_lossy(bytes).as_ref()))
}
