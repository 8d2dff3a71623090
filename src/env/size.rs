//! Disk usage of an environment directory.

use rayon::prelude::*;
use std::fs;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Total size in bytes of every file below `path`.
///
/// Symlinks to files count the target's size; symlinked directories are
/// not followed. Unreadable entries are skipped.
pub fn dir_size(path: &Path) -> u64 {
    let Ok(read_dir) = fs::read_dir(path) else {
        return 0;
    };
    let entries: Vec<fs::DirEntry> = read_dir.filter_map(Result::ok).collect();

    entries
        .par_iter()
        .map(|entry| {
            let Ok(file_type) = entry.file_type() else {
                return 0;
            };
            if file_type.is_dir() {
                dir_size(&entry.path())
            } else if file_type.is_symlink() {
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => meta.len(),
                    _ => 0,
                }
            } else {
                entry.metadata().map(|m| m.len()).unwrap_or(0)
            }
        })
        .sum()
}

pub fn to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("lib/python3.12/site-packages/pkg");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("pyvenv.cfg"), vec![0u8; 100]).unwrap();
        fs::write(nested.join("__init__.py"), vec![0u8; 2048]).unwrap();
        fs::write(nested.join("core.py"), vec![0u8; 10]).unwrap();

        assert_eq!(dir_size(dir.path()), 2158);
    }

    #[test]
    fn missing_dir_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(dir_size(&dir.path().join("absent")), 0);
    }

    #[cfg(unix)]
    #[test]
    fn follows_file_links_but_not_dir_links() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("python3"), vec![0u8; 500]).unwrap();
        fs::write(outside.path().join("big"), vec![0u8; 9000]).unwrap();

        let bin = dir.path().join("bin");
        fs::create_dir(&bin).unwrap();
        std::os::unix::fs::symlink(outside.path().join("python3"), bin.join("python")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

        assert_eq!(dir_size(dir.path()), 500);
    }

    #[test]
    fn megabytes_conversion() {
        assert_eq!(format!("{:.2}", to_megabytes(3 * 1024 * 1024 / 2)), "1.50");
    }
}
