//! Environment Entry
//! A single virtual-environment path with its display strings.

use std::path::{Path, PathBuf};

/// Directory name used by project-local environments.
const PROJECT_VENV_DIR: &str = ".venv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub path: PathBuf,
    pub name: String,
    pub relative_path: String,
}

impl EnvEntry {
    pub fn new(path: PathBuf) -> Self {
        let home = dirs::home_dir();
        Self::with_home(path, home.as_deref())
    }

    fn with_home(path: PathBuf, home: Option<&Path>) -> Self {
        let name = display_name(&path);
        let rest = home
            .filter(|h| !h.as_os_str().is_empty())
            .and_then(|h| path.strip_prefix(h).ok());
        let relative_path = match rest {
            Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Some(rest) => format!("~/{}", rest.display()),
            None => path.display().to_string(),
        };
        Self {
            path,
            name,
            relative_path,
        }
    }

    /// Case-insensitive substring match against name or full path.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.path.to_string_lossy().to_lowercase().contains(&query)
    }

    /// Project directory holding the environment.
    pub fn project_dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

/// `.venv` directories are named after their project.
fn display_name(path: &Path) -> String {
    let own = path.file_name().map(|n| n.to_string_lossy().to_string());
    if own.as_deref() == Some(PROJECT_VENV_DIR) {
        if let Some(parent) = path.parent().and_then(|p| p.file_name()) {
            return parent.to_string_lossy().to_string();
        }
    }
    own.unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_venv_takes_project_name() {
        let entry = EnvEntry::with_home(PathBuf::from("/work/webapp/.venv"), None);
        assert_eq!(entry.name, "webapp");
    }

    #[test]
    fn named_env_keeps_own_name() {
        let entry = EnvEntry::with_home(PathBuf::from("/work/envs/ml-3.12"), None);
        assert_eq!(entry.name, "ml-3.12");
    }

    #[test]
    fn home_prefix_becomes_tilde() {
        let entry = EnvEntry::with_home(
            PathBuf::from("/home/ana/code/api/.venv"),
            Some(Path::new("/home/ana")),
        );
        assert_eq!(entry.relative_path, "~/code/api/.venv");
        assert_eq!(entry.project_dir(), Path::new("/home/ana/code/api"));
    }

    #[test]
    fn only_a_whole_home_prefix_becomes_tilde() {
        let home = Some(Path::new("/home/ana"));
        let sibling = EnvEntry::with_home(PathBuf::from("/home/anabel/proj/.venv"), home);
        assert_eq!(sibling.relative_path, "/home/anabel/proj/.venv");

        let nested = EnvEntry::with_home(PathBuf::from("/home/ana/x/home/ana/.venv"), home);
        assert_eq!(nested.relative_path, "~/x/home/ana/.venv");

        let outside = EnvEntry::with_home(PathBuf::from("/opt/home/ana/.venv"), home);
        assert_eq!(outside.relative_path, "/opt/home/ana/.venv");
    }

    #[test]
    fn home_itself_is_tilde() {
        let entry = EnvEntry::with_home(PathBuf::from("/home/ana"), Some(Path::new("/home/ana")));
        assert_eq!(entry.relative_path, "~");
    }

    #[test]
    fn filter_is_case_insensitive_on_name() {
        let entry = EnvEntry::with_home(PathBuf::from("/srv/DataLab/.venv"), None);
        assert!(entry.matches("datalab"));
        assert!(entry.matches("  LAB "));
        assert!(!entry.matches("webapp"));
    }

    #[test]
    fn filter_matches_path_components() {
        let entry = EnvEntry::with_home(PathBuf::from("/srv/Projects/api/.venv"), None);
        assert!(entry.matches("projects/api"));
        assert!(entry.matches(".VENV"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let entry = EnvEntry::with_home(PathBuf::from("/x/y"), None);
        assert!(entry.matches(""));
        assert!(entry.matches("   "));
    }
}
