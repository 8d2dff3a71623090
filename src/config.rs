//! Application Configuration
//! Install path, list file, discovery script and subprocess commands.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured install path.
pub const INSTALL_PATH_VAR: &str = "GUV_INSTALL_PATH";

/// Placeholder replaced by the shell command in terminal arguments.
pub const CMD_PLACEHOLDER: &str = "{cmd}";

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("guv").join("config.json");
        }
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".config").join("guv").join("config.json");
    }
    PathBuf::from("guv/config.json")
}

/// A terminal emulator invocation. `{cmd}` in `args` is replaced by the
/// shell command to run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Terminal {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Terminal {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Arguments with the placeholder substituted.
    pub fn args_for(&self, command: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.replace(CMD_PLACEHOLDER, command))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub install_path: PathBuf,
    pub list_file: String,
    pub discovery_script: String,
    pub package_command: String,
    pub shell_rcfile: Option<PathBuf>,
    pub terminals: Vec<Terminal>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_path: dirs::home_dir()
                .map(|home| home.join(".guv"))
                .unwrap_or_else(|| PathBuf::from(".guv")),
            list_file: "env_list".to_string(),
            discovery_script: "get_venv.sh".to_string(),
            package_command: "uv pip list".to_string(),
            shell_rcfile: None,
            terminals: vec![
                Terminal::new("gnome-terminal", &["--tab", "--", "bash", "-c", CMD_PLACEHOLDER]),
                Terminal::new("x-terminal-emulator", &["-e", "bash", "-c", CMD_PLACEHOLDER]),
            ],
        }
    }
}

impl Config {
    /// Load the config from the default location, then apply the
    /// `GUV_INSTALL_PATH` override.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_or_default(&default_config_path())?;
        cfg.apply_install_override(std::env::var(INSTALL_PATH_VAR).ok());
        Ok(cfg)
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default().normalized());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        Ok(cfg.normalized())
    }

    pub fn apply_install_override(&mut self, value: Option<String>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.install_path = expand_tilde(Path::new(value.trim()));
        }
    }

    fn normalized(mut self) -> Self {
        self.install_path = expand_tilde(&self.install_path);
        self.shell_rcfile = self.shell_rcfile.map(|p| expand_tilde(&p));
        self
    }

    pub fn list_path(&self) -> PathBuf {
        self.install_path.join(&self.list_file)
    }

    pub fn script_path(&self) -> PathBuf {
        self.install_path.join(&self.discovery_script)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_into_install_path() {
        let mut cfg = Config::default();
        cfg.install_path = PathBuf::from("/opt/guv");
        assert_eq!(cfg.list_path(), PathBuf::from("/opt/guv/env_list"));
        assert_eq!(cfg.script_path(), PathBuf::from("/opt/guv/get_venv.sh"));
        assert_eq!(cfg.package_command, "uv pip list");
        assert_eq!(cfg.terminals.len(), 2);
        assert_eq!(cfg.terminals[0].program, "gnome-terminal");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = Config::from_json(r#"{ "install_path": "/srv/envs", "package_command": "pip list" }"#)
            .unwrap();
        assert_eq!(cfg.install_path, PathBuf::from("/srv/envs"));
        assert_eq!(cfg.package_command, "pip list");
        assert_eq!(cfg.list_file, "env_list");
        assert!(cfg.shell_rcfile.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{ install_path: ").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg.discovery_script, "get_venv.sh");
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "list_file": "envs.txt" }"#).unwrap();
        let cfg = Config::load_or_default(&path).unwrap();
        assert_eq!(cfg.list_file, "envs.txt");
    }

    #[test]
    fn install_override_wins_when_set() {
        let mut cfg = Config::from_json(r#"{ "install_path": "/a" }"#).unwrap();
        cfg.apply_install_override(Some("  ".to_string()));
        assert_eq!(cfg.install_path, PathBuf::from("/a"));
        cfg.apply_install_override(None);
        assert_eq!(cfg.install_path, PathBuf::from("/a"));
        cfg.apply_install_override(Some("/b".to_string()));
        assert_eq!(cfg.install_path, PathBuf::from("/b"));
    }

    #[test]
    fn tilde_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/x/y")), home.join("x/y"));
        }
        assert_eq!(expand_tilde(Path::new("/abs/~")), PathBuf::from("/abs/~"));
    }

    #[test]
    fn terminal_args_substitute_command() {
        let term = Terminal::new("xterm", &["-e", "bash", "-c", CMD_PLACEHOLDER]);
        assert_eq!(term.args_for("ls"), vec!["-e", "bash", "-c", "ls"]);
    }
}
