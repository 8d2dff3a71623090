//! Runs the external discovery script that regenerates the list file.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Discovery script not found: {0}")]
    MissingScript(PathBuf),
    #[error("Failed to run {script}: {source}")]
    Spawn { script: PathBuf, source: io::Error },
    #[error("{script} exited with {status}")]
    Failed { script: PathBuf, status: ExitStatus },
}

/// Run `bash <script>` from `install_path` and wait for it.
pub fn run_script(script: &Path, install_path: &Path) -> Result<(), DiscoveryError> {
    if !script.is_file() {
        return Err(DiscoveryError::MissingScript(script.to_path_buf()));
    }

    tracing::info!("Running {}", script.display());
    let status = Command::new("bash")
        .arg(script)
        .current_dir(install_path)
        .status()
        .map_err(|source| DiscoveryError::Spawn {
            script: script.to_path_buf(),
            source,
        })?;

    if !status.success() {
        return Err(DiscoveryError::Failed {
            script: script.to_path_buf(),
            status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn script_runs_in_install_path() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("get_venv.sh");
        fs::write(&script, "echo /tmp/found/.venv > env_list\n").unwrap();

        run_script(&script, dir.path()).unwrap();
        let written = fs::read_to_string(dir.path().join("env_list")).unwrap();
        assert_eq!(written.trim(), "/tmp/found/.venv");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("get_venv.sh");
        fs::write(&script, "exit 2\n").unwrap();

        let err = run_script(&script, dir.path()).unwrap_err();
        assert!(matches!(err, DiscoveryError::Failed { .. }));
    }

    #[test]
    fn missing_script_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_script(&dir.path().join("get_venv.sh"), dir.path()).unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingScript(_)));
    }
}
