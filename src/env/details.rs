//! Environment Details Module
//! Interpreter version, creation time, disk usage and installed packages.

use crate::env::size::{dir_size, to_megabytes};
use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetailsError {
    #[error("interpreter not found")]
    InterpreterNotFound,
    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Everything shown in the details area for one environment.
#[derive(Debug)]
pub struct EnvDetails {
    pub path: PathBuf,
    pub python_version: Result<String, DetailsError>,
    pub created: Option<DateTime<Local>>,
    pub size_bytes: u64,
    pub packages: Result<Vec<String>, DetailsError>,
}

impl EnvDetails {
    /// Probe the environment. Blocks on the interpreter, the package command
    /// and the directory walk.
    pub fn gather(path: &Path, package_command: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            python_version: python_version(path),
            created: created_at(path),
            size_bytes: dir_size(path),
            packages: list_packages(path, package_command),
        }
    }

    /// Render as the plain text shown in the details area.
    pub fn render(&self) -> String {
        let mut details = Vec::new();

        details.push(format!("📁 Path: {}", self.path.display()));

        match &self.python_version {
            Ok(version) => details.push(format!("🐍 Python Version: {}", version)),
            Err(DetailsError::InterpreterNotFound) => {
                details.push("🐍 Python Version: <not found>".to_string())
            }
            Err(_) => details.push("🐍 Python Version: <error fetching>".to_string()),
        }

        match &self.created {
            Some(created) => details.push(format!(
                "📅 Created: {}",
                created.format("%Y-%m-%d %H:%M:%S")
            )),
            None => details.push("📅 Created: <unavailable>".to_string()),
        }

        details.push(format!("💾 Size: {:.2} MB", to_megabytes(self.size_bytes)));
        details.push(String::new());

        match &self.packages {
            Ok(packages) if packages.is_empty() => {
                details.push("📦 Packages: <none>".to_string())
            }
            Ok(packages) => {
                details.push("📦 Packages:".to_string());
                details.extend(packages.iter().map(|line| format!("   {}", line)));
            }
            Err(e) => details.push(format!("📦 Packages: <error fetching>\n{}", e)),
        }

        details.join("\n")
    }
}

/// `bin/python` on unix layouts, `Scripts/python.exe` on Windows ones.
pub fn python_bin(env_path: &Path) -> Option<PathBuf> {
    [
        env_path.join("bin").join("python"),
        env_path.join("Scripts").join("python.exe"),
    ]
    .into_iter()
    .find(|p| p.exists())
}

fn python_version(env_path: &Path) -> Result<String, DetailsError> {
    let python = python_bin(env_path).ok_or(DetailsError::InterpreterNotFound)?;
    let program = python.display().to_string();
    let output = run(Command::new(&python).arg("--version"), &program)?;

    // Python 2 prints its version on stderr.
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
    } else {
        Ok(stdout)
    }
}

fn created_at(env_path: &Path) -> Option<DateTime<Local>> {
    let meta = std::fs::metadata(env_path).ok()?;
    let time = meta.created().or_else(|_| meta.modified()).ok()?;
    Some(DateTime::<Local>::from(time))
}

fn list_packages(env_path: &Path, package_command: &str) -> Result<Vec<String>, DetailsError> {
    let script = format!("source bin/activate && {}", package_command);
    let output = run(
        Command::new("bash")
            .arg("-c")
            .arg(&script)
            .current_dir(env_path),
        package_command,
    )?;

    Ok(String::from_utf8_lossy(&output.stdout)
        .trim()
        .lines()
        .map(str::to_string)
        .collect())
}

fn run(command: &mut Command, program: &str) -> Result<Output, DetailsError> {
    tracing::debug!("Running {:?}", command);
    let output = command.output().map_err(|source| DetailsError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if !output.status.success() {
        return Err(DetailsError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}
