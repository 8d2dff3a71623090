//! Opens a terminal with a shell activated inside an environment.

use crate::config::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

/// A terminal that was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launched {
    pub program: String,
    pub pid: u32,
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Activation script not found: {0}")]
    MissingActivate(PathBuf),
    #[error("No terminal emulator found (tried {0})")]
    NoTerminal(String),
    #[error("Terminal launch failed: {0}")]
    Spawn(#[from] io::Error),
}

/// Quote for a POSIX shell: `'...'` with embedded quotes escaped.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// The `bash -c` command run inside the terminal.
pub fn shell_command(env_path: &Path, rcfile: Option<&Path>) -> String {
    let project_dir = env_path.parent().unwrap_or(env_path);
    let cd = format!("cd {}", shell_quote(&project_dir.to_string_lossy()));
    match rcfile {
        Some(rc) => format!("{} && exec bash --rcfile {}", cd, shell_quote(&rc.to_string_lossy())),
        None => format!(
            "{} && source {} && exec bash -i",
            cd,
            shell_quote(&env_path.join("bin").join("activate").to_string_lossy())
        ),
    }
}

/// Launch the first available terminal. Only a missing program moves on
/// to the next candidate. The child is reaped on a detached thread.
pub fn open_shell(
    env_path: &Path,
    rcfile: Option<&Path>,
    terminals: &[Terminal],
) -> Result<Launched, ShellError> {
    let activate = env_path.join("bin").join("activate");
    if !activate.exists() {
        return Err(ShellError::MissingActivate(activate));
    }

    let command = shell_command(env_path, rcfile);
    launch_first(terminals, &command)
}

fn launch_first(terminals: &[Terminal], command: &str) -> Result<Launched, ShellError> {
    for terminal in terminals {
        let spawned = Command::new(&terminal.program)
            .args(terminal.args_for(command))
            .stdin(Stdio::null())
            .spawn();
        match spawned {
            Ok(mut child) => {
                let pid = child.id();
                tracing::info!("Opened shell with {} (pid {})", terminal.program, pid);
                thread::spawn(move || {
                    let _ = child.wait();
                });
                return Ok(Launched {
                    program: terminal.program.clone(),
                    pid,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("{} not found, trying next terminal", terminal.program);
            }
            Err(e) => return Err(ShellError::Spawn(e)),
        }
    }

    let tried: Vec<&str> = terminals.iter().map(|t| t.program.as_str()).collect();
    Err(ShellError::NoTerminal(tried.join(", ")))
}
