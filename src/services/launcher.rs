//! External program launching
//!
//! Editors, terminals, diff tools and VCS clients are started as detached
//! processes. Their exit status is never observed; only a failure to spawn is
//! reported back.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{OrthokeysError, Result};

/// One program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl LaunchRequest {
    /// Split a configured command line (`"meld --newtab"`) on whitespace.
    /// `what` names the setting in the error when the command is blank.
    pub fn from_command(command: &str, what: &'static str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(OrthokeysError::EmptyCommand(what))?;
        Ok(Self {
            program,
            args: parts.collect(),
            cwd: None,
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

pub trait Launcher {
    fn launch(&self, request: &LaunchRequest) -> Result<()>;
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<()> {
        let mut command = Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &request.cwd {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| OrthokeysError::Launch {
            program: request.program.clone(),
            source: e,
        })?;
        log::debug!("started {} (pid {})", request.program, child.id());

        // Reap in the background so the child does not linger as a zombie.
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// Desktop-environment configuration lookups.
pub trait DesktopConfig {
    /// Preferred terminal emulator command, if the desktop names one.
    fn terminal_command(&self) -> Option<String>;
}

/// Reads the GNOME default terminal through `gsettings`, then `$TERMINAL`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GsettingsDesktop;

const TERMINAL_SCHEMA: &str = "org.gnome.desktop.default-applications.terminal";

impl DesktopConfig for GsettingsDesktop {
    fn terminal_command(&self) -> Option<String> {
        let from_gsettings = Command::new("gsettings")
            .args(["get", TERMINAL_SCHEMA, "exec"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| parse_gsettings_string(&String::from_utf8_lossy(&o.stdout)));

        from_gsettings.or_else(|| {
            std::env::var("TERMINAL")
                .ok()
                .filter(|t| !t.trim().is_empty())
        })
    }
}

/// `'gnome-terminal'\n` → `gnome-terminal`
fn parse_gsettings_string(raw: &str) -> Option<String> {
    let value = raw.trim().trim_matches('\'').trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
