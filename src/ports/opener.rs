//! This module defines the port used by the `open` capability.
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use anyhow::Result;
use tracing::{debug, warn};

/// Opens a resource (usually a URL) outside the terminal.
///
/// Callers can pass their own implementation to intercept `open` requests.
/// Any `Fn(&str) -> Result<()>` closure works as an interceptor.
pub trait Opener: Send + Sync {
    fn open(&self, target: &str) -> Result<()>;
}

impl<F> Opener for F
where
    F: Fn(&str) -> Result<()> + Send + Sync,
{
    fn open(&self, target: &str) -> Result<()> {
        self(target)
    }
}

/// Best-effort opener that hands the target to the platform launcher.
///
/// Launch failures are logged and swallowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, target: &str) -> Result<()> {
        match spawn_detached(launcher(target)) {
            Ok(_) => debug!("Launched system opener for {}", target),
            Err(e) => warn!("Could not open {}: {}", target, e),
        }
        Ok(())
    }
}

/// Spawns `command` with null stdio and reaps it on a background thread.
fn spawn_detached(mut command: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || child.wait()))
}

#[cfg(target_os = "macos")]
fn launcher(target: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(target_os = "windows")]
fn launcher(target: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", target]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launcher(target: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
