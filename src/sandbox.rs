use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{LibrarianError, LibrarianResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The documentation root is visible from this process.
    Local,
    /// Not visible here, but re-running inside the SDK runtime may see it.
    Sandbox,
    Missing,
}

#[derive(Debug)]
pub struct SandboxOutput {
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

pub fn is_inside_flatpak() -> bool {
    Path::new("/.flatpak-info").exists() || std::env::var_os("FLATPAK_ID").is_some()
}

pub fn check(config: &Config) -> Availability {
    availability(config, is_inside_flatpak())
}

fn availability(config: &Config, inside_flatpak: bool) -> Availability {
    if config.doc_root.exists() {
        Availability::Local
    } else if config.allow_sandbox && !inside_flatpak {
        Availability::Sandbox
    } else {
        Availability::Missing
    }
}

fn flatpak_command(config: &Config, exe: &Path, args: &[OsString]) -> Command {
    let mut filesystem = OsString::from("--filesystem=");
    filesystem.push(exe);
    let mut command_arg = OsString::from("--command=");
    command_arg.push(exe);

    let mut command = Command::new("flatpak");
    command
        .arg("run")
        .arg("--devel")
        .arg(filesystem)
        .arg(command_arg)
        .arg(&config.runtime)
        .args(args)
        .kill_on_drop(true);
    command
}

/// Re-runs this executable inside the configured Flatpak SDK with the same
/// arguments, capturing its output. Bounded by `config.sandbox_timeout`.
pub async fn run_in_flatpak(config: &Config, args: &[OsString]) -> LibrarianResult<SandboxOutput> {
    let exe = std::env::current_exe()?;
    debug!(runtime = %config.runtime, exe = %exe.display(), "re-running inside flatpak");

    let mut command = flatpak_command(config, &exe, args);

    let output = match tokio::time::timeout(config.sandbox_timeout, command.output()).await {
        Ok(output) => output?,
        Err(_) => {
            warn!(timeout = ?config.sandbox_timeout, "flatpak run timed out");
            return Err(LibrarianError::Timeout(config.sandbox_timeout.as_secs()));
        }
    };

    Ok(SandboxOutput {
        status: output.status.code().unwrap_or(1),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
