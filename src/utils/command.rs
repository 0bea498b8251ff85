//! Shell command execution primitives.

use std::process::{Command, ExitStatus};

use crate::error::{Error, Result};

/// Run a shell script with inherited stdio and return its exit status.
///
/// Steps stream their output straight to the user; nothing is captured.
/// Spawn failures (no shell available) surface as `Error::Io`; a non-zero
/// exit is reported through the returned status, not as an error.
pub fn run_shell(script: &str) -> Result<ExitStatus> {
    Command::new("sh")
        .arg("-c")
        .arg(script)
        .status()
        .map_err(|e| Error::Io {
            context: "spawn step shell".to_string(),
            source: e,
        })
}
