//! Running external programs, with `sudo` in front when we are not root.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// How privileged operations are carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Prefix commands with `sudo`.
    Sudo,
    /// Already root (or escalation disabled): run commands and write files directly.
    Direct,
}

impl Privilege {
    /// `Sudo` when escalation is enabled and the effective user is not root.
    pub fn detect(use_sudo: bool) -> Self {
        if use_sudo && !is_root() {
            Privilege::Sudo
        } else {
            Privilege::Direct
        }
    }

    /// Build a command for `program`, wrapped in `sudo` if needed.
    pub fn command(self, program: &str) -> Command {
        match self {
            Privilege::Sudo => {
                let mut cmd = Command::new("sudo");
                cmd.arg(program);
                cmd
            }
            Privilege::Direct => Command::new(program),
        }
    }
}

#[cfg(unix)]
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

/// Run `cmd` to completion, optionally feeding `input` on stdin.
/// Fails with the program's stderr when it exits non-zero.
pub fn run_checked(cmd: &mut Command, input: Option<&[u8]>) -> Result<()> {
    let program = format!("{:?}", cmd.get_program());
    cmd.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    })
    .stdout(Stdio::null())
    .stderr(Stdio::piped());

    let mut child = cmd.spawn().with_context(|| format!("spawn {program}"))?;
    if let Some(bytes) = input {
        let mut stdin = child
            .stdin
            .take()
            .with_context(|| format!("stdin of {program}"))?;
        stdin
            .write_all(bytes)
            .with_context(|| format!("write stdin of {program}"))?;
        // Dropping stdin closes the pipe so the child sees EOF.
    }

    let output = child
        .wait_with_output()
        .with_context(|| format!("wait for {program}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{program} failed ({}): {}", output.status, stderr.trim());
    }
    tracing::debug!(program = %program, "command succeeded");
    Ok(())
}
