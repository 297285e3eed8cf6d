//! `at(1)` binding of [`JobScheduler`].

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::script::{render_script, script_path};
use super::{CleanupJob, JobScheduler};
use crate::duration::at_timespec;
use crate::privilege::{run_checked, Privilege};

/// Installs the cleanup script, then queues it with `at`.
#[derive(Debug, Clone)]
pub struct AtScheduler {
    program: String,
    script_dir: PathBuf,
    hosts_path: PathBuf,
    privilege: Privilege,
}

impl AtScheduler {
    pub fn new(
        program: impl Into<String>,
        script_dir: impl Into<PathBuf>,
        hosts_path: impl Into<PathBuf>,
        privilege: Privilege,
    ) -> Self {
        Self {
            program: program.into(),
            script_dir: script_dir.into(),
            hosts_path: hosts_path.into(),
            privilege,
        }
    }

    /// Write the cleanup script for `site` and make it executable.
    pub fn install_script(&self, site: &str) -> Result<PathBuf> {
        let path = script_path(&self.script_dir, site);
        let contents = render_script(site, &self.hosts_path);
        match self.privilege {
            Privilege::Direct => {
                fs::write(&path, &contents)
                    .with_context(|| format!("write {}", path.display()))?;
                make_executable(&path)?;
            }
            Privilege::Sudo => {
                let mut tee = self.privilege.command("tee");
                tee.arg(&path);
                run_checked(&mut tee, Some(contents.as_bytes()))
                    .with_context(|| format!("write {} via sudo", path.display()))?;
                let mut chmod = self.privilege.command("chmod");
                chmod.arg("+x").arg(&path);
                run_checked(&mut chmod, None)
                    .with_context(|| format!("chmod {}", path.display()))?;
            }
        }
        tracing::info!(path = %path.display(), "created unblock script");
        Ok(path)
    }
}

impl JobScheduler for AtScheduler {
    fn submit(&self, job: &CleanupJob) -> Result<()> {
        let path = self.install_script(&job.site)?;
        let timespec = at_timespec(job.run_at);
        let mut cmd = self.privilege.command(&self.program);
        cmd.arg(&timespec);
        let input = format!("{}\n", path.display());
        run_checked(&mut cmd, Some(input.as_bytes())).with_context(|| {
            format!("queue {} with {} at {timespec}", path.display(), self.program)
        })
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms).with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
