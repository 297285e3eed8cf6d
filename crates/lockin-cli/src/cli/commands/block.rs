//! `lockin -t N UNIT -s SITE` – block a site, then queue its unblock.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use lockin_core::duration::BlockDuration;
use lockin_core::hosts::{BlockOutcome, HostsEditor, PrivilegedFileEditor};
use lockin_core::scheduler::{schedule_unblock, CleanupJob, JobScheduler};

/// Blocks `site` (already validated) and schedules the cleanup job. A site
/// that is already blocked keeps its existing job; no second one is queued.
pub fn run_block<F, S>(
    editor: &HostsEditor<F>,
    scheduler: &S,
    site: &str,
    duration: BlockDuration,
    now: NaiveDateTime,
) -> Result<()>
where
    F: PrivilegedFileEditor,
    S: JobScheduler,
{
    // Resolve the run time first so a bad duration never leaves a block behind.
    let job = CleanupJob::after(site, duration, now)?;

    match editor
        .block(site)
        .with_context(|| format!("Failed to block site {site}"))?
    {
        BlockOutcome::AlreadyBlocked => {
            println!("{site} is already blocked.");
            return Ok(());
        }
        BlockOutcome::Blocked(domains) => {
            for domain in domains {
                println!("Blocked {domain}");
            }
        }
    }

    schedule_unblock(scheduler, &job)
        .with_context(|| format!("Failed to schedule unblock for {site}"))?;
    println!("Scheduled to unblock {site} after {duration}");
    Ok(())
}
