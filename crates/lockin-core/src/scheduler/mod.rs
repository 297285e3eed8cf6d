//! Handing the delayed unblock to the system job scheduler.
//!
//! Blocking only writes the hosts file; the unblock happens later, outside
//! this process, when the scheduler runs a one-shot cleanup job. Once a job is
//! submitted we have no handle on it: no status, no cancellation.

mod at;
mod script;

pub use at::AtScheduler;
pub use script::{render_script, script_path, sed_pattern};

use anyhow::Result;
use chrono::NaiveDateTime;
use std::cell::RefCell;

use crate::duration::{unblock_time, BlockDuration};
use crate::error::LockinError;

/// A pending removal of one site's block records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupJob {
    pub site: String,
    /// Local wall-clock time, whole minutes.
    pub run_at: NaiveDateTime,
}

impl CleanupJob {
    /// Job that unblocks `site` once `duration` has passed since `now`.
    pub fn after(
        site: &str,
        duration: BlockDuration,
        now: NaiveDateTime,
    ) -> Result<Self, LockinError> {
        Ok(Self {
            site: site.to_string(),
            run_at: unblock_time(now, duration.to_delta())?,
        })
    }
}

/// Accepts cleanup jobs. Success means the job was submitted, nothing more.
pub trait JobScheduler {
    fn submit(&self, job: &CleanupJob) -> Result<()>;
}

impl<T: JobScheduler + ?Sized> JobScheduler for &T {
    fn submit(&self, job: &CleanupJob) -> Result<()> {
        (**self).submit(job)
    }
}

/// Submit `job`, logging what was queued.
pub fn schedule_unblock<S: JobScheduler>(scheduler: &S, job: &CleanupJob) -> Result<()> {
    scheduler.submit(job)?;
    tracing::info!(site = %job.site, run_at = %job.run_at, "scheduled unblock");
    Ok(())
}

/// Scheduler that only remembers what it was given. For tests.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    jobs: RefCell<Vec<CleanupJob>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> Vec<CleanupJob> {
        self.jobs.borrow().clone()
    }
}

impl JobScheduler for RecordingScheduler {
    fn submit(&self, job: &CleanupJob) -> Result<()> {
        self.jobs.borrow_mut().push(job.clone());
        Ok(())
    }
}
