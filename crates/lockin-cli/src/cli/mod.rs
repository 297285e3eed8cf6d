//! CLI for lockin.
//!
//! The flag surface is `-t N UNIT -s SITE`, `-ls` and `-u SITE|all`.

mod commands;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, ValueEnum};
use lockin_core::config::{self, LockinConfig};
use lockin_core::duration::{BlockDuration, TimeUnit};
use lockin_core::error::LockinError;
use lockin_core::hosts::{HostsEditor, PrivilegedFileEditor, SystemHostsFile};
use lockin_core::privilege::Privilege;
use lockin_core::scheduler::{AtScheduler, JobScheduler};
use lockin_core::validate::validate_site;
use std::ffi::OsString;

use commands::{run_block, run_list, run_unblock};

const USAGE: &str = "\
Usage: lockin -t number m/h/d/w -s site
       lockin -ls
       lockin -u site
       lockin -u all";

/// Top-level CLI for lockin.
#[derive(Debug, Parser)]
#[command(name = "lockin", version)]
#[command(about = "Block a website for a specified duration", long_about = None)]
pub struct Cli {
    /// Duration to block the site, in UNITs.
    #[arg(short = 't', long = "time", value_name = "N")]
    pub time: Option<u32>,

    /// Unit of time: m(inutes), h(ours), d(ays) or w(eeks).
    #[arg(value_enum)]
    pub unit: Option<UnitArg>,

    /// Site to block.
    #[arg(short = 's', long = "site")]
    pub site: Option<String>,

    /// List blocked sites (also `-ls`).
    #[arg(long = "list")]
    pub list: bool,

    /// Unblock a specific site, or "all" to unblock every site.
    #[arg(short = 'u', long = "unblock", value_name = "SITE|all")]
    pub unblock: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    #[value(name = "m")]
    Minutes,
    #[value(name = "h")]
    Hours,
    #[value(name = "d")]
    Days,
    #[value(name = "w")]
    Weeks,
}

impl From<UnitArg> for TimeUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Minutes => TimeUnit::Minute,
            UnitArg::Hours => TimeUnit::Hour,
            UnitArg::Days => TimeUnit::Day,
            UnitArg::Weeks => TimeUnit::Week,
        }
    }
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Block { site: String, duration: BlockDuration },
    List,
    Unblock(UnblockTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnblockTarget {
    All,
    Site(String),
}

impl Cli {
    /// Resolve flags into one action. List wins over unblock, unblock over block.
    pub fn action(self) -> Result<Action, LockinError> {
        if self.list {
            return Ok(Action::List);
        }
        if let Some(target) = self.unblock {
            return Ok(Action::Unblock(if target == "all" {
                UnblockTarget::All
            } else {
                UnblockTarget::Site(target)
            }));
        }
        match (self.time, self.unit, self.site) {
            (Some(count), Some(unit), Some(site)) if count > 0 => Ok(Action::Block {
                site,
                duration: BlockDuration::new(count, unit.into()),
            }),
            (Some(0), _, _) => Err(LockinError::Usage("time must be at least 1".into())),
            _ => Err(LockinError::Usage("blocking needs -t, a unit and -s".into())),
        }
    }
}

/// clap short flags are one character, so `-ls` is rewritten to `--list`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|a| if a == "-ls" { OsString::from("--list") } else { a })
        .collect()
}

/// Parse `args`, run the action, and return only errors that should end the
/// process with a non-zero code. Failed hosts edits or scheduling are printed
/// and logged here instead.
pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cli = match Cli::try_parse_from(normalize_args(args)) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let action = cli.action()?;

    let cfg = config::load_or_init().unwrap_or_else(|e| {
        report(&e.context("Failed to load config, using defaults"));
        LockinConfig::default()
    });
    tracing::debug!("loaded config: {:?}", cfg);

    let privilege = Privilege::detect(cfg.use_sudo);
    let editor = HostsEditor::new(SystemHostsFile::new(&cfg.hosts_path, privilege));
    let scheduler = AtScheduler::new(
        cfg.scheduler_program.as_str(),
        &cfg.script_dir,
        &cfg.hosts_path,
        privilege,
    );
    execute(action, &editor, &scheduler)
}

/// Run one action against the given hosts file and scheduler.
pub fn execute<F, S>(action: Action, editor: &HostsEditor<F>, scheduler: &S) -> Result<()>
where
    F: PrivilegedFileEditor,
    S: JobScheduler,
{
    let result = match action {
        Action::List => run_list(editor),
        Action::Unblock(target) => run_unblock(editor, &target),
        Action::Block { site, duration } => {
            let site = validate_site(&site)?;
            run_block(editor, scheduler, &site, duration, Local::now().naive_local())
        }
    };

    match result {
        Err(e) if e.downcast_ref::<LockinError>().is_some() => Err(e),
        Err(e) => {
            report(&e);
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

/// Print an operation failure and mirror it to the log.
fn report(err: &anyhow::Error) {
    println!("{:#}", err);
    tracing::error!("{:#}", err);
}

/// Print an error that ends the run, with usage where it helps.
pub fn report_fatal(err: &anyhow::Error) {
    if let Some(e) = err.downcast_ref::<clap::Error>() {
        let _ = e.print();
        println!("{USAGE}");
        tracing::error!("usage error: {:?}", e.kind());
        return;
    }
    match err.downcast_ref::<LockinError>() {
        Some(LockinError::Usage(msg)) => {
            println!("{msg}");
            println!("{USAGE}");
            tracing::error!("usage error: {msg}");
        }
        _ => report(err),
    }
}

#[cfg(test)]
mod tests;
