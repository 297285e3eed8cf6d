//! CLI tests: flag parsing and action execution.

use super::{normalize_args, Action, Cli};
use clap::Parser;
use lockin_core::error::LockinError;

pub(super) fn parse(args: &[&str]) -> Result<Action, LockinError> {
    let cli = Cli::try_parse_from(normalize_args(args.iter().copied())).unwrap();
    cli.action()
}
