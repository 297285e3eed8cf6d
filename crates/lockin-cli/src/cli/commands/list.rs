//! `lockin -ls` – list blocked sites.

use anyhow::{Context, Result};
use lockin_core::hosts::{HostsEditor, PrivilegedFileEditor};

pub fn run_list<F: PrivilegedFileEditor>(editor: &HostsEditor<F>) -> Result<()> {
    let domains = editor
        .list_blocked()
        .context("Failed to list blocked sites")?;
    println!("Sites blocked by this tool:");
    for domain in domains {
        println!("{domain}");
    }
    Ok(())
}
