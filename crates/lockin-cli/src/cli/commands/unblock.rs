//! `lockin -u SITE|all` – remove blocks now.
//!
//! Any cleanup job already queued for the site still runs later; it finds
//! nothing to remove and deletes itself.

use anyhow::{Context, Result};
use lockin_core::hosts::{HostsEditor, PrivilegedFileEditor};
use lockin_core::validate::validate_site;

use crate::cli::UnblockTarget;

pub fn run_unblock<F: PrivilegedFileEditor>(
    editor: &HostsEditor<F>,
    target: &UnblockTarget,
) -> Result<()> {
    match target {
        UnblockTarget::All => {
            editor
                .unblock_all()
                .context("Failed to unblock all sites")?;
            println!("Unblocked all sites managed by lockin");
        }
        UnblockTarget::Site(site) => {
            // Records hold the normalized name; fall back to the raw text for
            // anything that does not validate.
            let site = validate_site(site).unwrap_or_else(|_| site.clone());
            let removed = editor
                .unblock_one(&site)
                .with_context(|| format!("Failed to unblock site {site}"))?;
            if removed == 0 {
                println!("{site} was not blocked.");
            } else {
                println!("Unblocked {site}");
            }
        }
    }
    Ok(())
}
