//! The self-deleting cleanup script run by `at`.

use std::path::{Path, PathBuf};

use crate::hosts::{unblock_domains, MARKER};

/// Where the cleanup script for `site` lives: `<dir>/unblock_<site>.sh`.
pub fn script_path(dir: &Path, site: &str) -> PathBuf {
    dir.join(format!("unblock_{site}.sh"))
}

/// Anchored extended-regex sed address for the record lines of `domain`:
/// lines ending in the marker whose second field is exactly `domain`, the
/// same rule the hosts editor applies.
pub fn sed_pattern(domain: &str) -> String {
    format!(
        "^[[:space:]]*[^[:space:]]+[[:space:]]+{}([[:space:]].*)?{}[[:space:]]*$",
        escape_ere(domain),
        escape_ere(MARKER)
    )
}

/// Bash script that deletes the records for `site` and `www.<site>` from
/// `hosts_path`, then removes itself.
pub fn render_script(site: &str, hosts_path: &Path) -> String {
    let hosts = shell_quote(&hosts_path.to_string_lossy());
    let mut script = String::from("#!/bin/bash\n");
    for domain in unblock_domains(site) {
        script.push_str(&format!(
            "sed -E -i {} {hosts}\n",
            shell_quote(&format!("/{}/d", sed_pattern(&domain)))
        ));
    }
    script.push_str("rm -- \"$0\"\n");
    script
}

fn escape_ere(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '/'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
