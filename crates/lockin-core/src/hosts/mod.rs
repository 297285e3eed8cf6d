//! Marked block records in the hosts file.
//!
//! Every line this tool writes has the exact shape
//! `127.0.0.1 <domain> # managed by lockin`; external tooling matches on that
//! text, so it must not change. When reading, any line ending in the marker
//! is a record, and its second whitespace-separated field is the domain.
//! Lines without the marker are never modified or reordered.

mod file;

pub use file::{MemoryHostsFile, PrivilegedFileEditor, SystemHostsFile};

use anyhow::Result;

/// Address blocked domains resolve to.
pub const LOOPBACK: &str = "127.0.0.1";

/// Trailing tag identifying lines owned by this tool.
pub const MARKER: &str = "# managed by lockin";

/// Prefix added to cover the `www.` variant of a site.
pub const WWW_PREFIX: &str = "www.";

/// One marked line in the hosts file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    pub domain: String,
}

impl BlockRecord {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// The hosts-file line for this record, without a newline.
    pub fn to_line(&self) -> String {
        format!("{LOOPBACK} {} {MARKER}", self.domain)
    }
}

/// Whether a line carries the marker, whatever its domain or spacing.
pub fn is_marked(line: &str) -> bool {
    line.trim_end().ends_with(MARKER)
}

/// Domain of a marked line: the second whitespace-separated field before the
/// marker. Every lookup, removal and listing goes through this, so they all
/// agree on what a record is.
pub fn marked_domain(line: &str) -> Option<&str> {
    let fields = line.trim_end().strip_suffix(MARKER)?;
    fields.split_whitespace().nth(1)
}

fn is_record_for(line: &str, domains: &[String]) -> bool {
    marked_domain(line).is_some_and(|d| domains.iter().any(|w| w == d))
}

/// The domains a block request for `site` covers: the site itself and, unless
/// it already starts with `www.`, its `www.` variant.
pub fn block_domains(site: &str) -> Vec<String> {
    let mut domains = vec![site.to_string()];
    if !site.starts_with(WWW_PREFIX) {
        domains.push(format!("{WWW_PREFIX}{site}"));
    }
    domains
}

/// Domains an unblock of `site` removes: the site and `www.<site>`.
pub fn unblock_domains(site: &str) -> [String; 2] {
    [site.to_string(), format!("{WWW_PREFIX}{site}")]
}

/// Result of a block request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// New records were appended for these domains.
    Blocked(Vec<String>),
    /// A record for the site already existed; nothing was written.
    AlreadyBlocked,
}

/// Adds, removes and lists marked records through a [`PrivilegedFileEditor`].
#[derive(Debug)]
pub struct HostsEditor<F> {
    file: F,
}

impl<F: PrivilegedFileEditor> HostsEditor<F> {
    pub fn new(file: F) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    /// True if a record exists for `site` or `www.<site>`.
    pub fn is_blocked(&self, site: &str) -> Result<bool> {
        let contents = self.file.read()?;
        let wanted = unblock_domains(site);
        Ok(contents.lines().any(|line| is_record_for(line, &wanted)))
    }

    /// Append records for `site` (and `www.<site>`); no-op if already blocked.
    pub fn block(&self, site: &str) -> Result<BlockOutcome> {
        if self.is_blocked(site)? {
            tracing::info!(site, "already blocked");
            return Ok(BlockOutcome::AlreadyBlocked);
        }

        let mut contents = self.file.read()?;
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }
        let domains = block_domains(site);
        for domain in &domains {
            contents.push_str(&BlockRecord::new(domain.as_str()).to_line());
            contents.push('\n');
        }
        self.file.write(&contents)?;

        for domain in &domains {
            tracing::info!(domain = %domain, "blocked");
        }
        Ok(BlockOutcome::Blocked(domains))
    }

    /// Remove the records for `site` and `www.<site>`. Returns how many lines went.
    pub fn unblock_one(&self, site: &str) -> Result<usize> {
        let wanted = unblock_domains(site);
        let removed = self.remove_lines(|line| is_record_for(line, &wanted))?;
        tracing::info!(site, removed, "unblocked");
        Ok(removed)
    }

    /// Remove every marked line. Returns how many lines went.
    pub fn unblock_all(&self) -> Result<usize> {
        let removed = self.remove_lines(is_marked)?;
        tracing::info!(removed, "unblocked all sites");
        Ok(removed)
    }

    /// Domain token of every marked line, in file order.
    pub fn list_blocked(&self) -> Result<Vec<String>> {
        let contents = self.file.read()?;
        Ok(contents
            .lines()
            .filter_map(marked_domain)
            .map(str::to_string)
            .collect())
    }

    fn remove_lines(&self, matches: impl Fn(&str) -> bool) -> Result<usize> {
        let contents = self.file.read()?;
        let mut kept = String::with_capacity(contents.len());
        let mut removed = 0;
        for line in contents.split_inclusive('\n') {
            if matches(line) {
                removed += 1;
            } else {
                kept.push_str(line);
            }
        }
        if removed > 0 {
            self.file.write(&kept)?;
        }
        Ok(removed)
    }
}
