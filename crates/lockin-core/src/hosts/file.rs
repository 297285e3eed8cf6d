//! Access to the hosts file itself.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::privilege::{run_checked, Privilege};

/// Read and replace the hosts file. Writes may need elevated privilege.
pub trait PrivilegedFileEditor {
    /// Current contents; a missing file reads as empty.
    fn read(&self) -> Result<String>;
    /// Replace the contents in place.
    fn write(&self, contents: &str) -> Result<()>;
}

/// The hosts file on disk (normally `/etc/hosts`).
#[derive(Debug, Clone)]
pub struct SystemHostsFile {
    path: PathBuf,
    privilege: Privilege,
}

impl SystemHostsFile {
    pub fn new(path: impl Into<PathBuf>, privilege: Privilege) -> Self {
        Self {
            path: path.into(),
            privilege,
        }
    }
}

impl PrivilegedFileEditor for SystemHostsFile {
    fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("read {}", self.path.display())),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        match self.privilege {
            // Truncate-and-write keeps the file's owner and mode.
            Privilege::Direct => fs::write(&self.path, contents)
                .with_context(|| format!("write {}", self.path.display())),
            Privilege::Sudo => {
                let mut cmd = self.privilege.command("tee");
                cmd.arg(&self.path);
                run_checked(&mut cmd, Some(contents.as_bytes()))
                    .with_context(|| format!("write {} via sudo", self.path.display()))
            }
        }
    }
}

/// In-memory hosts file for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryHostsFile {
    contents: RefCell<String>,
}

impl MemoryHostsFile {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(contents.into()),
        }
    }

    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }
}

impl PrivilegedFileEditor for MemoryHostsFile {
    fn read(&self) -> Result<String> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self.contents.borrow_mut() = contents.to_string();
        Ok(())
    }
}

impl<T: PrivilegedFileEditor + ?Sized> PrivilegedFileEditor for &T {
    fn read(&self) -> Result<String> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<()> {
        (**self).write(contents)
    }
}
