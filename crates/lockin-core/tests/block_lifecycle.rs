//! Integration test: block, schedule, list and unblock against a hosts file on disk.
//!
//! Uses a temp hosts file with direct (non-sudo) writes and a recording
//! scheduler, then runs the generated cleanup script to check it removes the
//! same records the editor would.

use chrono::NaiveDate;
use lockin_core::duration::{BlockDuration, TimeUnit};
use lockin_core::hosts::{BlockOutcome, HostsEditor, SystemHostsFile};
use lockin_core::privilege::Privilege;
use lockin_core::scheduler::{render_script, schedule_unblock, CleanupJob, RecordingScheduler};
use lockin_core::validate::validate_site;
use std::fs;
use tempfile::tempdir;

const BASE: &str = "127.0.0.1 localhost\n127.0.1.1 debian\n\n# IPv6\n::1 localhost ip6-localhost\n";

#[test]
fn block_then_schedule_then_unblock() {
    let dir = tempdir().unwrap();
    let hosts_path = dir.path().join("hosts");
    fs::write(&hosts_path, BASE).unwrap();

    let editor = HostsEditor::new(SystemHostsFile::new(&hosts_path, Privilege::Direct));
    let scheduler = RecordingScheduler::new();
    let now = NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(12, 0, 30)
        .unwrap();

    let site = validate_site("Example.com").unwrap();
    let job = CleanupJob::after(&site, BlockDuration::new(1, TimeUnit::Day), now).unwrap();
    let outcome = editor.block(&site).unwrap();
    assert!(matches!(outcome, BlockOutcome::Blocked(ref d) if d.len() == 2));
    schedule_unblock(&scheduler, &job).unwrap();
    assert_eq!(
        job.run_at,
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 0, 0).unwrap()
    );

    // Second request for the same site changes nothing.
    let after_first = fs::read_to_string(&hosts_path).unwrap();
    assert_eq!(editor.block(&site).unwrap(), BlockOutcome::AlreadyBlocked);
    assert_eq!(fs::read_to_string(&hosts_path).unwrap(), after_first);

    editor.block("other.org").unwrap();
    assert_eq!(
        editor.list_blocked().unwrap(),
        ["example.com", "www.example.com", "other.org", "www.other.org"]
    );

    assert_eq!(editor.unblock_one(&site).unwrap(), 2);
    assert_eq!(editor.list_blocked().unwrap(), ["other.org", "www.other.org"]);

    assert_eq!(editor.unblock_all().unwrap(), 2);
    assert_eq!(fs::read_to_string(&hosts_path).unwrap(), BASE);
    assert_eq!(scheduler.jobs().len(), 1);
}

#[cfg(unix)]
#[test]
fn cleanup_script_removes_only_its_site_and_itself() {
    use std::os::unix::fs::PermissionsExt;
    use std::process::Command;

    let dir = tempdir().unwrap();
    let hosts_path = dir.path().join("hosts");
    fs::write(&hosts_path, BASE).unwrap();

    let editor = HostsEditor::new(SystemHostsFile::new(&hosts_path, Privilege::Direct));
    editor.block("example.com").unwrap();
    editor.block("myexample.com").unwrap();
    editor.block("example.com.au").unwrap();
    // Hand-edited record with other spacing: listed by the editor, so the script removes it too.
    let mut contents = fs::read_to_string(&hosts_path).unwrap();
    contents.push_str("0.0.0.0\texample.com   # managed by lockin\n");
    fs::write(&hosts_path, contents).unwrap();
    let listed = editor.list_blocked().unwrap();
    assert_eq!(listed.iter().filter(|d| *d == "example.com").count(), 2);

    let script_path = dir.path().join("unblock_example.com.sh");
    fs::write(&script_path, render_script("example.com", &hosts_path)).unwrap();
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755)).unwrap();

    let status = Command::new("bash").arg(&script_path).status().unwrap();
    assert!(status.success());
    assert!(!script_path.exists(), "script deletes itself");

    assert_eq!(
        editor.list_blocked().unwrap(),
        [
            "myexample.com",
            "www.myexample.com",
            "example.com.au",
            "www.example.com.au",
        ]
    );
    assert!(fs::read_to_string(&hosts_path).unwrap().starts_with(BASE));
}
