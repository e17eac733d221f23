//! Applier: literal replacement on selected files, best effort.
//!
//! Each file is re-read at apply time; the scan count is not rechecked.
//! A failure is recorded for that file and the batch continues. Earlier
//! writes are never rolled back.

use crate::scan::MatchRecord;
use crate::utils::io;
use serde::Serialize;
use std::path::Path;

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyItem {
    pub file: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplyItem {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Summary of an apply pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    pub updated: u32,
    pub errors: u32,
    pub items: Vec<ApplyItem>,
}

impl ApplyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item: ApplyItem) {
        if item.is_error() {
            self.errors += 1;
        } else {
            self.updated += 1;
        }
        self.items.push(item);
    }
}

/// Replace every occurrence of `old` with `new` in one file and write it back.
pub fn apply_record(root: &Path, record: &MatchRecord, old: &str, new: &str) -> ApplyItem {
    let path = root.join(&record.path);

    let result = io::read_file(&path, &format!("read {}", record.file)).and_then(|content| {
        io::write_file(
            &path,
            &content.replace(old, new),
            &format!("write {}", record.file),
        )
    });

    match result {
        Ok(()) => ApplyItem {
            file: record.file.clone(),
            status: "updated".to_string(),
            error: None,
        },
        Err(err) => ApplyItem {
            file: record.file.clone(),
            status: "error".to_string(),
            error: Some(err.message),
        },
    }
}

/// Apply to every selected record, in order.
pub fn apply_selected(records: &[MatchRecord], root: &Path, old: &str, new: &str) -> ApplyReport {
    let mut report = ApplyReport::new();
    for record in records.iter().filter(|r| r.selected) {
        report.record(apply_record(root, record, old, new));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::count_occurrences;
    use std::fs;
    use tempfile::TempDir;

    const OLD: &str = "e3871e85-7a12-4fff-9f5a-5cefd3593a5a";
    const NEW: &str = "abc-123";

    #[test]
    fn replaces_every_occurrence() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.txt"), format!("a {OLD} b {OLD} c {OLD}")).unwrap();

        let records = vec![MatchRecord::new("x.txt", 3)];
        let report = apply_selected(&records, dir.path(), OLD, NEW);

        assert_eq!(report.updated, 1);
        assert_eq!(report.errors, 0);
        let content = fs::read_to_string(dir.path().join("x.txt")).unwrap();
        assert_eq!(count_occurrences(&content, OLD), 0);
        assert_eq!(count_occurrences(&content, NEW), 3);
        assert_eq!(content, format!("a {NEW} b {NEW} c {NEW}"));
    }

    #[test]
    fn unselected_records_untouched() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keep.txt"), OLD).unwrap();

        let mut record = MatchRecord::new("keep.txt", 1);
        record.selected = false;
        let report = apply_selected(&[record], dir.path(), OLD, NEW);

        assert!(report.items.is_empty());
        assert_eq!(fs::read_to_string(dir.path().join("keep.txt")).unwrap(), OLD);
    }

    #[test]
    fn failure_reported_and_batch_continues() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("second.txt"), OLD).unwrap();

        let records = vec![
            MatchRecord::new("vanished.txt", 1),
            MatchRecord::new("second.txt", 1),
        ];
        let report = apply_selected(&records, dir.path(), OLD, NEW);

        assert_eq!(report.errors, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(report.items[0].status, "error");
        assert!(report.items[0].error.is_some());
        assert_eq!(fs::read_to_string(dir.path().join("second.txt")).unwrap(), NEW);
    }

    #[test]
    fn stale_count_is_not_rechecked() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.txt"), "no identifier any more").unwrap();

        let records = vec![MatchRecord::new("x.txt", 5)];
        let report = apply_selected(&records, dir.path(), OLD, NEW);

        assert_eq!(report.updated, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("x.txt")).unwrap(),
            "no identifier any more"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn writes_back_to_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::path::PathBuf;

        let dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(dir.path().join(name), OLD).unwrap();

        let records = vec![MatchRecord::from_path(PathBuf::from(name), 1)];
        let report = apply_selected(&records, dir.path(), OLD, NEW);

        assert_eq!(report.updated, 1);
        assert_eq!(report.items[0].file, "caf\u{FFFD}.txt");
        assert_eq!(fs::read_to_string(dir.path().join(name)).unwrap(), NEW);
        assert!(!dir.path().join("caf\u{FFFD}.txt").exists());
    }
}
