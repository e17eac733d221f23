//! Scanner: walk a tree and count literal occurrences of one identifier.
//!
//! Files that cannot be read as UTF-8 text (binary content, permission
//! errors) are skipped without a report. Excluded directory names are pruned
//! before descent at any depth.

use crate::utils::io;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Types
// ============================================================================

/// Inputs for one scan. Nothing here is read from ambient state.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub needle: String,
    pub excluded_dirs: Vec<String>,
    /// Files never reported, whatever their content (config file, own binary).
    pub skip_files: Vec<PathBuf>,
}

/// A file containing the identifier at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Relative path for display and JSON. Lossy for non-UTF-8 names.
    pub file: String,
    /// Real path relative to the scan root; the one apply writes to.
    #[serde(skip)]
    pub path: PathBuf,
    /// Occurrences found at scan time. Not revalidated before apply.
    pub count: usize,
    pub selected: bool,
}

impl MatchRecord {
    pub fn new(file: impl Into<String>, count: usize) -> Self {
        let file = file.into();
        Self {
            path: PathBuf::from(&file),
            file,
            count,
            selected: true,
        }
    }

    /// Record for a relative path that may not be valid UTF-8.
    pub fn from_path(path: PathBuf, count: usize) -> Self {
        Self {
            file: path.to_string_lossy().to_string(),
            path,
            count,
            selected: true,
        }
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Count non-overlapping occurrences of `term`, scanning left to right.
pub fn count_occurrences(text: &str, term: &str) -> usize {
    if term.is_empty() || term.len() > text.len() {
        return 0;
    }

    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        count += 1;
        start += pos + term.len();
    }

    count
}

// ============================================================================
// File walking
// ============================================================================

fn walk_recursive(dir: &Path, excluded: &[String], files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();

        if file_type.is_dir() {
            let name = entry.file_name().to_string_lossy().to_string();
            if excluded.iter().any(|skip| *skip == name) {
                continue;
            }
            walk_recursive(&path, excluded, files);
        } else if file_type.is_symlink() && path.is_dir() {
            // Symlinked directories are listed but never descended into.
            continue;
        } else {
            files.push(path);
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

// ============================================================================
// Scan
// ============================================================================

/// Walk `options.root` and return one record per file containing the needle.
///
/// Records come back in walk order with `selected = true`.
pub fn scan(options: &ScanOptions) -> Vec<MatchRecord> {
    let mut files = Vec::new();
    walk_recursive(&options.root, &options.excluded_dirs, &mut files);

    let skip: Vec<PathBuf> = options.skip_files.iter().map(|p| canonical(p)).collect();
    let mut records = Vec::new();

    for file_path in &files {
        if skip.contains(&canonical(file_path)) {
            continue;
        }

        let Some(content) = io::read_text_lossless(file_path) else {
            continue;
        };

        let count = count_occurrences(&content, &options.needle);
        if count > 0 {
            records.push(MatchRecord::from_path(
                relative_to(file_path, &options.root),
                count,
            ));
        }
    }

    crate::log_status!(
        "scan",
        "{} file(s) checked, {} with matches",
        files.len(),
        records.len()
    );

    records
}

// ============================================================================
// Tests
// ============================================================================
