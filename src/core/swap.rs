//! The swap pipeline: load config, scan, select, apply.
//!
//! `Init → Loading Config → Scanning → (empty → Done) → Selecting → Applying → Done`,
//! with `Aborted` reachable only from `Selecting`. All user-facing text goes
//! to the supplied writer; progress lines go to stderr via `log_status!`.

use crate::apply::{self, ApplyReport};
use crate::checklist::{parse_command, Checklist, Step};
use crate::config::{self, Settings};
use crate::error::{Error, Result};
use crate::scan::{self, MatchRecord, ScanOptions};
use crate::tty;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const PROMPT: &str = "Select > ";

/// How files are chosen once the scan has matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Checklist loop on the input stream.
    Interactive,
    /// Every match is applied without asking.
    AcceptAll,
}

/// Terminal state of a run. Every variant is a successful exit.
#[derive(Debug, Clone)]
pub enum Outcome {
    NoMatches,
    Aborted,
    NothingSelected,
    Applied(ApplyReport),
}

/// Non-interactive view of a scan, used for `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub from: String,
    pub to: String,
    pub root: String,
    pub matches: Vec<MatchRecord>,
    pub total_files: usize,
    pub total_matches: usize,
}

fn emit<W: Write>(out: &mut W, line: impl AsRef<str>) -> Result<()> {
    writeln!(out, "{}", line.as_ref())
        .map_err(|e| Error::internal_io(e.to_string(), Some("write output".to_string())))
}

/// Files that must never be reported: the config file and the running binary.
pub fn skip_files(settings: &Settings) -> Vec<PathBuf> {
    let mut files = vec![settings.config_path.clone()];
    if let Ok(exe) = std::env::current_exe() {
        files.push(exe);
    }
    files
}

pub fn scan_options(settings: &Settings) -> ScanOptions {
    ScanOptions {
        root: settings.root.clone(),
        needle: settings.old_identifier.clone(),
        excluded_dirs: settings.excluded_dirs.clone(),
        skip_files: skip_files(settings),
    }
}

/// Run the checklist loop until the user executes or quits.
///
/// Returns `Step::Execute` or `Step::Abort`. End of input counts as quit.
pub fn select<R: BufRead, W: Write>(
    checklist: &mut Checklist,
    input: &mut R,
    out: &mut W,
) -> Result<Step> {
    loop {
        checklist
            .render(out)
            .map_err(|e| Error::internal_io(e.to_string(), Some("write checklist".to_string())))?;

        let Some(line) = tty::prompt(input, out, PROMPT)? else {
            emit(out, "")?;
            return Ok(Step::Abort);
        };

        match checklist.apply(parse_command(&line)) {
            Step::Continue => {}
            Step::Rejected(message) => emit(out, message)?,
            step => return Ok(step),
        }
    }
}

/// Load the config and scan, without touching any file.
pub fn report(settings: &Settings) -> Result<ScanReport> {
    let replacement = config::load_replacement(&settings.config_path, &settings.config_key)?;
    let matches = scan::scan(&scan_options(settings));

    Ok(ScanReport {
        from: settings.old_identifier.clone(),
        to: replacement,
        root: settings.root.display().to_string(),
        total_files: matches.len(),
        total_matches: matches.iter().map(|m| m.count).sum(),
        matches,
    })
}

/// Run the whole pipeline.
///
/// Config failures return `Err` before any scanning happens. Per-file apply
/// failures are printed and recorded in the report, never returned.
pub fn run<R: BufRead, W: Write>(
    settings: &Settings,
    mode: Mode,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome> {
    crate::log_status!("config", "Reading {}", settings.config_path.display());
    let replacement = config::load_replacement(&settings.config_path, &settings.config_key)?;

    emit(out, format!("Old identifier: {}", settings.old_identifier))?;
    emit(out, format!("New identifier: {}", replacement))?;
    emit(out, "-".repeat(50))?;

    emit(out, "Scanning for matches...")?;
    let records = scan::scan(&scan_options(settings));

    if records.is_empty() {
        emit(out, "No matches found.")?;
        return Ok(Outcome::NoMatches);
    }

    let mut checklist = Checklist::new(records);

    if mode == Mode::Interactive && select(&mut checklist, input, out)? == Step::Abort {
        emit(out, "Aborted.")?;
        return Ok(Outcome::Aborted);
    }

    if checklist.selected().next().is_none() {
        emit(out, "No files selected.")?;
        return Ok(Outcome::NothingSelected);
    }

    emit(out, "\nProcessing...")?;
    let report = apply::apply_selected(
        checklist.records(),
        &settings.root,
        &settings.old_identifier,
        &replacement,
    );
    for item in &report.items {
        match &item.error {
            None => emit(out, format!("Updated: {}", item.file))?,
            Some(error) => emit(out, format!("Error updating {}: {}", item.file, error))?,
        }
    }

    crate::log_status!(
        "apply",
        "{} updated, {} failed",
        report.updated,
        report.errors
    );
    emit(out, "Done.")?;

    Ok(Outcome::Applied(report))
}
