//! Selection state for scanned files and the commands that mutate it.
//!
//! Parsing and applying a command are pure, so the interactive loop can be
//! driven by scripted input in tests.

use crate::scan::MatchRecord;
use std::io::{self, Write};

/// One line of user input, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Empty line: stop selecting and apply.
    Execute,
    /// `q`: abort without touching any file.
    Quit,
    /// `a`
    SelectAll,
    /// `n`
    SelectNone,
    /// A 1-based index. `0` stands for anything unrepresentable.
    Toggle(usize),
    Invalid,
}

/// Interpret a raw input line. Case and surrounding whitespace are ignored.
pub fn parse_command(input: &str) -> Command {
    let choice = input.trim().to_lowercase();

    match choice.as_str() {
        "" => Command::Execute,
        "q" => Command::Quit,
        "a" => Command::SelectAll,
        "n" => Command::SelectNone,
        digits if digits.bytes().all(|b| b.is_ascii_digit()) => {
            // Overflowing values are out of range just like 0.
            Command::Toggle(digits.parse().unwrap_or(0))
        }
        _ => Command::Invalid,
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Command rejected; the message is shown and the loop continues.
    Rejected(&'static str),
    Execute,
    Abort,
}

/// Ordered match records plus their selection flags.
///
/// Records are fixed after construction; only `selected` changes.
#[derive(Debug, Clone)]
pub struct Checklist {
    records: Vec<MatchRecord>,
}

impl Checklist {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn selected(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|r| r.selected)
    }

    pub fn set_all(&mut self, selected: bool) {
        for record in &mut self.records {
            record.selected = selected;
        }
    }

    /// Flip the record at a 1-based index. Returns false when out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match index.checked_sub(1).and_then(|i| self.records.get_mut(i)) {
            Some(record) => {
                record.selected = !record.selected;
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, command: Command) -> Step {
        match command {
            Command::Execute => Step::Execute,
            Command::Quit => Step::Abort,
            Command::SelectAll => {
                self.set_all(true);
                Step::Continue
            }
            Command::SelectNone => {
                self.set_all(false);
                Step::Continue
            }
            Command::Toggle(index) => {
                if self.toggle(index) {
                    Step::Continue
                } else {
                    Step::Rejected("Invalid number.")
                }
            }
            Command::Invalid => Step::Rejected("Invalid input."),
        }
    }

    /// Print the checklist and the command menu.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nTarget Files:")?;
        for (i, record) in self.records.iter().enumerate() {
            let status = if record.selected { "[x]" } else { "[ ]" };
            writeln!(
                out,
                "{} {}. {} ({} matches)",
                status,
                i + 1,
                record.file,
                record.count
            )?;
        }

        writeln!(out, "\nOptions:")?;
        writeln!(out, "  <number> : Toggle selection")?;
        writeln!(out, "  a        : Select All")?;
        writeln!(out, "  n        : Select None")?;
        writeln!(out, "  ENTER    : Execute Replacement")?;
        writeln!(out, "  q        : Quit")?;
        Ok(())
    }
}
