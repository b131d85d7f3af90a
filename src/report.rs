use std::fmt;

use crate::types::{BibEntry, EntryType};
use crate::verification::Verifier;

/// Violations found in one entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntryReport {
    pub name: String,
    pub entry_type: EntryType,
    pub violations: Vec<String>,
}

/// Outcome of verifying all entries of a file, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LintReport {
    pub entries: Vec<EntryReport>,
}

impl LintReport {
    /// Verify every entry
    pub fn collect<'e, I>(entries: I, verifier: &Verifier) -> LintReport
    where
        I: IntoIterator<Item = &'e BibEntry>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| EntryReport {
                name: entry.name.clone(),
                entry_type: entry.entry_type,
                violations: verifier.verify(entry),
            })
            .collect();
        LintReport { entries }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn violation_count(&self) -> usize {
        self.entries.iter().map(|e| e.violations.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.violation_count() == 0
    }

    /// Entries with at least one violation
    pub fn failing(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| !e.violations.is_empty())
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.failing() {
            writeln!(
                f,
                "Entry '{}' of type '{}' failed verification:",
                entry.name, entry.entry_type
            )?;
            for violation in entry.violations.iter() {
                writeln!(f, "  - {}", violation)?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "Found {} violation(s) in {} entries.",
            self.violation_count(),
            self.entry_count()
        )?;
        if self.is_clean() {
            write!(f, "\nAll entries passed verification.")?;
        }
        Ok(())
    }
}
