// src/core/report.rs
//! Per-line parse outcomes and the run diagnostics built from them.

use serde::Serialize;
use std::path::PathBuf;

/// A numeric field that failed to parse and was replaced by zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadNumber {
    pub field: &'static str,
    pub text: String,
}

/// Why a line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// Wrong number of TAB (or whitespace) separated fields.
    FieldCount(usize),
    /// The userdb metadata column did not hold exactly three tokens.
    MetadataCount(usize),
}

/// The result of parsing one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome<T> {
    Parsed { record: T, bad_numbers: Vec<BadNumber> },
    Comment,
    Blank,
    Malformed(Malformed),
}

/// Line counters for one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub lines: usize,
    pub records: usize,
    pub comments: usize,
    pub blank: usize,
    pub wrong_field_count: usize,
    pub wrong_metadata_count: usize,
    /// Numeric fields that were replaced by zero.
    pub invalid_numbers: usize,
    /// Lines whose key was already seen earlier in the same file.
    pub duplicates: usize,
}

impl ParseReport {
    pub fn tally<T>(&mut self, outcome: &LineOutcome<T>) {
        self.lines += 1;
        match outcome {
            LineOutcome::Parsed { bad_numbers, .. } => {
                self.records += 1;
                self.invalid_numbers += bad_numbers.len();
            }
            LineOutcome::Comment => self.comments += 1,
            LineOutcome::Blank => self.blank += 1,
            LineOutcome::Malformed(Malformed::FieldCount(_)) => self.wrong_field_count += 1,
            LineOutcome::Malformed(Malformed::MetadataCount(_)) => self.wrong_metadata_count += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.wrong_field_count + self.wrong_metadata_count
    }

    /// Distinct keys this file contributed.
    pub fn unique_records(&self) -> usize {
        self.records - self.duplicates
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub path: PathBuf,
    pub weight: f64,
    #[serde(flatten)]
    pub parse: ParseReport,
}

/// Summary of a merge run, returned to the caller and optionally dumped as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeReport {
    pub sources: Vec<SourceReport>,
    pub merged_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_lines: Option<usize>,
}

impl MergeReport {
    pub fn skipped_lines(&self) -> usize {
        self.sources.iter().map(|s| s.parse.skipped()).sum()
    }

    pub fn invalid_numbers(&self) -> usize {
        self.sources.iter().map(|s| s.parse.invalid_numbers).sum()
    }
}
