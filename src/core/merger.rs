// src/core/merger.rs
//! Loading per-source record maps and folding them into one.

use crate::core::report::{LineOutcome, ParseReport};
use crate::core::types::{Phrase, Source, SourceRecords};
use crate::errors::Result;
use crate::persistence::read_text;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A record that can be folded into another record with the same key.
pub trait Mergeable {
    fn key(&self) -> &str;

    /// Combines `incoming` (from a later source) into `self`.
    fn absorb(&mut self, incoming: Self);
}

/// Mean of two timestamps, truncated toward zero, without overflow.
///
/// Applied pairwise while folding, so `[10, 20, 30]` yields
/// `((10 + 20) / 2 + 30) / 2 = 22` rather than the plain mean.
pub fn fold_timestamp(existing: i64, incoming: i64) -> i64 {
    ((existing as i128 + incoming as i128) / 2) as i64
}

/// Reads one source file and keys its records, later lines replacing earlier
/// ones with the same key.
pub fn load_source<T, F>(source: &Source, parse_line: F) -> Result<(SourceRecords<T>, ParseReport)>
where
    T: Mergeable,
    F: Fn(&str, f64) -> LineOutcome<T>,
{
    let text = read_text(&source.path)?;
    let mut records = SourceRecords::new();
    let mut report = ParseReport::default();

    for (idx, line) in text.lines().enumerate() {
        let outcome = parse_line(line, source.weight);
        report.tally(&outcome);
        match outcome {
            LineOutcome::Parsed { record, bad_numbers } => {
                for bad in &bad_numbers {
                    warn!(
                        path = %source.path.display(),
                        line = idx + 1,
                        field = bad.field,
                        value = %bad.text,
                        "unparseable number, using 0"
                    );
                }
                if records.insert(record.key().to_string(), record).is_some() {
                    report.duplicates += 1;
                }
            }
            LineOutcome::Malformed(kind) => {
                debug!(path = %source.path.display(), line = idx + 1, ?kind, "skipping malformed line");
            }
            LineOutcome::Comment | LineOutcome::Blank => {}
        }
    }

    Ok((records, report))
}

/// Folds sources into one map, in the order given.
///
/// A phrase seen for the first time is inserted as is; afterwards each new
/// occurrence is absorbed into the stored record. Order matters for the
/// non-numeric fields and for timestamp averaging.
#[derive(Debug)]
pub struct Merger<T> {
    merged: HashMap<Phrase, T>,
}

impl<T: Mergeable> Merger<T> {
    pub fn new() -> Self {
        Self { merged: HashMap::new() }
    }

    pub fn absorb_source(&mut self, records: SourceRecords<T>) {
        for (phrase, record) in records {
            match self.merged.entry(phrase) {
                Entry::Occupied(mut slot) => slot.get_mut().absorb(record),
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }
    }

    pub fn finish(self) -> HashMap<Phrase, T> {
        self.merged
    }
}

impl<T: Mergeable> Default for Merger<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience fold over already loaded sources.
pub fn fold_sources<T, I>(sources: I) -> HashMap<Phrase, T>
where
    T: Mergeable,
    I: IntoIterator<Item = SourceRecords<T>>,
{
    let mut merger = Merger::new();
    for records in sources {
        merger.absorb_source(records);
    }
    merger.finish()
}
