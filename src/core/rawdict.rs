// src/core/rawdict.rs
//! Android PinyinIME raw dictionary (`hanzi freq flag syllable...`).

use crate::core::report::{BadNumber, LineOutcome, Malformed, ParseReport};
use crate::core::types::RawDictEntry;
use tracing::warn;

const MIN_FIELDS: usize = 4;

pub fn parse_line(line: &str) -> LineOutcome<RawDictEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return LineOutcome::Blank;
    }
    if fields.len() < MIN_FIELDS {
        return LineOutcome::Malformed(Malformed::FieldCount(fields.len()));
    }

    let mut bad_numbers = Vec::new();
    let frequency = fields[1].parse().unwrap_or_else(|_| {
        bad_numbers.push(BadNumber {
            field: "frequency",
            text: fields[1].to_string(),
        });
        0.0
    });

    // fields[2] is the GBK flag, unused by Rime.
    let entry = RawDictEntry {
        hanzi: fields[0].to_string(),
        frequency,
        syllables: fields[MIN_FIELDS - 1..].iter().map(|s| s.to_string()).collect(),
    };
    LineOutcome::Parsed { record: entry, bad_numbers }
}

/// Frequency rounded half up to the integer weight Rime uses.
pub fn rime_weight(frequency: f64) -> i64 {
    (frequency + 0.5).floor() as i64
}

pub fn entry_line(entry: &RawDictEntry) -> String {
    format!("{} {} {}", entry.hanzi, entry.syllables.join(" "), rime_weight(entry.frequency))
}

/// Converts a whole raw dictionary, keeping the input line order.
pub fn convert(text: &str) -> (Vec<String>, ParseReport) {
    let mut lines = Vec::new();
    let mut report = ParseReport::default();

    for (idx, line) in text.lines().enumerate() {
        let outcome = parse_line(line);
        report.tally(&outcome);
        if let LineOutcome::Parsed { record, bad_numbers } = outcome {
            for bad in &bad_numbers {
                warn!(line = idx + 1, value = %bad.text, "unparseable frequency, using 0");
            }
            lines.push(entry_line(&record));
        }
    }

    (lines, report)
}
