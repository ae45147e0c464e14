// src/core/dict.rs
//! Plain Rime dictionary bodies: `phrase<TAB>pronunciation<TAB>weight`.

use crate::core::merger::Mergeable;
use crate::core::render::sorted_unique;
use crate::core::report::{BadNumber, LineOutcome, Malformed};
use crate::core::types::DictEntry;
use std::collections::HashMap;

impl Mergeable for DictEntry {
    fn key(&self) -> &str {
        &self.phrase
    }

    fn absorb(&mut self, incoming: Self) {
        self.pronunciation = incoming.pronunciation;
        self.phrase = incoming.phrase;
        self.weight = self.weight.saturating_add(incoming.weight);
    }
}

/// Parses one dictionary line, scaling its weight by the source weight.
pub fn parse_line(line: &str, weight: f64) -> LineOutcome<DictEntry> {
    if line.starts_with('#') {
        return LineOutcome::Comment;
    }
    if line.is_empty() {
        return LineOutcome::Blank;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    let [phrase, pronunciation, raw_weight] = fields[..] else {
        return LineOutcome::Malformed(Malformed::FieldCount(fields.len()));
    };

    let mut bad_numbers = Vec::new();
    let raw: i64 = raw_weight.parse().unwrap_or_else(|_| {
        bad_numbers.push(BadNumber {
            field: "weight",
            text: raw_weight.to_string(),
        });
        0
    });

    let entry = DictEntry {
        phrase: phrase.to_string(),
        pronunciation: pronunciation.to_string(),
        weight: scale_weight(raw, weight),
    };
    LineOutcome::Parsed { record: entry, bad_numbers }
}

/// `raw * weight`, rounded half away from zero. Integer weights stay exact.
pub fn scale_weight(raw: i64, weight: f64) -> i64 {
    if weight == 1.0 {
        return raw;
    }
    (raw as f64 * weight).round() as i64
}

pub fn entry_line(entry: &DictEntry) -> String {
    format!("{}\t{}\t{}", entry.phrase, entry.pronunciation, entry.weight)
}

/// Dictionary lines, sorted and deduplicated.
pub fn dict_lines(merged: &HashMap<String, DictEntry>) -> Vec<String> {
    sorted_unique(merged.values().map(entry_line).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merger::fold_sources;
    use crate::core::types::SourceRecords;

    fn entry(line: &str, weight: f64) -> DictEntry {
        match parse_line(line, weight) {
            LineOutcome::Parsed { record, .. } => record,
            other => panic!("expected an entry, got {other:?}"),
        }
    }

    #[test]
    fn parses_and_scales() {
        let e = entry("你好\tni hao\t12", 3.0);
        assert_eq!(e.phrase, "你好");
        assert_eq!(e.pronunciation, "ni hao");
        assert_eq!(e.weight, 36);
        assert_eq!(scale_weight(5, 0.5), 3);
        assert_eq!(scale_weight(i64::MAX, 1.0), i64::MAX);
    }

    #[test]
    fn skips_comments_and_short_lines() {
        assert_eq!(parse_line("# comment", 1.0), LineOutcome::Comment);
        assert_eq!(parse_line("你好\tni hao", 1.0), LineOutcome::Malformed(Malformed::FieldCount(2)));
    }

    #[test]
    fn bad_weight_is_zero() {
        let LineOutcome::Parsed { record, bad_numbers } = parse_line("好\thao\tlots", 1.0) else {
            panic!("line should be kept");
        };
        assert_eq!(record.weight, 0);
        assert_eq!(bad_numbers.len(), 1);
    }

    #[test]
    fn merge_sums_weights_and_keeps_last_pronunciation() {
        let a = entry("行\txing\t10", 2.0);
        let b = entry("行\thang\t5", 1.0);
        let merged = fold_sources(vec![
            SourceRecords::from([(a.phrase.clone(), a)]),
            SourceRecords::from([(b.phrase.clone(), b)]),
        ]);
        assert_eq!(dict_lines(&merged), vec!["行\thang\t25"]);
    }
}
