// src/core/userdb.rs
//! Rime `userdb.txt` snapshots: `pronunciation<TAB>phrase<TAB>c=.. d=.. t=..`.

use crate::core::merger::{fold_timestamp, Mergeable};
use crate::core::render::sorted_unique;
use crate::core::report::{BadNumber, LineOutcome, Malformed};
use crate::core::types::{UserDbRecord, MIN_DECAY_WEIGHT};
use std::collections::HashMap;

/// Export weight per committed candidate.
pub const EXPORT_WEIGHT_SCALE: i64 = 1000;

impl Mergeable for UserDbRecord {
    fn key(&self) -> &str {
        &self.phrase
    }

    fn absorb(&mut self, incoming: Self) {
        self.pronunciation = incoming.pronunciation;
        self.phrase = incoming.phrase;
        self.commit_count = self.commit_count.saturating_add(incoming.commit_count);
        self.decay_weight += incoming.decay_weight;
        self.last_used = fold_timestamp(self.last_used, incoming.last_used);
    }
}

/// Parses one snapshot line and scales its decay weight by `weight`.
///
/// The raw `d` is floored to [`MIN_DECAY_WEIGHT`] before scaling. Numbers
/// that fail to parse become zero and are reported in `bad_numbers`.
pub fn parse_line(line: &str, weight: f64) -> LineOutcome<UserDbRecord> {
    if line.starts_with('#') {
        return LineOutcome::Comment;
    }
    if line.is_empty() {
        return LineOutcome::Blank;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    let [pronunciation, phrase, metadata] = fields[..] else {
        return LineOutcome::Malformed(Malformed::FieldCount(fields.len()));
    };

    let tokens: Vec<&str> = metadata.split(' ').collect();
    let [c, d, t] = tokens[..] else {
        return LineOutcome::Malformed(Malformed::MetadataCount(tokens.len()));
    };

    let mut bad_numbers = Vec::new();
    let commit_count = parse_or_zero("c", c, &mut bad_numbers);
    let raw_decay: f64 = parse_or_zero("d", d, &mut bad_numbers);
    let last_used = parse_or_zero("t", t, &mut bad_numbers);

    let record = UserDbRecord {
        pronunciation: pronunciation.to_string(),
        phrase: phrase.to_string(),
        commit_count,
        decay_weight: raw_decay.max(MIN_DECAY_WEIGHT) * weight,
        last_used,
    };
    LineOutcome::Parsed { record, bad_numbers }
}

/// Value of a `key=value` token; anything else yields an empty string.
fn token_value(token: &str) -> &str {
    let parts: Vec<&str> = token.split('=').collect();
    match parts[..] {
        [_, value] => value,
        _ => "",
    }
}

fn parse_or_zero<N>(field: &'static str, token: &str, bad_numbers: &mut Vec<BadNumber>) -> N
where
    N: std::str::FromStr + Default,
{
    let text = token_value(token);
    text.parse().unwrap_or_else(|_| {
        bad_numbers.push(BadNumber {
            field,
            text: token.to_string(),
        });
        N::default()
    })
}

pub fn snapshot_line(record: &UserDbRecord) -> String {
    format!(
        "{}\t{}\tc={} d={:.4} t={}",
        record.pronunciation, record.phrase, record.commit_count, record.decay_weight, record.last_used
    )
}

pub fn export_line(record: &UserDbRecord) -> String {
    format!(
        "{}\t{}\t{}",
        record.pronunciation,
        record.phrase,
        record.commit_count.saturating_mul(EXPORT_WEIGHT_SCALE)
    )
}

/// Snapshot lines, sorted and deduplicated.
pub fn snapshot_lines(merged: &HashMap<String, UserDbRecord>) -> Vec<String> {
    sorted_unique(merged.values().map(snapshot_line).collect())
}

/// Export lines, sorted and deduplicated.
pub fn export_lines(merged: &HashMap<String, UserDbRecord>) -> Vec<String> {
    sorted_unique(merged.values().map(export_line).collect())
}
