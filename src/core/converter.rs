// src/core/converter.rs
//! Hanzi → pinyin lookup used to repair single-character dictionary entries.

use crate::core::dict::entry_line;
use crate::core::render::sorted_unique;
use crate::core::types::DictEntry;
use pinyin::{Pinyin, ToPinyin, ToPinyinMulti};
use std::collections::HashMap;
use tracing::debug;

/// How a reading is spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PinyinStyle {
    /// `zhong`
    #[default]
    Plain,
    /// `zhōng`
    Tone,
    /// `zho1ng`
    ToneNum,
    /// `zhong1`
    ToneNumEnd,
}

impl PinyinStyle {
    fn spell(self, reading: Pinyin) -> &'static str {
        match self {
            PinyinStyle::Plain => reading.plain(),
            PinyinStyle::Tone => reading.with_tone(),
            PinyinStyle::ToneNum => reading.with_tone_num(),
            PinyinStyle::ToneNumEnd => reading.with_tone_num_end(),
        }
    }
}

/// Lookup options, handed to each converter by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinyinOptions {
    pub style: PinyinStyle,
    /// Return every reading of a polyphonic character instead of the first.
    pub heteronym: bool,
}

impl Default for PinyinOptions {
    fn default() -> Self {
        Self {
            style: PinyinStyle::Plain,
            heteronym: true,
        }
    }
}

pub struct PinyinConverter {
    options: PinyinOptions,
}

/// Dictionary lines after the repair pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedDict {
    /// Multi-character entries, pinyin untouched.
    pub phrases: Vec<String>,
    /// Single characters, one line per reading.
    pub singles: Vec<String>,
    /// Single characters missing from the pinyin table.
    pub unresolved: usize,
}

impl PinyinConverter {
    pub fn new(options: PinyinOptions) -> Self {
        Self { options }
    }

    /// All readings of `ch` in table order, without repeats. Empty when the
    /// character is not in the table.
    pub fn readings(&self, ch: char) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut push = |spelled: &str| {
            if !out.iter().any(|seen| seen == spelled) {
                out.push(spelled.to_string());
            }
        };

        if self.options.heteronym {
            if let Some(multi) = ch.to_pinyin_multi() {
                for reading in multi {
                    push(self.options.style.spell(reading));
                }
            }
        } else if let Some(reading) = ch.to_pinyin() {
            push(self.options.style.spell(reading));
        }
        out
    }

    /// Re-derives the pinyin of single-character entries; longer phrases keep
    /// theirs. Both line sets come back sorted and deduplicated.
    pub fn fix(&self, entries: &HashMap<String, DictEntry>) -> FixedDict {
        let mut fixed = FixedDict::default();
        let mut phrases = Vec::new();
        let mut singles = Vec::new();

        for entry in entries.values() {
            let mut chars = entry.phrase.chars();
            let single = match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => None,
            };

            let Some(ch) = single else {
                phrases.push(entry_line(entry));
                continue;
            };

            let readings = self.readings(ch);
            if readings.is_empty() {
                debug!(hanzi = %entry.phrase, "no pinyin in table, keeping original");
                fixed.unresolved += 1;
                singles.push(entry_line(entry));
                continue;
            }
            for reading in readings {
                singles.push(entry_line(&DictEntry {
                    pronunciation: reading,
                    ..entry.clone()
                }));
            }
        }

        fixed.phrases = sorted_unique(phrases);
        fixed.singles = sorted_unique(singles);
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(lines: &[(&str, &str, i64)]) -> HashMap<String, DictEntry> {
        lines
            .iter()
            .map(|&(phrase, pronunciation, weight)| {
                let entry = DictEntry {
                    phrase: phrase.to_string(),
                    pronunciation: pronunciation.to_string(),
                    weight,
                };
                (phrase.to_string(), entry)
            })
            .collect()
    }

    #[test]
    fn plain_readings_are_deduplicated() {
        let converter = PinyinConverter::new(PinyinOptions::default());
        // 中 has zhōng and zhòng; both are "zhong" without tones.
        assert_eq!(converter.readings('中'), vec!["zhong"]);
    }

    #[test]
    fn heteronyms_are_all_returned() {
        let converter = PinyinConverter::new(PinyinOptions::default());
        let readings = converter.readings('行');
        assert!(readings.contains(&"xing".to_string()));
        assert!(readings.contains(&"hang".to_string()));
    }

    #[test]
    fn single_reading_with_tone_number() {
        let converter = PinyinConverter::new(PinyinOptions {
            style: PinyinStyle::ToneNumEnd,
            heteronym: false,
        });
        assert_eq!(converter.readings('中'), vec!["zhong1"]);
    }

    #[test]
    fn non_hanzi_has_no_reading() {
        let converter = PinyinConverter::new(PinyinOptions::default());
        assert!(converter.readings('a').is_empty());
    }

    #[test]
    fn fix_rewrites_only_single_characters() {
        let converter = PinyinConverter::new(PinyinOptions::default());
        let fixed = converter.fix(&entries(&[("中国", "zhong guo", 9), ("中", "zong", 5), ("x", "eks", 1)]));

        assert_eq!(fixed.phrases, vec!["中国\tzhong guo\t9"]);
        assert_eq!(fixed.singles, vec!["x\teks\t1", "中\tzhong\t5"]);
        assert_eq!(fixed.unresolved, 1);
    }
}
