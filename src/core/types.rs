// src/core/types.rs
use std::collections::HashMap;
use std::path::PathBuf;

/// Decay weights at or below this value are raised to it on ingestion.
pub const MIN_DECAY_WEIGHT: f64 = 0.0001;

/// The dictionary key: a word or a single character.
pub type Phrase = String;

/// Records of one source, keyed by phrase.
pub type SourceRecords<T> = HashMap<Phrase, T>;

/// One line of a Rime `userdb.txt` snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDbRecord {
    pub pronunciation: String,
    pub phrase: Phrase,
    /// Number of times the candidate was committed. Rime may lower it or reset
    /// it to zero; the merge only sums what it is given.
    pub commit_count: i64,
    /// Recency-weighted usage score, already scaled by the source weight.
    pub decay_weight: f64,
    /// Timestamp of the last commit, in Rime's own tick unit.
    pub last_used: i64,
}

/// One line of a plain Rime dictionary (`phrase`, `pronunciation`, `weight`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub phrase: Phrase,
    pub pronunciation: String,
    pub weight: i64,
}

/// One line of the Android PinyinIME raw dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDictEntry {
    pub hanzi: String,
    pub frequency: f64,
    pub syllables: Vec<String>,
}

/// An input file together with the weight its records are scaled by.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub path: PathBuf,
    pub weight: f64,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>, weight: f64) -> Self {
        Self { path: path.into(), weight }
    }
}
