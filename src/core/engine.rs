use crate::core::converter::{PinyinConverter, PinyinOptions};
use crate::core::dict;
use crate::core::merger::{load_source, Merger};
use crate::core::rawdict;
use crate::core::render::{render_document, DictHeader};
use crate::core::report::{LineOutcome, MergeReport, ParseReport, SourceReport};
use crate::core::types::{DictEntry, Source};
use crate::core::userdb;
use crate::errors::{DictError, Result};
use crate::persistence::{read_text, write_atomic};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What to do when fewer weights than inputs are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightPolicy {
    /// Every input needs its own weight.
    Exact,
    /// Inputs without a weight get 1.
    PadWithOne,
}

/// Pairs inputs with weights and checks both lists.
pub fn resolve_sources(inputs: &[PathBuf], weights: &[f64], policy: WeightPolicy) -> Result<Vec<Source>> {
    if inputs.is_empty() {
        return Err(DictError::NoInputs);
    }
    let mismatch = match policy {
        WeightPolicy::Exact => weights.len() != inputs.len(),
        WeightPolicy::PadWithOne => weights.len() > inputs.len(),
    };
    if mismatch {
        return Err(DictError::WeightCountMismatch {
            inputs: inputs.len(),
            weights: weights.len(),
        });
    }
    if let Some((idx, &value)) = weights.iter().enumerate().find(|(_, w)| !(w.is_finite() && **w > 0.0)) {
        return Err(DictError::InvalidWeight { index: idx + 1, value });
    }
    if weights.len() < inputs.len() {
        info!(
            unweighted = inputs.len() - weights.len(),
            "inputs without a weight default to 1"
        );
    }

    Ok(inputs
        .iter()
        .enumerate()
        .map(|(idx, path)| Source::new(path.clone(), weights.get(idx).copied().unwrap_or(1.0)))
        .collect())
}

/// The export half of a userdb merge.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTarget {
    pub path: PathBuf,
    /// Dictionary name for the header; derived from the file name when unset.
    pub name: Option<String>,
}

impl ExportTarget {
    fn header(&self) -> DictHeader {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| DictHeader::name_for_path(&self.path));
        DictHeader::new(name).with_preset_vocabulary(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserDbMergeOptions {
    pub sources: Vec<Source>,
    pub snapshot: Option<PathBuf>,
    pub export: Option<ExportTarget>,
}

/// Merges userdb snapshots and writes the snapshot and/or export file.
///
/// Every source is read before anything is written, so a missing input
/// leaves existing outputs untouched.
pub fn merge_userdb(options: &UserDbMergeOptions) -> Result<MergeReport> {
    if options.snapshot.is_none() && options.export.is_none() {
        return Err(DictError::NoOutput);
    }
    if options.sources.is_empty() {
        return Err(DictError::NoInputs);
    }

    let mut merger = Merger::new();
    let mut report = MergeReport::default();
    for source in &options.sources {
        let (records, parse) = load_source(source, userdb::parse_line)?;
        log_source(source, &parse);
        merger.absorb_source(records);
        report.sources.push(SourceReport {
            path: source.path.clone(),
            weight: source.weight,
            parse,
        });
    }
    let merged = merger.finish();
    report.merged_records = merged.len();

    let snapshot = options.snapshot.as_ref().map(|path| {
        let lines = userdb::snapshot_lines(&merged);
        (path, lines.len(), render_document(None, &lines))
    });
    let export = options.export.as_ref().map(|target| {
        let lines = userdb::export_lines(&merged);
        (&target.path, lines.len(), render_document(Some(&target.header()), &lines))
    });

    if let Some((path, count, body)) = snapshot {
        write_atomic(path, body.as_bytes())?;
        info!(path = %path.display(), lines = count, "snapshot written");
        report.snapshot_lines = Some(count);
    }
    if let Some((path, count, body)) = export {
        write_atomic(path, body.as_bytes())?;
        info!(path = %path.display(), lines = count, "export written");
        report.export_lines = Some(count);
    }
    Ok(report)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictMergeOptions {
    pub sources: Vec<Source>,
    pub output: PathBuf,
    /// Prepend a dictionary header with this name.
    pub name: Option<String>,
}

/// Merges plain dictionaries by phrase, summing weighted weights.
pub fn merge_dict(options: &DictMergeOptions) -> Result<MergeReport> {
    if options.sources.is_empty() {
        return Err(DictError::NoInputs);
    }

    let mut merger = Merger::new();
    let mut report = MergeReport::default();
    for source in &options.sources {
        let (records, parse) = load_source(source, dict::parse_line)?;
        log_source(source, &parse);
        merger.absorb_source(records);
        report.sources.push(SourceReport {
            path: source.path.clone(),
            weight: source.weight,
            parse,
        });
    }
    let merged = merger.finish();
    report.merged_records = merged.len();

    let lines = dict::dict_lines(&merged);
    let header = options.name.as_deref().map(DictHeader::new);
    write_atomic(&options.output, render_document(header.as_ref(), &lines).as_bytes())?;
    info!(path = %options.output.display(), lines = lines.len(), "dictionary written");
    report.snapshot_lines = Some(lines.len());
    Ok(report)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinyinFixOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub name: String,
    pub pinyin: PinyinOptions,
}

impl PinyinFixOptions {
    pub fn phrase_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.dict.yaml", self.name))
    }

    pub fn single_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.single.dict.yaml", self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinyinFixReport {
    #[serde(flatten)]
    pub parse: ParseReport,
    pub phrase_lines: usize,
    pub single_lines: usize,
    pub unresolved: usize,
}

/// Rewrites the pinyin of single characters and splits the dictionary into a
/// phrase file and a single-character file.
pub fn fix_pinyin(options: &PinyinFixOptions) -> Result<PinyinFixReport> {
    let source = Source::new(options.input.clone(), 1.0);
    let (entries, parse) = load_source(&source, |line, weight| trimmed_entry(dict::parse_line(line, weight)))?;
    log_source(&source, &parse);

    let fixed = PinyinConverter::new(options.pinyin).fix(&entries);
    let single_name = format!("{}.single", options.name);
    let phrase_body = render_document(Some(&DictHeader::new(options.name.as_str())), &fixed.phrases);
    let single_body = render_document(Some(&DictHeader::new(single_name)), &fixed.singles);

    write_atomic(&options.phrase_path(), phrase_body.as_bytes())?;
    write_atomic(&options.single_path(), single_body.as_bytes())?;
    if fixed.unresolved > 0 {
        warn!(count = fixed.unresolved, "characters without a pinyin reading kept as is");
    }
    info!(
        phrases = fixed.phrases.len(),
        singles = fixed.singles.len(),
        dir = %options.output_dir.display(),
        "pinyin fixed"
    );

    Ok(PinyinFixReport {
        parse,
        phrase_lines: fixed.phrases.len(),
        single_lines: fixed.singles.len(),
        unresolved: fixed.unresolved,
    })
}

/// Hanzi columns are often padded with spaces.
fn trimmed_entry(outcome: LineOutcome<DictEntry>) -> LineOutcome<DictEntry> {
    match outcome {
        LineOutcome::Parsed { mut record, bad_numbers } => {
            record.phrase = record.phrase.trim_matches(' ').to_string();
            LineOutcome::Parsed { record, bad_numbers }
        }
        other => other,
    }
}

pub const ANDROID_DICT_NAME: &str = "android_pinyin_simple";

#[derive(Debug, Clone, PartialEq)]
pub struct RawDictOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name: String,
}

/// Converts the Android raw dictionary into a Rime dictionary, keeping line order.
pub fn convert_rawdict(options: &RawDictOptions) -> Result<ParseReport> {
    let text = read_text(&options.input)?;
    let (lines, report) = rawdict::convert(&text);
    let body = render_document(Some(&DictHeader::new(options.name.as_str())), &lines);
    write_atomic(&options.output, body.as_bytes())?;
    info!(path = %options.output.display(), lines = lines.len(), "dictionary written");
    Ok(report)
}

fn log_source(source: &Source, parse: &ParseReport) {
    info!(
        path = %source.path.display(),
        weight = source.weight,
        records = parse.unique_records(),
        skipped = parse.skipped(),
        "merged source"
    );
}

/// Writes any serializable run report as pretty JSON.
pub fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("in{i}.txt"))).collect()
    }

    #[test]
    fn missing_weights_default_to_one() {
        let sources = resolve_sources(&paths(3), &[4.0], WeightPolicy::PadWithOne).unwrap();
        let weights: Vec<f64> = sources.iter().map(|s| s.weight).collect();
        assert_eq!(weights, [4.0, 1.0, 1.0]);
    }

    #[test]
    fn exact_policy_rejects_count_mismatch() {
        let err = resolve_sources(&paths(2), &[1.0], WeightPolicy::Exact).unwrap_err();
        assert!(matches!(err, DictError::WeightCountMismatch { inputs: 2, weights: 1 }));
        let err = resolve_sources(&paths(1), &[1.0, 2.0], WeightPolicy::PadWithOne).unwrap_err();
        assert!(matches!(err, DictError::WeightCountMismatch { .. }));
    }

    #[test]
    fn rejects_non_positive_weights_and_empty_inputs() {
        let err = resolve_sources(&paths(2), &[1.0, 0.0], WeightPolicy::Exact).unwrap_err();
        assert!(matches!(err, DictError::InvalidWeight { index: 2, .. }));
        let err = resolve_sources(&paths(1), &[f64::NAN], WeightPolicy::Exact).unwrap_err();
        assert!(matches!(err, DictError::InvalidWeight { index: 1, .. }));
        assert!(matches!(
            resolve_sources(&[], &[], WeightPolicy::PadWithOne),
            Err(DictError::NoInputs)
        ));
    }

    #[test]
    fn userdb_merge_needs_an_output() {
        let options = UserDbMergeOptions {
            sources: vec![Source::new("a.txt", 1.0)],
            snapshot: None,
            export: None,
        };
        assert!(matches!(merge_userdb(&options), Err(DictError::NoOutput)));
    }

    #[test]
    fn export_name_falls_back_to_file_name() {
        let target = ExportTarget {
            path: PathBuf::from("out/custom_pinyin.dict.yaml"),
            name: None,
        };
        assert_eq!(target.header().name, "custom_pinyin");
        let named = ExportTarget {
            name: Some("mine".into()),
            ..target
        };
        assert_eq!(named.header().name, "mine");
    }

    #[test]
    fn trims_padded_hanzi() {
        let outcome = trimmed_entry(dict::parse_line(" 中 \tzhong\t1", 1.0));
        let LineOutcome::Parsed { record, .. } = outcome else {
            panic!("expected entry");
        };
        assert_eq!(record.phrase, "中");
    }
}
