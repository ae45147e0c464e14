// src/lib.rs

pub mod core;
pub mod errors;
pub mod logging;
pub mod persistence;
pub mod summary;
pub use crate::core::engine::{
    convert_rawdict, fix_pinyin, merge_dict, merge_userdb, resolve_sources, write_report, DictMergeOptions,
    ExportTarget, PinyinFixOptions, RawDictOptions, UserDbMergeOptions, WeightPolicy,
};
pub use crate::errors::{DictError, Result};
