// src/core/render.rs
//! Output assembly: the Rime dictionary header and sorted line blocks.

use std::path::Path;

const DICT_SUFFIX: &str = ".dict.yaml";

/// The YAML front matter Rime expects at the top of a `*.dict.yaml` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictHeader {
    pub name: String,
    pub version: String,
    /// Emitted only when set; merged user exports pin it to `false`.
    pub use_preset_vocabulary: Option<bool>,
}

impl DictHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "0.1".to_string(),
            use_preset_vocabulary: None,
        }
    }

    pub fn with_preset_vocabulary(mut self, enabled: bool) -> Self {
        self.use_preset_vocabulary = Some(enabled);
        self
    }

    /// Derives the dictionary name from its file name: `foo.dict.yaml` → `foo`.
    pub fn name_for_path(path: &Path) -> String {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match file_name.strip_suffix(DICT_SUFFIX) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or(file_name),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        out.push_str(&format!("name: {}\n", yaml_quoted(&self.name)));
        out.push_str(&format!("version: {}\n", yaml_quoted(&self.version)));
        out.push_str("sort: by_weight\n");
        if let Some(enabled) = self.use_preset_vocabulary {
            out.push_str(&format!("use_preset_vocabulary: {}\n", enabled));
        }
        out.push_str("...\n");
        out
    }
}

/// Double-quoted YAML scalar, so names holding `: ` or `#` stay one value.
fn yaml_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Sorts lines by byte order and drops exact duplicates, so the output only
/// depends on the set of lines and never on map iteration order.
pub fn sorted_unique(mut lines: Vec<String>) -> Vec<String> {
    lines.sort_unstable();
    lines.dedup();
    lines
}

/// Joins lines into a file body, newline-terminating each, after an optional header.
pub fn render_document(header: Option<&DictHeader>, lines: &[String]) -> String {
    let mut out = header.map(DictHeader::render).unwrap_or_default();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_preset_vocabulary() {
        let header = DictHeader::new("custom_pinyin").with_preset_vocabulary(false);
        assert_eq!(
            header.render(),
            "---\nname: \"custom_pinyin\"\nversion: \"0.1\"\nsort: by_weight\nuse_preset_vocabulary: false\n...\n"
        );
    }

    #[test]
    fn header_without_preset_vocabulary() {
        assert_eq!(
            DictHeader::new("base.single").render(),
            "---\nname: \"base.single\"\nversion: \"0.1\"\nsort: by_weight\n...\n"
        );
    }

    #[test]
    fn header_name_is_quoted_and_escaped() {
        let rendered = DictHeader::new("my: dict # \"v2\"").render();
        assert!(rendered.contains("name: \"my: dict # \\\"v2\\\"\"\n"), "{rendered}");
        assert!(DictHeader::new("a\\b\nc").render().contains("name: \"a\\\\b\\nc\"\n"));
    }

    #[test]
    fn name_follows_file_name() {
        assert_eq!(DictHeader::name_for_path(Path::new("out/custom_pinyin.dict.yaml")), "custom_pinyin");
        assert_eq!(DictHeader::name_for_path(Path::new("export.txt")), "export");
        assert_eq!(DictHeader::name_for_path(Path::new("plain")), "plain");
    }

    #[test]
    fn sorted_unique_is_byte_ordered() {
        let lines = vec!["b".to_string(), "甲".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(sorted_unique(lines), vec!["a", "b", "甲"]);
    }

    #[test]
    fn document_puts_header_first() {
        let header = DictHeader::new("x");
        let doc = render_document(Some(&header), &["a\tb\t1".to_string()]);
        assert!(doc.starts_with("---\nname: \"x\"\n"));
        assert!(doc.ends_with("...\na\tb\t1\n"));
        assert_eq!(render_document(None, &[]), "");
    }
}
