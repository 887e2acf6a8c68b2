use std::fmt;

use super::api::{ChunkSummary, SelectedFile};
use crate::dto::strategy::StrategyDescriptor;

/// Characters of extracted text shown in the preview area.
pub const TEXT_PREVIEW_CHARS: usize = 5000;
/// Characters of chunk text shown per block before the ellipsis.
pub const CHUNK_PREVIEW_CHARS: usize = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number { min: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInput {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
    pub value: String,
}

impl ParamInput {
    /// `pattern` is free text; everything else is a non-negative number.
    pub fn new(name: &str, value: String) -> Self {
        let kind = if name == "pattern" {
            InputKind::Text
        } else {
            InputKind::Number { min: 0 }
        };
        Self {
            name: name.to_string(),
            label: param_label(name),
            kind,
            value,
        }
    }
}

fn param_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}:", first.to_uppercase(), chars.as_str()),
        None => ":".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkBlock {
    /// 1-based.
    pub index: usize,
    pub size: String,
    pub overlap: String,
    pub preview: String,
}

impl ChunkBlock {
    pub fn new(index: usize, chunk: &ChunkSummary) -> Self {
        Self {
            index,
            size: display_value(&chunk.size),
            overlap: display_value(&chunk.overlap),
            preview: truncate_with_ellipsis(&chunk.text, CHUNK_PREVIEW_CHARS),
        }
    }

    pub fn meta_line(&self) -> String {
        format!(
            "Chunk {} | Size: {} | Overlap: {}",
            self.index, self.size, self.overlap
        )
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First `max` characters of `text`.
pub fn take_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

/// First `max` characters, with `...` appended only when something was cut.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    let head = take_chars(text, max);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}

/// The form and result regions of the playground page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub file: Option<SelectedFile>,

    pub strategy_options: Vec<StrategyOption>,
    pub selected_strategy: Option<String>,
    pub strategy_explanation: String,
    pub params: Vec<ParamInput>,

    pub extracted_text_visible: bool,
    pub extracted_preview: String,

    pub chunking_visible: bool,

    pub chunks_visible: bool,
    pub chunk_blocks: Vec<ChunkBlock>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn show_strategy(&mut self, descriptor: Option<&StrategyDescriptor>) {
        self.params.clear();
        match descriptor {
            Some(d) => {
                self.strategy_explanation = format!(" - {}", d.explanation);
                self.params = d
                    .params
                    .iter()
                    .map(|(name, default)| ParamInput::new(name, default.to_string()))
                    .collect();
            }
            None => self.strategy_explanation.clear(),
        }
    }

    pub(crate) fn show_extracted(&mut self, text: &str) {
        self.extracted_preview = take_chars(text, TEXT_PREVIEW_CHARS).to_string();
        self.extracted_text_visible = true;
        self.chunking_visible = true;
        self.chunks_visible = false;
    }

    pub(crate) fn show_chunks(&mut self, chunks: &[ChunkSummary]) {
        self.chunk_blocks = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| ChunkBlock::new(i + 1, chunk))
            .collect();
        self.chunks_visible = true;
    }
}

impl fmt::Display for ParamInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_inputs() {
        let pattern = ParamInput::new("pattern", r"\n\n+".to_string());
        assert_eq!(pattern.kind, InputKind::Text);
        assert_eq!(pattern.label, "Pattern:");

        let size = ParamInput::new("size", "500".to_string());
        assert_eq!(size.kind, InputKind::Number { min: 0 });
        assert_eq!(size.label, "Size:");
    }

    #[test]
    fn test_truncation_boundary() {
        let exact = "x".repeat(CHUNK_PREVIEW_CHARS);
        assert_eq!(truncate_with_ellipsis(&exact, CHUNK_PREVIEW_CHARS), exact);

        let long = "y".repeat(CHUNK_PREVIEW_CHARS + 1);
        let preview = truncate_with_ellipsis(&long, CHUNK_PREVIEW_CHARS);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), CHUNK_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_take_chars_respects_multibyte() {
        assert_eq!(take_chars("héllo wörld", 4), "héll");
        assert_eq!(take_chars("ab", 10), "ab");
    }

    #[test]
    fn test_chunk_block_meta_line() {
        let chunk = ChunkSummary {
            text: "body".to_string(),
            size: json!(12),
            overlap: json!("3"),
        };
        let block = ChunkBlock::new(2, &chunk);
        assert_eq!(block.meta_line(), "Chunk 2 | Size: 12 | Overlap: 3");
        assert_eq!(block.preview, "body");
    }
}
