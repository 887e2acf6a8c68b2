use std::fmt::Write;

use super::page::Page;

/// Plain-text rendering of the visible parts of the page.
pub fn render(page: &Page) -> String {
    let mut out = String::new();

    match &page.file {
        Some(file) => {
            let _ = writeln!(out, "File: {} ({} bytes)", file.name, file.bytes.len());
        }
        None => out.push_str("File: (none)\n"),
    }

    if page.extracted_text_visible {
        out.push_str("\n== Extracted text ==\n");
        out.push_str(&page.extracted_preview);
        out.push('\n');
    }

    if page.chunking_visible {
        out.push_str("\n== Chunking ==\n");
        let selected = page.selected_strategy.as_deref().unwrap_or_default();
        for option in &page.strategy_options {
            let marker = if option.key == selected { '*' } else { ' ' };
            let _ = writeln!(out, " {marker} {} [{}]", option.label, option.key);
        }
        if !page.strategy_explanation.is_empty() {
            let _ = writeln!(out, "Strategy{}", page.strategy_explanation);
        }
        for input in &page.params {
            let _ = writeln!(out, "  {input}");
        }
    }

    if page.chunks_visible {
        let _ = writeln!(out, "\n== Chunks ({}) ==", page.chunk_blocks.len());
        for block in &page.chunk_blocks {
            let _ = writeln!(out, "{}", block.meta_line());
            let _ = writeln!(out, "{}\n", block.preview);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::page::{ChunkBlock, ParamInput, StrategyOption};

    #[test]
    fn test_hidden_sections_are_not_rendered() {
        let out = render(&Page::new());
        assert_eq!(out, "File: (none)\n");
    }

    #[test]
    fn test_visible_sections() {
        let page = Page {
            strategy_options: vec![StrategyOption {
                key: "fixed".to_string(),
                label: "Fixed-size (by words)".to_string(),
            }],
            selected_strategy: Some("fixed".to_string()),
            strategy_explanation: " - Splits text".to_string(),
            params: vec![ParamInput::new("size", "10".to_string())],
            extracted_text_visible: true,
            extracted_preview: "hello".to_string(),
            chunking_visible: true,
            chunks_visible: true,
            chunk_blocks: vec![ChunkBlock {
                index: 1,
                size: "1".to_string(),
                overlap: "0".to_string(),
                preview: "hello".to_string(),
            }],
            ..Page::default()
        };

        let out = render(&page);
        assert!(out.contains("== Extracted text ==\nhello\n"));
        assert!(out.contains(" * Fixed-size (by words) [fixed]"));
        assert!(out.contains("Strategy - Splits text"));
        assert!(out.contains("  Size: 10"));
        assert!(out.contains("== Chunks (1) ==\nChunk 1 | Size: 1 | Overlap: 0\nhello\n"));
    }
}
