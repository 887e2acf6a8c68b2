use std::time::Duration;

use anyhow::{Context, Result};

/// Accept by MIME type, falling back to the extension when the browser
/// sends something generic.
pub fn is_pdf(content_type: Option<&str>, filename: Option<&str>) -> bool {
    if content_type == Some("application/pdf") {
        return true;
    }
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Extracts the text of every page. Parsing is CPU-bound, so it runs on the
/// blocking pool and is abandoned after `timeout`.
pub async fn extract_text(pdf_bytes: Vec<u8>, timeout: Duration) -> Result<String> {
    let len = pdf_bytes.len();
    tracing::info!("extract_text: starting blocking extraction ({len} bytes)");

    let handle = tokio::task::spawn_blocking(move || extract_text_sync(&pdf_bytes));

    match tokio::time::timeout(timeout, handle).await {
        Ok(join_result) => {
            let text = join_result.context("Text extraction task panicked")??;
            tracing::info!("extract_text: extraction succeeded, {} chars", text.chars().count());
            Ok(text)
        }
        Err(_) => anyhow::bail!("Text extraction timed out after {}s", timeout.as_secs()),
    }
}

fn extract_text_sync(pdf_bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(pdf_bytes).context("Failed to extract text from PDF")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Some("application/pdf"), None));
        assert!(is_pdf(Some("application/octet-stream"), Some("Report.PDF")));
        assert!(!is_pdf(Some("text/plain"), Some("notes.txt")));
        assert!(!is_pdf(None, Some("pdf")));
        assert!(!is_pdf(None, None));
    }

    #[tokio::test]
    async fn test_extract_rejects_garbage() {
        let result = extract_text(b"definitely not a pdf".to_vec(), Duration::from_secs(10)).await;
        assert!(result.is_err());
    }
}
