// src/extract.rs
//! Text extraction from uploaded documents. Decoding happens entirely out
//! here; the analysis core only ever sees plain text. A PDF that decodes to
//! nothing yields an empty string, which the caller reports as an upload
//! problem.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "text", "md"];

pub async fn extract_content(path: &Path, filename: &str) -> Result<String> {
    let extension = crate::utils::get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("Unable to determine file type for {}", filename))?;

    match extension.as_str() {
        "pdf" => extract_pdf(path).await,
        "txt" | "text" | "md" => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display())),
        other => anyhow::bail!("Unsupported file type: {}", other),
    }
}

async fn extract_pdf(path: &Path) -> Result<String> {
    let path_buf = path.to_path_buf();
    match tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path_buf)).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {}", e);
            Ok(String::new())
        }
        Err(e) => {
            warn!("PDF extraction task aborted: {}", e);
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn plain_text_round_trips() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Skills\nPython, Rust").unwrap();
        let text = extract_content(file.path(), "resume.txt").await.unwrap();
        assert_eq!(text, "Skills\nPython, Rust");
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = extract_content(file.path(), "resume.docx").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn missing_extension_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(extract_content(file.path(), "resume").await.is_err());
    }

    #[tokio::test]
    async fn broken_pdf_yields_empty_string() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is not a pdf").unwrap();
        let text = extract_content(file.path(), "resume.pdf").await.unwrap();
        assert!(text.is_empty());
    }
}
