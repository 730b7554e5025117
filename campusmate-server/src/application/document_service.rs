use lopdf::Document;
use tracing::{debug, warn};

use crate::domain::error::DomainError;

pub const EMPTY_DOCUMENT_PLACEHOLDER: &str = "No readable content found in the document.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    PlainText,
    Pdf,
    Office,
    Unknown,
}

fn extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

fn kind_of(ext: &str) -> DocumentKind {
    match ext {
        "txt" | "md" => DocumentKind::PlainText,
        "pdf" => DocumentKind::Pdf,
        "doc" | "docx" | "xlsx" => DocumentKind::Office,
        _ => DocumentKind::Unknown,
    }
}

/// Pulls plain text out of an uploaded file so it can be used as model
/// context. Blank results are replaced by [`EMPTY_DOCUMENT_PLACEHOLDER`].
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, DomainError> {
    let ext = extension(filename);
    let text = match kind_of(&ext) {
        DocumentKind::PlainText | DocumentKind::Unknown => decode_utf8(bytes),
        DocumentKind::Pdf => extract_pdf_text(bytes)?,
        DocumentKind::Office => {
            return Err(DomainError::Validation(format!(
                "File type .{} is not fully supported. Please use .txt, .md, or .pdf for best results.",
                ext
            )));
        }
    };

    let cleaned = text.trim();
    debug!(filename, chars = cleaned.chars().count(), "document text extracted");
    if cleaned.is_empty() {
        Ok(EMPTY_DOCUMENT_PLACEHOLDER.to_string())
    } else {
        Ok(cleaned.to_string())
    }
}

/// Keeps the valid UTF-8 runs and drops every invalid byte.
fn decode_utf8(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, DomainError> {
    let doc = Document::load_mem(bytes).map_err(|e| {
        warn!("failed to parse pdf: {}", e);
        DomainError::DocumentProcessing(e.to_string())
    })?;

    // pages without extractable text contribute an empty line
    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|page| {
            let text = doc.extract_text(&[*page]).unwrap_or_default();
            text.trim_end().to_string()
        })
        .collect();

    Ok(pages.join("\n"))
}
