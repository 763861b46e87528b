//! Document reader — raw text extraction for uploaded resumes.
//!
//! Thin wrapper over `pdf-extract` and `docx-rs`. File type is sniffed from
//! magic bytes first, falling back to the filename extension. Extracted text
//! is normalized (see `normalize`) before being returned to the caller.

pub mod normalize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileKind {
    Pdf,
    Docx,
    Text,
}

/// Extracts and normalizes the text content of an uploaded document.
/// Unsupported file types are rejected before any parsing is attempted.
pub fn read_document(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let kind = detect_kind(filename, bytes)
        .ok_or_else(|| AppError::UnsupportedFileType(filename.to_string()))?;

    let raw = match kind {
        FileKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("failed to extract PDF text: {e}")))?,
        FileKind::Docx => read_docx_text(bytes)?,
        FileKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    Ok(normalize::normalize_extracted_text(&raw))
}

fn detect_kind(filename: &str, bytes: &[u8]) -> Option<FileKind> {
    let name = filename.to_ascii_lowercase();
    if bytes.starts_with(b"%PDF") || name.ends_with(".pdf") {
        Some(FileKind::Pdf)
    } else if bytes.starts_with(b"PK\x03\x04") || name.ends_with(".docx") {
        // .docx is a zip container; the PK header alone cannot distinguish it
        // from other OOXML formats, so the extension check stays as backup.
        Some(FileKind::Docx)
    } else if name.ends_with(".txt") {
        Some(FileKind::Text)
    } else {
        None
    }
}

/// Collects paragraph text from a .docx document by walking the
/// Paragraph → Run → Text nodes of the parsed document tree.
fn read_docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::Extraction(format!("failed to parse .docx file: {e:?}")))?;

    let tree: serde_json::Value = serde_json::from_str(&docx.json())
        .map_err(|e| AppError::Extraction(format!("failed to decode .docx document tree: {e}")))?;

    let mut paragraphs: Vec<String> = Vec::new();
    if let Some(children) = tree["document"]["children"].as_array() {
        for child in children {
            let Some(paragraph) = child["data"]["Paragraph"].as_object() else {
                continue;
            };
            let mut para_text = String::new();
            if let Some(runs) = paragraph["children"].as_array() {
                for run in runs {
                    let Some(run_data) = run["data"]["Run"].as_object() else {
                        continue;
                    };
                    if let Some(texts) = run_data["children"].as_array() {
                        for text_node in texts {
                            if let Some(text) = text_node["data"]["Text"]["text"].as_str() {
                                para_text.push_str(text);
                            }
                        }
                    }
                }
            }
            if !para_text.is_empty() {
                paragraphs.push(para_text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}
