//! Text Extraction Adapter: dispatches an uploaded document to the right
//! extractor by MIME type and returns plain text.

pub mod docx;
pub mod handlers;
pub mod pdf;

use bytes::Bytes;
use thiserror::Error;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_TEXT: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("Word document parsing failed: {0}")]
    Word(String),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Document families the adapter knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    /// Maps a MIME type (parameters such as `charset` are ignored) to a kind.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(MIME_PDF) {
            Some(Self::Pdf)
        } else if essence.eq_ignore_ascii_case(MIME_DOCX) || essence.eq_ignore_ascii_case(MIME_DOC) {
            Some(Self::Word)
        } else if essence.eq_ignore_ascii_case(MIME_TEXT) {
            Some(Self::PlainText)
        } else {
            None
        }
    }
}

/// Guesses a MIME type from a file extension, for clients that send
/// `application/octet-stream` or no content type at all.
pub fn mime_from_filename(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some(MIME_PDF),
        "docx" => Some(MIME_DOCX),
        "doc" => Some(MIME_DOC),
        "txt" => Some(MIME_TEXT),
        _ => None,
    }
}

/// Extracts plain text from `bytes` according to `mime`.
pub fn extract_text(bytes: &[u8], mime: &str) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_mime(mime)
        .ok_or_else(|| ExtractionError::UnsupportedType(mime.to_string()))?;

    let text = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Word => docx::extract(bytes)?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    Ok(normalize_text(&text))
}

/// Runs `extract_text` on the blocking pool; PDF and Word parsing are CPU-bound.
pub async fn extract_text_blocking(bytes: Bytes, mime: String) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, &mime))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}

fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(DocumentKind::from_mime(MIME_PDF), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime(MIME_DOCX), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_mime(MIME_DOC), Some(DocumentKind::Word));
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), None);
        assert_eq!(DocumentKind::from_mime(""), None);
    }

    #[test]
    fn test_mime_from_filename() {
        assert_eq!(mime_from_filename("brief.PDF"), Some(MIME_PDF));
        assert_eq!(mime_from_filename("notes.txt"), Some(MIME_TEXT));
        assert_eq!(mime_from_filename("plan.docx"), Some(MIME_DOCX));
        assert_eq!(mime_from_filename("archive.tar.gz"), None);
        assert_eq!(mime_from_filename("README"), None);
    }

    #[test]
    fn test_plain_text_is_normalized() {
        let text = extract_text(b"  Line one\r\nLine two\r\n\n", MIME_TEXT).unwrap();
        assert_eq!(text, "Line one\nLine two");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let text = extract_text(&[b'o', b'k', 0xff], MIME_TEXT).unwrap();
        assert!(text.starts_with("ok"));
    }

    #[test]
    fn test_unsupported_type() {
        let err = extract_text(b"GIF89a", "image/gif").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref m) if m == "image/gif"));
        assert_eq!(err.to_string(), "Unsupported file type: image/gif");
    }

    #[tokio::test]
    async fn test_blocking_extraction() {
        let text = extract_text_blocking(Bytes::from_static(b"hello\n"), MIME_TEXT.to_string())
            .await
            .unwrap();
        assert_eq!(text, "hello");
    }
}
