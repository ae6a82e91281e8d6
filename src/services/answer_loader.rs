// Answer Loader
// Extracts answer text from uploaded files (plain text, DOCX, PDF)

use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("DOCX parse failed: {0}")]
    Docx(String),
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnswerFormat {
    PlainText,
    Docx,
    Pdf,
}

impl AnswerFormat {
    pub fn from_file_name(file_name: &str) -> Result<Self, LoadError> {
        let ext = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "md" | "text" => Ok(Self::PlainText),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(LoadError::UnsupportedType(file_name.to_string())),
        }
    }
}

/// Extract answer text from file bytes, choosing the decoder by extension.
pub fn load_answer_text(file_name: &str, bytes: &[u8]) -> Result<String, LoadError> {
    let format = AnswerFormat::from_file_name(file_name)?;
    let text = match format {
        AnswerFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        AnswerFormat::Docx => extract_docx_text(bytes)?,
        AnswerFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| LoadError::Pdf(e.to_string()))?
        }
    };

    info!(
        file = file_name,
        format = ?format,
        bytes = bytes.len(),
        chars = text.chars().count(),
        "answer.loaded"
    );
    Ok(text)
}

/// One output line per DOCX paragraph.
fn extract_docx_text(bytes: &[u8]) -> Result<String, LoadError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes).map_err(|e| LoadError::Docx(e.to_string()))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        let DocumentChild::Paragraph(paragraph) = child else {
            continue;
        };
        let mut line = String::new();
        for p_child in &paragraph.children {
            let ParagraphChild::Run(run) = p_child else {
                continue;
            };
            for r_child in &run.children {
                match r_child {
                    RunChild::Text(t) => line.push_str(&t.text),
                    RunChild::Tab(_) => line.push('\t'),
                    _ => {}
                }
            }
        }
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(AnswerFormat::from_file_name("essay.TXT").unwrap(), AnswerFormat::PlainText);
        assert_eq!(AnswerFormat::from_file_name("dir/essay.docx").unwrap(), AnswerFormat::Docx);
        assert_eq!(AnswerFormat::from_file_name("scan.pdf").unwrap(), AnswerFormat::Pdf);
        assert!(matches!(
            AnswerFormat::from_file_name("essay.odt"),
            Err(LoadError::UnsupportedType(_))
        ));
        assert!(AnswerFormat::from_file_name("no_extension").is_err());
    }

    #[test]
    fn test_plain_text_is_lossy_utf8() {
        let text = load_answer_text("a.txt", b"Hello \xF0 world").unwrap();
        assert!(text.starts_with("Hello "));
        assert!(text.ends_with(" world"));
    }

    #[test]
    fn test_garbage_docx_is_error() {
        assert!(matches!(
            load_answer_text("a.docx", b"not a zip archive"),
            Err(LoadError::Docx(_))
        ));
    }
}
