//! Uploaded medical report handling.
//!
//! Reports are persisted to a local directory and, for PDFs, reduced to
//! plain text before being handed to the pipeline. No parsing beyond text
//! extraction is attempted.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::types::{AppError, Result};

/// Persist an uploaded report file under `upload_dir`.
///
/// Any path components in `name` are stripped; only the file name is kept.
pub fn save_report(upload_dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let file_name = Path::new(name)
        .file_name()
        .ok_or_else(|| AppError::Report(format!("invalid report file name: {}", name)))?;

    std::fs::create_dir_all(upload_dir)
        .map_err(|e| AppError::Report(format!("failed to create upload directory: {}", e)))?;

    let path = upload_dir.join(file_name);
    std::fs::write(&path, bytes)
        .map_err(|e| AppError::Report(format!("failed to save report: {}", e)))?;

    info!(path = %path.display(), bytes = bytes.len(), "report saved");
    Ok(path)
}

/// Extract plain text from a PDF report.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Report(format!("failed to extract PDF text: {}", e)))?;

    if text.trim().is_empty() {
        return Err(AppError::Report(
            "no text extracted from the PDF".to_string(),
        ));
    }

    Ok(text)
}

/// Read a report file from disk, extracting text when it is a PDF.
///
/// Non-PDF files are read as UTF-8 text.
pub fn load_report_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Report(format!("failed to read {}: {}", path.display(), e)))?;

    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
        || bytes.starts_with(b"%PDF");

    if is_pdf {
        extract_pdf_text(&bytes)
    } else {
        String::from_utf8(bytes)
            .map_err(|e| AppError::Report(format!("report is not valid UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_report_writes_file() {
        let dir = tempdir().unwrap();
        let path = save_report(dir.path(), "labs.txt", b"Hemoglobin: 14.2").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"Hemoglobin: 14.2");
    }

    #[test]
    fn test_save_report_strips_path_components() {
        let dir = tempdir().unwrap();
        let path = save_report(dir.path(), "../../etc/labs.txt", b"x").unwrap();
        assert_eq!(path, dir.path().join("labs.txt"));
    }

    #[test]
    fn test_save_report_rejects_empty_name() {
        let dir = tempdir().unwrap();
        assert!(save_report(dir.path(), "..", b"x").is_err());
    }

    #[test]
    fn test_extract_rejects_garbage_pdf() {
        assert!(extract_pdf_text(b"not a pdf at all").is_err());
    }

    #[test]
    fn test_load_report_text_reads_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "patient notes").unwrap();
        assert_eq!(load_report_text(&path).unwrap(), "patient notes");
    }

    #[test]
    fn test_load_report_text_missing_file() {
        let err = load_report_text(Path::new("/nonexistent/report.pdf")).unwrap_err();
        assert!(matches!(err, AppError::Report(_)));
    }
}
