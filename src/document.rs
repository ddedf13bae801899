//! Documents picked by the user for upload.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".pdf", ".docx"];

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A file chosen for upload: raw bytes plus the name shown to the user.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    contents: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: &str, contents: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            contents,
        }
    }

    /// Read a file from disk, keeping only its file name for display.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("No file name in {}", path.display()))?;
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::new(name, contents))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn content_type(&self) -> &'static str {
        let name = self.name.to_lowercase();
        if name.ends_with(".pdf") {
            "application/pdf"
        } else if name.ends_with(".docx") {
            DOCX_CONTENT_TYPE
        } else {
            "application/octet-stream"
        }
    }
}

// Contents are elided, documents can be megabytes
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.contents.len())
            .finish()
    }
}

pub fn is_accepted(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Pick a document the way the file picker does: only accepted
/// extensions can be chosen. Views never check this again.
pub async fn pick(path: &Path) -> Result<SelectedFile> {
    let name = path.display().to_string();
    if !is_accepted(&name) {
        bail!(
            "Unsupported file type: {} (expected one of {})",
            name,
            ACCEPTED_EXTENSIONS.join(", ")
        );
    }
    SelectedFile::from_path(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn it_accepts_pdf_and_docx() {
        assert!(is_accepted("report.pdf"));
        assert!(is_accepted("Report.PDF"));
        assert!(is_accepted("notes.docx"));
        assert!(!is_accepted("notes.doc"));
        assert!(!is_accepted("archive.pdf.zip"));
        assert!(!is_accepted("pdf"));
    }

    #[test]
    fn it_derives_content_type_from_extension() {
        assert_eq!(
            SelectedFile::new("a.pdf", vec![]).content_type(),
            "application/pdf"
        );
        assert_eq!(
            SelectedFile::new("a.DOCX", vec![]).content_type(),
            DOCX_CONTENT_TYPE
        );
        assert_eq!(
            SelectedFile::new("a.txt", vec![]).content_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn debug_output_elides_contents() {
        let file = SelectedFile::new("big.pdf", vec![7; 4096]);
        let out = format!("{:?}", file);
        assert!(out.contains("big.pdf"));
        assert!(out.contains("4096"));
        assert!(!out.contains("7, 7"));
    }

    #[tokio::test]
    async fn it_picks_a_file_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("quarterly.pdf");
        fs::write(&path, b"%PDF-1.4 test")?;

        let file = pick(&path).await?;
        assert_eq!(file.name(), "quarterly.pdf");
        assert_eq!(file.contents(), b"%PDF-1.4 test");
        Ok(())
    }

    #[tokio::test]
    async fn it_refuses_unsupported_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello")?;

        let err = pick(&path).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
        Ok(())
    }

    #[tokio::test]
    async fn it_reports_missing_files() {
        let err = pick(Path::new("/nonexistent/missing.docx"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
