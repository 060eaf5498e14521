//! Subprocess-backed OCR via pdftoppm and tesseract.

use crate::error::OcrError;
use formfill_domain::{PageRange, TextRecognizer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Rendering resolution for page rasterization.
const RENDER_DPI: u32 = 300;

/// OCR adapter driving `pdftoppm` and `tesseract`.
pub struct TesseractOcr {
    scratch_dir: PathBuf,
    lang: String,
    dpi: u32,
}

impl TesseractOcr {
    /// Create an adapter that renders page images under `scratch_dir`.
    ///
    /// The directory must exist; per-document work directories are created
    /// inside it and removed when the document is done.
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            lang: "eng".to_string(),
            dpi: RENDER_DPI,
        }
    }

    /// Set the tesseract language pack.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Probe for the required executables.
    ///
    /// Run once at process start; a missing executable is fatal, not retried.
    pub fn ensure_available() -> Result<(), OcrError> {
        probe_executable("pdftoppm", &["-v"])?;
        probe_executable("tesseract", &["--version"])?;
        Ok(())
    }

    fn extract_text_inner(
        &self,
        document: &Path,
        pages: Option<PageRange>,
    ) -> Result<String, OcrError> {
        let workdir = tempfile::Builder::new()
            .prefix("formfill-ocr-")
            .tempdir_in(&self.scratch_dir)?;

        let rendered = self.render_pages(document, pages, workdir.path())?;
        if rendered.is_empty() {
            warn!(document = %document.display(), "no pages rendered from document");
            return Ok(String::new());
        }
        info!(
            document = %document.display(),
            pages = rendered.len(),
            "rendered pages, running recognition"
        );

        let mut sections = Vec::new();
        for (page, image) in &rendered {
            debug!(page, "recognizing page");
            match self.recognize_page(image) {
                Ok(text) if !text.is_empty() => {
                    sections.push(format!("[--- Page {page} ---]\n{text}"));
                }
                Ok(_) => warn!(page, "no text obtained from page"),
                Err(e) => warn!(page, error = %e, "page recognition failed"),
            }
        }

        Ok(sections.join("\n"))
    }

    /// Rasterize the requested pages into `out_dir`, returning
    /// (page number, image path) pairs in page order.
    fn render_pages(
        &self,
        document: &Path,
        pages: Option<PageRange>,
        out_dir: &Path,
    ) -> Result<Vec<(u32, PathBuf)>, OcrError> {
        let prefix = out_dir.join("page");
        let mut cmd = Command::new("pdftoppm");
        cmd.arg("-png").arg("-r").arg(self.dpi.to_string());
        if let Some(range) = pages {
            cmd.arg("-f").arg(range.first.to_string());
            if let Some(last) = range.last {
                cmd.arg("-l").arg(last.to_string());
            }
        }
        cmd.arg(document).arg(&prefix);

        let output = cmd.output()?;
        if !output.status.success() {
            return Err(OcrError::Render(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let mut rendered = Vec::new();
        for entry in fs::read_dir(out_dir)? {
            let path = entry?.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if let Some(page) = parse_page_number(name) {
                rendered.push((page, path));
            }
        }
        rendered.sort_by_key(|(page, _)| *page);
        Ok(rendered)
    }

    /// Run tesseract on a single page image, capturing stdout.
    fn recognize_page(&self, image: &Path) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()?;
        if !output.status.success() {
            return Err(OcrError::Recognize(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl TextRecognizer for TesseractOcr {
    fn extract_text(&self, document: &Path, pages: Option<PageRange>) -> String {
        match self.extract_text_inner(document, pages) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    document = %document.display(),
                    error = %e,
                    "OCR failed, treating document as empty"
                );
                String::new()
            }
        }
    }
}

/// Parse the page number out of a pdftoppm output name (`page-7.png`,
/// `page-07.png`, ...).
fn parse_page_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("page-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

fn probe_executable(name: &'static str, args: &[&str]) -> Result<(), OcrError> {
    match Command::new(name).args(args).output() {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(OcrError::MissingExecutable(name)),
        Err(e) => Err(OcrError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_number_plain_and_padded() {
        assert_eq!(parse_page_number("page-1.png"), Some(1));
        assert_eq!(parse_page_number("page-07.png"), Some(7));
        assert_eq!(parse_page_number("page-12.png"), Some(12));
    }

    #[test]
    fn test_parse_page_number_rejects_foreign_files() {
        assert_eq!(parse_page_number("other-1.png"), None);
        assert_eq!(parse_page_number("page-1.ppm"), None);
        assert_eq!(parse_page_number("page-.png"), None);
    }

    #[test]
    fn test_unreadable_document_degrades_to_empty() {
        let scratch = tempfile::tempdir().unwrap();
        let ocr = TesseractOcr::new(scratch.path());
        // A path that does not exist: whatever the local toolchain state,
        // the adapter must come back with an empty string, not an error.
        let text = ocr.extract_text(Path::new("definitely-missing.pdf"), None);
        assert_eq!(text, "");
    }
}
