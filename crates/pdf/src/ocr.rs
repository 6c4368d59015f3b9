use crate::error::{PdfError, Result};
use crate::extractor::{bind_pdfium, ensure_readable, resolve_page_range, PdfOptions};
use image::DynamicImage;
use outliner_core::{CancelToken, OcrSource, OutlineResult};
use pdfium_render::prelude::*;
use std::path::Path;

/// Rasterizes pages with PDFium and reads them with Tesseract.
///
/// Without the `ocr` feature the engine reports itself unavailable and the
/// outline pipeline skips the fallback.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    options: PdfOptions,
}

impl Default for OcrEngine {
    fn default() -> Self {
        Self::new(PdfOptions::default())
    }
}

impl OcrEngine {
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    pub fn language(&self) -> &str {
        &self.options.ocr_language
    }

    /// Recognized text for every page; pages outside the configured range
    /// come back empty so indexes stay aligned with page numbers.
    fn recognize_document(&self, path: &Path, cancel: &CancelToken) -> OutlineResult<Vec<String>> {
        ensure_readable(path)?;
        let pdfium = bind_pdfium(&self.options).map_err(|e| PdfError::OcrSetupError(e.to_string()))?;
        let document = pdfium.load_pdf_from_file(path, None).map_err(|e| {
            PdfError::OcrProcessingError(format!("Failed to load PDF for OCR: {}", e))
        })?;

        let total_pages = usize::from(document.pages().len());
        let mut texts = vec![String::new(); total_pages];
        let Some((start, end)) = resolve_page_range(self.options.page_range, total_pages)? else {
            return Ok(texts);
        };

        tracing::info!(
            "Attempting OCR extraction for {} pages of {}",
            end - start + 1,
            path.display()
        );

        for page_index in start..=end {
            cancel.check()?;
            let image = self.render_page(&document, page_index)?;
            match self.extract_text_from_pdf_page(image) {
                Ok(text) => texts[page_index] = text,
                Err(e @ PdfError::OcrSetupError(_)) => return Err(e.into()),
                Err(e) => tracing::warn!("OCR failed on page {}: {}", page_index + 1, e),
            }
        }

        Ok(texts)
    }

    fn render_page(&self, document: &PdfDocument, page_index: usize) -> Result<DynamicImage> {
        let page_index_u16 = u16::try_from(page_index).map_err(|_| {
            PdfError::OcrProcessingError(format!("Page index {} out of range", page_index))
        })?;
        let page = document.pages().get(page_index_u16).map_err(|e| {
            PdfError::OcrProcessingError(format!("Failed to get page {}: {}", page_index + 1, e))
        })?;

        let scale = f32::from(self.options.ocr_dpi) / 72.0;
        let render_config = PdfRenderConfig::new()
            .set_target_width((page.width().value * scale) as i32)
            .set_maximum_height((page.height().value * scale) as i32);

        let image = page
            .render_with_config(&render_config)
            .map_err(|e| {
                PdfError::OcrProcessingError(format!(
                    "Failed to render page {}: {}",
                    page_index + 1,
                    e
                ))
            })?
            .as_image();

        Ok(image)
    }

    /// Run text recognition over one rendered page.
    #[cfg(feature = "ocr")]
    pub fn extract_text_from_pdf_page(&self, image: DynamicImage) -> Result<String> {
        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| PdfError::OcrProcessingError(format!("Failed to encode page: {}", e)))?;

        let mut tesseract = tesseract::Tesseract::new(None, Some(self.language()))
            .map_err(|e| PdfError::OcrSetupError(e.to_string()))?
            .set_image_from_mem(&png)
            .map_err(|e| PdfError::OcrProcessingError(e.to_string()))?;

        tesseract
            .get_text()
            .map_err(|e| PdfError::OcrProcessingError(e.to_string()))
    }

    /// Run text recognition over one rendered page.
    #[cfg(not(feature = "ocr"))]
    pub fn extract_text_from_pdf_page(&self, _image: DynamicImage) -> Result<String> {
        Err(PdfError::OcrSetupError(
            "built without the `ocr` feature".to_string(),
        ))
    }
}

impl OcrSource for OcrEngine {
    fn is_available(&self) -> bool {
        cfg!(feature = "ocr")
    }

    fn recognize_pages(&self, path: &Path, cancel: &CancelToken) -> OutlineResult<Vec<String>> {
        self.recognize_document(path, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language() {
        assert_eq!(OcrEngine::default().language(), "eng");
    }

    #[cfg(not(feature = "ocr"))]
    #[test]
    fn test_unavailable_without_feature() {
        let engine = OcrEngine::default();
        assert!(!engine.is_available());
        let image = DynamicImage::new_rgb8(1, 1);
        assert!(matches!(
            engine.extract_text_from_pdf_page(image),
            Err(PdfError::OcrSetupError(_))
        ));
    }
}
