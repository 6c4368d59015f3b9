use crate::error::{PdfError, Result};
use outliner_core::{Alignment, CancelToken, LineSource, OutlineResult, RawLine};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// 1-based inclusive page range; `None` processes every page.
    pub page_range: Option<(usize, usize)>,
    /// Directory holding the PDFium shared library. Falls back to `./` and
    /// then the system library.
    pub pdfium_path: Option<PathBuf>,
    pub ocr_language: String,
    /// Raster resolution for OCR.
    pub ocr_dpi: u16,
    /// A run is centered when its midpoint is this close to the page midpoint.
    pub center_tolerance: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_range: None,
            pdfium_path: None,
            ocr_language: "eng".to_string(),
            ocr_dpi: 200,
            center_tolerance: 10.0,
        }
    }
}

/// Bind PDFium from the configured directory, `./`, or the system.
pub(crate) fn bind_pdfium(options: &PdfOptions) -> Result<Pdfium> {
    let local_dir = options
        .pdfium_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("./"));

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&local_dir))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| PdfError::LibraryError(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

pub(crate) fn ensure_readable(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(PdfError::ReadError(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }
    Ok(())
}

/// Resolve a 1-based inclusive page range to 0-based page indexes.
pub(crate) fn resolve_page_range(
    page_range: Option<(usize, usize)>,
    total_pages: usize,
) -> Result<Option<(usize, usize)>> {
    if total_pages == 0 {
        return Ok(None);
    }

    let (start, end) = if let Some((s, e)) = page_range {
        if s == 0 || e == 0 {
            return Err(PdfError::InvalidPageRange(
                "Page numbers must be >= 1".to_string(),
            ));
        }
        if s > e {
            return Err(PdfError::InvalidPageRange(format!(
                "Start page {} is greater than end page {}",
                s, e
            )));
        }
        let clamped_end = e.min(total_pages);
        if s > clamped_end {
            return Err(PdfError::InvalidPageRange(format!(
                "Start page {} exceeds document length of {} pages",
                s, total_pages
            )));
        }
        (s - 1, clamped_end - 1)
    } else {
        (0, total_pages - 1)
    };

    Ok(Some((start, end)))
}

/// Styled text runs from PDFium text segments.
#[derive(Debug, Clone, Default)]
pub struct PdfiumLineSource {
    options: PdfOptions,
}

impl PdfiumLineSource {
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    fn extract(&self, path: &Path, cancel: &CancelToken) -> OutlineResult<Vec<RawLine>> {
        ensure_readable(path)?;
        let pdfium = bind_pdfium(&self.options)?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PdfError::ParseError(format!("Failed to load PDF: {}", e)))?;

        let total_pages = usize::from(document.pages().len());
        let Some((start, end)) = resolve_page_range(self.options.page_range, total_pages)? else {
            return Ok(Vec::new());
        };

        let mut lines = Vec::new();
        for page_index in start..=end {
            cancel.check()?;
            let page_index_u16 = u16::try_from(page_index).map_err(|_| {
                PdfError::ExtractionError(format!("Page index {} out of range", page_index))
            })?;
            let page = document.pages().get(page_index_u16).map_err(|e| {
                PdfError::ExtractionError(format!(
                    "Failed to load page {}: {}",
                    page_index + 1,
                    e
                ))
            })?;
            lines.extend(self.extract_page_lines(&page, page_index)?);
        }

        tracing::debug!(
            "PDFium extracted {} runs from pages {}-{} of {}",
            lines.len(),
            start + 1,
            end + 1,
            path.display()
        );
        Ok(lines)
    }

    fn extract_page_lines(&self, page: &PdfPage, page_index: usize) -> Result<Vec<RawLine>> {
        let text = page
            .text()
            .map_err(|e| PdfError::ExtractionError(format!("Failed to read page text: {}", e)))?;
        let page_mid_x = page.width().value / 2.0;
        let mut lines = Vec::new();

        for segment in text.segments().iter() {
            let raw_text = segment.text();
            let trimmed = raw_text.trim();
            if trimmed.is_empty() {
                continue;
            }

            let bounds = segment.bounds();
            let mid_x = (bounds.left().value + bounds.right().value) / 2.0;
            let alignment = if (mid_x - page_mid_x).abs() <= self.options.center_tolerance {
                Alignment::Center
            } else {
                Alignment::Left
            };
            let style = segment_style(&segment);

            lines.push(RawLine {
                text: trimmed.to_string(),
                size: style.font_size,
                bold: style.is_bold,
                font: style.font_name,
                color: style.color,
                alignment,
                page: page_index + 1,
                y_position: bounds.top().value,
            });
        }

        Ok(lines)
    }
}

impl LineSource for PdfiumLineSource {
    fn extract_lines(&self, path: &Path, cancel: &CancelToken) -> OutlineResult<Vec<RawLine>> {
        self.extract(path, cancel)
    }
}

#[derive(Debug, Default)]
struct SegmentStyle {
    font_size: f32,
    font_name: String,
    is_bold: bool,
    color: u32,
}

fn segment_style(segment: &PdfPageTextSegment<'_>) -> SegmentStyle {
    let Ok(chars) = segment.chars() else {
        return SegmentStyle::default();
    };

    let Some(first) = chars.iter().next() else {
        return SegmentStyle::default();
    };

    let font_name = first.font_name();
    let weight_is_bold = match first.font_weight() {
        Some(PdfFontWeight::Weight600)
        | Some(PdfFontWeight::Weight700Bold)
        | Some(PdfFontWeight::Weight800)
        | Some(PdfFontWeight::Weight900) => true,
        Some(PdfFontWeight::Custom(weight)) => weight >= 600,
        _ => false,
    };
    let is_bold = weight_is_bold
        || first.font_is_bold_reenforced()
        || font_name.to_lowercase().contains("bold");
    let color = first
        .fill_color()
        .map(|c| (u32::from(c.red()) << 16) | (u32::from(c.green()) << 8) | u32::from(c.blue()))
        .unwrap_or(0);

    SegmentStyle {
        font_size: first.scaled_font_size().value,
        font_name,
        is_bold,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_full_document() {
        assert_eq!(resolve_page_range(None, 5).unwrap(), Some((0, 4)));
        assert_eq!(resolve_page_range(None, 0).unwrap(), None);
    }

    #[test]
    fn test_resolve_clamps_end() {
        assert_eq!(resolve_page_range(Some((2, 10)), 4).unwrap(), Some((1, 3)));
    }

    #[test]
    fn test_resolve_rejects_bad_ranges() {
        assert!(matches!(
            resolve_page_range(Some((0, 2)), 4),
            Err(PdfError::InvalidPageRange(_))
        ));
        assert!(matches!(
            resolve_page_range(Some((3, 2)), 4),
            Err(PdfError::InvalidPageRange(_))
        ));
        assert!(matches!(
            resolve_page_range(Some((6, 8)), 4),
            Err(PdfError::InvalidPageRange(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let source = PdfiumLineSource::default();
        let err = source
            .extract_lines(Path::new("/non/existent/file.pdf"), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, outliner_core::OutlineError::Extraction(_)));
    }
}
