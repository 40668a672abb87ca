//! WASM-compatible wrapper for Key Points DOCX reformatting.
//!
//! This crate exposes the transformation to JavaScript for the browser
//! upload/download page: the page hands over the uploaded file's bytes and
//! gets back the reformatted document plus the per-level counts.

use keypoints_core::text::output_filename;
use keypoints_core::{KeyPointsFormatter, LevelCounts, StyledBlock};
use keypoints_docx::{DocxReader, DocxWriter};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of inspecting an uploaded document without transforming it.
#[derive(Debug, Serialize, Deserialize)]
pub struct InspectionResult {
    /// Proposed output filename.
    pub output_filename: String,
    /// Total number of non-empty paragraphs in the source.
    pub paragraph_count: usize,
    /// Recognized heading paragraphs per level.
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    /// Total recognized heading paragraphs. Zero means nothing to transform.
    pub total: usize,
    /// The recognized heading blocks, in source order, for preview.
    pub headings: Vec<StyledBlock>,
}

/// The transformed document, ready for download.
#[derive(Debug)]
#[wasm_bindgen]
pub struct TransformOutput {
    filename: String,
    data: Vec<u8>,
    counts: LevelCounts,
}

#[wasm_bindgen]
impl TransformOutput {
    /// Output filename for the download link.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// The reformatted DOCX bytes.
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.data[..])
    }

    #[wasm_bindgen(getter)]
    pub fn h2(&self) -> usize {
        self.counts.h2
    }

    #[wasm_bindgen(getter)]
    pub fn h3(&self) -> usize {
        self.counts.h3
    }

    #[wasm_bindgen(getter)]
    pub fn h4(&self) -> usize {
        self.counts.h4
    }

    #[wasm_bindgen(getter)]
    pub fn h5(&self) -> usize {
        self.counts.h5
    }

    /// Total transformed paragraphs. Zero means no Heading 2-5 content was
    /// found and the output has no content paragraphs.
    #[wasm_bindgen(getter)]
    pub fn total(&self) -> usize {
        self.counts.total()
    }
}

/// Inspect an uploaded Word document.
///
/// # Arguments
/// * `data` - The raw bytes of the .docx file
/// * `filename` - The original filename (used for output naming)
///
/// # Returns
/// A JavaScript object with the inspection result, or throws on error.
#[wasm_bindgen]
pub fn inspect_document(data: &[u8], filename: &str) -> Result<JsValue, JsValue> {
    let result = inspect_document_impl(data, filename).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn inspect_document_impl(data: &[u8], filename: &str) -> Result<InspectionResult, String> {
    let document = parse_document(data, filename)?;

    let mut counts = LevelCounts::default();
    let headings: Vec<StyledBlock> = document.heading_blocks().cloned().collect();
    for block in &headings {
        counts.record(block.level);
    }

    Ok(InspectionResult {
        output_filename: output_filename(filename),
        paragraph_count: document.blocks.len(),
        h2: counts.h2,
        h3: counts.h3,
        h4: counts.h4,
        h5: counts.h5,
        total: counts.total(),
        headings,
    })
}

/// Transform an uploaded Word document into Key Points output.
///
/// # Arguments
/// * `data` - The raw bytes of the .docx file
/// * `filename` - The original filename (used for output naming)
/// * `ensure_h4_period` - Whether Heading 4 bullets get a terminal period
///
/// # Returns
/// The reformatted document plus counts, or throws on error.
#[wasm_bindgen]
pub fn transform_document(
    data: &[u8],
    filename: &str,
    ensure_h4_period: bool,
) -> Result<TransformOutput, JsValue> {
    transform_document_impl(data, filename, ensure_h4_period).map_err(|e| JsValue::from_str(&e))
}

fn transform_document_impl(
    data: &[u8],
    filename: &str,
    ensure_h4_period: bool,
) -> Result<TransformOutput, String> {
    let document = parse_document(data, filename)?;

    let formatter = KeyPointsFormatter::new().with_h4_period(ensure_h4_period);
    let (paragraphs, counts) = formatter.transform(&document.blocks);

    let bytes = DocxWriter::new()
        .write_to_vec(&paragraphs)
        .map_err(|e| format!("DOCX writing error: {}", e))?;

    Ok(TransformOutput {
        filename: output_filename(filename),
        data: bytes,
        counts,
    })
}

fn parse_document(
    data: &[u8],
    filename: &str,
) -> Result<keypoints_core::SourceDocument, String> {
    // Need at least 8 bytes for magic detection
    if data.len() < 8 {
        return Err("File too small to be a valid document".to_string());
    }

    DocxReader::new()
        .parse(Cursor::new(data), filename)
        .map_err(|e| format!("Error processing document: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keypoints_core::HeadingLevel;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn sample_docx() -> Vec<u8> {
        let blocks = vec![
            StyledBlock::new(HeadingLevel::H2, "SUMMARY"),
            StyledBlock::new(HeadingLevel::H4, "A point"),
        ];
        let (paragraphs, _) = KeyPointsFormatter::new().transform(&blocks);
        DocxWriter::new().write_to_vec(&paragraphs).unwrap()
    }

    /// Build a DOCX whose paragraphs still carry Heading 2-5 styles.
    fn heading_docx() -> Vec<u8> {
        let document = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>\
             <w:p><w:pPr><w:pStyle w:val=\"Heading2\"/></w:pPr><w:r><w:t>Section</w:t></w:r></w:p>\
             <w:p><w:r><w:t>body text</w:t></w:r></w:p>\
             <w:p><w:pPr><w:pStyle w:val=\"Heading4\"/></w:pPr><w:r><w:t>Point</w:t></w:r></w:p>\
             </w:body></w:document>";

        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", FileOptions::default())
            .unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_transform_impl_produces_docx() {
        let data = sample_docx();

        let output = transform_document_impl(&data, "notes.docx", true).unwrap();

        assert_eq!(output.filename, "notes_OUTPUT.docx");
        // Output is itself a ZIP package
        assert!(output.data.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
        // The sample has no Heading 2-5 styles left, so nothing transforms
        assert_eq!(output.counts.total(), 0);
    }

    #[test]
    fn test_inspect_impl_counts() {
        let data = sample_docx();

        let result = inspect_document_impl(&data, "Weekly INPUT.docx").unwrap();

        assert_eq!(result.output_filename, "Weekly OUTPUT.docx");
        assert_eq!(result.total, 0);
        assert!(result.headings.is_empty());
        assert!(result.paragraph_count > 0);
    }

    #[test]
    fn test_inspect_impl_previews_recognized_blocks() {
        let data = heading_docx();

        let result = inspect_document_impl(&data, "notes.docx").unwrap();

        assert_eq!(result.h2, 1);
        assert_eq!(result.h4, 1);
        assert_eq!(result.total, 2);
        // Body paragraphs are counted but not previewed
        assert_eq!(result.paragraph_count, 3);
        assert_eq!(result.headings.len(), 2);
        assert_eq!(result.headings[0].level, HeadingLevel::H2);
        assert_eq!(result.headings[0].text, "Section");
        assert_eq!(result.headings[1].level, HeadingLevel::H4);
        assert_eq!(result.headings[1].text, "Point");
    }

    #[test]
    fn test_transform_impl_counts_heading_content() {
        let data = heading_docx();

        let output = transform_document_impl(&data, "notes.docx", true).unwrap();

        assert_eq!(output.counts.h2, 1);
        assert_eq!(output.counts.h4, 1);
        assert!(output.data.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }

    #[test]
    fn test_rejects_tiny_input() {
        let err = transform_document_impl(b"PK", "x.docx", true).unwrap_err();
        assert!(err.contains("too small"));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = transform_document_impl(b"definitely not a docx", "x.docx", true).unwrap_err();
        assert!(err.contains("Error processing document"));
    }
}
