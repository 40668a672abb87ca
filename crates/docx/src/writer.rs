//! DOCX file writer implementation.
//!
//! Emits a minimal OPC package: content types, package relationships, the
//! main document part, a styles part carrying the Key Points style sheet,
//! and a numbering part backing the bullet styles.

use keypoints_core::{BulletIndent, Error, OutputParagraph, Result, StyleSheet};
use quick_xml::escape::escape;
use std::io::{Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writer for Key Points DOCX output.
pub struct DocxWriter {
    sheet: StyleSheet,
}

impl DocxWriter {
    /// Create a writer with the default style sheet.
    pub fn new() -> Self {
        Self {
            sheet: StyleSheet::default(),
        }
    }

    /// Serialize the paragraphs into a DOCX package.
    pub fn write<W: Write + Seek>(
        &self,
        paragraphs: &[OutputParagraph],
        writer: W,
    ) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
            ("word/document.xml", self.document_xml(paragraphs)),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
            ("word/styles.xml", self.styles_xml()),
            ("word/numbering.xml", NUMBERING_XML.to_string()),
        ];

        for (path, content) in parts {
            zip.start_file(path, options)
                .map_err(|e| Error::WriteError(format!("Failed to start '{}': {}", path, e)))?;
            zip.write_all(content.as_bytes())
                .map_err(|e| Error::WriteError(format!("Failed to write '{}': {}", path, e)))?;
        }

        zip.finish()
            .map_err(|e| Error::WriteError(format!("Failed to finalize package: {}", e)))?;

        Ok(())
    }

    /// Serialize the paragraphs into an in-memory DOCX byte buffer.
    pub fn write_to_vec(&self, paragraphs: &[OutputParagraph]) -> Result<Vec<u8>> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.write(paragraphs, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Build the main document part.
    fn document_xml(&self, paragraphs: &[OutputParagraph]) -> String {
        let mut body = String::new();

        for paragraph in paragraphs {
            match paragraph {
                OutputParagraph::Heading {
                    text,
                    bold,
                    underline,
                } => {
                    self.push_heading(&mut body, text, *bold, *underline);
                }
                OutputParagraph::Bullet { text, indent } => {
                    self.push_bullet(&mut body, text, *indent);
                }
                OutputParagraph::Spacer => {
                    self.push_spacer(&mut body);
                }
            }
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:document xmlns:w=\"{WORDML_NS}\"><w:body>{body}\
             <w:sectPr>\
             <w:pgSz w:w=\"12240\" w:h=\"15840\"/>\
             <w:pgMar w:top=\"{top}\" w:right=\"{side}\" w:bottom=\"{top}\" w:left=\"{side}\" \
             w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/>\
             </w:sectPr>\
             </w:body></w:document>",
            body = body,
            top = self.sheet.vertical_margin_twips,
            side = self.sheet.side_margin_twips,
        )
    }

    /// Paragraph spacing properties shared by every output paragraph.
    fn spacing_xml(&self) -> String {
        format!(
            "<w:spacing w:before=\"{}\" w:after=\"{}\" w:line=\"{}\" w:lineRule=\"auto\"/>",
            self.sheet.space_before, self.sheet.space_after, self.sheet.line_twentieths,
        )
    }

    /// Run properties: Arial 10, optionally bold and underlined.
    fn run_props_xml(&self, bold: bool, underline: bool) -> String {
        let font = self.sheet.font_name;
        let size = self.sheet.font_size_half_points;
        format!(
            "<w:rPr>\
             <w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\"/>\
             {bold}\
             <w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>\
             {underline}\
             </w:rPr>",
            bold = if bold { "<w:b/>" } else { "" },
            underline = if underline { "<w:u w:val=\"single\"/>" } else { "" },
        )
    }

    fn push_heading(&self, body: &mut String, text: &str, bold: bool, underline: bool) {
        body.push_str(&format!(
            "<w:p><w:pPr>{spacing}</w:pPr><w:r>{rpr}<w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>",
            spacing = self.spacing_xml(),
            rpr = self.run_props_xml(bold, underline),
            text = escape(text),
        ));
    }

    fn push_bullet(&self, body: &mut String, text: &str, indent: BulletIndent) {
        let (style_id, extra_indent) = match indent {
            BulletIndent::Indented => ("ListBullet2", String::new()),
            BulletIndent::Deep => (
                "H5Subbullet",
                format!(
                    "<w:ind w:left=\"{}\" w:hanging=\"{}\"/>",
                    self.sheet.deep_indent_twips, self.sheet.deep_hanging_twips,
                ),
            ),
        };

        body.push_str(&format!(
            "<w:p><w:pPr><w:pStyle w:val=\"{style_id}\"/>{spacing}{extra_indent}</w:pPr>\
             <w:r>{rpr}<w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>",
            spacing = self.spacing_xml(),
            rpr = self.run_props_xml(false, false),
            text = escape(text),
        ));
    }

    /// Visible blank line: a single non-breaking space.
    fn push_spacer(&self, body: &mut String) {
        body.push_str(&format!(
            "<w:p><w:pPr>{spacing}</w:pPr><w:r>{rpr}<w:t xml:space=\"preserve\">\u{00A0}</w:t></w:r></w:p>",
            spacing = self.spacing_xml(),
            rpr = self.run_props_xml(false, false),
        ));
    }

    /// Build the styles part: Normal plus the three bullet styles.
    fn styles_xml(&self) -> String {
        let font = self.sheet.font_name;
        let size = self.sheet.font_size_half_points;
        let spacing = self.spacing_xml();

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:styles xmlns:w=\"{WORDML_NS}\">\
             <w:docDefaults><w:rPrDefault><w:rPr>\
             <w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\"/>\
             <w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>\
             </w:rPr></w:rPrDefault>\
             <w:pPrDefault><w:pPr>{spacing}</w:pPr></w:pPrDefault></w:docDefaults>\
             <w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">\
             <w:name w:val=\"Normal\"/><w:qFormat/>\
             </w:style>\
             <w:style w:type=\"paragraph\" w:styleId=\"ListBullet\">\
             <w:name w:val=\"List Bullet\"/><w:basedOn w:val=\"Normal\"/><w:qFormat/>\
             <w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr>\
             <w:ind w:left=\"360\" w:hanging=\"360\"/></w:pPr>\
             </w:style>\
             <w:style w:type=\"paragraph\" w:styleId=\"ListBullet2\">\
             <w:name w:val=\"List Bullet 2\"/><w:basedOn w:val=\"Normal\"/><w:qFormat/>\
             <w:pPr><w:numPr><w:ilvl w:val=\"1\"/><w:numId w:val=\"1\"/></w:numPr>\
             <w:ind w:left=\"720\" w:hanging=\"360\"/></w:pPr>\
             </w:style>\
             <w:style w:type=\"paragraph\" w:styleId=\"H5Subbullet\">\
             <w:name w:val=\"H5Subbullet\"/><w:basedOn w:val=\"ListBullet2\"/><w:qFormat/>\
             <w:pPr><w:numPr><w:ilvl w:val=\"1\"/><w:numId w:val=\"1\"/></w:numPr>\
             <w:ind w:left=\"{deep}\" w:hanging=\"{hang}\"/></w:pPr>\
             </w:style>\
             </w:styles>",
            deep = self.sheet.deep_indent_twips,
            hang = self.sheet.deep_hanging_twips,
        )
    }
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\
<Override PartName=\"/word/numbering.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml\"/>\
</Types>";

const PACKAGE_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
</Relationships>";

const DOCUMENT_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering\" Target=\"numbering.xml\"/>\
</Relationships>";

/// One bullet list definition: solid bullet at level 0, hollow "o" at level 1.
const NUMBERING_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<w:numbering xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
<w:abstractNum w:abstractNumId=\"0\">\
<w:multiLevelType w:val=\"hybridMultilevel\"/>\
<w:lvl w:ilvl=\"0\"><w:start w:val=\"1\"/><w:numFmt w:val=\"bullet\"/>\
<w:lvlText w:val=\"\u{F0B7}\"/><w:lvlJc w:val=\"left\"/>\
<w:pPr><w:ind w:left=\"360\" w:hanging=\"360\"/></w:pPr>\
<w:rPr><w:rFonts w:ascii=\"Symbol\" w:hAnsi=\"Symbol\" w:hint=\"default\"/></w:rPr></w:lvl>\
<w:lvl w:ilvl=\"1\"><w:start w:val=\"1\"/><w:numFmt w:val=\"bullet\"/>\
<w:lvlText w:val=\"o\"/><w:lvlJc w:val=\"left\"/>\
<w:pPr><w:ind w:left=\"720\" w:hanging=\"360\"/></w:pPr>\
<w:rPr><w:rFonts w:ascii=\"Courier New\" w:hAnsi=\"Courier New\" w:hint=\"default\"/></w:rPr></w:lvl>\
</w:abstractNum>\
<w:num w:numId=\"1\"><w:abstractNumId w:val=\"0\"/></w:num>\
</w:numbering>";

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn read_part(data: &[u8], path: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(data.to_vec())).unwrap();
        let mut file = archive.by_name(path).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn sample_paragraphs() -> Vec<OutputParagraph> {
        vec![
            OutputParagraph::Heading {
                text: "OVERVIEW".to_string(),
                bold: true,
                underline: true,
            },
            OutputParagraph::Spacer,
            OutputParagraph::Bullet {
                text: "First point.".to_string(),
                indent: BulletIndent::Indented,
            },
            OutputParagraph::Spacer,
            OutputParagraph::Bullet {
                text: "Detail.".to_string(),
                indent: BulletIndent::Deep,
            },
            OutputParagraph::Spacer,
        ]
    }

    #[test]
    fn test_package_has_all_parts() {
        let writer = DocxWriter::new();
        let data = writer.write_to_vec(&sample_paragraphs()).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        for path in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
        ] {
            assert!(archive.by_name(path).is_ok(), "missing part {}", path);
        }
    }

    #[test]
    fn test_document_body_content() {
        let writer = DocxWriter::new();
        let data = writer.write_to_vec(&sample_paragraphs()).unwrap();
        let document = read_part(&data, "word/document.xml");

        assert!(document.contains("OVERVIEW"));
        assert!(document.contains("<w:b/>"));
        assert!(document.contains("<w:u w:val=\"single\"/>"));
        assert!(document.contains("<w:pStyle w:val=\"ListBullet2\"/>"));
        assert!(document.contains("<w:pStyle w:val=\"H5Subbullet\"/>"));
        assert!(document.contains("<w:ind w:left=\"1080\" w:hanging=\"360\"/>"));
        // Spacer paragraphs carry a visible non-breaking space
        assert!(document.contains("\u{00A0}"));
    }

    #[test]
    fn test_fixed_typography() {
        let writer = DocxWriter::new();
        let data = writer.write_to_vec(&sample_paragraphs()).unwrap();

        let document = read_part(&data, "word/document.xml");
        assert!(document.contains("w:ascii=\"Arial\""));
        assert!(document.contains("<w:sz w:val=\"20\"/>"));
        assert!(document.contains("w:line=\"240\""));
        // Narrow side margins, default vertical margins
        assert!(document.contains("w:right=\"720\" w:bottom=\"1440\" w:left=\"720\""));

        let styles = read_part(&data, "word/styles.xml");
        assert!(styles.contains("<w:name w:val=\"List Bullet 2\"/>"));
        assert!(styles.contains("<w:name w:val=\"H5Subbullet\"/>"));
        assert!(styles.contains("w:ascii=\"Arial\""));
    }

    #[test]
    fn test_heading_underline_follows_flag() {
        let writer = DocxWriter::new();
        let paragraphs = vec![OutputParagraph::Heading {
            text: "PLAIN".to_string(),
            bold: false,
            underline: false,
        }];
        let data = writer.write_to_vec(&paragraphs).unwrap();
        let document = read_part(&data, "word/document.xml");

        assert!(!document.contains("<w:u "));
        assert!(!document.contains("<w:b/>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let writer = DocxWriter::new();
        let paragraphs = vec![OutputParagraph::Heading {
            text: "FISH & <CHIPS>".to_string(),
            bold: true,
            underline: true,
        }];
        let data = writer.write_to_vec(&paragraphs).unwrap();
        let document = read_part(&data, "word/document.xml");

        assert!(document.contains("FISH &amp; &lt;CHIPS&gt;"));
        assert!(!document.contains("FISH & <CHIPS>"));
    }

    #[test]
    fn test_empty_input_has_no_content_paragraphs() {
        let writer = DocxWriter::new();
        let data = writer.write_to_vec(&[]).unwrap();
        let document = read_part(&data, "word/document.xml");

        assert!(!document.contains("<w:p>"));
        assert!(document.contains("<w:sectPr>"));
    }
}
