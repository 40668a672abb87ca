//! DOCX (Office Open XML) reader and writer backend for Key Points
//! reformatting.
//!
//! DOCX files are ZIP packages of XML parts; the reader walks
//! `word/document.xml` for styled paragraphs, the writer emits a minimal
//! package carrying the fixed Key Points style sheet.

pub mod reader;
pub mod writer;

pub use reader::DocxReader;
pub use writer::DocxWriter;

#[cfg(test)]
mod tests {
    use super::*;
    use keypoints_core::{HeadingLevel, KeyPointsFormatter, StyledBlock};
    use std::io::Cursor;

    /// Full pipeline: transform blocks, write the package, read it back.
    /// Output paragraphs use no heading styles, so re-reading the output
    /// yields body blocks only.
    #[test]
    fn test_output_contains_no_heading_styles() {
        let blocks = vec![
            StyledBlock::new(HeadingLevel::H2, "Summary"),
            StyledBlock::new(HeadingLevel::H4, "A point"),
        ];

        let (paragraphs, counts) = KeyPointsFormatter::new().transform(&blocks);
        assert_eq!(counts.total(), 2);

        let data = DocxWriter::new().write_to_vec(&paragraphs).unwrap();
        let reread = DocxReader::new()
            .parse(Cursor::new(data), "out.docx")
            .unwrap();

        assert_eq!(reread.heading_blocks().count(), 0);
        // Content survives the round trip, in order
        let texts: Vec<&str> = reread
            .blocks
            .iter()
            .map(|b| b.text.as_str())
            .filter(|t| *t != "\u{00A0}")
            .collect();
        assert_eq!(texts, vec!["SUMMARY", "A point."]);
    }
}
