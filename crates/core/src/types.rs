//! Domain types for representing source document content.

use serde::{Deserialize, Serialize};

/// A source document reduced to its ordered paragraph blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Original filename (without path).
    pub filename: String,

    /// Paragraph blocks in source order.
    pub blocks: Vec<StyledBlock>,
}

impl SourceDocument {
    /// Create a new, empty document with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a block to the document.
    pub fn add_block(&mut self, block: StyledBlock) {
        self.blocks.push(block);
    }

    /// Blocks tagged with one of the recognized heading levels.
    pub fn heading_blocks(&self) -> impl Iterator<Item = &StyledBlock> {
        self.blocks.iter().filter(|b| b.level.is_heading())
    }
}

/// A single paragraph tagged with its heading level (or body text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyledBlock {
    /// Heading level guessed from the paragraph style.
    pub level: HeadingLevel,

    /// Cleaned paragraph text.
    pub text: String,
}

impl StyledBlock {
    /// Create a new block.
    pub fn new(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Heading level of a source paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// "Heading 2" — top-level section heading.
    H2,
    /// "Heading 3" — subsection heading.
    H3,
    /// "Heading 4" — bullet point.
    H4,
    /// "Heading 5" — indented sub-bullet.
    H5,
    /// Any paragraph not styled Heading 2-5. Dropped by the transform.
    Body,
}

impl HeadingLevel {
    /// Guess the heading level from a paragraph style name or style id.
    ///
    /// Matches "Heading 2".."Heading 5" (any case, with or without the
    /// space, so bare style ids like `Heading2` also work) and the short
    /// forms "h2".."h5". Everything else is `Body`.
    pub fn from_style_name(style: &str) -> Self {
        let style = style.trim().to_lowercase();

        if style.contains("heading 2") || style.contains("heading2") || style == "h2" {
            Self::H2
        } else if style.contains("heading 3") || style.contains("heading3") || style == "h3" {
            Self::H3
        } else if style.contains("heading 4") || style.contains("heading4") || style == "h4" {
            Self::H4
        } else if style.contains("heading 5") || style.contains("heading5") || style == "h5" {
            Self::H5
        } else {
            Self::Body
        }
    }

    /// Whether this is one of the four recognized heading levels.
    pub fn is_heading(&self) -> bool {
        !matches!(self, Self::Body)
    }
}

/// The container format of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Modern DOCX (Office Open XML, a ZIP package).
    Docx,
    /// Legacy DOC (OLE/CFB binary). Detected only to reject it by name.
    LegacyDoc,
}

impl SourceFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::LegacyDoc),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // DOCX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Docx);
        }

        // Legacy DOC is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::LegacyDoc);
        }

        None
    }
}

/// Per-level tally of transformed paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
}

impl LevelCounts {
    /// Record one paragraph at the given level. `Body` is not counted.
    pub fn record(&mut self, level: HeadingLevel) {
        match level {
            HeadingLevel::H2 => self.h2 += 1,
            HeadingLevel::H3 => self.h3 += 1,
            HeadingLevel::H4 => self.h4 += 1,
            HeadingLevel::H5 => self.h5 += 1,
            HeadingLevel::Body => {}
        }
    }

    /// Total number of recognized heading paragraphs.
    pub fn total(&self) -> usize {
        self.h2 + self.h3 + self.h4 + self.h5
    }
}
