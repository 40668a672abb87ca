//! DOCX file reader implementation.

use keypoints_core::text::clean_paragraph_text;
use keypoints_core::{Error, HeadingLevel, Result, SourceDocument, SourceFormat, StyledBlock};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};
use zip::ZipArchive;

/// Reader for DOCX (Office Open XML) files.
pub struct DocxReader;

impl DocxReader {
    /// Create a new DOCX reader.
    pub fn new() -> Self {
        Self
    }

    /// Parse a DOCX file from a reader.
    ///
    /// Every non-empty paragraph becomes a [`StyledBlock`] tagged with the
    /// heading level guessed from its paragraph style (or `Body` when the
    /// style is not Heading 2-5).
    pub fn parse<R: Read + Seek>(&self, mut reader: R, filename: &str) -> Result<SourceDocument> {
        self.check_magic(&mut reader)?;

        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let document_path = self.main_part_path(&mut archive)?;
        let style_names = self.style_names(&mut archive);
        let content = self.read_file_from_archive(&mut archive, &document_path)?;

        let mut document = SourceDocument::new(filename);
        self.extract_blocks(&content, &style_names, &mut document)?;

        log::debug!(
            "parsed {} blocks from {}",
            document.blocks.len(),
            filename
        );

        Ok(document)
    }

    /// Reject anything that is not a ZIP package up front, naming legacy
    /// `.doc` files explicitly.
    fn check_magic<R: Read + Seek>(&self, reader: &mut R) -> Result<()> {
        let mut magic = [0u8; 8];
        let mut n = 0;
        while n < magic.len() {
            let read = reader.read(&mut magic[n..])?;
            if read == 0 {
                break;
            }
            n += read;
        }
        reader.seek(SeekFrom::Start(0))?;

        match SourceFormat::from_magic(&magic[..n]) {
            Some(SourceFormat::Docx) => Ok(()),
            Some(SourceFormat::LegacyDoc) => Err(Error::UnsupportedFormat(
                "legacy .doc (OLE) files are not supported; re-save as .docx".to_string(),
            )),
            None => Err(Error::UnsupportedFormat(
                "not a DOCX file (missing ZIP signature)".to_string(),
            )),
        }
    }

    /// Resolve the main document part from the package relationships.
    fn main_part_path<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<String> {
        let rels_content = match self.read_file_from_archive(archive, "_rels/.rels") {
            Ok(content) => content,
            // Tolerate a missing rels part; the conventional path still works
            Err(_) => return Ok("word/document.xml".to_string()),
        };

        let mut reader = Reader::from_str(&rels_content);
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut rel_type = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Type" => {
                                rel_type = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            b"Target" => {
                                target = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            _ => {}
                        }
                    }

                    if rel_type.ends_with("/officeDocument") && !target.is_empty() {
                        let path = target.strip_prefix('/').unwrap_or(&target).to_string();
                        return Ok(path);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing package relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok("word/document.xml".to_string())
    }

    /// Map style ids to style names from `word/styles.xml`.
    ///
    /// Paragraphs reference styles by id (`Heading2`), while the recognized
    /// names ("Heading 2") live on the style definitions. A missing or
    /// unreadable styles part yields an empty map; level guessing then falls
    /// back to the raw style id.
    fn style_names<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> HashMap<String, String> {
        let content = match self.read_file_from_archive(archive, "word/styles.xml") {
            Ok(content) => content,
            Err(_) => {
                log::debug!("no word/styles.xml; using raw style ids");
                return HashMap::new();
            }
        };

        let mut names = HashMap::new();
        let mut reader = Reader::from_str(&content);
        let mut current_id: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"style" => {
                            current_id = attr_value(e, b"styleId");
                        }
                        b"name" => {
                            if let (Some(id), Some(name)) =
                                (current_id.as_ref(), attr_value(e, b"val"))
                            {
                                names.insert(id.clone(), name);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => {
                    if local_name(e.name().as_ref()) == b"style" {
                        current_id = None;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!("error parsing styles.xml (continuing): {}", e);
                    break;
                }
                _ => {}
            }
        }

        names
    }

    /// Extract paragraph blocks from the main document XML.
    fn extract_blocks(
        &self,
        xml_content: &str,
        style_names: &HashMap<String, String>,
        document: &mut SourceDocument,
    ) -> Result<()> {
        let mut reader = Reader::from_str(xml_content);

        let mut in_paragraph = false;
        let mut in_text = false;
        let mut para_style: Option<String> = None;
        let mut current_text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"p" => {
                        in_paragraph = true;
                        para_style = None;
                        current_text.clear();
                    }
                    b"pStyle" if in_paragraph => {
                        if let Some(value) = attr_value(e, b"val") {
                            para_style = Some(value);
                        }
                    }
                    b"t" if in_paragraph => {
                        in_text = true;
                    }
                    b"tab" if in_paragraph => current_text.push('\t'),
                    b"br" if in_paragraph => current_text.push('\n'),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                    b"pStyle" if in_paragraph => {
                        if let Some(value) = attr_value(e, b"val") {
                            para_style = Some(value);
                        }
                    }
                    b"tab" if in_paragraph => current_text.push('\t'),
                    b"br" if in_paragraph => current_text.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if in_text {
                        let text = e.unescape().unwrap_or_default();
                        current_text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"t" => in_text = false,
                    b"p" => {
                        if in_paragraph {
                            let text = clean_paragraph_text(&current_text);
                            if !text.is_empty() {
                                let level = self.guess_level(para_style.as_deref(), style_names);
                                document.add_block(StyledBlock::new(level, text));
                            }
                        }
                        in_paragraph = false;
                        in_text = false;
                        para_style = None;
                        current_text.clear();
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing document body: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Guess the heading level for a paragraph's style id.
    fn guess_level(
        &self,
        style_id: Option<&str>,
        style_names: &HashMap<String, String>,
    ) -> HeadingLevel {
        let Some(id) = style_id else {
            return HeadingLevel::Body;
        };

        let style = style_names.get(id).map(String::as_str).unwrap_or(id);
        HeadingLevel::from_style_name(style)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::CorruptedFile(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for DocxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Get an attribute value by local name, ignoring the namespace prefix.
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if local_name(attr.key.as_ref()) == key {
            Some(String::from_utf8_lossy(&attr.value).to_string())
        } else {
            None
        }
    })
}
