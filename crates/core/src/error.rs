//! Error types for DOCX reading, transformation, and writing.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reformatting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not a DOCX document (wrong magic or extension).
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to parse the DOCX package structure.
    #[error("DOCX parsing error: {0}")]
    DocxParseError(String),

    /// Invalid or corrupted file.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),

    /// ZIP archive error (DOCX files are ZIP packages).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error inside a package part.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// Failed to serialize the output document.
    #[error("DOCX writing error: {0}")]
    WriteError(String),
}
