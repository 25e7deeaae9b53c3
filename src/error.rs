//! Error types for docfill.

use thiserror::Error;

/// Result type for docfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting or filling documents.
#[derive(Error, Debug)]
pub enum Error {
    /// Input does not carry the legacy `.doc` extension.
    #[error("Not a legacy .doc document: {0}")]
    NotLegacyFormat(String),

    /// Every converter in the chain was tried and none produced output.
    #[error("All conversion attempts failed for: {0}")]
    ConversionFailed(String),

    /// File is not an OOXML container.
    #[error("Not a DOCX document (no word/document.xml entry): {0}")]
    NotDocx(String),

    /// Error occurred while parsing a DOCX file.
    #[error("Failed to parse DOCX file: {0}")]
    DocxParse(String),

    /// Error occurred while writing a DOCX file.
    #[error("Failed to write DOCX file: {0}")]
    DocxWrite(String),

    /// A field alias table entry is unusable.
    #[error("Invalid field alias: {0}")]
    InvalidAlias(String),

    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
