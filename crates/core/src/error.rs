//! Error types for presentation phrase search.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning, searching, or writing output.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read a file or directory.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (PPTX packages are ZIP containers).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or rewriting error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// Failed to build or save the report document.
    #[error("DOCX error: {0}")]
    DocxError(String),

    /// Invalid or corrupted presentation file.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),
}
