//! Error types for skimpdf.

use std::io;
use thiserror::Error;

/// Result type alias for skimpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error decoding PDF structure or content streams.
    ///
    /// Input error: the document itself is malformed. Batch callers should
    /// record a failure for the document and move on.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be decoded.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The model artifact's feature schema does not match the feature
    /// builder's schema.
    ///
    /// This indicates version skew between the crate and the artifact, not
    /// bad input, and is fatal for the document being processed.
    #[error("Feature schema mismatch: {0}")]
    FeatureSchema(String),

    /// The model artifact could not be loaded or is structurally invalid.
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Error serializing the extracted outline.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl Error {
    /// Whether this error indicates crate/artifact version skew rather than
    /// a bad input document.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::FeatureSchema(_))
    }
}
