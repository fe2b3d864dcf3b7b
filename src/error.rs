//! Error types for the odtkit library.

use std::io;
use thiserror::Error;

/// Result type alias for odtkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, editing or saving a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive could not be opened (or created, for the temp archive).
    #[error("Failed to open archive: {0}")]
    OpenArchive(String),

    /// An entry of the archive could not be read.
    #[error("Failed to read archive entry: {0}")]
    ReadEntry(String),

    /// An entry could not be written into the new archive.
    #[error("Failed to write archive entry: {0}")]
    WriteEntry(String),

    /// The finished archive could not be moved into place.
    #[error("Failed to rename archive: {0}")]
    Rename(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A mutation needed an element the cursor does not point at.
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// The tree refused a write (wrong node kind, detached node).
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// An argument would produce schema-violating output.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `save` was called on a document that was never opened.
    #[error("Document has not been opened")]
    NotOpened,

    /// The package is not an OpenDocument file.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error during JSON/text serialization of an outline.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
