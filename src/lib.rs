//! # odtkit
//!
//! Read and edit OpenDocument Text (`.odt`) files in place.
//!
//! A [`Document`] loads `content.xml` from the package into a mutable tree
//! and hands out cursor views over its structure: paragraphs and their runs,
//! tables with rows and cells, and automatic styles. Views walk siblings with
//! `next()`/`has_next()` and append new elements with `add_*`. Saving writes
//! the tree back and carries every other package entry over unchanged.
//!
//! ## Quick Start
//!
//! ```no_run
//! use odtkit::{Document, StyleFamily};
//!
//! let mut doc = Document::from_path("report.odt")?;
//!
//! // Walk the body
//! let paragraphs = doc.paragraphs();
//! while paragraphs.has_next() {
//!     println!("{}", paragraphs.text());
//!     paragraphs.next();
//! }
//!
//! // Add a bold run style and a two-column table
//! doc.styles()
//!     .add_style("Bold", StyleFamily::Run, &[("fo:font-weight", "bold")])?;
//! let table = doc.add_table("Table1")?;
//! table.add_column(["Col1", "Col2"])?;
//! let row = table.add_row("Row1")?;
//! row.add_cell_with_paragraph("Cell1", "P1")?
//!     .paragraphs()
//!     .add_run_with_style("left", "Bold")?;
//! row.add_cell_with_paragraph("Cell1", "P1")?;
//!
//! doc.save()?;
//! # Ok::<(), odtkit::Error>(())
//! ```

pub mod container;
pub mod detect;
pub mod document;
pub mod error;
pub mod model;
pub mod options;
pub mod render;
pub mod tags;
pub mod xml;

// Re-exports
pub use container::{OdfContainer, RewriteStats};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use document::Document;
pub use error::{Error, Result};
pub use model::{Paragraph, Run, Style, StyleFamily, Table, TableCell, TableRow};
pub use options::{Compression, SaveOptions};

use std::path::Path;

/// Extract the plain text of an `.odt` file.
///
/// # Example
///
/// ```no_run
/// let text = odtkit::extract_text("document.odt")?;
/// println!("{}", text);
/// # Ok::<(), odtkit::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let doc = Document::from_path(path)?;
    Ok(render::to_text(
        &render::outline(&doc),
        &render::RenderOptions::default(),
    ))
}

/// Convert an `.odt` file to a JSON outline.
pub fn to_json(path: impl AsRef<Path>, format: render::JsonFormat) -> Result<String> {
    let doc = Document::from_path(path)?;
    render::to_json(&render::outline(&doc), format)
}
