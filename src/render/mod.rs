//! Read-only renderings of an opened document.
//!
//! [`outline`] walks the document through its views into a serde model;
//! the renderers turn that model into JSON or plain text.
//!
//! # Example
//!
//! ```no_run
//! use odtkit::{render::*, Document};
//!
//! let doc = Document::from_path("report.odt")?;
//! let outline = outline(&doc);
//!
//! let text = to_text(&outline, &RenderOptions::default());
//! let json = to_json(&outline, JsonFormat::Pretty)?;
//! # Ok::<(), odtkit::Error>(())
//! ```

mod json;
mod options;
mod outline;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use options::RenderOptions;
pub use outline::{
    outline, Block, CellOutline, DocumentOutline, ParagraphOutline, RowOutline, RunOutline,
    StyleOutline, TableOutline,
};
pub use text::to_text;
