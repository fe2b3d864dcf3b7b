//! Cursor views over the structural elements of an ODF text document.
//!
//! Every view is a `(parent, current)` pair of node ids into a tree shared
//! with the [`Document`](crate::Document). Container views own the view of
//! their children and re-root it whenever their own position changes:
//!
//! ```text
//! Table -> TableRow -> TableCell -> Paragraph -> Run
//! Style (independent, over office:automatic-styles)
//! ```
//!
//! Navigation never fails: walking past the last sibling leaves the view
//! null, which [`has_next`](Paragraph::has_next) reports. Mutations on a null
//! view return [`Error::MissingElement`](crate::Error::MissingElement).

mod cell;
pub(crate) mod cursor;
mod paragraph;
mod row;
mod run;
mod style;
mod table;

pub use cell::TableCell;
pub use paragraph::Paragraph;
pub use row::TableRow;
pub use run::Run;
pub use style::{Style, StyleFamily};
pub use table::Table;
