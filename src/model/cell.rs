//! Table cell view.

use super::cursor::{append, set_attr, Cursor};
use super::Paragraph;
use crate::error::Result;
use crate::tags;
use crate::xml::{NodeId, SharedTree};

/// Cursor over the `table:table-cell` children of a row.
///
/// Covered cells are spanned-over placeholders and are not visited.
#[derive(Clone)]
pub struct TableCell {
    cursor: Cursor,
    paragraph: Paragraph,
}

impl TableCell {
    pub fn new(tree: SharedTree) -> Self {
        Self {
            paragraph: Paragraph::new(tree.clone()),
            cursor: Cursor::new(tree, tags::TABLE_CELL),
        }
    }

    pub(crate) fn bound(tree: SharedTree, parent: NodeId, current: NodeId) -> Self {
        let mut cell = Self::new(tree);
        cell.cursor.bind(Some(parent), Some(current));
        cell.rebind_paragraph();
        cell
    }

    fn rebind_paragraph(&mut self) {
        self.paragraph.set_parent(self.cursor.current());
    }

    /// Scope the view to a row and select its first cell.
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.cursor.set_parent(parent);
        self.rebind_paragraph();
    }

    /// Point the view at `current` without searching.
    pub fn set_current(&mut self, current: Option<NodeId>) {
        self.cursor.set_current(current);
        self.rebind_paragraph();
    }

    /// Advance to the next cell sibling.
    pub fn next(&mut self) -> &mut Self {
        self.cursor.advance();
        self.rebind_paragraph();
        self
    }

    /// Whether the view points at a cell.
    pub fn has_next(&self) -> bool {
        self.cursor.is_valid()
    }

    /// Paragraphs of the current cell, starting at the first one.
    pub fn paragraphs(&mut self) -> &mut Paragraph {
        self.rebind_paragraph();
        &mut self.paragraph
    }

    /// Append an unstyled paragraph; a non-empty `text` becomes its single run.
    pub fn add_paragraph(&self, text: &str) -> Result<Paragraph> {
        self.append_paragraph(text, None)
    }

    /// Append a paragraph styled `style`.
    pub fn add_paragraph_with_style(&self, text: &str, style: &str) -> Result<Paragraph> {
        self.append_paragraph(text, Some(style))
    }

    fn append_paragraph(&self, text: &str, style: Option<&str>) -> Result<Paragraph> {
        let current = self.cursor.require_current()?;
        let created = {
            let mut tree = self.cursor.write();
            let created = append(&mut tree, current, tags::PARAGRAPH)?;
            if let Some(style) = style {
                set_attr(&mut tree, created, tags::TEXT_STYLE_NAME, style)?;
            }
            created
        };

        let paragraph = Paragraph::bound(self.cursor.tree().clone(), current, created);
        if !text.is_empty() {
            paragraph.add_run(text)?;
        }
        Ok(paragraph)
    }

    /// `table:style-name` of the current cell.
    pub fn style_name(&self) -> Option<String> {
        self.cursor.attribute(tags::TABLE_STYLE_NAME)
    }

    /// Columns covered by this cell; 1 unless it is a merged cell.
    pub fn columns_spanned(&self) -> u32 {
        self.span(tags::COLUMNS_SPANNED)
    }

    /// Rows covered by this cell; 1 unless it is a merged cell.
    pub fn rows_spanned(&self) -> u32 {
        self.span(tags::ROWS_SPANNED)
    }

    fn span(&self, attribute: &str) -> u32 {
        self.cursor
            .attribute(attribute)
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }

    /// Concatenated text of every paragraph in the cell.
    pub fn text(&self) -> String {
        match self.cursor.current() {
            Some(current) => self.cursor.read().descendant_text(current),
            None => String::new(),
        }
    }

    /// The current cell element, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    /// The container the view iterates.
    pub fn parent(&self) -> Option<NodeId> {
        self.cursor.parent()
    }
}

impl std::fmt::Debug for TableCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableCell")
            .field("parent", &self.cursor.parent())
            .field("current", &self.cursor.current())
            .finish()
    }
}
