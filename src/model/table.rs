//! Table view.

use super::cursor::{append, set_attr, Cursor};
use super::TableRow;
use crate::error::{Error, Result};
use crate::tags;
use crate::xml::{NodeId, SharedTree};

/// Cursor over the `table:table` children of the text body.
#[derive(Clone)]
pub struct Table {
    cursor: Cursor,
    row: TableRow,
}

impl Table {
    pub fn new(tree: SharedTree) -> Self {
        Self {
            row: TableRow::new(tree.clone()),
            cursor: Cursor::new(tree, tags::TABLE),
        }
    }

    pub(crate) fn bound(tree: SharedTree, parent: NodeId, current: NodeId) -> Self {
        let mut table = Self::new(tree);
        table.cursor.bind(Some(parent), Some(current));
        table.rebind_row();
        table
    }

    fn rebind_row(&mut self) {
        self.row.set_parent(self.cursor.current());
    }

    /// Scope the view to `parent` and select its first table.
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.cursor.set_parent(parent);
        self.rebind_row();
    }

    /// Point the view at `current` without searching.
    pub fn set_current(&mut self, current: Option<NodeId>) {
        self.cursor.set_current(current);
        self.rebind_row();
    }

    /// Advance to the next table sibling.
    pub fn next(&mut self) -> &mut Self {
        self.cursor.advance();
        self.rebind_row();
        self
    }

    /// Whether the view points at a table.
    pub fn has_next(&self) -> bool {
        self.cursor.is_valid()
    }

    /// Rows of the current table, starting at the first one.
    ///
    /// Only direct `table:table-row` children are visited; rows nested in
    /// header or row groups are not.
    pub fn rows(&mut self) -> &mut TableRow {
        self.rebind_row();
        &mut self.row
    }

    /// `table:style-name` of the current table.
    pub fn style_name(&self) -> Option<String> {
        self.cursor.attribute(tags::TABLE_STYLE_NAME)
    }

    /// The current table element, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    /// The container the view iterates.
    pub fn parent(&self) -> Option<NodeId> {
        self.cursor.parent()
    }

    /// Append a row styled `stylename`.
    pub fn add_row(&self, stylename: &str) -> Result<TableRow> {
        let table = self.cursor.require_current()?;
        let row = {
            let mut tree = self.cursor.write();
            let row = append(&mut tree, table, tags::TABLE_ROW)?;
            set_attr(&mut tree, row, tags::TABLE_STYLE_NAME, stylename)?;
            row
        };
        Ok(TableRow::bound(self.cursor.tree().clone(), table, row))
    }

    /// Add a `table:table-columns` group with one column per style name.
    ///
    /// Column definitions precede rows in a table, so the group goes in front
    /// of the first row-level child when the table already has rows.
    pub fn add_column<I, S>(&self, stylenames: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = self.cursor.require_current()?;
        let mut tree = self.cursor.write();

        let first_row = tree.children(table).find(|&child| {
            tree.name(child)
                .is_some_and(|name| tags::ROW_LEVEL_TAGS.contains(&name))
        });
        let columns = match first_row {
            Some(anchor) => tree
                .insert_child_before(table, tags::TABLE_COLUMNS, anchor)
                .ok_or_else(|| Error::WriteFailed("cannot insert table columns".into()))?,
            None => append(&mut tree, table, tags::TABLE_COLUMNS)?,
        };

        for style in stylenames {
            let column = append(&mut tree, columns, tags::TABLE_COLUMN)?;
            set_attr(&mut tree, column, tags::TABLE_STYLE_NAME, style.as_ref())?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("parent", &self.cursor.parent())
            .field("current", &self.cursor.current())
            .finish()
    }
}
