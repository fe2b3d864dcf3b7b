//! Table row view and cell merging.

use super::cursor::{append, set_attr, Cursor};
use super::TableCell;
use crate::error::{Error, Result};
use crate::tags;
use crate::xml::{NodeId, SharedTree};

/// Cursor over the `table:table-row` children of a table.
#[derive(Clone)]
pub struct TableRow {
    cursor: Cursor,
    cell: TableCell,
}

impl TableRow {
    pub fn new(tree: SharedTree) -> Self {
        Self {
            cell: TableCell::new(tree.clone()),
            cursor: Cursor::new(tree, tags::TABLE_ROW),
        }
    }

    pub(crate) fn bound(tree: SharedTree, parent: NodeId, current: NodeId) -> Self {
        let mut row = Self::new(tree);
        row.cursor.bind(Some(parent), Some(current));
        row.rebind_cell();
        row
    }

    fn rebind_cell(&mut self) {
        self.cell.set_parent(self.cursor.current());
    }

    /// Scope the view to `parent` and select its first row.
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.cursor.set_parent(parent);
        self.rebind_cell();
    }

    /// Point the view at `current` without searching.
    pub fn set_current(&mut self, current: Option<NodeId>) {
        self.cursor.set_current(current);
        self.rebind_cell();
    }

    /// Advance to the next row sibling.
    pub fn next(&mut self) -> &mut Self {
        self.cursor.advance();
        self.rebind_cell();
        self
    }

    /// Whether the view points at a row.
    pub fn has_next(&self) -> bool {
        self.cursor.is_valid()
    }

    /// Cells of the current row, starting at the first one.
    pub fn cells(&mut self) -> &mut TableCell {
        self.rebind_cell();
        &mut self.cell
    }

    /// `table:style-name` of the current row.
    pub fn style_name(&self) -> Option<String> {
        self.cursor.attribute(tags::TABLE_STYLE_NAME)
    }

    /// The current row element, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    /// The container the view iterates.
    pub fn parent(&self) -> Option<NodeId> {
        self.cursor.parent()
    }

    /// Append an empty cell styled `cellstyle`.
    pub fn add_cell(&self, cellstyle: &str) -> Result<TableCell> {
        let row = self.cursor.require_current()?;
        let cell = {
            let mut tree = self.cursor.write();
            let cell = append(&mut tree, row, tags::TABLE_CELL)?;
            set_attr(&mut tree, cell, tags::TABLE_STYLE_NAME, cellstyle)?;
            cell
        };
        Ok(TableCell::bound(self.cursor.tree().clone(), row, cell))
    }

    /// Append a cell styled `cellstyle` holding one empty paragraph styled `parstyle`.
    pub fn add_cell_with_paragraph(&self, cellstyle: &str, parstyle: &str) -> Result<TableCell> {
        let cell = self.add_cell(cellstyle)?;
        if let Some(node) = cell.node() {
            let mut tree = self.cursor.write();
            let paragraph = append(&mut tree, node, tags::PARAGRAPH)?;
            set_attr(&mut tree, paragraph, tags::TEXT_STYLE_NAME, parstyle)?;
        }
        Ok(cell)
    }

    /// Append a covered-cell placeholder to the current row.
    pub fn add_covered_cell(&self) -> Result<()> {
        let row = self.cursor.require_current()?;
        append(&mut self.cursor.write(), row, tags::COVERED_CELL)?;
        Ok(())
    }

    /// Append a merged cell spanning `columns` x `rows` grid slots.
    ///
    /// The spanning cell holds one paragraph styled `parstyle` and is followed
    /// by `columns - 1` covered cells. Rows below are left to the caller, who
    /// places covered cells there as the layout requires.
    pub fn add_united_cell(
        &self,
        cellstyle: &str,
        parstyle: &str,
        columns: u32,
        rows: u32,
    ) -> Result<TableCell> {
        if columns == 0 || rows == 0 {
            return Err(Error::InvalidArgument(format!(
                "united cell must span at least one column and row, got {}x{}",
                columns, rows
            )));
        }
        self.cursor.require_current()?;

        let cell = self.add_cell_with_paragraph(cellstyle, parstyle)?;
        if let Some(node) = cell.node() {
            let mut tree = self.cursor.write();
            set_attr(&mut tree, node, tags::COLUMNS_SPANNED, &columns.to_string())?;
            if rows > 1 {
                set_attr(&mut tree, node, tags::ROWS_SPANNED, &rows.to_string())?;
            }
        }
        for _ in 1..columns {
            self.add_covered_cell()?;
        }
        Ok(cell)
    }

    /// Remove the current row and move on to the following one.
    pub fn delete_row(&mut self) -> bool {
        let removed = self.cursor.remove_current();
        self.rebind_cell();
        removed
    }
}

impl std::fmt::Debug for TableRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRow")
            .field("parent", &self.cursor.parent())
            .field("current", &self.cursor.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{share, XmlTree};

    fn table() -> (SharedTree, NodeId) {
        let tree = share(
            XmlTree::parse(
                r#"<table:table><table:table-column/><table:table-row table:style-name="R1"/><table:table-row/></table:table>"#,
            )
            .unwrap(),
        );
        let root = tree.borrow().root_element().unwrap();
        (tree, root)
    }

    fn child_names(tree: &SharedTree, node: NodeId) -> Vec<String> {
        let tree = tree.borrow();
        tree.children(node)
            .filter_map(|c| tree.name(c).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_add_cells() {
        let (tree, root) = table();
        let mut row = TableRow::new(tree.clone());
        row.set_parent(Some(root));
        assert_eq!(row.style_name().as_deref(), Some("R1"));

        let bare = row.add_cell("C1").unwrap();
        assert_eq!(bare.style_name().as_deref(), Some("C1"));
        assert!(!bare.clone().paragraphs().has_next());

        let full = row.add_cell_with_paragraph("C2", "P2").unwrap();
        assert_eq!(full.clone().paragraphs().style_name().as_deref(), Some("P2"));

        row.add_covered_cell().unwrap();
        assert_eq!(
            child_names(&tree, row.node().unwrap()),
            vec!["table:table-cell", "table:table-cell", "table:covered-table-cell"]
        );
    }

    #[test]
    fn test_united_cell_spans_three_columns() {
        let (tree, root) = table();
        let mut row = TableRow::new(tree.clone());
        row.set_parent(Some(root));

        let cell = row.add_united_cell("C1", "P1", 3, 1).unwrap();
        assert_eq!(cell.columns_spanned(), 3);
        assert_eq!(cell.rows_spanned(), 1);
        {
            let t = tree.borrow();
            assert_eq!(t.attribute(cell.node().unwrap(), "table:number-rows-spanned"), None);
        }
        assert_eq!(
            child_names(&tree, row.node().unwrap()),
            vec![
                "table:table-cell",
                "table:covered-table-cell",
                "table:covered-table-cell"
            ]
        );

        let tall = row.add_united_cell("C1", "P1", 1, 2).unwrap();
        assert_eq!(tall.rows_spanned(), 2);
        assert_eq!(child_names(&tree, row.node().unwrap()).len(), 4);
    }

    #[test]
    fn test_united_cell_rejects_zero_span() {
        let (tree, root) = table();
        let mut row = TableRow::new(tree.clone());
        row.set_parent(Some(root));

        assert!(matches!(
            row.add_united_cell("C", "P", 0, 1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            row.add_united_cell("C", "P", 2, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(child_names(&tree, row.node().unwrap()).is_empty());
    }

    #[test]
    fn test_cells_idempotent() {
        let (tree, root) = table();
        let mut row = TableRow::new(tree);
        row.set_parent(Some(root));
        row.add_cell("C").unwrap();
        let first = row.cells().node();
        assert!(first.is_some());
        assert_eq!(row.cells().node(), first);
    }

    #[test]
    fn test_delete_row() {
        let (tree, root) = table();
        let mut row = TableRow::new(tree.clone());
        row.set_parent(Some(root));

        assert!(row.delete_row());
        assert!(row.has_next());
        assert_eq!(row.style_name(), None);
        assert!(row.delete_row());
        assert!(!row.has_next());
        assert!(!row.delete_row());
        assert_eq!(child_names(&tree, root), vec!["table:table-column"]);
    }
}
