//! Serializable snapshot of a document's structure.

use crate::model::{Paragraph, Run, Style, Table, TableCell, TableRow};
use crate::tags;
use crate::xml::NodeId;
use crate::Document;
use serde::{Deserialize, Serialize};

/// Structure of an opened document: body blocks in order plus automatic styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Paragraphs and tables of the text body, in document order
    pub body: Vec<Block>,
    /// Automatic style definitions
    pub styles: Vec<StyleOutline>,
}

/// Top-level element of the text body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(ParagraphOutline),
    Table(TableOutline),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphOutline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub runs: Vec<RunOutline>,
    /// All text of the paragraph, including text outside runs
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOutline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOutline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub rows: Vec<RowOutline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowOutline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub cells: Vec<CellOutline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellOutline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub columns_spanned: u32,
    pub rows_spanned: u32,
    pub paragraphs: Vec<ParagraphOutline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOutline {
    pub name: Option<String>,
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl DocumentOutline {
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphOutline> {
        self.body.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableOutline> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}

impl TableOutline {
    /// Cell count of each row.
    pub fn shape(&self) -> Vec<usize> {
        self.rows.iter().map(|row| row.cells.len()).collect()
    }
}

/// Capture the structure of `doc` by walking its views.
///
/// A document without a text body yields an empty body.
pub fn outline(doc: &Document) -> DocumentOutline {
    let tree = doc.tree();
    let mut result = DocumentOutline::default();

    if let Some(body) = doc.body() {
        let blocks: Vec<(NodeId, bool)> = {
            let t = tree.borrow();
            t.children(body)
                .filter_map(|child| match t.name(child) {
                    Some(tags::PARAGRAPH) => Some((child, false)),
                    Some(tags::TABLE) => Some((child, true)),
                    _ => None,
                })
                .collect()
        };

        for (node, is_table) in blocks {
            let block = if is_table {
                Block::Table(table_outline(&mut Table::bound(tree.clone(), body, node)))
            } else {
                Block::Paragraph(paragraph_outline(&mut Paragraph::bound(
                    tree.clone(),
                    body,
                    node,
                )))
            };
            result.body.push(block);
        }
    }

    let mut style = Style::new(tree.clone());
    style.set_parent(doc.automatic_styles());
    while style.has_next() {
        result.styles.push(StyleOutline {
            name: style.name(),
            family: style.family().map(|f| f.family_name().to_string()),
            parent: style.parent_style_name(),
        });
        style.next();
    }

    result
}

fn paragraph_outline(paragraph: &mut Paragraph) -> ParagraphOutline {
    let text = paragraph.text();
    let style = paragraph.style_name();
    ParagraphOutline {
        style,
        runs: run_outlines(paragraph.runs()),
        text,
    }
}

fn run_outlines(run: &mut Run) -> Vec<RunOutline> {
    let mut runs = Vec::new();
    while run.has_next() {
        runs.push(RunOutline {
            style: run.style_name(),
            text: run.text(),
        });
        run.next();
    }
    runs
}

fn table_outline(table: &mut Table) -> TableOutline {
    let style = table.style_name();
    let row = table.rows();
    let mut rows = Vec::new();
    while row.has_next() {
        rows.push(row_outline(row));
        row.next();
    }
    TableOutline { style, rows }
}

fn row_outline(row: &mut TableRow) -> RowOutline {
    let style = row.style_name();
    let cell = row.cells();
    let mut cells = Vec::new();
    while cell.has_next() {
        cells.push(cell_outline(cell));
        cell.next();
    }
    RowOutline { style, cells }
}

fn cell_outline(cell: &mut TableCell) -> CellOutline {
    let style = cell.style_name();
    let columns_spanned = cell.columns_spanned();
    let rows_spanned = cell.rows_spanned();
    let paragraph = cell.paragraphs();
    let mut paragraphs = Vec::new();
    while paragraph.has_next() {
        paragraphs.push(paragraph_outline(paragraph));
        paragraph.next();
    }
    CellOutline {
        style,
        columns_spanned,
        rows_spanned,
        paragraphs,
    }
}
