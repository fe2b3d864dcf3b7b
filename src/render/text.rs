//! Plain text renderer implementation.

use super::options::RenderOptions;
use super::outline::{Block, CellOutline, DocumentOutline, TableOutline};

/// Convert an outline to plain text.
///
/// Paragraphs become lines; table rows become one line each with cells
/// joined by [`RenderOptions::cell_separator`].
pub fn to_text(outline: &DocumentOutline, options: &RenderOptions) -> String {
    let mut output = String::new();

    for block in &outline.body {
        match block {
            Block::Paragraph(para) => {
                if !para.text.is_empty() || options.include_empty_paragraphs {
                    output.push_str(&para.text);
                    output.push('\n');
                    if options.paragraph_spacing {
                        output.push('\n');
                    }
                }
            }
            Block::Table(table) => {
                output.push_str(&render_table_text(table, &options.cell_separator));
                output.push('\n');
            }
        }
    }

    output.trim_end().to_string()
}

fn render_table_text(table: &TableOutline, separator: &str) -> String {
    let mut output = String::new();
    for row in &table.rows {
        let cells: Vec<String> = row.cells.iter().flat_map(cell_slots).collect();
        output.push_str(&cells.join(separator));
        output.push('\n');
    }
    output
}

/// A merged cell fills its spanned columns with empty slots.
fn cell_slots(cell: &CellOutline) -> Vec<String> {
    let text = cell
        .paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let mut slots = vec![text];
    slots.extend((1..cell.columns_spanned).map(|_| String::new()));
    slots
}
