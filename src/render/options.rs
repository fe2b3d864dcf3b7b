//! Plain-text rendering options.

/// Options for [`to_text`](super::to_text).
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit a line for paragraphs without text
    pub include_empty_paragraphs: bool,

    /// Separator placed between the cells of a table row
    pub cell_separator: String,

    /// Blank line after each paragraph
    pub paragraph_spacing: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_empty_paragraphs: false,
            cell_separator: "\t".to_string(),
            paragraph_spacing: false,
        }
    }
}

impl RenderOptions {
    /// Create default render options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_paragraphs(mut self, include: bool) -> Self {
        self.include_empty_paragraphs = include;
        self
    }

    pub fn with_cell_separator(mut self, separator: impl Into<String>) -> Self {
        self.cell_separator = separator.into();
        self
    }

    pub fn with_paragraph_spacing(mut self, spacing: bool) -> Self {
        self.paragraph_spacing = spacing;
        self
    }
}
