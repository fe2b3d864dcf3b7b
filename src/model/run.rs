//! Run view: inline text spans inside a paragraph.

use super::cursor::Cursor;
use crate::tags;
use crate::xml::{NodeId, SharedTree};

/// Cursor over the `text:span` children of a paragraph.
#[derive(Clone)]
pub struct Run {
    cursor: Cursor,
}

impl Run {
    /// Create an unbound run view over `tree`.
    pub fn new(tree: SharedTree) -> Self {
        Self {
            cursor: Cursor::new(tree, tags::SPAN),
        }
    }

    pub(crate) fn bound(tree: SharedTree, parent: NodeId, current: NodeId) -> Self {
        let mut run = Self::new(tree);
        run.cursor.bind(Some(parent), Some(current));
        run
    }

    /// Scope the view to `parent` and select its first run.
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.cursor.set_parent(parent);
    }

    /// Point the view at `current` without searching.
    pub fn set_current(&mut self, current: Option<NodeId>) {
        self.cursor.set_current(current);
    }

    /// Text of the current run, or `""` when there is none.
    pub fn text(&self) -> String {
        match self.cursor.current() {
            Some(current) => self.cursor.read().text(current).to_string(),
            None => String::new(),
        }
    }

    /// Replace the text of the current run. Returns `false` if nothing was written.
    pub fn set_text(&self, text: &str) -> bool {
        match self.cursor.current() {
            Some(current) => self.cursor.write().set_text(current, text),
            None => false,
        }
    }

    /// Style name of the current run.
    pub fn style_name(&self) -> Option<String> {
        self.cursor.attribute(tags::TEXT_STYLE_NAME)
    }

    /// Advance to the next run of the paragraph.
    pub fn next(&mut self) -> &mut Self {
        self.cursor.advance();
        self
    }

    /// Whether the view points at a run.
    pub fn has_next(&self) -> bool {
        self.cursor.is_valid()
    }

    pub fn node(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.cursor.parent()
    }
}

impl std::fmt::Debug for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Run")
            .field("parent", &self.cursor.parent())
            .field("current", &self.cursor.current())
            .finish()
    }
}
