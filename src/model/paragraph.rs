//! Paragraph view.

use super::cursor::{append, set_attr, Cursor};
use super::Run;
use crate::error::Result;
use crate::tags;
use crate::xml::{NodeId, SharedTree};

/// Cursor over the `text:p` children of a container (text body or table cell).
///
/// The paragraph owns a [`Run`] view that is re-rooted at the current
/// paragraph whenever the paragraph moves.
#[derive(Clone)]
pub struct Paragraph {
    cursor: Cursor,
    run: Run,
}

impl Paragraph {
    /// Create an unbound paragraph view over `tree`.
    pub fn new(tree: SharedTree) -> Self {
        Self {
            run: Run::new(tree.clone()),
            cursor: Cursor::new(tree, tags::PARAGRAPH),
        }
    }

    pub(crate) fn bound(tree: SharedTree, parent: NodeId, current: NodeId) -> Self {
        let mut paragraph = Self::new(tree);
        paragraph.cursor.bind(Some(parent), Some(current));
        paragraph.rebind_run();
        paragraph
    }

    fn rebind_run(&mut self) {
        self.run.set_parent(self.cursor.current());
    }

    /// Scope the view to `parent` and select its first paragraph.
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.cursor.set_parent(parent);
        self.rebind_run();
    }

    /// Point the view at `current` without searching.
    pub fn set_current(&mut self, current: Option<NodeId>) {
        self.cursor.set_current(current);
        self.rebind_run();
    }

    /// Advance to the next paragraph sibling.
    pub fn next(&mut self) -> &mut Self {
        self.cursor.advance();
        self.rebind_run();
        self
    }

    /// Whether the view points at a paragraph.
    pub fn has_next(&self) -> bool {
        self.cursor.is_valid()
    }

    /// The runs of the current paragraph, starting at the first one.
    pub fn runs(&mut self) -> &mut Run {
        self.rebind_run();
        &mut self.run
    }

    /// All text below the current paragraph, runs and loose text alike.
    pub fn text(&self) -> String {
        match self.cursor.current() {
            Some(current) => self.cursor.read().descendant_text(current),
            None => String::new(),
        }
    }

    pub fn style_name(&self) -> Option<String> {
        self.cursor.attribute(tags::TEXT_STYLE_NAME)
    }

    pub fn node(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.cursor.parent()
    }

    /// Append a run with the default run style.
    pub fn add_run(&self, text: &str) -> Result<Run> {
        self.add_run_with_style(text, tags::DEFAULT_RUN_STYLE)
    }

    /// Append a run styled `style` holding `text`.
    pub fn add_run_with_style(&self, text: &str, style: &str) -> Result<Run> {
        let current = self.cursor.require_current()?;
        let run = {
            let mut tree = self.cursor.write();
            let run = append(&mut tree, current, tags::SPAN)?;
            set_attr(&mut tree, run, tags::TEXT_STYLE_NAME, style)?;
            tree.set_text(run, text);
            run
        };
        Ok(Run::bound(self.cursor.tree().clone(), current, run))
    }

    /// Insert a paragraph right after the current one, with the default style.
    pub fn insert_paragraph_after(&self, text: &str) -> Result<Paragraph> {
        self.insert_paragraph_after_with_style(text, tags::DEFAULT_PARAGRAPH_STYLE)
    }

    /// Insert an unstyled paragraph right after the current one.
    ///
    /// A non-empty `text` becomes a single run styled `style`; an empty one
    /// leaves the paragraph empty. The returned view is bound to the same
    /// container as `self`.
    pub fn insert_paragraph_after_with_style(&self, text: &str, style: &str) -> Result<Paragraph> {
        let current = self.cursor.require_current()?;
        let parent = self.cursor.require_parent()?;
        let inserted = self
            .cursor
            .write()
            .insert_child_after(parent, tags::PARAGRAPH, current)
            .ok_or_else(|| {
                crate::Error::WriteFailed("paragraph is no longer in its container".into())
            })?;

        let paragraph = Paragraph::bound(self.cursor.tree().clone(), parent, inserted);
        if !text.is_empty() {
            paragraph.add_run_with_style(text, style)?;
        }
        Ok(paragraph)
    }

    /// Append an inline image frame referencing `media/<name>`.
    ///
    /// Sizes are raw ODF lengths such as `"2.5in"`. A missing height mirrors
    /// the width; with no width the default frame size is used.
    pub fn add_image(&self, name: &str, width: Option<&str>, height: Option<&str>) -> Result<()> {
        let current = self.cursor.require_current()?;
        let width = width.filter(|w| !w.is_empty());
        let height = height.filter(|h| !h.is_empty());
        let (width, height) = match width {
            Some(w) => (w, height.unwrap_or(w)),
            None => (tags::DEFAULT_FRAME_WIDTH, tags::DEFAULT_FRAME_HEIGHT),
        };

        let mut tree = self.cursor.write();
        let frame = append(&mut tree, current, tags::FRAME)?;
        set_attr(&mut tree, frame, tags::ANCHOR_TYPE, "as-char")?;
        set_attr(&mut tree, frame, tags::SVG_WIDTH, width)?;
        set_attr(&mut tree, frame, tags::SVG_HEIGHT, height)?;
        set_attr(&mut tree, frame, tags::REL_WIDTH, "scale")?;
        set_attr(&mut tree, frame, tags::REL_HEIGHT, "scale")?;

        let image = append(&mut tree, frame, tags::IMAGE)?;
        let href = format!("{}{}", tags::MEDIA_PREFIX, name);
        set_attr(&mut tree, image, tags::XLINK_HREF, &href)?;
        set_attr(&mut tree, image, tags::XLINK_TYPE, "simple")?;
        set_attr(&mut tree, image, tags::XLINK_SHOW, "embed")?;
        set_attr(&mut tree, image, tags::XLINK_ACTUATE, "onLoad")?;
        Ok(())
    }

    /// Set the style of the current paragraph, creating the attribute if needed.
    pub fn set_style(&self, name: &str) -> Result<()> {
        let current = self.cursor.require_current()?;
        set_attr(&mut self.cursor.write(), current, tags::TEXT_STYLE_NAME, name)
    }

    /// Remove the current paragraph and move on to the following one.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn delete_par(&mut self) -> bool {
        let removed = self.cursor.remove_current();
        self.rebind_run();
        removed
    }
}

impl std::fmt::Debug for Paragraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paragraph")
            .field("parent", &self.cursor.parent())
            .field("current", &self.cursor.current())
            .finish()
    }
}
