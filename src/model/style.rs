//! Automatic style definitions.

use super::cursor::{append, set_attr, Cursor};
use crate::error::{Error, Result};
use crate::tags;
use crate::xml::{NodeId, SharedTree};
use std::str::FromStr;

/// Category of an automatic style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamily {
    Table,
    Column,
    Row,
    Cell,
    Paragraph,
    /// Character style for text runs (`style:family="text"`).
    Run,
}

impl StyleFamily {
    /// Value written to `style:family`.
    pub fn family_name(&self) -> &'static str {
        match self {
            StyleFamily::Table => "table",
            StyleFamily::Column => "table-column",
            StyleFamily::Row => "table-row",
            StyleFamily::Cell => "table-cell",
            StyleFamily::Paragraph => "paragraph",
            StyleFamily::Run => "text",
        }
    }

    /// Nested element carrying the formatting attributes.
    pub fn properties_tag(&self) -> &'static str {
        match self {
            StyleFamily::Table => "style:table-properties",
            StyleFamily::Column => "style:table-column-properties",
            StyleFamily::Row => "style:table-row-properties",
            StyleFamily::Cell => "style:table-cell-properties",
            StyleFamily::Paragraph => "style:paragraph-properties",
            StyleFamily::Run => "style:text-properties",
        }
    }

    /// Fixed parent style; only paragraph and run styles inherit one.
    pub fn parent_style(&self) -> Option<&'static str> {
        match self {
            StyleFamily::Paragraph => Some(tags::PARAGRAPH_PARENT_STYLE),
            StyleFamily::Run => Some(tags::RUN_PARENT_STYLE),
            _ => None,
        }
    }

    /// Look a family up by its `style:family` value.
    pub fn from_family_name(name: &str) -> Option<Self> {
        [
            StyleFamily::Table,
            StyleFamily::Column,
            StyleFamily::Row,
            StyleFamily::Cell,
            StyleFamily::Paragraph,
            StyleFamily::Run,
        ]
        .into_iter()
        .find(|family| family.family_name() == name)
    }
}

impl FromStr for StyleFamily {
    type Err = Error;

    /// Accepts both the short category names (`run`, `cell`, ...) and the
    /// `style:family` values (`text`, `table-cell`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "table" => Ok(StyleFamily::Table),
            "column" => Ok(StyleFamily::Column),
            "row" => Ok(StyleFamily::Row),
            "cell" => Ok(StyleFamily::Cell),
            "paragraph" | "par" => Ok(StyleFamily::Paragraph),
            "run" => Ok(StyleFamily::Run),
            other => StyleFamily::from_family_name(other)
                .ok_or_else(|| Error::InvalidArgument(format!("unknown style family: {}", s))),
        }
    }
}

impl std::fmt::Display for StyleFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.family_name())
    }
}

/// Cursor over the `style:style` children of `office:automatic-styles`.
#[derive(Clone)]
pub struct Style {
    cursor: Cursor,
}

impl Style {
    pub fn new(tree: SharedTree) -> Self {
        Self {
            cursor: Cursor::new(tree, tags::STYLE),
        }
    }

    pub(crate) fn bound(tree: SharedTree, parent: NodeId, current: NodeId) -> Self {
        let mut style = Self::new(tree);
        style.cursor.bind(Some(parent), Some(current));
        style
    }

    /// Scope the view to `parent` and select its first style.
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.cursor.set_parent(parent);
    }

    /// Point the view at `current` without searching.
    pub fn set_current(&mut self, current: Option<NodeId>) {
        self.cursor.set_current(current);
    }

    /// Advance to the next style sibling.
    pub fn next(&mut self) -> &mut Self {
        self.cursor.advance();
        self
    }

    /// Whether the view points at a style.
    pub fn has_next(&self) -> bool {
        self.cursor.is_valid()
    }

    /// The current style element, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    /// The container the view iterates.
    pub fn parent(&self) -> Option<NodeId> {
        self.cursor.parent()
    }

    /// `style:name` of the current style.
    pub fn name(&self) -> Option<String> {
        self.cursor.attribute(tags::STYLE_NAME)
    }

    /// Family of the current style, if it is one of the known categories.
    pub fn family(&self) -> Option<StyleFamily> {
        self.cursor
            .attribute(tags::STYLE_FAMILY)
            .and_then(|f| StyleFamily::from_family_name(&f))
    }

    /// `style:parent-style-name` of the current style.
    pub fn parent_style_name(&self) -> Option<String> {
        self.cursor.attribute(tags::STYLE_PARENT)
    }

    /// Formatting attribute `key` on the style's properties element.
    pub fn property(&self, key: &str) -> Option<String> {
        let current = self.cursor.current()?;
        let family = self.family()?;
        let tree = self.cursor.read();
        let properties = tree.child(current, family.properties_tag())?;
        tree.attribute(properties, key).map(str::to_string)
    }

    /// Append a style definition under the automatic-styles container.
    ///
    /// `attributes` are written in order onto the family's properties
    /// element; a repeated key keeps its last value.
    ///
    /// # Example
    ///
    /// ```
    /// use odtkit::model::{Style, StyleFamily};
    /// use odtkit::xml::{share, XmlTree};
    ///
    /// let tree = share(XmlTree::parse("<office:automatic-styles/>")?);
    /// let root = tree.borrow().root_element();
    /// let mut styles = Style::new(tree);
    /// styles.set_parent(root);
    ///
    /// let bold = styles.add_style("Bold", StyleFamily::Run, &[("fo:font-weight", "bold")])?;
    /// assert_eq!(bold.property("fo:font-weight").as_deref(), Some("bold"));
    /// # Ok::<(), odtkit::Error>(())
    /// ```
    pub fn add_style<K, V>(&self, name: &str, family: StyleFamily, attributes: &[(K, V)]) -> Result<Style>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parent = self.cursor.require_parent()?;
        let style = {
            let mut tree = self.cursor.write();
            let style = append(&mut tree, parent, tags::STYLE)?;
            set_attr(&mut tree, style, tags::STYLE_NAME, name)?;
            if let Some(parent_style) = family.parent_style() {
                set_attr(&mut tree, style, tags::STYLE_PARENT, parent_style)?;
            }
            set_attr(&mut tree, style, tags::STYLE_FAMILY, family.family_name())?;

            let properties = append(&mut tree, style, family.properties_tag())?;
            for (key, value) in attributes {
                set_attr(&mut tree, properties, key.as_ref(), value.as_ref())?;
            }
            style
        };
        Ok(Style::bound(self.cursor.tree().clone(), parent, style))
    }
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Style")
            .field("parent", &self.cursor.parent())
            .field("current", &self.cursor.current())
            .finish()
    }
}
