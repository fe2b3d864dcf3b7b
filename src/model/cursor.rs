//! Shared scope/position state behind every view.

use crate::error::{Error, Result};
use crate::xml::{NodeId, SharedTree, XmlTree};
use std::cell::{Ref, RefMut};

/// A `(parent, current)` pair over one element tag in a shared tree.
///
/// `current`, when set, is a child of `parent` named `tag`.
#[derive(Clone)]
pub(crate) struct Cursor {
    tree: SharedTree,
    tag: &'static str,
    parent: Option<NodeId>,
    current: Option<NodeId>,
}

impl Cursor {
    pub(crate) fn new(tree: SharedTree, tag: &'static str) -> Self {
        Self {
            tree,
            tag,
            parent: None,
            current: None,
        }
    }

    pub(crate) fn tree(&self) -> &SharedTree {
        &self.tree
    }

    pub(crate) fn read(&self) -> Ref<'_, XmlTree> {
        self.tree.borrow()
    }

    pub(crate) fn write(&self) -> RefMut<'_, XmlTree> {
        self.tree.borrow_mut()
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Rebind to `parent` and select its first `tag` child.
    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
        self.current = parent.and_then(|p| self.read().child(p, self.tag));
    }

    pub(crate) fn set_current(&mut self, current: Option<NodeId>) {
        self.current = current;
    }

    /// Bind both ends at once (used for freshly created elements).
    pub(crate) fn bind(&mut self, parent: Option<NodeId>, current: Option<NodeId>) {
        self.parent = parent;
        self.current = current;
    }

    pub(crate) fn advance(&mut self) {
        self.current = self
            .current
            .and_then(|c| self.read().next_sibling(c, self.tag));
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn require_current(&self) -> Result<NodeId> {
        self.current
            .ok_or_else(|| Error::MissingElement(format!("no current <{}>", self.tag)))
    }

    pub(crate) fn require_parent(&self) -> Result<NodeId> {
        self.parent
            .ok_or_else(|| Error::MissingElement(format!("no container for <{}>", self.tag)))
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<String> {
        let current = self.current?;
        self.read().attribute(current, name).map(str::to_string)
    }

    /// Remove `current` from `parent` and move to the next `tag` sibling.
    pub(crate) fn remove_current(&mut self) -> bool {
        let (Some(parent), Some(current)) = (self.parent, self.current) else {
            return false;
        };
        let next = self.read().next_sibling(current, self.tag);
        let removed = self.write().remove_child(parent, current);
        if removed {
            self.current = next;
        }
        removed
    }
}

/// Append `name` under `parent`, turning a refused write into an error.
pub(crate) fn append(tree: &mut XmlTree, parent: NodeId, name: &str) -> Result<NodeId> {
    tree.append_child(parent, name)
        .ok_or_else(|| Error::WriteFailed(format!("cannot append <{}>", name)))
}

/// Upsert an attribute, turning a refused write into an error.
pub(crate) fn set_attr(tree: &mut XmlTree, node: NodeId, name: &str, value: &str) -> Result<()> {
    if tree.set_attribute(node, name, value) {
        Ok(())
    } else {
        Err(Error::WriteFailed(format!("cannot set {}", name)))
    }
}
