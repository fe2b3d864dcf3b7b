//! Mutable XML tree used as the backing store of every document view.
//!
//! The tree is an arena of nodes linked through parent/child/sibling ids.
//! Parsing and serialization go through `quick-xml`; this module only adds
//! the navigation and mutation primitives the views need.

mod reader;
mod tree;
mod writer;

pub use tree::{Attribute, Declaration, NodeId, NodeKind, XmlTree};

use std::cell::RefCell;
use std::rc::Rc;

/// Tree handle shared by a [`Document`](crate::Document) and all views over it.
pub type SharedTree = Rc<RefCell<XmlTree>>;

/// Wrap a tree into a shared handle.
pub fn share(tree: XmlTree) -> SharedTree {
    Rc::new(RefCell::new(tree))
}
