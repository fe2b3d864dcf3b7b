//! Arena-backed XML node storage.

/// Compact node identifier (index into the arena).
///
/// Ids stay valid for the lifetime of the tree; a removed node keeps its id
/// but is detached from its former parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Type of XML node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content
    Text,
    /// CDATA section
    CData,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
    /// Document type declaration
    DocType,
}

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name, prefix included (e.g. `text:style-name`)
    pub name: String,
    /// Unescaped value
    pub value: String,
}

/// The `<?xml ...?>` declaration of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    /// Element name, or the content of text-like nodes
    value: String,
    attributes: Vec<Attribute>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, value: String) -> Self {
        Self {
            kind,
            value,
            attributes: Vec::new(),
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    fn can_have_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document | NodeKind::Element)
    }
}

/// A mutable XML document.
///
/// Node `0` is the document node; the root element is one of its children.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<Node>,
    declaration: Option<Declaration>,
}

const DOCUMENT_NODE: NodeId = NodeId(0);

impl Default for XmlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlTree {
    /// Create an empty tree holding only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, String::new())],
            declaration: None,
        }
    }

    /// The document node.
    pub fn document(&self) -> NodeId {
        DOCUMENT_NODE
    }

    /// The first element child of the document node.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(DOCUMENT_NODE)
            .find(|&id| self.kind(id) == Some(NodeKind::Element))
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub fn set_declaration(&mut self, declaration: Option<Declaration>) {
        self.declaration = declaration;
    }

    /// Number of nodes ever allocated, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Qualified name of an element node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .filter(|n| n.kind == NodeKind::Element)
            .map(|n| n.value.as_str())
    }

    /// Raw content of a text, CDATA, comment, PI or doctype node.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .filter(|n| !n.can_have_children())
            .map(|n| n.value.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Iterate over all direct children of `id`, in document order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.node(id).and_then(|n| n.first_child),
        }
    }

    /// First element child of `parent` named `name`.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent).find(|&id| self.name(id) == Some(name))
    }

    /// Next element sibling of `id` named `name`.
    pub fn next_sibling(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut cursor = self.node(id)?.next_sibling;
        while let Some(candidate) = cursor {
            if self.name(candidate) == Some(name) {
                return Some(candidate);
            }
            cursor = self.node(candidate)?.next_sibling;
        }
        None
    }

    /// Follow a chain of element names from the document node.
    pub fn path(&self, names: &[&str]) -> Option<NodeId> {
        names
            .iter()
            .try_fold(DOCUMENT_NODE, |node, name| self.child(node, name))
    }

    /// Count element children of `parent` named `name`.
    pub fn count_children(&self, parent: NodeId, name: &str) -> usize {
        self.children(parent)
            .filter(|&id| self.name(id) == Some(name))
            .count()
    }

    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        self.node(id).map(|n| n.attributes.as_slice()).unwrap_or(&[])
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, creating it when absent.
    ///
    /// Returns `false` when `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(node) = self.node_mut(id).filter(|n| n.kind == NodeKind::Element) else {
            return false;
        };
        match node.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => node.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        true
    }

    /// Text of an element: its first text or CDATA child, or `""`.
    ///
    /// For a text-like node this is the node's own content.
    pub fn text(&self, id: NodeId) -> &str {
        match self.kind(id) {
            Some(NodeKind::Element) => self
                .text_child(id)
                .and_then(|child| self.value(child))
                .unwrap_or(""),
            Some(NodeKind::Text) | Some(NodeKind::CData) => self.value(id).unwrap_or(""),
            _ => "",
        }
    }

    fn text_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id)
            .find(|&c| matches!(self.kind(c), Some(NodeKind::Text) | Some(NodeKind::CData)))
    }

    /// Replace the text of an element, adding a text child if it has none.
    ///
    /// Returns `false` when `id` is neither an element nor a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        let target = match self.kind(id) {
            Some(NodeKind::Element) => match self.text_child(id) {
                Some(child) => child,
                None => {
                    self.append_node(id, Node::new(NodeKind::Text, text.to_string()));
                    return true;
                }
            },
            Some(NodeKind::Text) | Some(NodeKind::CData) => id,
            _ => return false,
        };
        match self.node_mut(target) {
            Some(node) => {
                node.value = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Concatenated text of every text and CDATA node below `id`.
    pub fn descendant_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in self.children(id) {
            match self.kind(child) {
                Some(NodeKind::Text) | Some(NodeKind::CData) => {
                    out.push_str(self.value(child).unwrap_or(""))
                }
                Some(NodeKind::Element) => self.collect_text(child, out),
                _ => {}
            }
        }
    }

    /// Append a new element named `name` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        if !self.node(parent)?.can_have_children() {
            return None;
        }
        Some(self.append_node(parent, Node::new(NodeKind::Element, name.to_string())))
    }

    /// Insert a new element right after `anchor`, which must be a child of `parent`.
    pub fn insert_child_after(
        &mut self,
        parent: NodeId,
        name: &str,
        anchor: NodeId,
    ) -> Option<NodeId> {
        if self.parent(anchor) != Some(parent) {
            return None;
        }
        let id = self.alloc(Node::new(NodeKind::Element, name.to_string()));
        self.link_after(parent, anchor, id);
        Some(id)
    }

    /// Insert a new element right before `anchor`, which must be a child of `parent`.
    pub fn insert_child_before(
        &mut self,
        parent: NodeId,
        name: &str,
        anchor: NodeId,
    ) -> Option<NodeId> {
        if self.parent(anchor) != Some(parent) {
            return None;
        }
        let id = self.alloc(Node::new(NodeKind::Element, name.to_string()));
        self.link_before(parent, anchor, id);
        Some(id)
    }

    /// Detach `child` from `parent`. Returns `false` if it was not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.unlink(child);
        true
    }

    pub(crate) fn append_node_of(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        value: String,
    ) -> NodeId {
        self.append_node(parent, Node::new(kind, value))
    }

    pub(crate) fn push_attribute(&mut self, id: NodeId, name: String, value: String) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.push(Attribute { name, value });
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn append_node(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.alloc(node);
        let last = self.nodes[parent.index()].last_child;
        match last {
            Some(last) => self.link_after(parent, last, id),
            None => {
                let p = &mut self.nodes[parent.index()];
                p.first_child = Some(id);
                p.last_child = Some(id);
                self.nodes[id.index()].parent = Some(parent);
            }
        }
        id
    }

    fn link_after(&mut self, parent: NodeId, anchor: NodeId, id: NodeId) {
        let next = self.nodes[anchor.index()].next_sibling;
        {
            let node = &mut self.nodes[id.index()];
            node.parent = Some(parent);
            node.prev_sibling = Some(anchor);
            node.next_sibling = next;
        }
        self.nodes[anchor.index()].next_sibling = Some(id);
        match next {
            Some(next) => self.nodes[next.index()].prev_sibling = Some(id),
            None => self.nodes[parent.index()].last_child = Some(id),
        }
    }

    fn link_before(&mut self, parent: NodeId, anchor: NodeId, id: NodeId) {
        let prev = self.nodes[anchor.index()].prev_sibling;
        {
            let node = &mut self.nodes[id.index()];
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = Some(anchor);
        }
        self.nodes[anchor.index()].prev_sibling = Some(id);
        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = Some(id),
            None => self.nodes[parent.index()].first_child = Some(id),
        }
    }

    fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        let Some(parent) = parent else {
            return;
        };
        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = next,
            None => self.nodes[parent.index()].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next.index()].prev_sibling = prev,
            None => self.nodes[parent.index()].last_child = prev,
        }
        let node = &mut self.nodes[id.index()];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'a> {
    tree: &'a XmlTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}
