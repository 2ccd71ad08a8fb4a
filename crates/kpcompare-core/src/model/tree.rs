//! Read-only document tree of Groups and Entries.
//!
//! Providers build the tree once through [`DocumentTree::add_group`] and
//! [`DocumentTree::add_entry`]; the comparison engine only ever borrows it.
//! Nodes live in an arena and refer to each other through [`NodeId`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside its [`DocumentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Record kinds taking part in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Group,
    Entry,
}

impl NodeKind {
    /// Element tag used by the document format
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Group => "Group",
            NodeKind::Entry => "Entry",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A custom key/value string attached to a record
///
/// `value` is `None` when the document stores an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringField {
    pub key: String,
    pub value: Option<String>,
}

impl StringField {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Fixed schema of a Group record
///
/// `name` is `Some("")` for a present but empty `Name` element and `None` only
/// when the element is missing. The other scalar fields are `None` when the
/// element is missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupNode {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub icon_id: Option<String>,
    pub notes: Option<String>,
    pub strings: Vec<StringField>,
}

impl GroupNode {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_icon_id(mut self, icon_id: impl Into<String>) -> Self {
        self.icon_id = Some(icon_id.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Fixed schema of an Entry record plus its custom strings
///
/// The display name of an entry is its `Title` string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryNode {
    pub uuid: Option<String>,
    pub icon_id: Option<String>,
    pub foreground_color: Option<String>,
    pub override_url: Option<String>,
    pub tags: Option<String>,
    pub strings: Vec<StringField>,
}

impl EntryNode {
    pub const TITLE: &'static str = "Title";

    pub fn new(uuid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Self::default()
        }
        .with_string(Self::TITLE, title)
    }

    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings
            .push(StringField::new(key, Some(value.into())));
        self
    }

    pub fn with_icon_id(mut self, icon_id: impl Into<String>) -> Self {
        self.icon_id = Some(icon_id.into());
        self
    }

    pub fn with_foreground_color(mut self, color: impl Into<String>) -> Self {
        self.foreground_color = Some(color.into());
        self
    }

    pub fn with_override_url(mut self, url: impl Into<String>) -> Self {
        self.override_url = Some(url.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// The `Title` string: `None` if the key is missing, `Some("")` if its
    /// value is empty. The last occurrence wins.
    pub fn title(&self) -> Option<&str> {
        self.strings
            .iter()
            .rev()
            .find(|s| s.key == Self::TITLE)
            .map(|s| s.value.as_deref().unwrap_or(""))
    }
}

/// Payload of a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root, parent of the top-level group. Not a record.
    Root,
    Group(GroupNode),
    Entry(EntryNode),
}

impl NodeData {
    /// Record kind, `None` for the document root
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            NodeData::Root => None,
            NodeData::Group(_) => Some(NodeKind::Group),
            NodeData::Entry(_) => Some(NodeKind::Entry),
        }
    }

    pub fn uuid(&self) -> Option<&str> {
        match self {
            NodeData::Root => None,
            NodeData::Group(g) => g.uuid.as_deref(),
            NodeData::Entry(e) => e.uuid.as_deref(),
        }
    }

    pub fn strings(&self) -> &[StringField] {
        match self {
            NodeData::Root => &[],
            NodeData::Group(g) => &g.strings,
            NodeData::Entry(e) => &e.strings,
        }
    }
}

/// One node of the tree with its structural links
#[derive(Debug, Clone)]
pub struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: String,
}

impl Node {
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.data.kind()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Position of the node within the document, e.g.
    /// `/KeePassFile/Root/Group[1]/Entry[2]`. Unique per node.
    pub fn position(&self) -> &str {
        &self.position
    }
}

/// Arena-backed document tree
///
/// Node 0 is always the document root.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl DocumentTree {
    pub const ROOT_POSITION: &'static str = "/KeePassFile/Root";

    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
                position: Self::ROOT_POSITION.to_string(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of Group and Entry nodes (the document root is not counted)
    pub fn record_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Append a group as the last child of `parent`
    pub fn add_group(&mut self, parent: NodeId, group: GroupNode) -> NodeId {
        self.push(parent, NodeData::Group(group))
    }

    /// Append an entry as the last child of `parent`
    pub fn add_entry(&mut self, parent: NodeId, entry: EntryNode) -> NodeId {
        self.push(parent, NodeData::Entry(entry))
    }

    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut GroupNode> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Group(g)) => Some(g),
            _ => None,
        }
    }

    pub fn entry_mut(&mut self, id: NodeId) -> Option<&mut EntryNode> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Entry(e)) => Some(e),
            _ => None,
        }
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        let tag = data.kind().map(|k| k.tag()).unwrap_or("Root");
        let parent_node = &self.nodes[parent.0];
        let sibling_ordinal = parent_node
            .children
            .iter()
            .filter(|c| self.nodes[c.0].data.kind() == data.kind())
            .count()
            + 1;
        let position = format!("{}/{}[{}]", parent_node.position, tag, sibling_ordinal);

        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
            position,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// All nodes in document order (parents before their children)
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    /// Every Group in document order
    pub fn groups(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|id| self.node(*id).kind() == Some(NodeKind::Group))
            .collect()
    }

    /// Every Entry whose parent is a Group, in document order
    pub fn entries(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|id| {
                let node = self.node(*id);
                node.kind() == Some(NodeKind::Entry)
                    && node
                        .parent
                        .map(|p| self.node(p).kind() == Some(NodeKind::Group))
                        .unwrap_or(false)
            })
            .collect()
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}
