use crate::model::{Node, NodeData, NodeId, NodeKind};
use std::collections::BTreeMap;

/// Fixed field values of a record, per kind
///
/// Values borrow from the tree. Missing and empty values are both `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedFields<'t> {
    Group {
        name: Option<&'t str>,
        icon_id: Option<&'t str>,
        notes: Option<&'t str>,
    },
    Entry {
        icon_id: Option<&'t str>,
        foreground_color: Option<&'t str>,
        override_url: Option<&'t str>,
        tags: Option<&'t str>,
    },
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl<'t> FixedFields<'t> {
    /// Extract the fixed fields of a Group or Entry; `None` for the document root
    pub fn from_data(data: &'t NodeData) -> Option<Self> {
        match data {
            NodeData::Root => None,
            NodeData::Group(g) => Some(FixedFields::Group {
                name: non_empty(&g.name),
                icon_id: non_empty(&g.icon_id),
                notes: non_empty(&g.notes),
            }),
            NodeData::Entry(e) => Some(FixedFields::Entry {
                icon_id: non_empty(&e.icon_id),
                foreground_color: non_empty(&e.foreground_color),
                override_url: non_empty(&e.override_url),
                tags: non_empty(&e.tags),
            }),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FixedFields::Group { .. } => NodeKind::Group,
            FixedFields::Entry { .. } => NodeKind::Entry,
        }
    }

    /// Field names and values in schema order
    pub fn values(&self) -> Vec<(&'static str, Option<&'t str>)> {
        match *self {
            FixedFields::Group {
                name,
                icon_id,
                notes,
            } => vec![("Name", name), ("IconID", icon_id), ("Notes", notes)],
            FixedFields::Entry {
                icon_id,
                foreground_color,
                override_url,
                tags,
            } => vec![
                ("IconID", icon_id),
                ("ForegroundColor", foreground_color),
                ("OverrideURL", override_url),
                ("Tags", tags),
            ],
        }
    }
}

/// Comparison-ready view of one Group or Entry
///
/// Built once by the scanner and never mutated afterwards. Borrows the node
/// it describes, so the tree must outlive every descriptor taken from it.
#[derive(Debug, Clone)]
pub struct Descriptor<'t> {
    pub(crate) reference: &'t Node,
    pub(crate) node_id: NodeId,
    pub(crate) segments: Vec<String>,
    pub(crate) display_path: String,
    pub(crate) identity_id: &'t str,
    pub(crate) fields: FixedFields<'t>,
    pub(crate) strings: BTreeMap<&'t str, Option<&'t str>>,
    pub(crate) parent_key: String,
}

impl<'t> Descriptor<'t> {
    /// The tree node this descriptor was taken from
    pub fn reference(&self) -> &'t Node {
        self.reference
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn kind(&self) -> NodeKind {
        self.fields.kind()
    }

    /// Ancestor names plus this record's own name
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments joined with `/`; Groups carry a trailing `/`
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    pub fn identity_id(&self) -> &'t str {
        self.identity_id
    }

    pub fn fields(&self) -> &FixedFields<'t> {
        &self.fields
    }

    /// Custom string fields by name
    pub fn strings(&self) -> &BTreeMap<&'t str, Option<&'t str>> {
        &self.strings
    }

    pub fn parent_key(&self) -> &str {
        &self.parent_key
    }
}
