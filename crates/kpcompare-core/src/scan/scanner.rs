use super::descriptor::{Descriptor, FixedFields};
use super::index::RecordIndex;
use super::key::{comparison_key, parent_key};
use crate::errors::{CompareError, Result};
use crate::model::{DocumentTree, Node, NodeData, NodeId, NodeKind, Strategy};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Flatten a document tree into a keyed record index
///
/// Visits every Group in document order, then every Entry that sits directly
/// in a Group. Each record's name path is derived from its parent's, which is
/// always visited first.
///
/// # Errors
///
/// - `MalformedRecord` if a record lacks its UUID or its name (`Name` for a
///   Group, the `Title` string for an Entry)
/// - `DuplicateKey` if two records resolve to the same comparison key
pub fn scan_document(tree: &DocumentTree, strategy: Strategy) -> Result<RecordIndex<'_>> {
    log_op_start!("scan_document", strategy = strategy.as_str());
    let start = Instant::now();

    let index = scan_records(tree, strategy).map_err(|e| {
        log_op_error!(
            "scan_document",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "scan_document",
        duration_ms = start.elapsed().as_millis() as u64,
        record_count = index.len()
    );
    Ok(index)
}

fn scan_records(tree: &DocumentTree, strategy: Strategy) -> Result<RecordIndex<'_>> {
    let mut segments_by_node: HashMap<NodeId, Vec<String>> = HashMap::new();
    segments_by_node.insert(tree.root(), Vec::new());

    let mut index = RecordIndex::new(strategy);
    for id in tree.groups().into_iter().chain(tree.entries()) {
        let descriptor = describe(tree, id, strategy, &segments_by_node)?;
        segments_by_node.insert(id, descriptor.segments.clone());

        let key = comparison_key(strategy, descriptor.identity_id, &descriptor.segments);
        tracing::debug!(
            key = %key,
            path = %descriptor.display_path,
            position = descriptor.reference.position(),
            "indexed record"
        );
        index.insert(key, descriptor)?;
    }
    Ok(index)
}

fn malformed(node: &Node, reason: &str) -> CompareError {
    CompareError::MalformedRecord {
        path: node.position().to_string(),
        reason: reason.to_string(),
    }
}

fn describe<'t>(
    tree: &'t DocumentTree,
    id: NodeId,
    strategy: Strategy,
    segments_by_node: &HashMap<NodeId, Vec<String>>,
) -> Result<Descriptor<'t>> {
    let node = tree.node(id);

    let name = match node.data() {
        NodeData::Group(group) => group.name.as_deref().ok_or("group has no Name"),
        NodeData::Entry(entry) => entry.title().ok_or("entry has no Title string"),
        NodeData::Root => Err("document root is not a record"),
    }
    .map_err(|reason| malformed(node, reason))?;
    let fields = FixedFields::from_data(node.data())
        .ok_or_else(|| malformed(node, "document root is not a record"))?;

    let identity_id = node
        .data()
        .uuid()
        .ok_or_else(|| malformed(node, "record has no UUID"))?;

    let parent_id = node
        .parent()
        .ok_or_else(|| malformed(node, "record has no parent"))?;
    let parent_segments = segments_by_node
        .get(&parent_id)
        .ok_or_else(|| malformed(node, "parent was not scanned before the record"))?;
    let parent_uuid = tree.node(parent_id).data().uuid();

    let mut segments = parent_segments.clone();
    segments.push(name.to_string());

    let mut display_path = segments.join("/");
    if fields.kind() == NodeKind::Group {
        display_path.push('/');
    }

    Ok(Descriptor {
        reference: node,
        node_id: id,
        parent_key: parent_key(strategy, parent_uuid, parent_segments),
        segments,
        display_path,
        identity_id,
        fields,
        strings: collect_strings(node),
    })
}

fn collect_strings(node: &Node) -> BTreeMap<&str, Option<&str>> {
    let mut strings = BTreeMap::new();
    for field in node.data().strings() {
        let value = field.value.as_deref().filter(|v| !v.is_empty());
        if strings.insert(field.key.as_str(), value).is_some() {
            tracing::warn!(
                key = field.key.as_str(),
                position = node.position(),
                "custom string repeated, keeping the last value"
            );
        }
    }
    strings
}
