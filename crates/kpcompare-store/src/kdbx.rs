//! Encrypted KeePass 2.x (KDBX 3.1 and 4.x) databases
//!
//! Decryption is done by the `keepass` crate. The decrypted groups and
//! entries are copied into a [`DocumentTree`] with the same text values the
//! XML export would carry, so a `.kdbx` file and its XML export compare as
//! identical.

use crate::errors::{decryption_error, format_error, io_error, Result};
use crate::provider::DocumentProvider;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use keepass::db::{Entry, Group, Node, Value};
use keepass::error::DatabaseOpenError;
use keepass::{Database, DatabaseKey};
use kpcompare_core::errors::ExError;
use kpcompare_core::model::StringField;
use kpcompare_core::{DocumentTree, EntryNode, GroupNode, NodeId};
use kpcompare_core_types::Sensitive;
use std::path::Path;

/// Provider for password-protected `.kdbx` files
#[derive(Debug, Clone, Copy, Default)]
pub struct KdbxDocumentProvider;

impl KdbxDocumentProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentProvider for KdbxDocumentProvider {
    fn open(&self, path: &Path, password: &Sensitive<String>) -> Result<DocumentTree> {
        let bytes = std::fs::read(path).map_err(|e| io_error("open_document", path, e))?;
        decrypt_document(&bytes, password).map_err(|e| e.with_path(path.display().to_string()))
    }

    fn requires_password(&self, _path: &Path) -> bool {
        true
    }
}

/// Decrypt a KDBX database held in memory
///
/// # Errors
///
/// - `Decryption` if the password does not unlock the database
/// - `Format` for a corrupt or unsupported container
pub fn decrypt_document(bytes: &[u8], password: &Sensitive<String>) -> Result<DocumentTree> {
    let key = DatabaseKey::new().with_password(password.expose());
    let db = Database::open(&mut &bytes[..], key).map_err(open_error)?;

    let mut tree = DocumentTree::new();
    let root = tree.root();
    add_group(&mut tree, root, &db.root);
    Ok(tree)
}

fn open_error(err: DatabaseOpenError) -> ExError {
    match err {
        DatabaseOpenError::Key(e) => decryption_error(e.to_string()),
        DatabaseOpenError::Io(e) => format_error(format!("truncated database: {}", e)),
        other => format_error(other.to_string()),
    }
}

fn uuid_text(bytes: &[u8]) -> Option<String> {
    Some(STANDARD.encode(bytes))
}

fn non_empty(text: Option<&String>) -> Option<String> {
    text.filter(|t| !t.is_empty()).cloned()
}

fn add_group(tree: &mut DocumentTree, parent: NodeId, group: &Group) {
    let node = GroupNode {
        uuid: uuid_text(group.uuid.as_bytes()),
        name: Some(group.name.clone()),
        icon_id: group.icon_id.map(|id| id.to_string()),
        notes: non_empty(group.notes.as_ref()),
        strings: Vec::new(),
    };
    let id = tree.add_group(parent, node);

    for child in &group.children {
        match child {
            Node::Group(g) => add_group(tree, id, g),
            Node::Entry(e) => add_entry(tree, id, e),
        }
    }
}

fn add_entry(tree: &mut DocumentTree, parent: NodeId, entry: &Entry) {
    let id = tree.add_entry(parent, entry_node(entry));

    if let Some(history) = &entry.history {
        for old in history.get_entries() {
            tree.add_entry(id, entry_node(old));
        }
    }
}

fn entry_node(entry: &Entry) -> EntryNode {
    let mut keys: Vec<&String> = entry.fields.keys().collect();
    keys.sort();
    let strings = keys
        .into_iter()
        .map(|key| StringField::new(key.clone(), field_text(&entry.fields[key])))
        .collect();

    let tags = entry.tags.join(";");
    EntryNode {
        uuid: uuid_text(entry.uuid.as_bytes()),
        icon_id: entry.icon_id.map(|id| id.to_string()),
        foreground_color: entry
            .foreground_color
            .as_ref()
            .map(|c| format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)),
        override_url: non_empty(entry.override_url.as_ref()),
        tags: Some(tags).filter(|t| !t.is_empty()),
        strings,
    }
}

fn field_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Unprotected(s) => s.clone(),
        Value::Protected(s) => String::from_utf8_lossy(s.unsecure()).into_owned(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
    };
    Some(text).filter(|t| !t.is_empty())
}
