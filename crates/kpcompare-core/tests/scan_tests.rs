#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::vault;
use kpcompare_core::model::StringField;
use kpcompare_core::scan::{scan_document, ComparisonKey, FixedFields};
use kpcompare_core::{CompareError, DocumentTree, EntryNode, GroupNode, NodeKind, Strategy};

fn uuid_key(id: &str) -> ComparisonKey {
    ComparisonKey::Uuid(id.to_string())
}

fn path_key(segments: &[&str]) -> ComparisonKey {
    ComparisonKey::Path(segments.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_every_group_and_entry_is_indexed() {
    let v = vault("alice");
    let index = scan_document(&v.tree, Strategy::Uuid).unwrap();

    assert_eq!(index.len(), 4);
    for id in ["g-root", "g-work", "g-personal", "e-mail"] {
        assert!(index.contains_key(&uuid_key(id)), "missing {}", id);
    }
    assert_eq!(index.strategy(), Strategy::Uuid);
}

#[test]
fn test_display_paths_mark_groups() {
    let v = vault("alice");
    let index = scan_document(&v.tree, Strategy::Path).unwrap();

    let group = index.get(&path_key(&["Root", "Work"])).unwrap();
    assert_eq!(group.kind(), NodeKind::Group);
    assert_eq!(group.display_path(), "Root/Work/");

    let entry = index.get(&path_key(&["Root", "Work", "Mail"])).unwrap();
    assert_eq!(entry.kind(), NodeKind::Entry);
    assert_eq!(entry.display_path(), "Root/Work/Mail");
    assert_eq!(entry.segments(), ["Root", "Work", "Mail"]);
}

#[test]
fn test_parent_keys_under_uuid() {
    let v = vault("alice");
    let index = scan_document(&v.tree, Strategy::Uuid).unwrap();

    assert_eq!(index.get(&uuid_key("g-root")).unwrap().parent_key(), "");
    assert_eq!(index.get(&uuid_key("g-work")).unwrap().parent_key(), "g-root");
    assert_eq!(index.get(&uuid_key("e-mail")).unwrap().parent_key(), "g-work");
}

#[test]
fn test_parent_keys_under_path() {
    let v = vault("alice");
    let index = scan_document(&v.tree, Strategy::Path).unwrap();

    assert_eq!(index.get(&path_key(&["Root"])).unwrap().parent_key(), "/");
    assert_eq!(
        index.get(&path_key(&["Root", "Work"])).unwrap().parent_key(),
        "Root/"
    );
    assert_eq!(
        index
            .get(&path_key(&["Root", "Work", "Mail"]))
            .unwrap()
            .parent_key(),
        "Root/Work/"
    );
}

#[test]
fn test_descriptor_borrows_source_node() {
    let v = vault("alice");
    let index = scan_document(&v.tree, Strategy::Uuid).unwrap();

    let mail = index.get(&uuid_key("e-mail")).unwrap();
    assert_eq!(mail.node_id(), v.mail);
    assert_eq!(mail.identity_id(), "e-mail");
    assert_eq!(
        mail.reference().position(),
        "/KeePassFile/Root/Group[1]/Group[1]/Entry[1]"
    );
    assert_eq!(mail.strings().get("username"), Some(&Some("alice")));
    assert_eq!(mail.strings().get("Title"), Some(&Some("Mail")));
    assert!(matches!(mail.fields(), FixedFields::Entry { .. }));
}

#[test]
fn test_entries_outside_groups_are_skipped() {
    let mut v = vault("alice");
    // history snapshots hang off their entry and are not records of their own
    v.tree.add_entry(v.mail, EntryNode::new("e-mail", "Mail (old)"));

    let index = scan_document(&v.tree, Strategy::Uuid).unwrap();
    assert_eq!(index.len(), 4);
    assert_eq!(
        index.get(&uuid_key("e-mail")).unwrap().display_path(),
        "Root/Work/Mail"
    );
}

#[test]
fn test_empty_name_gives_empty_segment() {
    let mut v = vault("alice");
    let unnamed = v.tree.add_group(v.root, GroupNode::new("g-blank", ""));
    v.tree.add_entry(unnamed, EntryNode::new("e-blank", ""));

    let index = scan_document(&v.tree, Strategy::Uuid).unwrap();
    assert_eq!(
        index.get(&uuid_key("g-blank")).unwrap().display_path(),
        "Root//"
    );
    assert_eq!(
        index.get(&uuid_key("e-blank")).unwrap().display_path(),
        "Root//"
    );
}

#[test]
fn test_repeated_custom_string_keeps_last_value() {
    let mut v = vault("alice");
    v.tree
        .entry_mut(v.mail)
        .unwrap()
        .strings
        .push(StringField::new("username", Some("carol".to_string())));

    let index = scan_document(&v.tree, Strategy::Uuid).unwrap();
    let mail = index.get(&uuid_key("e-mail")).unwrap();
    assert_eq!(mail.strings().get("username"), Some(&Some("carol")));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_entry_without_title_is_malformed() {
    let mut v = vault("alice");
    v.tree.entry_mut(v.mail).unwrap().strings.retain(|s| s.key != "Title");

    let err = scan_document(&v.tree, Strategy::Uuid).unwrap_err();
    assert_eq!(
        err,
        CompareError::MalformedRecord {
            path: "/KeePassFile/Root/Group[1]/Group[1]/Entry[1]".to_string(),
            reason: "entry has no Title string".to_string(),
        }
    );
}

#[test]
fn test_group_without_name_is_malformed() {
    let mut v = vault("alice");
    v.tree.group_mut(v.personal).unwrap().name = None;

    let err = scan_document(&v.tree, Strategy::Path).unwrap_err();
    assert!(matches!(
        err,
        CompareError::MalformedRecord { ref reason, .. } if reason == "group has no Name"
    ));
}

#[test]
fn test_record_without_uuid_is_malformed() {
    let mut v = vault("alice");
    v.tree.entry_mut(v.mail).unwrap().uuid = None;

    for strategy in [Strategy::Uuid, Strategy::Path] {
        let err = scan_document(&v.tree, strategy).unwrap_err();
        assert!(matches!(err, CompareError::MalformedRecord { .. }));
    }
}

#[test]
fn test_same_titled_siblings_collide_under_path() {
    let mut v = vault("alice");
    v.tree.add_entry(v.work, EntryNode::new("e-mail-2", "Mail"));

    // distinct identities keep them apart under uuid
    assert_eq!(scan_document(&v.tree, Strategy::Uuid).unwrap().len(), 5);

    let err = scan_document(&v.tree, Strategy::Path).unwrap_err();
    assert_eq!(
        err,
        CompareError::DuplicateKey {
            key: "Root/Work/Mail".to_string(),
            first_path: "Root/Work/Mail".to_string(),
            second_path: "Root/Work/Mail".to_string(),
        }
    );
}

#[test]
fn test_group_and_entry_with_same_path_collide_under_path() {
    let mut v = vault("alice");
    v.tree.add_group(v.work, GroupNode::new("g-mail", "Mail"));

    let err = scan_document(&v.tree, Strategy::Path).unwrap_err();
    match err {
        CompareError::DuplicateKey {
            first_path,
            second_path,
            ..
        } => {
            assert_eq!(first_path, "Root/Work/Mail/");
            assert_eq!(second_path, "Root/Work/Mail");
        }
        other => panic!("expected DuplicateKey, got {:?}", other),
    }
}

#[test]
fn test_reused_uuid_collides_under_uuid() {
    let mut v = vault("alice");
    v.tree.add_entry(v.personal, EntryNode::new("e-mail", "Mail copy"));

    let err = scan_document(&v.tree, Strategy::Uuid).unwrap_err();
    match err {
        CompareError::DuplicateKey {
            key,
            first_path,
            second_path,
        } => {
            assert_eq!(key, "e-mail");
            assert_eq!(first_path, "Root/Work/Mail");
            assert_eq!(second_path, "Root/Personal/Mail copy");
        }
        other => panic!("expected DuplicateKey, got {:?}", other),
    }
}

#[test]
fn test_tree_without_records_scans_empty() {
    let tree = DocumentTree::new();
    assert!(scan_document(&tree, Strategy::Uuid).unwrap().is_empty());
}
