//! XML document provider tests
//!
//! Fixtures are written to temporary directories and read back through the
//! provider, then fed to the comparison core.

use kpcompare_core::model::NodeData;
use kpcompare_core::{compare_trees, render_human_summary, ExErrorKind, Strategy};
use kpcompare_core_types::Sensitive;
use kpcompare_store::signature::KDBX_SIGNATURE;
use kpcompare_store::{open_document, DocumentProvider, XmlDocumentProvider};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXPORT: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<KeePassFile>
	<Meta>
		<Generator>KeePass</Generator>
		<DatabaseName>Personal</DatabaseName>
		<MemoryProtection>
			<ProtectTitle>False</ProtectTitle>
			<ProtectPassword>True</ProtectPassword>
		</MemoryProtection>
	</Meta>
	<Root>
		<Group>
			<UUID>AAAAAAAAAAAAAAAAAAAAAQ==</UUID>
			<Name>Root</Name>
			<Notes></Notes>
			<IconID>49</IconID>
			<Times>
				<CreationTime>2024-01-01T00:00:00Z</CreationTime>
			</Times>
			<IsExpanded>True</IsExpanded>
			<Group>
				<UUID>AAAAAAAAAAAAAAAAAAAAAg==</UUID>
				<Name>Work</Name>
				<Notes>Office &amp; remote</Notes>
				<IconID>48</IconID>
				<Entry>
					<UUID>AAAAAAAAAAAAAAAAAAAAAw==</UUID>
					<IconID>0</IconID>
					<ForegroundColor />
					<BackgroundColor />
					<OverrideURL />
					<Tags>mail</Tags>
					<Times>
						<LastModificationTime>2024-02-01T00:00:00Z</LastModificationTime>
					</Times>
					<String>
						<Key>Title</Key>
						<Value>Mail</Value>
					</String>
					<String>
						<Key>UserName</Key>
						<Value>alice</Value>
					</String>
					<String>
						<Key>Password</Key>
						<Value ProtectInMemory="True">hunter2</Value>
					</String>
					<String>
						<Key>Notes</Key>
						<Value />
					</String>
					<AutoType>
						<Enabled>True</Enabled>
					</AutoType>
					<History>
						<Entry>
							<UUID>AAAAAAAAAAAAAAAAAAAAAw==</UUID>
							<String>
								<Key>Title</Key>
								<Value>Mail (old)</Value>
							</String>
						</Entry>
					</History>
				</Entry>
			</Group>
			<Group>
				<UUID>AAAAAAAAAAAAAAAAAAAABA==</UUID>
				<Name>Personal</Name>
				<IconID>1</IconID>
			</Group>
		</Group>
		<DeletedObjects>
			<DeletedObject>
				<UUID>AAAAAAAAAAAAAAAAAAAABQ==</UUID>
			</DeletedObject>
		</DeletedObjects>
	</Root>
</KeePassFile>
"#;

fn write_fixture(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn no_password() -> Sensitive<String> {
    Sensitive::default()
}

#[test]
fn test_reads_groups_entries_and_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "export.xml", EXPORT.as_bytes());

    let tree = XmlDocumentProvider.open(&path, &no_password()).unwrap();

    // 3 groups, 1 entry, 1 history snapshot
    assert_eq!(tree.record_count(), 5);
    assert_eq!(tree.groups().len(), 3);
    assert_eq!(tree.entries().len(), 1);

    let work = tree.groups()[1];
    match tree.node(work).data() {
        NodeData::Group(g) => {
            assert_eq!(g.name.as_deref(), Some("Work"));
            assert_eq!(g.notes.as_deref(), Some("Office & remote"));
            assert_eq!(g.icon_id.as_deref(), Some("48"));
        }
        other => panic!("expected group, got {:?}", other),
    }

    let mail = tree.entries()[0];
    match tree.node(mail).data() {
        NodeData::Entry(e) => {
            assert_eq!(e.uuid.as_deref(), Some("AAAAAAAAAAAAAAAAAAAAAw=="));
            assert_eq!(e.title(), Some("Mail"));
            assert_eq!(e.tags.as_deref(), Some("mail"));
            assert_eq!(e.foreground_color, None);
            assert_eq!(e.override_url, None);
            let keys: Vec<&str> = e.strings.iter().map(|s| s.key.as_str()).collect();
            assert_eq!(keys, vec!["Title", "UserName", "Password", "Notes"]);
            assert_eq!(e.strings[2].value.as_deref(), Some("hunter2"));
            assert_eq!(e.strings[3].value, None);
        }
        other => panic!("expected entry, got {:?}", other),
    }
}

#[test]
fn test_root_group_notes_empty_element_is_none() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "export.xml", EXPORT.as_bytes());

    let tree = XmlDocumentProvider.open(&path, &no_password()).unwrap();
    match tree.node(tree.groups()[0]).data() {
        NodeData::Group(g) => assert_eq!(g.notes, None),
        other => panic!("expected group, got {:?}", other),
    }
}

#[test]
fn test_history_is_not_compared() {
    let dir = TempDir::new().unwrap();
    let before = write_fixture(&dir, "before.xml", EXPORT.as_bytes());
    let older_history = EXPORT.replace("Mail (old)", "Mail (older)");
    let after = write_fixture(&dir, "after.xml", older_history.as_bytes());

    let a = XmlDocumentProvider.open(&before, &no_password()).unwrap();
    let b = XmlDocumentProvider.open(&after, &no_password()).unwrap();

    let report = compare_trees(&a, &b, Strategy::Uuid).unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_exported_documents_compare_end_to_end() {
    let dir = TempDir::new().unwrap();
    let before = write_fixture(&dir, "before.xml", EXPORT.as_bytes());
    let changed = EXPORT.replace("<Value>alice</Value>", "<Value>bob</Value>");
    let after = write_fixture(&dir, "after.xml", changed.as_bytes());

    let a = open_document(&XmlDocumentProvider, &before, &no_password()).unwrap();
    let b = open_document(&XmlDocumentProvider, &after, &no_password()).unwrap();

    let report = compare_trees(&a, &b, Strategy::Path).unwrap();
    assert_eq!(
        render_human_summary(&report),
        "! Root/Work/Mail\n    UserName string modified.\n"
    );
}

#[test]
fn test_password_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "export.xml", EXPORT.as_bytes());

    let provider = XmlDocumentProvider::new();
    assert!(!provider.requires_password(&path));
    let tree = provider
        .open(&path, &Sensitive::new("wrong".to_string()))
        .unwrap();
    assert_eq!(tree.record_count(), 5);
}

#[test]
fn test_encrypted_kdbx_rejected_with_version() {
    let dir = TempDir::new().unwrap();
    let mut header = KDBX_SIGNATURE.to_vec();
    header.extend_from_slice(&[0x00, 0x00, 0x04, 0x00, 0x02, 0x10, 0x00]);
    let path = write_fixture(&dir, "vault.kdbx", &header);

    let err = open_document(&XmlDocumentProvider, &path, &no_password()).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Format);
    assert!(err.message().contains("KDBX 4.0"));
    assert_eq!(err.path(), Some(path.display().to_string().as_str()));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.xml");

    let err = XmlDocumentProvider.open(&path, &no_password()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(err.code(), "ERR_IO");
}

#[test]
fn test_malformed_xml_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "broken.xml",
        b"<KeePassFile><Root><Group><Name>Root</Group></Root></KeePassFile>",
    );

    let err = XmlDocumentProvider.open(&path, &no_password()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Format);
    assert!(err.path().is_some());
}

#[test]
fn test_binary_garbage_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "noise.bin", &[0xff, 0xfe, 0x00, 0x81]);

    let err = XmlDocumentProvider.open(&path, &no_password()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Format);
}

#[test]
fn test_string_without_key_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "nokey.xml",
        b"<KeePassFile><Root><Group><UUID>g</UUID><Name>Root</Name>\
          <Entry><UUID>e</UUID><String><Value>x</Value></String></Entry>\
          </Group></Root></KeePassFile>",
    );

    let err = XmlDocumentProvider.open(&path, &no_password()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Format);
    assert!(err.message().contains("<Key>"));
}
