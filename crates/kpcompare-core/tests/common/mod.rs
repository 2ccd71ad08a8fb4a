use kpcompare_core::{DocumentTree, EntryNode, GroupNode, NodeId};

/// Small vault used across tests
///
/// ```text
/// Root/
///   Work/
///     Mail      (username = <mail_user>)
///   Personal/
/// ```
#[allow(dead_code)]
pub struct Vault {
    pub tree: DocumentTree,
    pub root: NodeId,
    pub work: NodeId,
    pub personal: NodeId,
    pub mail: NodeId,
}

#[allow(dead_code)]
pub fn vault(mail_user: &str) -> Vault {
    let mut tree = DocumentTree::new();
    let root = tree.add_group(tree.root(), GroupNode::new("g-root", "Root"));
    let work = tree.add_group(root, GroupNode::new("g-work", "Work"));
    let personal = tree.add_group(root, GroupNode::new("g-personal", "Personal"));
    let mail = tree.add_entry(
        work,
        EntryNode::new("e-mail", "Mail").with_string("username", mail_user),
    );
    Vault {
        tree,
        root,
        work,
        personal,
        mail,
    }
}

/// Same vault with the Mail entry placed in Personal instead of Work
#[allow(dead_code)]
pub fn vault_with_mail_in_personal(mail_user: &str) -> Vault {
    let mut tree = DocumentTree::new();
    let root = tree.add_group(tree.root(), GroupNode::new("g-root", "Root"));
    let work = tree.add_group(root, GroupNode::new("g-work", "Work"));
    let personal = tree.add_group(root, GroupNode::new("g-personal", "Personal"));
    let mail = tree.add_entry(
        personal,
        EntryNode::new("e-mail", "Mail").with_string("username", mail_user),
    );
    Vault {
        tree,
        root,
        work,
        personal,
        mail,
    }
}
