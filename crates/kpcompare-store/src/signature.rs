//! Container signature sniffing
//!
//! KeePass database files start with two little-endian `u32` signatures.
//! The second one tells the 2.x (KDBX) and 1.x (KDB) formats apart; KDBX
//! follows it with the file version (minor, then major, both `u16`).

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Signature plus version, all [`sniff`] looks at
const HEADER_LEN: usize = 12;

/// Leading bytes of a KDBX (KeePass 2.x) database
pub const KDBX_SIGNATURE: [u8; 8] = [0x03, 0xD9, 0xA2, 0x9A, 0x67, 0xFB, 0x4B, 0xB5];

/// Leading bytes of a KDB (KeePass 1.x) database
pub const KDB_SIGNATURE: [u8; 8] = [0x03, 0xD9, 0xA2, 0x9A, 0x65, 0xFB, 0x4B, 0xB5];

/// What a file looks like from its first bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Encrypted KeePass 2.x database; version is `None` if the header is cut short
    Kdbx { version: Option<(u16, u16)> },
    /// Encrypted KeePass 1.x database
    Kdb,
    /// Anything else, handed to the document parser as is
    Plain,
}

impl Container {
    /// Human-readable name used in error messages
    pub fn describe(&self) -> String {
        match self {
            Container::Kdbx {
                version: Some((major, minor)),
            } => format!("KDBX {}.{} database", major, minor),
            Container::Kdbx { version: None } => "KDBX database".to_string(),
            Container::Kdb => "KDB (KeePass 1.x) database".to_string(),
            Container::Plain => "plain document".to_string(),
        }
    }

    pub fn is_encrypted(&self) -> bool {
        !matches!(self, Container::Plain)
    }
}

/// Classify a file by its leading bytes
pub fn sniff(bytes: &[u8]) -> Container {
    if bytes.starts_with(&KDB_SIGNATURE) {
        return Container::Kdb;
    }
    if !bytes.starts_with(&KDBX_SIGNATURE) {
        return Container::Plain;
    }

    let version = bytes.get(8..12).map(|v| {
        let minor = u16::from_le_bytes([v[0], v[1]]);
        let major = u16::from_le_bytes([v[2], v[3]]);
        (major, minor)
    });
    Container::Kdbx { version }
}

/// Classify the file at `path` from its header alone
///
/// # Errors
///
/// Returns the IO error if the file cannot be opened or read.
pub fn sniff_file(path: &Path) -> io::Result<Container> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    File::open(path)?
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(sniff(&header))
}

/// Hex rendering of the signature bytes, for diagnostics
pub fn signature_hex(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(KDBX_SIGNATURE.len())])
}
