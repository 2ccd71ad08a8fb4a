use crate::errors::{format_error, xml_error, Result};
use kpcompare_core::errors::ExError;
use kpcompare_core::model::StringField;
use kpcompare_core::{DocumentTree, EntryNode, GroupNode, NodeId};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse a KeePass 2.x XML document into a tree
///
/// `Meta`, `DeletedObjects`, `Times`, `CustomData` and any other element the
/// comparison does not use are skipped. Entry history is kept as child
/// entries of the entry it belongs to.
///
/// # Errors
///
/// Returns a `Format` error for malformed XML, a missing `KeePassFile` or
/// `Root` element, or a `String` without a `Key`.
pub fn parse_document(xml: &str) -> Result<DocumentTree> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut parser = Parser::new(xml);
    parser.document()?;
    Ok(parser.tree)
}

fn unexpected_eof(inside: &str) -> ExError {
    format_error(format!("unexpected end of document inside <{}>", inside))
}

struct Parser<'i> {
    reader: Reader<&'i [u8]>,
    tree: DocumentTree,
}

impl<'i> Parser<'i> {
    fn new(xml: &'i str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            tree: DocumentTree::new(),
        }
    }

    fn next(&mut self) -> Result<Event<'i>> {
        self.reader
            .read_event()
            .map_err(|e| xml_error(self.reader.error_position(), e))
    }

    fn skip(&mut self, start: &BytesStart<'i>) -> Result<()> {
        self.reader
            .read_to_end(start.name())
            .map_err(|e| xml_error(self.reader.error_position(), e))?;
        Ok(())
    }

    /// Unescaped text content of the element that `start` opened
    fn text(&mut self, start: &BytesStart<'i>) -> Result<String> {
        let raw = self
            .reader
            .read_text(start.name())
            .map_err(|e| xml_error(self.reader.error_position(), e))?;
        let text = quick_xml::escape::unescape(&raw)
            .map_err(|e| xml_error(self.reader.buffer_position(), e))?;
        Ok(text.into_owned())
    }

    fn optional_text(&mut self, start: &BytesStart<'i>) -> Result<Option<String>> {
        let text = self.text(start)?;
        Ok(Some(text).filter(|t| !t.is_empty()))
    }

    fn document(&mut self) -> Result<()> {
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"KeePassFile" => {
                    return self.keepass_file();
                }
                Event::Empty(e) if e.name().as_ref() == b"KeePassFile" => {
                    return Err(format_error("document has no <Root> element"));
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(format_error(format!(
                        "root element is <{}>, expected <KeePassFile>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Eof => return Err(format_error("document has no <KeePassFile> element")),
                _ => {}
            }
        }
    }

    fn keepass_file(&mut self) -> Result<()> {
        let mut saw_root = false;
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"Root" => {
                    self.root()?;
                    saw_root = true;
                }
                Event::Empty(e) if e.name().as_ref() == b"Root" => saw_root = true,
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof("KeePassFile")),
                _ => {}
            }
        }

        if saw_root {
            Ok(())
        } else {
            Err(format_error("document has no <Root> element"))
        }
    }

    fn root(&mut self) -> Result<()> {
        let root = self.tree.root();
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"Group" => self.group(root)?,
                Event::Empty(e) if e.name().as_ref() == b"Group" => {
                    self.tree.add_group(root, GroupNode::default());
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(unexpected_eof("Root")),
                _ => {}
            }
        }
    }

    fn group(&mut self, parent: NodeId) -> Result<()> {
        let id = self.tree.add_group(parent, GroupNode::default());
        let mut group = GroupNode::default();

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"UUID" => group.uuid = self.optional_text(&e)?,
                    b"Name" => group.name = Some(self.text(&e)?),
                    b"IconID" => group.icon_id = self.optional_text(&e)?,
                    b"Notes" => group.notes = self.optional_text(&e)?,
                    b"Group" => self.group(id)?,
                    b"Entry" => self.entry(id)?,
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"Name" => group.name = Some(String::new()),
                    b"Group" => {
                        self.tree.add_group(id, GroupNode::default());
                    }
                    b"Entry" => {
                        self.tree.add_entry(id, EntryNode::default());
                    }
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof("Group")),
                _ => {}
            }
        }

        if let Some(slot) = self.tree.group_mut(id) {
            *slot = group;
        }
        Ok(())
    }

    fn entry(&mut self, parent: NodeId) -> Result<()> {
        let id = self.tree.add_entry(parent, EntryNode::default());
        let mut entry = EntryNode::default();

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"UUID" => entry.uuid = self.optional_text(&e)?,
                    b"IconID" => entry.icon_id = self.optional_text(&e)?,
                    b"ForegroundColor" => entry.foreground_color = self.optional_text(&e)?,
                    b"OverrideURL" => entry.override_url = self.optional_text(&e)?,
                    b"Tags" => entry.tags = self.optional_text(&e)?,
                    b"String" => entry.strings.push(self.string_field()?),
                    b"History" => self.history(id)?,
                    _ => self.skip(&e)?,
                },
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof("Entry")),
                _ => {}
            }
        }

        if let Some(slot) = self.tree.entry_mut(id) {
            *slot = entry;
        }
        Ok(())
    }

    fn history(&mut self, entry: NodeId) -> Result<()> {
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"Entry" => self.entry(entry)?,
                Event::Empty(e) if e.name().as_ref() == b"Entry" => {
                    self.tree.add_entry(entry, EntryNode::default());
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(unexpected_eof("History")),
                _ => {}
            }
        }
    }

    fn string_field(&mut self) -> Result<StringField> {
        let mut key = None;
        let mut value = None;

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"Key" => key = Some(self.text(&e)?),
                    b"Value" => value = self.optional_text(&e)?,
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) if e.name().as_ref() == b"Key" => key = Some(String::new()),
                Event::End(_) => break,
                Event::Eof => return Err(unexpected_eof("String")),
                _ => {}
            }
        }

        let key = key.ok_or_else(|| {
            format_error(format!(
                "<String> without <Key> near byte {}",
                self.reader.buffer_position()
            ))
        })?;
        Ok(StringField::new(key, value))
    }
}
