//! Serializing an [`XmlTree`] back to text with the `quick-xml` writer.

use super::tree::{NodeId, NodeKind, XmlTree};
use crate::error::{Error, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

impl XmlTree {
    /// Serialize the whole document.
    ///
    /// The tree is written as-is: no indentation is added, so whitespace
    /// text nodes from the source survive unchanged. Elements without
    /// children are written as empty-element tags.
    pub fn to_xml_string(&self) -> Result<String> {
        let bytes = self.to_xml_bytes()?;
        String::from_utf8(bytes).map_err(|e| Error::XmlParse(e.to_string()))
    }

    /// Serialize the whole document to UTF-8 bytes.
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());

        if let Some(decl) = self.declaration() {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
            writer.get_mut().push(b'\n');
        }

        for child in self.children(self.document()) {
            self.write_node(&mut writer, child)?;
        }

        Ok(writer.into_inner())
    }

    /// Serialize a single subtree (no declaration).
    pub fn subtree_to_string(&self, id: NodeId) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, id)?;
        String::from_utf8(writer.into_inner()).map_err(|e| Error::XmlParse(e.to_string()))
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<()> {
        match self.kind(id) {
            Some(NodeKind::Element) => {
                let name = self.name(id).unwrap_or_default();
                let mut start = BytesStart::new(name);
                for attr in self.attributes(id) {
                    start.push_attribute((attr.name.as_str(), attr.value.as_str()));
                }

                if self.children(id).next().is_none() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for child in self.children(id) {
                        self.write_node(writer, child)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(name)))?;
                }
            }
            Some(NodeKind::Text) => {
                let value = self.value(id).unwrap_or_default();
                writer.write_event(Event::Text(BytesText::new(value)))?;
            }
            Some(NodeKind::CData) => {
                let value = self.value(id).unwrap_or_default();
                writer.write_event(Event::CData(BytesCData::new(value)))?;
            }
            Some(NodeKind::Comment) => {
                let value = self.value(id).unwrap_or_default();
                writer.write_event(Event::Comment(BytesText::from_escaped(value)))?;
            }
            Some(NodeKind::ProcessingInstruction) => {
                let value = self.value(id).unwrap_or_default();
                writer.write_event(Event::PI(BytesPI::new(value)))?;
            }
            Some(NodeKind::DocType) => {
                let value = self.value(id).unwrap_or_default();
                writer.write_event(Event::DocType(BytesText::from_escaped(value)))?;
            }
            Some(NodeKind::Document) => {
                for child in self.children(id) {
                    self.write_node(writer, child)?;
                }
            }
            None => {}
        }
        Ok(())
    }
}
