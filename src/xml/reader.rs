//! Building an [`XmlTree`] from text with the `quick-xml` pull parser.

use super::tree::{Declaration, NodeId, NodeKind, XmlTree};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

impl XmlTree {
    /// Parse a complete XML document.
    ///
    /// All text is kept, whitespace included, except whitespace between
    /// top-level nodes (outside the root element).
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut tree = XmlTree::new();
        let mut stack: Vec<NodeId> = vec![tree.document()];

        loop {
            let parent = *stack
                .last()
                .ok_or_else(|| Error::XmlParse("unbalanced end tag".to_string()))?;

            match reader.read_event()? {
                Event::Decl(decl) => {
                    tree.set_declaration(Some(read_declaration(&decl)?));
                }
                Event::Start(e) => {
                    let id = push_element(&mut tree, parent, &e)?;
                    stack.push(id);
                }
                Event::Empty(e) => {
                    push_element(&mut tree, parent, &e)?;
                }
                Event::End(_) => {
                    if stack.len() <= 1 {
                        return Err(Error::XmlParse("unexpected end tag".to_string()));
                    }
                    stack.pop();
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(quick_xml::Error::from)?;
                    if parent == tree.document() && text.trim().is_empty() {
                        continue;
                    }
                    tree.append_node_of(parent, NodeKind::Text, text.into_owned());
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    tree.append_node_of(parent, NodeKind::CData, text);
                }
                Event::Comment(e) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    tree.append_node_of(parent, NodeKind::Comment, raw);
                }
                Event::PI(e) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    tree.append_node_of(parent, NodeKind::ProcessingInstruction, raw);
                }
                Event::DocType(e) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    tree.append_node_of(parent, NodeKind::DocType, raw);
                }
                Event::Eof => break,
            }
        }

        if stack.len() != 1 {
            return Err(Error::XmlParse(format!(
                "{} element(s) left unclosed",
                stack.len() - 1
            )));
        }
        if tree.root_element().is_none() {
            return Err(Error::XmlParse("document has no root element".to_string()));
        }

        Ok(tree)
    }

    /// Parse raw bytes, which must be UTF-8 (an initial BOM is skipped).
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let xml = std::str::from_utf8(bytes)
            .map_err(|e| Error::XmlParse(format!("invalid UTF-8: {}", e)))?;
        Self::parse(xml)
    }
}

fn push_element(tree: &mut XmlTree, parent: NodeId, e: &BytesStart<'_>) -> Result<NodeId> {
    let name = utf8(e.name().as_ref())?;
    let id = tree.append_node_of(parent, NodeKind::Element, name);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        tree.push_attribute(id, key, value);
    }
    Ok(id)
}

fn read_declaration(decl: &BytesDecl<'_>) -> Result<Declaration> {
    let version = utf8(&decl.version().map_err(quick_xml::Error::from)?)?;
    let encoding = decl
        .encoding()
        .transpose()
        .map_err(quick_xml::Error::from)?
        .map(|e| utf8(&e))
        .transpose()?;
    let standalone = decl
        .standalone()
        .transpose()
        .map_err(quick_xml::Error::from)?
        .map(|s| utf8(&s))
        .transpose()?;
    Ok(Declaration {
        version,
        encoding,
        standalone,
    })
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::XmlParse(format!("invalid UTF-8 in name: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
  <office:body>
    <office:text>
      <text:p text:style-name="P1">Fish &amp; <text:span>chips</text:span></text:p>
      <!-- a note -->
      <text:p/>
    </office:text>
  </office:body>
</office:document-content>"#;

    #[test]
    fn test_parse_structure() {
        let tree = XmlTree::parse(SAMPLE).unwrap();
        let body = tree
            .path(&["office:document-content", "office:body", "office:text"])
            .unwrap();
        assert_eq!(tree.count_children(body, "text:p"), 2);

        let p = tree.child(body, "text:p").unwrap();
        assert_eq!(tree.attribute(p, "text:style-name"), Some("P1"));
        assert_eq!(tree.text(p), "Fish & ");
        assert_eq!(tree.descendant_text(p), "Fish & chips");

        let decl = tree.declaration().unwrap();
        assert_eq!(decl.version, "1.0");
        assert_eq!(decl.encoding.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn test_parse_keeps_comments() {
        let tree = XmlTree::parse(SAMPLE).unwrap();
        let body = tree
            .path(&["office:document-content", "office:body", "office:text"])
            .unwrap();
        let comments = tree
            .children(body)
            .filter(|&id| tree.kind(id) == Some(NodeKind::Comment))
            .count();
        assert_eq!(comments, 1);
    }

    #[test]
    fn test_parse_rejects_unclosed() {
        let err = XmlTree::parse("<a><b></b>").unwrap_err();
        assert!(matches!(err, Error::XmlParse(_)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(XmlTree::parse("   ").is_err());
    }

    #[test]
    fn test_parse_bytes_skips_bom() {
        let tree = XmlTree::parse_bytes(b"\xEF\xBB\xBF<root/>").unwrap();
        let root = tree.root_element().unwrap();
        assert_eq!(tree.name(root), Some("root"));
    }
}
