//! Top-level document: loads `content.xml`, hands out views, writes it back.

use crate::container::{OdfContainer, RewriteStats};
use crate::detect::FormatType;
use crate::error::{Error, Result};
use crate::model::cursor::{append, set_attr};
use crate::model::{Paragraph, Style, Table};
use crate::options::SaveOptions;
use crate::tags;
use crate::xml::{share, NodeId, SharedTree, XmlTree};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An OpenDocument Text file opened for reading and editing.
///
/// The document owns the parsed `content.xml` tree and one paragraph, table
/// and style view. The accessors re-root those views on every call, so they
/// always reflect the tree after earlier mutations.
///
/// # Example
///
/// ```no_run
/// use odtkit::Document;
///
/// let mut doc = Document::from_path("report.odt")?;
/// let paragraphs = doc.paragraphs();
/// while paragraphs.has_next() {
///     println!("{}", paragraphs.text());
///     paragraphs.next();
/// }
/// doc.add_paragraph("P1")?.add_run("Appended")?;
/// doc.save()?;
/// # Ok::<(), odtkit::Error>(())
/// ```
pub struct Document {
    path: PathBuf,
    tree: SharedTree,
    opened: bool,
    paragraph: Paragraph,
    table: Table,
    style: Style,
    save_options: SaveOptions,
}

impl Default for Document {
    fn default() -> Self {
        Self::with_tree(PathBuf::new(), share(XmlTree::new()))
    }
}

impl Document {
    /// Create a document bound to `path`. Nothing is read until [`open`](Self::open).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_tree(path.as_ref().to_path_buf(), share(XmlTree::new()))
    }

    /// Create a document for `path` and open it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut document = Self::new(path);
        document.open()?;
        Ok(document)
    }

    fn with_tree(path: PathBuf, tree: SharedTree) -> Self {
        Self {
            path,
            paragraph: Paragraph::new(tree.clone()),
            table: Table::new(tree.clone()),
            style: Style::new(tree.clone()),
            tree,
            opened: false,
            save_options: SaveOptions::default(),
        }
    }

    /// Use `options` for subsequent saves.
    pub fn with_save_options(mut self, options: SaveOptions) -> Self {
        self.save_options = options;
        self
    }

    pub fn save_options(&self) -> &SaveOptions {
        &self.save_options
    }

    pub fn save_options_mut(&mut self) -> &mut SaveOptions {
        &mut self.save_options
    }

    /// Point the document at another file. Takes effect on the next open or save.
    pub fn set_path(&mut self, path: impl AsRef<Path>) {
        self.path = path.as_ref().to_path_buf();
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`open`](Self::open) has succeeded at least once.
    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// The shared tree behind every view.
    pub fn tree(&self) -> &SharedTree {
        &self.tree
    }

    /// Read and parse `content.xml` from the archive at [`path`](Self::path).
    ///
    /// On success the previous tree is replaced; views obtained earlier keep
    /// pointing into the old one. On failure the document is left unchanged.
    pub fn open(&mut self) -> Result<()> {
        let container = OdfContainer::open(&self.path)?;
        check_mimetype(&container, &self.path);

        let xml = container.read_xml(tags::CONTENT_ENTRY)?;
        let tree = XmlTree::parse(&xml)?;
        debug!(
            path = %self.path.display(),
            entries = container.len(),
            nodes = tree.node_count(),
            "opened document"
        );

        let path = std::mem::take(&mut self.path);
        let save_options = std::mem::take(&mut self.save_options);
        *self = Self::with_tree(path, share(tree));
        self.save_options = save_options;
        self.opened = true;

        let body = self.body();
        self.paragraph.set_parent(body);
        Ok(())
    }

    /// `office:text` inside `office:document-content/office:body`.
    pub fn body(&self) -> Option<NodeId> {
        self.tree
            .borrow()
            .path(&[tags::DOCUMENT_CONTENT, tags::BODY, tags::TEXT_BODY])
    }

    /// `office:automatic-styles` under the document root.
    pub fn automatic_styles(&self) -> Option<NodeId> {
        self.tree
            .borrow()
            .path(&[tags::DOCUMENT_CONTENT, tags::AUTOMATIC_STYLES])
    }

    /// Paragraph view positioned at the first paragraph of the body.
    pub fn paragraphs(&mut self) -> &mut Paragraph {
        let body = self.body();
        self.paragraph.set_parent(body);
        &mut self.paragraph
    }

    /// Table view positioned at the first table of the body.
    pub fn tables(&mut self) -> &mut Table {
        let body = self.body();
        self.table.set_parent(body);
        &mut self.table
    }

    /// Style view positioned at the first automatic style.
    pub fn styles(&mut self) -> &mut Style {
        let styles = self.automatic_styles();
        self.style.set_parent(styles);
        &mut self.style
    }

    /// Append a table styled `stylename` to the end of the body.
    pub fn add_table(&mut self, stylename: &str) -> Result<Table> {
        let (body, table) = self.append_to_body(tags::TABLE, tags::TABLE_STYLE_NAME, stylename)?;
        Ok(Table::bound(self.tree.clone(), body, table))
    }

    /// Append an empty paragraph styled `stylename` to the end of the body.
    pub fn add_paragraph(&mut self, stylename: &str) -> Result<Paragraph> {
        let (body, paragraph) =
            self.append_to_body(tags::PARAGRAPH, tags::TEXT_STYLE_NAME, stylename)?;
        Ok(Paragraph::bound(self.tree.clone(), body, paragraph))
    }

    fn append_to_body(
        &mut self,
        tag: &str,
        style_attribute: &str,
        stylename: &str,
    ) -> Result<(NodeId, NodeId)> {
        let body = self
            .body()
            .ok_or_else(|| Error::MissingElement(format!("no <{}> in document", tags::TEXT_BODY)))?;
        let mut tree = self.tree.borrow_mut();
        let node = append(&mut tree, body, tag)?;
        set_attr(&mut tree, node, style_attribute, stylename)?;
        Ok((body, node))
    }

    /// Serialize the current tree.
    pub fn content_xml(&self) -> Result<String> {
        self.tree.borrow().to_xml_string()
    }

    /// Entry names of the archive on disk, in archive order.
    pub fn container_entries(&self) -> Result<Vec<String>> {
        Ok(OdfContainer::open(&self.path)?.list_files())
    }

    /// Write the document back over its own file.
    ///
    /// The new archive is built in a temporary file next to the target and
    /// renamed over it once complete; any failure leaves the original intact.
    /// The file keeps its permissions.
    pub fn save(&self) -> Result<()> {
        self.write_to(&self.path)
    }

    /// Write the document to `new_path`, leaving the original file untouched.
    pub fn save_copy(&self, new_path: impl AsRef<Path>) -> Result<()> {
        self.write_to(new_path.as_ref())
    }

    fn write_to(&self, target: &Path) -> Result<()> {
        if !self.opened {
            return Err(Error::NotOpened);
        }

        let content = self.tree.borrow().to_xml_bytes()?;
        let source = OdfContainer::open(&self.path)?;

        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(&self.save_options.temp_prefix)
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| Error::OpenArchive(format!("temporary archive in {}: {}", dir.display(), e)))?;

        let (temp, stats) =
            source.write_replacing(temp, tags::CONTENT_ENTRY, &content, &self.save_options)?;
        if let Some(permissions) = self.target_permissions(target) {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|e| Error::WriteEntry(format!("copying file permissions: {}", e)))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::WriteEntry(format!("flushing temporary archive: {}", e)))?;
        temp.persist(target)
            .map_err(|e| Error::Rename(format!("{}: {}", target.display(), e.error)))?;

        log_saved(target, &stats);
        Ok(())
    }

    /// Permissions the saved file should carry: those of the file being
    /// replaced, or of the source document when writing a new file.
    fn target_permissions(&self, target: &Path) -> Option<fs::Permissions> {
        fs::metadata(target)
            .or_else(|_| fs::metadata(&self.path))
            .map(|metadata| metadata.permissions())
            .ok()
    }
}

fn check_mimetype(container: &OdfContainer, path: &Path) {
    match container.mimetype() {
        Some(mimetype) => match FormatType::from_mimetype(&mimetype) {
            Some(format) if format.is_text() => {}
            Some(format) => warn!(path = %path.display(), %format, "package is not a text document"),
            None => warn!(path = %path.display(), %mimetype, "unknown package mimetype"),
        },
        None => warn!(path = %path.display(), "package has no mimetype entry"),
    }
}

fn log_saved(target: &Path, stats: &RewriteStats) {
    debug!(
        target = %target.display(),
        content_bytes = stats.replaced_bytes,
        copied = stats.copied,
        skipped = stats.skipped,
        "saved document"
    );
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("opened", &self.opened)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    const CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"><office:automatic-styles/><office:body><office:text><text:p text:style-name="P1"><text:span>first</text:span></text:p><text:p>second</text:p></office:text></office:body></office:document-content>"#;

    fn write_package(path: &Path) {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("mimetype", stored).unwrap();
        zip.write_all(tags::MIME_TEXT.as_bytes()).unwrap();
        zip.start_file("content.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(CONTENT.as_bytes()).unwrap();
        zip.start_file("styles.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<office:document-styles/>").unwrap();
        std::fs::write(path, zip.finish().unwrap().into_inner()).unwrap();
    }

    #[test]
    fn test_unopened_document() {
        let mut doc = Document::new("missing.odt");
        assert!(!doc.is_open());
        assert!(!doc.paragraphs().has_next());
        assert!(matches!(doc.save(), Err(Error::NotOpened)));
        assert!(matches!(doc.add_paragraph("P1"), Err(Error::MissingElement(_))));
        assert!(matches!(doc.open(), Err(Error::OpenArchive(_))));
    }

    #[test]
    fn test_open_positions_paragraphs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        write_package(&path);

        let mut doc = Document::from_path(&path).unwrap();
        assert!(doc.is_open());
        let paragraphs = doc.paragraphs();
        assert_eq!(paragraphs.text(), "first");
        paragraphs.next();
        assert_eq!(paragraphs.text(), "second");
        assert!(!doc.tables().has_next());
        assert!(!doc.styles().has_next());
        assert!(doc.styles().parent().is_some());
    }

    #[test]
    fn test_accessors_see_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        write_package(&path);
        let mut doc = Document::from_path(&path).unwrap();

        doc.add_paragraph("P2").unwrap().add_run("third").unwrap();
        doc.add_table("T1").unwrap();

        let paragraphs = doc.paragraphs();
        let mut texts = Vec::new();
        while paragraphs.has_next() {
            texts.push(paragraphs.text());
            paragraphs.next();
        }
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(doc.tables().style_name().as_deref(), Some("T1"));
    }

    #[test]
    fn test_save_copy_leaves_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        let copy = dir.path().join("copy.odt");
        write_package(&path);
        let before = std::fs::read(&path).unwrap();

        let mut doc = Document::from_path(&path).unwrap();
        doc.paragraphs().delete_par();
        doc.save_copy(&copy).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
        let mut reopened = Document::from_path(&copy).unwrap();
        assert_eq!(reopened.paragraphs().text(), "second");
        assert_eq!(
            reopened.container_entries().unwrap(),
            vec!["mimetype", "content.xml", "styles.xml"]
        );
    }

    #[test]
    fn test_save_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        write_package(&path);

        let mut doc = Document::from_path(&path).unwrap();
        doc.paragraphs().set_style("Changed").unwrap();
        doc.save().unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());

        let mut reopened = Document::from_path(&path).unwrap();
        assert_eq!(reopened.paragraphs().style_name().as_deref(), Some("Changed"));
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        write_package(&path);
        let mut doc = Document::from_path(&path).unwrap();
        doc.add_table("T1").unwrap();

        let first = doc.paragraphs().node();
        assert!(first.is_some());
        assert_eq!(doc.paragraphs().node(), first);

        let table = doc.tables().node();
        assert!(table.is_some());
        assert_eq!(doc.tables().node(), table);
    }

    #[test]
    fn test_added_elements_carry_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        write_package(&path);
        let mut doc = Document::from_path(&path).unwrap();

        assert_eq!(doc.add_paragraph("P5").unwrap().style_name().as_deref(), Some("P5"));
        assert_eq!(doc.add_table("T5").unwrap().style_name().as_deref(), Some("T5"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        let copy = dir.path().join("copy.odt");
        write_package(&path);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let doc = Document::from_path(&path).unwrap();
        doc.save().unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        doc.save_copy(&copy).unwrap();
        let mode = std::fs::metadata(&copy).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_reopen_keeps_options_and_detaches_old_views() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.odt");
        write_package(&path);

        let mut doc = Document::new(&path).with_save_options(SaveOptions::new().keep_all_entries());
        doc.open().unwrap();
        let old = doc.paragraphs().clone();
        doc.open().unwrap();

        assert!(doc.save_options().skipped_entries.is_empty());
        assert_eq!(old.text(), "first");
        old.set_style("Detached").unwrap();
        assert_eq!(doc.paragraphs().style_name().as_deref(), Some("P1"));
    }
}
