//! End-to-end tests over real ODT packages written to a temp directory.
//!
//! Run with: cargo test --test document

use odtkit::render::{outline, Block};
use odtkit::{Document, Error, OdfContainer, SaveOptions, StyleFamily};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" office:version="1.2">
  <office:automatic-styles>
    <style:style style:name="P1" style:family="paragraph" style:parent-style-name="RegPar"/>
  </office:automatic-styles>
  <office:body>
    <office:text>
      <text:p text:style-name="P1"><text:span text:style-name="RegText">Fish &amp; chips</text:span></text:p>
      <text:p text:style-name="P1">Second <text:span>line</text:span></text:p>
      <!-- generated -->
      <text:p/>
    </office:text>
  </office:body>
</office:document-content>"#;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.odt");
        fs::write(&path, package(CONTENT)).unwrap();
        Self { _dir: dir, path }
    }

    fn sibling(&self, name: &str) -> PathBuf {
        self.path.with_file_name(name)
    }
}

fn package(content: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(odtkit::tags::MIME_TEXT.as_bytes()).unwrap();
    zip.start_file("content.xml", deflated).unwrap();
    zip.write_all(content.as_bytes()).unwrap();
    zip.start_file("styles.xml", deflated).unwrap();
    zip.write_all(b"<office:document-styles/>").unwrap();
    zip.add_directory("media/", stored).unwrap();
    zip.start_file("media/logo.png", stored).unwrap();
    zip.write_all(&[0x89, b'P', b'N', b'G', 0, 1, 2, 3]).unwrap();
    zip.start_file("META-INF/manifest.xml", deflated).unwrap();
    zip.write_all(b"<manifest:manifest/>").unwrap();
    zip.finish().unwrap().into_inner()
}

/// Compressed bytes and method of an entry, as stored in the archive.
fn raw_entry(path: &Path, name: &str) -> (CompressionMethod, Vec<u8>) {
    let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let index = archive.index_for_name(name).unwrap();
    let mut file = archive.by_index_raw(index).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    (file.compression(), data)
}

fn paragraph_count(doc: &mut Document) -> usize {
    let paragraphs = doc.paragraphs();
    let mut n = 0;
    while paragraphs.has_next() {
        n += 1;
        paragraphs.next();
    }
    n
}

#[test]
fn test_unmodified_round_trip() {
    let fixture = Fixture::new();
    let copy = fixture.sibling("copy.odt");

    let doc = Document::from_path(&fixture.path).unwrap();
    doc.save_copy(&copy).unwrap();

    let reopened = Document::from_path(&copy).unwrap();
    assert_eq!(outline(&reopened), outline(&doc));
    assert_eq!(reopened.content_xml().unwrap(), doc.content_xml().unwrap());

    for name in ["mimetype", "styles.xml", "media/logo.png", "META-INF/manifest.xml"] {
        assert_eq!(raw_entry(&copy, name), raw_entry(&fixture.path, name), "{}", name);
    }
    assert_eq!(
        reopened.container_entries().unwrap(),
        vec![
            "mimetype",
            "content.xml",
            "styles.xml",
            "media/logo.png",
            "META-INF/manifest.xml"
        ]
    );
}

#[test]
fn test_text_content_survives_escaping() {
    let fixture = Fixture::new();
    let mut doc = Document::from_path(&fixture.path).unwrap();
    assert_eq!(doc.paragraphs().runs().text(), "Fish & chips");
    assert_eq!(doc.paragraphs().next().text(), "Second line");

    doc.paragraphs().runs().set_text("<b> & \"q\"");
    doc.save().unwrap();

    let mut reopened = Document::from_path(&fixture.path).unwrap();
    assert_eq!(reopened.paragraphs().runs().text(), "<b> & \"q\"");
}

#[test]
fn test_two_by_three_table_survives_save() {
    let fixture = Fixture::new();
    let mut doc = Document::from_path(&fixture.path).unwrap();

    let table = doc.add_table("Table1").unwrap();
    table.add_column(["Co1", "Co2", "Co3"]).unwrap();
    for r in 0..2 {
        let row = table.add_row("Row1").unwrap();
        for c in 0..3 {
            row.add_cell("Cell1")
                .unwrap()
                .add_paragraph(&format!("r{}c{}", r, c))
                .unwrap();
        }
    }
    doc.save().unwrap();

    let mut reopened = Document::from_path(&fixture.path).unwrap();
    let tables = reopened.tables();
    assert!(tables.has_next());
    assert_eq!(tables.style_name().as_deref(), Some("Table1"));

    let rows = tables.rows();
    let mut grid = Vec::new();
    while rows.has_next() {
        let cells = rows.cells();
        let mut line = Vec::new();
        while cells.has_next() {
            line.push(cells.paragraphs().text());
            cells.next();
        }
        grid.push(line);
        rows.next();
    }
    assert_eq!(
        grid,
        vec![vec!["r0c0", "r0c1", "r0c2"], vec!["r1c0", "r1c1", "r1c2"]]
    );
    assert!(!reopened.tables().next().has_next());
}

#[test]
fn test_delete_par_changes_count_by_one() {
    let fixture = Fixture::new();
    let mut doc = Document::from_path(&fixture.path).unwrap();
    let before = paragraph_count(&mut doc);

    let paragraphs = doc.paragraphs();
    paragraphs.next();
    assert!(paragraphs.delete_par());

    assert_eq!(before - paragraph_count(&mut doc), 1);
}

#[test]
fn test_insert_after_and_continue_iterating() {
    let fixture = Fixture::new();
    let mut doc = Document::from_path(&fixture.path).unwrap();

    let mut inserted = doc
        .paragraphs()
        .insert_paragraph_after_with_style("inserted", "P7")
        .unwrap();
    inserted.next();
    assert_eq!(inserted.text(), "Second line");

    let texts: Vec<String> = outline(&doc)
        .paragraphs()
        .map(|p| p.text.clone())
        .collect();
    assert_eq!(texts, vec!["Fish & chips", "inserted", "Second line", ""]);
}

#[test]
fn test_united_cell_layout() {
    let fixture = Fixture::new();
    let mut doc = Document::from_path(&fixture.path).unwrap();
    let row = doc.add_table("T").unwrap().add_row("R").unwrap();

    let cell = row.add_united_cell("C", "P1", 3, 2).unwrap();
    assert_eq!(cell.columns_spanned(), 3);
    assert_eq!(cell.rows_spanned(), 2);
    assert!(matches!(
        row.add_united_cell("C", "P1", 0, 1),
        Err(Error::InvalidArgument(_))
    ));

    let xml = doc.content_xml().unwrap();
    assert_eq!(xml.matches("<table:covered-table-cell/>").count(), 2);
    assert!(xml.contains(r#"table:number-columns-spanned="3""#));
    assert!(xml.contains(r#"table:number-rows-spanned="2""#));
}

#[test]
fn test_add_run_style_and_image() {
    let fixture = Fixture::new();
    let mut doc = Document::from_path(&fixture.path).unwrap();

    let bold = doc
        .styles()
        .add_style("Bold", StyleFamily::Run, &[("fo:font-weight", "bold")])
        .unwrap();
    assert_eq!(bold.family(), Some(StyleFamily::Run));

    let paragraph = doc.add_paragraph("P1").unwrap();
    let run = paragraph.add_run_with_style("Hello", "Bold").unwrap();
    assert_eq!(run.text(), "Hello");
    paragraph.add_image("logo.png", Some("1in"), None).unwrap();
    doc.save().unwrap();

    let mut reopened = Document::from_path(&fixture.path).unwrap();
    let styles = reopened.styles();
    styles.next();
    assert_eq!(styles.name().as_deref(), Some("Bold"));
    assert_eq!(styles.parent_style_name().as_deref(), Some("RegParText"));
    assert_eq!(styles.property("fo:font-weight").as_deref(), Some("bold"));

    let xml = reopened.content_xml().unwrap();
    assert!(xml.contains(r#"xlink:href="media/logo.png""#));
    assert!(xml.contains(r#"svg:height="1in""#));

    let last = outline(&reopened).body.pop().unwrap();
    match last {
        Block::Paragraph(p) => assert_eq!(p.runs[0].style.as_deref(), Some("Bold")),
        Block::Table(_) => panic!("expected the appended paragraph"),
    }
}

#[test]
fn test_media_placeholder_is_dropped_by_default() {
    let fixture = Fixture::new();
    let doc = Document::from_path(&fixture.path).unwrap();
    doc.save().unwrap();

    let container = OdfContainer::open(&fixture.path).unwrap();
    assert!(!container.exists("media/"));
    assert!(container.exists("media/logo.png"));

    let kept = fixture.sibling("kept.odt");
    let doc = Document::from_path(&fixture.path)
        .unwrap()
        .with_save_options(SaveOptions::new().skip_entry("styles.xml"));
    doc.save_copy(&kept).unwrap();
    assert!(!OdfContainer::open(&kept).unwrap().exists("styles.xml"));
}

#[test]
fn test_failed_save_leaves_original() {
    let fixture = Fixture::new();
    let before = fs::read(&fixture.path).unwrap();

    let mut doc = Document::from_path(&fixture.path).unwrap();
    doc.add_paragraph("P1").unwrap().add_run("lost").unwrap();
    let missing_dir = fixture.sibling("no-such-dir").join("out.odt");
    assert!(matches!(
        doc.save_copy(&missing_dir),
        Err(Error::OpenArchive(_))
    ));

    assert_eq!(fs::read(&fixture.path).unwrap(), before);
}

#[test]
fn test_broken_content_is_xml_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.odt");
    fs::write(&path, package("<office:document-content><office:body>")).unwrap();

    let mut doc = Document::new(&path);
    assert!(matches!(doc.open(), Err(Error::XmlParse(_))));
    assert!(!doc.is_open());
}
