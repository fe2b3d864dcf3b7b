//! Format detection for OpenDocument packages.

use crate::error::{Error, Result};
use crate::tags;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Manifest listing the package media type when `mimetype` is absent.
const MANIFEST_ENTRY: &str = "META-INF/manifest.xml";

/// Detected OpenDocument format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// OpenDocument Text (.odt)
    Text,
    /// OpenDocument Text Template (.ott)
    TextTemplate,
    /// OpenDocument Spreadsheet (.ods)
    Spreadsheet,
    /// OpenDocument Presentation (.odp)
    Presentation,
    /// OpenDocument Drawing (.odg)
    Graphics,
}

impl FormatType {
    /// Map a package MIME type to a format.
    pub fn from_mimetype(mimetype: &str) -> Option<Self> {
        match mimetype.trim() {
            tags::MIME_TEXT => Some(FormatType::Text),
            tags::MIME_TEXT_TEMPLATE => Some(FormatType::TextTemplate),
            tags::MIME_SPREADSHEET => Some(FormatType::Spreadsheet),
            tags::MIME_PRESENTATION => Some(FormatType::Presentation),
            tags::MIME_GRAPHICS => Some(FormatType::Graphics),
            _ => None,
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Text => "odt",
            FormatType::TextTemplate => "ott",
            FormatType::Spreadsheet => "ods",
            FormatType::Presentation => "odp",
            FormatType::Graphics => "odg",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Text => "OpenDocument Text",
            FormatType::TextTemplate => "OpenDocument Text Template",
            FormatType::Spreadsheet => "OpenDocument Spreadsheet",
            FormatType::Presentation => "OpenDocument Presentation",
            FormatType::Graphics => "OpenDocument Drawing",
        }
    }

    /// Whether documents of this format carry a text body.
    pub fn is_text(&self) -> bool {
        matches!(self, FormatType::Text | FormatType::TextTemplate)
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the format type from a file path.
///
/// # Example
///
/// ```no_run
/// use odtkit::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("document.odt")?;
/// println!("Detected format: {}", format);
/// # Ok::<(), odtkit::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<FormatType> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    detect_format_from_reader(reader)
}

/// Detect the format type from a byte slice.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if !is_zip_file(data) {
        return Err(Error::UnsupportedFormat("not a ZIP archive".to_string()));
    }

    let cursor = std::io::Cursor::new(data);
    detect_format_from_reader(cursor)
}

/// Detect the format type from a reader.
///
/// Reads the `mimetype` entry, falling back to the root entry of the manifest.
pub fn detect_format_from_reader<R: Read + Seek>(reader: R) -> Result<FormatType> {
    let mut archive =
        zip::ZipArchive::new(reader).map_err(|e| Error::OpenArchive(e.to_string()))?;

    if let Ok(mut file) = archive.by_name(tags::MIMETYPE_ENTRY) {
        let mut mimetype = String::new();
        file.read_to_string(&mut mimetype)
            .map_err(|e| Error::ReadEntry(format!("{}: {}", tags::MIMETYPE_ENTRY, e)))?;
        return FormatType::from_mimetype(&mimetype)
            .ok_or_else(|| Error::UnsupportedFormat(mimetype.trim().to_string()));
    }

    detect_by_manifest(&mut archive)
}

/// Fallback detection by scanning the manifest for a known media type.
fn detect_by_manifest<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> Result<FormatType> {
    let mut manifest = String::new();
    archive
        .by_name(MANIFEST_ENTRY)
        .map_err(|_| Error::UnsupportedFormat("no mimetype or manifest entry".to_string()))?
        .read_to_string(&mut manifest)
        .map_err(|e| Error::ReadEntry(format!("{}: {}", MANIFEST_ENTRY, e)))?;

    [
        tags::MIME_TEXT_TEMPLATE,
        tags::MIME_TEXT,
        tags::MIME_SPREADSHEET,
        tags::MIME_PRESENTATION,
        tags::MIME_GRAPHICS,
    ]
    .into_iter()
    .find(|mime| manifest.contains(&format!("\"{}\"", mime)))
    .and_then(FormatType::from_mimetype)
    .ok_or_else(|| Error::UnsupportedFormat("unknown manifest media type".to_string()))
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn package(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, body) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_format_type_display() {
        assert_eq!(FormatType::Text.to_string(), "OpenDocument Text");
        assert_eq!(FormatType::Spreadsheet.extension(), "ods");
        assert!(FormatType::TextTemplate.is_text());
        assert!(!FormatType::Presentation.is_text());
    }

    #[test]
    fn test_is_zip_file() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B]));
    }

    #[test]
    fn test_detect_invalid_data() {
        let result = detect_format_from_bytes(&[0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_detect_from_mimetype() {
        let data = package(&[("mimetype", tags::MIME_TEXT)]);
        assert_eq!(detect_format_from_bytes(&data).unwrap(), FormatType::Text);

        let data = package(&[("mimetype", "application/zip")]);
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_from_manifest() {
        let manifest = format!(
            r#"<manifest:manifest><manifest:file-entry manifest:full-path="/" manifest:media-type="{}"/></manifest:manifest>"#,
            tags::MIME_SPREADSHEET
        );
        let data = package(&[("META-INF/manifest.xml", &manifest)]);
        assert_eq!(
            detect_format_from_bytes(&data).unwrap(),
            FormatType::Spreadsheet
        );
    }
}
