//! ZIP container abstraction for OpenDocument packages.

use crate::error::{Error, Result};
use crate::options::{Compression, SaveOptions};
use crate::tags;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Counters reported by [`OdfContainer::write_replacing`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Entries copied verbatim from the original archive
    pub copied: usize,
    /// Entries dropped because the options skip them
    pub skipped: usize,
    /// Size of the replaced entry, uncompressed
    pub replaced_bytes: usize,
}

/// OpenDocument container over a ZIP archive held in memory.
///
/// Provides methods to read XML parts and binary entries, and to stream the
/// archive into a new one with a single entry replaced.
pub struct OdfContainer {
    archive: RefCell<ZipArchive<Cursor<Vec<u8>>>>,
}

impl OdfContainer {
    /// Open a container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use odtkit::container::OdfContainer;
    ///
    /// let container = OdfContainer::open("document.odt")?;
    /// println!("{} entries", container.list_files().len());
    /// # Ok::<(), odtkit::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::OpenArchive(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| Error::OpenArchive(e.to_string()))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::OpenArchive(e.to_string()))?;
        Self::from_bytes(data)
    }

    /// Read an XML entry as a string (UTF-8, a leading BOM is dropped).
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let bytes = self.read_binary(name)?;
        decode_xml_bytes(&bytes).map_err(|e| Error::ReadEntry(format!("{}: {}", name, e)))
    }

    /// Read an entry as raw bytes.
    pub fn read_binary(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(name)
            .map_err(|e| Error::ReadEntry(format!("{}: {}", name, e)))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::ReadEntry(format!("{}: {}", name, e)))?;
        Ok(data)
    }

    /// Check if an entry exists in the archive.
    pub fn exists(&self, name: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == name);
        found
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.archive.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// List all entries, in archive order.
    pub fn list_files(&self) -> Vec<String> {
        let mut archive = self.archive.borrow_mut();
        (0..archive.len())
            .filter_map(|i| archive.by_index_raw(i).ok().map(|f| f.name().to_string()))
            .collect()
    }

    /// List entries matching a prefix.
    pub fn list_files_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.list_files()
            .into_iter()
            .filter(|n| n.starts_with(prefix))
            .collect()
    }

    /// Package MIME type from the `mimetype` entry, if present.
    pub fn mimetype(&self) -> Option<String> {
        self.read_binary(tags::MIMETYPE_ENTRY)
            .ok()
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
    }

    /// Stream this archive into `writer`, replacing entry `name` with `content`.
    ///
    /// Entries keep their original order; untouched ones are copied raw, so
    /// their compressed bytes are identical to the source. When the source
    /// lacks `name` it is appended last. Entries listed in
    /// [`SaveOptions::skipped_entries`] are dropped.
    pub fn write_replacing<W: Write + Seek>(
        &self,
        writer: W,
        name: &str,
        content: &[u8],
        options: &SaveOptions,
    ) -> Result<(W, RewriteStats)> {
        let mut zip = ZipWriter::new(writer);
        let mut stats = RewriteStats::default();
        let mut replaced = false;
        let mut archive = self.archive.borrow_mut();

        for i in 0..archive.len() {
            let file = archive
                .by_index_raw(i)
                .map_err(|e| Error::ReadEntry(format!("entry #{}: {}", i, e)))?;
            let entry_name = file.name().to_string();

            if entry_name == name {
                drop(file);
                write_entry(&mut zip, name, content, options)?;
                replaced = true;
            } else if options.skips(&entry_name) {
                stats.skipped += 1;
            } else {
                zip.raw_copy_file(file)
                    .map_err(|e| Error::WriteEntry(format!("{}: {}", entry_name, e)))?;
                stats.copied += 1;
            }
        }

        if !replaced {
            write_entry(&mut zip, name, content, options)?;
        }
        stats.replaced_bytes = content.len();

        let writer = zip
            .finish()
            .map_err(|e| Error::WriteEntry(format!("finishing archive: {}", e)))?;
        Ok((writer, stats))
    }
}

fn write_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    content: &[u8],
    options: &SaveOptions,
) -> Result<()> {
    let level = match options.compression {
        Compression::Stored => None,
        Compression::Deflated => options.compression_level,
    };
    let file_options = SimpleFileOptions::default()
        .compression_method(options.compression.method())
        .compression_level(level);
    zip.start_file(name, file_options)
        .map_err(|e| Error::WriteEntry(format!("{}: {}", name, e)))?;
    zip.write_all(content)
        .map_err(|e| Error::WriteEntry(format!("{}: {}", name, e)))?;
    Ok(())
}

/// Decode an XML entry. OpenDocument parts are always UTF-8.
pub fn decode_xml_bytes(bytes: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).map(str::to_string)
}

impl std::fmt::Debug for OdfContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdfContainer")
            .field("files", &self.len())
            .finish()
    }
}
