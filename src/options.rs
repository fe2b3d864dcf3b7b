//! Save configuration.

use crate::tags;

/// Compression applied to the rewritten content entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Store the entry uncompressed
    Stored,
    /// Deflate the entry
    #[default]
    Deflated,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Stored => zip::CompressionMethod::Stored,
            Compression::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

/// Options used when a [`Document`](crate::Document) writes its archive.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Compression for the serialized content entry
    pub compression: Compression,

    /// Deflate level (`None` uses the zip default)
    pub compression_level: Option<i64>,

    /// Entries of the original archive that are not carried over
    pub skipped_entries: Vec<String>,

    /// File name prefix of the temporary archive
    pub temp_prefix: String,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            compression: Compression::Deflated,
            compression_level: None,
            skipped_entries: vec![tags::MEDIA_DIR_ENTRY.to_string()],
            temp_prefix: ".odtkit-".to_string(),
        }
    }
}

impl SaveOptions {
    /// Create default save options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression for the content entry.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the deflate level.
    pub fn with_compression_level(mut self, level: Option<i64>) -> Self {
        self.compression_level = level;
        self
    }

    /// Drop an additional entry when saving.
    pub fn skip_entry(mut self, name: impl Into<String>) -> Self {
        self.skipped_entries.push(name.into());
        self
    }

    /// Carry every entry over, including the media placeholder.
    pub fn keep_all_entries(mut self) -> Self {
        self.skipped_entries.clear();
        self
    }

    /// Set the temp file prefix.
    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Whether `name` is dropped during a save.
    pub fn skips(&self, name: &str) -> bool {
        self.skipped_entries.iter().any(|s| s == name)
    }
}
