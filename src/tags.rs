//! Tag, attribute and part names of the OpenDocument Text format.
//!
//! These strings are part of the on-disk format and must match exactly for
//! consuming applications to read the document.

/// MIME type for OpenDocument Text (.odt)
pub const MIME_TEXT: &str = "application/vnd.oasis.opendocument.text";

/// MIME type for OpenDocument Text Template (.ott)
pub const MIME_TEXT_TEMPLATE: &str = "application/vnd.oasis.opendocument.text-template";

/// MIME type for OpenDocument Spreadsheet (.ods)
pub const MIME_SPREADSHEET: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// MIME type for OpenDocument Presentation (.odp)
pub const MIME_PRESENTATION: &str = "application/vnd.oasis.opendocument.presentation";

/// MIME type for OpenDocument Drawing (.odg)
pub const MIME_GRAPHICS: &str = "application/vnd.oasis.opendocument.graphics";

// Package parts

/// Entry holding the document body and automatic styles.
pub const CONTENT_ENTRY: &str = "content.xml";
/// Entry holding the package MIME type.
pub const MIMETYPE_ENTRY: &str = "mimetype";
/// Directory placeholder entry dropped on save.
pub const MEDIA_DIR_ENTRY: &str = "media/";
/// Prefix joined with an image name to form its `xlink:href`.
pub const MEDIA_PREFIX: &str = "media/";

// Document skeleton

pub const DOCUMENT_CONTENT: &str = "office:document-content";
pub const BODY: &str = "office:body";
pub const TEXT_BODY: &str = "office:text";
pub const AUTOMATIC_STYLES: &str = "office:automatic-styles";

// Text

pub const PARAGRAPH: &str = "text:p";
pub const SPAN: &str = "text:span";
pub const TEXT_STYLE_NAME: &str = "text:style-name";
pub const ANCHOR_TYPE: &str = "text:anchor-type";

// Tables

pub const TABLE: &str = "table:table";
pub const TABLE_ROW: &str = "table:table-row";
pub const TABLE_CELL: &str = "table:table-cell";
pub const COVERED_CELL: &str = "table:covered-table-cell";
pub const TABLE_COLUMNS: &str = "table:table-columns";
pub const TABLE_COLUMN: &str = "table:table-column";
pub const TABLE_STYLE_NAME: &str = "table:style-name";
pub const COLUMNS_SPANNED: &str = "table:number-columns-spanned";
pub const ROWS_SPANNED: &str = "table:number-rows-spanned";

/// Children of a table that must come after the column definitions.
pub const ROW_LEVEL_TAGS: [&str; 4] = [
    TABLE_ROW,
    "table:table-header-rows",
    "table:table-rows",
    "table:table-row-group",
];

// Drawing

pub const FRAME: &str = "draw:frame";
pub const IMAGE: &str = "draw:image";
pub const SVG_WIDTH: &str = "svg:width";
pub const SVG_HEIGHT: &str = "svg:height";
pub const REL_WIDTH: &str = "style:rel-width";
pub const REL_HEIGHT: &str = "style:rel-height";
pub const XLINK_HREF: &str = "xlink:href";
pub const XLINK_TYPE: &str = "xlink:type";
pub const XLINK_SHOW: &str = "xlink:show";
pub const XLINK_ACTUATE: &str = "xlink:actuate";

/// Frame width used when `add_image` gets no size.
pub const DEFAULT_FRAME_WIDTH: &str = "2.70833in";
/// Frame height used when `add_image` gets no size.
pub const DEFAULT_FRAME_HEIGHT: &str = "1.35833in";

// Styles

pub const STYLE: &str = "style:style";
pub const STYLE_NAME: &str = "style:name";
pub const STYLE_FAMILY: &str = "style:family";
pub const STYLE_PARENT: &str = "style:parent-style-name";

/// Style given to runs created without an explicit style.
pub const DEFAULT_RUN_STYLE: &str = "RegText";
/// Style given to paragraphs inserted without an explicit style.
pub const DEFAULT_PARAGRAPH_STYLE: &str = "P1";
/// Parent of generated paragraph styles.
pub const PARAGRAPH_PARENT_STYLE: &str = "RegPar";
/// Parent of generated text (run) styles.
pub const RUN_PARENT_STYLE: &str = "RegParText";
