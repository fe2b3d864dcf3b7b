//! JSON renderer implementation.

use super::outline::DocumentOutline;
use crate::error::{Error, Result};

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(outline),
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
    };
    json.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}

/// Convert an outline to pretty-printed JSON.
pub fn to_json_default(outline: &DocumentOutline) -> Result<String> {
    to_json(outline, JsonFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::outline::{Block, ParagraphOutline, RunOutline};

    fn sample() -> DocumentOutline {
        DocumentOutline {
            body: vec![Block::Paragraph(ParagraphOutline {
                style: Some("P1".to_string()),
                runs: vec![RunOutline {
                    style: None,
                    text: "Hello".to_string(),
                }],
                text: "Hello".to_string(),
            })],
            styles: Vec::new(),
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"paragraph\""));
        assert!(json.contains("\"text\": \"Hello\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"style\":\"P1\""));
    }

    #[test]
    fn test_outline_roundtrip() {
        let outline = sample();
        let json = to_json_default(&outline).unwrap();
        let parsed: DocumentOutline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outline);
    }
}
