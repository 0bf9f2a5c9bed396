//! Tagged cell values
//!
//! Exchange workbooks carry every cell as `<tag>:'<content>'`, e.g.
//! `text:'Boiler'` or `number:'2.0'`. Only the content matters downstream.

use thiserror::Error;

/// A raw value that does not follow the `tag:'content'` convention
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value {raw:?} does not follow the tag:'content' convention")]
pub struct MalformedValue {
    pub raw: String,
}

/// Extract the content of a tagged cell value
///
/// The segment after the first colon is the content. One layer of surrounding
/// single quotes is stripped; anything between them is kept verbatim,
/// including colons and quotes. An unquoted segment containing another colon
/// is ambiguous and rejected.
pub fn normalize(raw: &str) -> Result<String, MalformedValue> {
    let malformed = || MalformedValue {
        raw: raw.to_string(),
    };

    let (_tag, segment) = raw.split_once(':').ok_or_else(malformed)?;

    if let Some(content) = strip_quotes(segment) {
        return Ok(content.to_string());
    }

    if segment.contains(':') {
        return Err(malformed());
    }

    Ok(segment.to_string())
}

/// Render content in the tagged convention
pub fn tagged(tag: &str, content: &str) -> String {
    format!("{}:'{}'", tag, content)
}

fn strip_quotes(segment: &str) -> Option<&str> {
    if segment.len() < 2 {
        return None;
    }
    segment.strip_prefix('\'')?.strip_suffix('\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ignores_tag() {
        for tag in ["text", "number", "xldate", "bool", "empty", "anything"] {
            let raw = format!("{}:'Boiler Room 1'", tag);
            assert_eq!(normalize(&raw).unwrap(), "Boiler Room 1");
        }
    }

    #[test]
    fn test_normalize_keeps_inner_colons_and_quotes() {
        assert_eq!(normalize("text:'12:30'").unwrap(), "12:30");
        assert_eq!(normalize("text:'O'Brien'").unwrap(), "O'Brien");
        assert_eq!(normalize("text:''quoted''").unwrap(), "'quoted'");
    }

    #[test]
    fn test_normalize_empty_content() {
        assert_eq!(normalize("empty:''").unwrap(), "");
        assert_eq!(normalize("text:").unwrap(), "");
    }

    #[test]
    fn test_normalize_unquoted_segment() {
        assert_eq!(normalize("number:1.0").unwrap(), "1.0");
        assert_eq!(normalize("text:'").unwrap(), "'");
    }

    #[test]
    fn test_normalize_rejects_missing_colon() {
        let err = normalize("Widget").unwrap_err();
        assert_eq!(err.raw, "Widget");
        assert!(normalize("").is_err());
    }

    #[test]
    fn test_normalize_rejects_ambiguous_unquoted_colons() {
        assert!(normalize("text:12:30").is_err());
    }

    #[test]
    fn test_tagged() {
        assert_eq!(tagged("text", "Pump"), "text:'Pump'");
        assert_eq!(normalize(&tagged("text", "a:b")).unwrap(), "a:b");
    }
}
