// src/checker/link.rs
// =============================================================================
// The link record that flows through the whole pipeline.
//
// A Link starts life in the markdown extractor with just href/text/file.
// If the user asked for validation, the http module builds a NEW Link with
// the validation result attached - records are never edited in place.
//
// JSON shape (see main.rs --json):
//   {"href": "...", "text": "...", "file": "..."}                  not validated
//   {"href": "...", "text": "...", "file": "...", "status": 200, "ok": true}
//   {"href": "...", ..., "status": "N/A", "ok": false}             unreachable
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// The HTTP status recorded for a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatus {
    /// The server answered with this status code.
    Code(u16),
    /// No response at all (DNS failure, timeout, invalid URL, ...).
    Unreachable,
}

impl HttpStatus {
    /// 2xx counts as success. Anything else, including redirects that were
    /// not followed, does not.
    pub fn is_success(&self) -> bool {
        matches!(self, HttpStatus::Code(code) if (200..300).contains(code))
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpStatus::Code(code) => write!(f, "{}", code),
            HttpStatus::Unreachable => f.write_str("N/A"),
        }
    }
}

// Numbers stay numbers in JSON, the sentinel becomes the string "N/A"
impl Serialize for HttpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HttpStatus::Code(code) => serializer.serialize_u16(*code),
            HttpStatus::Unreachable => serializer.serialize_str("N/A"),
        }
    }
}

/// Result of a reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub status: HttpStatus,
    pub ok: bool,
}

impl Validation {
    pub fn from_status(status: HttpStatus) -> Self {
        Validation {
            status,
            ok: status.is_success(),
        }
    }

    pub fn unreachable() -> Self {
        Validation {
            status: HttpStatus::Unreachable,
            ok: false,
        }
    }
}

/// One hyperlink found in a Markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The URL exactly as written in the source
    pub href: String,
    /// Display text, may be empty
    pub text: String,
    /// The Markdown file the link was found in
    pub file: PathBuf,
    /// Present only after validation
    #[serde(flatten)]
    pub validation: Option<Validation>,
}

impl Link {
    pub fn new(href: impl Into<String>, text: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Link {
            href: href.into(),
            text: text.into(),
            file: file.into(),
            validation: None,
        }
    }

    /// Returns a copy of this link carrying `validation`.
    pub fn validated(&self, validation: Validation) -> Self {
        Link {
            validation: Some(validation),
            ..self.clone()
        }
    }

    /// Returns `Some(ok)` once validated, `None` before.
    pub fn is_ok(&self) -> Option<bool> {
        self.validation.map(|v| v.ok)
    }

    pub fn status(&self) -> Option<HttpStatus> {
        self.validation.map(|v| v.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success_range() {
        assert!(HttpStatus::Code(200).is_success());
        assert!(HttpStatus::Code(204).is_success());
        assert!(!HttpStatus::Code(301).is_success());
        assert!(!HttpStatus::Code(404).is_success());
        assert!(!HttpStatus::Unreachable.is_success());
    }

    #[test]
    fn test_validated_leaves_original_untouched() {
        let link = Link::new("https://example.com", "Example", "a.md");
        let checked = link.validated(Validation::from_status(HttpStatus::Code(200)));

        assert_eq!(link.validation, None);
        assert_eq!(link.is_ok(), None);
        assert_eq!(checked.href, link.href);
        assert_eq!(checked.text, link.text);
        assert_eq!(checked.file, link.file);
        assert_eq!(checked.is_ok(), Some(true));
        assert_eq!(checked.status(), Some(HttpStatus::Code(200)));
    }

    #[test]
    fn test_json_without_validation() {
        let link = Link::new("https://example.com", "Example", "a.md");
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"href": "https://example.com", "text": "Example", "file": "a.md"})
        );
    }

    #[test]
    fn test_json_with_validation() {
        let link = Link::new("https://example.com", "", "a.md");

        let ok = serde_json::to_value(link.validated(Validation::from_status(HttpStatus::Code(200)))).unwrap();
        assert_eq!(ok["status"], 200);
        assert_eq!(ok["ok"], true);

        let failed = serde_json::to_value(link.validated(Validation::unreachable())).unwrap();
        assert_eq!(failed["status"], "N/A");
        assert_eq!(failed["ok"], false);
    }
}
