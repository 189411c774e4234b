//! Free-text normalization for required catalog fields.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Input rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    BlankField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

/// Normalizes a tag label: trims and collapses inner whitespace runs.
///
/// Case is preserved; `Gluten Free` and `gluten free` are distinct labels.
pub fn normalize_label(label: &str) -> Result<String, ValidationError> {
    let collapsed = WHITESPACE_RE.replace_all(label.trim(), " ");
    if collapsed.is_empty() {
        return Err(ValidationError::BlankField("label"));
    }
    Ok(collapsed.into_owned())
}

/// Trims optional text and maps blank values to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{normalize_label, optional_text, require_text, ValidationError};

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("title", "  Toast  ").unwrap(), "Toast");
        assert_eq!(
            require_text("title", " \t ").unwrap_err(),
            ValidationError::BlankField("title")
        );
    }

    #[test]
    fn normalize_label_collapses_whitespace_and_keeps_case() {
        assert_eq!(
            normalize_label("  Plant \t  Based ").unwrap(),
            "Plant Based"
        );
        assert!(normalize_label("\n").is_err());
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some("  Denim ")), Some("Denim".to_string()));
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(None), None);
    }
}
