//! Language support for analysis prompts
//!
//! The upstream clients select the language the written analysis should come
//! back in. Thai and English are first-class; anything else rides in the
//! `Other` variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported response languages
///
/// # Examples
///
/// ```
/// use chart_vision::Language;
///
/// let lang = Language::Thai;
/// assert_eq!(lang.code(), "th");
///
/// // Parse from string
/// let parsed = Language::from_code("en");
/// assert_eq!(parsed, Language::English);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// Thai
    #[default]
    Thai,
    /// English
    English,
    /// Other languages (ISO 639-1 code)
    Other(String),
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(&self) -> &str {
        match self {
            Language::Thai => "th",
            Language::English => "en",
            Language::Other(code) => code,
        }
    }

    /// Get language name for display
    pub fn name(&self) -> &str {
        match self {
            Language::Thai => "Thai",
            Language::English => "English",
            Language::Other(code) => code,
        }
    }

    /// Parse from ISO 639-1 code or common name
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "th" | "thai" | "ไทย" => Language::Thai,
            "en" | "english" => Language::English,
            other => Language::Other(other.to_string()),
        }
    }

    /// Check if this is a known language (not Other)
    pub fn is_known(&self) -> bool {
        !matches!(self, Language::Other(_))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Language::from_code(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(Language::Thai.code(), "th");
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Other("ja".to_string()).code(), "ja");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("th"), Language::Thai);
        assert_eq!(Language::from_code("TH"), Language::Thai);
        assert_eq!(Language::from_code("thai"), Language::Thai);
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("English"), Language::English);
        assert_eq!(Language::from_code("ja"), Language::Other("ja".to_string()));
    }

    #[test]
    fn test_default_is_thai() {
        assert_eq!(Language::default(), Language::Thai);
    }

    #[test]
    fn test_is_known() {
        assert!(Language::Thai.is_known());
        assert!(!Language::Other("ja".to_string()).is_known());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Language::Thai), "Thai");
        assert_eq!(format!("{}", Language::English), "English");
    }
}
