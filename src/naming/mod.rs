pub mod convert;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use convert::{convert, conversion_table};

static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+[A-Z][a-zA-Z]*$").unwrap());
static PASCAL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]*[A-Z][a-zA-Z]*$").unwrap());
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*").unwrap());

/// Lexical naming convention of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingStyle {
    SnakeCase,
    CamelCase,
    PascalCase,
    Unknown,
}

impl NamingStyle {
    /// The three styles that have converters between them.
    pub const KNOWN: [NamingStyle; 3] = [
        NamingStyle::SnakeCase,
        NamingStyle::CamelCase,
        NamingStyle::PascalCase,
    ];

    pub fn is_known(self) -> bool {
        self != NamingStyle::Unknown
    }

    /// Conventional spelling, e.g. `snake_case`.
    pub fn example(self) -> &'static str {
        match self {
            NamingStyle::SnakeCase => "snake_case",
            NamingStyle::CamelCase => "camelCase",
            NamingStyle::PascalCase => "PascalCase",
            NamingStyle::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NamingStyle::SnakeCase => "SnakeCase",
            NamingStyle::CamelCase => "CamelCase",
            NamingStyle::PascalCase => "PascalCase",
            NamingStyle::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl FromStr for NamingStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snakecase" | "snake_case" | "snake" => Ok(NamingStyle::SnakeCase),
            "camelcase" | "camel_case" | "camel" => Ok(NamingStyle::CamelCase),
            "pascalcase" | "pascal_case" | "pascal" => Ok(NamingStyle::PascalCase),
            "unknown" => Ok(NamingStyle::Unknown),
            other => anyhow::bail!(
                "Unknown naming style '{}'. Expected one of: snake_case, camelCase, PascalCase",
                other
            ),
        }
    }
}

/// Classify a single identifier.
///
/// Rules apply in priority order: an underscore boundary makes it snake_case,
/// then a whole-token camelCase match, then a whole-token PascalCase match.
/// Anything else (including single words like `foo` or `Foo`) is `Unknown`.
pub fn detect_style(token: &str) -> NamingStyle {
    let token = token.trim();
    if token.split('_').count() > 1 {
        NamingStyle::SnakeCase
    } else if CAMEL_CASE.is_match(token) {
        NamingStyle::CamelCase
    } else if PASCAL_CASE.is_match(token) {
        NamingStyle::PascalCase
    } else {
        NamingStyle::Unknown
    }
}

/// Classify the prevailing style of a whole document.
///
/// Each identifier-like word is classified with [`detect_style`]; the first
/// style in priority order that any word exhibits wins.
pub fn detect_document_style(text: &str) -> NamingStyle {
    let (mut camel, mut pascal) = (false, false);
    for word in IDENTIFIER.find_iter(text) {
        match detect_style(word.as_str()) {
            NamingStyle::SnakeCase => return NamingStyle::SnakeCase,
            NamingStyle::CamelCase => camel = true,
            NamingStyle::PascalCase => pascal = true,
            NamingStyle::Unknown => {}
        }
    }

    if camel {
        NamingStyle::CamelCase
    } else if pascal {
        NamingStyle::PascalCase
    } else {
        NamingStyle::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_basic_styles() {
        assert_eq!(detect_style("foo_bar"), NamingStyle::SnakeCase);
        assert_eq!(detect_style("fooBar"), NamingStyle::CamelCase);
        assert_eq!(detect_style("FooBar"), NamingStyle::PascalCase);
    }

    #[test]
    fn test_detect_single_words_are_unknown() {
        assert_eq!(detect_style("a"), NamingStyle::Unknown);
        assert_eq!(detect_style("foo"), NamingStyle::Unknown);
        assert_eq!(detect_style("Foo"), NamingStyle::Unknown);
        assert_eq!(detect_style(""), NamingStyle::Unknown);
    }

    #[test]
    fn test_detect_underscore_takes_priority() {
        assert_eq!(detect_style("fooBar_baz"), NamingStyle::SnakeCase);
        assert_eq!(detect_style("Foo_Bar"), NamingStyle::SnakeCase);
        assert_eq!(detect_style("_private"), NamingStyle::SnakeCase);
    }

    #[test]
    fn test_detect_is_anchored_to_whole_token() {
        assert_eq!(detect_style("call fooBar()"), NamingStyle::Unknown);
        assert_eq!(detect_style("fooBar2"), NamingStyle::Unknown);
    }

    #[test]
    fn test_detect_trims_whitespace() {
        assert_eq!(detect_style("  myVariable\n"), NamingStyle::CamelCase);
    }

    #[test]
    fn test_document_style_priority() {
        let doc = "let fooBar = 1;\nlet my_value = FooBar::new();";
        assert_eq!(detect_document_style(doc), NamingStyle::SnakeCase);

        let doc = "const fooBar = new FooBar();";
        assert_eq!(detect_document_style(doc), NamingStyle::CamelCase);

        let doc = "class FooBar {}";
        assert_eq!(detect_document_style(doc), NamingStyle::PascalCase);

        assert_eq!(detect_document_style("let x = 1;"), NamingStyle::Unknown);
        assert_eq!(detect_document_style("let x = 0xFFaBc;"), NamingStyle::Unknown);
        assert_eq!(detect_document_style(""), NamingStyle::Unknown);
    }

    #[test]
    fn test_parse_style_aliases() {
        assert_eq!("snake_case".parse::<NamingStyle>().unwrap(), NamingStyle::SnakeCase);
        assert_eq!("camelCase".parse::<NamingStyle>().unwrap(), NamingStyle::CamelCase);
        assert_eq!("Pascal".parse::<NamingStyle>().unwrap(), NamingStyle::PascalCase);
        assert_eq!("SnakeCase".parse::<NamingStyle>().unwrap(), NamingStyle::SnakeCase);
        assert!("kebab-case".parse::<NamingStyle>().is_err());
    }

    #[test]
    fn test_display_matches_report_labels() {
        assert_eq!(NamingStyle::SnakeCase.to_string(), "SnakeCase");
        assert_eq!(NamingStyle::Unknown.to_string(), "Unknown");
    }
}
