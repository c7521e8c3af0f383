pub mod report;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::naming::{detect_style, NamingStyle};

pub use report::render_documentation;

/// Superficial statistics about a source document.
#[derive(Debug, Clone, Serialize)]
pub struct CodeAnalysis {
    /// Name from the first declaration line, if any
    pub declaration_name: Option<String>,
    pub naming_style: NamingStyle,
    pub line_count: usize,
    pub average_line_length: f64,
    /// Distinct leading-whitespace widths, in order of first occurrence
    pub indentation_levels: Vec<usize>,
}

/// Matches declaration lines such as `function loadUser(id) {`.
pub struct DeclarationMatcher {
    regex: Regex,
}

impl DeclarationMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        if keywords.is_empty() {
            anyhow::bail!("At least one declaration keyword is required");
        }
        let alternatives = keywords
            .iter()
            .map(|k| regex::escape(k.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"\b(?:{alternatives})\s+([A-Za-z0-9_]+)\s*\(.*\)\s*\{{");
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Invalid declaration pattern: {pattern}"))?;
        Ok(Self { regex })
    }

    pub fn declared_name<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Scan `text` line by line and collect its statistics.
pub fn analyze_code(text: &str, matcher: &DeclarationMatcher) -> CodeAnalysis {
    let mut declaration_name: Option<String> = None;
    let mut total_length = 0usize;
    let mut line_count = 0usize;
    let mut indentation_levels = Vec::new();

    for line in text.split('\n') {
        line_count += 1;
        total_length += line.chars().count();

        if declaration_name.is_none() {
            declaration_name = matcher.declared_name(line).map(str::to_string);
        }

        let indentation = line.chars().take_while(|c| c.is_whitespace()).count();
        if indentation > 0 && !indentation_levels.contains(&indentation) {
            indentation_levels.push(indentation);
        }
    }

    let naming_style = declaration_name
        .as_deref()
        .map(detect_style)
        .unwrap_or(NamingStyle::Unknown);

    tracing::debug!(
        "Analyzed {} lines, first declaration: {:?} ({})",
        line_count,
        declaration_name,
        naming_style
    );

    CodeAnalysis {
        declaration_name,
        naming_style,
        line_count,
        average_line_length: total_length as f64 / line_count as f64,
        indentation_levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> DeclarationMatcher {
        DeclarationMatcher::new(&["function", "class"]).unwrap()
    }

    const SAMPLE: &str = "function loadUser(id) {\n  const user_name = id;\n    return user_name;\n}";

    #[test]
    fn test_analyze_sample() {
        let analysis = analyze_code(SAMPLE, &matcher());
        assert_eq!(analysis.declaration_name.as_deref(), Some("loadUser"));
        assert_eq!(analysis.naming_style, NamingStyle::CamelCase);
        assert_eq!(analysis.line_count, 4);
        assert_eq!(analysis.indentation_levels, vec![2, 4]);
        let expected = SAMPLE.split('\n').map(str::len).sum::<usize>() as f64 / 4.0;
        assert!((analysis.average_line_length - expected).abs() < 1e-9);
    }

    #[test]
    fn test_first_declaration_wins() {
        let text = "function first_one() {\n}\nfunction SecondOne() {\n}";
        let analysis = analyze_code(text, &matcher());
        assert_eq!(analysis.declaration_name.as_deref(), Some("first_one"));
        assert_eq!(analysis.naming_style, NamingStyle::SnakeCase);
    }

    #[test]
    fn test_no_declaration_is_unknown() {
        let analysis = analyze_code("let x = 1;", &matcher());
        assert!(analysis.declaration_name.is_none());
        assert_eq!(analysis.naming_style, NamingStyle::Unknown);
        assert!(analysis.indentation_levels.is_empty());
    }

    #[test]
    fn test_empty_document_has_one_empty_line() {
        let analysis = analyze_code("", &matcher());
        assert_eq!(analysis.line_count, 1);
        assert_eq!(analysis.average_line_length, 0.0);
    }

    #[test]
    fn test_indentation_keeps_first_occurrence_order() {
        let text = "a\n    b\n  c\n    d\n\te";
        let analysis = analyze_code(text, &matcher());
        assert_eq!(analysis.indentation_levels, vec![4, 2, 1]);
    }

    #[test]
    fn test_custom_keywords() {
        let matcher = DeclarationMatcher::new(&["fn"]).unwrap();
        let analysis = analyze_code("pub fn parse_args(argv: &[String]) {", &matcher);
        assert_eq!(analysis.declaration_name.as_deref(), Some("parse_args"));
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert!(matcher().declared_name("myfunction foo() {").is_none());
        assert_eq!(matcher().declared_name("export class Widget () {"), Some("Widget"));
    }

    #[test]
    fn test_matcher_requires_keywords() {
        let empty: [&str; 0] = [];
        assert!(DeclarationMatcher::new(&empty).is_err());
    }
}
