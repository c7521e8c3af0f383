use serde_json::json;

use crate::mcp::protocol::*;
use crate::naming::{conversion_table, convert, NamingStyle};

const TABLE_URI: &str = "namestyle://conventions/table";
const RULES_URI: &str = "namestyle://conventions/rules";

/// Returns the list of resources the naming-style server exposes.
pub fn list_resources() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            uri: TABLE_URI.into(),
            name: "Conversion Table".into(),
            description: "Every supported style-to-style conversion with an example".into(),
            mime_type: "application/json".into(),
        },
        ResourceDefinition {
            uri: RULES_URI.into(),
            name: "Detection Rules".into(),
            description: "How identifiers and documents are classified, in priority order".into(),
            mime_type: "text/markdown".into(),
        },
    ]
}

/// Reads a resource by URI.
pub fn read_resource(uri: &str) -> ResourceReadResult {
    let (mime, text) = match uri {
        TABLE_URI => ("application/json", conversion_table_json()),
        RULES_URI => ("text/markdown", DETECTION_RULES.to_string()),
        _ => ("text/plain", format!("Unknown resource: {}", uri)),
    };

    ResourceReadResult {
        contents: vec![ResourceContent {
            uri: uri.to_string(),
            mime_type: mime.to_string(),
            text,
        }],
    }
}

fn conversion_table_json() -> String {
    let sample = |style: NamingStyle| match style {
        NamingStyle::SnakeCase => "user_account",
        NamingStyle::CamelCase => "userAccount",
        _ => "UserAccount",
    };

    let pairs: Vec<_> = conversion_table()
        .into_iter()
        .map(|(from, to)| {
            json!({
                "from": from,
                "to": to,
                "example": format!("{} -> {}", sample(from), convert(sample(from), from, to)),
            })
        })
        .collect();

    json!({ "conversions": pairs }).to_string()
}

const DETECTION_RULES: &str = "\
## Naming style detection

1. **SnakeCase**: the identifier contains an underscore boundary.
2. **CamelCase**: lowercase run, then an uppercase letter, letters only (`fooBar`).
3. **PascalCase**: uppercase letter, lowercase run, another uppercase letter (`FooBar`).
4. **Unknown**: anything else, including single words (`foo`, `Foo`). Never converted.

A document takes the first style above that any of its identifiers exhibits.
Acronym runs (`HTTPServer`), digits and non-ASCII identifiers are not supported.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_resources() {
        let resources = list_resources();
        assert_eq!(resources.len(), 2);
        assert!(resources.iter().any(|r| r.uri == TABLE_URI));
    }

    #[test]
    fn test_read_conversion_table() {
        let result = read_resource(TABLE_URI);
        assert_eq!(result.contents[0].mime_type, "application/json");
        let value: serde_json::Value = serde_json::from_str(&result.contents[0].text).unwrap();
        assert_eq!(value["conversions"].as_array().unwrap().len(), 6);
        assert!(result.contents[0].text.contains("user_account -> userAccount"));
    }

    #[test]
    fn test_read_rules() {
        let result = read_resource(RULES_URI);
        assert!(result.contents[0].text.contains("PascalCase"));
    }

    #[test]
    fn test_read_resource_unknown() {
        let result = read_resource("namestyle://unknown");
        assert!(result.contents[0].text.contains("Unknown resource"));
    }
}
