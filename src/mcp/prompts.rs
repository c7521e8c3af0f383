use crate::config::Settings;
use crate::mcp::protocol::*;

/// Returns the list of prompts the naming-style server exposes.
pub fn list_prompts() -> Vec<PromptDefinition> {
    vec![PromptDefinition {
        name: "namestyle_guidelines".into(),
        description: "How to keep identifiers consistent with the surrounding document \
                      using the naming-style tools."
            .into(),
    }]
}

/// Resolve a prompt by name.
pub fn get_prompt(settings: &Settings, name: &str) -> Option<PromptGetResult> {
    match name {
        "namestyle_guidelines" => Some(build_guidelines_prompt(settings)),
        _ => None,
    }
}

fn build_guidelines_prompt(settings: &Settings) -> PromptGetResult {
    let keywords = settings.declaration_keywords.join(", ");
    let extension = &settings.output_extension;

    let text = format!(
        r#"## Naming style

Identifiers are snake_case, camelCase or PascalCase. Keep new names in the style the document already uses.

### Workflow

1. **Before naming something** → call `detect_naming_style` with `scope: "document"`
2. **To rename an identifier** → call `convert_identifier`, or `format_selection` to rewrite it in place
3. **To summarize a file** → call `create_design_documentation` (declarations start with: {keywords})

Converted identifiers saved via `save_as` are written as `<name>.{extension}`.
"#
    );

    PromptGetResult {
        description: "Naming style guidelines".into(),
        messages: vec![PromptMessage {
            role: "user".into(),
            content: ContentBlock::Text { text },
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_prompts() {
        let prompts = list_prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].name, "namestyle_guidelines");
    }

    #[test]
    fn test_get_prompt_mentions_settings() {
        let settings = Settings {
            output_extension: "py".into(),
            declaration_keywords: vec!["def".into()],
            ..Default::default()
        };
        let prompt = get_prompt(&settings, "namestyle_guidelines").unwrap();
        let ContentBlock::Text { text } = &prompt.messages[0].content;
        assert!(text.contains("<name>.py"));
        assert!(text.contains("def"));
    }

    #[test]
    fn test_get_prompt_not_found() {
        assert!(get_prompt(&Settings::default(), "nonexistent").is_none());
    }
}
