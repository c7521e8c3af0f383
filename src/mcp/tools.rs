use serde_json::{json, Value};

use crate::analysis::{analyze_code, render_documentation, DeclarationMatcher};
use crate::config::Settings;
use crate::editor::{format_selection, BufferHost, Selection};
use crate::mcp::protocol::*;
use crate::naming::{convert, detect_document_style, detect_style, NamingStyle};

/// Returns the list of tools the naming-style server exposes.
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "detect_naming_style".into(),
            description: "Classifies the naming convention (SnakeCase, CamelCase, PascalCase \
                          or Unknown) of a single identifier, or the prevailing convention \
                          of a whole document."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Identifier or document text"
                    },
                    "scope": {
                        "type": "string",
                        "enum": ["token", "document"],
                        "description": "Classify as one identifier (default) or as a document"
                    }
                },
                "required": ["text"]
            }),
        },
        ToolDefinition {
            name: "convert_identifier".into(),
            description: "Converts an identifier between snake_case, camelCase and PascalCase. \
                          The source style is detected when omitted. Unknown styles are \
                          returned unchanged."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "identifier": { "type": "string" },
                    "from": {
                        "type": "string",
                        "description": "Source style, e.g. snake_case"
                    },
                    "to": {
                        "type": "string",
                        "description": "Target style, e.g. camelCase"
                    }
                },
                "required": ["identifier", "to"]
            }),
        },
        ToolDefinition {
            name: "format_selection".into(),
            description: "Rewrites the selected identifier of a document into the naming \
                          style the document already uses, and optionally saves the converted \
                          identifier to a file in the workspace. Returns the updated document."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "document": { "type": "string", "description": "Full document text" },
                    "selection": {
                        "type": "string",
                        "description": "Text to select (first occurrence)"
                    },
                    "start": { "type": "integer", "description": "Selection start byte offset" },
                    "end": { "type": "integer", "description": "Selection end byte offset" },
                    "save_as": {
                        "type": "string",
                        "description": "File name (without extension) to save the converted identifier"
                    }
                },
                "required": ["document"]
            }),
        },
        ToolDefinition {
            name: "analyze_code".into(),
            description: "Returns statistics for a source document: first declaration, its \
                          naming style, average line length and indentation widths."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "document": { "type": "string" }
                },
                "required": ["document"]
            }),
        },
        ToolDefinition {
            name: "create_design_documentation".into(),
            description: "Analyzes a document and renders the Markdown design documentation report."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "document": { "type": "string" }
                },
                "required": ["document"]
            }),
        },
    ]
}

/// Dispatches a tool call and returns the result.
pub fn call_tool(settings: &Settings, name: &str, args: &Value) -> ToolCallResult {
    match name {
        "detect_naming_style" => {
            let text = args["text"].as_str().unwrap_or("");
            let (scope, style) = match args["scope"].as_str() {
                Some("document") => ("document", detect_document_style(text)),
                None | Some("token") => ("token", detect_style(text)),
                Some(other) => return ToolCallResult::error(format!("Unknown scope: {other}")),
            };
            ToolCallResult::text(json!({ "scope": scope, "style": style }).to_string())
        }

        "convert_identifier" => {
            let identifier = args["identifier"].as_str().unwrap_or("");
            let to = match parse_style(args, "to") {
                Ok(Some(style)) => style,
                Ok(None) => return ToolCallResult::error("Missing target style 'to'"),
                Err(e) => return ToolCallResult::error(e),
            };
            let from = match parse_style(args, "from") {
                Ok(Some(style)) => style,
                Ok(None) => detect_style(identifier),
                Err(e) => return ToolCallResult::error(e),
            };
            let converted = convert(identifier.trim(), from, to);
            ToolCallResult::text(
                json!({
                    "identifier": identifier,
                    "from": from,
                    "to": to,
                    "converted": converted,
                    "changed": converted != identifier.trim(),
                })
                .to_string(),
            )
        }

        "format_selection" => format_selection_tool(settings, args),

        "analyze_code" | "create_design_documentation" => {
            let document = args["document"].as_str().unwrap_or("");
            let matcher = match DeclarationMatcher::new(&settings.declaration_keywords[..]) {
                Ok(m) => m,
                Err(e) => return ToolCallResult::error(format!("{e:#}")),
            };
            let analysis = analyze_code(document, &matcher);
            if name == "analyze_code" {
                match serde_json::to_string(&analysis) {
                    Ok(json) => ToolCallResult::text(json),
                    Err(e) => ToolCallResult::error(format!("Failed to serialize analysis: {e}")),
                }
            } else {
                ToolCallResult::text(render_documentation(&analysis))
            }
        }

        _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
    }
}

fn format_selection_tool(settings: &Settings, args: &Value) -> ToolCallResult {
    let document = args["document"].as_str().unwrap_or("");
    let mut host = BufferHost::new(document, settings.workspace_dir());

    let selection = match (args["selection"].as_str(), &args["start"], &args["end"]) {
        (Some(needle), _, _) => match Selection::find(document, needle) {
            Some(sel) => Some(sel),
            None => {
                return ToolCallResult::error(format!("Selection '{}' not found in document", needle))
            }
        },
        (None, Value::Null, Value::Null) => None,
        (None, Value::Null, _) | (None, _, Value::Null) => {
            return ToolCallResult::error("Both 'start' and 'end' are required")
        }
        (None, start, end) => match (byte_offset(start), byte_offset(end)) {
            (Some(start), Some(end)) => Some(Selection::new(start, end)),
            _ => {
                return ToolCallResult::error(
                    "'start' and 'end' must be non-negative byte offsets",
                )
            }
        },
    };
    if let Some(sel) = selection {
        if let Err(e) = host.select(sel) {
            return ToolCallResult::error(format!("{e:#}"));
        }
    }
    host.answer_save_prompt(args["save_as"].as_str().map(str::to_string));

    match format_selection(&mut host, &settings.output_extension) {
        Ok(outcome) => {
            let result = json!({
                "outcome": outcome,
                "document": host.document(),
                "messages": host.messages(),
            });
            ToolCallResult::text(result.to_string())
        }
        Err(e) => ToolCallResult::error(format!("Failed to format selection: {e:#}")),
    }
}

fn byte_offset(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

fn parse_style(args: &Value, key: &str) -> Result<Option<NamingStyle>, String> {
    match args[key].as_str() {
        Some(s) => s.parse().map(Some).map_err(|e| format!("{e}")),
        None => Ok(None),
    }
}
