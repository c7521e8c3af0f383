use anyhow::Result;
use serde_json::json;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::Settings;
use crate::mcp::{protocol::*, prompts, resources, tools};

/// Run the MCP server over stdio (stdin/stdout), the transport VS Code uses
/// for MCP integrations.
pub async fn run(settings: Settings) -> Result<()> {
    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    let mut lines = stdin.lines();

    tracing::info!("namestyle stdio transport ready");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        tracing::debug!("← {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                let resp = JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}"));
                send(&mut stdout, &resp).await?;
                continue;
            }
        };

        let response = handle_request(&settings, &request);

        // Notifications (no id) don't get a response
        if request.id.is_some() {
            send(&mut stdout, &response).await?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

pub fn handle_request(settings: &Settings, req: &JsonRpcRequest) -> JsonRpcResponse {
    let id = req.id.clone();
    match req.method.as_str() {
        // ── Lifecycle ──────────────────────────────────────────────
        "initialize" => {
            let result = InitializeResult {
                protocol_version: "2025-03-26".into(),
                capabilities: ServerCapabilities {
                    tools: EmptyCapability::default(),
                    resources: EmptyCapability::default(),
                    prompts: EmptyCapability::default(),
                },
                server_info: ServerInfo {
                    name: "namestyle".into(),
                    version: env!("CARGO_PKG_VERSION").into(),
                },
            };
            JsonRpcResponse::from_result(id, &result)
        }

        "notifications/initialized" | "initialized" | "ping" => JsonRpcResponse::success(id, json!({})),

        // ── Tools ──────────────────────────────────────────────────
        "tools/list" => JsonRpcResponse::from_result(id, &ToolsListResult { tools: tools::list_tools() }),

        "tools/call" => match parse_params::<ToolCallParams>(req) {
            Ok(params) => {
                tracing::info!("tools/call {}", params.name);
                let result = tools::call_tool(settings, &params.name, &params.arguments);
                JsonRpcResponse::from_result(id, &result)
            }
            Err(resp) => resp,
        },

        // ── Resources ──────────────────────────────────────────────
        "resources/list" => JsonRpcResponse::from_result(
            id,
            &ResourcesListResult {
                resources: resources::list_resources(),
            },
        ),

        "resources/read" => match parse_params::<ResourceReadParams>(req) {
            Ok(params) => JsonRpcResponse::from_result(id, &resources::read_resource(&params.uri)),
            Err(resp) => resp,
        },

        // ── Prompts ────────────────────────────────────────────────
        "prompts/list" => JsonRpcResponse::from_result(
            id,
            &PromptsListResult {
                prompts: prompts::list_prompts(),
            },
        ),

        "prompts/get" => match parse_params::<PromptGetParams>(req) {
            Ok(params) => match prompts::get_prompt(settings, &params.name) {
                Some(result) => JsonRpcResponse::from_result(id, &result),
                None => JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Prompt not found: {}", params.name),
                ),
            },
            Err(resp) => resp,
        },

        // ── Unknown ────────────────────────────────────────────────
        method => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {method}")),
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(req: &JsonRpcRequest) -> Result<T, JsonRpcResponse> {
    let params = req
        .params
        .clone()
        .ok_or_else(|| JsonRpcResponse::error(req.id.clone(), INVALID_PARAMS, "Missing params"))?;
    serde_json::from_value::<T>(params).map_err(|e| {
        JsonRpcResponse::error(req.id.clone(), INVALID_PARAMS, format!("Invalid params: {e}"))
    })
}

async fn send(stdout: &mut io::Stdout, resp: &JsonRpcResponse) -> Result<()> {
    let json = serde_json::to_string(resp)?;
    tracing::debug!("→ {}", json);
    stdout.write_all(json.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(1)),
            method: method.into(),
            params,
        }
    }

    fn to_json(resp: &JsonRpcResponse) -> Value {
        serde_json::to_value(resp).unwrap()
    }

    #[test]
    fn test_initialize() {
        let resp = to_json(&handle_request(&Settings::default(), &request("initialize", None)));
        assert_eq!(resp["result"]["serverInfo"]["name"], "namestyle");
        assert_eq!(resp["result"]["protocolVersion"], "2025-03-26");
    }

    #[test]
    fn test_tools_call_convert() {
        let req = request(
            "tools/call",
            Some(json!({
                "name": "convert_identifier",
                "arguments": {"identifier": "helloWorld", "to": "snake_case"}
            })),
        );
        let resp = to_json(&handle_request(&Settings::default(), &req));
        let text = resp["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("hello_world"));
    }

    #[test]
    fn test_tools_call_missing_params() {
        let resp = to_json(&handle_request(&Settings::default(), &request("tools/call", None)));
        assert_eq!(resp["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_tools_call_invalid_params() {
        let req = request("tools/call", Some(json!({"arguments": {}})));
        let resp = to_json(&handle_request(&Settings::default(), &req));
        assert_eq!(resp["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_resources_read() {
        let req = request("resources/read", Some(json!({"uri": "namestyle://conventions/table"})));
        let resp = to_json(&handle_request(&Settings::default(), &req));
        assert_eq!(resp["result"]["contents"][0]["mimeType"], "application/json");
    }

    #[test]
    fn test_prompt_not_found() {
        let req = request("prompts/get", Some(json!({"name": "nope"})));
        let resp = to_json(&handle_request(&Settings::default(), &req));
        assert_eq!(resp["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_unknown_method() {
        let resp = to_json(&handle_request(&Settings::default(), &request("bogus", None)));
        assert_eq!(resp["error"]["code"], METHOD_NOT_FOUND);
        assert!(resp.get("result").is_none());
    }
}
