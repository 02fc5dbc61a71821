//! MCP protocol server: exposes the Docker tools to MCP clients via JSON-RPC.

use crate::protocol::{
    negotiate_version, CallToolParams, McpRequest, McpResponse, RequestId, INTERNAL_ERROR,
    INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::registry::ToolRegistry;
use dm_core::result::CommandResult;
use dm_core::tool::{docker_tools, ToolSpec};
use dm_executor::{DockerTools, ExecutorError};
use serde_json::{json, Map, Value};

/// MCP Server that exposes the Docker tools to external MCP clients.
pub struct McpServer {
    registry: ToolRegistry,
    tools: DockerTools,
    name: String,
    version: String,
}

impl McpServer {
    pub fn new(name: &str, version: &str, tools: DockerTools) -> Self {
        Self {
            registry: ToolRegistry::with_tools(docker_tools()),
            tools,
            name: name.into(),
            version: version.into(),
        }
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.registry.len()
    }

    /// Handle one raw line from the transport. Returns `None` when nothing
    /// should be written back (notifications).
    pub async fn handle_message(&self, raw: &str) -> Option<McpResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Unparseable message: {e}");
                return Some(McpResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        // Salvage the id so an invalid request can still be answered.
        let id = value
            .get("id")
            .and_then(|v| serde_json::from_value::<RequestId>(v.clone()).ok());

        let request: McpRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(McpResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ))
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(McpResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        self.handle_request(&request).await
    }

    /// Handle a parsed request and return a response, or `None` for notifications.
    pub async fn handle_request(&self, request: &McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            tracing::debug!("Notification: {}", request.method);
            return None;
        }

        tracing::debug!("Request {:?}: {}", request.id, request.method);
        let id = request.id.clone();

        let response = match request.method.as_str() {
            "initialize" => {
                let requested = request.params.get("protocolVersion").and_then(Value::as_str);
                let result = json!({
                    "protocolVersion": negotiate_version(requested),
                    "capabilities": {
                        "tools": { "listChanged": false }
                    },
                    "serverInfo": {
                        "name": self.name,
                        "version": self.version,
                    }
                });
                McpResponse::success(id, result)
            }
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => {
                let tools: Vec<Value> = self.registry.list().iter().map(tool_descriptor).collect();
                McpResponse::success(id, json!({ "tools": tools }))
            }
            "tools/call" => self.call_tool(id, &request.params).await,
            other => McpResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        };

        Some(response)
    }

    async fn call_tool(&self, id: Option<RequestId>, params: &Value) -> McpResponse {
        let params: CallToolParams = match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => {
                return McpResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}"))
            }
        };

        if !self.registry.contains(&params.name) {
            return McpResponse::error(
                id,
                INVALID_PARAMS,
                format!("Unknown tool: {}", params.name),
            );
        }

        match self.tools.call(&params.name, &params.arguments).await {
            Ok(result) => match tool_result(&result) {
                Ok(value) => McpResponse::success(id, value),
                Err(e) => McpResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            Err(err) => {
                tracing::error!("Tool {} failed: {err}", params.name);
                McpResponse::success(id, tool_error(&params.name, &err))
            }
        }
    }
}

/// Render a ToolSpec as an MCP tool descriptor with a JSON Schema.
fn tool_descriptor(tool: &ToolSpec) -> Value {
    let properties: Map<String, Value> = tool
        .params
        .iter()
        .map(|p| {
            let mut schema = json!({
                "type": p.param_type.schema_type(),
                "description": p.description.as_deref().unwrap_or(""),
            });
            if let Some(default) = &p.default_value {
                schema["default"] = default.clone();
            }
            (p.name.clone(), schema)
        })
        .collect();

    json!({
        "name": tool.name,
        "description": tool.description,
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": tool.required_params(),
        }
    })
}

fn tool_result(result: &CommandResult) -> Result<Value, serde_json::Error> {
    let structured = serde_json::to_value(result)?;
    let text = serde_json::to_string(result)?;
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
        "isError": false,
    }))
}

fn tool_error(name: &str, err: &ExecutorError) -> Value {
    let text = match err {
        ExecutorError::InvalidArguments { .. } => err.to_string(),
        _ => format!("Error executing tool {name}: {err}"),
    };
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": true,
    })
}
