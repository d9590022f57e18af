use crate::core::protocol::{
    negotiate_protocol_version, CallToolResult, ContentBlock, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo, ToolsCapability,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND,
    PARSE_ERROR,
};
use crate::core::tools::ToolService;
use crate::domain::ports::ArtApi;
use serde::Serialize;
use serde_json::{Map, Value};

pub const SERVER_NAME: &str = "art-institute-chicago";

const INSTRUCTIONS: &str = "Tools for exploring the Art Institute of Chicago collection. \
Search tools return record IDs that the get_* tools accept.";

type MethodResult = std::result::Result<Value, JsonRpcError>;

/// MCP request dispatcher: one JSON-RPC message in, at most one response out.
pub struct McpServer<A: ArtApi> {
    tools: ToolService<A>,
    info: ServerInfo,
}

impl<A: ArtApi> McpServer<A> {
    pub fn new(tools: ToolService<A>) -> Self {
        Self {
            tools,
            info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle one raw line of input. Notifications yield `None`.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unparsable message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        if !value.is_object() {
            return Some(JsonRpcResponse::failure(
                Value::Null,
                JsonRpcError::new(INVALID_REQUEST, "Invalid request: expected a JSON object"),
            ));
        }

        // A message is a notification only when the `id` member is absent.
        let id = match value.get("id") {
            None => None,
            Some(id @ (Value::String(_) | Value::Number(_))) => Some(id.clone()),
            Some(other) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(
                        INVALID_REQUEST,
                        format!("Invalid request: id must be a string or number, got {}", other),
                    ),
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id.unwrap_or(Value::Null),
                    JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id.unwrap_or(Value::Null),
                JsonRpcError::new(
                    INVALID_REQUEST,
                    format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                ),
            ));
        }

        let Some(id) = id else {
            self.handle_notification(&request);
            return None;
        };

        let response = match self.dispatch(&request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                tracing::debug!("{} failed: {} ({})", request.method, error.message, error.code);
                JsonRpcResponse::failure(id, error)
            }
        };
        Some(response)
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => tracing::info!("Client initialized"),
            "notifications/cancelled" => {
                tracing::debug!("Client cancelled a request: {:?}", request.params)
            }
            other => tracing::debug!("Ignoring notification {}", other),
        }
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> MethodResult {
        match request.method.as_str() {
            "initialize" => self.initialize(request.params.as_ref()),
            "ping" => Ok(Value::Object(Map::new())),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.tools.definitions(),
            }),
            "tools/call" => self.call_tool(request.params.as_ref()).await,
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    fn initialize(&self, params: Option<&Value>) -> MethodResult {
        let requested = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str);
        let client = params
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let version = negotiate_protocol_version(requested);

        tracing::info!(
            "Initializing session for client {} (requested protocol {:?}, using {})",
            client,
            requested,
            version
        );

        to_result(&InitializeResult {
            protocol_version: version.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: self.info.clone(),
            instructions: Some(INSTRUCTIONS.to_string()),
        })
    }

    async fn call_tool(&self, params: Option<&Value>) -> MethodResult {
        let params = params
            .and_then(Value::as_object)
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "tools/call expects an object"))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "tools/call requires a tool name"))?;

        let empty = Map::new();
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(arguments)) => arguments,
            Some(_) => {
                return Err(JsonRpcError::new(
                    INVALID_PARAMS,
                    "tool arguments must be a JSON object",
                ))
            }
        };

        tracing::info!("Calling tool {}", name);
        let output = self.tools.call(name, arguments).await;

        to_result(&CallToolResult {
            content: vec![ContentBlock::Text { text: output.text }],
            is_error: output.is_error,
        })
    }
}

#[derive(Serialize)]
struct ListToolsResult {
    tools: Vec<crate::core::tools::ToolDefinition>,
}

fn to_result<T: Serialize>(value: &T) -> MethodResult {
    serde_json::to_value(value).map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string()))
}
