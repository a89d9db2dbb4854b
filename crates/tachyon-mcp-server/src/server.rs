//! Server-role endpoint: registries, lifecycle state, and method dispatch
//! (§4.4.2, §4.4.3).

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use tachyon_mcp_endpoint::{classify, Classification};
use tachyon_mcp_protocol::{
    validate_tool_arguments, wrap_tool_result, EndpointState, GetPromptResult, Implementation,
    InitializeResult, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse, ProtocolError,
    ReadResourceResult, Resource, ResourceContents, ServerCapabilities, Tool, DEFAULT_MIME_TYPE,
    PROTOCOL_VERSION,
};
use tachyon_mcp_transport::{Transport, TransportEvent};

use crate::handlers::{PromptHandler, ResourceHandler, ToolHandler};
use crate::hooks::{run_chain, PreDispatchHook, RequestContext};
use crate::registry::Registry;

struct ToolEntry {
    definition: Tool,
    handler: Arc<dyn ToolHandler>,
}

struct ResourceEntry {
    definition: Resource,
    handler: Arc<dyn ResourceHandler>,
}

struct PromptEntry {
    definition: tachyon_mcp_protocol::Prompt,
    handler: Arc<dyn PromptHandler>,
}

/// Method names reserved by the protocol itself; registering a tool,
/// resource, or prompt under one of these is a caller error the registry
/// does not attempt to adjudicate here (left to the registering code).
const RESERVED_METHODS: &[&str] = &[
    "initialize",
    "initialized",
    "tools/list",
    "tools/call",
    "resources/list",
    "resources/read",
    "prompts/list",
    "prompts/get",
    "logging/setLevel",
];

pub fn is_reserved_method(name: &str) -> bool {
    RESERVED_METHODS.contains(&name)
}

pub struct ServerEndpoint {
    state: Mutex<EndpointState>,
    server_info: Implementation,
    capabilities: ServerCapabilities,
    tools: Mutex<Registry<ToolEntry>>,
    resources: Mutex<Registry<ResourceEntry>>,
    prompts: Mutex<Registry<PromptEntry>>,
    hooks: Vec<Arc<dyn PreDispatchHook>>,
}

impl ServerEndpoint {
    pub fn new(server_info: Implementation, capabilities: ServerCapabilities) -> Self {
        Self {
            state: Mutex::new(EndpointState::Created),
            server_info,
            capabilities,
            tools: Mutex::new(Registry::new()),
            resources: Mutex::new(Registry::new()),
            prompts: Mutex::new(Registry::new()),
            hooks: Vec::new(),
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn PreDispatchHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub async fn state(&self) -> EndpointState {
        *self.state.lock().await
    }

    /// Created → Started: the transport is wired up, no registry mutation
    /// constraint changes, but the endpoint will now accept `initialize`.
    pub async fn start(&self) {
        let mut state = self.state.lock().await;
        if *state == EndpointState::Created {
            *state = EndpointState::Started;
            info!("server endpoint started");
        }
    }

    pub async fn add_tool(&self, definition: Tool, handler: Arc<dyn ToolHandler>) {
        let name = definition.name.clone();
        self.tools
            .lock()
            .await
            .insert(name, ToolEntry { definition, handler });
    }

    pub async fn remove_tool(&self, name: &str) {
        self.tools.lock().await.remove(name);
    }

    pub async fn add_resource(&self, definition: Resource, handler: Arc<dyn ResourceHandler>) {
        let uri = definition.uri.clone();
        self.resources
            .lock()
            .await
            .insert(uri, ResourceEntry { definition, handler });
    }

    pub async fn remove_resource(&self, uri: &str) {
        self.resources.lock().await.remove(uri);
    }

    pub async fn add_prompt(
        &self,
        definition: tachyon_mcp_protocol::Prompt,
        handler: Arc<dyn PromptHandler>,
    ) {
        let name = definition.name.clone();
        self.prompts
            .lock()
            .await
            .insert(name, PromptEntry { definition, handler });
    }

    pub async fn remove_prompt(&self, name: &str) {
        self.prompts.lock().await.remove(name);
    }

    /// Dispatches one inbound message, returning the response to write
    /// back (if any — notifications never produce one). `ctx` carries
    /// whatever the binding layer extracted for the pre-dispatch hooks
    /// (e.g. a bearer token) — the stdio binding has nothing to put
    /// there and passes `RequestContext::default()`.
    pub async fn handle_message(
        &self,
        message: JsonRpcMessage,
        ctx: RequestContext,
    ) -> Option<JsonRpcResponse> {
        match classify(message) {
            Classification::InboundRequest(request) => {
                Some(self.handle_request(request, ctx).await)
            }
            Classification::InboundNotification(notification) => {
                self.handle_notification(notification).await;
                None
            }
            Classification::Malformed { id } => Some(JsonRpcResponse::failure(
                id,
                ProtocolError::InvalidRequest(
                    "message carries an id but no method, result, or error".into(),
                )
                .into(),
            )),
            Classification::SuccessResponse(response) | Classification::ErrorResponse(response) => {
                warn!(id = %response.id, "server endpoint received an unexpected response message");
                None
            }
        }
    }

    /// Drives `transport` until it closes: receive a frame, dispatch it
    /// through [`handle_message`](Self::handle_message), write back
    /// whatever response comes out (§2 data flow, §5 "inbound pump
    /// suspends awaiting bytes"). Mirrors the client's inbound loop
    /// (`ClientEndpoint::spawn_inbound_loop`), except the server owns no
    /// transport of its own — a caller hands one in and awaits this
    /// future directly rather than the server spawning it internally,
    /// since unlike the client (which always needs an inbound pump the
    /// moment it's constructed, to receive responses to requests it
    /// sends), a server may be driven by several independent
    /// connections, one `serve` call per transport.
    ///
    /// Every dispatched request gets `RequestContext::default()` — a
    /// binding that extracts per-connection auth (e.g. from an HTTP
    /// header on an upgraded connection) should call
    /// [`handle_message`](Self::handle_message) directly instead of using
    /// this loop.
    pub async fn serve(&self, mut transport: Box<dyn Transport>) {
        info!("server endpoint serving transport");
        loop {
            match transport.receive().await {
                Ok(Some(TransportEvent::Message(message))) => {
                    if let Some(response) = self.handle_message(message, RequestContext::default()).await
                    {
                        if let Err(err) = transport
                            .send(&JsonRpcMessage::Response(response))
                            .await
                        {
                            warn!(error = %err, "failed to write response, closing serve loop");
                            break;
                        }
                    }
                }
                Ok(Some(TransportEvent::ParseError(err))) => {
                    warn!(error = %err, "dropping unparsable inbound line");
                }
                Ok(None) => {
                    debug!("transport reached EOF, closing serve loop");
                    break;
                }
                Err(err) => {
                    warn!(error = %err, "transport error, closing serve loop");
                    break;
                }
            }
        }
        let _ = transport.close().await;
    }

    async fn handle_request(&self, request: JsonRpcRequest, ctx: RequestContext) -> JsonRpcResponse {
        let state = self.state().await;

        if state == EndpointState::ShuttingDown || state == EndpointState::Closed {
            return JsonRpcResponse::failure(
                request.id,
                ProtocolError::InternalError("shutting down".into()).into(),
            );
        }

        if !state.accepts(&request.method) {
            return JsonRpcResponse::failure(
                request.id,
                ProtocolError::InitializationFailed(format!(
                    "method \"{}\" is not accepted before initialization completes",
                    request.method
                ))
                .into(),
            );
        }

        if let Err(err) = run_chain(&self.hooks, &request.method, request.params.as_ref(), &ctx).await
        {
            return JsonRpcResponse::failure(request.id, err.into());
        }

        let id = request.id.clone();
        match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => JsonRpcResponse::failure(id, err.into()),
        }
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, ProtocolError> {
        match method {
            "initialize" => self.handle_initialize(params).await,
            "tools/list" => self.handle_tools_list().await,
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => self.handle_resources_list().await,
            "resources/read" => self.handle_resources_read(params).await,
            "prompts/list" => self.handle_prompts_list().await,
            "prompts/get" => self.handle_prompts_get(params).await,
            other => Err(ProtocolError::MethodNotFound(other.to_string())),
        }
    }

    /// §4.4.2: `initialize` returns capabilities but does not itself
    /// move the server past `Started` — Initialized is reached only on
    /// receipt of the peer's `initialized` notification, handled below.
    ///
    /// §9 Open Question, resolved: the negotiated `protocolVersion` is
    /// always the literal `"2024-11-05"` regardless of what the peer
    /// requested. This preserves the source's leniency rather than
    /// rejecting mismatched versions — see DESIGN.md.
    async fn handle_initialize(&self, _params: Option<Value>) -> Result<Value, ProtocolError> {
        debug!("negotiated protocol version {PROTOCOL_VERSION}");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: self.capabilities.clone(),
            server_info: self.server_info.clone(),
        };
        Ok(serde_json::to_value(result)?)
    }

    async fn handle_notification(&self, notification: tachyon_mcp_protocol::JsonRpcNotification) {
        match notification.method.as_str() {
            "initialized" => {
                *self.state.lock().await = EndpointState::Initialized;
                info!("peer confirmed initialization");
            }
            "logging/setLevel" => {
                self.handle_set_level(notification.params).await;
            }
            other => {
                debug!(method = other, "ignoring unknown notification");
            }
        }
    }

    /// §9 Open Question, resolved: implemented as a notification (no
    /// response sent) even though MCP lists `logging/setLevel` as a
    /// request, preserving the source's notification-style handling.
    async fn handle_set_level(&self, params: Option<Value>) {
        let level = params
            .as_ref()
            .and_then(|p| p.get("level"))
            .and_then(Value::as_str);
        match level {
            Some(level) if ["debug", "info", "warning", "error"].contains(&level) => {
                info!(level, "log level adjusted");
            }
            Some(other) => {
                warn!(level = other, "ignoring unknown log level");
            }
            None => {
                warn!("logging/setLevel notification missing \"level\"");
            }
        }
    }

    async fn handle_tools_list(&self) -> Result<Value, ProtocolError> {
        let tools = self.tools.lock().await;
        let definitions: Vec<&Tool> = tools.list().into_iter().map(|e| &e.definition).collect();
        Ok(json!({ "tools": definitions }))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, ProtocolError> {
        let params = params.unwrap_or_else(|| json!({}));
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::InvalidRequest("tools/call requires \"name\"".into()))?;
        let arguments = params.get("arguments").cloned();

        let handler = {
            let tools = self.tools.lock().await;
            let entry = tools
                .get(name)
                .ok_or_else(|| ProtocolError::MethodNotFound(name.to_string()))?;
            validate_tool_arguments(arguments.as_ref(), Some(&entry.definition.input_schema))
                .map_err(ProtocolError::from)?;
            entry.handler.clone()
        };

        let result = handler
            .call(arguments.unwrap_or_else(|| json!({})))
            .await
            .map_err(|err| ProtocolError::ToolExecutionError(err.to_string()))?;

        Ok(serde_json::to_value(wrap_tool_result(result))?)
    }

    async fn handle_resources_list(&self) -> Result<Value, ProtocolError> {
        let resources = self.resources.lock().await;
        let definitions: Vec<&Resource> =
            resources.list().into_iter().map(|e| &e.definition).collect();
        Ok(json!({ "resources": definitions }))
    }

    async fn handle_resources_read(&self, params: Option<Value>) -> Result<Value, ProtocolError> {
        let params = params.unwrap_or_else(|| json!({}));
        let uri = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::InvalidRequest("resources/read requires \"uri\"".into()))?;

        let handler = {
            let resources = self.resources.lock().await;
            let entry = resources
                .get(uri)
                .ok_or_else(|| ProtocolError::ResourceNotFound(uri.to_string()))?;
            entry.handler.clone()
        };

        let (text, mime_type) = handler
            .read(uri)
            .await
            .map_err(|err| ProtocolError::InternalError(err.to_string()))?;

        let result = ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: mime_type.unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                text,
            }],
        };
        Ok(serde_json::to_value(result)?)
    }

    async fn handle_prompts_list(&self) -> Result<Value, ProtocolError> {
        let prompts = self.prompts.lock().await;
        let definitions: Vec<&tachyon_mcp_protocol::Prompt> =
            prompts.list().into_iter().map(|e| &e.definition).collect();
        Ok(json!({ "prompts": definitions }))
    }

    async fn handle_prompts_get(&self, params: Option<Value>) -> Result<Value, ProtocolError> {
        let params = params.unwrap_or_else(|| json!({}));
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::InvalidRequest("prompts/get requires \"name\"".into()))?;
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let handler = {
            let prompts = self.prompts.lock().await;
            let entry = prompts
                .get(name)
                .ok_or_else(|| ProtocolError::MethodNotFound(name.to_string()))?;
            entry.handler.clone()
        };

        let result: GetPromptResult = handler
            .get(arguments)
            .await
            .map_err(|err| ProtocolError::InternalError(err.to_string()))?;
        Ok(serde_json::to_value(result)?)
    }

    /// ShuttingDown → Closed, after draining registries. Any pending
    /// outbound requests belonging to this endpoint are the caller's
    /// responsibility to reject via `tachyon-mcp-endpoint::PendingRequests`
    /// (the server role rarely holds any, since it has no sampling
    /// handler in this core).
    pub async fn shutdown(&self) {
        *self.state.lock().await = EndpointState::ShuttingDown;
        self.tools.lock().await.clear();
        self.resources.lock().await.clear();
        self.prompts.lock().await.clear();
        *self.state.lock().await = EndpointState::Closed;
        info!("server endpoint closed");
    }
}
