//! Client-role endpoint (§4.4.4): request/response correlation over a
//! [`Transport`], the `initialize`/`initialized` handshake, and inbound
//! notification delivery. Grounded in the teacher's `UltraFastClient`,
//! narrowed to the symmetric endpoint-core mechanics the spec names —
//! no sampling, elicitation, or roots handlers (those are Non-goals).

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use tachyon_mcp_endpoint::{classify, Classification, IdGenerator, PendingRequests, RequestOutcome};
use tachyon_mcp_protocol::{
    ClientCapabilities, EndpointState, Implementation, InitializeParams, InitializeResult,
    JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, ProtocolError,
    ProtocolResult, RequestId, ServerCapabilities, TimeoutConfig, PROTOCOL_VERSION,
};
use tachyon_mcp_transport::{FrameEvent, Transport, TransportError};

use crate::event::ClientEvent;

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct ClientEndpoint {
    state: Arc<Mutex<EndpointState>>,
    client_info: Implementation,
    capabilities: ClientCapabilities,
    timeouts: TimeoutConfig,
    pending: PendingRequests,
    ids: Arc<IdGenerator>,
    transport: Arc<Mutex<Box<dyn Transport>>>,
    events: broadcast::Sender<ClientEvent>,
    server_info: Arc<Mutex<Option<Implementation>>>,
    server_capabilities: Arc<Mutex<Option<ServerCapabilities>>>,
}

impl ClientEndpoint {
    /// Wraps `transport` and starts the inbound message loop. The endpoint
    /// is in `Started` as soon as this returns — callers still must call
    /// [`initialize`](Self::initialize) before issuing other requests
    /// (§4.4.2).
    pub fn new(
        transport: Box<dyn Transport>,
        client_info: Implementation,
        capabilities: ClientCapabilities,
        timeouts: TimeoutConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let endpoint = Self {
            state: Arc::new(Mutex::new(EndpointState::Started)),
            client_info,
            capabilities,
            timeouts,
            pending: PendingRequests::new(),
            ids: Arc::new(IdGenerator::new()),
            transport: Arc::new(Mutex::new(transport)),
            events,
            server_info: Arc::new(Mutex::new(None)),
            server_capabilities: Arc::new(Mutex::new(None)),
        };
        endpoint.spawn_inbound_loop();
        endpoint
    }

    pub async fn state(&self) -> EndpointState {
        *self.state.lock().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn server_info(&self) -> Option<Implementation> {
        self.server_info.lock().await.clone()
    }

    pub async fn server_capabilities(&self) -> Option<ServerCapabilities> {
        self.server_capabilities.lock().await.clone()
    }

    fn spawn_inbound_loop(&self) {
        let transport = self.transport.clone();
        let pending = self.pending.clone();
        let events = self.events.clone();
        let state = self.state.clone();

        tokio::spawn(async move {
            info!("client inbound loop started");
            loop {
                let event = {
                    let mut transport = transport.lock().await;
                    transport.receive().await
                };

                match event {
                    Ok(Some(FrameEvent::Message(message))) => {
                        Self::handle_inbound(message, &pending, &events, &transport).await;
                    }
                    Ok(Some(FrameEvent::ParseError(err))) => {
                        warn!(error = %err, "dropping unparsable inbound line");
                    }
                    Ok(None) => {
                        debug!("transport reached EOF, closing inbound loop");
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "transport error, closing inbound loop");
                        break;
                    }
                }
            }

            *state.lock().await = EndpointState::Closed;
            pending
                .reject_all(
                    ProtocolError::TimeoutError("transport closed".into()).into(),
                )
                .await;
        });
    }

    async fn handle_inbound(
        message: JsonRpcMessage,
        pending: &PendingRequests,
        events: &broadcast::Sender<ClientEvent>,
        transport: &Arc<Mutex<Box<dyn Transport>>>,
    ) {
        match classify(message) {
            Classification::SuccessResponse(response) => {
                pending
                    .resolve(&response.id, response.result.unwrap_or(Value::Null))
                    .await;
            }
            Classification::ErrorResponse(response) => {
                if let Some(error) = response.error {
                    pending.reject(&response.id, error).await;
                }
            }
            Classification::InboundNotification(notification) => {
                if let Some(event) =
                    ClientEvent::from_notification(&notification.method, notification.params.as_ref())
                {
                    let _ = events.send(event);
                } else {
                    debug!(method = %notification.method, "ignoring unrecognized notification");
                }
            }
            Classification::InboundRequest(request) => {
                warn!(method = %request.method, "client endpoint does not dispatch server-initiated requests");
                let response = JsonRpcResponse::failure(
                    request.id,
                    ProtocolError::MethodNotFound(request.method).into(),
                );
                let mut transport = transport.lock().await;
                let _ = transport.send(&JsonRpcMessage::Response(response)).await;
            }
            Classification::Malformed { id } => {
                let response = JsonRpcResponse::failure(
                    id,
                    ProtocolError::InvalidRequest(
                        "message carries an id but no method, result, or error".into(),
                    )
                    .into(),
                );
                let mut transport = transport.lock().await;
                let _ = transport.send(&JsonRpcMessage::Response(response)).await;
            }
        }
    }

    /// Sends `initialize`, stores the negotiated server info and
    /// capabilities, then sends `initialized` (§4.4.2).
    pub async fn initialize(&self) -> ProtocolResult<InitializeResult> {
        let params = InitializeParams {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: self.capabilities.clone(),
            client_info: self.client_info.clone(),
        };
        let result: InitializeResult = serde_json::from_value(
            self.send_request("initialize", Some(serde_json::to_value(params)?))
                .await?,
        )?;

        *self.server_info.lock().await = Some(result.server_info.clone());
        *self.server_capabilities.lock().await = Some(result.capabilities.clone());
        *self.state.lock().await = EndpointState::Initialized;

        self.send_notification("initialized", None).await?;
        Ok(result)
    }

    /// Sends a request and awaits its response within the configured
    /// deadline (§4.4.4). A response that never arrives surfaces as
    /// [`ProtocolError::TimeoutError`]; the pending table entry is removed
    /// either way. An error response is reconstructed into the matching
    /// typed [`ProtocolError`] variant by its wire code (§4.3), so callers
    /// can match on e.g. `RateLimitExceeded` rather than seeing every
    /// remote failure flattened to `InternalError`.
    pub async fn send_request(&self, method: &str, params: Option<Value>) -> ProtocolResult<Value> {
        let id = self.ids.next_id();
        let request = JsonRpcRequest::new(id.clone(), method, params);

        let receiver = self.pending.insert(id.clone()).await;
        self.write(&JsonRpcMessage::Request(request)).await?;

        let outcome = tokio::time::timeout(self.timeouts.default_request_timeout, receiver).await;
        match outcome {
            Ok(Ok(RequestOutcome::Result(value))) => Ok(value),
            Ok(Ok(RequestOutcome::Error(error))) => Err(error.into()),
            Ok(Err(_)) => Err(ProtocolError::InternalError(
                "pending request dropped without a resolution".into(),
            )),
            Err(_) => {
                self.pending.remove(&id).await;
                Err(ProtocolError::TimeoutError(format!(
                    "no response to \"{method}\" within {:?}",
                    self.timeouts.default_request_timeout
                )))
            }
        }
    }

    pub async fn send_notification(&self, method: &str, params: Option<Value>) -> ProtocolResult<()> {
        let notification = JsonRpcNotification::new(method, params);
        self.write(&JsonRpcMessage::Notification(notification)).await
    }

    async fn write(&self, message: &JsonRpcMessage) -> ProtocolResult<()> {
        self.transport
            .lock()
            .await
            .send(message)
            .await
            .map_err(transport_error_to_protocol_error)
    }

    pub async fn list_tools(&self) -> ProtocolResult<Vec<tachyon_mcp_protocol::Tool>> {
        let result = self.send_request("tools/list", None).await?;
        let tools = result
            .get("tools")
            .cloned()
            .ok_or_else(|| ProtocolError::InternalError("tools/list result missing \"tools\"".into()))?;
        Ok(serde_json::from_value(tools)?)
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> ProtocolResult<tachyon_mcp_protocol::ToolCallResult> {
        let params = json!({ "name": name, "arguments": arguments });
        let result = self.send_request("tools/call", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn list_resources(&self) -> ProtocolResult<Vec<tachyon_mcp_protocol::Resource>> {
        let result = self.send_request("resources/list", None).await?;
        let resources = result.get("resources").cloned().ok_or_else(|| {
            ProtocolError::InternalError("resources/list result missing \"resources\"".into())
        })?;
        Ok(serde_json::from_value(resources)?)
    }

    pub async fn read_resource(&self, uri: &str) -> ProtocolResult<tachyon_mcp_protocol::ReadResourceResult> {
        let params = json!({ "uri": uri });
        let result = self.send_request("resources/read", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn list_prompts(&self) -> ProtocolResult<Vec<tachyon_mcp_protocol::Prompt>> {
        let result = self.send_request("prompts/list", None).await?;
        let prompts = result.get("prompts").cloned().ok_or_else(|| {
            ProtocolError::InternalError("prompts/list result missing \"prompts\"".into())
        })?;
        Ok(serde_json::from_value(prompts)?)
    }

    pub async fn get_prompt(&self, name: &str, arguments: Value) -> ProtocolResult<tachyon_mcp_protocol::GetPromptResult> {
        let params = json!({ "name": name, "arguments": arguments });
        let result = self.send_request("prompts/get", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Started/Initialized → ShuttingDown → Closed. Any outbound requests
    /// still awaiting a response are rejected rather than left hanging
    /// (§4.4.2, §4.4.4).
    pub async fn shutdown(&self) -> ProtocolResult<()> {
        *self.state.lock().await = EndpointState::ShuttingDown;
        self.pending
            .reject_all(ProtocolError::TimeoutError("endpoint shutting down".into()).into())
            .await;
        tokio::time::sleep(self.timeouts.shutdown_grace_period).await;
        self.transport
            .lock()
            .await
            .close()
            .await
            .map_err(transport_error_to_protocol_error)?;
        *self.state.lock().await = EndpointState::Closed;
        info!("client endpoint closed");
        Ok(())
    }
}

fn transport_error_to_protocol_error(err: TransportError) -> ProtocolError {
    ProtocolError::InternalError(err.to_string())
}
