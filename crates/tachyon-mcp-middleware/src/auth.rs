//! Bearer-token authentication hook (§4.5 "Auth"), grounded in the
//! teacher's `ultrafast-mcp-auth::middleware::ServerAuthMiddleware` but
//! narrowed to exactly the contract the spec describes — opaque bearer
//! token matching, not the teacher's full OAuth 2.1 / JWT flow.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use tachyon_mcp_protocol::{ProtocolError, ProtocolResult};
use tachyon_mcp_server::{PreDispatchHook, RequestContext};

/// A caller-supplied validator for bearer tokens the static `api_keys`
/// list doesn't cover.
pub trait CustomValidator: Send + Sync {
    fn validate(&self, token: &str) -> bool;
}

#[derive(Clone, Default)]
pub struct AuthConfig {
    pub api_keys: Vec<String>,
    pub allow_anonymous: bool,
    pub custom_validator: Option<Arc<dyn CustomValidator>>,
}

pub struct AuthHook {
    config: AuthConfig,
}

impl AuthHook {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PreDispatchHook for AuthHook {
    async fn check(
        &self,
        method: &str,
        _params: Option<&Value>,
        ctx: &RequestContext,
    ) -> ProtocolResult<()> {
        let token = ctx
            .authorization
            .as_deref()
            .and_then(|header| header.strip_prefix("Bearer "));

        if token.is_none() && self.config.allow_anonymous {
            return Ok(());
        }

        let Some(token) = token else {
            return Err(ProtocolError::PermissionDenied(format!(
                "method \"{method}\" requires an authorization token"
            )));
        };

        if self.config.api_keys.iter().any(|key| key == token) {
            return Ok(());
        }

        if let Some(validator) = &self.config.custom_validator {
            if validator.validate(token) {
                return Ok(());
            }
        }

        Err(ProtocolError::PermissionDenied(format!(
            "method \"{method}\": token did not match any configured credential"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllowSuffix(&'static str);

    impl CustomValidator for AllowSuffix {
        fn validate(&self, token: &str) -> bool {
            token.ends_with(self.0)
        }
    }

    #[tokio::test]
    async fn anonymous_access_allowed_when_configured_and_no_token_present() {
        let hook = AuthHook::new(AuthConfig {
            allow_anonymous: true,
            ..Default::default()
        });
        let ctx = RequestContext::default();
        assert!(hook.check("tools/call", None, &ctx).await.is_ok());
    }

    #[tokio::test]
    async fn missing_token_without_anonymous_access_is_denied() {
        let hook = AuthHook::new(AuthConfig::default());
        let ctx = RequestContext::default();
        assert!(hook.check("tools/call", None, &ctx).await.is_err());
    }

    #[tokio::test]
    async fn matching_api_key_is_allowed() {
        let hook = AuthHook::new(AuthConfig {
            api_keys: vec!["secret-key".into()],
            ..Default::default()
        });
        let ctx = RequestContext {
            authorization: Some("Bearer secret-key".into()),
        };
        assert!(hook.check("tools/call", None, &ctx).await.is_ok());
    }

    #[tokio::test]
    async fn mismatched_token_is_denied() {
        let hook = AuthHook::new(AuthConfig {
            api_keys: vec!["secret-key".into()],
            ..Default::default()
        });
        let ctx = RequestContext {
            authorization: Some("Bearer wrong-key".into()),
        };
        assert!(hook.check("tools/call", None, &ctx).await.is_err());
    }

    #[tokio::test]
    async fn custom_validator_is_consulted_when_api_keys_dont_match() {
        let hook = AuthHook::new(AuthConfig {
            custom_validator: Some(Arc::new(AllowSuffix("-ok"))),
            ..Default::default()
        });
        let ctx = RequestContext {
            authorization: Some("Bearer token-ok".into()),
        };
        assert!(hook.check("tools/call", None, &ctx).await.is_ok());
    }

    #[tokio::test]
    async fn wired_into_a_server_endpoint_rejects_requests_without_a_token() {
        use serde_json::json;
        use tachyon_mcp_server::ServerEndpoint;
        use tachyon_mcp_protocol::{Implementation, ServerCapabilities};

        let server = ServerEndpoint::new(
            Implementation {
                name: "test-server".into(),
                version: "0.1.0".into(),
            },
            ServerCapabilities::default(),
        )
        .with_hook(Arc::new(AuthHook::new(AuthConfig {
            api_keys: vec!["secret-key".into()],
            ..Default::default()
        })));
        server.start().await;

        server
            .handle_message(
                serde_json::from_value(json!({
                    "jsonrpc": "2.0", "id": 1, "method": "initialize",
                    "params": {"protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": {"name": "x", "version": "1"}}
                }))
                .unwrap(),
                RequestContext::default(),
            )
            .await;
        server
            .handle_message(
                serde_json::from_value(json!({"jsonrpc": "2.0", "method": "initialized"})).unwrap(),
                RequestContext::default(),
            )
            .await;

        let denied = server
            .handle_message(
                serde_json::from_value(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
                    .unwrap(),
                RequestContext::default(),
            )
            .await
            .unwrap();
        assert!(!denied.is_success());
        assert_eq!(denied.error.unwrap().code, -32003);

        let allowed = server
            .handle_message(
                serde_json::from_value(json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"}))
                    .unwrap(),
                RequestContext {
                    authorization: Some("Bearer secret-key".into()),
                },
            )
            .await
            .unwrap();
        assert!(allowed.is_success());
    }
}
