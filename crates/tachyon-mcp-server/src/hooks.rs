//! The pre-dispatch hook contract (§4.5): an ordered chain invoked after
//! classification but before handler invocation, on inbound requests
//! only. Modeled as a typed interface composed by simple iteration (§9
//! "avoid open recursion / dynamic decoration").

use async_trait::async_trait;
use serde_json::Value;

use tachyon_mcp_protocol::ProtocolResult;

/// Context a hook can inspect: whatever the transport/binding layer
/// attached to this inbound request (e.g. an `authorization` field).
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub authorization: Option<String>,
}

#[async_trait]
pub trait PreDispatchHook: Send + Sync {
    /// Returning `Ok(())` permits continuation to the next hook (or the
    /// handler, if this was the last one); returning `Err` aborts
    /// dispatch, and that error becomes the response.
    async fn check(&self, method: &str, params: Option<&Value>, ctx: &RequestContext) -> ProtocolResult<()>;
}

/// Runs every hook in order, short-circuiting on the first failure.
pub async fn run_chain(
    hooks: &[std::sync::Arc<dyn PreDispatchHook>],
    method: &str,
    params: Option<&Value>,
    ctx: &RequestContext,
) -> ProtocolResult<()> {
    for hook in hooks {
        hook.check(method, params, ctx).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tachyon_mcp_protocol::ProtocolError;

    struct AlwaysDeny;

    #[async_trait]
    impl PreDispatchHook for AlwaysDeny {
        async fn check(
            &self,
            _method: &str,
            _params: Option<&Value>,
            _ctx: &RequestContext,
        ) -> ProtocolResult<()> {
            Err(ProtocolError::PermissionDenied("denied".into()))
        }
    }

    struct CountingPass(std::sync::atomic::AtomicUsize);

    #[async_trait]
    impl PreDispatchHook for CountingPass {
        async fn check(
            &self,
            _method: &str,
            _params: Option<&Value>,
            _ctx: &RequestContext,
        ) -> ProtocolResult<()> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn chain_short_circuits_on_first_failure() {
        let counter = Arc::new(CountingPass(std::sync::atomic::AtomicUsize::new(0)));
        let hooks: Vec<Arc<dyn PreDispatchHook>> = vec![Arc::new(AlwaysDeny), counter.clone()];
        let result = run_chain(&hooks, "tools/call", None, &RequestContext::default()).await;
        assert!(result.is_err());
        assert_eq!(counter.0.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn chain_runs_every_hook_when_all_pass() {
        let counter = Arc::new(CountingPass(std::sync::atomic::AtomicUsize::new(0)));
        let hooks: Vec<Arc<dyn PreDispatchHook>> = vec![counter.clone(), counter.clone()];
        let result = run_chain(&hooks, "tools/call", None, &RequestContext::default()).await;
        assert!(result.is_ok());
        assert_eq!(counter.0.load(std::sync::atomic::Ordering::SeqCst), 2);
    }
}
