//! The outbound pending-request table (§3 `PendingRequest`, §4.4.4).
//! Every entry terminates in exactly one of {resolved, rejected-by-error,
//! rejected-by-timeout, rejected-by-shutdown} and is removed from the
//! table on that terminal outcome — never left dangling.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};

use tachyon_mcp_protocol::{JsonRpcErrorObject, RequestId};

/// The outcome delivered to whoever is awaiting a `sendRequest` call.
#[derive(Debug)]
pub enum RequestOutcome {
    Result(serde_json::Value),
    Error(JsonRpcErrorObject),
}

struct Entry {
    resolver: oneshot::Sender<RequestOutcome>,
}

/// Shared, mutex-guarded table of in-flight outbound requests, keyed by
/// the numeric or string id the endpoint assigned them.
#[derive(Clone, Default)]
pub struct PendingRequests {
    inner: Arc<Mutex<HashMap<RequestId, Entry>>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pending entry and returns the receiver half the
    /// caller awaits.
    pub async fn insert(&self, id: RequestId) -> oneshot::Receiver<RequestOutcome> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().await.insert(id.clone(), Entry { resolver: tx });
        tracing::debug!(?id, "pending request registered");
        rx
    }

    /// Resolves a pending entry with a success result. No-op (log-drop,
    /// per §4.4.4) if no entry is found under `id` — e.g. a response that
    /// arrives after its deadline already fired.
    pub async fn resolve(&self, id: &RequestId, result: serde_json::Value) -> bool {
        self.complete(id, RequestOutcome::Result(result)).await
    }

    /// Rejects a pending entry with a wire error triple.
    pub async fn reject(&self, id: &RequestId, error: JsonRpcErrorObject) -> bool {
        self.complete(id, RequestOutcome::Error(error)).await
    }

    async fn complete(&self, id: &RequestId, outcome: RequestOutcome) -> bool {
        let entry = self.inner.lock().await.remove(id);
        match entry {
            Some(entry) => entry.resolver.send(outcome).is_ok(),
            None => {
                tracing::debug!(?id, "response for unknown or already-settled pending request");
                false
            }
        }
    }

    /// Removes a single entry without resolving it (the timeout path:
    /// the deadline future itself carries the `TimeoutError` back to the
    /// caller; this only needs to stop the table from holding a stale
    /// reference).
    pub async fn remove(&self, id: &RequestId) {
        self.inner.lock().await.remove(id);
    }

    /// Rejects every pending entry with the same error — used on
    /// endpoint shutdown (§4.4.2, §4.4.4).
    pub async fn reject_all(&self, error: JsonRpcErrorObject) {
        let mut table = self.inner.lock().await;
        let count = table.len();
        for (_, entry) in table.drain() {
            let _ = entry.resolver.send(RequestOutcome::Error(error.clone()));
        }
        tracing::info!(count, "rejected all pending requests");
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tachyon_mcp_protocol::error_codes;
    use serde_json::json;

    #[tokio::test]
    async fn resolve_delivers_result_and_removes_entry() {
        let table = PendingRequests::new();
        let id = RequestId::Numeric(1);
        let rx = table.insert(id.clone()).await;

        assert!(table.resolve(&id, json!({"ok": true})).await);
        assert_eq!(table.len().await, 0);

        match rx.await.unwrap() {
            RequestOutcome::Result(value) => assert_eq!(value, json!({"ok": true})),
            RequestOutcome::Error(_) => panic!("expected a result"),
        }
    }

    #[tokio::test]
    async fn resolve_on_unknown_id_is_a_no_op() {
        let table = PendingRequests::new();
        assert!(!table.resolve(&RequestId::Numeric(99), json!(null)).await);
    }

    #[tokio::test]
    async fn reject_all_completes_every_pending_entry() {
        let table = PendingRequests::new();
        let rx1 = table.insert(RequestId::Numeric(1)).await;
        let rx2 = table.insert(RequestId::Numeric(2)).await;

        table
            .reject_all(JsonRpcErrorObject::new(
                error_codes::TIMEOUT_ERROR,
                "shutting down",
                None,
            ))
            .await;

        assert!(table.is_empty().await);
        assert!(matches!(rx1.await.unwrap(), RequestOutcome::Error(_)));
        assert!(matches!(rx2.await.unwrap(), RequestOutcome::Error(_)));
    }

    #[tokio::test]
    async fn remove_drops_entry_without_resolving_it() {
        let table = PendingRequests::new();
        let id = RequestId::Numeric(1);
        let rx = table.insert(id.clone()).await;
        table.remove(&id).await;
        assert_eq!(table.len().await, 0);
        drop(rx);
    }
}
