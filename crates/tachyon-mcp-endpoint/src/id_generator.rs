//! A monotonically increasing numeric id generator (§4.4.4: "generates a
//! monotonically increasing numeric `id` (per endpoint)"). Replaces the
//! UUID-string ids the teacher's client assigns — the spec calls for a
//! simple per-endpoint counter instead.

use std::sync::atomic::{AtomicI64, Ordering};

use tachyon_mcp_protocol::RequestId;

#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
        }
    }

    pub fn next_id(&self) -> RequestId {
        RequestId::Numeric(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
