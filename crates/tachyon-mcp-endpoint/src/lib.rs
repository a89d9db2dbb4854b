//! Shared endpoint mechanics reused by both the server and client roles
//! (§2 "Endpoint core... serves both server and client roles, symmetric
//! mechanics"): inbound classification and the outbound pending-request
//! table. Lifecycle state itself lives in `tachyon-mcp-protocol` since it
//! is pure data; this crate holds the bits with actual runtime state.

pub mod classify;
pub mod id_generator;
pub mod pending;

pub use classify::{classify, Classification};
pub use id_generator::IdGenerator;
pub use pending::{PendingRequests, RequestOutcome};
