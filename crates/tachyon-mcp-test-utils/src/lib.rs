//! Shared fixtures, assertions, and a mock transport for testing the
//! protocol and transport crates without pulling in the server or
//! client crates (keeps this crate free of a dev-dependency cycle with
//! either of them).

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use assertions::{assert_protocol_error, assert_protocol_success};
pub use mocks::MockTransport;
