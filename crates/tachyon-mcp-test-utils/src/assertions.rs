//! Common test assertion helpers, grounded in the teacher's
//! `ultrafast-mcp-test-utils::assertions`.

use std::fmt::Debug;

use tachyon_mcp_protocol::ProtocolResult;

/// Asserts that a result is a [`ProtocolError`](tachyon_mcp_protocol::ProtocolError)
/// whose `Display` output contains `expected_substring`.
pub fn assert_protocol_error<T: Debug>(result: ProtocolResult<T>, expected_substring: &str) {
    match result {
        Ok(value) => panic!("expected an error containing {expected_substring:?}, got Ok({value:?})"),
        Err(error) => {
            let message = error.to_string();
            assert!(
                message.contains(expected_substring),
                "expected error to contain {expected_substring:?}, got: {message}"
            );
        }
    }
}

/// Asserts that a result is `Ok` and returns the value, with a readable
/// panic message instead of `.unwrap()`'s Debug dump.
pub fn assert_protocol_success<T>(result: ProtocolResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("expected success, got error: {error}"),
    }
}
