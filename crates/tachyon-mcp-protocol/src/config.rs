//! Timeout configuration, grounded in the teacher's
//! `ultrafast-mcp-core::config::TimeoutConfig` preset-constructor style.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Default deadline for an outbound `sendRequest` call (§4.4.4).
    pub default_request_timeout: Duration,
    /// Grace period `ShuttingDown` allows in-flight handlers to drain
    /// before they are abandoned (§4.4.2, "recommended 1s").
    pub shutdown_grace_period: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_request_timeout: Duration::from_millis(30_000),
            shutdown_grace_period: Duration::from_secs(1),
        }
    }
}

impl TimeoutConfig {
    /// Tighter timeouts for low-latency, same-host peers.
    pub fn high_performance() -> Self {
        Self {
            default_request_timeout: Duration::from_millis(5_000),
            shutdown_grace_period: Duration::from_millis(250),
        }
    }

    /// Looser timeouts for handlers that may do substantial I/O.
    pub fn long_running() -> Self {
        Self {
            default_request_timeout: Duration::from_millis(120_000),
            shutdown_grace_period: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_the_documented_30s_timeout() {
        let config = TimeoutConfig::default();
        assert_eq!(config.default_request_timeout, Duration::from_millis(30_000));
    }
}
