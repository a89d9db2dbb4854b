//! Pre-dispatch hooks for authentication and rate limiting (§4.5),
//! built against the `PreDispatchHook` contract defined in
//! `tachyon-mcp-server`.

pub mod auth;
pub mod rate_limit;

pub use auth::{AuthConfig, AuthHook, CustomValidator};
pub use rate_limit::{spawn_cleanup_task, KeyGenerator, RateLimitConfig, RateLimiter};
