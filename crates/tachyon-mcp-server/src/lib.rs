//! Server-role endpoint core: tool/resource/prompt registries, the
//! lifecycle state machine, pre-dispatch hooks, and method dispatch
//! (§4.4.2, §4.4.3, §4.5).

pub mod handlers;
pub mod hooks;
pub mod registry;
pub mod server;

pub use handlers::{PromptHandler, ResourceHandler, ToolHandler};
pub use hooks::{run_chain, PreDispatchHook, RequestContext};
pub use registry::Registry;
pub use server::{is_reserved_method, ServerEndpoint};
