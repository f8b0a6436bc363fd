pub mod mcp_bridge;
pub mod wasm_plugin;

// Re-export types
pub use mcp_bridge::{McpBridge, McpBridgeSpec, RegistryConfig};
pub use wasm_plugin::{MatchRule, WasmPlugin, WasmPluginSpec};
