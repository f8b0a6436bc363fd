pub mod domain;
pub mod route;
pub mod service_source;
pub mod tls_certificate;
pub mod wasm_plugin;

// Re-export types
pub use domain::Domain;
pub use route::{
    CorsConfig, ProxyNextUpstreamConfig, RewriteConfig, Route, RoutePredicate,
    RoutePredicateType, UpstreamService,
};
pub use service_source::{RegistryType, ServiceSource, ServiceSourceAuthN};
pub use tls_certificate::TlsCertificate;
pub use wasm_plugin::{WasmPlugin, WasmPluginInstance, WasmPluginInstanceScope};
