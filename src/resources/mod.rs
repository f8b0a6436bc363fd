pub mod annotations;
pub mod configmap;
pub mod destination;
pub mod ingress;
pub mod labels;
pub mod mcp_bridge;
pub mod secret;
pub mod wasm_plugin;

// Re-export converters
pub use configmap::{config_map_to_domain, domain_name_to_config_map_name, domain_to_config_map};
pub use destination::{parse_destinations, serialize_destinations};
pub use ingress::{ingress_to_route, is_supported, route_to_ingress};
pub use mcp_bridge::{add_registry, init_bridge, registry_to_service_source, remove_registry};
pub use secret::{secret_to_tls_certificate, tls_certificate_to_secret};
pub use wasm_plugin::{
    get_instance_from_cr, get_instances_from_cr, merge_wasm_plugin_spec, remove_instance_from_cr,
    set_instance_to_cr, wasm_plugin_from_cr, wasm_plugin_to_cr,
};
